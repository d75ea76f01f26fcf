use bindify_core::{is_self_closing_tag, Document, NodeId, NodeKind};

/// Renders a tree back to markup text.
///
/// Text data and attribute values are inserted verbatim: any escaping is the
/// responsibility of whoever produced the tree. Childless elements from the
/// void/self-closing table get ` />` in xhtml mode and a bare `>` otherwise;
/// every other childless element is rendered with an explicit closing tag.
pub fn document_to_html(doc: &Document, xhtml_mode: bool) -> String {
    let mut out = String::new();
    render_nodes(doc, &doc.roots, xhtml_mode, &mut out);
    out
}

fn render_nodes(doc: &Document, ids: &[NodeId], xhtml_mode: bool, out: &mut String) {
    for &id in ids {
        render_node(doc, id, xhtml_mode, out);
    }
}

fn render_node(doc: &Document, id: NodeId, xhtml_mode: bool, out: &mut String) {
    match &doc.node(id).kind {
        NodeKind::Directive(data) | NodeKind::CData(data) => {
            out.push('<');
            out.push_str(data);
            out.push('>');
        }
        NodeKind::Comment(data) => {
            out.push_str("<!--");
            out.push_str(data);
            out.push_str("-->");
        }
        NodeKind::Text(data) => out.push_str(data),
        NodeKind::Element(element) => {
            out.push('<');
            out.push_str(&element.name);
            for attr in &element.attributes {
                out.push(' ');
                out.push_str(&attr.name);
                out.push_str("=\"");
                out.push_str(&attr.value);
                out.push('"');
            }

            if !element.children.is_empty() {
                out.push('>');
                render_nodes(doc, &element.children, xhtml_mode, out);
                out.push_str("</");
                out.push_str(&element.name);
                out.push('>');
            } else if is_self_closing_tag(&element.name) {
                out.push_str(if xhtml_mode { " />" } else { ">" });
            } else {
                out.push_str("></");
                out.push_str(&element.name);
                out.push('>');
            }
        }
    }
}
