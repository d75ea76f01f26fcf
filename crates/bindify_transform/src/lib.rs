//! The binding-attribute compiler pass: protect template inserts, parse,
//! split mixed text nodes, synthesize binding declarations, serialize,
//! restore. One call owns all of its state; the transform is a pure
//! function of (markup, configuration).

mod bind;
mod error;
mod protect;
mod scan;
mod walk;

use bindify_codegen::document_to_html;
use bindify_core::{Document, ElementKind, NodeId, NodeKind, TransformOptions};
use bindify_parser::{parse_document, parse_fragment, ParseError};
use fxhash::FxHashSet;
use log::trace;

use bind::{append_declaration, BindTarget};
use protect::TemplateInsertProtector;
use scan::{synthesize, BindingScanner};
use walk::walk;

pub use error::TransformError;

/// Rewrites markup so that every binding insert is declared through the
/// configured binding attribute of an anchoring element.
pub fn transform(html: &str, options: &TransformOptions) -> Result<String, TransformError> {
    let mut parse_errors = Vec::new();
    transform_with_errors(html, options, &mut parse_errors)
}

/// Same as [`transform`], additionally collecting whatever the tolerant
/// tree builder had to recover from. Recoveries never fail the transform.
pub fn transform_with_errors(
    html: &str,
    options: &TransformOptions,
    parse_errors: &mut Vec<ParseError>,
) -> Result<String, TransformError> {
    let mut skip_attributes: FxHashSet<&str> = options
        .skip_attributes
        .iter()
        .map(String::as_str)
        .collect();
    skip_attributes.insert(options.bind_attribute_name.as_str());

    let scanner = BindingScanner::new(&options.binding_delimiters)?;
    let mut protector = TemplateInsertProtector::new(&options.template_delimiters)?;
    let protected = protector.protect(html)?;

    let mut doc = parse_document(&protected, parse_errors);

    split_mixed_text_nodes(&mut doc, &scanner, &protector, parse_errors);

    // A tree that is nothing but one dynamic text node has no legal anchor;
    // re-parse the whole markup wrapped in an inline element.
    if doc.roots.len() == 1
        && matches!(doc.node(doc.roots[0]).kind, NodeKind::Text(_))
        && scanner.is_match(&protected)
    {
        doc = parse_document(&format!("<span>{}</span>", protected), parse_errors);
    }

    write_binding_declarations(&mut doc, &scanner, options, &skip_attributes);

    let rendered = document_to_html(&doc, options.xhtml_mode);
    Ok(protector.restore(rendered))
}

/// First walker pass: a text run mixing a binding insert with a live
/// protector token must become separate nodes, so that each fragment can
/// acquire its own handler and anchor. The first binding insert of such a
/// run is wrapped in a synthetic `<span>`, the fragment re-parsed and
/// spliced in place; the walker's continue-from-splice-point contract then
/// picks up the remaining runs one by one.
fn split_mixed_text_nodes(
    doc: &mut Document,
    scanner: &BindingScanner,
    protector: &TemplateInsertProtector,
    parse_errors: &mut Vec<ParseError>,
) {
    let Some(traces) = protector.traces_pattern() else {
        // Nothing was protected: no text can still contain a placeholder.
        return;
    };

    walk(doc, &mut |doc, id, index, list| {
        let data = match &doc.node(id).kind {
            NodeKind::Text(data) => data.clone(),
            _ => return,
        };
        if !traces.is_match(&data) {
            return;
        }
        let Some(range) = scanner.first_match_range(&data) else {
            return;
        };
        if range.start == 0 && range.end == data.len() {
            // The whole run is one binding insert; there is nothing to
            // separate from the placeholder.
            return;
        }

        let wrapped = format!(
            "{}<span>{}</span>{}",
            &data[..range.start],
            &data[range.start..range.end],
            &data[range.end..]
        );
        let fragment = parse_fragment(doc, &wrapped, parse_errors);
        if fragment.is_empty() {
            return;
        }
        trace!("split mixed text run into {} nodes", fragment.len());
        doc.splice(list, index, fragment);
    });
}

/// Second walker pass: synthesize expressions and accumulate `handler:expr`
/// declarations on the anchor elements.
fn write_binding_declarations(
    doc: &mut Document,
    scanner: &BindingScanner,
    options: &TransformOptions,
    skip_attributes: &FxHashSet<&str>,
) {
    walk(doc, &mut |doc, id, _index, _list| {
        let is_plain_element = matches!(
            &doc.node(id).kind,
            NodeKind::Element(element) if element.kind == ElementKind::Normal
        );
        if is_plain_element {
            rewrite_element_attributes(doc, id, scanner, options, skip_attributes);
        } else if matches!(doc.node(id).kind, NodeKind::Text(_)) {
            rewrite_text_node(doc, id, scanner, options);
        }
    });
}

fn rewrite_element_attributes(
    doc: &mut Document,
    id: NodeId,
    scanner: &BindingScanner,
    options: &TransformOptions,
    skip_attributes: &FxHashSet<&str>,
) {
    let mut index = 0;
    loop {
        // Re-borrowed every round: the binding attribute may be appended to
        // the list mid-loop (and is then skipped by name).
        let (name, value) = {
            let Some(element) = doc.element(id) else { return };
            let Some(attr) = element.attributes.get(index) else {
                break;
            };
            (attr.name.clone(), attr.value.clone())
        };
        index += 1;

        if skip_attributes.contains(name.as_str()) {
            continue;
        }
        let pieces = scanner.split(&value);
        if pieces.len() <= 1 {
            continue;
        }

        let synthesized = synthesize(
            &pieces,
            &options.template_delimiters,
            &options.expression_root,
        );
        // The value handler owns the attribute outright; leaving a
        // placeholder in it would fight the live binding. Every other
        // attribute keeps its re-wrapped literal content.
        let (target, new_value) = if name == "value" {
            (BindTarget::Value, String::new())
        } else {
            (BindTarget::Attr(name.clone()), synthesized.new_data)
        };

        let Some(element) = doc.element_mut(id) else { return };
        append_declaration(
            element,
            &options.bind_attribute_name,
            &target,
            &synthesized.binding_expr,
        );
        if let Some(attr) = element.attributes.iter_mut().find(|a| a.name == name) {
            attr.value = new_value;
        }
    }
}

fn rewrite_text_node(
    doc: &mut Document,
    id: NodeId,
    scanner: &BindingScanner,
    options: &TransformOptions,
) {
    let data = match &doc.node(id).kind {
        NodeKind::Text(data) => data.clone(),
        _ => return,
    };
    let pieces = scanner.split(&data);
    if pieces.len() <= 1 {
        return;
    }

    let (prev, parent, next) = {
        let node = doc.node(id);
        (node.prev, node.parent, node.next)
    };

    // Anchor priority: previous sibling, else parent, else next sibling.
    // The handler keys off plain existence of the back-references.
    let target = if prev.is_some() {
        BindTarget::TextNext
    } else if parent.is_some() {
        if next.is_some() {
            BindTarget::TextFirst
        } else {
            BindTarget::Text
        }
    } else {
        BindTarget::TextPrev
    };
    let Some(anchor) = prev.or(parent).or(next) else {
        return;
    };

    let synthesized = synthesize(
        &pieces,
        &options.template_delimiters,
        &options.expression_root,
    );

    // A non-element anchor (say, a comment sibling) cannot host the binding
    // attribute; the text run is left as-is.
    let Some(element) = doc.element_mut(anchor) else {
        return;
    };
    append_declaration(
        element,
        &options.bind_attribute_name,
        &target,
        &synthesized.binding_expr,
    );

    if let NodeKind::Text(ref mut data) = doc.node_mut(id).kind {
        *data = synthesized.new_data;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(html: &str) -> String {
        transform(html, &TransformOptions::default()).unwrap()
    }

    #[test]
    fn mixed_text_run_is_split_per_fragment() {
        // The template insert and the binding insert share one text run;
        // each ends up on its own node with its own anchor.
        let out = run("<div>{{head}} {a}</div>");
        assert_eq!(
            out,
            "<div>{{head}} <span data-bind=\"text:this.a\">{{a}}</span></div>"
        );
    }

    #[test]
    fn trailing_run_after_the_split_anchors_to_the_span() {
        // Only the run still carrying the placeholder is split; the tail
        // " and {b}" stays a sibling text node and binds as text(next).
        let out = run("<div>{{t}} {a} and {b}</div>");
        assert_eq!(
            out,
            "<div>{{t}} <span data-bind=\"text:this.a,text(next):' and '+this.b\">\
             {{a}}</span> and {{b}}</div>"
        );
    }

    #[test]
    fn text_without_live_placeholder_is_not_split() {
        let out = run("<div>hi {a}</div>");
        assert_eq!(out, "<div data-bind=\"text:'hi '+this.a\">hi {{a}}</div>");
    }

    #[test]
    fn comment_anchor_leaves_text_untouched() {
        let out = run("<div><!-- c -->{a}</div>");
        assert_eq!(out, "<div><!-- c -->{a}</div>");
    }

    #[test]
    fn script_attributes_pass_through_but_script_text_binds() {
        let out = run(r#"<script type="{t}">var a = {x};</script>"#);
        assert_eq!(
            out,
            "<script type=\"{t}\" data-bind=\"text:'var a = '+this.x+';'\">var a = {{x}};</script>"
        );
    }
}
