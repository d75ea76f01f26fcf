use bindify_core::{Document, NodeId};

/// Pre-order traversal tolerant of in-place list mutation.
///
/// The callback receives the arena, the current node, its index and the
/// owning child list, and may splice the list at that index (via
/// [`Document::splice`]). When the callback replaced the current node with
/// K nodes, traversal continues from the first of those K nodes rather than
/// skipping past them. Only element nodes recurse; their child list is
/// detached from the arena for the duration of the descent.
pub fn walk<F>(doc: &mut Document, cb: &mut F)
where
    F: FnMut(&mut Document, NodeId, usize, &mut Vec<NodeId>),
{
    let mut roots = std::mem::take(&mut doc.roots);
    walk_list(doc, &mut roots, cb);
    doc.roots = roots;
}

fn walk_list<F>(doc: &mut Document, list: &mut Vec<NodeId>, cb: &mut F)
where
    F: FnMut(&mut Document, NodeId, usize, &mut Vec<NodeId>),
{
    let mut index = 0;
    while index < list.len() {
        let id = list[index];
        cb(doc, id, index, list);

        if list.get(index).copied() != Some(id) {
            // The node was spliced away; revisit the current index.
            continue;
        }

        if let Some(mut children) = doc.take_children(id) {
            walk_list(doc, &mut children, cb);
            doc.put_children(id, children);
        }
        index += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bindify_core::NodeKind;
    use bindify_parser::parse_document;

    fn text_of(doc: &Document, id: NodeId) -> String {
        match &doc.node(id).kind {
            NodeKind::Text(data) => data.clone(),
            NodeKind::Element(element) => format!("<{}>", element.name),
            other => panic!("unexpected node {:?}", other),
        }
    }

    #[test]
    fn visits_every_node_in_pre_order() {
        let mut errors = Vec::new();
        let mut doc = parse_document("<a>1<b>2</b></a>3", &mut errors);
        let mut seen = Vec::new();
        walk(&mut doc, &mut |doc, id, _, _| {
            seen.push(text_of(doc, id));
        });
        assert_eq!(seen, ["<a>", "1", "<b>", "2", "3"]);
    }

    #[test]
    fn continues_from_the_splice_point() {
        let mut errors = Vec::new();
        let mut doc = parse_document("<a>split me</a>", &mut errors);

        let mut seen = Vec::new();
        walk(&mut doc, &mut |doc, id, index, list| {
            let data = text_of(doc, id);
            seen.push(data.clone());
            if data == "split me" {
                let left = doc.push_node(NodeKind::Text("split".into()));
                let right = doc.push_node(NodeKind::Text(" me".into()));
                doc.node_mut(left).next = Some(right);
                doc.node_mut(right).prev = Some(left);
                doc.splice(list, index, vec![left, right]);
            }
        });

        // Both replacement nodes were visited after the splice.
        assert_eq!(seen, ["<a>", "split me", "split", " me"]);
    }

    #[test]
    fn recurses_into_spliced_in_elements() {
        let mut errors = Vec::new();
        let mut doc = parse_document("<a>x</a>", &mut errors);

        let mut seen = Vec::new();
        walk(&mut doc, &mut |doc, id, index, list| {
            let data = text_of(doc, id);
            seen.push(data.clone());
            if data == "x" {
                let wrapped =
                    bindify_parser::parse_fragment(doc, "<b>y</b>", &mut Vec::new());
                doc.splice(list, index, wrapped);
            }
        });

        assert_eq!(seen, ["<a>", "x", "<b>", "y"]);
    }
}
