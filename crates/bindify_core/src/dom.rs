/// A node of the parsed markup tree.
/// There are several possible node payloads:
///
/// ### `Element`
/// A basic HTML tag node with a verbatim name, an ordered attribute list
/// and zero or more children. The parser does not add any meaning to the
/// discovered tag name beyond flagging `script`/`style` raw-text content.
///
/// ### `Text`
/// A leaf holding raw character data. No entity decoding is performed.
///
/// ### `Comment`
/// The vanilla HTML comment, `<!-- like this -->`, without the markers.
///
/// ### `CData` / `Directive`
/// `<![CDATA[..]]>` sections and `<!DOCTYPE ..>`/`<?..?>` declarations,
/// stored as the text between the angle brackets.
#[derive(Debug, Clone)]
pub enum NodeKind {
    Element(Element),
    Text(String),
    Comment(String),
    CData(String),
    Directive(String),
}

/// Element node payload. Attribute insertion order is significant: the
/// serializer emits attributes in this exact order.
#[derive(Debug, Clone)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<NodeId>,
    pub kind: ElementKind,
}

/// One `name="raw value"` pair. Values are kept verbatim.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Distinguishes raw-text elements from everything else. The tree shape
/// is identical for all three kinds; only parsing of the content and the
/// attribute-binding pass treat them differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Normal,
    Script,
    Style,
}

/// Opaque handle addressing a node inside a [`Document`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Node payload plus its adjacency. `parent`/`prev`/`next` express relation
/// only, never ownership; ownership of children lives in the parent's
/// `children` list (or in [`Document::roots`] for top-level nodes).
#[derive(Debug)]
pub struct NodeData {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub prev: Option<NodeId>,
    pub next: Option<NodeId>,
}

/// Arena of nodes forming the markup tree.
///
/// The back-reference triple would form a cyclic graph with owned links, so
/// nodes are addressed by [`NodeId`] and adjacency is stored as plain ids,
/// updated explicitly on every splice. Replaced nodes stay allocated in the
/// arena as garbage; a document lives for one transform call only.
#[derive(Debug, Default)]
pub struct Document {
    nodes: Vec<NodeData>,
    pub roots: Vec<NodeId>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a detached node.
    pub fn push_node(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            kind,
            parent: None,
            prev: None,
            next: None,
        });
        id
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.index()]
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.node(id).kind {
            NodeKind::Element(ref element) => Some(element),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match self.node_mut(id).kind {
            NodeKind::Element(ref mut element) => Some(element),
            _ => None,
        }
    }

    #[inline]
    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.node(id).kind, NodeKind::Element(_))
    }

    /// Detaches the children list of an element for mutation-tolerant
    /// traversal. Returns `None` for non-element nodes.
    /// Must be paired with [`Document::put_children`].
    pub fn take_children(&mut self, id: NodeId) -> Option<Vec<NodeId>> {
        self.element_mut(id)
            .map(|element| std::mem::take(&mut element.children))
    }

    pub fn put_children(&mut self, id: NodeId, children: Vec<NodeId>) {
        if let Some(element) = self.element_mut(id) {
            element.children = children;
        }
    }

    /// Appends `id` to a child list, wiring `parent`/`prev`/`next`.
    /// `parent` is `None` for root-level nodes; `list` is the owning list
    /// (the parent's children, or the root list).
    pub fn append(&mut self, parent: Option<NodeId>, list: &mut Vec<NodeId>, id: NodeId) {
        let prev = list.last().copied();
        {
            let node = self.node_mut(id);
            node.parent = parent;
            node.prev = prev;
            node.next = None;
        }
        if let Some(prev) = prev {
            self.node_mut(prev).next = Some(id);
        }
        list.push(id);
    }

    /// Replaces `list[index]` with `replacements`, restitching adjacency:
    /// the first replacement inherits the old node's `prev`, the last one
    /// its `next`, the outer neighbours point back at the new ends, and
    /// every replacement gets the old node's parent. `prev`/`next` among
    /// the replacements themselves are expected to already be linked (the
    /// fragment parser does this). The replaced node is left detached in
    /// the arena.
    pub fn splice(&mut self, list: &mut Vec<NodeId>, index: usize, replacements: Vec<NodeId>) {
        let (Some(&first), Some(&last)) = (replacements.first(), replacements.last()) else {
            return;
        };

        let old = list[index];
        let (old_prev, old_next, parent) = {
            let node = self.node(old);
            (node.prev, node.next, node.parent)
        };

        for &id in &replacements {
            self.node_mut(id).parent = parent;
        }
        self.node_mut(first).prev = old_prev;
        self.node_mut(last).next = old_next;
        if let Some(prev) = old_prev {
            self.node_mut(prev).next = Some(first);
        }
        if let Some(next) = old_next {
            self.node_mut(next).prev = Some(last);
        }

        let _ = list.splice(index..=index, replacements);
    }
}
