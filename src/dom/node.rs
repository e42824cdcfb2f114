//! Arena node representation
//!
//! Uses NodeId (u32) for compact, cache-friendly node references. A
//! NodeId is only meaningful for the document that produced it.

/// Compact node identifier (index into arena)
pub type NodeId = u32;

/// Type of document node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Document root (always node 0)
    Document,
    Element,
    Text,
    CData,
    Comment,
    ProcessingInstruction,
}

/// A node in the arena
#[derive(Debug, Clone)]
pub struct XmlNode {
    pub kind: NodeKind,
    /// Parent node (None for document root)
    pub parent: Option<NodeId>,
    pub first_child: Option<NodeId>,
    pub last_child: Option<NodeId>,
    pub prev_sibling: Option<NodeId>,
    pub next_sibling: Option<NodeId>,
    /// String pool id of the name (elements, PIs) or content (text, cdata, comments)
    pub name_id: u32,
    /// Start of attributes in attribute arena (for elements)
    pub attr_start: u32,
    pub attr_count: u32,
    /// Depth in document tree (document node is 0)
    pub depth: u16,
}

impl XmlNode {
    fn with_kind(kind: NodeKind, name_id: u32, parent: Option<NodeId>, depth: u16) -> Self {
        XmlNode {
            kind,
            parent,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            name_id,
            attr_start: 0,
            attr_count: 0,
            depth,
        }
    }

    pub fn document() -> Self {
        Self::with_kind(NodeKind::Document, 0, None, 0)
    }

    pub fn element(name_id: u32, parent: NodeId, depth: u16) -> Self {
        Self::with_kind(NodeKind::Element, name_id, Some(parent), depth)
    }

    /// Text-like node (text, CDATA, comment, PI) carrying `content_id`
    pub fn leaf(kind: NodeKind, content_id: u32, parent: NodeId, depth: u16) -> Self {
        Self::with_kind(kind, content_id, Some(parent), depth)
    }

    #[inline]
    pub fn is_element(&self) -> bool {
        self.kind == NodeKind::Element
    }

    #[inline]
    pub fn has_children(&self) -> bool {
        self.first_child.is_some()
    }
}

/// Stored attribute
#[derive(Debug, Clone, Copy)]
pub struct XmlAttribute {
    pub name_id: u32,
    pub value_id: u32,
}
