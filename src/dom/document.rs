//! SVG Document - Arena-based DOM representation
//!
//! Owned storage for a parsed floor plan:
//! - Arena allocation for nodes
//! - NodeId indices for traversal
//! - String interning for names and attribute values
//! - Inline style overrides kept beside the parsed attributes, so styling
//!   an area never rewrites the markup that was loaded

use std::collections::HashMap;
use std::fmt;

use super::node::{NodeId, NodeKind, XmlAttribute, XmlNode};
use super::strings::StringPool;
use crate::core::tokenizer::{is_blank, ParseError};
use crate::reader::events::StartElement;
use crate::reader::{SliceReader, XmlEvent};

/// Visual properties the engine overrides on area elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    Fill,
    Filter,
}

impl StyleProperty {
    pub fn as_str(self) -> &'static str {
        match self {
            StyleProperty::Fill => "fill",
            StyleProperty::Filter => "filter",
        }
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default)]
struct InlineStyle {
    fill: Option<String>,
    filter: Option<String>,
}

impl InlineStyle {
    fn slot(&mut self, property: StyleProperty) -> &mut Option<String> {
        match property {
            StyleProperty::Fill => &mut self.fill,
            StyleProperty::Filter => &mut self.filter,
        }
    }

    fn get(&self, property: StyleProperty) -> Option<&str> {
        match property {
            StyleProperty::Fill => self.fill.as_deref(),
            StyleProperty::Filter => self.filter.as_deref(),
        }
    }
}

/// A parsed SVG document stored in arena format
#[derive(Debug)]
pub struct SvgDocument {
    nodes: Vec<XmlNode>,
    attributes: Vec<XmlAttribute>,
    strings: StringPool,
    root_element: Option<NodeId>,
    styles: HashMap<NodeId, InlineStyle>,
}

impl SvgDocument {
    /// Parse an SVG payload into a document
    ///
    /// Rejects unbalanced or mismatched tags, content outside the root
    /// element, multiple roots and payloads without any element.
    pub fn parse(input: &[u8]) -> Result<Self, ParseError> {
        let mut doc = SvgDocument {
            nodes: Vec::with_capacity((input.len() / 48).max(16)),
            attributes: Vec::with_capacity((input.len() / 24).max(16)),
            strings: StringPool::new(),
            root_element: None,
            styles: HashMap::new(),
        };
        doc.nodes.push(XmlNode::document());
        doc.build_from_events(input)?;
        Ok(doc)
    }

    /// Build DOM from markup events
    fn build_from_events(&mut self, input: &[u8]) -> Result<(), ParseError> {
        let mut reader = SliceReader::new(input);
        let mut stack: Vec<NodeId> = vec![0];
        let mut tag_stack: Vec<&[u8]> = Vec::new();

        while let Some(event) = reader.next_event() {
            let position = reader.position();
            match event {
                XmlEvent::StartElement(elem) => {
                    self.check_root_slot(&stack, position)?;
                    tag_stack.push(elem.name);
                    let id = self.handle_element(&elem, &stack, position)?;
                    stack.push(id);
                }

                XmlEvent::EmptyElement(elem) => {
                    self.check_root_slot(&stack, position)?;
                    self.handle_element(&elem, &stack, position)?;
                }

                XmlEvent::EndElement(end) => match tag_stack.pop() {
                    Some(open) if open == end.name => {
                        stack.pop();
                    }
                    Some(open) => {
                        return Err(ParseError::new(
                            format!(
                                "Tag mismatch: <{}> closed with </{}>",
                                String::from_utf8_lossy(open),
                                String::from_utf8_lossy(end.name)
                            ),
                            position,
                        ));
                    }
                    None => {
                        return Err(ParseError::new(
                            format!(
                                "Unexpected end tag: </{}>",
                                String::from_utf8_lossy(end.name)
                            ),
                            position,
                        ));
                    }
                },

                XmlEvent::Text(content) => {
                    if stack.len() == 1 {
                        if !is_blank(content.as_ref()) {
                            return Err(ParseError::new(
                                "Text content not allowed outside the root element",
                                position,
                            ));
                        }
                        continue;
                    }
                    self.push_leaf(NodeKind::Text, content.as_ref(), &stack);
                }

                XmlEvent::CData(content) => {
                    if stack.len() == 1 {
                        return Err(ParseError::new(
                            "CDATA section not allowed outside the root element",
                            position,
                        ));
                    }
                    self.push_leaf(NodeKind::CData, content.as_ref(), &stack);
                }

                XmlEvent::Comment(content) => {
                    self.push_leaf(NodeKind::Comment, content.as_ref(), &stack);
                }

                XmlEvent::ProcessingInstruction { target } => {
                    self.push_leaf(NodeKind::ProcessingInstruction, target, &stack);
                }

                XmlEvent::XmlDeclaration | XmlEvent::DocType => {}

                XmlEvent::EndDocument => break,
            }
        }

        if let Some(err) = reader.error() {
            return Err(err.clone());
        }

        if let Some(unclosed) = tag_stack.first() {
            return Err(ParseError::new(
                format!("Unclosed tag: <{}>", String::from_utf8_lossy(unclosed)),
                input.len(),
            ));
        }

        if self.root_element.is_none() {
            return Err(ParseError::new("Document has no root element", input.len()));
        }

        Ok(())
    }

    /// A second top-level element is rejected
    fn check_root_slot(&self, stack: &[NodeId], position: usize) -> Result<(), ParseError> {
        if stack.len() == 1 && self.root_element.is_some() {
            return Err(ParseError::new("Document has multiple root elements", position));
        }
        Ok(())
    }

    fn handle_element(
        &mut self,
        elem: &StartElement<'_>,
        stack: &[NodeId],
        position: usize,
    ) -> Result<NodeId, ParseError> {
        let parent_id = *stack.last().unwrap_or(&0);
        let depth = stack.len() as u16;

        let (attr_start, attr_count) = self
            .attribute_range(elem.attributes.len())
            .ok_or_else(|| ParseError::new("Attribute storage exhausted", position))?;

        let name_id = self.strings.intern(elem.name);
        let mut node = XmlNode::element(name_id, parent_id, depth);
        node.attr_start = attr_start;
        node.attr_count = attr_count;
        for attr in &elem.attributes {
            let name_id = self.strings.intern(attr.name.as_ref());
            let value_id = self.strings.intern(attr.value.as_ref());
            self.attributes.push(XmlAttribute { name_id, value_id });
        }

        let node_id = self.push_node(node, parent_id);
        if self.root_element.is_none() && parent_id == 0 {
            self.root_element = Some(node_id);
        }
        Ok(node_id)
    }

    /// `(attr_start, attr_count)` for `count` new attributes, if the arena can address them
    fn attribute_range(&self, count: usize) -> Option<(u32, u32)> {
        let start = u32::try_from(self.attributes.len()).ok()?;
        let count = u32::try_from(count).ok()?;
        start.checked_add(count)?;
        Some((start, count))
    }

    fn push_leaf(&mut self, kind: NodeKind, content: &[u8], stack: &[NodeId]) {
        let parent_id = *stack.last().unwrap_or(&0);
        let content_id = self.strings.intern(content);
        let node = XmlNode::leaf(kind, content_id, parent_id, stack.len() as u16);
        self.push_node(node, parent_id);
    }

    fn push_node(&mut self, node: XmlNode, parent_id: NodeId) -> NodeId {
        let node_id = self.nodes.len() as NodeId;
        self.nodes.push(node);
        self.link_child(parent_id, node_id);
        node_id
    }

    /// Link a child node as the last child of its parent
    fn link_child(&mut self, parent_id: NodeId, child_id: NodeId) {
        let last_child_opt = self.nodes[parent_id as usize].last_child;

        if let Some(last_child_id) = last_child_opt {
            self.nodes[child_id as usize].prev_sibling = Some(last_child_id);
            self.nodes[last_child_id as usize].next_sibling = Some(child_id);
        } else {
            self.nodes[parent_id as usize].first_child = Some(child_id);
        }
        self.nodes[parent_id as usize].last_child = Some(child_id);
    }

    /// Append a new element (with optional text content) as last child of `parent`
    ///
    /// Returns `None` when `parent` is not an element of this document or
    /// the attribute arena is full.
    pub fn append_element(
        &mut self,
        parent: NodeId,
        name: &str,
        attributes: &[(&str, &str)],
        text: Option<&str>,
    ) -> Option<NodeId> {
        let parent_node = self.get_node(parent).filter(|n| n.is_element())?;
        let depth = parent_node.depth + 1;

        let (attr_start, attr_count) = self.attribute_range(attributes.len())?;

        let name_id = self.strings.intern(name.as_bytes());
        let mut node = XmlNode::element(name_id, parent, depth);
        node.attr_start = attr_start;
        node.attr_count = attr_count;
        for (attr_name, attr_value) in attributes {
            let name_id = self.strings.intern(attr_name.as_bytes());
            let value_id = self.strings.intern(attr_value.as_bytes());
            self.attributes.push(XmlAttribute { name_id, value_id });
        }

        let node_id = self.push_node(node, parent);
        if let Some(text) = text {
            let content_id = self.strings.intern(text.as_bytes());
            let leaf = XmlNode::leaf(NodeKind::Text, content_id, node_id, depth + 1);
            self.push_node(leaf, node_id);
        }
        Some(node_id)
    }

    /// Set an inline style override on an element
    pub fn set_style(&mut self, id: NodeId, property: StyleProperty, value: &str) {
        if self.get_node(id).is_some_and(|n| n.is_element()) {
            *self.styles.entry(id).or_default().slot(property) = Some(value.to_string());
        }
    }

    /// Current inline style override of an element, if one was set
    pub fn style(&self, id: NodeId, property: StyleProperty) -> Option<&str> {
        self.styles.get(&id).and_then(|s| s.get(property))
    }

    /// Get the root element id (first element child of the document node)
    pub fn root_element_id(&self) -> Option<NodeId> {
        self.root_element
    }

    pub fn get_node(&self, id: NodeId) -> Option<&XmlNode> {
        self.nodes.get(id as usize)
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.get_node(id).is_some_and(|n| n.is_element())
    }

    /// Get element name as string (qualified, e.g. `svg:path`)
    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        let node = self.get_node(id).filter(|n| n.is_element())?;
        self.strings.get_str(node.name_id)
    }

    /// Get element name without prefix
    pub fn local_name(&self, id: NodeId) -> Option<&str> {
        let name = self.node_name(id)?;
        Some(name.rsplit_once(':').map_or(name, |(_, local)| local))
    }

    /// Get text content of a text or CDATA node
    pub fn text_content(&self, id: NodeId) -> Option<&str> {
        let node = self.get_node(id)?;
        match node.kind {
            NodeKind::Text | NodeKind::CData => self.strings.get_str(node.name_id),
            _ => None,
        }
    }

    /// Get attributes for an element
    pub fn attributes(&self, id: NodeId) -> &[XmlAttribute] {
        match self.get_node(id) {
            Some(node) => {
                let start = node.attr_start as usize;
                let end = start + node.attr_count as usize;
                self.attributes.get(start..end).unwrap_or(&[])
            }
            None => &[],
        }
    }

    /// Get attribute value by name
    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attributes(id)
            .iter()
            .find(|attr| self.strings.get_str(attr.name_id) == Some(name))
            .and_then(|attr| self.strings.get_str(attr.value_id))
    }

    /// Get all attribute names and values for a node
    pub fn get_attribute_values(&self, id: NodeId) -> Vec<(&str, &str)> {
        self.attributes(id)
            .iter()
            .filter_map(|attr| {
                let name = self.strings.get_str(attr.name_id)?;
                let value = self.strings.get_str(attr.value_id)?;
                Some((name, value))
            })
            .collect()
    }

    /// Iterate over children of a node
    pub fn children(&self, id: NodeId) -> ChildIter<'_> {
        let first = self.get_node(id).and_then(|n| n.first_child);
        ChildIter { doc: self, next: first }
    }

    /// Iterate over all descendants of a node, depth-first in document order
    pub fn descendants(&self, id: NodeId) -> DescendantIter<'_> {
        let mut stack = Vec::new();
        if let Some(node) = self.get_node(id) {
            let mut child_id = node.last_child;
            while let Some(cid) = child_id {
                stack.push(cid);
                child_id = self.get_node(cid).and_then(|n| n.prev_sibling);
            }
        }
        DescendantIter { doc: self, stack }
    }

    /// Iterate from `id` up to the root element, `id` included
    pub fn ancestors(&self, id: NodeId) -> AncestorIter<'_> {
        let next = self.get_node(id).map(|_| id);
        AncestorIter { doc: self, next }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn element_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_element()).count()
    }
}

/// Iterator over child nodes
pub struct ChildIter<'d> {
    doc: &'d SvgDocument,
    next: Option<NodeId>,
}

impl<'d> Iterator for ChildIter<'d> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.doc.get_node(current).and_then(|n| n.next_sibling);
        Some(current)
    }
}

/// Iterator over descendant nodes (depth-first)
pub struct DescendantIter<'d> {
    doc: &'d SvgDocument,
    stack: Vec<NodeId>,
}

impl<'d> Iterator for DescendantIter<'d> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;

        // Children pushed in reverse so the first child is visited first
        if let Some(node) = self.doc.get_node(current) {
            let mut child_id = node.last_child;
            while let Some(id) = child_id {
                self.stack.push(id);
                child_id = self.doc.get_node(id).and_then(|n| n.prev_sibling);
            }
        }

        Some(current)
    }
}

/// Iterator over a node and its ancestors, stopping before the document node
pub struct AncestorIter<'d> {
    doc: &'d SvgDocument,
    next: Option<NodeId>,
}

impl<'d> Iterator for AncestorIter<'d> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        let node = self.doc.get_node(current)?;
        if node.kind == NodeKind::Document {
            self.next = None;
            return None;
        }
        self.next = node.parent;
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> SvgDocument {
        SvgDocument::parse(input.as_bytes()).expect("valid document")
    }

    #[test]
    fn test_parse_simple() {
        let doc = parse("<svg><title>Hall</title></svg>");
        let root = doc.root_element_id().unwrap();
        assert_eq!(doc.node_name(root), Some("svg"));
        let title = doc.children(root).next().unwrap();
        let text = doc.children(title).next().unwrap();
        assert_eq!(doc.text_content(text), Some("Hall"));
    }

    #[test]
    fn test_descendants_in_document_order() {
        let doc = parse("<svg><g id=\"a\"><path id=\"b\"/></g><rect id=\"c\"/></svg>");
        let root = doc.root_element_id().unwrap();
        let ids: Vec<_> = doc
            .descendants(root)
            .filter_map(|id| doc.get_attribute(id, "id"))
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_ancestors_inclusive() {
        let doc = parse("<svg><g><path/></g></svg>");
        let root = doc.root_element_id().unwrap();
        let path = doc.descendants(root).find(|&id| doc.node_name(id) == Some("path")).unwrap();
        let names: Vec<_> = doc.ancestors(path).filter_map(|id| doc.node_name(id)).collect();
        assert_eq!(names, vec!["path", "g", "svg"]);
    }

    #[test]
    fn test_prolog_and_namespaces() {
        let doc = parse(
            "<?xml version=\"1.0\"?>\n<!-- exported -->\n<svg:svg xmlns:svg=\"http://www.w3.org/2000/svg\"/>",
        );
        let root = doc.root_element_id().unwrap();
        assert_eq!(doc.node_name(root), Some("svg:svg"));
        assert_eq!(doc.local_name(root), Some("svg"));
    }

    #[test]
    fn test_attribute_values() {
        let doc = parse("<svg width=\"10\" data-area-id=\"A&amp;B\"/>");
        let root = doc.root_element_id().unwrap();
        assert_eq!(doc.get_attribute(root, "data-area-id"), Some("A&B"));
        assert_eq!(
            doc.get_attribute_values(root),
            vec![("width", "10"), ("data-area-id", "A&B")]
        );
        assert_eq!(doc.get_attribute(root, "height"), None);
    }

    #[test]
    fn test_mismatched_tag_rejected() {
        let err = SvgDocument::parse(b"<svg><g></svg>").unwrap_err();
        assert!(err.message.contains("Tag mismatch"), "{}", err);
    }

    #[test]
    fn test_unclosed_tag_rejected() {
        let err = SvgDocument::parse(b"<svg><g>").unwrap_err();
        assert_eq!(err.message, "Unclosed tag: <svg>");
    }

    #[test]
    fn test_multiple_roots_rejected() {
        assert!(SvgDocument::parse(b"<svg/><svg/>").is_err());
    }

    #[test]
    fn test_text_outside_root_rejected() {
        assert!(SvgDocument::parse(b"not markup").is_err());
        assert!(SvgDocument::parse(b"<svg/> trailing").is_err());
    }

    #[test]
    fn test_no_root_rejected() {
        let err = SvgDocument::parse(b"<!-- only a comment -->").unwrap_err();
        assert_eq!(err.message, "Document has no root element");
    }

    #[test]
    fn test_append_element() {
        let mut doc = parse("<svg><rect/></svg>");
        let root = doc.root_element_id().unwrap();
        let style = doc
            .append_element(root, "style", &[("type", "text/css")], Some("rect{}"))
            .unwrap();
        assert_eq!(doc.children(root).last(), Some(style));
        assert_eq!(doc.get_attribute(style, "type"), Some("text/css"));
        let text = doc.children(style).next().unwrap();
        assert_eq!(doc.text_content(text), Some("rect{}"));
        assert_eq!(doc.get_node(style).unwrap().depth, 2);
    }

    #[test]
    fn test_append_to_non_element_fails() {
        let mut doc = parse("<svg>text</svg>");
        let root = doc.root_element_id().unwrap();
        let text = doc.children(root).next().unwrap();
        assert!(doc.append_element(text, "g", &[], None).is_none());
    }

    #[test]
    fn test_style_overrides_leave_attributes() {
        let mut doc = parse("<svg><path fill=\"#000\"/></svg>");
        let root = doc.root_element_id().unwrap();
        let path = doc.children(root).next().unwrap();

        assert_eq!(doc.style(path, StyleProperty::Fill), None);
        doc.set_style(path, StyleProperty::Fill, "#FF0000");
        doc.set_style(path, StyleProperty::Filter, "blur(2px)");

        assert_eq!(doc.style(path, StyleProperty::Fill), Some("#FF0000"));
        assert_eq!(doc.style(path, StyleProperty::Filter), Some("blur(2px)"));
        assert_eq!(doc.get_attribute(path, "fill"), Some("#000"));
    }

    #[test]
    fn test_attributes_beyond_u16_range_are_kept() {
        let mut input = String::from("<svg><path");
        for i in 0..70_000 {
            input.push_str(&format!(" x{i}=\"{i}\""));
        }
        input.push_str(" data-area-id=\"A12\"/></svg>");

        let doc = parse(&input);
        let root = doc.root_element_id().unwrap();
        let path = doc.children(root).next().unwrap();
        assert_eq!(doc.attributes(path).len(), 70_001);
        assert_eq!(doc.get_attribute(path, "data-area-id"), Some("A12"));
    }
}
