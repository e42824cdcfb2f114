//! Area Index Builder
//!
//! Walks a parsed document once, in document order, and collects every
//! element carrying a non-empty area id. The builder is mutable while
//! scanning; `finish()` freezes it into an [`AreaIndex`].

use std::collections::HashMap;

use tracing::debug;

use super::area::{Area, AreaIndex};
use crate::config::{AREA_ID_ATTRIBUTE, DEFAULT_AREA_FILL};
use crate::dom::{NodeId, SvgDocument};

/// Builder state for constructing an AreaIndex
#[derive(Debug, Default)]
pub struct AreaIndexBuilder {
    areas: Vec<Area>,
    buckets: Vec<Vec<NodeId>>,
    /// Area id -> position in `areas`/`buckets`
    positions: HashMap<String, usize>,
}

impl AreaIndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one element
    ///
    /// The first element seen for an id creates its area record and
    /// bucket; later ones are appended to the existing bucket. Elements
    /// without a usable id are skipped.
    pub fn visit(&mut self, doc: &SvgDocument, node: NodeId) {
        let Some(area_id) = doc
            .get_attribute(node, AREA_ID_ATTRIBUTE)
            .filter(|id| !id.is_empty())
        else {
            return;
        };

        if let Some(&position) = self.positions.get(area_id) {
            self.buckets[position].push(node);
            return;
        }

        let Some(area) = Area::from_element(doc, node) else {
            return;
        };
        self.positions.insert(area.area_id.clone(), self.areas.len());
        self.areas.push(area);
        self.buckets.push(vec![node]);
    }

    /// Visit every element under (and including) `root` in document order
    pub fn scan(&mut self, doc: &SvgDocument, root: NodeId) {
        for node in std::iter::once(root).chain(doc.descendants(root)) {
            if doc.is_element(node) {
                self.visit(doc, node);
            }
        }
    }

    /// Finish building and return the frozen index
    pub fn finish(self) -> AreaIndex {
        let buckets = self
            .buckets
            .into_iter()
            .map(Vec::into_boxed_slice)
            .collect();
        let mut areas = self.areas;
        areas.shrink_to_fit();
        AreaIndex::from_parts(areas, buckets, self.positions)
    }
}

/// Build the area index of a whole document
pub fn build_index(doc: &SvgDocument) -> AreaIndex {
    let mut builder = AreaIndexBuilder::new();
    if let Some(root) = doc.root_element_id() {
        builder.scan(doc, root);
    }
    let index = builder.finish();
    debug!(
        areas = index.len(),
        elements = index.element_count(),
        "area index built"
    );
    index
}

/// CSS rule giving every tagged element its default cursor and fill
pub fn default_style_rule(interaction_disabled: bool) -> String {
    let cursor = if interaction_disabled { "default" } else { "pointer" };
    format!("[{AREA_ID_ATTRIBUTE}] {{ cursor: {cursor}; fill: {DEFAULT_AREA_FILL} }}")
}

/// Append the default `<style>` element to the document's root element
///
/// Returns the new element, or `None` for a document without a root.
pub fn inject_default_style(doc: &mut SvgDocument, interaction_disabled: bool) -> Option<NodeId> {
    let root = doc.root_element_id()?;
    let rule = default_style_rule(interaction_disabled);
    doc.append_element(root, "style", &[], Some(&rule))
}
