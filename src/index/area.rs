//! Area records and the frozen area index

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::{AREA_ID_ATTRIBUTE, ORIGINAL_ID_ATTRIBUTE};
use crate::dom::{NodeId, SvgDocument};
use crate::error::{Error, Result};

/// One logical interactive region of the venue map
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    pub area_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_id: Option<String>,
}

impl Area {
    pub fn new(area_id: impl Into<String>) -> Self {
        Area {
            area_id: area_id.into(),
            original_id: None,
        }
    }

    /// Read an area record from the recognised attributes of an element
    ///
    /// Returns `None` when the element has no area id or an empty one.
    /// Other attributes are ignored.
    pub fn from_element(doc: &SvgDocument, node: NodeId) -> Option<Area> {
        let area_id = doc
            .get_attribute(node, AREA_ID_ATTRIBUTE)
            .filter(|id| !id.is_empty())?;
        let original_id = doc
            .get_attribute(node, ORIGINAL_ID_ATTRIBUTE)
            .filter(|id| !id.is_empty())
            .map(str::to_string);

        Some(Area {
            area_id: area_id.to_string(),
            original_id,
        })
    }
}

/// Immutable mapping from area id to the elements rendering it
///
/// Produced by [`AreaIndexBuilder::finish`](super::AreaIndexBuilder::finish).
/// Every area has at least one element and every bucket has an area.
#[derive(Debug, Clone, Default)]
pub struct AreaIndex {
    areas: Vec<Area>,
    buckets: Vec<Box<[NodeId]>>,
    positions: HashMap<String, usize>,
}

impl AreaIndex {
    pub(super) fn from_parts(
        areas: Vec<Area>,
        buckets: Vec<Box<[NodeId]>>,
        positions: HashMap<String, usize>,
    ) -> Self {
        debug_assert_eq!(areas.len(), buckets.len());
        AreaIndex {
            areas,
            buckets,
            positions,
        }
    }

    /// Index with no areas, used while nothing is loaded
    pub fn empty() -> Self {
        Self::default()
    }

    /// Areas in document order of first appearance
    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// Position of an area in [`areas`](Self::areas)
    pub fn position(&self, area_id: &str) -> Option<usize> {
        self.positions.get(area_id).copied()
    }

    /// Total number of indexed elements across all buckets
    pub fn element_count(&self) -> usize {
        self.buckets.iter().map(|b| b.len()).sum()
    }

    pub fn get_area(&self, area_id: &str) -> Result<&Area> {
        self.positions
            .get(area_id)
            .map(|&i| &self.areas[i])
            .ok_or_else(|| Error::area_not_found(area_id))
    }

    /// Elements of an area, in document order
    pub fn get_elements(&self, area_id: &str) -> Result<&[NodeId]> {
        self.positions
            .get(area_id)
            .map(|&i| &*self.buckets[i])
            .ok_or_else(|| Error::area_not_found(area_id))
    }

    /// Iterate `(area, elements)` pairs in area order
    pub fn iter(&self) -> impl Iterator<Item = (&Area, &[NodeId])> {
        self.areas.iter().zip(self.buckets.iter().map(|b| &**b))
    }
}
