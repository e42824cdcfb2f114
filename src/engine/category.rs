//! Product category associations
//!
//! Rows tie an area to a category and its highlight color. They are
//! loaded per load when a product context is configured and drive both
//! highlighting and event eligibility.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// One `(areaId, categoryId, categoryActiveColor)` row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCategory {
    pub area_id: String,
    pub category_id: String,
    pub category_active_color: String,
}

impl ProductCategory {
    pub fn new(
        area_id: impl Into<String>,
        category_id: impl Into<String>,
        category_active_color: impl Into<String>,
    ) -> Self {
        ProductCategory {
            area_id: area_id.into(),
            category_id: category_id.into(),
            category_active_color: category_active_color.into(),
        }
    }
}

/// Argument of `select_areas_by_category_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySelection {
    pub category_id: String,
    /// Restrict the selection to these areas
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_ids: Option<Vec<String>>,
}

impl CategorySelection {
    pub fn new(category_id: impl Into<String>) -> Self {
        CategorySelection {
            category_id: category_id.into(),
            area_ids: None,
        }
    }

    pub fn with_area_ids<I, S>(mut self, area_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.area_ids = Some(area_ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn matches(&self, row: &ProductCategory) -> bool {
        row.category_id == self.category_id
            && self
                .area_ids
                .as_ref()
                .map_or(true, |ids| ids.iter().any(|id| *id == row.area_id))
    }
}

/// Loaded category rows, in the order the collaborator returned them
#[derive(Debug, Clone, Default)]
pub struct CategoryTable {
    rows: Vec<ProductCategory>,
    areas: HashSet<String>,
}

impl CategoryTable {
    pub fn new(rows: Vec<ProductCategory>) -> Self {
        let areas = rows.iter().map(|row| row.area_id.clone()).collect();
        CategoryTable { rows, areas }
    }

    pub fn rows(&self) -> &[ProductCategory] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether any row references `area_id`
    pub fn contains_area(&self, area_id: &str) -> bool {
        self.areas.contains(area_id)
    }

    /// Rows selected by `selection`, in table order
    pub fn matching<'a>(
        &'a self,
        selection: &'a CategorySelection,
    ) -> impl Iterator<Item = &'a ProductCategory> + 'a {
        self.rows.iter().filter(move |row| selection.matches(row))
    }
}
