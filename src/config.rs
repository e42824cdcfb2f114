//! Construction input and load options
//!
//! The config is plain serde data so hosts can hand it over as JSON.
//! [`VenueTopViewConfig::validate`] runs once at construction.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Attribute marking an element as part of an area
pub const AREA_ID_ATTRIBUTE: &str = "data-area-id";
/// Optional upstream identifier copied into [`Area`](crate::index::Area)
pub const ORIGINAL_ID_ATTRIBUTE: &str = "data-original-id";
/// Fill applied when a style command resets `fill`
pub const DEFAULT_AREA_FILL: &str = "#FFFFFF";
/// Filter applied when a style command resets `filter`
pub const DEFAULT_AREA_FILTER: &str = "";

/// Construction input of a [`VenueTopView`](crate::engine::VenueTopView)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueTopViewConfig {
    pub api_url: String,
    pub venue_id: String,
    pub container_selector: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales_channel_id: Option<String>,
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

impl VenueTopViewConfig {
    pub fn new(
        api_url: impl Into<String>,
        venue_id: impl Into<String>,
        container_selector: impl Into<String>,
    ) -> Self {
        VenueTopViewConfig {
            api_url: api_url.into(),
            venue_id: venue_id.into(),
            container_selector: container_selector.into(),
            product_id: None,
            sales_channel_id: None,
        }
    }

    /// Attach a product context; category filtering applies from then on
    pub fn with_product(
        mut self,
        product_id: impl Into<String>,
        sales_channel_id: impl Into<String>,
    ) -> Self {
        self.product_id = Some(product_id.into());
        self.sales_channel_id = Some(sales_channel_id.into());
        self
    }

    /// Check required fields
    ///
    /// A blank `product_id` counts as unset. A product without a sales
    /// channel is rejected.
    pub fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(Error::Configuration("apiUrl is required".into()));
        }
        if self.venue_id.trim().is_empty() {
            return Err(Error::Configuration("venueId is required".into()));
        }
        if self.container_selector.trim().is_empty() {
            return Err(Error::Configuration("containerSelector is required".into()));
        }
        if non_blank(self.product_id.as_ref()).is_some()
            && non_blank(self.sales_channel_id.as_ref()).is_none()
        {
            return Err(Error::Configuration(
                "salesChannelId is required when productId is provided".into(),
            ));
        }
        Ok(())
    }

    /// `(product_id, sales_channel_id)` when a product context is configured
    pub fn product_context(&self) -> Option<(&str, &str)> {
        let product = non_blank(self.product_id.as_ref())?;
        let channel = non_blank(self.sales_channel_id.as_ref())?;
        Some((product, channel))
    }

    fn base_url(&self) -> &str {
        self.api_url.strip_suffix('/').unwrap_or(&self.api_url)
    }

    /// URL of the named top view image, e.g. `default` or `express`
    pub fn image_url(&self, name: &str) -> String {
        format!("{}/venue/{}/image/{}.svg", self.base_url(), self.venue_id, name)
    }

    /// URL of the product's area/category list, if a product is configured
    pub fn categories_url(&self) -> Option<String> {
        let (product, channel) = self.product_context()?;
        Some(format!(
            "{}/product/{}/salesChannel/{}/areas",
            self.base_url(),
            product,
            channel
        ))
    }
}

/// Per-load options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadOptions {
    #[serde(default)]
    pub disable_interaction: bool,
}

/// Input of [`VenueTopView::load`](crate::engine::VenueTopView::load)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadRequest {
    /// Image name, e.g. `default` or `express`
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<LoadOptions>,
}

impl LoadRequest {
    pub fn new(name: impl Into<String>) -> Self {
        LoadRequest {
            name: name.into(),
            options: None,
        }
    }

    pub fn with_interaction_disabled(mut self) -> Self {
        self.options = Some(LoadOptions {
            disable_interaction: true,
        });
        self
    }

    pub fn interaction_disabled(&self) -> bool {
        self.options.is_some_and(|o| o.disable_interaction)
    }
}
