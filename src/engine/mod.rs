//! Interaction & Styling Engine
//!
//! [`VenueTopView`] owns the loaded document, its area index and the
//! product category rows, and serves style and query operations on them:
//!
//! ```text
//! Unloaded ──load──> Loading ──ok──> Loaded ──unload──> Unloaded
//!                       │                │
//!                       └──err──> Failed └──load──> Loading
//! ```
//!
//! Every `load` first detaches and drops the previous view, then builds a
//! new one off to the side and swaps it in only once it is complete.
//! `load` takes `&mut self`, so two loads can never overlap on one
//! instance; hosts sharing an instance across tasks put it behind an
//! async mutex, which queues loads in arrival order.
//!
//! While not `Loaded` the engine behaves as if the index were empty:
//! lookups and style commands fail with [`Error::AreaNotFound`], selection
//! resets are no-ops and events are not listened to.

pub mod callbacks;
pub mod category;
pub mod events;
pub mod mount;
pub mod style;

use std::fmt;
use std::num::NonZeroUsize;

use lru::LruCache;
use tracing::{debug, info, warn};

use self::callbacks::{Callbacks, LoadedEvent};
use self::category::{CategorySelection, CategoryTable, ProductCategory};
use self::events::{AreaEventKind, DomEvent, EventOutcome};
use self::mount::{Container, Page};
use self::style::AreaStyle;
use crate::config::{
    LoadRequest, VenueTopViewConfig, AREA_ID_ATTRIBUTE, DEFAULT_AREA_FILL, DEFAULT_AREA_FILTER,
};
use crate::dom::{NodeId, StyleProperty, SvgDocument};
use crate::error::{Error, Result};
use crate::index::{build_index, inject_default_style, Area, AreaIndex};
use crate::loader::{fetch_categories, fetch_document, HttpClient};

/// Event target -> area position memo, per load
const RESOLUTION_CACHE_SIZE: NonZeroUsize = NonZeroUsize::MIN.saturating_add(511);

/// Document-load lifecycle of one instance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Unloaded,
    Loading,
    Loaded,
    Failed,
}

/// Everything a successful load produced; replaced as a unit
struct LoadedView {
    document: SvgDocument,
    index: AreaIndex,
    categories: CategoryTable,
    interaction_disabled: bool,
    container: Box<dyn Container>,
    resolved: LruCache<NodeId, Option<usize>>,
}

impl LoadedView {
    fn paint(&mut self, area_id: &str, property: StyleProperty, value: &str) -> Result<()> {
        let elements = self.index.get_elements(area_id)?;
        for &node in elements {
            self.document.set_style(node, property, value);
            self.container.style_changed(node, property, value);
        }
        Ok(())
    }

    fn apply(&mut self, style: &AreaStyle) -> Result<()> {
        // Unknown areas fail even when the command touches nothing
        self.index.get_elements(&style.area_id)?;

        if let Some(fill) = style.fill.resolve(DEFAULT_AREA_FILL) {
            self.paint(&style.area_id, StyleProperty::Fill, fill)?;
        }
        if let Some(filter) = style.filter.resolve(DEFAULT_AREA_FILTER) {
            self.paint(&style.area_id, StyleProperty::Filter, filter)?;
        }
        Ok(())
    }

    /// Reset the fill of every area, in area order. Filters are kept.
    fn reset_fills(&mut self) {
        for (_, elements) in self.index.iter() {
            for &node in elements {
                self.document
                    .set_style(node, StyleProperty::Fill, DEFAULT_AREA_FILL);
                self.container
                    .style_changed(node, StyleProperty::Fill, DEFAULT_AREA_FILL);
            }
        }
    }

    /// Nearest element at or above `target` with a non-empty area id
    fn resolve_area(&mut self, target: NodeId) -> Option<usize> {
        if let Some(&cached) = self.resolved.get(&target) {
            return cached;
        }
        let position = self
            .document
            .ancestors(target)
            .filter_map(|node| self.document.get_attribute(node, AREA_ID_ATTRIBUTE))
            .find(|id| !id.is_empty())
            .and_then(|id| self.index.position(id));
        self.resolved.put(target, position);
        position
    }
}

async fn build_view<C, P>(
    config: &VenueTopViewConfig,
    client: &C,
    page: &P,
    request: &LoadRequest,
) -> Result<LoadedView>
where
    C: HttpClient,
    P: Page,
{
    let mut container = page
        .query_selector(&config.container_selector)
        .ok_or_else(|| Error::ContainerNotFound {
            selector: config.container_selector.clone(),
        })?;

    let mut document = fetch_document(client, &config.image_url(&request.name)).await?;

    let categories = match config.categories_url() {
        Some(url) => fetch_categories(client, &url).await?,
        None => Vec::new(),
    };

    let interaction_disabled = request.interaction_disabled();
    inject_default_style(&mut document, interaction_disabled);
    let index = build_index(&document);
    container.attach(&document);

    Ok(LoadedView {
        document,
        index,
        categories: CategoryTable::new(categories),
        interaction_disabled,
        container,
        resolved: LruCache::new(RESOLUTION_CACHE_SIZE),
    })
}

/// A venue top view widget instance
///
/// # Example
///
/// ```ignore
/// let config = VenueTopViewConfig::new("https://api.example.com", "venue-1", "#map");
/// let mut view = VenueTopView::new(config, ReqwestHttpClient::new(), page)?;
/// view.on_area_click(|area| println!("clicked {}", area.area_id));
/// view.load(&LoadRequest::new("default")).await?;
/// view.set_area_style(&AreaStyle::new("A12").fill("#FF0000"))?;
/// ```
pub struct VenueTopView<C, P> {
    config: VenueTopViewConfig,
    client: C,
    page: P,
    state: LoadState,
    view: Option<LoadedView>,
    callbacks: Callbacks,
}

impl<C, P> VenueTopView<C, P>
where
    C: HttpClient,
    P: Page,
{
    /// Create an unloaded instance; fails if `config` is invalid
    pub fn new(config: VenueTopViewConfig, client: C, page: P) -> Result<Self> {
        config.validate()?;
        Ok(VenueTopView {
            config,
            client,
            page,
            state: LoadState::Unloaded,
            view: None,
            callbacks: Callbacks::default(),
        })
    }

    pub fn config(&self) -> &VenueTopViewConfig {
        &self.config
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.state == LoadState::Loaded
    }

    /// The mounted document, with style overrides applied
    pub fn document(&self) -> Option<&SvgDocument> {
        self.view.as_ref().map(|v| &v.document)
    }

    /// Areas in document order; empty unless loaded
    pub fn areas(&self) -> &[Area] {
        self.view.as_ref().map_or(&[][..], |v| v.index.areas())
    }

    pub fn product_categories(&self) -> &[ProductCategory] {
        self.view.as_ref().map_or(&[][..], |v| v.categories.rows())
    }

    pub fn interaction_disabled(&self) -> bool {
        self.view.as_ref().is_some_and(|v| v.interaction_disabled)
    }

    /// Called after each successful load with the payload and the mounted document
    pub fn on_loaded(
        &mut self,
        callback: impl FnMut(&LoadedEvent, &SvgDocument) + Send + 'static,
    ) -> &mut Self {
        self.callbacks.on_loaded = Some(Box::new(callback));
        self
    }

    pub fn on_area_click(&mut self, callback: impl FnMut(&Area) + Send + 'static) -> &mut Self {
        self.callbacks.on_area_click = Some(Box::new(callback));
        self
    }

    pub fn on_area_mouse_over(&mut self, callback: impl FnMut(&Area) + Send + 'static) -> &mut Self {
        self.callbacks.on_area_mouse_over = Some(Box::new(callback));
        self
    }

    pub fn on_area_mouse_out(&mut self, callback: impl FnMut(&Area) + Send + 'static) -> &mut Self {
        self.callbacks.on_area_mouse_out = Some(Box::new(callback));
        self
    }

    /// Load the named top view image
    ///
    /// Ends in `Loaded` (and fires `on_loaded`) or in `Failed` with the
    /// error returned. The previous view is gone either way.
    pub async fn load(&mut self, request: &LoadRequest) -> Result<()> {
        self.teardown();
        self.state = LoadState::Loading;
        info!(
            venue_id = %self.config.venue_id,
            name = %request.name,
            interaction_disabled = request.interaction_disabled(),
            "loading top view"
        );

        match build_view(&self.config, &self.client, &self.page, request).await {
            Ok(view) => {
                let event = LoadedEvent {
                    areas: view.index.areas().to_vec(),
                    interaction_disabled: view.interaction_disabled,
                    category_count: view.categories.len(),
                };
                info!(
                    areas = view.index.len(),
                    elements = view.index.element_count(),
                    categories = event.category_count,
                    "top view loaded"
                );
                self.state = LoadState::Loaded;
                let view = self.view.insert(view);
                self.callbacks.loaded(&event, &view.document);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, code = err.error_code(), "top view load failed");
                self.state = LoadState::Failed;
                Err(err)
            }
        }
    }

    /// Detach and drop the current view
    pub fn unload(&mut self) {
        self.teardown();
        self.state = LoadState::Unloaded;
    }

    fn teardown(&mut self) {
        if let Some(mut view) = self.view.take() {
            view.container.detach();
            debug!(areas = view.index.len(), "previous view detached");
        }
    }

    /// Apply a style command to every element of one area
    pub fn set_area_style(&mut self, style: &AreaStyle) -> Result<()> {
        debug!(area_id = %style.area_id, fill = ?style.fill, filter = ?style.filter, "set area style");
        match self.view.as_mut() {
            Some(view) => view.apply(style),
            None => Err(Error::area_not_found(&style.area_id)),
        }
    }

    /// Reset the fill of every area to the default; filters are untouched
    pub fn reset_selection(&mut self) {
        if let Some(view) = self.view.as_mut() {
            view.reset_fills();
        }
    }

    /// Reset the selection, then highlight the areas of one category
    ///
    /// Matching rows are applied in table order, so the last row for an
    /// area decides its fill. A row naming an area missing from the
    /// document fails with `AreaNotFound` after earlier rows were applied.
    pub fn select_areas_by_category_id(&mut self, selection: &CategorySelection) -> Result<()> {
        let Some(view) = self.view.as_mut() else {
            return Ok(());
        };
        view.reset_fills();

        let rows: Vec<(String, String)> = view
            .categories
            .matching(selection)
            .map(|row| (row.area_id.clone(), row.category_active_color.clone()))
            .collect();
        debug!(category_id = %selection.category_id, rows = rows.len(), "select areas by category");

        for (area_id, color) in &rows {
            view.apply(&AreaStyle::new(area_id.as_str()).fill(color.as_str()))?;
        }
        Ok(())
    }

    /// Elements rendering an area, in document order
    pub fn get_area_elements(&self, area_id: &str) -> Result<&[NodeId]> {
        match self.view.as_ref() {
            Some(view) => view.index.get_elements(area_id),
            None => Err(Error::area_not_found(area_id)),
        }
    }

    pub fn get_area_by_id(&self, area_id: &str) -> Result<&Area> {
        match self.view.as_ref() {
            Some(view) => view.index.get_area(area_id),
            None => Err(Error::area_not_found(area_id)),
        }
    }

    /// Route one physical event to at most one area callback
    pub fn dispatch(&mut self, event: &DomEvent) -> EventOutcome {
        let Ok(kind) = event.event_type.parse::<AreaEventKind>() else {
            return EventOutcome::NoListener;
        };
        let Some(view) = self.view.as_mut() else {
            return EventOutcome::NoListener;
        };
        if view.interaction_disabled {
            return EventOutcome::NoListener;
        }

        let Some(area) = view
            .resolve_area(event.target)
            .and_then(|position| view.index.areas().get(position))
        else {
            return EventOutcome::NoArea;
        };

        if self.config.product_context().is_some() && !view.categories.contains_area(&area.area_id) {
            debug!(area_id = %area.area_id, event = %kind, "event outside product categories ignored");
            return EventOutcome::Ineligible {
                area_id: area.area_id.clone(),
            };
        }

        self.callbacks.area(kind, area);
        EventOutcome::Dispatched {
            kind,
            area_id: area.area_id.clone(),
        }
    }
}

impl<C, P> fmt::Debug for VenueTopView<C, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VenueTopView")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("areas", &self.view.as_ref().map_or(0, |v| v.index.len()))
            .field("callbacks", &self.callbacks)
            .finish_non_exhaustive()
    }
}
