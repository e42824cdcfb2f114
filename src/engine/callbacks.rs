//! Host callback slots

use std::fmt;

use serde::Serialize;

use super::events::AreaEventKind;
use crate::dom::SvgDocument;
use crate::index::Area;

/// Payload of the `on_loaded` callback
///
/// The mounted document is passed beside it, since the callback runs
/// while the engine itself is borrowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadedEvent {
    pub areas: Vec<Area>,
    pub interaction_disabled: bool,
    pub category_count: usize,
}

pub type LoadedCallback = Box<dyn FnMut(&LoadedEvent, &SvgDocument) + Send>;
pub type AreaCallback = Box<dyn FnMut(&Area) + Send>;

/// The four overridable slots; an empty slot does nothing
#[derive(Default)]
pub struct Callbacks {
    pub(crate) on_loaded: Option<LoadedCallback>,
    pub(crate) on_area_click: Option<AreaCallback>,
    pub(crate) on_area_mouse_over: Option<AreaCallback>,
    pub(crate) on_area_mouse_out: Option<AreaCallback>,
}

impl Callbacks {
    pub(crate) fn loaded(&mut self, event: &LoadedEvent, document: &SvgDocument) {
        if let Some(callback) = self.on_loaded.as_mut() {
            callback(event, document);
        }
    }

    /// Invoke the slot matching `kind`; returns false when it is empty
    pub(crate) fn area(&mut self, kind: AreaEventKind, area: &Area) -> bool {
        let slot = match kind {
            AreaEventKind::Click => &mut self.on_area_click,
            AreaEventKind::MouseOver => &mut self.on_area_mouse_over,
            AreaEventKind::MouseOut => &mut self.on_area_mouse_out,
        };
        match slot.as_mut() {
            Some(callback) => {
                callback(area);
                true
            }
            None => false,
        }
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("on_loaded", &self.on_loaded.is_some())
            .field("on_area_click", &self.on_area_click.is_some())
            .field("on_area_mouse_over", &self.on_area_mouse_over.is_some())
            .field("on_area_mouse_out", &self.on_area_mouse_out.is_some())
            .finish()
    }
}
