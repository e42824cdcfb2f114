//! Pointer event boundary
//!
//! Raw event type strings are resolved into [`AreaEventKind`] once, when
//! the host hands an event over. Everything past this point matches on
//! the enum.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::dom::NodeId;

/// The three interactions an area reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AreaEventKind {
    Click,
    MouseOver,
    MouseOut,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported event type {0:?}")]
pub struct UnsupportedEvent(pub String);

impl FromStr for AreaEventKind {
    type Err = UnsupportedEvent;

    fn from_str(event_type: &str) -> Result<Self, Self::Err> {
        match event_type {
            "click" => Ok(AreaEventKind::Click),
            "mouseover" | "pointerover" | "pointerenter" => Ok(AreaEventKind::MouseOver),
            "mouseout" | "pointerout" | "pointerleave" => Ok(AreaEventKind::MouseOut),
            other => Err(UnsupportedEvent(other.to_string())),
        }
    }
}

impl AreaEventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AreaEventKind::Click => "click",
            AreaEventKind::MouseOver => "mouseover",
            AreaEventKind::MouseOut => "mouseout",
        }
    }
}

impl fmt::Display for AreaEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A physical event as delivered by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomEvent {
    /// DOM event type, e.g. `click` or `pointerenter`
    pub event_type: String,
    /// Element the event originated on
    pub target: NodeId,
}

impl DomEvent {
    pub fn new(event_type: impl Into<String>, target: NodeId) -> Self {
        DomEvent {
            event_type: event_type.into(),
            target,
        }
    }
}

/// What happened to a dispatched event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// Exactly one area callback slot was invoked
    Dispatched { kind: AreaEventKind, area_id: String },
    /// Nothing listens: no view loaded, interaction disabled, or an
    /// event type the engine does not handle
    NoListener,
    /// Neither the target nor any ancestor carries an area id
    NoArea,
    /// The area is outside the configured product's categories
    Ineligible { area_id: String },
}

impl EventOutcome {
    pub fn is_dispatched(&self) -> bool {
        matches!(self, EventOutcome::Dispatched { .. })
    }
}
