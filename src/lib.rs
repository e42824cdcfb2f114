//! venuemap - Venue top view area interaction engine
//!
//! Loads a vector floor plan, indexes its interactive areas and lets a
//! host restyle and react to them.
//!
//! Layers, leaves first:
//! A: Markup parsing (core, reader) into an arena document (dom)
//! B: Document loader over an injectable HTTP client (loader)
//! C: Area index builder (index)
//! D: Interaction & styling engine (engine)

pub mod config;
pub mod core;
pub mod dom;
pub mod engine;
pub mod error;
pub mod index;
pub mod loader;
pub mod reader;

pub use config::{LoadOptions, LoadRequest, VenueTopViewConfig};
pub use dom::{NodeId, StyleProperty, SvgDocument};
pub use engine::callbacks::LoadedEvent;
pub use engine::category::{CategorySelection, ProductCategory};
pub use engine::events::{AreaEventKind, DomEvent, EventOutcome};
pub use engine::mount::{Container, HeadlessPage, Page};
pub use engine::style::{AreaStyle, StyleValue};
pub use engine::{LoadState, VenueTopView};
pub use error::{Error, Result};
pub use index::{Area, AreaIndex};
pub use loader::{HttpClient, HttpError, MockHttpClient};
#[cfg(feature = "http")]
pub use loader::ReqwestHttpClient;
