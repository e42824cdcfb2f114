//! Markup Reader Module
//!
//! - SliceReader: zero-copy event reader over a byte slice
//! - Events: event types for pull parsing

pub mod events;
pub mod slice;

pub use events::XmlEvent;
pub use slice::SliceReader;
