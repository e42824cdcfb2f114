//! DOM Module - Arena-based SVG Document
//!
//! Implements the in-memory element tree the loader produces:
//! - Arena allocation for nodes
//! - NodeId (u32) indices for cache-friendly traversal
//! - String interning for element/attribute names and values
//! - Inline style overrides, separate from parsed attributes

pub mod document;
pub mod node;
pub mod strings;

pub use document::{StyleProperty, SvgDocument};
pub use node::{NodeId, NodeKind, XmlAttribute, XmlNode};
pub use strings::StringPool;
