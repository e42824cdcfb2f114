//! Area Index
//!
//! Maps each area id to the one or more elements that render it:
//!
//! ```text
//! AreaIndex
//! ├── areas:     Vec<Area>          # document order of first sight
//! ├── buckets:   Vec<Box<[NodeId]>> # parallel to areas
//! └── positions: HashMap<id, usize>
//! ```
//!
//! Built once per load and replaced wholesale on reload. Node ids point
//! into the document the index was built from and are meaningless for
//! any other document.

pub mod area;
pub mod builder;

pub use area::{Area, AreaIndex};
pub use builder::{build_index, default_style_rule, inject_default_style, AreaIndexBuilder};
