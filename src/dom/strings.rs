//! String interning pool
//!
//! Element names, attribute names and attribute values repeat heavily
//! in exported floor plans (`path`, `fill`, `data-area-id`, category
//! colors). Each distinct string is stored once and referenced by id.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// String interning pool
///
/// - `spans`: (offset, len) into `data` for each id
/// - `data`: concatenated string bytes
/// - `hash_index`: hash -> ids with that hash (handles collisions)
///
/// Id 0 is reserved for the empty string.
#[derive(Debug)]
pub struct StringPool {
    spans: Vec<(u32, u32)>,
    data: Vec<u8>,
    hash_index: HashMap<u64, Vec<u32>>,
}

impl Default for StringPool {
    fn default() -> Self {
        Self::new()
    }
}

impl StringPool {
    pub fn new() -> Self {
        StringPool {
            spans: vec![(0, 0)],
            data: Vec::with_capacity(4096),
            hash_index: HashMap::new(),
        }
    }

    #[inline]
    fn compute_hash(s: &[u8]) -> u64 {
        let mut hasher = DefaultHasher::new();
        s.hash(&mut hasher);
        hasher.finish()
    }

    /// Intern a byte string, returning its id
    pub fn intern(&mut self, s: &[u8]) -> u32 {
        if s.is_empty() {
            return 0;
        }

        let hash = Self::compute_hash(s);
        if let Some(ids) = self.hash_index.get(&hash) {
            for &id in ids {
                if self.get(id) == Some(s) {
                    return id;
                }
            }
        }

        let offset = self.data.len() as u32;
        self.data.extend_from_slice(s);

        let id = self.spans.len() as u32;
        self.spans.push((offset, s.len() as u32));
        self.hash_index.entry(hash).or_default().push(id);
        id
    }

    /// Get the bytes for an id
    pub fn get(&self, id: u32) -> Option<&[u8]> {
        let &(offset, len) = self.spans.get(id as usize)?;
        self.data.get(offset as usize..(offset + len) as usize)
    }

    /// Get a string by id as UTF-8
    pub fn get_str(&self, id: u32) -> Option<&str> {
        self.get(id).and_then(|b| std::str::from_utf8(b).ok())
    }

    /// Number of distinct strings (including the reserved empty string)
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.len() <= 1
    }
}
