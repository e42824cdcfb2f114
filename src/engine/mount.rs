//! Mount point abstraction
//!
//! The host owns the real container element. The engine only asks the
//! [`Page`] for a container by selector, attaches the loaded document to
//! it, reports style mutations, and detaches on teardown.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::dom::{NodeId, StyleProperty, SvgDocument};

/// A container element the document is mounted into
pub trait Container: Send {
    /// Replace the container's content with `document`
    fn attach(&mut self, document: &SvgDocument);

    /// Remove the mounted document
    fn detach(&mut self);

    /// An inline style of a mounted element changed
    fn style_changed(&mut self, _node: NodeId, _property: StyleProperty, _value: &str) {}
}

/// Resolves container selectors
pub trait Page: Send + Sync {
    fn query_selector(&self, selector: &str) -> Option<Box<dyn Container>>;
}

/// Something a [`HeadlessPage`] container observed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountEvent {
    Attached {
        selector: String,
        elements: usize,
    },
    Detached {
        selector: String,
    },
    StyleChanged {
        selector: String,
        node: NodeId,
        property: StyleProperty,
        value: String,
    },
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// In-memory page for headless hosts and tests
///
/// Knows a fixed set of selectors and records every mount event. Clones
/// share state.
#[derive(Debug, Clone, Default)]
pub struct HeadlessPage {
    selectors: Arc<Mutex<HashSet<String>>>,
    log: Arc<Mutex<Vec<MountEvent>>>,
}

impl HeadlessPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_container(selector: &str) -> Self {
        let page = Self::new();
        page.add_container(selector);
        page
    }

    pub fn add_container(&self, selector: &str) {
        lock(&self.selectors).insert(selector.to_string());
    }

    pub fn remove_container(&self, selector: &str) {
        lock(&self.selectors).remove(selector);
    }

    pub fn events(&self) -> Vec<MountEvent> {
        lock(&self.log).clone()
    }
}

impl Page for HeadlessPage {
    fn query_selector(&self, selector: &str) -> Option<Box<dyn Container>> {
        if !lock(&self.selectors).contains(selector) {
            return None;
        }
        Some(Box::new(HeadlessContainer {
            selector: selector.to_string(),
            log: Arc::clone(&self.log),
        }))
    }
}

struct HeadlessContainer {
    selector: String,
    log: Arc<Mutex<Vec<MountEvent>>>,
}

impl Container for HeadlessContainer {
    fn attach(&mut self, document: &SvgDocument) {
        lock(&self.log).push(MountEvent::Attached {
            selector: self.selector.clone(),
            elements: document.element_count(),
        });
    }

    fn detach(&mut self) {
        lock(&self.log).push(MountEvent::Detached {
            selector: self.selector.clone(),
        });
    }

    fn style_changed(&mut self, node: NodeId, property: StyleProperty, value: &str) {
        lock(&self.log).push(MountEvent::StyleChanged {
            selector: self.selector.clone(),
            node,
            property,
            value: value.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_selector() {
        let page = HeadlessPage::with_container("#map");
        assert!(page.query_selector("#other").is_none());
        page.remove_container("#map");
        assert!(page.query_selector("#map").is_none());
    }

    #[test]
    fn test_container_records_events() {
        let page = HeadlessPage::with_container("#map");
        let doc = SvgDocument::parse(b"<svg><rect/></svg>").unwrap();

        let mut container = page.query_selector("#map").unwrap();
        container.attach(&doc);
        container.style_changed(1, StyleProperty::Fill, "#FFFFFF");
        container.detach();

        assert_eq!(
            page.events(),
            vec![
                MountEvent::Attached { selector: "#map".into(), elements: 2 },
                MountEvent::StyleChanged {
                    selector: "#map".into(),
                    node: 1,
                    property: StyleProperty::Fill,
                    value: "#FFFFFF".into(),
                },
                MountEvent::Detached { selector: "#map".into() },
            ]
        );
    }
}
