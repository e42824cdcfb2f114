//! Markup event types
//!
//! Event types for pull-parser style processing of SVG payloads.

use crate::core::attributes::Attribute;
use std::borrow::Cow;

/// Markup parsing event
#[derive(Debug, Clone)]
pub enum XmlEvent<'a> {
    /// Start of an element: <name attrs...>
    StartElement(StartElement<'a>),
    /// End of an element: </name>
    EndElement(EndElement<'a>),
    /// Empty element: <name attrs.../>
    EmptyElement(StartElement<'a>),
    /// Text content between tags
    Text(Cow<'a, [u8]>),
    /// CDATA section content
    CData(Cow<'a, [u8]>),
    Comment(Cow<'a, [u8]>),
    /// Processing instruction: <?target data?>
    ProcessingInstruction { target: &'a [u8] },
    /// XML declaration: <?xml version="1.0"?>
    XmlDeclaration,
    DocType,
    EndDocument,
}

/// Start element event data
#[derive(Debug, Clone)]
pub struct StartElement<'a> {
    /// Full element name (may include prefix)
    pub name: &'a [u8],
    pub attributes: Vec<Attribute<'a>>,
}

impl<'a> StartElement<'a> {
    pub fn new(name: &'a [u8], attributes: Vec<Attribute<'a>>) -> Self {
        StartElement { name, attributes }
    }

    pub fn name_str(&self) -> Option<&str> {
        std::str::from_utf8(self.name).ok()
    }

    /// Get an attribute value by name as string
    pub fn get_attribute_value(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name_str() == Some(name))
            .and_then(|a| a.value_str())
    }
}

/// End element event data
#[derive(Debug, Clone)]
pub struct EndElement<'a> {
    pub name: &'a [u8],
}

impl<'a> EndElement<'a> {
    pub fn new(name: &'a [u8]) -> Self {
        EndElement { name }
    }

    pub fn name_str(&self) -> Option<&str> {
        std::str::from_utf8(self.name).ok()
    }
}

impl<'a> XmlEvent<'a> {
    pub fn is_start_element(&self) -> bool {
        matches!(self, XmlEvent::StartElement(_) | XmlEvent::EmptyElement(_))
    }

    /// Get as start element if applicable
    pub fn as_start_element(&self) -> Option<&StartElement<'a>> {
        match self {
            XmlEvent::StartElement(e) | XmlEvent::EmptyElement(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_element_lookup() {
        let elem = StartElement::new(
            b"path",
            vec![Attribute::new(b"data-area-id", Cow::Borrowed(b"A12"))],
        );
        assert_eq!(elem.name_str(), Some("path"));
        assert_eq!(elem.get_attribute_value("data-area-id"), Some("A12"));
        assert_eq!(elem.get_attribute_value("fill"), None);
    }

    #[test]
    fn test_event_classification() {
        let start = XmlEvent::EmptyElement(StartElement::new(b"rect", vec![]));
        assert!(start.is_start_element());
        assert!(start.as_start_element().is_some());
        assert!(!XmlEvent::EndElement(EndElement::new(b"g")).is_start_element());
    }
}
