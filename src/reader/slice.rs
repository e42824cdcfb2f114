//! Zero-copy slice reader
//!
//! Turns tokens from the [`Tokenizer`] into [`XmlEvent`]s, parsing the
//! attributes of start tags. Names and unescaped values borrow from the
//! input.

use super::events::{EndElement, StartElement, XmlEvent};
use crate::core::attributes::{parse_attributes, Attribute};
use crate::core::tokenizer::{ParseError, Token, TokenKind, Tokenizer};

/// Zero-copy event reader over a byte slice
pub struct SliceReader<'a> {
    input: &'a [u8],
    tokenizer: Tokenizer<'a>,
    attr_error: Option<ParseError>,
}

impl<'a> SliceReader<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        SliceReader {
            input,
            tokenizer: Tokenizer::new(input),
            attr_error: None,
        }
    }

    /// Get the error that stopped reading, if any
    pub fn error(&self) -> Option<&ParseError> {
        self.attr_error.as_ref().or_else(|| self.tokenizer.error())
    }

    /// Byte offset just past the last event read
    pub fn position(&self) -> usize {
        self.tokenizer.position()
    }

    /// Get the next event
    pub fn next_event(&mut self) -> Option<XmlEvent<'a>> {
        if self.attr_error.is_some() {
            return None;
        }

        let token = self.tokenizer.next_token()?;

        match token.kind {
            TokenKind::Eof => Some(XmlEvent::EndDocument),

            TokenKind::StartTag => {
                let attrs = self.parse_tag_attributes(&token)?;
                Some(XmlEvent::StartElement(StartElement::new(token.name?, attrs)))
            }

            TokenKind::EmptyTag => {
                let attrs = self.parse_tag_attributes(&token)?;
                Some(XmlEvent::EmptyElement(StartElement::new(token.name?, attrs)))
            }

            TokenKind::EndTag => Some(XmlEvent::EndElement(EndElement::new(token.name?))),

            TokenKind::Text => Some(XmlEvent::Text(token.content?)),
            TokenKind::CData => Some(XmlEvent::CData(token.content?)),
            TokenKind::Comment => Some(XmlEvent::Comment(token.content?)),

            TokenKind::ProcessingInstruction => {
                Some(XmlEvent::ProcessingInstruction { target: token.name? })
            }

            TokenKind::XmlDeclaration => Some(XmlEvent::XmlDeclaration),
            TokenKind::DocType => Some(XmlEvent::DocType),
        }
    }

    /// Parse attributes from a start or empty tag token
    fn parse_tag_attributes(&mut self, token: &Token<'a>) -> Option<Vec<Attribute<'a>>> {
        let (start, end) = token.span;
        let tag_content = &self.input[start..end];

        // Skip '<' and the tag name
        let name_len = token.name.map_or(0, |n| n.len());
        let attr_start = (1 + name_len).min(tag_content.len());

        let mut attr_end = tag_content.len();
        if tag_content.ends_with(b"/>") {
            attr_end -= 2;
        } else if tag_content.ends_with(b">") {
            attr_end -= 1;
        }

        if attr_start >= attr_end {
            return Some(Vec::new());
        }

        match parse_attributes(&tag_content[attr_start..attr_end]) {
            Ok(attrs) => Some(attrs),
            Err(msg) => {
                self.attr_error = Some(ParseError::new(msg, start));
                None
            }
        }
    }
}

impl<'a> Iterator for SliceReader<'a> {
    type Item = XmlEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_event()? {
            XmlEvent::EndDocument => None,
            event => Some(event),
        }
    }
}
