//! Attribute parsing for start tags
//!
//! Parses the raw bytes between an element name and its closing '>' or
//! '/>' into name/value pairs with entities decoded.

use super::entities::decode_text;
use super::scanner::{is_name_char, is_name_start_char, is_whitespace};
use std::borrow::Cow;
use std::collections::HashSet;

/// Above this many attributes duplicate detection switches to a hash set
const LINEAR_DUPLICATE_SCAN: usize = 16;

/// A parsed attribute
#[derive(Debug, Clone)]
pub struct Attribute<'a> {
    /// Attribute name (may include namespace prefix)
    pub name: Cow<'a, [u8]>,
    /// Attribute value (entities decoded)
    pub value: Cow<'a, [u8]>,
}

impl<'a> Attribute<'a> {
    pub fn new(name: &'a [u8], value: Cow<'a, [u8]>) -> Self {
        Attribute {
            name: Cow::Borrowed(name),
            value,
        }
    }

    pub fn name_str(&self) -> Option<&str> {
        std::str::from_utf8(self.name.as_ref()).ok()
    }

    pub fn value_str(&self) -> Option<&str> {
        std::str::from_utf8(self.value.as_ref()).ok()
    }
}

/// Parse attributes from raw tag content (after the element name)
///
/// Returns `Err` with a message when a value is opened with a quote and
/// never closed, or when an attribute name is repeated. Everything else
/// (bare names, unquoted values) is accepted leniently.
pub fn parse_attributes(input: &[u8]) -> Result<Vec<Attribute<'_>>, &'static str> {
    let mut attrs: Vec<Attribute<'_>> = Vec::new();
    let mut seen: HashSet<&[u8]> = HashSet::new();
    let mut pos = 0;

    loop {
        while pos < input.len() && is_whitespace(input[pos]) {
            pos += 1;
        }
        if pos >= input.len() {
            break;
        }

        if !is_name_start_char(input[pos]) {
            pos += 1;
            continue;
        }

        let name_start = pos;
        while pos < input.len() && is_name_char(input[pos]) {
            pos += 1;
        }
        let name = &input[name_start..pos];

        let duplicate = if attrs.len() < LINEAR_DUPLICATE_SCAN {
            attrs.iter().any(|a| a.name.as_ref() == name)
        } else {
            if seen.is_empty() {
                // Names borrow from `input`, so the set outlives pushes to `attrs`
                seen.extend(attrs.iter().filter_map(|a| match &a.name {
                    Cow::Borrowed(n) => Some(*n),
                    Cow::Owned(_) => None,
                }));
            }
            !seen.insert(name)
        };
        if duplicate {
            return Err("Duplicate attribute");
        }

        while pos < input.len() && is_whitespace(input[pos]) {
            pos += 1;
        }

        if pos >= input.len() || input[pos] != b'=' {
            // Bare attribute without a value
            attrs.push(Attribute::new(name, Cow::Borrowed(b"")));
            continue;
        }
        pos += 1;

        while pos < input.len() && is_whitespace(input[pos]) {
            pos += 1;
        }
        if pos >= input.len() {
            attrs.push(Attribute::new(name, Cow::Borrowed(b"")));
            break;
        }

        let quote = input[pos];
        if quote != b'"' && quote != b'\'' {
            let value_start = pos;
            while pos < input.len() && !is_whitespace(input[pos]) {
                pos += 1;
            }
            attrs.push(Attribute::new(name, decode_text(&input[value_start..pos])));
            continue;
        }

        pos += 1;
        let value_start = pos;
        match memchr::memchr(quote, &input[pos..]) {
            Some(offset) => {
                pos += offset;
                attrs.push(Attribute::new(name, decode_text(&input[value_start..pos])));
                pos += 1;
            }
            None => return Err("Attribute value has mismatched quotes"),
        }
    }

    Ok(attrs)
}
