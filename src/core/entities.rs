//! Entity decoding for SVG text and attribute values
//!
//! Handles the five predefined XML entities and numeric character
//! references. Uses Cow so values without '&' are never copied.

use memchr::memchr;
use std::borrow::Cow;

/// Decode entity references in `input`
///
/// Unknown or unterminated references are kept verbatim: floor plans
/// exported by design tools occasionally carry stray ampersands in labels.
#[inline]
pub fn decode_text(input: &[u8]) -> Cow<'_, [u8]> {
    if memchr(b'&', input).is_none() {
        return Cow::Borrowed(input);
    }
    Cow::Owned(decode_entities(input))
}

fn decode_entities(input: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut rest = input;

    while let Some(amp) = memchr(b'&', rest) {
        out.extend_from_slice(&rest[..amp]);
        rest = &rest[amp..];

        let decoded = memchr(b';', rest).and_then(|semi| {
            resolve_reference(&rest[1..semi]).map(|ch| (ch, semi + 1))
        });

        match decoded {
            Some((ch, consumed)) => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
                rest = &rest[consumed..];
            }
            None => {
                out.push(b'&');
                rest = &rest[1..];
            }
        }
    }
    out.extend_from_slice(rest);
    out
}

/// Resolve the body of a reference (between '&' and ';')
fn resolve_reference(body: &[u8]) -> Option<char> {
    match body {
        b"lt" => Some('<'),
        b"gt" => Some('>'),
        b"amp" => Some('&'),
        b"quot" => Some('"'),
        b"apos" => Some('\''),
        [b'#', b'x' | b'X', hex @ ..] => parse_codepoint(hex, 16),
        [b'#', dec @ ..] => parse_codepoint(dec, 10),
        _ => None,
    }
}

fn parse_codepoint(digits: &[u8], radix: u32) -> Option<char> {
    if digits.is_empty() {
        return None;
    }
    let digits = std::str::from_utf8(digits).ok()?;
    let codepoint = u32::from_str_radix(digits, radix).ok()?;
    char::from_u32(codepoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_entities_is_borrowed() {
        let result = decode_text(b"Tribune Nord");
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result.as_ref(), b"Tribune Nord");
    }

    #[test]
    fn test_predefined_entities() {
        let result = decode_text(b"Bloc &lt;A&gt; &amp; &quot;B&quot; &apos;C&apos;");
        assert_eq!(result.as_ref(), b"Bloc <A> & \"B\" 'C'");
    }

    #[test]
    fn test_numeric_references() {
        assert_eq!(decode_text(b"&#65;&#x42;&#X43;").as_ref(), b"ABC");
        assert_eq!(
            std::str::from_utf8(decode_text(b"Loge &#xE9;t&#233;").as_ref()).unwrap(),
            "Loge \u{e9}t\u{e9}"
        );
    }

    #[test]
    fn test_unknown_and_unterminated_kept() {
        assert_eq!(decode_text(b"&nbsp;").as_ref(), b"&nbsp;");
        assert_eq!(decode_text(b"R&D").as_ref(), b"R&D");
        assert_eq!(decode_text(b"&#;").as_ref(), b"&#;");
    }
}
