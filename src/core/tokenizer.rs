//! Markup tokenizer - state machine for SVG token extraction
//!
//! Pull-parser style tokenizer producing:
//! - Element start/end/empty tags
//! - Text content (entities decoded)
//! - CDATA sections, comments, processing instructions
//! - XML declaration and DOCTYPE (passed through, never interpreted)
//!
//! The tokenizer stops at the first malformed construct and records a
//! [`ParseError`]; callers check [`Tokenizer::error`] once `next_token`
//! returns `None`.

use super::scanner::{is_whitespace, Scanner};
use std::borrow::Cow;
use std::fmt;

/// Current parsing state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    Init,
    InsideText,
    InsideMarkup,
    Done,
}

/// Type of markup token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Element start tag: <element>
    StartTag,
    /// Element end tag: </element>
    EndTag,
    /// Empty element: <element/>
    EmptyTag,
    Text,
    /// CDATA section: <![CDATA[...]]>
    CData,
    /// Comment: <!--...-->
    Comment,
    /// Processing instruction: <?target ...?>
    ProcessingInstruction,
    /// XML declaration: <?xml ...?>
    XmlDeclaration,
    DocType,
    Eof,
}

/// A parsed token
#[derive(Debug, Clone)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// Raw span in input (start, end)
    pub span: (usize, usize),
    /// For tags and PIs: the name
    pub name: Option<&'a [u8]>,
    /// For text/cdata/comments: the content
    pub content: Option<Cow<'a, [u8]>>,
}

impl<'a> Token<'a> {
    fn new(kind: TokenKind, span: (usize, usize)) -> Self {
        Token {
            kind,
            span,
            name: None,
            content: None,
        }
    }

    fn with_name(mut self, name: &'a [u8]) -> Self {
        self.name = Some(name);
        self
    }

    fn with_content(mut self, content: Cow<'a, [u8]>) -> Self {
        self.content = Some(content);
        self
    }
}

/// Malformed markup, with the byte offset where it was detected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub position: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        ParseError {
            message: message.into(),
            position,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at byte {}", self.message, self.position)
    }
}

impl std::error::Error for ParseError {}

/// Markup tokenizer implementing a pull-parser pattern
pub struct Tokenizer<'a> {
    scanner: Scanner<'a>,
    state: ParseState,
    error: Option<ParseError>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Tokenizer {
            scanner: Scanner::new(input),
            state: ParseState::Init,
            error: None,
        }
    }

    /// Get the error that stopped tokenization, if any
    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    pub fn position(&self) -> usize {
        self.scanner.position()
    }

    fn fail(&mut self, message: impl Into<String>, position: usize) -> Option<Token<'a>> {
        if self.error.is_none() {
            self.error = Some(ParseError::new(message, position));
        }
        self.state = ParseState::Done;
        None
    }

    /// Get the next token, or None at end of input or on error
    pub fn next_token(&mut self) -> Option<Token<'a>> {
        if self.state == ParseState::Done {
            return None;
        }

        if self.state == ParseState::Init {
            // UTF-8 byte order mark emitted by some exporters
            if self.scanner.starts_with(b"\xEF\xBB\xBF") {
                self.scanner.advance(3);
            }
            self.scanner.skip_whitespace();
            self.state = ParseState::InsideText;
        }

        if self.scanner.is_eof() {
            self.state = ParseState::Done;
            let pos = self.scanner.position();
            return Some(Token::new(TokenKind::Eof, (pos, pos)));
        }

        match self.scanner.peek() {
            Some(b'<') => self.parse_markup(),
            _ => self.parse_text(),
        }
    }

    fn parse_markup(&mut self) -> Option<Token<'a>> {
        let start = self.scanner.position();
        self.scanner.advance(1); // Skip '<'
        self.state = ParseState::InsideMarkup;

        match self.scanner.peek() {
            Some(b'/') => self.parse_end_tag(start),
            Some(b'!') => self.parse_bang_markup(start),
            Some(b'?') => self.parse_pi(start),
            Some(_) => self.parse_start_tag(start),
            None => self.fail("Unexpected end of input after '<'", start),
        }
    }

    fn parse_start_tag(&mut self, start: usize) -> Option<Token<'a>> {
        let name = match self.scanner.read_name() {
            Some(name) => name,
            None => return self.fail("Invalid element name", start),
        };

        let end = match self.scanner.find_tag_end_quoted() {
            Some(end) => end,
            None => return self.fail("Unterminated start tag", start),
        };

        let is_empty = self.scanner.slice(start, end).ends_with(b"/");

        self.scanner.set_position(end + 1);
        self.state = ParseState::InsideText;

        let kind = if is_empty { TokenKind::EmptyTag } else { TokenKind::StartTag };
        Some(Token::new(kind, (start, end + 1)).with_name(name))
    }

    fn parse_end_tag(&mut self, start: usize) -> Option<Token<'a>> {
        self.scanner.advance(1); // Skip '/'

        let name = match self.scanner.read_name() {
            Some(name) => name,
            None => return self.fail("Invalid element name in end tag", start),
        };

        self.scanner.skip_whitespace();
        if self.scanner.peek() != Some(b'>') {
            return self.fail("Malformed end tag", start);
        }
        self.scanner.advance(1);
        self.state = ParseState::InsideText;

        Some(Token::new(TokenKind::EndTag, (start, self.scanner.position())).with_name(name))
    }

    /// Comment, CDATA or DOCTYPE
    fn parse_bang_markup(&mut self, start: usize) -> Option<Token<'a>> {
        self.scanner.advance(1); // Skip '!'

        if self.scanner.starts_with(b"--") {
            self.scanner.advance(2);
            self.parse_delimited(start, b"-->", TokenKind::Comment, "Unterminated comment")
        } else if self.scanner.starts_with(b"[CDATA[") {
            self.scanner.advance(7);
            self.parse_delimited(start, b"]]>", TokenKind::CData, "Unterminated CDATA section")
        } else if self.scanner.starts_with(b"DOCTYPE") {
            self.parse_doctype(start)
        } else {
            self.fail("Invalid declaration - expected comment, CDATA, or DOCTYPE", start)
        }
    }

    fn parse_delimited(
        &mut self,
        start: usize,
        terminator: &[u8],
        kind: TokenKind,
        unterminated: &'static str,
    ) -> Option<Token<'a>> {
        let content_start = self.scanner.position();
        let end = match self.scanner.find_sequence(terminator) {
            Some(end) => end,
            None => return self.fail(unterminated, start),
        };

        let content = self.scanner.slice(content_start, end);
        self.scanner.set_position(end + terminator.len());
        self.state = ParseState::InsideText;

        Some(Token::new(kind, (start, self.scanner.position())).with_content(Cow::Borrowed(content)))
    }

    /// DOCTYPE with an optional bracketed internal subset
    fn parse_doctype(&mut self, start: usize) -> Option<Token<'a>> {
        let mut depth = 0usize;
        let mut pos = self.scanner.position();
        let input = self.scanner.slice(0, pos + self.scanner.remaining().len());

        while pos < input.len() {
            match input[pos] {
                b'[' => depth += 1,
                b']' => depth = depth.saturating_sub(1),
                b'>' if depth == 0 => {
                    self.scanner.set_position(pos + 1);
                    self.state = ParseState::InsideText;
                    return Some(Token::new(TokenKind::DocType, (start, pos + 1)));
                }
                _ => {}
            }
            pos += 1;
        }
        self.fail("Unterminated DOCTYPE", start)
    }

    fn parse_pi(&mut self, start: usize) -> Option<Token<'a>> {
        self.scanner.advance(1); // Skip '?'

        let name = match self.scanner.read_name() {
            Some(n) => n,
            None => return self.fail("Invalid processing instruction target", start),
        };

        let end = match self.scanner.find_sequence(b"?>") {
            Some(end) => end,
            None => return self.fail("Unterminated processing instruction", start),
        };

        let content = self.scanner.slice(self.scanner.position(), end);
        self.scanner.set_position(end + 2);
        self.state = ParseState::InsideText;

        let kind = if name == b"xml" {
            TokenKind::XmlDeclaration
        } else {
            TokenKind::ProcessingInstruction
        };
        Some(
            Token::new(kind, (start, self.scanner.position()))
                .with_name(name)
                .with_content(Cow::Borrowed(content)),
        )
    }

    fn parse_text(&mut self) -> Option<Token<'a>> {
        let start = self.scanner.position();
        self.state = ParseState::InsideText;

        let end = self
            .scanner
            .find_tag_start()
            .unwrap_or(start + self.scanner.remaining().len());

        let content = self.scanner.slice(start, end);
        self.scanner.set_position(end);

        let decoded = super::entities::decode_text(content);
        Some(Token::new(TokenKind::Text, (start, end)).with_content(decoded))
    }
}

/// Iterator adapter for tokenizer
impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token()?;
        if token.kind == TokenKind::Eof {
            None
        } else {
            Some(token)
        }
    }
}

/// Whether text content consists only of markup whitespace
#[inline]
pub fn is_blank(content: &[u8]) -> bool {
    content.iter().all(|&b| is_whitespace(b))
}
