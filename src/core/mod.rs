//! Core markup parsing primitives
//!
//! - Scanner: SIMD-accelerated delimiter detection using memchr
//! - Tokenizer: state machine for markup token extraction
//! - Entities: entity decoding with Cow (zero-copy when possible)
//! - Attributes: attribute parsing for start tags

pub mod attributes;
pub mod entities;
pub mod scanner;
pub mod tokenizer;

pub use tokenizer::ParseError;
