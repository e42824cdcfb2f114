//! Error taxonomy
//!
//! Every failure is surfaced to the caller of the operation that caused
//! it (construction, `load`, or a style/query call). Nothing here is
//! retried automatically.

use thiserror::Error;

use crate::core::ParseError;
use crate::loader::HttpError;

/// Errors raised by the venue top view engine
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A required construction input is missing or inconsistent
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Fetching the document or the category list failed
    #[error("transport error: {0}")]
    Transport(#[from] HttpError),

    /// The document transfer succeeded but carried no content
    #[error("document at {url} is empty")]
    EmptyPayload { url: String },

    /// The document payload is not well-formed markup
    #[error("document parse error: {0}")]
    Parse(#[from] ParseError),

    /// The mount selector resolved to nothing
    #[error("container not found for selector {selector:?}")]
    ContainerNotFound { selector: String },

    /// A style or query call named an area that is not indexed
    #[error("could not find area with id {area_id:?}")]
    AreaNotFound { area_id: String },
}

impl Error {
    pub(crate) fn area_not_found(area_id: &str) -> Self {
        Error::AreaNotFound {
            area_id: area_id.to_string(),
        }
    }

    /// Short error code for logging
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Configuration(_) => "E_CONFIG",
            Error::Transport(_) => "E_TRANSPORT",
            Error::EmptyPayload { .. } => "E_EMPTY_PAYLOAD",
            Error::Parse(_) => "E_PARSE",
            Error::ContainerNotFound { .. } => "E_CONTAINER",
            Error::AreaNotFound { .. } => "E_AREA_NOT_FOUND",
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
