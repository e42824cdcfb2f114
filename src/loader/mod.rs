//! Document Loader
//!
//! Fetches the floor plan and category data through an injectable
//! [`HttpClient`]:
//! - `transport`: client trait, response and transport errors
//! - `fetch`: document/category fetch with empty-payload and parse checks
//! - `mock`: recording client with canned responses
//! - `reqwest_http`: production client (feature `http`)

pub mod fetch;
pub mod mock;
#[cfg(feature = "http")]
pub mod reqwest_http;
pub mod transport;

pub use fetch::{fetch_categories, fetch_document};
pub use mock::{MockHttpClient, MockResponse};
#[cfg(feature = "http")]
pub use reqwest_http::ReqwestHttpClient;
pub use transport::{Headers, HttpClient, HttpError, Response};
