//! # restful-ws-client
//!
//! Blocking client for RESTful web services that take their input as
//! name/value parameters and answer with text or XML.
//!
//! ## Overview
//!
//! A [`RestClient`] is bound to one service URL prefix. Each call turns an
//! ordered [`Params`] list into a GET query string or a POST form body
//! (optionally splitting POST parameters between URL and body), performs a
//! single HTTP exchange, and hands back the result as:
//!
//! - decoded text ([`RestClient::get`], [`RestClient::post`])
//! - a raw byte stream ([`RestClient::get_as_stream`])
//! - a UTF-8 reader ([`RestClient::get_as_reader`])
//! - a parsed XML document ([`RestClient::get_as_xml`])
//!
//! Text and XML results can be memoized in an externally supplied
//! [`cache::CacheBackend`], keyed by [`RequestIdentity`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use restful_ws_client::{params, RestClient};
//!
//! fn main() -> restful_ws_client::Result<()> {
//!     let client = RestClient::builder()
//!         .protocol("http")
//!         .host("ws.example.org")
//!         .service_path("/webservices/concept/find")
//!         .timeout_ms(5_000)
//!         .build()?;
//!
//!     let doc = client.get_as_xml(&params! { "str" => "dog", "maxResults" => 100 })?;
//!     println!("{}", doc.root().name);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`Result<T>`] with the unified [`Error`]
//! type. Configuration problems surface when the client is built or a
//! setter is called; request problems surface from the call that caused
//! them. Nothing is retried.

pub mod cache;
pub mod client;
pub mod error;
pub mod request;
pub mod transport;
pub mod utils;
pub mod xml;

pub use crate::cache::{CacheBackend, CachedValue, RequestIdentity, ResultFormat};
pub use crate::client::{
    encode_credentials_basic, ClientConfig, RestClient, RestClientBuilder, HTML_HEADERS,
    TEXT_HEADERS, XML_HEADERS,
};
pub use crate::error::{Error, ErrorContext};
pub use crate::request::{Method, Param, Params};
pub use crate::utils::format_duration;
pub use crate::xml::XmlDocument;

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
