//! Blocking REST web-service client.
//!
//! Construction lives in [`builder`], configuration loading in [`config`],
//! client state in `core` and the request paths in `execution`.

pub mod builder;
pub mod config;
mod core;
mod execution;
pub mod headers;

pub use builder::RestClientBuilder;
pub use config::ClientConfig;
pub use core::RestClient;
pub use headers::{encode_credentials_basic, HTML_HEADERS, TEXT_HEADERS, XML_HEADERS};
