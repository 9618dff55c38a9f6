//! Request construction: typed parameter lists and URL / form-body building.
//!
//! A call is described by a [`Method`] and an ordered [`Params`] list. The
//! [`UrlBuilder`] turns that description into the request URL and, for POST,
//! the `application/x-www-form-urlencoded` body. Parameter order is preserved
//! everywhere; nothing is sorted or deduplicated.

mod builder;
mod params;

pub use builder::UrlBuilder;
pub use params::{Param, Params};

use serde::{Deserialize, Serialize};
use std::fmt;

/// HTTP method of a web-service call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }

    pub fn is_post(&self) -> bool {
        matches!(self, Method::Post)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
