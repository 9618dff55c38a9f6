//! Request identity used as the cache key.

use crate::request::{Method, Params};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shape of the result a call produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultFormat {
    Text,
    Document,
}

impl ResultFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultFormat::Text => "text",
            ResultFormat::Document => "document",
        }
    }
}

/// Value identity of one logical web-service call.
///
/// Equal iff result format, method and the full ordered parameter list are
/// equal. Parameters are not sorted, so order changes identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestIdentity {
    result_format: Option<ResultFormat>,
    method: Method,
    params: Params,
}

impl RequestIdentity {
    pub fn new(result_format: Option<ResultFormat>, method: Method, params: Params) -> Self {
        Self {
            result_format,
            method,
            params,
        }
    }

    pub fn result_format(&self) -> Option<ResultFormat> {
        self.result_format
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn params(&self) -> &Params {
        &self.params
    }
}

impl fmt::Display for RequestIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [",
            self.result_format.map_or("-", |r| r.as_str()),
            self.method
        )?;
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", p.name(), p.value().unwrap_or(""))?;
        }
        f.write_str("]")
    }
}
