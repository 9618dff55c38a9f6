//! Client configuration loaded from YAML and the environment.

use crate::error::{Error, ErrorContext};
use crate::Result;
use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_TIMEOUT_MS: u64 = 0;
pub const DEFAULT_BUFFER_SIZE: usize = 32 * 1024;
pub const DEFAULT_CHARSET: &str = "utf-8";

pub const ENV_TIMEOUT_MS: &str = "RESTFUL_WS_TIMEOUT_MS";
pub const ENV_BUFFER_SIZE: &str = "RESTFUL_WS_BUFFER_SIZE";
pub const ENV_CHARSET: &str = "RESTFUL_WS_CHARSET";

/// Serializable description of a client.
///
/// ```yaml
/// protocol: https
/// host: ws.example.org
/// port: 8443
/// service_path: /webservices/concept/find
/// timeout_ms: 5000
/// postable_params: [query]
/// headers:
///   accept: application/xml
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub protocol: String,
    pub host: String,
    /// Absent or 0 leaves the port out of the URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    pub service_path: String,
    /// Absent means the XML-accepting preset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<HashMap<String, String>>,
    /// 0 blocks indefinitely.
    pub timeout_ms: u64,
    pub buffer_size: usize,
    /// Any WHATWG encoding label.
    pub charset: String,
    /// Absent means POST sends every parameter in the body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postable_params: Option<Vec<String>>,
    pub parse_error_stream: bool,
    pub accept_invalid_certs: bool,
    /// PEM files with extra trusted root certificates.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub root_certificate_files: Vec<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            protocol: "http".to_string(),
            host: String::new(),
            port: None,
            service_path: String::new(),
            headers: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            buffer_size: DEFAULT_BUFFER_SIZE,
            charset: DEFAULT_CHARSET.to_string(),
            postable_params: None,
            parse_error_stream: true,
            accept_invalid_certs: false,
            root_certificate_files: Vec::new(),
        }
    }
}

impl ClientConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| {
            Error::invalid_configuration_with_context(
                "cannot parse client configuration",
                ErrorContext::new()
                    .with_details(e.to_string())
                    .with_source("config_loader"),
            )
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::invalid_configuration_with_context(
                "cannot read client configuration",
                ErrorContext::new()
                    .with_field_path(path.display().to_string())
                    .with_details(e.to_string())
                    .with_source("config_loader"),
            )
        })?;
        Self::from_yaml_str(&text)
    }

    /// Override timeout, buffer size and charset from the process environment.
    pub fn apply_env(self) -> Result<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    pub(crate) fn apply_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        if let Some(v) = lookup(ENV_TIMEOUT_MS) {
            self.timeout_ms = parse_env(ENV_TIMEOUT_MS, &v)?;
        }
        if let Some(v) = lookup(ENV_BUFFER_SIZE) {
            self.buffer_size = parse_env(ENV_BUFFER_SIZE, &v)?;
        }
        if let Some(v) = lookup(ENV_CHARSET) {
            lookup_charset(&v)?;
            self.charset = v;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        validate_protocol(&self.protocol)?;
        validate_host(&self.host)?;
        lookup_charset(&self.charset)?;
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse::<T>().map_err(|e| {
        Error::invalid_configuration_with_context(
            format!("invalid value for {}", key),
            ErrorContext::new()
                .with_field_path(key)
                .with_details(format!("'{}': {}", value, e))
                .with_source("config_env"),
        )
    })
}

pub(crate) fn validate_protocol(protocol: &str) -> Result<()> {
    if protocol == "http" || protocol == "https" {
        Ok(())
    } else {
        Err(Error::invalid_configuration_with_context(
            "only 'http' and 'https' are supported",
            ErrorContext::new()
                .with_field_path("protocol")
                .with_details(format!("got '{}'", protocol)),
        ))
    }
}

pub(crate) fn validate_host(host: &str) -> Result<()> {
    if host.is_empty() {
        Err(Error::invalid_configuration_with_context(
            "host must not be empty",
            ErrorContext::new().with_field_path("host"),
        ))
    } else {
        Ok(())
    }
}

pub(crate) fn lookup_charset(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| {
        Error::invalid_configuration_with_context(
            "unknown charset",
            ErrorContext::new()
                .with_field_path("charset")
                .with_details(format!("got '{}'", label)),
        )
    })
}
