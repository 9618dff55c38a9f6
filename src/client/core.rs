use super::builder::RestClientBuilder;
use super::config::lookup_charset;
use super::headers::{self, encode_credentials_basic, AUTHORIZATION};
use crate::cache::{CacheBackend, CachedValue, RequestIdentity};
use crate::request::UrlBuilder;
use crate::transport::HttpTransport;
use crate::Result;
use encoding_rs::Encoding;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Blocking client for one REST web service.
///
/// Holds the immutable URL prefix plus connection settings, and exposes
/// GET/POST in four result shapes (see the `get*`/`post*` methods). Text and
/// XML results go through the optional cache; streams never do.
#[derive(Clone)]
pub struct RestClient {
    pub(crate) url_to_port: String,
    pub(crate) url_builder: UrlBuilder,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) cache: Option<Arc<dyn CacheBackend>>,
    pub(crate) timeout_ms: u64,
    pub(crate) buffer_size: usize,
    pub(crate) encoding: &'static Encoding,
    pub(crate) parse_error_stream: bool,
    pub(crate) transport: HttpTransport,
}

impl RestClient {
    pub fn builder() -> RestClientBuilder {
        RestClientBuilder::new()
    }

    /// Client with default settings. `port` 0 leaves the port out of the URL.
    pub fn new(protocol: &str, host: &str, port: u16, service_path: &str) -> Result<Self> {
        RestClientBuilder::new()
            .protocol(protocol)
            .host(host)
            .port(port)
            .service_path(service_path)
            .build()
    }

    /// URL of the service up to and including the service path.
    pub fn url_prefix(&self) -> &str {
        self.url_builder.url_prefix()
    }

    /// URL of the service up to the port, without the service path.
    pub fn url_to_port(&self) -> &str {
        &self.url_to_port
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Read timeout for calls, `None` meaning block indefinitely.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }

    pub fn set_timeout_ms(&mut self, timeout_ms: u64) {
        self.timeout_ms = timeout_ms;
    }

    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    pub fn set_buffer_size(&mut self, size: usize) {
        self.buffer_size = size;
    }

    /// Canonical name of the response/parameter charset.
    pub fn charset(&self) -> &'static str {
        self.encoding.name()
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Fails with `InvalidConfiguration` for unknown labels; the old charset is kept.
    pub fn set_charset(&mut self, label: &str) -> Result<()> {
        let encoding = lookup_charset(label)?;
        self.set_encoding(encoding);
        Ok(())
    }

    pub fn set_encoding(&mut self, encoding: &'static Encoding) {
        self.encoding = encoding;
        self.url_builder.set_encoding(encoding);
    }

    pub fn postable_params(&self) -> Option<&HashSet<String>> {
        self.url_builder.postable()
    }

    pub fn set_postable_params<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.url_builder
            .set_postable(Some(names.into_iter().map(Into::into).collect()));
    }

    /// POST sends every parameter in the body again.
    pub fn clear_postable_params(&mut self) {
        self.url_builder.set_postable(None);
    }

    pub fn parse_error_stream(&self) -> bool {
        self.parse_error_stream
    }

    pub fn set_parse_error_stream(&mut self, enable: bool) {
        self.parse_error_stream = enable;
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name.into(), value.into());
    }

    pub fn remove_header(&mut self, name: &str) {
        headers::remove_header(&mut self.headers, name);
    }

    pub fn set_credentials(&mut self, user_name: &str, password: &str) {
        self.remove_header(AUTHORIZATION);
        self.headers.insert(
            AUTHORIZATION.to_string(),
            encode_credentials_basic(user_name, password),
        );
    }

    pub fn clear_credentials(&mut self) {
        self.remove_header(AUTHORIZATION);
    }

    pub fn is_caching(&self) -> bool {
        self.cache.is_some()
    }

    pub fn cache(&self) -> Option<&Arc<dyn CacheBackend>> {
        self.cache.as_ref()
    }

    /// `None` disables caching.
    pub fn set_cache(&mut self, cache: Option<Arc<dyn CacheBackend>>) {
        self.cache = cache;
    }

    /// Empty the cache; no-op when not caching.
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }

    pub fn cached(&self, key: &RequestIdentity) -> Option<CachedValue> {
        self.cache.as_ref()?.get(key)
    }

    pub fn put_cached(&self, key: RequestIdentity, value: CachedValue) -> Option<CachedValue> {
        self.cache.as_ref()?.put(key, value)
    }

    pub fn remove_cached(&self, key: &RequestIdentity) -> Option<CachedValue> {
        self.cache.as_ref()?.remove(key)
    }
}

impl fmt::Display for RestClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "REST Web Service at {}", self.url_prefix())
    }
}

impl fmt::Debug for RestClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestClient")
            .field("url_prefix", &self.url_prefix())
            .field("timeout_ms", &self.timeout_ms)
            .field("buffer_size", &self.buffer_size)
            .field("charset", &self.charset())
            .field("postable_params", &self.postable_params())
            .field("parse_error_stream", &self.parse_error_stream)
            .field("cache", &self.cache.as_ref().map(|c| c.name()))
            .finish_non_exhaustive()
    }
}
