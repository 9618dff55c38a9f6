//! Request execution: one HTTP exchange per call, in four result shapes.

use super::core::RestClient;
use crate::cache::{CachedValue, RequestIdentity, ResultFormat};
use crate::request::{Method, Params};
use crate::transport::{read_to_string, DecodingReader, HttpCall, ResponseBody, TransportError};
use crate::utils::format_duration;
use crate::xml::XmlDocument;
use crate::Result;
use std::time::Instant;
use tracing::{debug, info, trace};

impl RestClient {
    /// GET, returning the decoded response text. Cached when a cache is set.
    pub fn get(&self, params: &Params) -> Result<String> {
        self.fetch_text(Method::Get, params)
    }

    /// POST, returning the decoded response text. Cached when a cache is set.
    pub fn post(&self, params: &Params) -> Result<String> {
        self.fetch_text(Method::Post, params)
    }

    /// GET, returning the raw response bytes. Never cached.
    pub fn get_as_stream(&self, params: &Params) -> Result<ResponseBody> {
        self.open(Method::Get, params)
    }

    /// POST, returning the raw response bytes. Never cached.
    pub fn post_as_stream(&self, params: &Params) -> Result<ResponseBody> {
        self.open(Method::Post, params)
    }

    /// GET, returning a reader that yields the response as UTF-8. Never cached.
    pub fn get_as_reader(&self, params: &Params) -> Result<DecodingReader<ResponseBody>> {
        self.open_reader(Method::Get, params)
    }

    /// POST, returning a reader that yields the response as UTF-8. Never cached.
    pub fn post_as_reader(&self, params: &Params) -> Result<DecodingReader<ResponseBody>> {
        self.open_reader(Method::Post, params)
    }

    /// GET, parsing the response as XML. The document and its text are both cached.
    pub fn get_as_xml(&self, params: &Params) -> Result<XmlDocument> {
        self.fetch_document(Method::Get, params)
    }

    /// POST, parsing the response as XML. The document and its text are both cached.
    pub fn post_as_xml(&self, params: &Params) -> Result<XmlDocument> {
        self.fetch_document(Method::Post, params)
    }

    fn fetch_text(&self, method: Method, params: &Params) -> Result<String> {
        let key = self.identity(ResultFormat::Text, method, params);
        if let Some(key) = &key {
            if let Some(CachedValue::Text(text)) = self.cached(key) {
                trace!(%key, "cache hit");
                return Ok(text);
            }
        }

        let started = Instant::now();
        let body = self.open(method, params)?;
        let text = read_to_string(body, self.encoding).map_err(|source| TransportError::Read {
            url: self.url_prefix().to_string(),
            source,
        })?;
        debug!(
            elapsed = %format_duration(started.elapsed()),
            bytes = text.len(),
            "Web service call finished"
        );

        if let Some(key) = key {
            self.put_cached(key, CachedValue::Text(text.clone()));
        }
        Ok(text)
    }

    fn fetch_document(&self, method: Method, params: &Params) -> Result<XmlDocument> {
        let key = self.identity(ResultFormat::Document, method, params);
        if let Some(key) = &key {
            if let Some(CachedValue::Document(doc)) = self.cached(key) {
                trace!(%key, "cache hit");
                return Ok(doc);
            }
        }

        let doc = XmlDocument::parse(&self.fetch_text(method, params)?)?;
        if let Some(key) = key {
            self.put_cached(key, CachedValue::Document(doc.clone()));
        }
        Ok(doc)
    }

    fn open_reader(&self, method: Method, params: &Params) -> Result<DecodingReader<ResponseBody>> {
        let body = self.open(method, params)?;
        Ok(if self.buffer_size > 0 {
            DecodingReader::with_capacity(self.buffer_size, body, self.encoding)
        } else {
            DecodingReader::new(body, self.encoding)
        })
    }

    /// Key for `params` under this client's cache, `None` when not caching.
    fn identity(
        &self,
        format: ResultFormat,
        method: Method,
        params: &Params,
    ) -> Option<RequestIdentity> {
        self.cache
            .as_ref()
            .map(|_| RequestIdentity::new(Some(format), method, params.clone()))
    }

    fn open(&self, method: Method, params: &Params) -> Result<ResponseBody> {
        let url = self.url_builder.request_url(method, params)?;
        let body = if method.is_post() {
            let body = self.url_builder.post_body(params)?;
            debug!(body = %body, "POST body");
            Some(body.into_bytes())
        } else {
            None
        };
        info!(method = method.as_str(), url = %url, "Calling web service");

        self.transport.execute(HttpCall {
            method,
            url: &url,
            headers: &self.headers,
            body,
            timeout: self.timeout(),
            parse_error_stream: self.parse_error_stream,
            buffer_size: self.buffer_size,
        })
    }
}
