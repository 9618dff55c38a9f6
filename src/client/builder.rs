use super::config::{
    lookup_charset, validate_host, validate_protocol, ClientConfig, DEFAULT_BUFFER_SIZE,
    DEFAULT_CHARSET, DEFAULT_TIMEOUT_MS,
};
use super::core::RestClient;
use super::headers::{self, encode_credentials_basic, AUTHORIZATION};
use crate::cache::CacheBackend;
use crate::error::{Error, ErrorContext};
use crate::request::UrlBuilder;
use crate::transport::{HttpTransport, TlsOptions};
use crate::Result;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Builder for [`RestClient`].
///
/// Either give the URL pieces (`protocol`, `host`, `port`, `service_path`)
/// or a whole `base_url`; the latter wins when both are set. Everything is
/// validated in [`build`](Self::build).
pub struct RestClientBuilder {
    protocol: String,
    host: String,
    port: Option<u16>,
    service_path: String,
    base_url: Option<String>,
    headers: HashMap<String, String>,
    cache: Option<Arc<dyn CacheBackend>>,
    timeout_ms: u64,
    buffer_size: usize,
    charset: String,
    postable: Option<HashSet<String>>,
    parse_error_stream: bool,
    tls: TlsOptions,
}

impl RestClientBuilder {
    pub fn new() -> Self {
        Self {
            protocol: "http".to_string(),
            host: String::new(),
            port: None,
            service_path: String::new(),
            base_url: None,
            headers: headers::XML_HEADERS.clone(),
            cache: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            buffer_size: DEFAULT_BUFFER_SIZE,
            charset: DEFAULT_CHARSET.to_string(),
            postable: None,
            parse_error_stream: true,
            tls: TlsOptions::default(),
        }
    }

    /// Start from a loaded configuration. Root certificate files are read here.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let mut builder = Self::new()
            .protocol(&config.protocol)
            .host(&config.host)
            .service_path(&config.service_path)
            .timeout_ms(config.timeout_ms)
            .buffer_size(config.buffer_size)
            .charset(&config.charset)
            .parse_error_stream(config.parse_error_stream)
            .accept_invalid_certs(config.accept_invalid_certs);
        builder.port = config.port;
        if let Some(headers) = &config.headers {
            builder = builder.headers(headers.clone());
        }
        if let Some(names) = &config.postable_params {
            builder = builder.postable_params(names.iter().cloned());
        }
        for path in &config.root_certificate_files {
            let pem = std::fs::read(path).map_err(|e| {
                Error::invalid_configuration_with_context(
                    "cannot read root certificate",
                    ErrorContext::new()
                        .with_field_path(path.display().to_string())
                        .with_details(e.to_string())
                        .with_source("client_builder"),
                )
            })?;
            builder = builder.root_certificate_pem(pem);
        }
        Ok(builder)
    }

    /// `http` or `https`.
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocol = protocol.into();
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Port 0 leaves the port out of the URL, as does never calling this.
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Path of the service, optionally with static query parameters.
    pub fn service_path(mut self, path: impl Into<String>) -> Self {
        self.service_path = path.into();
        self
    }

    /// Whole base URL, e.g. `https://ws.example.org:8443/find?format=xml`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Replace the default header set.
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn credentials(mut self, user_name: &str, password: &str) -> Self {
        headers::remove_header(&mut self.headers, AUTHORIZATION);
        self.headers.insert(
            AUTHORIZATION.to_string(),
            encode_credentials_basic(user_name, password),
        );
        self
    }

    pub fn cache(mut self, cache: Arc<dyn CacheBackend>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Read timeout in milliseconds; 0 blocks indefinitely.
    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Stream buffer size; 0 disables buffering.
    pub fn buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    pub fn charset(mut self, label: impl Into<String>) -> Self {
        self.charset = label.into();
        self
    }

    /// Names sent in the POST body; every other parameter goes on the URL.
    pub fn postable_params<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.postable = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Use the body of HTTP error responses as the result (default on).
    pub fn parse_error_stream(mut self, enable: bool) -> Self {
        self.parse_error_stream = enable;
        self
    }

    pub fn root_certificate_pem(mut self, pem: impl Into<Vec<u8>>) -> Self {
        self.tls.root_certificates.push(pem.into());
        self
    }

    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.tls.accept_invalid_certs = accept;
        self
    }

    pub fn build(self) -> Result<RestClient> {
        let (protocol, host, port, path) = match &self.base_url {
            Some(url) => split_base_url(url)?,
            None => (
                self.protocol.clone(),
                self.host.clone(),
                self.port,
                self.service_path.clone(),
            ),
        };
        validate_protocol(&protocol)?;
        validate_host(&host)?;
        let encoding = lookup_charset(&self.charset)?;

        let mut url_to_port = format!("{}://{}", protocol, host);
        if let Some(port) = port.filter(|p| *p > 0) {
            url_to_port.push_str(&format!(":{}", port));
        }
        let mut prefix = url_to_port.clone();
        if !path.starts_with('/') {
            prefix.push('/');
        }
        prefix.push_str(&path);

        let mut url_builder = UrlBuilder::new(prefix).with_encoding(encoding);
        url_builder.set_postable(self.postable);

        Ok(RestClient {
            url_to_port,
            url_builder,
            headers: self.headers,
            cache: self.cache,
            timeout_ms: self.timeout_ms,
            buffer_size: self.buffer_size,
            encoding,
            parse_error_stream: self.parse_error_stream,
            transport: HttpTransport::new(&self.tls)?,
        })
    }
}

impl Default for RestClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn split_base_url(raw: &str) -> Result<(String, String, Option<u16>, String)> {
    let url = url::Url::parse(raw).map_err(|e| {
        Error::invalid_configuration_with_context(
            "invalid base URL",
            ErrorContext::new()
                .with_field_path("base_url")
                .with_details(format!("'{}': {}", raw, e))
                .with_source("client_builder"),
        )
    })?;
    let host = url.host_str().unwrap_or_default().to_string();
    let mut path = url.path().to_string();
    if let Some(query) = url.query() {
        path.push('?');
        path.push_str(query);
    }
    Ok((url.scheme().to_string(), host, url.port(), path))
}
