use super::TransportError;
use crate::error::{Error, ErrorContext};
use crate::request::Method;
use crate::Result;
use bytes::Bytes;
use reqwest::blocking::{Client, Response};
use reqwest::header::CONTENT_TYPE;
use reqwest::Certificate;
use std::collections::HashMap;
use std::io::{BufReader, Cursor, Read};
use std::time::Duration;
use tracing::warn;

/// Readable response body, buffered when a buffer size is configured.
pub type ResponseBody = Box<dyn Read + Send>;

/// TLS trust settings for HTTPS services.
#[derive(Debug, Clone, Default)]
pub struct TlsOptions {
    /// Extra PEM-encoded root certificates (e.g. for self-signed services).
    pub root_certificates: Vec<Vec<u8>>,
    /// Skip certificate validation entirely.
    pub accept_invalid_certs: bool,
}

/// One HTTP exchange, fully described.
#[derive(Debug)]
pub struct HttpCall<'a> {
    pub method: Method,
    pub url: &'a str,
    pub headers: &'a HashMap<String, String>,
    /// Form-encoded body, POST only.
    pub body: Option<Vec<u8>>,
    /// `None` blocks indefinitely.
    pub timeout: Option<Duration>,
    pub parse_error_stream: bool,
    pub buffer_size: usize,
}

/// Thin wrapper over a blocking reqwest client. One connection per call,
/// no retries.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(tls: &TlsOptions) -> Result<Self> {
        // reqwest's blocking client defaults to a 30s timeout; timeouts are per call here.
        let mut builder = Client::builder()
            .timeout(None::<Duration>)
            .danger_accept_invalid_certs(tls.accept_invalid_certs);

        for (i, pem) in tls.root_certificates.iter().enumerate() {
            let cert = Certificate::from_pem(pem).map_err(|e| {
                Error::invalid_configuration_with_context(
                    "invalid root certificate",
                    ErrorContext::new()
                        .with_field_path(format!("tls.root_certificates[{}]", i))
                        .with_details(e.to_string())
                        .with_source("http_transport"),
                )
            })?;
            builder = builder.add_root_certificate(cert);
        }

        let client = builder.build().map_err(|e| {
            Error::invalid_configuration_with_context(
                "cannot build HTTP client",
                ErrorContext::new()
                    .with_details(e.to_string())
                    .with_source("http_transport"),
            )
        })?;
        Ok(Self { client })
    }

    pub fn execute(&self, mut call: HttpCall<'_>) -> Result<ResponseBody> {
        let mut req = match call.method {
            Method::Get => self.client.get(call.url),
            Method::Post => self.client.post(call.url),
        };
        if let Some(timeout) = call.timeout {
            req = req.timeout(timeout);
        }
        for (k, v) in call.headers {
            req = req.header(k, v);
        }
        if let Some(body) = call.body.take() {
            // Content-Length is derived from the sized body.
            req = req
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(body);
        }

        let response = req.send().map_err(TransportError::Http)?;
        accept(response, &call)
    }
}

fn accept(response: Response, call: &HttpCall<'_>) -> Result<ResponseBody> {
    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        if call.parse_error_stream {
            let body: Bytes = response.bytes().map_err(TransportError::Http)?;
            if !body.is_empty() {
                warn!(
                    status = status.as_u16(),
                    url = call.url,
                    "Web service call failed, using error body as result"
                );
                return Ok(Box::new(Cursor::new(body)));
            }
        }
        return Err(TransportError::Status {
            status: status.as_u16(),
            url: call.url.to_string(),
        }
        .into());
    }

    Ok(if call.buffer_size > 0 {
        Box::new(BufReader::with_capacity(call.buffer_size, response))
    } else {
        Box::new(response)
    })
}
