use super::{Method, Param, Params};
use crate::error::{Error, ErrorContext};
use crate::Result;
use encoding_rs::{Encoding, UTF_8};
use std::collections::HashSet;
use url::form_urlencoded;

/// Builds request URLs and POST bodies from an immutable URL prefix.
///
/// For POST, parameters are split between the body and the query string
/// according to the postable-name set:
/// - no set: every parameter travels in the body;
/// - a set: only listed names travel in the body, the rest go on the URL.
///
/// GET always puts every parameter on the query string.
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    url_prefix: String,
    postable: Option<HashSet<String>>,
    encoding: &'static Encoding,
}

impl UrlBuilder {
    pub fn new(url_prefix: impl Into<String>) -> Self {
        Self {
            url_prefix: url_prefix.into(),
            postable: None,
            encoding: UTF_8,
        }
    }

    pub fn with_postable<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.postable = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Charset used to turn parameter text into bytes before percent-encoding.
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn url_prefix(&self) -> &str {
        &self.url_prefix
    }

    pub fn postable(&self) -> Option<&HashSet<String>> {
        self.postable.as_ref()
    }

    pub fn set_postable(&mut self, names: Option<HashSet<String>>) {
        self.postable = names;
    }

    pub fn set_encoding(&mut self, encoding: &'static Encoding) {
        self.encoding = encoding;
    }

    /// Full request URL: prefix plus every parameter that does not travel in the body.
    pub fn request_url(&self, method: Method, params: &Params) -> Result<String> {
        let mut buf = String::with_capacity(self.url_prefix.len() + params.len() * 16);
        buf.push_str(&self.url_prefix);
        let mut sep = match self.url_prefix.find('?') {
            None => Some('?'),
            Some(_) if self.url_prefix.ends_with(['?', '&']) => None,
            Some(_) => Some('&'),
        };
        for param in params.iter().filter(|p| !self.in_body(method, p)) {
            if let Some(c) = sep {
                buf.push(c);
            }
            sep = Some('&');
            self.append_pair(&mut buf, param)?;
        }
        Ok(buf)
    }

    /// Form-encoded POST body: every parameter that travels in the body, `&`-joined.
    pub fn post_body(&self, params: &Params) -> Result<String> {
        let mut buf = String::new();
        for param in params.iter().filter(|p| self.in_body(Method::Post, p)) {
            if !buf.is_empty() {
                buf.push('&');
            }
            self.append_pair(&mut buf, param)?;
        }
        Ok(buf)
    }

    fn in_body(&self, method: Method, param: &Param) -> bool {
        method.is_post()
            && self
                .postable
                .as_ref()
                .map_or(true, |names| names.contains(param.name()))
    }

    fn append_pair(&self, buf: &mut String, param: &Param) -> Result<()> {
        buf.push_str(&self.encode(param.name(), param.name())?);
        buf.push('=');
        if let Some(value) = param.value() {
            buf.push_str(&self.encode(param.name(), value)?);
        }
        Ok(())
    }

    fn encode(&self, name: &str, text: &str) -> Result<String> {
        let (bytes, _, unmappable) = self.encoding.encode(text);
        if unmappable {
            return Err(Error::encoding_with_context(
                format!("value is not representable in {}", self.encoding.name()),
                ErrorContext::new()
                    .with_field_path(name)
                    .with_details(text)
                    .with_source("url_builder"),
            ));
        }
        Ok(form_urlencoded::byte_serialize(&bytes).collect())
    }
}
