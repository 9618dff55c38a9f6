//! Default request-header presets and the basic-auth helper.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const AUTHORIZATION: &str = "Authorization";

/// `accept: application/xml`; the default for new clients.
pub static XML_HEADERS: Lazy<HashMap<String, String>> =
    Lazy::new(|| accept_only("application/xml"));

/// `accept: text/html`
pub static HTML_HEADERS: Lazy<HashMap<String, String>> = Lazy::new(|| accept_only("text/html"));

/// `accept: text/plain`
pub static TEXT_HEADERS: Lazy<HashMap<String, String>> = Lazy::new(|| accept_only("text/plain"));

fn accept_only(mime: &str) -> HashMap<String, String> {
    HashMap::from([("accept".to_string(), mime.to_string())])
}

/// `Authorization` header value for HTTP Basic authentication (RFC 7617).
pub fn encode_credentials_basic(user_name: &str, password: &str) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{}:{}", user_name, password))
    )
}

/// Remove every header named `name`, ignoring ASCII case.
pub(crate) fn remove_header(headers: &mut HashMap<String, String>, name: &str) {
    headers.retain(|k, _| !k.eq_ignore_ascii_case(name));
}
