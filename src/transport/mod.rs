//! Blocking HTTP transport and response decoding.

mod decode;
mod http;

pub use decode::{read_to_string, DecodingReader};
pub use http::{HttpCall, HttpTransport, ResponseBody, TlsOptions};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url} with no usable error body")]
    Status { status: u16, url: String },

    #[error("failed reading response from {url}: {source}")]
    Read {
        url: String,
        #[source]
        source: std::io::Error,
    },
}
