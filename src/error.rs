use crate::transport::TransportError;
use thiserror::Error;

/// Structured error context for better error handling and debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field path or configuration key that caused the error (e.g., "config.protocol", "params[3]")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected value, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "client_builder", "url_builder")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the web-service client.
///
/// Configuration errors surface at construction or setter time; everything
/// else surfaces synchronously from the request operation that caused it.
/// Nothing is retried.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {message}{}", format_context(.context))]
    InvalidConfiguration {
        message: String,
        context: ErrorContext,
    },

    #[error("Malformed request: {message}{}", format_context(.context))]
    MalformedRequest {
        message: String,
        context: ErrorContext,
    },

    #[error("Network error: {0}")]
    Network(#[from] TransportError),

    #[error("Encoding error: {message}{}", format_context(.context))]
    Encoding {
        message: String,
        context: ErrorContext,
    },

    #[error("XML parse error: {0}")]
    Parse(#[from] xmltree::ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    /// Create a new configuration error with structured context
    pub fn invalid_configuration_with_context(
        msg: impl Into<String>,
        context: ErrorContext,
    ) -> Self {
        Error::InvalidConfiguration {
            message: msg.into(),
            context,
        }
    }

    /// Create a new malformed-request error with structured context
    pub fn malformed_request_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::MalformedRequest {
            message: msg.into(),
            context,
        }
    }

    /// Create a new encoding error with structured context
    pub fn encoding_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Encoding {
            message: msg.into(),
            context,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Error::InvalidConfiguration { context, .. }
            | Error::MalformedRequest { context, .. }
            | Error::Encoding { context, .. } => Some(context),
            _ => None,
        }
    }

    /// HTTP status of a failed call, when the failure came from the server.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Network(TransportError::Status { status, .. }) => Some(*status),
            Error::Network(TransportError::Http(e)) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
