//! Error types
//!
//! Every `ToolError` renders (via `Display`) as the text message handed back
//! to the host, so the wording here is user-facing.

use thiserror::Error;

/// Errors raised while handling a single tool invocation.
#[derive(Debug, Error)]
pub enum ToolError {
    /// A required tool parameter is absent or blank.
    #[error("Error: Missing required parameter '{0}' for legal analysis.")]
    MissingParameter(&'static str),

    /// A tool parameter is present but has the wrong shape.
    #[error("Error: Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// A credential the tool needs was not configured by the host.
    #[error("Error: Legal analysis API {label} is not configured. Please set '{key}' in plugin credentials.")]
    MissingCredential {
        key: &'static str,
        label: &'static str,
    },

    /// The API answered with a non-2xx status.
    #[error("Error from legal analysis API: {status} - {body}")]
    HttpStatus { status: u16, body: String },

    /// Transport failure: DNS, refused connection, malformed URL, broken body.
    #[error("Network error when connecting to legal analysis API: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Network error when connecting to legal analysis API: request timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// The API answered 2xx but the body is not the expected JSON shape.
    #[error("Error parsing legal analysis API response: {source}. Response: {body}")]
    ResponseParse {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    #[error("An unexpected error occurred during legal analysis: {0}")]
    Unexpected(String),
}

/// Raised when the host asks the provider to validate its credentials.
#[derive(Debug, Error)]
#[error("Credential validation failed: {0}")]
pub struct CredentialValidationError(pub String);

/// Errors surfaced by the provider's host-facing entry points.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Tool '{0}' is not provided by this plugin")]
    UnknownTool(String),
}
