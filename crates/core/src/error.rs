//! Error types for proofread operations.
//!
//! This module defines the main error type [`ProofreadError`] which represents
//! all possible errors that can occur while rendering a source document,
//! reducing its HTML to text, and checking that text against LanguageTool.
//!
//! # Example
//!
//! ```rust
//! use proofread_core::{ProofreadError, Result};
//!
//! fn first_block(blocks: &[String]) -> Result<&str> {
//!     blocks.first().map(String::as_str).ok_or(ProofreadError::MissingBody)
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for proofread operations.
///
/// Every variant is terminal for the call that produced it: nothing in this
/// crate retries or degrades to a partial result.
///
/// # Example
///
/// ```rust
/// use proofread_core::{ProofreadError, html_to_text};
///
/// match html_to_text("<html><body><p>Hello</p></body></html>") {
///     Ok(text) => println!("{}", text),
///     Err(ProofreadError::MissingBody) => println!("document has no body"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum ProofreadError {
    /// A visited tree node is neither an element nor a text node.
    ///
    /// Comments, doctypes and processing instructions anywhere the walker
    /// descends are rejected rather than skipped.
    #[error("Unexpected node type in document tree: {0}")]
    UnexpectedNodeType(String),

    /// The `html` element has no `body` child.
    #[error("Document has no body element")]
    MissingBody,

    /// The tree handed to the walker is not rooted at a document node.
    #[error("Tree root must be a document node")]
    NotADocument,

    /// A direct child of the document root is not an element.
    #[error("Unexpected node type in document root: {0}")]
    UnexpectedRootChildType(String),

    /// The renderer ran but could not produce HTML for the source.
    #[error("Failed to render {source_file}: {message}")]
    RenderError { source_file: PathBuf, message: String },

    /// A variable required from the renderer is not defined by the source.
    #[error("Variable {name} is not defined in {source_file}")]
    MissingVariable { source_file: PathBuf, name: String },

    /// The renderer binary could not be started.
    #[error("Renderer {binary} is not available: {message}")]
    RendererUnavailable { binary: PathBuf, message: String },

    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and non-success status codes returned by the API.
    #[cfg(feature = "check")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid API URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The API response body could not be decoded.
    #[error("Failed to decode API response: {0}")]
    DecodeError(#[from] serde_json::Error),

    /// A report could not be serialized.
    #[error("Failed to encode report: {0}")]
    EncodeError(serde_json::Error),

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O errors while reading sources or settings.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Settings file errors.
    ///
    /// Returned when a settings file is missing, unreadable or contains
    /// unknown keys.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<serde_yaml::Error> for ProofreadError {
    fn from(err: serde_yaml::Error) -> Self {
        ProofreadError::ConfigError(err.to_string())
    }
}

/// Result type alias for ProofreadError.
///
/// This is a convenience alias for `std::result::Result<T, ProofreadError>`.
pub type Result<T> = std::result::Result<T, ProofreadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProofreadError::UnexpectedNodeType("comment".to_string());
        assert!(err.to_string().contains("comment"));
    }

    #[test]
    fn test_missing_variable_error() {
        let err = ProofreadError::MissingVariable { source_file: PathBuf::from("post.txt"), name: "CONTENT".to_string() };
        assert!(err.to_string().contains("CONTENT"));
        assert!(err.to_string().contains("post.txt"));
    }

    #[test]
    fn test_timeout_error() {
        let err = ProofreadError::Timeout { timeout: 30 };
        assert!(err.to_string().contains("30"));
    }

    #[test]
    fn test_json_errors_keep_their_direction() {
        let decode: ProofreadError = serde_json::from_str::<u32>("x").unwrap_err().into();
        assert!(decode.to_string().starts_with("Failed to decode API response"));

        let encode = ProofreadError::EncodeError(serde_json::from_str::<u32>("x").unwrap_err());
        assert!(encode.to_string().starts_with("Failed to encode report"));
    }

    #[test]
    fn test_yaml_error_becomes_config_error() {
        let yaml_err = serde_yaml::from_str::<Vec<String>>("{").unwrap_err();
        let err = ProofreadError::from(yaml_err);
        assert!(matches!(err, ProofreadError::ConfigError(_)));
    }
}
