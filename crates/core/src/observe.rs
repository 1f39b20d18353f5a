//! Progress reporting hooks.
//!
//! The library never logs through global state. Components that want to say
//! what they are doing take an [`Observer`] and report [`Event`]s to it; the
//! binary decides whether those become `tracing` records, styled output, or
//! nothing at all.

use std::path::Path;

/// Something worth reporting while a document moves through the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Event<'a> {
    /// A source file is about to be rendered to HTML.
    Rendering { source: &'a Path, renderer_version: Option<&'a str> },
    /// HTML is about to be reduced to text.
    Extracting { bytes: usize },
    /// The HTML parser recovered from malformed markup.
    ParseDiagnostics { count: usize },
    /// Text extraction finished.
    Extracted { blocks: usize },
    /// A check request is about to be sent.
    Checking { api_url: &'a str, language: &'a str },
    /// The API answered.
    Checked { software_version: &'a str, findings: usize },
}

/// Receives pipeline events.
///
/// The default implementation discards everything, so implementors only
/// override what they care about.
pub trait Observer: Send + Sync {
    fn notify(&self, event: &Event<'_>) {
        let _ = event;
    }
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {}

/// Observer that turns events into `tracing` records.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn notify(&self, event: &Event<'_>) {
        match event {
            Event::Rendering { source, renderer_version } => {
                tracing::info!(
                    source = %source.display(),
                    blogc_version = renderer_version.unwrap_or("unknown"),
                    "Converting source to HTML using blogc"
                );
            }
            Event::Extracting { bytes } => tracing::info!(bytes, "Converting HTML to text"),
            Event::ParseDiagnostics { count } => tracing::debug!(count, "HTML parser recovered from markup errors"),
            Event::Extracted { blocks } => tracing::debug!(blocks, "Extracted text blocks"),
            Event::Checking { api_url, language } => {
                tracing::info!(api_url, language, "Starting LanguageTool API request");
            }
            Event::Checked { software_version, findings } => {
                tracing::info!(
                    languagetool_version = software_version,
                    findings,
                    "Processed successfully by LanguageTool API"
                );
            }
        }
    }
}
