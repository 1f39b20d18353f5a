//! HTML to text extraction.
//!
//! [`html_to_text`] is the entry point used between the renderer and the
//! grammar checker. It parses the HTML, walks the tree and joins the block
//! segments with a blank line so each paragraph reaches the checker as its
//! own run of sentences.

use crate::Result;
use crate::observe::{Event, NoopObserver, Observer};
use crate::parse::Document;

/// Separator placed between consecutive blocks.
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Joins block segments into one text blob.
pub fn join_blocks(blocks: &[String]) -> String {
    blocks.join(BLOCK_SEPARATOR)
}

/// Converts an HTML document to plain text.
///
/// # Example
///
/// ```rust
/// use proofread_core::html_to_text;
///
/// let text = html_to_text("<html><body><h1>Title</h1><p>Body text.</p></body></html>").unwrap();
/// assert_eq!(text, "Title\n\nBody text.");
/// ```
///
/// # Errors
///
/// Structural errors from the walker are returned as-is. There is no fallback
/// to empty or partial text.
pub fn html_to_text(html: &str) -> Result<String> {
    html_to_text_observed(html, &NoopObserver)
}

/// Converts an HTML document to plain text, reporting progress to `observer`.
pub fn html_to_text_observed(html: &str, observer: &dyn Observer) -> Result<String> {
    observer.notify(&Event::Extracting { bytes: html.len() });

    let doc = Document::parse(html);

    let diagnostics = doc.diagnostics();
    if !diagnostics.is_empty() {
        observer.notify(&Event::ParseDiagnostics { count: diagnostics.len() });
    }

    let blocks = doc.blocks()?;
    observer.notify(&Event::Extracted { blocks: blocks.len() });

    Ok(join_blocks(&blocks))
}
