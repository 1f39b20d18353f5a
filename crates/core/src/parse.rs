//! HTML parsing.
//!
//! This module provides the [`Document`] type, a parsed HTML page that can be
//! reduced to text blocks with the walker in [`crate::walk`].
//!
//! # Example
//!
//! ```rust
//! use proofread_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <h1>Title</h1>
//!             <p>Paragraph</p>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html);
//! assert_eq!(doc.blocks().unwrap(), vec!["Title", "Paragraph"]);
//! ```

use scraper::Html;

use crate::Result;
use crate::extract::join_blocks;
use crate::walk::walk;

/// Represents a parsed HTML document.
///
/// Parsing follows the HTML5 algorithm and never fails: malformed markup is
/// repaired by the parser and the repairs are listed by [`Document::diagnostics`].
/// Structural problems the walker cannot accept surface later, from
/// [`Document::blocks`] and [`Document::text`].
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// # Example
    ///
    /// ```rust
    /// use proofread_core::parse::Document;
    ///
    /// let doc = Document::parse("<html><body><p>Hello</p></body></html>");
    /// assert_eq!(doc.text().unwrap(), "Hello");
    /// ```
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Parser diagnostics for markup that had to be repaired.
    pub fn diagnostics(&self) -> Vec<String> {
        self.html.errors.iter().map(|e| e.to_string()).collect()
    }

    /// Reduces the document to one string per block element.
    ///
    /// # Errors
    ///
    /// Returns the walker's structural errors, such as
    /// [`crate::ProofreadError::MissingBody`].
    pub fn blocks(&self) -> Result<Vec<String>> {
        walk(self.html.tree.root())
    }

    /// Reduces the document to text, with a blank line between blocks.
    pub fn text(&self) -> Result<String> {
        Ok(join_blocks(&self.blocks()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ProofreadError;

    const SAMPLE_HTML: &str = r#"<html><head><title>Test Page</title></head><body>
<h1>Heading</h1>
<p>Paragraph
one.</p>
<ul>
  <li>Item <strong>one</strong></li>
  <li>Item two</li>
</ul>
</body></html>"#;

    #[test]
    fn test_parse_document_blocks() {
        let doc = Document::parse(SAMPLE_HTML);
        let blocks = doc.blocks().unwrap();

        assert_eq!(blocks, vec!["Heading", "Paragraph one.", "Item one", "Item two"]);
    }

    #[test]
    fn test_document_text() {
        let doc = Document::parse(SAMPLE_HTML);
        let text = doc.text().unwrap();

        assert_eq!(text, "Heading\n\nParagraph one.\n\nItem one\n\nItem two");
    }

    #[test]
    fn test_diagnostics_for_malformed_markup() {
        let doc = Document::parse("<html><body><p>unclosed <em>span</p></body></html>");
        assert!(!doc.diagnostics().is_empty());
    }

    #[test]
    fn test_missing_body() {
        let doc = Document::parse("<html><head></head><frameset></frameset></html>");
        assert!(matches!(doc.text(), Err(ProofreadError::MissingBody)));
    }
}
