//! Tag classification for the HTML to text reduction.
//!
//! Every element is assigned exactly one [`Role`] from its tag name. The
//! walker in [`crate::walk`] dispatches on the role alone, so supporting a new
//! tag is a single match arm here.

/// The part an element plays when its document is reduced to text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The `html` wrapper. Only its `body` child is visited.
    RootContainer,
    /// Transparent grouping (`body`, `blockquote`, `ol`, `ul`). Children start
    /// fresh blocks and the container itself contributes no segment.
    GroupContainer,
    /// Paragraphs, list items and headings. Each yields exactly one segment.
    Block,
    /// Emphasis, strong emphasis, code spans and links. Text is merged into
    /// the enclosing block.
    Inline,
    /// Everything else. Produces nothing and its children are never visited.
    Ignored,
}

impl Role {
    /// Classifies an element by its (lowercase) local tag name.
    pub fn of(tag_name: &str) -> Self {
        match tag_name {
            "html" => Role::RootContainer,
            "body" | "blockquote" | "ol" | "ul" => Role::GroupContainer,
            "p" | "li" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => Role::Block,
            "em" | "strong" | "code" | "a" => Role::Inline,
            _ => Role::Ignored,
        }
    }

    /// Whether elements with this role produce their own text segment.
    pub fn produces_segment(self) -> bool {
        matches!(self, Role::Block)
    }
}
