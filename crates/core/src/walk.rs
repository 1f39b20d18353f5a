//! Recursive reduction of a parsed HTML tree to text segments.
//!
//! The walker never mutates the tree. It visits nodes in document order and
//! returns one string per block element it meets. Two entry points stand in
//! for the "inside a block" state:
//!
//! - [`walk_as_container`] visits a node where a new block is expected. Text
//!   found here is stray whitespace between tags and is dropped.
//! - [`walk_as_content`] visits a node inside a block. Text is kept verbatim.
//!
//! Whitespace is collapsed once per block, never at inline boundaries, so
//! `foo<em>bar</em>` stays `foobar` while line breaks in the source become
//! single spaces.

use std::sync::LazyLock;

use ego_tree::NodeRef;
use regex::Regex;
use scraper::Node;

use crate::role::Role;
use crate::{ProofreadError, Result};

/// Horizontal whitespace around one or more line breaks.
static LINE_BREAK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]*(?:\r?\n[ \t]*)+").expect("line break pattern is valid"));

/// Replaces every run of spaces and tabs around line breaks with one space.
///
/// Whitespace that does not touch a line break is left alone, and the output
/// never contains a line break, so applying this twice changes nothing.
pub fn collapse_whitespace(text: &str) -> String {
    LINE_BREAK_RUN.replace_all(text, " ").into_owned()
}

/// Walks a whole document and returns its block segments in order.
///
/// # Errors
///
/// - [`ProofreadError::NotADocument`] if `root` is not a document node.
/// - [`ProofreadError::UnexpectedRootChildType`] if a child of the root is not
///   an element (a doctype or a leading comment, for instance).
/// - Anything [`walk_as_container`] returns for those children.
pub fn walk(root: NodeRef<'_, Node>) -> Result<Vec<String>> {
    if !root.value().is_document() {
        return Err(ProofreadError::NotADocument);
    }

    let mut segments = Vec::new();

    for child in root.children() {
        if !child.value().is_element() {
            return Err(ProofreadError::UnexpectedRootChildType(describe(child.value())));
        }

        segments.extend(walk_as_container(child)?);
    }

    Ok(segments)
}

/// Visits a node where a new block is expected.
pub fn walk_as_container(node: NodeRef<'_, Node>) -> Result<Vec<String>> {
    match node.value() {
        Node::Text(_) => Ok(Vec::new()),
        Node::Element(element) => walk_element(node, element.name()),
        other => Err(ProofreadError::UnexpectedNodeType(describe(other))),
    }
}

/// Visits a node inside a block.
pub fn walk_as_content(node: NodeRef<'_, Node>) -> Result<Vec<String>> {
    match node.value() {
        Node::Text(text) => Ok(vec![String::from(&**text)]),
        Node::Element(element) => walk_element(node, element.name()),
        other => Err(ProofreadError::UnexpectedNodeType(describe(other))),
    }
}

fn walk_element(node: NodeRef<'_, Node>, tag_name: &str) -> Result<Vec<String>> {
    let role = Role::of(tag_name);

    match role {
        Role::RootContainer => {
            let body = node
                .children()
                .find(|child| child.value().as_element().is_some_and(|el| el.name() == "body"))
                .ok_or(ProofreadError::MissingBody)?;

            walk_as_container(body)
        }
        Role::GroupContainer => {
            let mut segments = Vec::new();
            for child in node.children() {
                segments.extend(walk_as_container(child)?);
            }
            Ok(segments)
        }
        Role::Block | Role::Inline => {
            let mut pieces = Vec::new();
            for child in node.children() {
                pieces.extend(walk_as_content(child)?);
            }

            let joined = pieces.concat();

            if role.produces_segment() {
                Ok(vec![collapse_whitespace(&joined).trim().to_string()])
            } else {
                Ok(vec![joined])
            }
        }
        Role::Ignored => Ok(Vec::new()),
    }
}

/// Short human-readable description of a node for error messages.
fn describe(node: &Node) -> String {
    match node {
        Node::Document => "document".to_string(),
        Node::Fragment => "fragment".to_string(),
        Node::Doctype(doctype) => format!("doctype `{}`", doctype.name()),
        Node::Comment(comment) => format!("comment `{}`", comment.trim()),
        Node::ProcessingInstruction(pi) => format!("processing instruction `{}`", pi.target),
        Node::Text(text) => format!("text `{}`", text.trim()),
        Node::Element(element) => format!("element <{}>", element.name()),
    }
}
