use std::fmt::Write;

use crate::languagetool::{Context, Finding};

/// Width of the bar separating findings.
const BAR_WIDTH: usize = 80;

/// Indentation of every value line.
const INDENT: &str = "      ";

/// Plain text formatter for LanguageTool findings
#[derive(Debug, Clone, Copy, Default)]
pub struct TextReport;

impl TextReport {
    pub fn new() -> Self {
        Self
    }

    /// Render findings as a human-readable report
    pub fn render(&self, findings: &[Finding]) -> String {
        findings_to_text(findings)
    }
}

/// Render findings as a human-readable report.
///
/// Each finding lists its rule, message, sentence and context, with a caret
/// line under the offending span. Findings are separated by a dashed bar.
pub fn findings_to_text(findings: &[Finding]) -> String {
    let bar = "-".repeat(BAR_WIDTH);
    let mut output = String::new();

    for (i, finding) in findings.iter().enumerate() {
        write_finding(&mut output, finding);

        if i < findings.len() - 1 {
            output.push('\n');
            output.push_str(&bar);
            output.push('\n');
        }
    }

    output
}

fn write_finding(out: &mut String, finding: &Finding) {
    let rule = &finding.rule;

    // Writing into a String cannot fail.
    let _ = writeln!(out, "Rule: {}: {}", rule.id, rule.description);
    let _ = writeln!(out, "{}{}: {} ({})", INDENT, rule.category.id, rule.category.name, rule.issue_type);
    for url in &rule.urls {
        let _ = writeln!(out, "{}{}", INDENT, url.value);
    }

    let _ = writeln!(out, "Message:");
    let _ = writeln!(out, "{}{}", INDENT, finding.message);

    let _ = writeln!(out, "Sentence:");
    let _ = writeln!(out, "{}{}", INDENT, finding.sentence);

    let _ = writeln!(out, "Context:");
    let _ = writeln!(out, "{}{}", INDENT, finding.context.text);
    let _ = writeln!(out, "{}{}", INDENT, caret_line(&finding.context));

    if !finding.replacements.is_empty() {
        let _ = writeln!(out, "Replacements:");
        for replacement in &finding.replacements {
            let _ = writeln!(out, "{}{}", INDENT, replacement.value);
        }
    }
}

/// Spaces up to the offending span, then one caret per character of it.
///
/// The API reports the span in bytes. It is clamped to the context text, and
/// columns are counted in characters so the carets line up under multibyte
/// text. A span that splits a character falls back to byte columns.
fn caret_line(context: &Context) -> String {
    let text = &context.text;
    let start = context.offset.min(text.len());
    let end = start + context.length.min(text.len() - start);

    let (pad, width) = match (text.get(..start), text.get(start..end)) {
        (Some(before), Some(span)) => (before.chars().count(), span.chars().count()),
        _ => (start, end - start),
    };

    format!("{}{}", " ".repeat(pad), "^".repeat(width))
}
