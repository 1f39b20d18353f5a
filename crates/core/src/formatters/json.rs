use crate::languagetool::Finding;
use crate::{ProofreadError, Result};
use serde::Serialize;

/// Complete JSON output structure
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport<'a> {
    /// Source document the findings belong to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<&'a str>,
    /// Number of findings after ignored words were applied
    pub count: usize,
    /// The findings, in API order
    pub findings: &'a [Finding],
}

/// Configuration for JSON output
#[derive(Debug, Clone, Default)]
pub struct JsonConfig {
    /// Pretty print JSON output
    pub pretty: bool,
}

/// JSON formatter for LanguageTool findings
pub struct JsonFormatter {
    config: JsonConfig,
}

impl JsonFormatter {
    pub fn new(config: JsonConfig) -> Self {
        Self { config }
    }

    /// Serialize findings for `source`
    pub fn render(&self, source: Option<&str>, findings: &[Finding]) -> Result<String> {
        findings_to_json(source, findings, &self.config)
    }
}

/// Serialize findings to a JSON document.
pub fn findings_to_json(source: Option<&str>, findings: &[Finding], config: &JsonConfig) -> Result<String> {
    let report = JsonReport { source, count: findings.len(), findings };

    let json = if config.pretty { serde_json::to_string_pretty(&report) } else { serde_json::to_string(&report) };

    json.map_err(ProofreadError::EncodeError)
}
