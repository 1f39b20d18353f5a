//! LanguageTool API client.
//!
//! Sends extracted text to the `/v2/check` endpoint of a LanguageTool server
//! and decodes the matches it reports into [`Finding`]s. A request is made
//! exactly once; transport and decode failures are returned to the caller.

use std::sync::Arc;
#[cfg(feature = "check")]
use std::time::Duration;

#[cfg(feature = "check")]
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::observe::{NoopObserver, Observer};
#[cfg(feature = "check")]
use crate::observe::Event;
use crate::{ProofreadError, Result};

/// Public LanguageTool API.
pub const DEFAULT_API_URL: &str = "https://languagetool.org/api";

/// HTTP client configuration for the LanguageTool API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API, without the `/v2/check` suffix.
    pub api_url: String,
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: 30,
            user_agent: concat!("proofread/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Full URL of the check endpoint.
    ///
    /// An empty base URL falls back to [`DEFAULT_API_URL`].
    pub fn check_url(&self) -> Result<Url> {
        let base = if self.api_url.trim().is_empty() { DEFAULT_API_URL } else { self.api_url.trim() };
        let url = format!("{}/v2/check", base.trim_end_matches('/'));

        let parsed = Url::parse(&url).map_err(|e| ProofreadError::InvalidUrl(format!("{}: {}", base, e)))?;
        match parsed.scheme() {
            "http" | "https" => Ok(parsed),
            scheme => Err(ProofreadError::InvalidUrl(format!("unsupported scheme {}", scheme))),
        }
    }
}

/// Per-request checking options.
///
/// # Example
///
/// ```rust
/// use proofread_core::CheckOptions;
///
/// let options = CheckOptions::builder()
///     .language("en-US")
///     .mother_tongue("pt-BR")
///     .disabled_rules(["WHITESPACE_RULE"])
///     .ignored_words(["blogc"])
///     .build();
///
/// assert_eq!(options.language(), "en-US");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckOptions {
    /// Language code such as `en-US`. Empty means `auto`.
    pub language: String,
    /// Native language of the author, enabling false-friend rules.
    pub mother_tongue: Option<String>,
    /// Words whose findings are dropped from the result.
    pub ignored_words: Vec<String>,
    /// Rule ids the server should not apply.
    pub disabled_rules: Vec<String>,
    /// Category ids the server should not apply.
    pub disabled_categories: Vec<String>,
}

impl CheckOptions {
    /// Creates a new builder for CheckOptions.
    pub fn builder() -> CheckOptionsBuilder {
        CheckOptionsBuilder::new()
    }

    /// Language sent to the API.
    pub fn language(&self) -> &str {
        if self.language.trim().is_empty() { "auto" } else { self.language.trim() }
    }

    /// Form fields for a check request of `text`.
    pub fn form(&self, text: &str) -> Vec<(&'static str, String)> {
        let mut form = vec![
            ("text", text.to_string()),
            ("language", self.language().to_string()),
            ("enabledOnly", "false".to_string()),
        ];

        if let Some(mother_tongue) = self.mother_tongue.as_deref().filter(|m| !m.is_empty()) {
            form.push(("motherTongue", mother_tongue.to_string()));
        }

        if !self.disabled_rules.is_empty() {
            form.push(("disabledRules", self.disabled_rules.join(",")));
        }

        if !self.disabled_categories.is_empty() {
            form.push(("disabledCategories", self.disabled_categories.join(",")));
        }

        form
    }
}

/// Builder for CheckOptions.
pub struct CheckOptionsBuilder {
    options: CheckOptions,
}

impl CheckOptionsBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { options: CheckOptions::default() }
    }

    /// Sets the language code.
    pub fn language(mut self, value: impl Into<String>) -> Self {
        self.options.language = value.into();
        self
    }

    /// Sets the author's mother tongue.
    pub fn mother_tongue(mut self, value: impl Into<String>) -> Self {
        self.options.mother_tongue = Some(value.into());
        self
    }

    /// Sets the ignored words.
    pub fn ignored_words<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.ignored_words = values.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the disabled rule ids.
    pub fn disabled_rules<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.disabled_rules = values.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the disabled category ids.
    pub fn disabled_categories<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.disabled_categories = values.into_iter().map(Into::into).collect();
        self
    }

    /// Builds the final options.
    pub fn build(self) -> CheckOptions {
        self.options
    }
}

impl Default for CheckOptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Body of a `/v2/check` response.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CheckResponse {
    pub software: Software,
    pub matches: Vec<Finding>,
}

/// Server identification.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Software {
    pub name: String,
    pub version: String,
}

/// One grammar or style issue.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Finding {
    pub message: String,
    pub sentence: String,
    pub rule: Rule,
    pub context: Context,
    pub replacements: Vec<Replacement>,
}

/// Rule that produced a finding.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Rule {
    pub id: String,
    pub description: String,
    pub issue_type: String,
    pub category: Category,
    pub urls: Vec<RuleUrl>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Category {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RuleUrl {
    pub value: String,
}

/// Window of text around a finding. `offset` and `length` are byte positions
/// within `text`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Context {
    pub text: String,
    pub offset: usize,
    pub length: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Replacement {
    pub value: String,
}

impl Finding {
    /// The span of the context the finding points at.
    ///
    /// Empty when the reported span is out of range or splits a character.
    pub fn offending_text(&self) -> &str {
        let start = self.context.offset;
        let end = start.saturating_add(self.context.length);
        self.context.text.get(start..end).unwrap_or("")
    }

    /// Whether any space-separated word of the offending span is in `words`.
    pub fn mentions_any(&self, words: &[String]) -> bool {
        self.offending_text().split(' ').any(|word| words.iter().any(|w| w == word))
    }
}

/// Drops findings that point at ignored words, keeping order.
pub fn filter_ignored(findings: Vec<Finding>, ignored_words: &[String]) -> Vec<Finding> {
    if ignored_words.is_empty() {
        return findings;
    }

    findings.into_iter().filter(|f| !f.mentions_any(ignored_words)).collect()
}

/// Decodes a `/v2/check` response body.
pub fn decode_response(body: &str) -> Result<CheckResponse> {
    Ok(serde_json::from_str(body)?)
}

/// Client for a LanguageTool server.
///
/// # Example
///
/// ```rust,no_run
/// use proofread_core::{CheckOptions, ClientConfig, LanguageToolClient};
///
/// # async fn example() -> proofread_core::Result<()> {
/// let client = LanguageToolClient::new(ClientConfig::default());
/// let findings = client.check("This are wrong.", &CheckOptions::default()).await?;
/// println!("{} findings", findings.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct LanguageToolClient {
    config: ClientConfig,
    observer: Arc<dyn Observer>,
}

impl std::fmt::Debug for LanguageToolClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageToolClient").field("config", &self.config).finish_non_exhaustive()
    }
}

impl LanguageToolClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config, observer: Arc::new(NoopObserver) }
    }

    /// Reports request progress to `observer`.
    pub fn with_observer(mut self, observer: Arc<dyn Observer>) -> Self {
        self.observer = observer;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Checks `text` and returns the findings not covered by ignored words.
    ///
    /// # Errors
    ///
    /// - [`ProofreadError::InvalidUrl`] for a malformed API URL.
    /// - [`ProofreadError::Timeout`] when the request exceeds the timeout.
    /// - [`ProofreadError::HttpError`] for transport failures and error statuses.
    /// - [`ProofreadError::DecodeError`] when the body is not a check response.
    #[cfg(feature = "check")]
    pub async fn check(&self, text: &str, options: &CheckOptions) -> Result<Vec<Finding>> {
        let url = self.config.check_url()?;

        self.observer
            .notify(&Event::Checking { api_url: url.as_str(), language: options.language() });

        let client = Client::builder()
            .timeout(Duration::from_secs(self.config.timeout))
            .user_agent(&self.config.user_agent)
            .build()
            .map_err(ProofreadError::HttpError)?;

        let timeout = self.config.timeout;
        let as_error = |e: reqwest::Error| {
            if e.is_timeout() { ProofreadError::Timeout { timeout } } else { ProofreadError::HttpError(e) }
        };

        let response = client
            .post(url)
            .header("Accept", "application/json")
            .form(&options.form(text))
            .send()
            .await
            .map_err(as_error)?
            .error_for_status()?;

        let body = response.text().await.map_err(as_error)?;
        let decoded = decode_response(&body)?;

        self.observer.notify(&Event::Checked {
            software_version: &decoded.software.version,
            findings: decoded.matches.len(),
        });

        Ok(filter_ignored(decoded.matches, &options.ignored_words))
    }
}
