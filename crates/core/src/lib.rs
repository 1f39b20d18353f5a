pub mod error;
pub mod extract;
pub mod formatters;
pub mod languagetool;
pub mod observe;
pub mod parse;
pub mod render;
pub mod role;
pub mod settings;
pub mod walk;

pub use error::{ProofreadError, Result};
pub use extract::{BLOCK_SEPARATOR, html_to_text, html_to_text_observed, join_blocks};
pub use formatters::{JsonConfig, JsonFormatter, TextReport, findings_to_json, findings_to_text};
pub use languagetool::{
    CheckOptions, CheckOptionsBuilder, CheckResponse, ClientConfig, DEFAULT_API_URL, Finding, LanguageToolClient,
    decode_response, filter_ignored,
};
pub use observe::{Event, NoopObserver, Observer, TracingObserver};
pub use parse::Document;
pub use render::{BlogcRenderer, Renderer};
pub use role::Role;
pub use settings::{Settings, SettingsSource, merge_lists};
#[doc(hidden)]
pub use walk::{collapse_whitespace, walk, walk_as_container, walk_as_content};
