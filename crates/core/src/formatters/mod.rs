pub mod json;
pub mod text;

pub use json::{JsonConfig, JsonFormatter, JsonReport, findings_to_json};
pub use text::{TextReport, findings_to_text};
