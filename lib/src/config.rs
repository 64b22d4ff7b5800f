use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_EXTENSION: &str = "cs";
pub const DEFAULT_COMMENT: &str = "//";
pub const DEFAULT_SENTINEL: &str = "// ---";
pub const DEFAULT_TOOL_MARKER: &str = "McpServerTool";
pub const DEFAULT_LOOKAHEAD: usize = 9;
pub const DEFAULT_DESCRIPTION: &str = "No description available";

/// Everything the extractor needs to know about the sample sources. Every
/// field has a default, so an empty TOML table is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Extension, without the dot, of the files to catalog.
    pub extension: String,
    /// Single-line comment marker prefixing every front matter line.
    pub comment: String,
    /// The line, once trimmed, that opens and closes the front matter.
    pub sentinel: String,
    /// Attribute token that marks a tool declaration.
    pub tool_marker: String,
    /// How many lines after a tool attribute may hold its method signature.
    pub lookahead: usize,
    /// Description used when a file doesn't declare one.
    pub fallback_description: String,
    pub on_duplicate: OnDuplicate,
    /// Overrides today's date as the `lastUpdated` fallback.
    pub build_date: Option<NaiveDate>,
}

/// What to do when two files resolve to the same catalog id.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OnDuplicate {
    /// The file scanned last replaces the earlier record.
    #[default]
    Replace,
    /// Abort the scan.
    Error,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        ExtractorConfig {
            extension: DEFAULT_EXTENSION.into(),
            comment: DEFAULT_COMMENT.into(),
            sentinel: DEFAULT_SENTINEL.into(),
            tool_marker: DEFAULT_TOOL_MARKER.into(),
            lookahead: DEFAULT_LOOKAHEAD,
            fallback_description: DEFAULT_DESCRIPTION.into(),
            on_duplicate: OnDuplicate::default(),
            build_date: None,
        }
    }
}

impl ExtractorConfig {
    /// The configured build date, or today's date in UTC.
    pub fn build_date(&self) -> NaiveDate {
        self.build_date.unwrap_or_else(|| Utc::now().date_naive())
    }
}
