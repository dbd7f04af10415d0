//! Configuration constants and the immutable extractor configuration.
//!
//! Every tunable (thresholds, keyword lists, feature flags) lives in
//! [`ExtractorConfig`], which is built once and handed to the components at
//! construction. Nothing here is process-wide mutable state.

use std::path::Path;

use serde::Deserialize;

use crate::error::{ExtractorError, Result};

/// Default scope recorded on every principal regulation.
pub const DEFAULT_SCOPE: &str = "Federal";

/// Default issuing authority recorded on every principal regulation.
pub const DEFAULT_ISSUER: &str = "Comisión Nacional Bancaria y de Valores";

/// Default SQLite database path used by the CLI.
pub const DEFAULT_DATABASE_PATH: &str = "normativa.db";

/// Number of characters of the full text scanned when the first page yields
/// no title.
pub const TITLE_FALLBACK_CHARS: usize = 12_000;

/// Maximum number of lines assembled into an amendment title.
pub const AMENDMENT_TITLE_MAX_LINES: usize = 6;

/// Settings for both title scanners.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TitleConfig {
    /// A line is title-like when the share of uppercase letters exceeds this.
    pub uppercase_ratio: f64,

    /// Below this share an amendment title continuation ends the title.
    pub continuation_ratio: f64,

    /// Maximum lines in an amendment title.
    pub max_amendment_lines: usize,

    /// Characters of full text scanned when the first page has no title.
    pub fallback_chars: usize,

    /// Lower-case substrings that mark a line as part of a normative title.
    pub normative_keywords: Vec<String>,

    /// Lower-case phrases that disqualify an assembled generic title.
    pub masthead_phrases: Vec<String>,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            uppercase_ratio: 0.6,
            continuation_ratio: 0.45,
            max_amendment_lines: AMENDMENT_TITLE_MAX_LINES,
            fallback_chars: TITLE_FALLBACK_CHARS,
            normative_keywords: [
                "disposiciones",
                "ley",
                "reglamento",
                "lineamientos",
                "resolución",
                "resolucion",
                "acuerdo",
                "código",
                "codigo",
                "provisions",
                "law",
                "regulation",
                "rules",
                "guidelines",
                "resolution",
                "agreement",
                "code",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            masthead_phrases: vec!["diario oficial".to_string(), "official gazette".to_string()],
        }
    }
}

/// Settings for the article segmenter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SegmentConfig {
    /// End an article span at a standalone transitory heading it contains.
    pub clip_articles_at_transitories: bool,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            clip_articles_at_transitories: true,
        }
    }
}

/// Complete extractor configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Scope recorded on principal regulations.
    pub scope: String,

    /// Issuer recorded on principal regulations.
    pub issuer: String,

    /// File extensions (case-insensitive, without dot) picked up by scans.
    pub input_extensions: Vec<String>,

    pub title: TitleConfig,

    pub segment: SegmentConfig,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            scope: DEFAULT_SCOPE.to_string(),
            issuer: DEFAULT_ISSUER.to_string(),
            input_extensions: vec!["pdf".to_string(), "txt".to_string()],
            title: TitleConfig::default(),
            segment: SegmentConfig::default(),
        }
    }
}

impl ExtractorConfig {
    /// Parse a configuration from YAML. Missing keys take their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Override the scope.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Override the issuer.
    #[must_use]
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Check value ranges.
    ///
    /// # Returns
    /// * `Ok(())` if every value is usable
    /// * `Err(ExtractorError::InvalidConfig)` naming the first offending key
    pub fn validate(&self) -> Result<()> {
        for (name, ratio) in [
            ("title.uppercase_ratio", self.title.uppercase_ratio),
            ("title.continuation_ratio", self.title.continuation_ratio),
        ] {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(ExtractorError::InvalidConfig(format!(
                    "{name} must be within 0..=1, got {ratio}"
                )));
            }
        }
        if self.title.max_amendment_lines == 0 {
            return Err(ExtractorError::InvalidConfig(
                "title.max_amendment_lines must be at least 1".to_string(),
            ));
        }
        if self.title.fallback_chars == 0 {
            return Err(ExtractorError::InvalidConfig(
                "title.fallback_chars must be at least 1".to_string(),
            ));
        }
        if self.input_extensions.is_empty() {
            return Err(ExtractorError::InvalidConfig(
                "input_extensions must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether a path carries one of the configured input extensions.
    #[must_use]
    pub fn accepts_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.input_extensions
                    .iter()
                    .any(|accepted| accepted.eq_ignore_ascii_case(ext))
            })
    }
}
