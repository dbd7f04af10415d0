//! Title detection for regulations, amendments and annexes.
//!
//! Two strategies assemble a title from the opening lines of a document:
//!
//! - [`GenericTitleStrategy`] for principal regulations and annexes: takes
//!   the first block of uppercase or keyword-bearing lines.
//! - [`AmendmentTitleStrategy`] for amendment notices: looks for a known
//!   opening phrase on the first page and takes up to six lines from there.
//!
//! Both are driven by the [`TitleScanner`] state machine.

mod amendment;
mod generic;
mod scanner;

use regex::Regex;
use std::sync::LazyLock;

use crate::config::TitleConfig;
use crate::types::DocumentKind;

pub use amendment::AmendmentTitleStrategy;
pub use generic::GenericTitleStrategy;
pub use scanner::{LineAction, ScanState, TitleScanner};

/// Masthead, index and publication lines that never belong to a title.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub(crate) static BOILERPLATE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:índice|indice|index\b|al\s+marg[eé]n|in\s+the\s+margin|publicad[oa]s?\s+en|published\s+in|diario\s+oficial|official\s+gazette)",
    )
    .expect("valid regex")
});

/// Gazette section markers, boilerplate on amendment first pages.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub(crate) static SECTION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\(?\s*(?:(?:primera|segunda|tercera)\s+secci[oó]n|(?:first|second|third)\s+section)\s*\)?",
    )
    .expect("valid regex")
});

/// Trait for title detection strategies.
pub trait TitleStrategy {
    /// Assemble a title from a document's first page and full text.
    ///
    /// `None` means no title was detected, which is a valid outcome.
    fn detect(&self, first_page: &str, full_text: &str) -> Option<String>;
}

/// Share of alphabetic characters that are not lowercase.
///
/// Lines without letters score 0.0.
#[must_use]
pub fn uppercase_ratio(line: &str) -> f64 {
    let (letters, upper) = line
        .chars()
        .filter(|c| c.is_alphabetic())
        .fold((0usize, 0usize), |(letters, upper), c| {
            (letters + 1, upper + usize::from(!c.is_lowercase()))
        });
    if letters == 0 {
        0.0
    } else {
        upper as f64 / letters as f64
    }
}

/// Picks the title strategy for each kind of document.
#[derive(Debug, Clone)]
pub struct TitleDetector {
    generic: GenericTitleStrategy,
    amendment: AmendmentTitleStrategy,
}

impl TitleDetector {
    /// Create a detector from title settings.
    #[must_use]
    pub fn new(config: TitleConfig) -> Self {
        Self {
            generic: GenericTitleStrategy::new(config.clone()),
            amendment: AmendmentTitleStrategy::new(config),
        }
    }

    /// Strategy used for a kind of document.
    #[must_use]
    pub fn strategy(&self, kind: DocumentKind) -> &dyn TitleStrategy {
        match kind {
            DocumentKind::Principal | DocumentKind::Annex => &self.generic,
            DocumentKind::Amendment => &self.amendment,
        }
    }

    /// Detect the title of a document of the given kind.
    #[must_use]
    pub fn detect(&self, kind: DocumentKind, first_page: &str, full_text: &str) -> Option<String> {
        let title = self.strategy(kind).detect(first_page, full_text);
        if title.is_none() {
            tracing::debug!(kind = %kind, "No title detected");
        }
        title
    }
}

impl Default for TitleDetector {
    fn default() -> Self {
        Self::new(TitleConfig::default())
    }
}
