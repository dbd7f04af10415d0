//! Title scanner for amendment notices.

use regex::Regex;
use std::sync::LazyLock;

use super::scanner::{LineAction, TitleScanner};
use super::{uppercase_ratio, TitleStrategy, BOILERPLATE_LINE, SECTION_LINE};
use crate::config::TitleConfig;

/// Opening phrases of an amendment title.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static TITLE_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^\s*(?:",
        r"ley\s+general\s+de\b|reglamento\s+de\b|disposiciones\s+de\s+car[aá]cter\s+general\b",
        r"|lineamientos\s+para\b|acuerdo\s+por\s+el\s+que\b|constituci[oó]n\b",
        r"|resoluci[oó]n\s+modificatoria\b|resoluci[oó]n\s+que\s+modifica\b",
        r"|general\s+law\s+of\b|regulations?\s+of\b|general\s+provisions\b",
        r"|guidelines\s+for\b|agreement\s+by\s+which\b|constitution\b",
        r"|amending\s+resolution\b|resolution\s+(?:that|which)\s+(?:amends|modifies)\b",
        r")",
    ))
    .expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ARTICLE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:(?:art[íi]culos?|articles?)\b|art\.)").expect("valid regex")
});

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static TRANSITORY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:transitorios?|transitor(?:y|ies))\b").expect("valid regex")
});

/// Finds the amendment title on the first page.
///
/// The title starts at the first line opening with a known phrase and runs
/// for at most `max_amendment_lines` lines. It ends early at a blank,
/// boilerplate, section, article or transitory line, and after the first
/// mostly-lowercase continuation line.
#[derive(Debug, Clone)]
pub struct AmendmentTitleStrategy {
    config: TitleConfig,
}

impl AmendmentTitleStrategy {
    #[must_use]
    pub fn new(config: TitleConfig) -> Self {
        Self { config }
    }

    fn is_noise(line: &str) -> bool {
        BOILERPLATE_LINE.is_match(line) || SECTION_LINE.is_match(line)
    }

    fn continuation(&self, line: &str) -> LineAction {
        if line.is_empty()
            || Self::is_noise(line)
            || ARTICLE_LINE.is_match(line)
            || TRANSITORY_LINE.is_match(line)
        {
            return LineAction::Stop;
        }
        if uppercase_ratio(line) < self.config.continuation_ratio && !TITLE_START.is_match(line) {
            return LineAction::AppendAndStop;
        }
        LineAction::Append
    }
}

impl TitleStrategy for AmendmentTitleStrategy {
    fn detect(&self, first_page: &str, _full_text: &str) -> Option<String> {
        let mut lines = first_page.lines().map(str::trim);

        let start = lines
            .by_ref()
            .filter(|line| !line.is_empty() && !Self::is_noise(line))
            .find(|line| TITLE_START.is_match(line))?;

        TitleScanner::new()
            .with_max_lines(self.config.max_amendment_lines)
            .seeded(start)
            .run(lines, |line, _| self.continuation(line))
            .into_title()
    }
}
