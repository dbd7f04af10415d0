//! Generic title scanner for principal regulations and annexes.

use super::scanner::{LineAction, TitleScanner};
use super::{uppercase_ratio, TitleStrategy, BOILERPLATE_LINE};
use crate::config::TitleConfig;

/// Takes the first block of title-like lines.
///
/// A line is title-like when most of its letters are uppercase or when it
/// contains a normative keyword. Blank and boilerplate lines are skipped
/// before the block starts and end it afterwards; the first other line ends
/// it too. The first page is scanned first, then the opening characters of
/// the full text.
#[derive(Debug, Clone)]
pub struct GenericTitleStrategy {
    config: TitleConfig,
}

impl GenericTitleStrategy {
    #[must_use]
    pub fn new(config: TitleConfig) -> Self {
        Self { config }
    }

    fn is_title_like(&self, line: &str) -> bool {
        if uppercase_ratio(line) > self.config.uppercase_ratio {
            return true;
        }
        let lower = line.to_lowercase();
        self.config
            .normative_keywords
            .iter()
            .any(|keyword| lower.contains(keyword.as_str()))
    }

    fn decide(&self, line: &str, accumulated: &[&str]) -> LineAction {
        let end_or_skip = if accumulated.is_empty() {
            LineAction::Skip
        } else {
            LineAction::Stop
        };

        if line.is_empty() || BOILERPLATE_LINE.is_match(line) {
            return end_or_skip;
        }
        if self.is_title_like(line) {
            return LineAction::Append;
        }
        end_or_skip
    }

    /// Scan one text. A block still containing a masthead phrase is dropped.
    fn scan(&self, text: &str) -> Option<String> {
        let title = TitleScanner::new()
            .run(text.lines().map(str::trim), |line, acc| self.decide(line, acc))
            .into_title()?;

        let lower = title.to_lowercase();
        if self
            .config
            .masthead_phrases
            .iter()
            .any(|phrase| lower.contains(phrase.as_str()))
        {
            tracing::debug!(title = %title, "Discarding title block containing masthead");
            return None;
        }
        Some(title)
    }
}

/// First `max_chars` characters of `text`, cut on a character boundary.
fn char_prefix(text: &str, max_chars: usize) -> &str {
    text.char_indices()
        .nth(max_chars)
        .map_or(text, |(idx, _)| &text[..idx])
}

impl TitleStrategy for GenericTitleStrategy {
    fn detect(&self, first_page: &str, full_text: &str) -> Option<String> {
        self.scan(first_page)
            .or_else(|| self.scan(char_prefix(full_text, self.config.fallback_chars)))
    }
}
