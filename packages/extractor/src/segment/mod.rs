//! Article and transitory segmentation.
//!
//! A regulation body is split in two independent passes whose results are
//! concatenated:
//!
//! 1. every `Artículo N.-` heading opens an article running up to the next
//!    heading (or the end of the text);
//! 2. from the start of the transitory section, every item marker
//!    (`Primero.-`, `II.`, `3.-`) opens a transitory provision.
//!
//! Finding no span in either pass is a valid result.

mod patterns;
mod transitory;

use std::ops::Range;

use serde::Serialize;

use crate::config::SegmentConfig;
use crate::numbering::{normalize_article_number, normalize_transitory_ordinal};

use patterns::{ARTICLE_HEADING, TRANSITORY_ITEM};
pub use transitory::{locate_transitory_section, SectionAnchor, TransitorySection};

/// Which pass produced a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Article,
    Transitory,
}

/// One labelled span of a regulation body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub kind: SegmentKind,

    /// Canonical label: `14-BIS` or `Transitorio Primero`.
    pub label: String,

    /// Trimmed text between this heading and the next.
    pub body: String,

    /// Byte range in the source text, from heading start to body end.
    pub span: Range<usize>,
}

/// A heading found in the text, before bodies are sliced.
struct Heading {
    start: usize,
    body_start: usize,
    label: String,
}

/// Splits full text into article and transitory segments.
///
/// An article body normally runs up to the next article heading or the end
/// of the text. With `clip_articles_at_transitories` on (the default), the
/// last article before a standalone transitory heading instead ends at that
/// heading, so its body no longer carries the transitory provisions. Turn
/// the flag off to keep the unclipped bodies.
#[derive(Debug, Clone, Default)]
pub struct ArticleSegmenter {
    config: SegmentConfig,
}

impl ArticleSegmenter {
    #[must_use]
    pub fn new(config: SegmentConfig) -> Self {
        Self { config }
    }

    /// Segment `text`: articles first, then transitories.
    #[must_use]
    pub fn segment(&self, text: &str) -> Vec<Segment> {
        let section = locate_transitory_section(text);
        let clip_at = section
            .filter(|s| self.config.clip_articles_at_transitories && s.anchor == SectionAnchor::Heading)
            .map(|s| s.offset);

        let mut segments = self.articles(text, clip_at);
        if let Some(section) = section {
            segments.extend(self.transitories(text, section.offset));
        }

        tracing::debug!(
            articles = segments.iter().filter(|s| s.kind == SegmentKind::Article).count(),
            transitories = segments.iter().filter(|s| s.kind == SegmentKind::Transitory).count(),
            "Segmented text"
        );
        segments
    }

    /// Pass 1. With `clip_at`, a span containing that offset ends there.
    fn articles(&self, text: &str, clip_at: Option<usize>) -> Vec<Segment> {
        let headings = ARTICLE_HEADING
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let token = caps.get(1)?;
                Some(Heading {
                    start: whole.start(),
                    body_start: whole.end(),
                    label: normalize_article_number(token.as_str()),
                })
            })
            .collect::<Vec<_>>();

        slice_bodies(text, headings, SegmentKind::Article, |start, end| match clip_at {
            Some(clip) if start < clip && clip < end => clip,
            _ => end,
        })
    }

    /// Pass 2, from the transitory section start onwards.
    fn transitories(&self, text: &str, offset: usize) -> Vec<Segment> {
        let headings = TRANSITORY_ITEM
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let token = caps.get(1)?;
                (whole.start() >= offset).then(|| Heading {
                    start: whole.start(),
                    body_start: whole.end(),
                    label: format!("Transitorio {}", normalize_transitory_ordinal(token.as_str())),
                })
            })
            .collect::<Vec<_>>();

        slice_bodies(text, headings, SegmentKind::Transitory, |_, end| end)
    }
}

/// Cut each heading's body up to the next heading start, letting `bound`
/// shorten a span. Empty bodies are dropped.
fn slice_bodies(
    text: &str,
    headings: Vec<Heading>,
    kind: SegmentKind,
    bound: impl Fn(usize, usize) -> usize,
) -> Vec<Segment> {
    let ends = headings
        .iter()
        .skip(1)
        .map(|h| h.start)
        .chain(std::iter::once(text.len()))
        .collect::<Vec<_>>();

    headings
        .into_iter()
        .zip(ends)
        .filter_map(|(heading, next_start)| {
            let end = bound(heading.start, next_start).max(heading.body_start);
            let body = text[heading.body_start..end].trim();
            if body.is_empty() {
                tracing::debug!(label = %heading.label, "Dropping empty segment");
                return None;
            }
            Some(Segment {
                kind,
                label: heading.label,
                body: body.to_string(),
                span: heading.start..end,
            })
        })
        .collect()
}
