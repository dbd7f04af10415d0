//! Line-anchored heading and marker patterns.

use regex::Regex;
use std::sync::LazyLock;

use crate::numbering::ORDINAL_WORDS;

const SUFFIXES: &str = r"bis|ter|qu[áa]ter|quinquies|sexies|septies|octies|nonies|decies|[a-z]";

/// Article heading: keyword, numbering token (group 1), separator.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub(crate) static ARTICLE_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?im)^[ \t]*(?:art[íi]culo|article|art\.)[ \t]+(\d{{1,4}}[º°ª]?(?:[ \t]*(?:{SUFFIXES}))?|(?-i:[IVXLCDM]+)(?:[ \t]*(?:{SUFFIXES}))?)[ \t]*[.\-–—:]{{1,2}}(?:[ \t]+|[ \t]*\r?\n)"
    ))
    .expect("valid regex")
});

/// A line holding nothing but the transitory section heading.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub(crate) static TRANSITORY_HEADING_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?im)^[ \t]*(?:art[íi]culos?[ \t]+|articles?[ \t]+)?(?:transitorios?|transitor(?:y|ies))[ \t]*:?[ \t\r]*$",
    )
    .expect("valid regex")
});

/// The transitory keyword anywhere.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub(crate) static TRANSITORY_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:transitorios?|transitor(?:y|ies))\b").expect("valid regex")
});

/// Transitory item marker: ordinal word, Roman numeral in either case or
/// small decimal (group 1), then a separator.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
pub(crate) static TRANSITORY_ITEM: LazyLock<Regex> = LazyLock::new(|| {
    let words = ORDINAL_WORDS
        .iter()
        .map(|(word, _)| regex::escape(word))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(
        r"(?im)^[ \t]*((?:{words})\b|[ivxlcdm]+|\d{{1,3}})[ \t]*[.\-–—:]{{1,2}}(?:[ \t]+|[ \t]*\r?\n)"
    ))
    .expect("valid regex")
});
