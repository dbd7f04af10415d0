//! Locating the transitory section.

use serde::Serialize;

use super::patterns::{TRANSITORY_HEADING_LINE, TRANSITORY_ITEM, TRANSITORY_WORD};

/// How the start of the transitory section was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionAnchor {
    /// A line holding only the section heading.
    Heading,
    /// The first bare occurrence of the keyword.
    Keyword,
    /// The first item marker in the text.
    FirstMarker,
}

/// Start of the transitory section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransitorySection {
    /// Byte offset where item markers start being collected.
    pub offset: usize,
    pub anchor: SectionAnchor,
}

/// Find where the transitory section starts.
///
/// Prefers a standalone heading line, then the first bare keyword, then
/// the first item marker anywhere. `None` when the text has none of them.
#[must_use]
pub fn locate_transitory_section(text: &str) -> Option<TransitorySection> {
    let section = |offset: usize, anchor| TransitorySection { offset, anchor };

    TRANSITORY_HEADING_LINE
        .find(text)
        .map(|m| section(m.start(), SectionAnchor::Heading))
        .or_else(|| {
            TRANSITORY_WORD
                .find(text)
                .map(|m| section(m.start(), SectionAnchor::Keyword))
        })
        .or_else(|| {
            TRANSITORY_ITEM
                .find(text)
                .map(|m| section(m.start(), SectionAnchor::FirstMarker))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_preferred_over_earlier_keyword() {
        let text = "Artículo 1.- Régimen transitorio.\nTRANSITORIOS\nPrimero.- Vigencia.";
        let section = locate_transitory_section(text).unwrap();
        assert_eq!(section.anchor, SectionAnchor::Heading);
        assert_eq!(section.offset, text.find("TRANSITORIOS").unwrap());
    }

    #[test]
    fn test_keyword_fallback() {
        let text = "Disposiciones transitorias y transitorios\nÚnico.- Vigencia.";
        let section = locate_transitory_section(text).unwrap();
        assert_eq!(section.anchor, SectionAnchor::Keyword);
        assert_eq!(section.offset, text.find("transitorios").unwrap());
    }

    #[test]
    fn test_first_marker_fallback() {
        let text = "Preámbulo\nSEGUNDO.- Texto.";
        let section = locate_transitory_section(text).unwrap();
        assert_eq!(section.anchor, SectionAnchor::FirstMarker);
        assert_eq!(section.offset, text.find("SEGUNDO").unwrap());
    }

    #[test]
    fn test_absent() {
        assert_eq!(locate_transitory_section("Texto corrido sin secciones."), None);
        assert_eq!(locate_transitory_section(""), None);
    }
}
