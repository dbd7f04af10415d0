//! Text acquisition from input files.
//!
//! A [`TextSource`] turns an input path into the text of its first page and
//! of the whole document. Failure to open or parse an input is reported as
//! [`ExtractorError::InputUnreadable`]; the pipeline skips such inputs.
//!
//! All text is NFC-normalized so that accented keywords match regardless of
//! how the producer encoded them.

use std::path::Path;

use lopdf::Document;
use unicode_normalization::UnicodeNormalization;

use crate::error::{ExtractorError, Result};

/// Page separator in plain-text inputs.
pub const FORM_FEED: char = '\x0c';

/// Text of one input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceText {
    pub first_page: String,
    pub full_text: String,
}

impl SourceText {
    /// Build from page texts: the first page, and all pages joined by `\n`.
    #[must_use]
    pub fn from_pages<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let pages = pages
            .into_iter()
            .map(|page| page.as_ref().nfc().collect::<String>())
            .collect::<Vec<_>>();
        Self {
            first_page: pages.first().cloned().unwrap_or_default(),
            full_text: pages.join("\n"),
        }
    }
}

/// Supplies first-page and full-document text for an input.
pub trait TextSource {
    fn get_text(&self, path: &Path) -> Result<SourceText>;
}

/// Extracts text from PDF files with lopdf.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextSource;

impl TextSource for PdfTextSource {
    fn get_text(&self, path: &Path) -> Result<SourceText> {
        let document = Document::load(path).map_err(|e| ExtractorError::unreadable(path, e))?;

        let pages = document
            .get_pages()
            .into_keys()
            .map(|number| {
                document.extract_text(&[number]).unwrap_or_else(|e| {
                    tracing::warn!(path = %path.display(), page = number, error = %e, "Page text extraction failed");
                    String::new()
                })
            })
            .collect::<Vec<_>>();

        tracing::debug!(path = %path.display(), pages = pages.len(), "Extracted PDF text");
        Ok(SourceText::from_pages(pages))
    }
}

/// Reads UTF-8 text files; form feeds separate pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextSource;

impl TextSource for PlainTextSource {
    fn get_text(&self, path: &Path) -> Result<SourceText> {
        let text = std::fs::read_to_string(path).map_err(|e| ExtractorError::unreadable(path, e))?;
        Ok(SourceText::from_pages(text.split(FORM_FEED)))
    }
}

/// Picks the PDF or plain-text source by file extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileTextSource {
    pdf: PdfTextSource,
    plain: PlainTextSource,
}

impl FileTextSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn is_pdf(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
    }
}

impl TextSource for FileTextSource {
    fn get_text(&self, path: &Path) -> Result<SourceText> {
        if Self::is_pdf(path) {
            self.pdf.get_text(path)
        } else {
            self.plain.get_text(path)
        }
    }
}
