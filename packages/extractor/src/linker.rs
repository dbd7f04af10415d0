//! Linking amendments and annexes to previously stored regulations.
//!
//! There is no explicit key between an amendment notice and the regulation
//! it amends, so the link goes through publication dates: first a date
//! token in the file name, then the date harvested from the text. Annexes
//! are attached to the most recently published regulation.

use chrono::NaiveDate;
use serde::Serialize;

use crate::dates::date_from_filename;
use crate::error::Result;
use crate::store::Store;
use crate::types::DocumentId;

/// Which strategy produced a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkSource {
    /// `YYYYMMDD` token in the file name.
    Filename,
    /// Latest date harvested from the text.
    TextDate,
    /// Most recently published document.
    MostRecent,
}

/// A resolved link target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LinkTarget {
    pub document_id: DocumentId,
    pub source: LinkSource,
}

/// Resolve the regulation an amendment belongs to.
///
/// Looks up a document published exactly on the file name date, then on
/// `harvested`. `Ok(None)` means no target: the caller must drop the
/// amendment rather than persist it unlinked.
///
/// # Arguments
/// * `store` - Store holding the already committed regulations
/// * `filename` - File name of the amendment, possibly carrying `YYYYMMDD`
/// * `harvested` - Publication date found in the amendment text
pub fn resolve_target<S>(
    store: &S,
    filename: &str,
    harvested: Option<NaiveDate>,
) -> Result<Option<LinkTarget>>
where
    S: Store + ?Sized,
{
    let candidates = [
        (date_from_filename(filename), LinkSource::Filename),
        (harvested, LinkSource::TextDate),
    ];

    for (date, source) in candidates {
        let Some(date) = date else {
            continue;
        };
        if let Some(document_id) = store.find_document_by_exact_date(date)? {
            tracing::debug!(filename, %date, %document_id, ?source, "Resolved link target");
            return Ok(Some(LinkTarget {
                document_id,
                source,
            }));
        }
    }

    Ok(None)
}

/// Resolve the regulation an annex is attached to: the most recently
/// published one, whatever its topic.
pub fn resolve_annex_target<S>(store: &S) -> Result<Option<LinkTarget>>
where
    S: Store + ?Sized,
{
    Ok(store
        .find_most_recent_document()?
        .map(|document_id| LinkTarget {
            document_id,
            source: LinkSource::MostRecent,
        }))
}
