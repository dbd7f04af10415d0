//! Per-input outcomes and batch reports.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Serialize;

use crate::linker::LinkSource;
use crate::types::{DocumentId, DocumentKind, InstrumentType, RecordId};

/// What happened to one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ItemOutcome {
    /// A principal regulation and its articles were stored.
    Document {
        document_id: DocumentId,
        title: Option<String>,
        instrument_type: InstrumentType,
        publication_date: Option<NaiveDate>,
        articles: usize,
    },

    /// An amendment was stored against an existing regulation.
    Amendment {
        record_id: RecordId,
        document_id: DocumentId,
        link: LinkSource,
        title: Option<String>,
        publication_date: Option<NaiveDate>,
    },

    /// An annex was stored against the most recent regulation.
    Annex {
        record_id: RecordId,
        document_id: DocumentId,
        name: String,
    },

    /// No regulation to link to; nothing was written.
    Unlinked { reason: String },

    /// The input was skipped after an error; nothing was written.
    Failed { error: String },
}

impl ItemOutcome {
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Outcome of one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: ItemOutcome,
}

/// Outcomes of a batch, in processing order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub kind: DocumentKind,
    pub items: Vec<ItemReport>,
}

/// Outcome tallies of a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub stored: usize,
    pub unlinked: usize,
    pub failed: usize,
}

impl BatchReport {
    #[must_use]
    pub fn new(kind: DocumentKind) -> Self {
        Self {
            kind,
            items: Vec::new(),
        }
    }

    #[must_use]
    pub fn summary(&self) -> BatchSummary {
        self.items
            .iter()
            .fold(BatchSummary::default(), |mut summary, item| {
                match item.outcome {
                    ItemOutcome::Unlinked { .. } => summary.unlinked += 1,
                    ItemOutcome::Failed { .. } => summary.failed += 1,
                    _ => summary.stored += 1,
                }
                summary
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let mut report = BatchReport::new(DocumentKind::Annex);
        report.items.push(ItemReport {
            path: PathBuf::from("a.pdf"),
            outcome: ItemOutcome::Annex {
                record_id: RecordId(1),
                document_id: DocumentId(1),
                name: "Anexo 1".to_string(),
            },
        });
        report.items.push(ItemReport {
            path: PathBuf::from("b.pdf"),
            outcome: ItemOutcome::Unlinked {
                reason: "no documents".to_string(),
            },
        });
        report.items.push(ItemReport {
            path: PathBuf::from("c.pdf"),
            outcome: ItemOutcome::Failed {
                error: "boom".to_string(),
            },
        });

        assert_eq!(
            report.summary(),
            BatchSummary {
                stored: 1,
                unlinked: 1,
                failed: 1,
            }
        );
    }

    #[test]
    fn test_item_report_json_shape() {
        let item = ItemReport {
            path: PathBuf::from("in/ley.txt"),
            outcome: ItemOutcome::Failed {
                error: "Cannot read input".to_string(),
            },
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["path"], "in/ley.txt");
        assert_eq!(json["outcome"], "failed");
        assert_eq!(json["error"], "Cannot read input");
    }
}
