//! Extraction pipeline.
//!
//! Orchestrates one input at a time: acquire text, detect title and date,
//! segment or link, then persist inside a single transaction. Batches are
//! processed sequentially and one failing input never stops the rest.

mod report;

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;

use crate::classify::classify;
use crate::config::ExtractorConfig;
use crate::dates::{date_from_filename, latest_date};
use crate::error::Result;
use crate::linker::{resolve_annex_target, resolve_target};
use crate::scan::collect_inputs;
use crate::segment::{ArticleSegmenter, Segment};
use crate::source::TextSource;
use crate::store::{with_transaction, Store};
use crate::title::TitleDetector;
use crate::types::{
    AmendmentRecord, AnnexRecord, ArticleRecord, DocumentKind, InstrumentType, NewDocument,
};

pub use report::{BatchReport, BatchSummary, ItemOutcome, ItemReport};

/// Detection results for one input, without persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub kind: DocumentKind,
    pub title: Option<String>,
    pub instrument_type: InstrumentType,
    pub publication_date: Option<NaiveDate>,
    pub filename_date: Option<NaiveDate>,
    /// Article and transitory segments; only computed for principal
    /// regulations.
    pub segments: Vec<Segment>,
}

/// Runs detection and persistence for each kind of input.
pub struct ExtractionPipeline<T, S> {
    source: T,
    store: S,
    config: ExtractorConfig,
    titles: TitleDetector,
    segmenter: ArticleSegmenter,
}

/// File name of a path, lossily decoded.
fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// File name without its extension.
fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl<T: TextSource, S: Store> ExtractionPipeline<T, S> {
    /// Create a pipeline owning its text source and store.
    #[must_use]
    pub fn new(source: T, store: S, config: ExtractorConfig) -> Self {
        let titles = TitleDetector::new(config.title.clone());
        let segmenter = ArticleSegmenter::new(config.segment.clone());
        Self {
            source,
            store,
            config,
            titles,
            segmenter,
        }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    #[must_use]
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Run detection on one input without touching the store.
    pub fn analyze(&self, kind: DocumentKind, path: &Path) -> Result<Analysis> {
        let text = self.source.get_text(path)?;
        let title = self.titles.detect(kind, &text.first_page, &text.full_text);
        let segments = match kind {
            DocumentKind::Principal => self.segmenter.segment(&text.full_text),
            DocumentKind::Amendment | DocumentKind::Annex => Vec::new(),
        };

        Ok(Analysis {
            kind,
            instrument_type: classify(title.as_deref()),
            title,
            publication_date: latest_date(&text.full_text),
            filename_date: date_from_filename(&file_name(path)),
            segments,
        })
    }

    /// Store a principal regulation and all of its segments.
    pub fn process_principal(&mut self, path: &Path) -> Result<ItemOutcome> {
        let text = self.source.get_text(path)?;

        let title = self
            .titles
            .detect(DocumentKind::Principal, &text.first_page, &text.full_text);
        let instrument_type = classify(title.as_deref());
        let publication_date = latest_date(&text.full_text);
        let segments = self.segmenter.segment(&text.full_text);

        let document = NewDocument {
            title: title.clone(),
            scope: self.config.scope.clone(),
            instrument_type,
            publication_date,
            issuer: self.config.issuer.clone(),
        };

        // Document and articles are written as one unit
        let document_id = with_transaction(&mut self.store, |store| {
            let document_id = store.insert_document(&document)?;
            for segment in &segments {
                store.insert_article(&ArticleRecord {
                    document_id,
                    number: segment.label.clone(),
                    body: segment.body.clone(),
                })?;
            }
            Ok(document_id)
        })?;

        tracing::info!(
            path = %path.display(),
            %document_id,
            title = title.as_deref().unwrap_or("<none>"),
            %instrument_type,
            articles = segments.len(),
            "Stored regulation"
        );

        Ok(ItemOutcome::Document {
            document_id,
            title,
            instrument_type,
            publication_date,
            articles: segments.len(),
        })
    }

    /// Store an amendment linked to the regulation it amends.
    ///
    /// An amendment without a detected title is titled after its file stem.
    /// Without a link target nothing is written and the outcome is
    /// [`ItemOutcome::Unlinked`].
    pub fn process_amendment(&mut self, path: &Path) -> Result<ItemOutcome> {
        let filename = file_name(path);
        let filename_date = date_from_filename(&filename);
        if filename_date.is_none() {
            tracing::warn!(path = %path.display(), "No YYYYMMDD date in file name, linking by text date");
        }

        let text = self.source.get_text(path)?;
        let title = self
            .titles
            .detect(DocumentKind::Amendment, &text.first_page, &text.full_text)
            .or_else(|| Some(file_stem(path)));
        let text_date = latest_date(&text.full_text);

        let Some(target) = resolve_target(&self.store, &filename, text_date)? else {
            let reason = format!(
                "no document published on {}",
                filename_date
                    .or(text_date)
                    .map_or_else(|| "an identifiable date".to_string(), |d| d.to_string())
            );
            tracing::warn!(path = %path.display(), %reason, "Skipping amendment");
            return Ok(ItemOutcome::Unlinked { reason });
        };

        let record = AmendmentRecord {
            document_id: target.document_id,
            title,
            full_text: text.full_text,
            publication_date: text_date.or(filename_date),
        };
        let record_id = with_transaction(&mut self.store, |store| store.insert_amendment(&record))?;

        tracing::info!(
            path = %path.display(),
            document_id = %target.document_id,
            link = ?target.source,
            "Stored amendment"
        );

        Ok(ItemOutcome::Amendment {
            record_id,
            document_id: target.document_id,
            link: target.source,
            title: record.title,
            publication_date: record.publication_date,
        })
    }

    /// Store an annex against the most recently published regulation.
    pub fn process_annex(&mut self, path: &Path) -> Result<ItemOutcome> {
        let text = self.source.get_text(path)?;
        let name = self
            .titles
            .detect(DocumentKind::Annex, &text.first_page, &text.full_text)
            .unwrap_or_else(|| file_stem(path));

        let Some(target) = resolve_annex_target(&self.store)? else {
            let reason = "no documents to attach the annex to".to_string();
            tracing::warn!(path = %path.display(), %reason, "Skipping annex");
            return Ok(ItemOutcome::Unlinked { reason });
        };

        let record = AnnexRecord {
            document_id: target.document_id,
            name,
            full_text: text.full_text,
        };
        let record_id = with_transaction(&mut self.store, |store| store.insert_annex(&record))?;

        tracing::info!(
            path = %path.display(),
            document_id = %target.document_id,
            name = %record.name,
            "Stored annex"
        );

        Ok(ItemOutcome::Annex {
            record_id,
            document_id: target.document_id,
            name: record.name,
        })
    }

    /// Process one input of the given kind, turning an error into a
    /// [`ItemOutcome::Failed`] outcome.
    pub fn process(&mut self, kind: DocumentKind, path: &Path) -> ItemReport {
        let result = match kind {
            DocumentKind::Principal => self.process_principal(path),
            DocumentKind::Amendment => self.process_amendment(path),
            DocumentKind::Annex => self.process_annex(path),
        };

        let outcome = result.unwrap_or_else(|e| {
            tracing::error!(path = %path.display(), %kind, error = %e, "Input skipped");
            ItemOutcome::Failed {
                error: e.to_string(),
            }
        });

        ItemReport {
            path: path.to_path_buf(),
            outcome,
        }
    }

    /// Process `inputs` in order, calling `on_item` after each one.
    pub fn run_inputs<F>(&mut self, kind: DocumentKind, inputs: &[PathBuf], mut on_item: F) -> BatchReport
    where
        F: FnMut(&ItemReport),
    {
        let mut report = BatchReport::new(kind);
        for path in inputs {
            let item = self.process(kind, path);
            on_item(&item);
            report.items.push(item);
        }

        let summary = report.summary();
        tracing::info!(
            %kind,
            stored = summary.stored,
            unlinked = summary.unlinked,
            failed = summary.failed,
            "Batch finished"
        );
        report
    }

    /// Process every accepted input under `root`.
    pub fn run_batch(&mut self, kind: DocumentKind, root: &Path) -> BatchReport {
        let inputs = collect_inputs(root, &self.config);
        self.run_inputs(kind, &inputs, |_| {})
    }
}
