//! Dry-run wrapper.

use chrono::NaiveDate;

use super::Store;
use crate::error::Result;
use crate::types::{AmendmentRecord, AnnexRecord, ArticleRecord, DocumentId, NewDocument, RecordId};

/// Reads go to the wrapped store; writes are logged and dropped.
///
/// Every write returns [`DocumentId::DRY_RUN`] or [`RecordId::DRY_RUN`].
/// Documents "written" during a dry run are therefore never visible to
/// later lookups.
#[derive(Debug, Clone, Default)]
pub struct DryRunStore<S> {
    inner: S,
}

impl<S: Store> DryRunStore<S> {
    #[must_use]
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    #[must_use]
    pub fn inner(&self) -> &S {
        &self.inner
    }

    #[must_use]
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: Store> Store for DryRunStore<S> {
    fn begin(&mut self) -> Result<()> {
        self.inner.begin()
    }

    fn commit(&mut self) -> Result<()> {
        self.inner.commit()
    }

    fn rollback(&mut self) -> Result<()> {
        self.inner.rollback()
    }

    fn insert_document(&mut self, document: &NewDocument) -> Result<DocumentId> {
        tracing::info!(
            title = ?document.title,
            instrument_type = %document.instrument_type,
            publication_date = ?document.publication_date,
            "[dry run] insert document"
        );
        Ok(DocumentId::DRY_RUN)
    }

    fn find_document_by_exact_date(&self, date: NaiveDate) -> Result<Option<DocumentId>> {
        self.inner.find_document_by_exact_date(date)
    }

    fn find_most_recent_document(&self) -> Result<Option<DocumentId>> {
        self.inner.find_most_recent_document()
    }

    fn insert_article(&mut self, article: &ArticleRecord) -> Result<RecordId> {
        tracing::info!(
            document_id = %article.document_id,
            number = %article.number,
            chars = article.body.chars().count(),
            "[dry run] insert article"
        );
        Ok(RecordId::DRY_RUN)
    }

    fn insert_amendment(&mut self, amendment: &AmendmentRecord) -> Result<RecordId> {
        tracing::info!(
            document_id = %amendment.document_id,
            title = ?amendment.title,
            publication_date = ?amendment.publication_date,
            "[dry run] insert amendment"
        );
        Ok(RecordId::DRY_RUN)
    }

    fn insert_annex(&mut self, annex: &AnnexRecord) -> Result<RecordId> {
        tracing::info!(
            document_id = %annex.document_id,
            name = %annex.name,
            "[dry run] insert annex"
        );
        Ok(RecordId::DRY_RUN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::types::InstrumentType;

    fn document(date: Option<NaiveDate>) -> NewDocument {
        NewDocument {
            title: None,
            scope: "Federal".to_string(),
            instrument_type: InstrumentType::Other,
            publication_date: date,
            issuer: "CNBV".to_string(),
        }
    }

    #[test]
    fn test_writes_return_sentinels_and_persist_nothing() {
        let mut store = DryRunStore::new(MemoryStore::new());
        let id = store.insert_document(&document(None)).unwrap();
        assert!(id.is_dry_run());

        let record = store
            .insert_article(&ArticleRecord {
                document_id: id,
                number: "1".to_string(),
                body: "Texto.".to_string(),
            })
            .unwrap();
        assert_eq!(record, RecordId::DRY_RUN);
        assert!(store.inner().documents().is_empty());
        assert!(store.inner().articles().is_empty());
    }

    #[test]
    fn test_reads_delegate_to_inner() {
        let mut inner = MemoryStore::new();
        let date = NaiveDate::from_ymd_opt(2022, 3, 1).unwrap();
        let existing = inner.insert_document(&document(Some(date))).unwrap();

        let store = DryRunStore::new(inner);
        assert_eq!(store.find_document_by_exact_date(date).unwrap(), Some(existing));
        assert_eq!(store.find_most_recent_document().unwrap(), Some(existing));
    }

    #[test]
    fn test_transactions_delegate() {
        let mut store = DryRunStore::new(MemoryStore::new());
        store.begin().unwrap();
        store.commit().unwrap();
        // The inner store saw the transaction close
        assert!(store.commit().is_err());
    }
}
