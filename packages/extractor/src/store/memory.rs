//! In-process store.

use chrono::NaiveDate;

use super::Store;
use crate::error::{ExtractorError, Result};
use crate::types::{
    AmendmentRecord, AnnexRecord, ArticleRecord, DocumentId, NewDocument, RecordId,
    RegulatoryDocument,
};

#[derive(Debug, Clone, Default)]
struct Tables {
    documents: Vec<RegulatoryDocument>,
    articles: Vec<ArticleRecord>,
    amendments: Vec<AmendmentRecord>,
    annexes: Vec<AnnexRecord>,
}

/// Store kept entirely in memory.
///
/// Ids start at 1 per table. Rollback restores the snapshot taken at
/// `begin`. Writes referencing an unknown document are rejected the way a
/// foreign key would reject them.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Tables,
    snapshot: Option<Tables>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn documents(&self) -> &[RegulatoryDocument] {
        &self.tables.documents
    }

    #[must_use]
    pub fn articles(&self) -> &[ArticleRecord] {
        &self.tables.articles
    }

    #[must_use]
    pub fn amendments(&self) -> &[AmendmentRecord] {
        &self.tables.amendments
    }

    #[must_use]
    pub fn annexes(&self) -> &[AnnexRecord] {
        &self.tables.annexes
    }

    /// Articles of one document, in insertion order.
    pub fn articles_of(&self, document_id: DocumentId) -> impl Iterator<Item = &ArticleRecord> {
        self.tables
            .articles
            .iter()
            .filter(move |a| a.document_id == document_id)
    }

    fn require_document(&self, id: DocumentId) -> Result<()> {
        if self.tables.documents.iter().any(|d| d.id == id) {
            Ok(())
        } else {
            Err(ExtractorError::Constraint(format!(
                "document {id} does not exist"
            )))
        }
    }
}

fn next_id(len: usize) -> i64 {
    i64::try_from(len).map_or(i64::MAX, |n| n + 1)
}

impl Store for MemoryStore {
    fn begin(&mut self) -> Result<()> {
        if self.snapshot.is_some() {
            return Err(ExtractorError::Constraint(
                "transaction already open".to_string(),
            ));
        }
        self.snapshot = Some(self.tables.clone());
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        self.snapshot
            .take()
            .map(|_| ())
            .ok_or_else(|| ExtractorError::Constraint("no open transaction".to_string()))
    }

    fn rollback(&mut self) -> Result<()> {
        let snapshot = self
            .snapshot
            .take()
            .ok_or_else(|| ExtractorError::Constraint("no open transaction".to_string()))?;
        self.tables = snapshot;
        Ok(())
    }

    fn insert_document(&mut self, document: &NewDocument) -> Result<DocumentId> {
        let id = DocumentId(next_id(self.tables.documents.len()));
        self.tables
            .documents
            .push(RegulatoryDocument::from_new(id, document.clone()));
        Ok(id)
    }

    fn find_document_by_exact_date(&self, date: NaiveDate) -> Result<Option<DocumentId>> {
        Ok(self
            .tables
            .documents
            .iter()
            .filter(|d| d.publication_date == Some(date))
            .map(|d| d.id)
            .max())
    }

    fn find_most_recent_document(&self) -> Result<Option<DocumentId>> {
        Ok(self
            .tables
            .documents
            .iter()
            .max_by_key(|d| (d.publication_date, d.id))
            .map(|d| d.id))
    }

    fn insert_article(&mut self, article: &ArticleRecord) -> Result<RecordId> {
        self.require_document(article.document_id)?;
        let id = RecordId(next_id(self.tables.articles.len()));
        self.tables.articles.push(article.clone());
        Ok(id)
    }

    fn insert_amendment(&mut self, amendment: &AmendmentRecord) -> Result<RecordId> {
        self.require_document(amendment.document_id)?;
        let id = RecordId(next_id(self.tables.amendments.len()));
        self.tables.amendments.push(amendment.clone());
        Ok(id)
    }

    fn insert_annex(&mut self, annex: &AnnexRecord) -> Result<RecordId> {
        self.require_document(annex.document_id)?;
        let id = RecordId(next_id(self.tables.annexes.len()));
        self.tables.annexes.push(annex.clone());
        Ok(id)
    }
}
