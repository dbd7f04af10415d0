//! Persistence for the structured corpus.
//!
//! The [`Store`] trait is the only way the pipeline touches persisted
//! state. Three implementations are provided:
//!
//! - [`SqliteStore`]: relational storage in a SQLite file
//! - [`MemoryStore`]: in-process storage for tests and inspection
//! - [`DryRunStore`]: wraps another store, reads through it and turns every
//!   write into a logged no-op returning a sentinel id

mod dry_run;
mod memory;
mod sqlite;

use chrono::NaiveDate;

use crate::error::Result;
use crate::types::{AmendmentRecord, AnnexRecord, ArticleRecord, DocumentId, NewDocument, RecordId};

pub use dry_run::DryRunStore;
pub use memory::MemoryStore;
pub use sqlite::{SqliteStore, Table};

/// Persistence interface consumed by the pipeline and the linker.
///
/// Writes between [`Store::begin`] and [`Store::commit`] form one unit:
/// [`Store::rollback`] discards all of them. Reads only ever observe
/// committed documents plus the writes of the open transaction.
pub trait Store {
    fn begin(&mut self) -> Result<()>;

    fn commit(&mut self) -> Result<()>;

    fn rollback(&mut self) -> Result<()>;

    fn insert_document(&mut self, document: &NewDocument) -> Result<DocumentId>;

    /// Document published exactly on `date`; the highest id wins on ties.
    fn find_document_by_exact_date(&self, date: NaiveDate) -> Result<Option<DocumentId>>;

    /// Document with the latest publication date, undated documents last,
    /// highest id first among equals.
    fn find_most_recent_document(&self) -> Result<Option<DocumentId>>;

    fn insert_article(&mut self, article: &ArticleRecord) -> Result<RecordId>;

    fn insert_amendment(&mut self, amendment: &AmendmentRecord) -> Result<RecordId>;

    fn insert_annex(&mut self, annex: &AnnexRecord) -> Result<RecordId>;
}

/// Run `work` inside a transaction.
///
/// Commits when `work` succeeds. When `work` or the commit fails the
/// transaction is rolled back and that error is returned; a failing
/// rollback is only logged. Either way no transaction is left open.
pub fn with_transaction<S, T, F>(store: &mut S, work: F) -> Result<T>
where
    S: Store + ?Sized,
    F: FnOnce(&mut S) -> Result<T>,
{
    store.begin()?;
    let result = work(store).and_then(|value| store.commit().map(|()| value));
    if result.is_err() {
        rollback_quietly(store);
    }
    result
}

fn rollback_quietly<S: Store + ?Sized>(store: &mut S) {
    if let Err(e) = store.rollback() {
        tracing::warn!(error = %e, "Rollback failed");
    }
}
