//! SQLite-backed store.

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};

use super::Store;
use crate::error::Result;
use crate::types::{
    AmendmentRecord, AnnexRecord, ArticleRecord, DocumentId, InstrumentType, NewDocument,
    RecordId, RegulatoryDocument,
};

const SCHEMA: &str = r"
    CREATE TABLE IF NOT EXISTS documents (
        id INTEGER PRIMARY KEY,
        title TEXT,
        scope TEXT NOT NULL,
        instrument_type TEXT NOT NULL,
        publication_date TEXT,
        issuer TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS articles (
        id INTEGER PRIMARY KEY,
        document_id INTEGER NOT NULL REFERENCES documents(id),
        number TEXT NOT NULL,
        body TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS amendments (
        id INTEGER PRIMARY KEY,
        document_id INTEGER NOT NULL REFERENCES documents(id),
        title TEXT,
        full_text TEXT NOT NULL,
        publication_date TEXT
    );

    CREATE TABLE IF NOT EXISTS annexes (
        id INTEGER PRIMARY KEY,
        document_id INTEGER NOT NULL REFERENCES documents(id),
        name TEXT NOT NULL,
        full_text TEXT NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_documents_publication_date
        ON documents(publication_date);
    CREATE INDEX IF NOT EXISTS idx_articles_document
        ON articles(document_id);
";

/// Store persisting to a SQLite database.
///
/// The schema is created on open and foreign keys are enforced, so rows
/// referencing a missing document are rejected by the database itself.
/// Dates are stored as ISO-8601 text, which sorts chronologically.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a database file.
    pub fn open(path: &Path) -> Result<Self> {
        Self::with_connection(Connection::open(path)?)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Read a document back by id.
    pub fn document(&self, id: DocumentId) -> Result<Option<RegulatoryDocument>> {
        let document = self
            .conn
            .query_row(
                "SELECT id, title, scope, instrument_type, publication_date, issuer
                 FROM documents WHERE id = ?1",
                params![id.0],
                |row| {
                    let instrument_type: String = row.get(3)?;
                    Ok(RegulatoryDocument {
                        id: DocumentId(row.get(0)?),
                        title: row.get(1)?,
                        scope: row.get(2)?,
                        instrument_type: InstrumentType::from_stored(&instrument_type),
                        publication_date: row.get(4)?,
                        issuer: row.get(5)?,
                    })
                },
            )
            .optional()?;
        Ok(document)
    }

    /// Article numbers and bodies of a document, in insertion order.
    pub fn articles_of(&self, id: DocumentId) -> Result<Vec<(String, String)>> {
        let mut stmt = self
            .conn
            .prepare("SELECT number, body FROM articles WHERE document_id = ?1 ORDER BY id")?;
        let rows = stmt
            .query_map(params![id.0], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Row count of one table.
    pub fn count(&self, table: Table) -> Result<usize> {
        let sql = format!("SELECT COUNT(*) FROM {}", table.name());
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

/// Tables of the corpus schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Documents,
    Articles,
    Amendments,
    Annexes,
}

impl Table {
    fn name(self) -> &'static str {
        match self {
            Self::Documents => "documents",
            Self::Articles => "articles",
            Self::Amendments => "amendments",
            Self::Annexes => "annexes",
        }
    }
}

impl Store for SqliteStore {
    fn begin(&mut self) -> Result<()> {
        self.conn.execute_batch("BEGIN")?;
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        self.conn.execute_batch("COMMIT")?;
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        self.conn.execute_batch("ROLLBACK")?;
        Ok(())
    }

    fn insert_document(&mut self, document: &NewDocument) -> Result<DocumentId> {
        self.conn.execute(
            "INSERT INTO documents (title, scope, instrument_type, publication_date, issuer)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                document.title,
                document.scope,
                document.instrument_type.as_str(),
                document.publication_date,
                document.issuer,
            ],
        )?;
        Ok(DocumentId(self.conn.last_insert_rowid()))
    }

    fn find_document_by_exact_date(&self, date: NaiveDate) -> Result<Option<DocumentId>> {
        let id = self
            .conn
            .query_row(
                "SELECT id FROM documents WHERE publication_date = ?1 ORDER BY id DESC LIMIT 1",
                params![date],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id.map(DocumentId))
    }

    fn find_most_recent_document(&self) -> Result<Option<DocumentId>> {
        let id = self
            .conn
            .query_row(
                "SELECT id FROM documents
                 ORDER BY publication_date IS NULL, publication_date DESC, id DESC
                 LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id.map(DocumentId))
    }

    fn insert_article(&mut self, article: &ArticleRecord) -> Result<RecordId> {
        self.conn.execute(
            "INSERT INTO articles (document_id, number, body) VALUES (?1, ?2, ?3)",
            params![article.document_id.0, article.number, article.body],
        )?;
        Ok(RecordId(self.conn.last_insert_rowid()))
    }

    fn insert_amendment(&mut self, amendment: &AmendmentRecord) -> Result<RecordId> {
        self.conn.execute(
            "INSERT INTO amendments (document_id, title, full_text, publication_date)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                amendment.document_id.0,
                amendment.title,
                amendment.full_text,
                amendment.publication_date,
            ],
        )?;
        Ok(RecordId(self.conn.last_insert_rowid()))
    }

    fn insert_annex(&mut self, annex: &AnnexRecord) -> Result<RecordId> {
        self.conn.execute(
            "INSERT INTO annexes (document_id, name, full_text) VALUES (?1, ?2, ?3)",
            params![annex.document_id.0, annex.name, annex.full_text],
        )?;
        Ok(RecordId(self.conn.last_insert_rowid()))
    }
}
