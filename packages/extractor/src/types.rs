//! Core data types for the extractor.
//!
//! These types describe the structured corpus built from regulatory PDFs:
//! principal regulations, their articles, amendment notices and annexes.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier of a persisted regulatory document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub i64);

impl DocumentId {
    /// Sentinel returned by dry-run writes.
    pub const DRY_RUN: DocumentId = DocumentId(-1);

    /// Whether this id came from a dry-run write.
    #[must_use]
    pub fn is_dry_run(self) -> bool {
        self == Self::DRY_RUN
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a persisted article, amendment or annex row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl RecordId {
    /// Sentinel returned by dry-run writes.
    pub const DRY_RUN: RecordId = RecordId(-1);
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Legal form of a regulatory instrument.
///
/// Variant order is the classification precedence: the first variant whose
/// keyword appears in a title wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstrumentType {
    /// Ley.
    Law,
    /// Reglamento.
    Regulation,
    /// Constitución.
    Constitution,
    /// Disposiciones de carácter general.
    Provisions,
    /// Lineamientos.
    Guidelines,
    /// Acuerdo.
    Agreement,
    /// Resolución.
    Resolution,
    /// Norma Oficial Mexicana.
    #[serde(rename = "Official Standard")]
    OfficialStandard,
    /// Manual.
    Manual,
    /// Decreto.
    Decree,
    /// Aviso.
    Notice,
    /// Convocatoria.
    Call,
    /// Convenio.
    Covenant,
    /// Procedimiento.
    Procedure,
    /// Programa.
    Program,
    /// Reglas.
    Rules,
    /// Código.
    Code,
    /// Catch-all for titles matching no keyword, or no title at all.
    Other,
}

impl InstrumentType {
    /// Get the string value stored in the corpus.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Law => "Law",
            Self::Regulation => "Regulation",
            Self::Constitution => "Constitution",
            Self::Provisions => "Provisions",
            Self::Guidelines => "Guidelines",
            Self::Agreement => "Agreement",
            Self::Resolution => "Resolution",
            Self::OfficialStandard => "Official Standard",
            Self::Manual => "Manual",
            Self::Decree => "Decree",
            Self::Notice => "Notice",
            Self::Call => "Call",
            Self::Covenant => "Covenant",
            Self::Procedure => "Procedure",
            Self::Program => "Program",
            Self::Rules => "Rules",
            Self::Code => "Code",
            Self::Other => "Other",
        }
    }

    /// Parse a stored string back into a type. Unknown strings map to `Other`.
    #[must_use]
    pub fn from_stored(text: &str) -> Self {
        match text {
            "Law" => Self::Law,
            "Regulation" => Self::Regulation,
            "Constitution" => Self::Constitution,
            "Provisions" => Self::Provisions,
            "Guidelines" => Self::Guidelines,
            "Agreement" => Self::Agreement,
            "Resolution" => Self::Resolution,
            "Official Standard" => Self::OfficialStandard,
            "Manual" => Self::Manual,
            "Decree" => Self::Decree,
            "Notice" => Self::Notice,
            "Call" => Self::Call,
            "Covenant" => Self::Covenant,
            "Procedure" => Self::Procedure,
            "Program" => Self::Program,
            "Rules" => Self::Rules,
            "Code" => Self::Code,
            _ => Self::Other,
        }
    }
}

impl fmt::Display for InstrumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which processing path an input takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Consolidated text of a regulation ("versión compulsada").
    Principal,
    /// Amendment notice published against an existing regulation.
    Amendment,
    /// Annex attached to an existing regulation.
    Annex,
}

impl DocumentKind {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Principal => "principal",
            Self::Amendment => "amendment",
            Self::Annex => "annex",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A principal regulation, as written to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewDocument {
    /// Detected title; absent when no title could be found.
    pub title: Option<String>,

    pub scope: String,

    pub instrument_type: InstrumentType,

    /// Latest date harvested from the text.
    pub publication_date: Option<NaiveDate>,

    pub issuer: String,
}

/// A principal regulation read back from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegulatoryDocument {
    pub id: DocumentId,
    pub title: Option<String>,
    pub scope: String,
    pub instrument_type: InstrumentType,
    pub publication_date: Option<NaiveDate>,
    pub issuer: String,
}

impl RegulatoryDocument {
    /// Attach an id to a write payload.
    #[must_use]
    pub fn from_new(id: DocumentId, doc: NewDocument) -> Self {
        Self {
            id,
            title: doc.title,
            scope: doc.scope,
            instrument_type: doc.instrument_type,
            publication_date: doc.publication_date,
            issuer: doc.issuer,
        }
    }
}

/// One article or transitory provision of a regulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleRecord {
    pub document_id: DocumentId,

    /// Canonical number, e.g. "14-BIS" or "Transitorio Primero".
    pub number: String,

    pub body: String,
}

/// An amendment notice linked to the regulation it amends.
///
/// Only linked amendments are ever built; an amendment without a target is
/// dropped before it reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmendmentRecord {
    pub document_id: DocumentId,

    pub title: Option<String>,

    /// The entire source text, never a subset.
    pub full_text: String,

    pub publication_date: Option<NaiveDate>,
}

/// An annex attached to a regulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnexRecord {
    pub document_id: DocumentId,
    pub name: String,
    pub full_text: String,
}
