//! Normativa Extractor - Structure extraction for regulatory publications.
//!
//! This crate turns gazette-style regulatory PDFs into a structured corpus:
//! principal regulations with their articles and transitory provisions,
//! amendment notices linked to the regulation they amend, and annexes.
//!
//! # Example
//!
//! ```
//! use normativa_extractor::numbering::normalize_article_number;
//! use normativa_extractor::segment::ArticleSegmenter;
//!
//! assert_eq!(normalize_article_number("XIV Bis"), "14-BIS");
//!
//! let segments = ArticleSegmenter::default().segment("Artículo 1.- Objeto.\n");
//! assert_eq!(segments[0].label, "1");
//! ```
//!
//! # Architecture
//!
//! The extractor is organized into several modules:
//!
//! - [`config`]: Configuration constants and the extractor configuration
//! - [`types`]: Core data types (documents, articles, amendments, annexes)
//! - [`error`]: Error types and Result alias
//! - [`source`]: PDF and plain-text acquisition
//! - [`dates`]: Publication date harvesting
//! - [`numbering`]: Article and transitory number normalization
//! - [`title`]: Title detection state machine and strategies
//! - [`classify`]: Instrument type classification
//! - [`segment`]: Article and transitory segmentation
//! - [`linker`]: Amendment and annex linking
//! - [`store`]: Persistence (SQLite, in-memory, dry run)
//! - [`scan`]: Recursive input enumeration
//! - [`pipeline`]: Per-input orchestration and batch reports
//! - [`cli`]: Command-line interface

pub mod classify;
pub mod cli;
pub mod config;
pub mod dates;
pub mod error;
pub mod linker;
pub mod numbering;
pub mod pipeline;
pub mod scan;
pub mod segment;
pub mod source;
pub mod store;
pub mod title;
pub mod types;

// Re-export commonly used items
pub use config::ExtractorConfig;
pub use error::{ExtractorError, Result};
pub use pipeline::{BatchReport, ExtractionPipeline, ItemOutcome, ItemReport};
pub use source::{FileTextSource, PdfTextSource, PlainTextSource, SourceText, TextSource};
pub use store::{DryRunStore, MemoryStore, SqliteStore, Store};
pub use types::{DocumentId, DocumentKind, InstrumentType, RecordId};
