//! Integration tests for the extraction pipeline
//!
//! These tests run the full batch sequence (regulations, then amendments,
//! then annexes) over the fixture corpus and check what lands in SQLite.

use chrono::NaiveDate;
use normativa_extractor::classify::classify;
use normativa_extractor::linker::LinkSource;
use normativa_extractor::segment::{ArticleSegmenter, SegmentKind};
use normativa_extractor::store::Table;
use normativa_extractor::title::TitleDetector;
use normativa_extractor::{
    DocumentId, DocumentKind, DryRunStore, ExtractionPipeline, ExtractorConfig, FileTextSource,
    InstrumentType, ItemOutcome, MemoryStore, RecordId, SqliteStore,
};
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};

fn corpus(kind: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("corpus")
        .join(kind)
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_else(|| panic!("invalid date {y}-{m}-{d}"))
}

fn file_names(report: &normativa_extractor::BatchReport) -> Vec<String> {
    report
        .items
        .iter()
        .map(|item| {
            item.path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
        .collect()
}

// =============================================================================
// Full corpus
// =============================================================================

#[test]
fn test_full_corpus_into_sqlite() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
    let db = dir.path().join("normativa.db");
    let store = SqliteStore::open(&db).unwrap_or_else(|e| panic!("open {}: {e}", db.display()));
    let mut pipeline = ExtractionPipeline::new(FileTextSource::new(), store, ExtractorConfig::default());

    // Regulations
    let principal = pipeline.run_batch(DocumentKind::Principal, &corpus("principal"));
    assert_eq!(
        file_names(&principal),
        vec!["ley_instituciones_credito.txt", "reglamento_supervision.txt", "zz_corrupto.pdf"]
    );
    assert_eq!(
        principal.items[0].outcome,
        ItemOutcome::Document {
            document_id: DocumentId(1),
            title: Some("LEY DE INSTITUCIONES DE CRÉDITO".to_string()),
            instrument_type: InstrumentType::Law,
            publication_date: Some(ymd(2022, 3, 1)),
            articles: 5,
        }
    );
    assert_eq!(
        principal.items[1].outcome,
        ItemOutcome::Document {
            document_id: DocumentId(2),
            title: Some(
                "REGLAMENTO DE SUPERVISIÓN DE LA COMISIÓN NACIONAL BANCARIA Y DE VALORES".to_string()
            ),
            instrument_type: InstrumentType::Regulation,
            publication_date: Some(ymd(2023, 5, 15)),
            articles: 3,
        }
    );
    assert!(principal.items[2].outcome.is_failed());

    // Amendments
    let amendments = pipeline.run_batch(DocumentKind::Amendment, &corpus("amendments"));
    assert_eq!(
        file_names(&amendments),
        vec!["acuerdo_reglas.txt", "aviso_20190101.txt", "reforma_20220301.txt"]
    );
    assert_eq!(
        amendments.items[0].outcome,
        ItemOutcome::Amendment {
            record_id: RecordId(1),
            document_id: DocumentId(2),
            link: LinkSource::TextDate,
            title: Some("ACUERDO por el que se modifican las reglas de operación.".to_string()),
            publication_date: Some(ymd(2023, 5, 15)),
        }
    );
    assert!(matches!(amendments.items[1].outcome, ItemOutcome::Unlinked { .. }));
    assert_eq!(
        amendments.items[2].outcome,
        ItemOutcome::Amendment {
            record_id: RecordId(2),
            document_id: DocumentId(1),
            link: LinkSource::Filename,
            title: Some(
                "RESOLUCIÓN que modifica las Disposiciones de carácter general aplicables a las instituciones de crédito."
                    .to_string()
            ),
            publication_date: Some(ymd(2022, 2, 15)),
        }
    );

    // Annexes go to the most recently published regulation
    let annexes = pipeline.run_batch(DocumentKind::Annex, &corpus("annexes"));
    assert_eq!(
        annexes.items[0].outcome,
        ItemOutcome::Annex {
            record_id: RecordId(1),
            document_id: DocumentId(2),
            name: "ANEXO 12 FORMATO DE REPORTE REGULATORIO".to_string(),
        }
    );
    assert_eq!(
        annexes.items[1].outcome,
        ItemOutcome::Annex {
            record_id: RecordId(2),
            document_id: DocumentId(2),
            name: "formato_b".to_string(),
        }
    );

    let store = pipeline.into_store();
    let counts = [Table::Documents, Table::Articles, Table::Amendments, Table::Annexes]
        .map(|table| store.count(table).unwrap_or_else(|e| panic!("count: {e}")));
    assert_eq!(counts, [2, 8, 2, 2]);
}

#[test]
fn test_stored_articles_in_document_order() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
    let db = dir.path().join("normativa.db");
    let store = SqliteStore::open(&db).unwrap_or_else(|e| panic!("open: {e}"));
    let mut pipeline = ExtractionPipeline::new(FileTextSource::new(), store, ExtractorConfig::default());
    pipeline
        .process_principal(&corpus("principal").join("ley_instituciones_credito.txt"))
        .unwrap_or_else(|e| panic!("process: {e}"));

    let store = pipeline.into_store();
    let articles = store
        .articles_of(DocumentId(1))
        .unwrap_or_else(|e| panic!("articles: {e}"));
    let numbers = articles.iter().map(|(n, _)| n.as_str()).collect::<Vec<_>>();
    assert_eq!(
        numbers,
        vec!["1", "2", "46-BIS", "Transitorio Primero", "Transitorio Segundo"]
    );

    // Article 2 keeps its fractions; the last article stops at the heading
    assert!(articles[1].1.contains("II. Comisión Nacional Bancaria y de Valores."));
    assert!(!articles[2].1.contains("TRANSITORIOS"));
    assert!(articles[4].1.contains("Se abroga"));

    let document = store
        .document(DocumentId(1))
        .unwrap_or_else(|e| panic!("document: {e}"))
        .unwrap_or_else(|| panic!("document 1 missing"));
    assert_eq!(document.scope, "Federal");
    assert_eq!(document.issuer, "Comisión Nacional Bancaria y de Valores");
}

#[test]
fn test_corpus_survives_reopen() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
    let db = dir.path().join("normativa.db");

    {
        let store = SqliteStore::open(&db).unwrap_or_else(|e| panic!("open: {e}"));
        let mut pipeline =
            ExtractionPipeline::new(FileTextSource::new(), store, ExtractorConfig::default());
        pipeline.run_batch(DocumentKind::Principal, &corpus("principal"));
    }

    // A later amendments run links against the committed regulations
    let store = SqliteStore::open(&db).unwrap_or_else(|e| panic!("reopen: {e}"));
    let mut pipeline = ExtractionPipeline::new(FileTextSource::new(), store, ExtractorConfig::default());
    let report = pipeline.run_batch(DocumentKind::Amendment, &corpus("amendments"));
    assert_eq!(report.summary().stored, 2);
    assert_eq!(report.summary().unlinked, 1);
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
    let db = dir.path().join("normativa.db");
    let store = DryRunStore::new(SqliteStore::open(&db).unwrap_or_else(|e| panic!("open: {e}")));
    let mut pipeline = ExtractionPipeline::new(FileTextSource::new(), store, ExtractorConfig::default());

    let report = pipeline.run_batch(DocumentKind::Principal, &corpus("principal"));
    assert_eq!(report.summary().stored, 2);
    assert!(matches!(
        report.items[0].outcome,
        ItemOutcome::Document {
            document_id: DocumentId::DRY_RUN,
            articles: 5,
            ..
        }
    ));

    let store = pipeline.into_store().into_inner();
    assert_eq!(store.count(Table::Documents).unwrap_or_else(|e| panic!("count: {e}")), 0);
    assert_eq!(store.count(Table::Articles).unwrap_or_else(|e| panic!("count: {e}")), 0);
}

#[test]
fn test_custom_scope_and_issuer_from_yaml() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("config.yaml");
    let config = ExtractorConfig::from_yaml_file(&path).unwrap_or_else(|e| panic!("config: {e}"));
    let mut pipeline = ExtractionPipeline::new(FileTextSource::new(), MemoryStore::new(), config);
    pipeline.run_batch(DocumentKind::Principal, &corpus("principal"));

    let store = pipeline.into_store();
    assert_eq!(store.documents().len(), 2);
    assert!(store.documents().iter().all(|doc| doc.scope == "Estatal"));
}

// =============================================================================
// End-to-end examples
// =============================================================================

#[test]
fn test_generic_title_classifies_as_law() {
    let detector = TitleDetector::default();
    let first_page = "GENERAL LAW OF CREDIT INSTITUTIONS\nAND AUXILIARY ORGANIZATIONS\n\nINDEX\nChapter I";
    let title = detector.detect(DocumentKind::Principal, first_page, first_page);
    assert_eq!(
        title.as_deref(),
        Some("GENERAL LAW OF CREDIT INSTITUTIONS AND AUXILIARY ORGANIZATIONS")
    );
    assert_eq!(classify(title.as_deref()), InstrumentType::Law);
}

#[test]
fn test_segmentation_one_heading_per_line() {
    let text = "Article 1. Scope.\nArticle 2 Bis. Definitions.\nTRANSITORIES\nFIRST. Entry into force.\nSECOND. Repeal.\n";
    let segments = ArticleSegmenter::default().segment(text);

    let labels = segments
        .iter()
        .map(|s| (s.kind, s.label.as_str()))
        .collect::<Vec<_>>();
    assert_eq!(
        labels,
        vec![
            (SegmentKind::Article, "1"),
            (SegmentKind::Article, "2-BIS"),
            (SegmentKind::Transitory, "Transitorio Primero"),
            (SegmentKind::Transitory, "Transitorio Segundo"),
        ]
    );
    assert_eq!(segments[1].body, "Definitions.");
}
