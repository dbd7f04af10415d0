//! Command-line interface for the extractor.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{ExtractorConfig, DEFAULT_DATABASE_PATH};
use crate::error::Result;
use crate::pipeline::{Analysis, BatchReport, ExtractionPipeline, ItemOutcome};
use crate::scan::collect_inputs;
use crate::source::FileTextSource;
use crate::store::{DryRunStore, MemoryStore, SqliteStore, Store};
use crate::types::DocumentKind;

/// Normativa Extractor - Build a structured corpus from regulatory PDFs.
#[derive(Parser)]
#[command(name = "normativa-extractor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database holding the corpus
    #[arg(long, global = true, default_value = DEFAULT_DATABASE_PATH)]
    pub database: PathBuf,

    /// Detect and segment, but write nothing
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Scope recorded on principal regulations
    #[arg(long, global = true)]
    pub scope: Option<String>,

    /// Issuer recorded on principal regulations
    #[arg(long, global = true)]
    pub issuer: Option<String>,

    /// Print machine-readable JSON reports on stdout
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ingest consolidated regulations.
    Principal {
        /// Directory scanned recursively
        dir: PathBuf,
    },

    /// Ingest amendment notices and link them to stored regulations.
    Amendments {
        /// Directory scanned recursively
        dir: PathBuf,
    },

    /// Ingest annexes and attach them to the most recent regulation.
    Annexes {
        /// Directory scanned recursively
        dir: PathBuf,
    },

    /// Ingest regulations, then amendments, then annexes.
    All {
        #[arg(long)]
        principal: Option<PathBuf>,

        #[arg(long)]
        amendments: Option<PathBuf>,

        #[arg(long)]
        annexes: Option<PathBuf>,
    },

    /// Show what would be extracted from one file, without writing.
    Inspect {
        file: PathBuf,

        /// How to treat the file
        #[arg(long, value_enum, default_value_t = KindArg::Principal)]
        kind: KindArg,
    },
}

/// Document kind as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Principal,
    Amendment,
    Annex,
}

impl From<KindArg> for DocumentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Principal => Self::Principal,
            KindArg::Amendment => Self::Amendment,
            KindArg::Annex => Self::Annex,
        }
    }
}

/// Run the CLI.
pub fn run() -> Result<()> {
    execute(Cli::parse())
}

/// Execute a parsed command line.
pub fn execute(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;

    let batches: Vec<(DocumentKind, PathBuf)> = match &cli.command {
        Commands::Inspect { file, kind } => {
            return inspect_command(config, file, (*kind).into(), cli.json);
        }
        Commands::Principal { dir } => vec![(DocumentKind::Principal, dir.clone())],
        Commands::Amendments { dir } => vec![(DocumentKind::Amendment, dir.clone())],
        Commands::Annexes { dir } => vec![(DocumentKind::Annex, dir.clone())],
        Commands::All {
            principal,
            amendments,
            annexes,
        } => [
            (DocumentKind::Principal, principal),
            (DocumentKind::Amendment, amendments),
            (DocumentKind::Annex, annexes),
        ]
        .into_iter()
        .filter_map(|(kind, dir)| dir.clone().map(|dir| (kind, dir)))
        .collect(),
    };

    if cli.dry_run {
        // Reads still see an existing corpus; nothing is created or written
        if cli.database.exists() {
            let store = DryRunStore::new(SqliteStore::open(&cli.database)?);
            batch_command(config, store, &batches, cli.json)
        } else {
            tracing::info!(database = %cli.database.display(), "Database absent, dry run starts empty");
            batch_command(config, DryRunStore::new(MemoryStore::new()), &batches, cli.json)
        }
    } else {
        let store = SqliteStore::open(&cli.database)?;
        batch_command(config, store, &batches, cli.json)
    }
}

/// Load the configuration file (or defaults) and apply flag overrides.
fn load_config(cli: &Cli) -> Result<ExtractorConfig> {
    let mut config = match &cli.config {
        Some(path) => ExtractorConfig::from_yaml_file(path)?,
        None => ExtractorConfig::default(),
    };
    if let Some(scope) = &cli.scope {
        config = config.with_scope(scope.as_str());
    }
    if let Some(issuer) = &cli.issuer {
        config = config.with_issuer(issuer.as_str());
    }
    config.validate()?;
    Ok(config)
}

/// Run each batch in order and print the reports.
fn batch_command<S: Store>(
    config: ExtractorConfig,
    store: S,
    batches: &[(DocumentKind, PathBuf)],
    json: bool,
) -> Result<()> {
    let mut pipeline = ExtractionPipeline::new(FileTextSource::new(), store, config);
    let mut reports = Vec::with_capacity(batches.len());

    for (kind, dir) in batches {
        let inputs = collect_inputs(dir, pipeline.config());

        if !json {
            println!(
                "{} {} {} from {}",
                style("Processing").bold(),
                style(inputs.len()).cyan(),
                style(kind).cyan(),
                dir.display()
            );
        }

        let pb = if json {
            ProgressBar::hidden()
        } else {
            progress_bar(inputs.len())
        };
        let report = pipeline.run_inputs(*kind, &inputs, |item| {
            pb.set_message(
                item.path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            );
            pb.inc(1);
        });
        pb.finish_and_clear();

        if !json {
            print_report(&report);
        }
        reports.push(report);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }
    Ok(())
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(u64::try_from(len).unwrap_or(u64::MAX));
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .expect("valid template"),
    );
    pb
}

fn print_report(report: &BatchReport) {
    for item in &report.items {
        match &item.outcome {
            ItemOutcome::Unlinked { reason } => println!(
                "  {} {}: {}",
                style("unlinked").yellow(),
                item.path.display(),
                reason
            ),
            ItemOutcome::Failed { error } => println!(
                "  {} {}: {}",
                style("failed").red().bold(),
                item.path.display(),
                error
            ),
            _ => {}
        }
    }

    let summary = report.summary();
    println!(
        "  Stored: {}  Unlinked: {}  Failed: {}",
        style(summary.stored).green(),
        style(summary.unlinked).yellow(),
        style(summary.failed).red()
    );
    println!();
}

/// Execute the inspect command.
fn inspect_command(config: ExtractorConfig, file: &Path, kind: DocumentKind, json: bool) -> Result<()> {
    let pipeline = ExtractionPipeline::new(FileTextSource::new(), MemoryStore::new(), config);
    let analysis = pipeline.analyze(kind, file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        print_analysis(file, &analysis);
    }
    Ok(())
}

fn print_analysis(file: &Path, analysis: &Analysis) {
    let or_none = |value: Option<String>| value.unwrap_or_else(|| "-".to_string());

    println!(
        "{} {} as {}",
        style("Inspecting").bold(),
        style(file.display()).cyan(),
        style(analysis.kind).cyan()
    );
    println!("  Title: {}", style(or_none(analysis.title.clone())).green());
    println!("  Type: {}", analysis.instrument_type);
    println!(
        "  Publication date: {}",
        or_none(analysis.publication_date.map(|d| d.to_string()))
    );
    println!(
        "  File name date: {}",
        or_none(analysis.filename_date.map(|d| d.to_string()))
    );

    if analysis.kind == DocumentKind::Principal {
        println!("  Segments: {}", analysis.segments.len());
        for segment in &analysis.segments {
            let preview = segment.body.chars().take(60).collect::<String>();
            println!(
                "    {} {}",
                style(&segment.label).bold(),
                preview.replace('\n', " ")
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_principal() {
        let cli = Cli::parse_from(["normativa-extractor", "principal", "pdfs/compulsadas"]);

        let Commands::Principal { dir } = cli.command else {
            panic!("expected principal command");
        };
        assert_eq!(dir, PathBuf::from("pdfs/compulsadas"));
        assert_eq!(cli.database, PathBuf::from("normativa.db"));
        assert!(!cli.dry_run);
        assert!(!cli.json);
    }

    #[test]
    fn test_cli_parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "normativa-extractor",
            "amendments",
            "pdfs/modificaciones",
            "--dry-run",
            "--database",
            "/tmp/corpus.db",
            "--json",
        ]);

        assert!(matches!(cli.command, Commands::Amendments { .. }));
        assert!(cli.dry_run);
        assert!(cli.json);
        assert_eq!(cli.database, PathBuf::from("/tmp/corpus.db"));
    }

    #[test]
    fn test_cli_parse_all() {
        let cli = Cli::parse_from([
            "normativa-extractor",
            "all",
            "--principal",
            "a",
            "--annexes",
            "c",
        ]);

        let Commands::All {
            principal,
            amendments,
            annexes,
        } = cli.command
        else {
            panic!("expected all command");
        };
        assert_eq!(principal, Some(PathBuf::from("a")));
        assert_eq!(amendments, None);
        assert_eq!(annexes, Some(PathBuf::from("c")));
    }

    #[test]
    fn test_cli_parse_inspect_kind() {
        let cli = Cli::parse_from(["normativa-extractor", "inspect", "x.pdf", "--kind", "amendment"]);
        let Commands::Inspect { file, kind } = cli.command else {
            panic!("expected inspect command");
        };
        assert_eq!(file, PathBuf::from("x.pdf"));
        assert_eq!(DocumentKind::from(kind), DocumentKind::Amendment);
    }

    #[test]
    fn test_cli_scope_and_issuer_override_config() {
        let cli = Cli::parse_from([
            "normativa-extractor",
            "--scope",
            "Estatal",
            "--issuer",
            "Banxico",
            "principal",
            "d",
        ]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.scope, "Estatal");
        assert_eq!(config.issuer, "Banxico");
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let cli = Cli::parse_from([
            "normativa-extractor",
            "--config",
            "/nonexistent/config.yaml",
            "principal",
            "d",
        ]);
        assert!(load_config(&cli).is_err());
    }
}
