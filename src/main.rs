use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use filing_synthesis::{
    fingerprint, load_snapshots, write_restatements_csv, EntityId, GoldenRecord, Snapshot,
    SynthesisConfig, ZipperEngine,
};

#[derive(Parser)]
#[command(name = "filing-synthesis")]
#[command(about = "Stitch per-filing statement snapshots into a golden record", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a golden record from scratch
    Stitch {
        #[arg(long)]
        ticker: String,

        #[arg(long)]
        cik: Option<String>,

        #[command(flatten)]
        output: OutputArgs,

        /// Snapshot JSON files (one snapshot or an array each)
        #[arg(required = true)]
        snapshots: Vec<PathBuf>,
    },

    /// Fold new filings into an existing golden record
    Merge {
        /// Golden record JSON to extend
        #[arg(long)]
        record: PathBuf,

        #[command(flatten)]
        output: OutputArgs,

        #[arg(required = true)]
        snapshots: Vec<PathBuf>,
    },

    /// Print the fingerprint of a golden record
    Fingerprint {
        record: PathBuf,
    },
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Engine config JSON (defaults apply when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the record here instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,

    /// Also export the restatement log as CSV
    #[arg(long)]
    restatements_csv: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Stitch {
            ticker,
            cik,
            output,
            snapshots,
        } => {
            let engine = build_engine(output.config.as_deref())?;
            let snapshots = load_all(&snapshots)?;

            let mut entity = EntityId::new(ticker);
            if let Some(cik) = cik {
                entity = entity.with_cik(cik);
            }

            let record = engine.stitch(entity, &snapshots)?;
            eprintln!("✓ {}", record.summary());
            emit(&record, &output)?;
        }
        Commands::Merge {
            record,
            output,
            snapshots,
        } => {
            let engine = build_engine(output.config.as_deref())?;
            let content = fs::read_to_string(&record)
                .with_context(|| format!("Failed to read record file: {:?}", record))?;
            let mut golden: GoldenRecord =
                serde_json::from_str(&content).context("Failed to parse golden record JSON")?;

            let snapshots = load_all(&snapshots)?;
            let summary = engine.merge_snapshots(&mut golden, &snapshots)?;
            eprintln!("✓ {}", summary.summary());
            emit(&golden, &output)?;
        }
        Commands::Fingerprint { record } => {
            let content = fs::read_to_string(&record)
                .with_context(|| format!("Failed to read record file: {:?}", record))?;
            let golden: GoldenRecord =
                serde_json::from_str(&content).context("Failed to parse golden record JSON")?;
            println!("{}", fingerprint(&golden)?);
        }
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(io::stderr)
        .init();
}

fn build_engine(config: Option<&Path>) -> Result<ZipperEngine> {
    let config = match config {
        Some(path) => SynthesisConfig::from_file(path)?,
        None => SynthesisConfig::default(),
    };
    ZipperEngine::with_config(config).context("Invalid engine config")
}

fn load_all(paths: &[PathBuf]) -> Result<Vec<Snapshot>> {
    let mut snapshots = Vec::new();
    for path in paths {
        let loaded = load_snapshots(path)?;
        tracing::debug!(path = %path.display(), count = loaded.len(), "loaded snapshots");
        snapshots.extend(loaded);
    }
    Ok(snapshots)
}

fn emit(record: &GoldenRecord, output: &OutputArgs) -> Result<()> {
    let json = serde_json::to_string_pretty(record)?;

    match &output.out {
        Some(path) => fs::write(path, json)
            .with_context(|| format!("Failed to write record: {:?}", path))?,
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", json)?;
        }
    }

    if let Some(path) = &output.restatements_csv {
        let file = File::create(path)
            .with_context(|| format!("Failed to create CSV file: {:?}", path))?;
        let rows = write_restatements_csv(&record.restatements, file)?;
        eprintln!("✓ Exported {} restatements to {:?}", rows, path);
    }

    Ok(())
}
