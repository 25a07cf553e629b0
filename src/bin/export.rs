//! Bioregistry Export CLI
//!
//! Writes the rasterized registry, JSON-LD contexts, SSSOM, YAML, and RDF
//! exports, plus a checksum manifest.

use anyhow::Context;
use bioregistry::checksum;
use bioregistry::config::OutputFormat;
use bioregistry::export::{export_all, ExportOptions};
use bioregistry::{BioregistryConfig, DataPaths, Manager};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bioregistry-export")]
#[command(about = "Export the bioregistry to JSON-LD, SSSOM, YAML, and RDF")]
struct Cli {
    /// Config file (defaults to bioregistry.toml and friends)
    #[arg(short, long)]
    config: Option<String>,

    /// Directory holding registry.json, metaregistry.json, collections.json
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Output directory (overrides export.dir)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write compact JSON
    #[arg(long)]
    compact: bool,

    /// Skip the checksum manifest
    #[arg(long)]
    no_checksums: bool,

    /// Only check an existing export against its manifest
    #[arg(long)]
    verify: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = BioregistryConfig::load_from(cli.config.as_deref())?;
    let output = cli.output.unwrap_or_else(|| config.export.dir.clone());

    if cli.verify {
        println!("🔍 Verifying {}", output.display());
        let mismatched = checksum::verify_manifest(&output)?;
        if mismatched.is_empty() {
            println!("✅ All checksums valid");
            return Ok(());
        }
        for path in &mismatched {
            println!("  ❌ {}", path.display());
        }
        std::process::exit(1);
    }

    let paths = match &cli.data {
        Some(dir) => DataPaths::in_dir(dir),
        None => config.data.paths(),
    };
    println!("📦 Loading {}", paths.registry.display());
    let manager = Manager::load(&paths)
        .with_context(|| format!("loading registry from {}", paths.registry.display()))?;

    let mut options = ExportOptions::from_config(&config)?;
    if cli.compact {
        options.output_format = OutputFormat::Compact;
    }
    if cli.no_checksums {
        options.include_checksums = false;
    }

    let written = export_all(&manager, &output, &options)?;

    println!(
        "✅ Exported {} resources to {}",
        manager.registry().len(),
        output.display()
    );
    for path in &written {
        println!("   └─ {}", path.display());
    }
    Ok(())
}
