//! Bioregistry lookup CLI
//!
//! Looks up resources, resolves CURIEs, and compares registry snapshots.

use anyhow::{bail, Context};
use bioregistry::{compare_registries, store, BioregistryConfig, Manager, Resource, UriFormatter};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bioregistry")]
#[command(about = "Look up prefixes and resolve CURIEs against the bioregistry")]
struct Cli {
    /// Config file (defaults to bioregistry.toml and friends)
    #[arg(short, long)]
    config: Option<String>,

    /// Directory holding registry.json, metaregistry.json, collections.json
    #[arg(short, long)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a resource, or one resolved field of it
    Get {
        prefix: String,
        /// name, description, pattern, uri-format, uri-prefix, homepage,
        /// contact, example, license, version, banana, preferred-prefix,
        /// deprecated, mappings, publications
        field: Option<String>,
    },

    /// Resolve a CURIE to an IRI
    Resolve {
        curie: String,
        /// Formatter priority, e.g. -p obofoundry -p default
        #[arg(short, long)]
        priority: Vec<String>,
    },

    /// List every URI a CURIE resolves to
    Providers { curie: String },

    /// Normalize the prefix and identifier of a CURIE
    Normalize { curie: String },

    /// Fuzzy search prefixes and names
    Search {
        query: String,
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Show prefix mappings to one external registry, or between two
    Mappings {
        source: String,
        target: Option<String>,
    },

    /// Compare two registry.json files
    Diff { old: PathBuf, new: PathBuf },
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

    if let Commands::Diff { old, new } = &cli.command {
        return diff(old, new);
    }

    let paths = match &cli.data {
        Some(dir) => bioregistry::DataPaths::in_dir(dir),
        None => config.data.paths(),
    };
    let manager = Manager::load(&paths)
        .with_context(|| format!("loading registry from {}", paths.registry.display()))?;

    match cli.command {
        Commands::Get { prefix, field } => {
            let resource = manager.require_resource(&prefix)?;
            match field {
                Some(field) => match get_field(resource, &field)? {
                    Some(value) => println!("{}", value),
                    None => {
                        eprintln!("{} has no {}", resource.prefix(), field);
                        std::process::exit(1);
                    }
                },
                None => {
                    let rasterized = manager.rasterized_resource(resource);
                    println!("{}", serde_json::to_string_pretty(&rasterized)?);
                }
            }
        }

        Commands::Resolve { curie, priority } => {
            let priority = if priority.is_empty() {
                config.formatter_priority()?
            } else {
                Some(UriFormatter::parse_priority(&priority, config.resolution.strict_priority)?)
            };
            let (prefix, identifier) = parse(&manager, &curie)?;
            match manager.get_iri(&prefix, &identifier, priority.as_deref()) {
                Some(iri) => println!("{}", iri),
                None => bail!("no URI format available for {}", prefix),
            }
        }

        Commands::Providers { curie } => {
            let (prefix, identifier) = parse(&manager, &curie)?;
            for (name, uri) in manager.get_providers(&prefix, &identifier) {
                println!("{:<14} {}", name, uri);
            }
        }

        Commands::Normalize { curie } => {
            let (prefix, identifier) = parse(&manager, &curie)?;
            let resource = manager.require_resource(&prefix)?;
            match resource.is_canonical_identifier(&identifier)? {
                Some(true) => println!("✅ {}:{}", prefix, identifier),
                Some(false) => println!("⚠️  {}:{} (does not match pattern)", prefix, identifier),
                None => println!("{}:{}", prefix, identifier),
            }
        }

        Commands::Search { query, limit } => {
            let results = manager.search(&query, limit);
            if results.is_empty() {
                println!("No matches for '{}'", query);
            }
            for result in results {
                println!(
                    "{:>5}  {:<20} {}",
                    result.score,
                    result.prefix,
                    result.name.as_deref().unwrap_or("")
                );
            }
        }

        Commands::Mappings { source, target } => match target {
            Some(target) => {
                manager.require_registry(&source)?;
                manager.require_registry(&target)?;
                let mappings = manager.get_external_mappings(&source, &target);
                println!("🔗 {} -> {}: {} shared", source, target, mappings.mappings.len());
                for (s, t) in &mappings.mappings {
                    println!("  {} -> {}", s, t);
                }
                println!("  only in {}: {}", source, mappings.source_only.len());
                println!("  only in {}: {}", target, mappings.target_only.len());
            }
            None => {
                manager.require_registry(&source)?;
                for (prefix, external) in manager.get_registry_map(&source) {
                    println!("{}\t{}", prefix, external);
                }
            }
        },

        Commands::Diff { .. } => unreachable!("handled before loading"),
    }

    Ok(())
}

fn parse(manager: &Manager, curie: &str) -> anyhow::Result<(String, String)> {
    manager
        .parse_curie(curie)
        .with_context(|| format!("could not parse CURIE '{}'", curie))
}

fn get_field(resource: &Resource, field: &str) -> anyhow::Result<Option<String>> {
    let value = match field {
        "name" => resource.get_name().map(str::to_string),
        "description" => resource.get_description().map(str::to_string),
        "pattern" => resource.get_pattern(),
        "uri-format" | "uri_format" => resource.get_uri_format(None),
        "uri-prefix" | "uri_prefix" => resource.get_uri_prefix(None),
        "homepage" => resource.get_homepage().map(str::to_string),
        "contact" => resource.get_contact().map(str::to_string),
        "example" => resource.get_example().map(str::to_string),
        "license" => resource.get_license(),
        "version" => resource.get_version().map(str::to_string),
        "banana" => resource.get_banana().map(|banana| banana.into_owned()),
        "preferred-prefix" | "preferred_prefix" => resource.get_preferred_prefix(),
        "deprecated" => Some(resource.is_deprecated().to_string()),
        "mappings" => Some(serde_json::to_string_pretty(&resource.get_mappings())?),
        "publications" => Some(serde_json::to_string_pretty(&resource.get_publications())?),
        other => bail!("unknown field '{}'", other),
    };
    Ok(value)
}

fn diff(old: &Path, new: &Path) -> anyhow::Result<()> {
    let old_registry = store::read_registry(old)
        .with_context(|| format!("reading {}", old.display()))?;
    let new_registry = store::read_registry(new)
        .with_context(|| format!("reading {}", new.display()))?;
    let diff = compare_registries(&old_registry, &new_registry)?;

    if diff.is_empty() {
        println!("✅ No differences");
        return Ok(());
    }
    for prefix in &diff.added {
        println!("+ {}", prefix);
    }
    for prefix in &diff.deleted {
        println!("- {}", prefix);
    }
    for (prefix, changes) in &diff.updated {
        println!("~ {}", prefix);
        for field in changes.keys() {
            println!("   └─ {}", field);
        }
    }
    Ok(())
}
