//! Bioregistry Validator CLI
//!
//! Checks examples against patterns, pattern syntax, contact emails, and
//! URI formats across the registry.

use anyhow::Context;
use bioregistry::uri_format::uri_prefix_from_format;
use bioregistry::{BioregistryConfig, DataPaths, Manager, RegistryError, Resource};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bioregistry-validator")]
#[command(about = "Validate patterns, examples, contacts, and URI formats")]
struct Cli {
    /// Config file (defaults to bioregistry.toml and friends)
    #[arg(short, long)]
    config: Option<String>,

    /// Directory holding registry.json, metaregistry.json, collections.json
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Only validate these prefixes
    #[arg(short, long)]
    prefix: Vec<String>,

    /// Write a JSON report here
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Serialize)]
struct Issue {
    prefix: String,
    severity: Severity,
    message: String,
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
    let paths = match &cli.data {
        Some(dir) => DataPaths::in_dir(dir),
        None => config.data.paths(),
    };
    let manager = Manager::load(&paths)
        .with_context(|| format!("loading registry from {}", paths.registry.display()))?;
    let contact_severity = if config.validation.fail_on_invalid_contact {
        Severity::Error
    } else {
        Severity::Warning
    };

    println!("🔍 Validating {} resources...", manager.registry().len());

    let mut issues = Vec::new();
    let mut checked = 0;
    for (prefix, resource) in manager.registry() {
        if config.validation.ignore_prefixes.contains(prefix) {
            debug!(%prefix, "ignored by configuration");
            continue;
        }
        if !cli.prefix.is_empty() && !cli.prefix.contains(prefix) {
            continue;
        }
        checked += 1;
        issues.extend(validate_resource(resource, contact_severity));
    }

    let errors = issues.iter().filter(|i| i.severity == Severity::Error).count();
    let warnings = issues.len() - errors;

    for issue in &issues {
        let icon = match issue.severity {
            Severity::Error => "❌",
            Severity::Warning => "⚠️ ",
        };
        println!("{} {}", icon, issue.prefix);
        println!("   └─ {}", issue.message);
    }

    if let Some(path) = &cli.output {
        let report = serde_json::json!({
            "generated_at": chrono::Utc::now().to_rfc3339(),
            "resources": checked,
            "errors": errors,
            "warnings": warnings,
            "issues": issues,
        });
        std::fs::write(path, serde_json::to_string_pretty(&report)?)?;
        println!("✅ Report written to {:?}", path);
    }

    println!();
    if errors > 0 {
        println!("❌ {} error(s), {} warning(s)", errors, warnings);
        std::process::exit(1);
    }
    println!("✅ {} resources valid ({} warning(s))", checked, warnings);
    Ok(())
}

fn validate_resource(resource: &Resource, contact_severity: Severity) -> Vec<Issue> {
    let prefix = resource.prefix();
    let mut issues = Vec::new();
    let mut issue = |severity, message: String| {
        issues.push(Issue {
            prefix: prefix.to_string(),
            severity,
            message,
        })
    };

    if let Some(example) = resource.get_example() {
        match resource.is_canonical_identifier(example) {
            Ok(Some(false)) => issue(
                Severity::Error,
                format!(
                    "example '{}' does not match pattern {}",
                    example,
                    resource.get_pattern().unwrap_or_default()
                ),
            ),
            Ok(_) => {}
            Err(e @ RegistryError::Pattern { .. }) => issue(Severity::Error, e.to_string()),
            Err(e) => issue(Severity::Error, format!("could not check example: {}", e)),
        }
    } else if let Err(e) = resource.get_pattern_re() {
        issue(Severity::Error, e.to_string());
    }

    if let Some(contact) = resource.get_invalid_contact() {
        issue(contact_severity, format!("invalid contact email '{}'", contact));
    }

    if let Some(uri_format) = resource.get_uri_format(None) {
        if uri_prefix_from_format(&uri_format).is_none() {
            issue(
                Severity::Warning,
                format!("URI format '{}' has no usable URI prefix", uri_format),
            );
        }
    }

    issues
}
