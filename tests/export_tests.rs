//! Export Tests
//!
//! Runs every exporter over the sample registry and checks the outputs.

use std::fs;
use std::path::{Path, PathBuf};

use bioregistry::checksum::{verify_manifest, MANIFEST_NAME};
use bioregistry::export::{export_all, prefix_maps, rdf, sssom, ExportOptions};
use bioregistry::{DataPaths, Manager};
use tempfile::tempdir;

fn fixtures_path() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").leak()
}

fn manager() -> Manager {
    Manager::load(&DataPaths::in_dir(fixtures_path())).unwrap()
}

fn read_json(path: impl AsRef<Path>) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

fn options() -> ExportOptions {
    ExportOptions {
        include_checksums: true,
        ..Default::default()
    }
}

#[test]
fn test_export_all_writes_manifest() {
    let manager = manager();
    let dir = tempdir().unwrap();
    let written = export_all(&manager, dir.path(), &options()).unwrap();

    for expected in [
        "registry.json",
        "contexts/bioregistry_context.jsonld",
        "contexts/obo_context.jsonld",
        "contexts/obo_sample_context.jsonld",
        "sssom/bioregistry.sssom.tsv",
        "sssom/bioregistry.sssom.yml",
        "yaml/registry.yml",
        "rdf/bioregistry.nt",
        MANIFEST_NAME,
    ] {
        assert!(written.contains(&PathBuf::from(expected)), "{expected} not written");
        assert!(dir.path().join(expected).exists());
    }
    // Only collections that name a context get one
    assert_eq!(
        written.iter().filter(|p| p.starts_with("contexts")).count(),
        3
    );

    assert!(verify_manifest(dir.path()).unwrap().is_empty());

    fs::write(dir.path().join("rdf/bioregistry.nt"), "tampered").unwrap();
    assert_eq!(
        verify_manifest(dir.path()).unwrap(),
        vec![PathBuf::from("rdf/bioregistry.nt")]
    );
}

#[test]
fn test_no_manifest_when_disabled() {
    let manager = manager();
    let dir = tempdir().unwrap();
    let written = export_all(&manager, dir.path(), &ExportOptions::default()).unwrap();
    assert!(!written.contains(&PathBuf::from(MANIFEST_NAME)));
    assert!(!dir.path().join(MANIFEST_NAME).exists());
}

#[test]
fn test_rasterized_registry_json() {
    let manager = manager();
    let dir = tempdir().unwrap();
    export_all(&manager, dir.path(), &options()).unwrap();

    let registry = read_json(dir.path().join("registry.json"));
    let chebi = &registry["chebi"];
    assert_eq!(chebi["name"], "Chemical Entities of Biological Interest");
    assert_eq!(chebi["banana"], "CHEBI");
    assert_eq!(chebi["license"], "CC-BY-4.0");
    assert_eq!(chebi["mappings"]["wikidata"], "P683");
    assert!(chebi.get("miriam").is_none());
    assert!(chebi.get("obofoundry").is_none());
}

#[test]
fn test_contexts() {
    let manager = manager();
    let dir = tempdir().unwrap();
    export_all(&manager, dir.path(), &options()).unwrap();

    let general = read_json(dir.path().join("contexts/bioregistry_context.jsonld"));
    assert_eq!(
        general["@context"]["go"],
        "http://amigo.geneontology.org/amigo/term/GO:"
    );

    let obo = read_json(dir.path().join("contexts/obo_context.jsonld"));
    assert_eq!(obo["@context"]["GO"], "http://purl.obolibrary.org/obo/GO_");
    assert_eq!(
        obo["@context"]["NCBITaxon"],
        "http://purl.obolibrary.org/obo/NCBITaxon_"
    );
    assert!(obo["@context"].get("go").is_none());
    assert_eq!(obo["@context"]["pdb"], "https://www.rcsb.org/structure/");

    let sample = read_json(dir.path().join("contexts/obo_sample_context.jsonld"));
    assert_eq!(sample["@context"].as_object().unwrap().len(), 3);
}

#[test]
fn test_obo_prefix_map_remapping() {
    let manager = manager();
    let prefix_map = prefix_maps::get_obofoundry_prefix_map(&manager);
    assert_eq!(prefix_map["FBbt"], "http://purl.obolibrary.org/obo/FBbt_");
    assert_eq!(prefix_map["FBcv"], "http://purl.obolibrary.org/obo/FBcv_");
    assert!(!prefix_map.contains_key("dpo"));
}

#[test]
fn test_sssom() {
    let manager = manager();
    let rows = sssom::get_rows(&manager);
    assert!(rows.iter().any(|row| {
        row.subject_id == "bioregistry:ncbitaxon" && row.object_id == "miriam:taxonomy"
    }));

    let curie_map = sssom::get_curie_map(&manager);
    assert_eq!(curie_map["miriam"], "https://registry.identifiers.org/registry/");
    assert!(!curie_map.contains_key("ncbi"));

    let dir = tempdir().unwrap();
    sssom::export_sssom(&manager, dir.path()).unwrap();
    let tsv = fs::read_to_string(dir.path().join(sssom::SSSOM_PATH)).unwrap();
    let mut lines = tsv.lines();
    assert_eq!(
        lines.next(),
        Some("subject_id\tpredicate_id\tobject_id\tmatch_type")
    );
    assert_eq!(lines.count(), rows.len());

    let metadata: serde_yaml::Value = serde_yaml::from_str(
        &fs::read_to_string(dir.path().join(sssom::SSSOM_METADATA_PATH)).unwrap(),
    )
    .unwrap();
    assert_eq!(metadata["mapping_set_id"], "bioregistry");
}

#[test]
fn test_yaml() {
    let manager = manager();
    let dir = tempdir().unwrap();
    export_all(&manager, dir.path(), &options()).unwrap();

    let registry: serde_yaml::Value =
        serde_yaml::from_str(&fs::read_to_string(dir.path().join("yaml/registry.yml")).unwrap())
            .unwrap();
    assert_eq!(registry["fbbt"]["preferred_prefix"], "FBbt");
}

#[test]
fn test_ntriples() {
    let manager = manager();
    let ntriples = rdf::to_ntriples(&rdf::get_triples(&manager));
    let lines: Vec<&str> = ntriples.lines().collect();

    let mut sorted = lines.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(lines, sorted);

    assert!(lines.contains(
        &"<https://bioregistry.io/go.ref> <http://purl.org/dc/terms/isPartOf> <https://bioregistry.io/go> ."
    ));
    assert!(lines.contains(
        &"<https://bioregistry.io/vario> <https://bioregistry.io/schema/#0000012> \"true\"^^<http://www.w3.org/2001/XMLSchema#boolean> ."
    ));
    assert!(lines.contains(
        &"<https://bioregistry.io/chebi> <http://www.w3.org/2004/02/skos/core#exactMatch> <https://registry.identifiers.org/registry/chebi> ."
    ));
    // Discarded contacts are not exported
    assert!(!ntriples.contains("mailto:https://"));
}
