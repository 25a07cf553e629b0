//! Resource Resolution Tests
//!
//! Field fallbacks, URI formats, bananas, and patterns against the sample
//! registry in `tests/fixtures`.

use std::path::Path;

use bioregistry::{DataPaths, Manager, Resource, UriFormatter};

fn fixtures_path() -> &'static Path {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").leak()
}

fn manager() -> Manager {
    Manager::load(&DataPaths::in_dir(fixtures_path())).unwrap()
}

fn get<'a>(manager: &'a Manager, prefix: &str) -> &'a Resource {
    manager
        .get_resource(prefix)
        .unwrap_or_else(|| panic!("{prefix} missing from fixtures"))
}

// =============================================================================
// Field Resolution
// =============================================================================

#[test]
fn test_local_value_wins() {
    let manager = manager();
    let go = get(&manager, "go");
    assert_eq!(go.get_name(), Some("Gene Ontology"));
    // MIRIAM has ^GO:\d{7}$, the curated pattern wins uncleaned
    assert_eq!(go.get_pattern().as_deref(), Some("^\\d{7}$"));
}

#[test]
fn test_name_priority() {
    let manager = manager();
    assert_eq!(
        get(&manager, "chebi").get_name(),
        Some("Chemical Entities of Biological Interest")
    );
    assert_eq!(
        get(&manager, "rhea").get_name(),
        Some("Rhea, the Annotated Reactions Database")
    );
    assert_eq!(get(&manager, "dpo").get_name(), Some("Drosophila Phenotype Ontology"));
}

#[test]
fn test_description_from_miriam() {
    let manager = manager();
    assert!(get(&manager, "chebi")
        .get_description()
        .unwrap()
        .starts_with("Chemical Entities of Biological Interest (ChEBI)"));
    assert_eq!(get(&manager, "wb").get_description(), None);
}

#[test]
fn test_pattern_from_external() {
    let manager = manager();
    assert_eq!(get(&manager, "rhea").get_pattern().as_deref(), Some("^\\d{5}$"));
    assert_eq!(get(&manager, "dpo").get_pattern(), None);
}

#[test]
fn test_homepage_priority() {
    let manager = manager();
    // OBO Foundry comes before MIRIAM
    assert_eq!(get(&manager, "chebi").get_homepage(), Some("http://www.ebi.ac.uk/chebi"));
    assert_eq!(get(&manager, "rhea").get_homepage(), Some("https://www.rhea-db.org/"));
}

#[test]
fn test_example_and_version() {
    let manager = manager();
    let chebi = get(&manager, "chebi");
    assert_eq!(chebi.get_example(), Some("36927"));
    assert_eq!(chebi.get_version(), Some("231"));
    assert_eq!(get(&manager, "pdb").get_example(), Some("2gc4"));
}

#[test]
fn test_contact_validation() {
    let manager = manager();
    assert_eq!(get(&manager, "chebi").get_contact(), Some("amalik@ebi.ac.uk"));

    let sty = get(&manager, "sty");
    assert_eq!(sty.get_contact(), None);
    assert_eq!(
        sty.get_invalid_contact(),
        Some("https://www.nlm.nih.gov/research/umls/contact")
    );
}

#[test]
fn test_license_standardized() {
    let manager = manager();
    assert_eq!(get(&manager, "fbbt").get_license().as_deref(), Some("CC-BY-4.0"));
    assert_eq!(get(&manager, "pdb").get_license(), None);
}

#[test]
fn test_deprecation() {
    let manager = manager();
    assert!(get(&manager, "vario").is_deprecated());
    assert!(!get(&manager, "chebi").is_deprecated());
}

#[test]
fn test_downloads() {
    let manager = manager();
    let chebi = get(&manager, "chebi");
    assert_eq!(chebi.get_download_owl(), Some("http://purl.obolibrary.org/obo/chebi.owl"));
    assert_eq!(chebi.get_download_obo(), Some("http://purl.obolibrary.org/obo/chebi.obo"));
    assert_eq!(chebi.get_download_obograph(), None);
}

#[test]
fn test_preferred_prefix() {
    let manager = manager();
    assert_eq!(get(&manager, "fbbt").get_preferred_prefix().as_deref(), Some("FBbt"));
    assert_eq!(get(&manager, "dpo").get_preferred_prefix().as_deref(), Some("DPO"));
    assert_eq!(get(&manager, "dpo").get_obo_preferred_prefix().as_deref(), Some("FBcv"));
    assert_eq!(get(&manager, "vario").get_preferred_prefix().as_deref(), Some("VARIO"));
    assert_eq!(get(&manager, "pdb").get_preferred_prefix(), None);
}

#[test]
fn test_mappings() {
    let manager = manager();
    let pdb = get(&manager, "pdb").get_mappings();
    assert_eq!(pdb["wikidata"], "P638");
    assert_eq!(pdb["miriam"], "pdb");
    assert_eq!(pdb["n2t"], "pdb");

    let ncbitaxon = get(&manager, "ncbitaxon");
    assert_eq!(ncbitaxon.get_identifiers_org_prefix().as_deref(), Some("taxonomy"));
    assert_eq!(ncbitaxon.get_mapped_prefix("ncbi").as_deref(), Some("taxon"));
    assert_eq!(ncbitaxon.get_obofoundry_prefix().as_deref(), Some("NCBITaxon"));
}

#[test]
fn test_extra_providers() {
    let manager = manager();
    let providers = get(&manager, "chebi").get_extra_providers();
    assert_eq!(providers.len(), 1);
    assert_eq!(
        providers[0].resolve("24867"),
        "https://www.ebi.ac.uk/ols/ontologies/chebi/terms?obo_id=CHEBI:24867"
    );
}

#[test]
fn test_publications_deduplicated() {
    let manager = manager();
    let publications = get(&manager, "go").get_publications();
    assert_eq!(publications.len(), 1);
    assert_eq!(publications[0].doi.as_deref(), Some("10.1038/75556"));
}

// =============================================================================
// URI Formats
// =============================================================================

#[test]
fn test_default_uri() {
    let manager = manager();
    assert_eq!(
        get(&manager, "chebi").get_default_uri("24867").as_deref(),
        Some("https://www.ebi.ac.uk/chebi/searchId.do?chebiId=CHEBI:24867")
    );
}

#[test]
fn test_default_format_skips_resolvers() {
    let manager = manager();
    let sty = get(&manager, "sty");
    assert_eq!(sty.get_default_format(), None);
    assert_eq!(
        sty.get_uri_format(None).as_deref(),
        Some("http://purl.bioontology.org/ontology/STY/$1")
    );
}

#[test]
fn test_miriam_uri_format() {
    let manager = manager();
    assert_eq!(
        get(&manager, "ncbitaxon").get_miriam_uri_format().as_deref(),
        Some("https://identifiers.org/taxonomy:$1")
    );
    assert_eq!(
        get(&manager, "go").get_miriam_uri_format().as_deref(),
        Some("https://identifiers.org/GO:$1")
    );
    assert_eq!(get(&manager, "wb").get_miriam_uri_format(), None);
}

#[test]
fn test_obofoundry_and_ols_formats() {
    let manager = manager();
    let go = get(&manager, "go");
    assert_eq!(
        go.get_obofoundry_uri_format().as_deref(),
        Some("http://purl.obolibrary.org/obo/GO_$1")
    );
    assert_eq!(
        go.get_ols_uri_format().as_deref(),
        Some("https://www.ebi.ac.uk/ols/ontologies/go/terms?iri=http://purl.obolibrary.org/obo/GO_$1")
    );
    assert_eq!(
        go.get_n2t_uri_format().as_deref(),
        Some("https://n2t.net/go:$1")
    );
    assert_eq!(get(&manager, "pdb").get_ols_uri_format(), None);
}

#[test]
fn test_formatter_priority() {
    let manager = manager();
    let go = get(&manager, "go");
    assert_eq!(
        go.get_uri_format(None).as_deref(),
        Some("http://amigo.geneontology.org/amigo/term/GO:$1")
    );
    assert_eq!(
        go.get_uri_format(Some(&[UriFormatter::Obofoundry, UriFormatter::Default][..]))
            .as_deref(),
        Some("http://purl.obolibrary.org/obo/GO_$1")
    );
    assert_eq!(
        go.get_uri_prefix(Some(&[UriFormatter::Miriam][..])).as_deref(),
        Some("https://identifiers.org/GO:")
    );
    // No strategy in the list applies
    assert_eq!(get(&manager, "pdb").get_uri_format(Some(&[UriFormatter::Ols][..])), None);
}

#[test]
fn test_uri_prefix_requires_trailing_placeholder() {
    let manager = manager();
    let wb = get(&manager, "wb");
    assert!(wb.get_uri_format(None).is_some());
    assert_eq!(wb.get_uri_prefix(None), None);

    assert_eq!(Resource::new("empty").get_uri_prefix(None), None);
}

// =============================================================================
// Identifiers
// =============================================================================

#[test]
fn test_banana() {
    let manager = manager();
    assert_eq!(get(&manager, "fbbt").get_banana().as_deref(), Some("FBbt"));
    assert_eq!(get(&manager, "vario").get_banana().as_deref(), Some("VariO"));
    assert_eq!(get(&manager, "go.ref").get_banana().as_deref(), Some("GO_REF"));
    assert_eq!(get(&manager, "pdb").get_banana(), None);
    // Explicitly not embedded, despite the OBO Foundry mapping
    assert_eq!(get(&manager, "ncbitaxon").get_banana(), None);
}

#[test]
fn test_banana_round_trip() {
    let manager = manager();
    let vario = get(&manager, "vario");
    let prefixed = vario.miriam_standardize_identifier("0376");
    assert_eq!(prefixed, "VariO:0376");
    assert_eq!(vario.standardize_identifier(&prefixed, None), "0376");
    assert_eq!(vario.miriam_standardize_identifier("VariO:0376"), "VariO:0376");
}

#[test]
fn test_standardize_strips_once() {
    let manager = manager();
    let swisslipid = get(&manager, "swisslipid");
    assert_eq!(swisslipid.standardize_identifier("SLM:000000341", None), "000000341");
    assert_eq!(swisslipid.standardize_identifier("SLM:SLM:1", None), "SLM:1");

    let pdb = get(&manager, "pdb");
    assert_eq!(pdb.standardize_identifier("PDB:2gc4", Some("pdb")), "2gc4");
    assert_eq!(pdb.standardize_identifier("2gc4", Some("pdb")), "2gc4");
}

#[test]
fn test_canonical_identifiers() {
    let manager = manager();
    let vario = get(&manager, "vario");
    assert_eq!(vario.is_canonical_identifier("0376").unwrap(), Some(true));
    assert_eq!(vario.is_canonical_identifier("VariO:0376").unwrap(), Some(false));
    assert_eq!(vario.is_known_identifier("VariO:0376").unwrap(), Some(true));

    // Partial matches do not count
    let rhea = get(&manager, "rhea");
    assert_eq!(rhea.is_canonical_identifier("123456").unwrap(), Some(false));

    assert_eq!(get(&manager, "dpo").is_canonical_identifier("0000001").unwrap(), None);
}

#[test]
fn test_examples_match_patterns() {
    let manager = manager();
    for (prefix, resource) in manager.registry() {
        if let Some(example) = resource.get_example() {
            assert_ne!(
                resource.is_canonical_identifier(example).unwrap(),
                Some(false),
                "{prefix} example {example} does not match its pattern"
            );
        }
    }
}
