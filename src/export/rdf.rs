//! RDF export as N-Triples

use oxrdf::vocab::{rdf, rdfs, xsd};
use oxrdf::{Literal, NamedNode, Triple};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::Result;
use crate::manager::Manager;
use crate::schema::{Author, Collection, Registry, Resource};

pub const RDF_NT_PATH: &str = "rdf/bioregistry.nt";

const RESOURCE_NS: &str = "https://bioregistry.io/";
const METARESOURCE_NS: &str = "https://bioregistry.io/metaregistry/";
const COLLECTION_NS: &str = "https://bioregistry.io/collection/";
const SCHEMA_NS: &str = "https://bioregistry.io/schema/#";
const ORCID_NS: &str = "https://orcid.org/";

const DC_DESCRIPTION: &str = "http://purl.org/dc/elements/1.1/description";
const DC_CREATOR: &str = "http://purl.org/dc/elements/1.1/creator";
const DCTERMS_IS_PART_OF: &str = "http://purl.org/dc/terms/isPartOf";
const DCTERMS_HAS_PART: &str = "http://purl.org/dc/terms/hasPart";
const DCTERMS_CONTRIBUTOR: &str = "http://purl.org/dc/terms/contributor";
const FOAF_HOMEPAGE: &str = "http://xmlns.com/foaf/0.1/homepage";
const SKOS_EXACT_MATCH: &str = "http://www.w3.org/2004/02/skos/core#exactMatch";

fn iri(value: impl Into<String>) -> NamedNode {
    NamedNode::new_unchecked(value)
}

fn schema(local: &str) -> NamedNode {
    iri(format!("{SCHEMA_NS}{local}"))
}

fn resource_node(prefix: &str) -> NamedNode {
    iri(format!("{RESOURCE_NS}{prefix}"))
}

fn metaresource_node(metaprefix: &str) -> NamedNode {
    iri(format!("{METARESOURCE_NS}{metaprefix}"))
}

fn text(value: &str) -> Literal {
    Literal::new_simple_literal(value)
}

fn author_node(author: &Author, triples: &mut Vec<Triple>) -> NamedNode {
    let node = iri(format!("{ORCID_NS}{}", author.orcid));
    triples.push(Triple::new(node.clone(), rdfs::LABEL, text(&author.name)));
    node
}

fn add_registry(registry: &Registry, triples: &mut Vec<Triple>) {
    let node = metaresource_node(&registry.prefix);
    triples.push(Triple::new(node.clone(), rdf::TYPE, schema("0000002")));
    triples.push(Triple::new(node.clone(), rdfs::LABEL, text(&registry.name)));
    triples.push(Triple::new(node.clone(), iri(DC_DESCRIPTION), text(&registry.description)));
    triples.push(Triple::new(node.clone(), iri(FOAF_HOMEPAGE), text(&registry.homepage)));
    triples.push(Triple::new(node.clone(), schema("0000005"), text(&registry.example)));
    if let Some(provider_uri_format) = &registry.provider_uri_format {
        triples.push(Triple::new(node.clone(), schema("0000006"), text(provider_uri_format)));
    }
    if let Some(resolver_uri_format) = &registry.resolver_uri_format {
        triples.push(Triple::new(node, schema("0000007"), text(resolver_uri_format)));
    }
}

fn add_collection(collection: &Collection, triples: &mut Vec<Triple>) {
    let node = iri(format!("{COLLECTION_NS}{}", collection.identifier));
    triples.push(Triple::new(node.clone(), rdf::TYPE, schema("0000003")));
    triples.push(Triple::new(node.clone(), rdfs::LABEL, text(&collection.name)));
    triples.push(Triple::new(node.clone(), iri(DC_DESCRIPTION), text(&collection.description)));
    for author in &collection.authors {
        let author = author_node(author, triples);
        triples.push(Triple::new(node.clone(), iri(DC_CREATOR), author));
    }
    for prefix in &collection.resources {
        triples.push(Triple::new(node.clone(), iri(DCTERMS_HAS_PART), resource_node(prefix)));
    }
}

fn add_resource(manager: &Manager, resource: &Resource, triples: &mut Vec<Triple>) {
    let prefix = resource.prefix();
    let node = resource_node(prefix);
    let bioregistry = metaresource_node("bioregistry");

    triples.push(Triple::new(node.clone(), rdf::TYPE, schema("0000001")));
    if let Some(name) = resource.get_name() {
        triples.push(Triple::new(node.clone(), rdfs::LABEL, text(name)));
    }
    triples.push(Triple::new(node.clone(), iri(DCTERMS_IS_PART_OF), bioregistry.clone()));
    triples.push(Triple::new(bioregistry, iri(DCTERMS_HAS_PART), node.clone()));

    for synonym in resource.get_synonyms() {
        triples.push(Triple::new(node.clone(), schema("0000023"), text(synonym)));
    }
    if let Some(pattern) = resource.get_pattern() {
        triples.push(Triple::new(node.clone(), schema("0000008"), text(&pattern)));
    }
    if let Some(uri_format) = resource.get_uri_format(None) {
        triples.push(Triple::new(node.clone(), schema("0000006"), text(&uri_format)));
    }
    if let Some(example) = resource.get_example() {
        triples.push(Triple::new(node.clone(), schema("0000005"), text(example)));
    }
    let deprecated = if resource.is_deprecated() { "true" } else { "false" };
    triples.push(Triple::new(
        node.clone(),
        schema("0000012"),
        Literal::new_typed_literal(deprecated, xsd::BOOLEAN),
    ));
    if let Some(description) = resource.get_description() {
        triples.push(Triple::new(node.clone(), iri(DC_DESCRIPTION), text(description)));
    }
    if let Some(homepage) = resource.get_homepage() {
        triples.push(Triple::new(node.clone(), iri(FOAF_HOMEPAGE), text(homepage)));
    }
    let download = resource
        .get_download_owl()
        .or_else(|| resource.get_download_obo())
        .or_else(|| resource.get_download_obograph());
    if let Some(download) = download {
        triples.push(Triple::new(node.clone(), schema("0000010"), iri(download)));
    }

    for depends_on in &resource.depends_on {
        triples.push(Triple::new(node.clone(), schema("0000017"), resource_node(depends_on)));
    }
    for appears_in in &resource.appears_in {
        triples.push(Triple::new(node.clone(), schema("0000018"), resource_node(appears_in)));
    }
    if let Some(part_of) = &resource.part_of {
        triples.push(Triple::new(node.clone(), iri(DCTERMS_IS_PART_OF), resource_node(part_of)));
        triples.push(Triple::new(resource_node(part_of), iri(DCTERMS_HAS_PART), node.clone()));
    }
    if let Some(provides) = &resource.provides {
        triples.push(Triple::new(node.clone(), schema("0000011"), resource_node(provides)));
    }
    if let Some(has_canonical) = &resource.has_canonical {
        triples.push(Triple::new(node.clone(), schema("0000016"), resource_node(has_canonical)));
    }
    if let Some(contact) = resource.get_contact() {
        triples.push(Triple::new(node.clone(), schema("0000019"), iri(format!("mailto:{contact}"))));
    }
    if let Some(reviewer) = &resource.reviewer {
        let reviewer = author_node(reviewer, triples);
        triples.push(Triple::new(node.clone(), schema("0000021"), reviewer));
    }
    if let Some(contributor) = &resource.contributor {
        let contributor = author_node(contributor, triples);
        triples.push(Triple::new(contributor, iri(DCTERMS_CONTRIBUTOR), node.clone()));
    }

    for (metaprefix, external) in resource.get_mappings() {
        let Some(registry) = manager.get_registry(&metaprefix) else {
            debug!(%prefix, %metaprefix, "mapping to a registry missing from the metaregistry");
            continue;
        };
        let Some(external_iri) = registry.get_provider_uri_format(&external) else {
            debug!(%metaprefix, "registry has no provider URI format");
            continue;
        };
        let external_node = iri(external_iri);
        let metaresource = metaresource_node(&registry.prefix);
        triples.push(Triple::new(node.clone(), iri(SKOS_EXACT_MATCH), external_node.clone()));
        triples.push(Triple::new(external_node.clone(), iri(DCTERMS_IS_PART_OF), metaresource.clone()));
        triples.push(Triple::new(metaresource, iri(DCTERMS_HAS_PART), external_node));
    }
}

/// Every triple describing the registry, metaregistry, and collections
pub fn get_triples(manager: &Manager) -> Vec<Triple> {
    let mut triples = Vec::new();
    for registry in manager.metaregistry().values() {
        add_registry(registry, &mut triples);
    }
    for collection in manager.collections().values() {
        add_collection(collection, &mut triples);
    }
    for resource in manager.registry().values() {
        add_resource(manager, resource, &mut triples);
    }
    triples
}

/// Serialize as N-Triples, sorted and de-duplicated
pub fn to_ntriples(triples: &[Triple]) -> String {
    let mut lines: Vec<String> = triples.iter().map(|triple| format!("{triple} .")).collect();
    lines.sort();
    lines.dedup();
    let mut rv = lines.join("\n");
    rv.push('\n');
    rv
}

pub fn export_rdf(manager: &Manager, dir: &Path) -> Result<Vec<PathBuf>> {
    let path = dir.join(RDF_NT_PATH);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, to_ntriples(&get_triples(manager)))?;
    Ok(vec![PathBuf::from(RDF_NT_PATH)])
}
