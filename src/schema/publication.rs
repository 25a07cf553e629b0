use serde::{Deserialize, Serialize};

/// A publication describing a resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pubmed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pmc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
}

impl Publication {
    /// Whether two records refer to the same publication
    pub fn overlaps(&self, other: &Publication) -> bool {
        fn same(a: &Option<String>, b: &Option<String>) -> bool {
            matches!((a, b), (Some(a), Some(b)) if a == b)
        }
        let same_doi = matches!(
            (&self.doi, &other.doi),
            (Some(a), Some(b)) if a.eq_ignore_ascii_case(b)
        );
        same(&self.pubmed, &other.pubmed) || same(&self.pmc, &other.pmc) || same_doi
    }

    /// Fill fields missing here from `other`
    fn absorb(&mut self, other: Publication) {
        self.pubmed = self.pubmed.take().or(other.pubmed);
        self.doi = self.doi.take().or(other.doi);
        self.pmc = self.pmc.take().or(other.pmc);
        self.title = self.title.take().or(other.title);
        self.year = self.year.or(other.year);
    }
}

/// Merge publications that share a PubMed, DOI, or PMC identifier.
///
/// Earlier entries take precedence field by field; order of first
/// appearance is kept.
pub fn deduplicate_publications(publications: Vec<Publication>) -> Vec<Publication> {
    let mut rv: Vec<Publication> = Vec::with_capacity(publications.len());
    for publication in publications {
        match rv.iter_mut().find(|p| p.overlaps(&publication)) {
            Some(existing) => existing.absorb(publication),
            None => rv.push(publication),
        }
    }
    rv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deduplicate_merges_fields() {
        let publications = vec![
            Publication {
                pubmed: Some("26467479".to_string()),
                title: Some("ChEBI in 2016".to_string()),
                ..Default::default()
            },
            Publication {
                doi: Some("10.1093/nar/gkv1031".to_string()),
                ..Default::default()
            },
            Publication {
                pubmed: Some("26467479".to_string()),
                doi: Some("10.1093/NAR/GKV1031".to_string()),
                year: Some(2016),
                ..Default::default()
            },
        ];
        let rv = deduplicate_publications(publications);
        assert_eq!(rv.len(), 2);
        assert_eq!(rv[0].title.as_deref(), Some("ChEBI in 2016"));
        assert_eq!(rv[0].doi.as_deref(), Some("10.1093/NAR/GKV1031"));
        assert_eq!(rv[0].year, Some(2016));
        assert_eq!(rv[1].doi.as_deref(), Some("10.1093/nar/gkv1031"));
    }
}
