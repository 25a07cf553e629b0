//! License name standardization
//!
//! External registries write the same license many ways. Known synonyms
//! are mapped onto SPDX-style identifiers; anything else passes through.

const LICENSE_SYNONYMS: &[(&str, &[&str])] = &[
    (
        "CC-BY-4.0",
        &[
            "cc by 4.0",
            "cc-by 4.0",
            "cc-by-4.0",
            "cc by",
            "cc-by",
            "creative commons attribution 4.0 international",
            "creative commons attribution 4.0 international (cc by 4.0)",
            "http://creativecommons.org/licenses/by/4.0/",
            "https://creativecommons.org/licenses/by/4.0/",
        ],
    ),
    (
        "CC-BY-3.0",
        &[
            "cc by 3.0",
            "cc-by 3.0",
            "cc-by-3.0",
            "http://creativecommons.org/licenses/by/3.0/",
            "https://creativecommons.org/licenses/by/3.0/",
        ],
    ),
    (
        "CC-BY-SA-4.0",
        &[
            "cc by-sa 4.0",
            "cc-by-sa 4.0",
            "cc-by-sa-4.0",
            "http://creativecommons.org/licenses/by-sa/4.0/",
        ],
    ),
    (
        "CC0-1.0",
        &[
            "cc0",
            "cc0 1.0",
            "cc0-1.0",
            "cc-0",
            "creative commons zero",
            "http://creativecommons.org/publicdomain/zero/1.0/",
            "https://creativecommons.org/publicdomain/zero/1.0/",
        ],
    ),
    ("GPL-3.0", &["gpl-3.0", "gnu gpl 3.0", "gplv3", "gpl v3"]),
    ("Apache-2.0", &["apache 2.0", "apache-2.0", "apache license 2.0"]),
];

/// Map a license string onto its standard identifier
pub fn standardize_license(license: &str) -> String {
    let key = license.trim().to_lowercase();
    LICENSE_SYNONYMS
        .iter()
        .find(|(_, synonyms)| synonyms.contains(&key.as_str()))
        .map(|(standard, _)| (*standard).to_string())
        .unwrap_or_else(|| license.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_synonyms() {
        assert_eq!(standardize_license("CC BY 4.0"), "CC-BY-4.0");
        assert_eq!(
            standardize_license("http://creativecommons.org/licenses/by/4.0/"),
            "CC-BY-4.0"
        );
        assert_eq!(standardize_license(" CC0 1.0 "), "CC0-1.0");
    }

    #[test]
    fn test_unknown_passes_through() {
        assert_eq!(standardize_license("Custom terms"), "Custom terms");
    }
}
