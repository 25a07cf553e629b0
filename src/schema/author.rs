use serde::{Deserialize, Serialize};

use super::is_valid_email;
use crate::error::{RegistryError, Result};

/// Metadata for an author, contributor, or reviewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// The full name of the author
    pub name: String,
    /// The author's ORCiD, used as the key for contributions
    pub orcid: String,
    /// An email address specific to the author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Author {
    pub fn new(name: impl Into<String>, orcid: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            orcid: orcid.into(),
            email: None,
        }
    }

    /// Fail if an email is given but malformed
    pub fn validate(&self) -> Result<()> {
        match &self.email {
            Some(email) if !is_valid_email(email) => Err(RegistryError::InvalidEmail {
                orcid: self.orcid.clone(),
                email: email.clone(),
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        let mut author = Author::new("Charles Tapley Hoyt", "0000-0003-4423-4370");
        assert!(author.validate().is_ok());

        author.email = Some("cthoyt@gmail.com".to_string());
        assert!(author.validate().is_ok());

        author.email = Some("cthoyt at gmail".to_string());
        assert!(matches!(author.validate(), Err(RegistryError::InvalidEmail { .. })));
    }
}
