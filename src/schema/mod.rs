//! Entity types for the registry, metaregistry, and collections

use regex::Regex;
use std::sync::LazyLock;

mod author;
mod collection;
mod provider;
mod publication;
mod registry;
mod resource;

pub use author::Author;
pub use collection::Collection;
pub use provider::Provider;
pub use publication::{deduplicate_publications, Publication};
pub use registry::Registry;
pub use resource::Resource;

/// Pattern for contact and author email addresses
pub const EMAIL_RE_STR: &str = r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9-.]+$";

pub(crate) static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_RE_STR).expect("email pattern compiles"));

/// Check an email address against [`EMAIL_RE_STR`]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}
