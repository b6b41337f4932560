//! Page title types and normalisation.

/// A MediaWiki namespace as known to the built-in configuration.
#[derive(Debug)]
pub struct Namespace {
    /// The namespace ID.
    pub id: i32,
    /// The names of the namespace. The first name is the canonical one.
    pub names: &'static [&'static str],
}

impl Namespace {
    /// The ID of the main (article) namespace.
    pub const MAIN: i32 = 0;
    /// The ID of the `Template:` namespace.
    pub const TEMPLATE: i32 = 10;
    /// The ID of the `Category:` namespace.
    pub const CATEGORY: i32 = 14;
}

/// Normalises a page name as MediaWiki does for titles in first-letter case
/// namespaces: surrounding whitespace is removed and the first letter is
/// upper-cased.
pub fn normalize_page_name(name: &str) -> String {
    let name = name.trim();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
