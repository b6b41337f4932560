//! Page records and the side records collected while converting them.

use crate::wikitext::Span;
use indexmap::IndexMap;
use serde::Serialize;

/// A single revision of a wiki page.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub(crate) struct Page {
    /// The page title.
    pub title: String,
    /// The page ID.
    #[serde(rename = "_id")]
    pub id: u64,
    /// The redirect target title, or an empty string if the page is not a
    /// redirect.
    pub redirect: String,
    /// The revision ID.
    #[serde(rename = "revid")]
    pub revision: u64,
    /// The revision text. After conversion, this is plain text.
    #[serde(rename = "content")]
    pub text: String,
}

/// An article page.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub(crate) struct Article {
    /// The page.
    #[serde(flatten)]
    pub page: Page,
    /// Category names, in document order.
    #[serde(rename = "category")]
    pub categories: Vec<String>,
    /// Template inclusions, in document order.
    #[serde(skip)]
    pub inclusions: Vec<Inclusion>,
    /// Links, in document order.
    #[serde(skip)]
    pub links: Vec<Link>,
}

impl From<Page> for Article {
    fn from(page: Page) -> Self {
        Self {
            page,
            ..Default::default()
        }
    }
}

/// A template page.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub(crate) struct Template {
    /// The page.
    #[serde(flatten)]
    pub page: Page,
    /// Template parameters, in document order.
    pub params: Vec<Parameter>,
}

impl From<Page> for Template {
    fn from(page: Page) -> Self {
        Self {
            page,
            ..Default::default()
        }
    }
}

/// A template parameter.
///
/// ```wikitext
/// {{{name|value}}}
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub(crate) struct Parameter {
    /// The parameter name.
    pub name: String,
    /// The default value, or an empty string.
    pub value: String,
    /// The parameter markup.
    pub covered_text: String,
    /// The start of [`Self::covered_text`] in the converted text.
    pub start_doc: usize,
    /// The end of [`Self::covered_text`] in the converted text.
    pub end_doc: usize,
    /// The extent of the parameter in the original page text.
    #[serde(skip)]
    pub source: Span,
}

/// A template inclusion.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub(crate) struct Inclusion {
    /// The full name of the template, as `namespace:name`.
    pub template: String,
    /// The arguments, by name. Positional arguments are named by their
    /// zero-based index.
    pub args: IndexMap<String, String>,
    /// The start of [`Self::template`] in the converted text.
    pub start_doc: usize,
    /// The end of [`Self::template`] in the converted text.
    pub end_doc: usize,
    /// The extent of the inclusion in the original page text.
    #[serde(skip)]
    pub source: Span,
}

/// An internal or interwiki link.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub(crate) struct Link {
    /// The target page name.
    pub target: String,
    /// The rendered label.
    pub covered_text: String,
    /// The start of [`Self::covered_text`] in the converted text.
    pub start_doc: usize,
    /// The end of [`Self::covered_text`] in the converted text.
    pub end_doc: usize,
    /// The extent of the link in the original page text.
    #[serde(skip)]
    pub source: Span,
}
