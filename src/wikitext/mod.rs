//! Wikitext to plain text conversion.
//!
//! A document is first tokenised by a [`peg`] grammar into a tree of markup
//! constructs, then rewritten by a [`Mode`] into plain text. The same grammar
//! serves template pages and article pages; only the rewriting differs.

use crate::page::{Article, Inclusion, Link, Parameter, Template};
pub(crate) use codemap::{FileMap, Span, Spanned};
pub(crate) use config::{Configuration, ConfigurationSource, DEFAULT_MAX_DEPTH};
pub(crate) use inspectors::inspect;
pub(crate) use peg::str::LineCol;
pub(crate) use rewrite::Mode;

mod codemap;
mod config;
mod include;
mod inspectors;
mod parser;
mod rewrite;
#[cfg(test)]
mod tests;
pub(crate) mod visit;

/// A parser error.
#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    /// A keyword category had no keywords at all.
    #[error("the {0} keyword table is empty")]
    EmptyKeywords(&'static str),

    /// A namespace required by the parser has no name.
    #[error("namespace {0} has no name")]
    MissingNamespace(i32),

    /// The grammar rejected the input.
    #[error(transparent)]
    Syntax(#[from] peg::error::ParseError<LineCol>),

    /// Markup was nested deeper than the configured limit.
    #[error("markup nested deeper than {limit} levels at {at}")]
    TooDeep {
        /// The configured nesting limit.
        limit: usize,
        /// Where the limit was first exceeded.
        at: LineCol,
    },
}

/// A Wikitext parser.
///
/// A parser holds no per-document state, so one parser can convert any
/// number of documents.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Parser<'a> {
    /// The configuration for the parser.
    config: &'a Configuration,
}

impl<'a> Parser<'a> {
    /// Creates a new parser with the given configuration.
    pub fn new(config: &'a Configuration) -> Self {
        Self { config }
    }

    /// Converts the text of a template page in place and collects its
    /// parameters.
    pub fn parse_template(&self, page: &mut Template) -> Result<(), Error> {
        let output = self.transform(&page.page.text, Mode::Template)?;
        page.page.text = output.text;
        page.params = output.parameters;
        Ok(())
    }

    /// Converts the text of an article page in place and collects its
    /// inclusions, links, and categories. If `keep_categories` is true, the
    /// labels of category links are kept in the text.
    pub fn parse_article(&self, page: &mut Article, keep_categories: bool) -> Result<(), Error> {
        let output = self.transform(&page.page.text, Mode::Article { keep_categories })?;
        page.page.text = output.text;
        page.inclusions = output.inclusions;
        page.links = output.links;
        page.categories = output.categories;
        Ok(())
    }

    /// Converts `source` with the given mode.
    pub fn transform(&self, source: &str, mode: Mode) -> Result<Output, Error> {
        let included = include::only_include(source);
        let text = included.text();
        let root = self.tokenize(text)?;
        let fragment = rewrite::Rewriter::new(text, self.config, mode).rewrite(&root);

        let mut output = Output {
            text: fragment.text,
            ..Default::default()
        };
        for record in fragment.records {
            match record.with_source(|span| included.span_to_original(span)) {
                rewrite::Record::Parameter(p) => output.parameters.push(p),
                rewrite::Record::Inclusion(i) => output.inclusions.push(i),
                rewrite::Record::Link(l) => output.links.push(l),
                rewrite::Record::Category(c) => output.categories.push(c),
            }
        }
        Ok(output)
    }

    /// Tokenises `source` into a token tree.
    pub fn tokenize(&self, source: &str) -> Result<Vec<Spanned<Token>>, Error> {
        let depth = parser::Depth::new(self.config.max_depth);
        let root = parser::wikitext::start(source, self.config, &depth)?;
        if let Some(pos) = depth.exceeded() {
            return Err(Error::TooDeep {
                limit: self.config.max_depth,
                at: FileMap::new(source).find_line_col(pos),
            });
        }

        if log::log_enabled!(log::Level::Trace) {
            log::trace!("{:#?}", inspect(&FileMap::new(source), &root));
        }

        Ok(root)
    }
}

/// The result of converting a document.
#[derive(Debug, Default)]
pub(crate) struct Output {
    /// The plain text.
    pub text: String,
    /// Template parameters, in document order.
    pub parameters: Vec<Parameter>,
    /// Template inclusions, in document order.
    pub inclusions: Vec<Inclusion>,
    /// Links, in document order.
    pub links: Vec<Link>,
    /// Category names, in document order.
    pub categories: Vec<String>,
}

/// A run of markup with its extent, as found in argument values.
pub(crate) type Value = Spanned<Vec<Spanned<Token>>>;

/// A template argument.
///
/// ```wikitext
/// {{Template|name=value|positional}}
///            ^^^^^^^^^^ ^^^^^^^^^^
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Argument {
    /// The argument name, if the argument is named.
    pub name: Option<Span>,
    /// The argument value.
    pub value: Value,
}

/// A heading level.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub(crate) struct HeadingLevel(u8);

impl HeadingLevel {
    /// All heading levels, deepest first.
    pub const ALL: [HeadingLevel; 6] = [
        HeadingLevel(6),
        HeadingLevel(5),
        HeadingLevel(4),
        HeadingLevel(3),
        HeadingLevel(2),
        HeadingLevel(1),
    ];

    /// Returns the `=` run which delimits a heading of this level.
    pub fn marker(self) -> &'static str {
        &"======"[..usize::from(self.0)]
    }

    /// Returns the HTML start and end tags of this heading level.
    pub fn tags(self) -> (&'static str, &'static str) {
        const TAGS: [(&str, &str); 6] = [
            ("<h1>", "</h1>"),
            ("<h2>", "</h2>"),
            ("<h3>", "</h3>"),
            ("<h4>", "</h4>"),
            ("<h5>", "</h5>"),
            ("<h6>", "</h6>"),
        ];
        TAGS[usize::from(self.0) - 1]
    }
}

impl From<HeadingLevel> for u8 {
    fn from(value: HeadingLevel) -> Self {
        value.0
    }
}

/// A text style.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum TextStyle {
    /// Bold text.
    Bold,
    /// Bold and italic text.
    BoldItalic,
    /// Italic text.
    Italic,
}

/// A markup construct.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Token {
    /// An abbreviation element.
    ///
    /// ```wikitext
    /// <abbr title="HyperText Markup Language">HTML</abbr>
    /// ```
    Abbr,
    /// A behavior switch.
    ///
    /// ```wikitext
    /// __NOTOC__
    /// ```
    BehaviorSwitch,
    /// A citation element.
    Cite {
        /// The cited content.
        content: Vec<Spanned<Token>>,
    },
    /// An HTML comment.
    Comment {
        /// The raw contents of the comment.
        content: Span,
        /// Whether the comment was unterminated.
        unclosed: bool,
    },
    /// An extension tag.
    ///
    /// ```wikitext
    /// <ref name="a">content</ref> <references/>
    /// ```
    Extension {
        /// The tag name.
        name: Span,
        /// The raw content, if the tag was not self-closing.
        content: Option<Span>,
    },
    /// An external link.
    ///
    /// ```wikitext
    /// [https://example.com anchor]
    /// ```
    ExternalLink {
        /// The URL.
        target: Span,
        /// The anchor text.
        anchor: Option<Span>,
    },
    /// A heading.
    Heading {
        /// The heading level.
        level: HeadingLevel,
        /// The heading content.
        content: Vec<Spanned<Token>>,
    },
    /// A horizontal rule.
    HorizontalRule,
    /// An `<includeonly>` section.
    IncludeOnly {
        /// The section content.
        content: Vec<Spanned<Token>>,
    },
    /// A run of colons at the start of a line.
    Indent,
    /// A line break element.
    LineBreak,
    /// An internal link.
    ///
    /// ```wikitext
    /// [[:en:wikt:Category:Name#Section|Label]]trail
    /// ```
    Link {
        /// The interwiki prefix, including its colons.
        interwiki: Option<Span>,
        /// The namespace name, excluding its colon.
        namespace: Option<Span>,
        /// The page name.
        target: Span,
        /// The section name, excluding `#`.
        section: Option<Span>,
        /// The label.
        label: Option<Span>,
        /// Letters directly after the link which become part of the label.
        trail: Option<Span>,
    },
    /// A list item marker.
    ListItem {
        /// The bullet characters, excluding trailing whitespace.
        bullets: Span,
    },
    /// A `<noinclude>` section.
    NoInclude {
        /// The raw content.
        content: Span,
    },
    /// A paragraph element.
    Paragraph {
        /// The paragraph content.
        content: Vec<Spanned<Token>>,
    },
    /// A template parameter.
    ///
    /// ```wikitext
    /// {{{name|default}}}
    /// ```
    Parameter {
        /// The parameter name.
        name: Span,
        /// The default value.
        default: Option<Value>,
    },
    /// A parser function call.
    ///
    /// ```wikitext
    /// {{#if:a|b|c}}
    /// ```
    ParserFunction {
        /// The function name.
        name: Span,
        /// The arguments.
        arguments: Vec<Value>,
    },
    /// A table.
    Table,
    /// A template inclusion.
    ///
    /// ```wikitext
    /// {{subst:Template:Name|arg|name=value}}
    /// ```
    Template {
        /// The inclusion modifier, excluding its colon.
        modifier: Option<Span>,
        /// The namespace name, excluding its colon.
        namespace: Option<Span>,
        /// The page name.
        target: Span,
        /// The arguments.
        arguments: Vec<Spanned<Argument>>,
    },
    /// Plain text.
    Text,
    /// Styled text.
    TextStyle {
        /// The style.
        style: TextStyle,
        /// The styled content.
        content: Vec<Spanned<Token>>,
    },
    /// A character which starts no markup.
    Unmatched,
    /// A bare URL.
    Url,
    /// A variable.
    ///
    /// ```wikitext
    /// {{PAGENAME}} {{DISPLAYTITLE:title}}
    /// ```
    Variable {
        /// The variable name.
        name: Span,
        /// The arguments.
        arguments: Vec<Value>,
    },
}
