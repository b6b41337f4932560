//! The scan-rewrite engine.
//!
//! The rewriter walks the top level token list of a document in order and
//! replaces each token with its substitution. A running `delta` (the number
//! of bytes removed so far) maps each token's position in the source to its
//! position in the output, which is where the records collected for the token
//! are placed.

use super::{
    Argument, Configuration, Span, Spanned, Token, Value,
    visit::{self, Visitor},
};
use crate::{
    page::{Inclusion, Link, Parameter},
    title::{Namespace, normalize_page_name},
};
use indexmap::IndexMap;

/// The conversion mode for a document.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Mode {
    /// Template pages keep their markup, except for `<noinclude>` sections,
    /// and record their parameters.
    Template,
    /// Article pages are converted to plain text and record inclusions,
    /// links, and categories.
    Article {
        /// Whether the labels of category links are kept in the text.
        keep_categories: bool,
    },
}

/// A record collected during conversion.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) enum Record {
    /// A template parameter.
    Parameter(Parameter),
    /// A template inclusion.
    Inclusion(Inclusion),
    /// An ordinary link.
    Link(Link),
    /// A category name.
    Category(String),
}

impl Record {
    /// Moves the output position of the record by `offset` bytes.
    fn shift(&mut self, offset: usize) {
        if let Some((start, end)) = self.doc_range() {
            *start += offset;
            *end += offset;
        }
    }

    /// Moves the output position of the record back by `offset` bytes and
    /// clamps it to `len`.
    fn unshift(&mut self, offset: usize, len: usize) {
        if let Some((start, end)) = self.doc_range() {
            *start = start.saturating_sub(offset).min(len);
            *end = end.saturating_sub(offset).min(len);
        }
    }

    /// Replaces the source span of the record with the result of `f`.
    pub fn with_source(mut self, f: impl FnOnce(Span) -> Span) -> Self {
        match &mut self {
            Record::Parameter(Parameter { source, .. })
            | Record::Inclusion(Inclusion { source, .. })
            | Record::Link(Link { source, .. }) => *source = f(*source),
            Record::Category(_) => {}
        }
        self
    }

    /// The output position of the record, if it has one.
    fn doc_range(&mut self) -> Option<(&mut usize, &mut usize)> {
        match self {
            Record::Parameter(Parameter {
                start_doc, end_doc, ..
            })
            | Record::Inclusion(Inclusion {
                start_doc, end_doc, ..
            })
            | Record::Link(Link {
                start_doc, end_doc, ..
            }) => Some((start_doc, end_doc)),
            Record::Category(_) => None,
        }
    }
}

/// Converted text with the records collected from it. Record positions are
/// relative to the start of the text.
#[derive(Debug, Default)]
pub(super) struct Fragment {
    /// The converted text.
    pub text: String,
    /// The collected records, in document order.
    pub records: Vec<Record>,
}

impl Fragment {
    /// Creates a fragment with no records.
    fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            records: Vec::new(),
        }
    }

    /// Creates a fragment with a single record which covers the whole text.
    fn with_record(text: String, record: Record) -> Self {
        Self {
            text,
            records: vec![record],
        }
    }

    /// Appends a string.
    fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Appends another fragment.
    fn push(&mut self, other: Fragment) {
        let offset = self.text.len();
        self.text.push_str(&other.text);
        self.records.extend(other.records.into_iter().map(|mut record| {
            record.shift(offset);
            record
        }));
    }

    /// Removes surrounding whitespace from the text.
    fn trimmed(mut self) -> Self {
        let start = self.text.len() - self.text.trim_start().len();
        let text = self.text.trim().to_string();
        for record in &mut self.records {
            record.unshift(start, text.len());
        }
        self.text = text;
        self
    }
}

/// Rewrites token trees into output text.
pub(super) struct Rewriter<'a> {
    /// The source text of the token tree.
    source: &'a str,
    /// The parser configuration.
    config: &'a Configuration,
    /// The conversion mode.
    mode: Mode,
}

impl<'a> Rewriter<'a> {
    /// Creates a new rewriter.
    pub fn new(source: &'a str, config: &'a Configuration, mode: Mode) -> Self {
        Self {
            source,
            config,
            mode,
        }
    }

    /// Rewrites a contiguous list of tokens.
    // Clippy: text longer than `isize::MAX` cannot exist.
    #[allow(clippy::cast_possible_wrap)]
    pub fn rewrite(&self, tokens: &[Spanned<Token>]) -> Fragment {
        let Some(first) = tokens.first() else {
            return Fragment::default();
        };

        let base = first.span.start;
        let mut out = Fragment::default();
        let mut delta = 0_isize;
        for token in tokens {
            let mut sub = self.substitute(token);
            let start_doc = (token.span.start - base).saturating_add_signed(-delta);
            debug_assert_eq!(start_doc, out.text.len());
            delta += token.span.len() as isize - sub.text.len() as isize;

            for record in &mut sub.records {
                record.shift(start_doc);
            }
            out.text.push_str(&sub.text);
            out.records.append(&mut sub.records);
        }
        out
    }

    /// Returns the source text of a span.
    fn text(&self, span: Span) -> &'a str {
        &self.source[span.into_range()]
    }

    /// Returns the substitution for a single token.
    fn substitute(&self, token: &Spanned<Token>) -> Fragment {
        if matches!(token.node, Token::Unmatched) && self.config.drop_unmatched {
            return Fragment::default();
        }

        match self.mode {
            Mode::Template => self.substitute_template(token),
            Mode::Article { keep_categories } => self.substitute_article(token, keep_categories),
        }
    }

    /// Returns the substitution for a token of a template page.
    fn substitute_template(&self, token: &Spanned<Token>) -> Fragment {
        if matches!(token.node, Token::NoInclude { .. }) {
            return Fragment::default();
        }

        let mut collector = ParameterCollector {
            source: self.source,
            base: token.span.start,
            records: Vec::new(),
        };
        let Ok(()) = collector.visit_token(token);
        Fragment {
            text: self.text(token.span).to_string(),
            records: collector.records,
        }
    }

    /// Returns the substitution for a token of an article page.
    fn substitute_article(&self, token: &Spanned<Token>, keep_categories: bool) -> Fragment {
        match &token.node {
            Token::BehaviorSwitch
            | Token::Comment { .. }
            | Token::Extension { .. }
            | Token::HorizontalRule
            | Token::IncludeOnly { .. }
            | Token::Indent
            | Token::NoInclude { .. }
            | Token::Parameter { .. }
            | Token::ParserFunction { .. }
            | Token::Table
            | Token::Variable { .. } => Fragment::default(),
            Token::Abbr | Token::Text | Token::Unmatched | Token::Url => {
                Fragment::new(self.text(token.span))
            }
            Token::LineBreak => Fragment::new("\n"),
            Token::Cite { content } | Token::TextStyle { content, .. } => self.rewrite(content),
            Token::ExternalLink { target, anchor } => {
                let anchor = anchor.map_or("", |anchor| self.text(anchor).trim());
                if anchor.is_empty() {
                    Fragment::new(self.text(*target).trim())
                } else {
                    Fragment::new(anchor)
                }
            }
            Token::Heading { content, .. } => {
                let mut out = Fragment::new("\n");
                out.push(self.rewrite(content).trimmed());
                out.push_str("\n");
                out
            }
            Token::Link {
                namespace,
                target,
                label,
                trail,
                ..
            } => self.link(token.span, *namespace, *target, *label, *trail, keep_categories),
            Token::ListItem { bullets } => {
                Fragment::new(format!("\n{} ", "-".repeat(bullets.len())))
            }
            Token::Paragraph { content } => {
                let mut out = Fragment::new("\n");
                out.push(self.rewrite(content).trimmed());
                out
            }
            Token::Template {
                namespace,
                target,
                arguments,
                ..
            } => self.inclusion(token.span, *namespace, *target, arguments),
        }
    }

    /// Returns the substitution for an internal link, which is its label.
    fn link(
        &self,
        span: Span,
        namespace: Option<Span>,
        target: Span,
        label: Option<Span>,
        trail: Option<Span>,
        keep_categories: bool,
    ) -> Fragment {
        let page = self.text(target).trim();
        let mut text = label.map_or(page, |label| self.text(label).trim()).to_string();
        if let Some(trail) = trail {
            text.push_str(self.text(trail));
        }

        let namespace = namespace.and_then(|ns| self.config.namespaces.resolve(self.text(ns)));
        if namespace == Some(Namespace::CATEGORY) {
            let record = Record::Category(page.to_string());
            if !keep_categories {
                text.clear();
            }
            return Fragment::with_record(text, record);
        }

        let record = Record::Link(Link {
            target: page.to_string(),
            covered_text: text.clone(),
            start_doc: 0,
            end_doc: text.len(),
            source: span,
        });
        Fragment::with_record(text, record)
    }

    /// Returns the substitution for a template inclusion, which is the full
    /// name of the template.
    fn inclusion(
        &self,
        span: Span,
        namespace: Option<Span>,
        target: Span,
        arguments: &[Spanned<Argument>],
    ) -> Fragment {
        let namespaces = &self.config.namespaces;
        // An alias (`WP:`, `template:`) is written with the canonical name of
        // its namespace, so one template has one name in every record.
        let namespace = match namespace {
            Some(ns) => {
                let name = self.text(ns);
                namespaces
                    .resolve(name)
                    .and_then(|id| namespaces.canonical(id))
                    .unwrap_or(name)
            }
            None => namespaces.canonical(Namespace::TEMPLATE).unwrap_or_default(),
        };
        let template = format!("{namespace}:{}", normalize_page_name(self.text(target)));

        let mut args = IndexMap::new();
        let mut position = 0_usize;
        for argument in arguments {
            let value = self.text(argument.value.span);
            if let Some(name) = argument.name {
                args.insert(self.text(name).trim().to_string(), value.trim().to_string());
            } else {
                args.insert(position.to_string(), value.to_string());
                position += 1;
            }
        }

        let record = Record::Inclusion(Inclusion {
            template: template.clone(),
            args,
            start_doc: 0,
            end_doc: template.len(),
            source: span,
        });
        Fragment::with_record(template, record)
    }
}

/// Collects the parameters within a token of a template page, which is
/// copied unchanged to the output.
struct ParameterCollector<'a> {
    /// The source text.
    source: &'a str,
    /// The start of the token being collected in the source text. Since the
    /// token is copied unchanged, this is also the start of its output.
    base: usize,
    /// The collected records.
    records: Vec<Record>,
}

impl<'a> Visitor<'a, core::convert::Infallible> for ParameterCollector<'a> {
    fn source(&self) -> &'a str {
        self.source
    }

    fn visit_parameter(
        &mut self,
        span: Span,
        name: &'a str,
        default: Option<&'a Value>,
    ) -> Result<(), core::convert::Infallible> {
        let start_doc = span.start - self.base;
        self.records.push(Record::Parameter(Parameter {
            name: name.trim().to_string(),
            value: default.map_or_else(String::new, |value| {
                self.source[value.span.into_range()].to_string()
            }),
            covered_text: self.source[span.into_range()].to_string(),
            start_doc,
            end_doc: start_doc + span.len(),
            source: span,
        }));
        visit::visit_parameter(self, span, name, default)
    }
}
