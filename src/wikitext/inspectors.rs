//! Helpers for improved debug formatting of token trees.

use crate::wikitext::{
    Argument, TextStyle, Token,
    codemap::{FileMap, Span, Spanned},
};
use core::fmt::{self, Write as _};

/// Returns a debug inspector for a token list using the given source code.
pub(crate) fn inspect<'a, T>(
    input: &'a FileMap<'a>,
    tree: &'a [T],
) -> VInspector<'a, T::Inspector<'a>>
where
    T: Inspectable,
    T::Inspector<'a>: TInspector<'a, Inspectee = T>,
{
    VInspector::<'a, T::Inspector<'a>>(input, tree)
}

/// An inspectable type.
pub(crate) trait Inspectable {
    /// The default inspector for the type.
    type Inspector<'a>: TInspector<'a>;
}

/// Convenience macro for defining inspectable types.
macro_rules! inspectable {
    ($($ty:ty => $by:ident),*, $(,)?) => {
        $(impl Inspectable for Spanned<$ty> {
            type Inspector<'a> = $by<'a>;
        })*
    }
}

inspectable! {
    Argument => ArgumentInspector,
    Token => TokenInspector,
}

/// A trait for debug formatting of various parser items.
pub(crate) trait TInspector<'a>: fmt::Debug {
    /// The type to be inspected.
    type Inspectee;
    /// Create an debug formatter for the given object.
    fn inspect(input: &'a FileMap<'a>, object: &'a Self::Inspectee) -> Self
    where
        Self: Sized;
}

/// A debug formatter for slices of parser items.
pub(crate) struct VInspector<'a, T>(&'a FileMap<'a>, &'a [T::Inspectee])
where
    T: TInspector<'a>;

impl<'a, T> fmt::Debug for VInspector<'a, T>
where
    T: TInspector<'a>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.1.iter().map(|inspect| T::inspect(self.0, inspect)))
            .finish()
    }
}

/// A debug formatter for [`Argument`].
pub(crate) struct ArgumentInspector<'a>(&'a FileMap<'a>, &'a Spanned<Argument>);

impl<'a> TInspector<'a> for ArgumentInspector<'a> {
    type Inspectee = Spanned<Argument>;

    fn inspect(input: &'a FileMap<'a>, object: &'a Self::Inspectee) -> Self {
        Self(input, object)
    }
}

impl fmt::Debug for ArgumentInspector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entry(
                &self.1.name.map(|name| &self.0[name.into_range()]),
                &VInspector::<TokenInspector<'_>>(self.0, &self.1.value.node),
            )
            .finish()
    }
}

/// A debug formatter for [`Token`].
pub(crate) struct TokenInspector<'a>(&'a FileMap<'a>, &'a Spanned<Token>);

impl<'a> TInspector<'a> for TokenInspector<'a> {
    type Inspectee = Spanned<Token>;

    fn inspect(input: &'a FileMap<'a>, object: &'a Self::Inspectee) -> Self {
        Self(input, object)
    }
}

impl TokenInspector<'_> {
    /// Returns the source text of the given span.
    fn text(&self, span: Span) -> &str {
        &self.0[span.into_range()]
    }

    /// Returns the source text of the given optional span.
    fn opt_text(&self, span: Option<Span>) -> Option<&str> {
        span.map(|span| self.text(span))
    }

    /// Returns a formatter for a list of tokens.
    fn tokens<'b>(&'b self, content: &'b [Spanned<Token>]) -> VInspector<'b, TokenInspector<'b>> {
        VInspector(self.0, content)
    }

    /// Returns the name of the token decorated with its location.
    fn tag(&self, name: &str) -> String {
        span_name(name, self.0, self.1)
    }

    /// Returns a formatter for a list of argument values.
    fn values<'b>(&'b self, values: &'b [Spanned<Vec<Spanned<Token>>>]) -> ValuesInspector<'b> {
        ValuesInspector(self.0, values)
    }
}

impl fmt::Debug for TokenInspector<'_> {
    #[allow(clippy::too_many_lines)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.1.node {
            Token::Abbr => f.debug_tuple(&self.tag("Abbr")).field(&self.text(self.1.span)).finish(),
            Token::BehaviorSwitch => f
                .debug_tuple(&self.tag("BehaviorSwitch"))
                .field(&self.text(self.1.span))
                .finish(),
            Token::Cite { content } => f
                .debug_tuple(&self.tag("Cite"))
                .field(&self.tokens(content))
                .finish(),
            Token::Comment { content, unclosed } => f
                .debug_struct(&self.tag("Comment"))
                .field("content", &self.text(*content))
                .field("unclosed", unclosed)
                .finish(),
            Token::Extension { name, content } => f
                .debug_struct(&self.tag("Extension"))
                .field("name", &self.text(*name))
                .field("content", &self.opt_text(*content))
                .finish(),
            Token::ExternalLink { target, anchor } => f
                .debug_struct(&self.tag("ExternalLink"))
                .field("target", &self.text(*target))
                .field("anchor", &self.opt_text(*anchor))
                .finish(),
            Token::Heading { level, content } => f
                .debug_struct(&self.tag("Heading"))
                .field("level", &u8::from(*level))
                .field("content", &self.tokens(content))
                .finish(),
            Token::HorizontalRule => f.write_str(&self.tag("HorizontalRule")),
            Token::IncludeOnly { content } => f
                .debug_tuple(&self.tag("IncludeOnly"))
                .field(&self.tokens(content))
                .finish(),
            Token::Indent => f.write_str(&self.tag("Indent")),
            Token::LineBreak => f.write_str(&self.tag("LineBreak")),
            Token::Link {
                interwiki,
                namespace,
                target,
                section,
                label,
                trail,
            } => f
                .debug_struct(&self.tag("Link"))
                .field("interwiki", &self.opt_text(*interwiki))
                .field("namespace", &self.opt_text(*namespace))
                .field("target", &self.text(*target))
                .field("section", &self.opt_text(*section))
                .field("label", &self.opt_text(*label))
                .field("trail", &self.opt_text(*trail))
                .finish(),
            Token::ListItem { bullets } => f
                .debug_tuple(&self.tag("ListItem"))
                .field(&self.text(*bullets))
                .finish(),
            Token::NoInclude { content } => f
                .debug_tuple(&self.tag("NoInclude"))
                .field(&self.text(*content))
                .finish(),
            Token::Paragraph { content } => f
                .debug_tuple(&self.tag("Paragraph"))
                .field(&self.tokens(content))
                .finish(),
            Token::Parameter { name, default } => f
                .debug_struct(&self.tag("Parameter"))
                .field("name", &self.text(*name))
                .field("default", &default.as_ref().map(|value| self.tokens(&value.node)))
                .finish(),
            Token::ParserFunction { name, arguments } => f
                .debug_struct(&self.tag("ParserFunction"))
                .field("name", &self.text(*name))
                .field("arguments", &self.values(arguments))
                .finish(),
            Token::Table => f.write_str(&self.tag("Table")),
            Token::Template {
                modifier,
                namespace,
                target,
                arguments,
            } => f
                .debug_struct(&self.tag("Template"))
                .field("modifier", &self.opt_text(*modifier))
                .field("namespace", &self.opt_text(*namespace))
                .field("target", &self.text(*target))
                .field(
                    "arguments",
                    &VInspector::<ArgumentInspector<'_>>(self.0, arguments),
                )
                .finish(),
            Token::Text => fmt::Debug::fmt(&self.text(self.1.span), f),
            Token::TextStyle { style, content } => {
                let name = match style {
                    TextStyle::Italic => "Italic",
                    TextStyle::Bold => "Bold",
                    TextStyle::BoldItalic => "BoldItalic",
                };
                f.debug_tuple(&self.tag(name)).field(&self.tokens(content)).finish()
            }
            Token::Unmatched => f
                .debug_tuple(&self.tag("Unmatched"))
                .field(&self.text(self.1.span))
                .finish(),
            Token::Url => f.debug_tuple(&self.tag("Url")).field(&self.text(self.1.span)).finish(),
            Token::Variable { name, arguments } => f
                .debug_struct(&self.tag("Variable"))
                .field("name", &self.text(*name))
                .field("arguments", &self.values(arguments))
                .finish(),
        }
    }
}

/// A debug formatter for the argument values of a magic word.
struct ValuesInspector<'a>(&'a FileMap<'a>, &'a [Spanned<Vec<Spanned<Token>>>]);

impl fmt::Debug for ValuesInspector<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(
                self.1
                    .iter()
                    .map(|value| VInspector::<TokenInspector<'_>>(self.0, &value.node)),
            )
            .finish()
    }
}

/// Decorates an item name with the line and column information of the object in
/// the source code.
fn span_name<T>(name: &str, input: &FileMap<'_>, spanned: &Spanned<T>) -> String {
    let start = input.find_line_col(spanned.span.start);
    let end = input.find_line_col(spanned.span.end);
    let mut out = format!("{name} @ {start}..");
    if start.line == end.line {
        let _ = write!(out, "{}", end.column);
    } else {
        let _ = write!(out, "{}:{}", end.line, end.column);
    }
    out
}
