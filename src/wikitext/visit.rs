//! Helper trait for implementing token tree visitors.

use super::{Argument, HeadingLevel, Span, Spanned, TextStyle, Token, Value};

/// A trait for visiting the tokens of a token tree.
///
/// Every method has a default implementation which walks into the nested
/// markup of the token, so an implementor only needs to override the
/// methods for the tokens it cares about.
pub(crate) trait Visitor<'tt, E> {
    /// Returns the source code of the token tree.
    fn source(&self) -> &'tt str;

    /// Visits a [`Token::Cite`].
    #[inline]
    fn visit_cite(&mut self, _span: Span, content: &'tt [Spanned<Token>]) -> Result<(), E> {
        self.visit_tokens(content)
    }

    /// Visits a [`Token::Comment`].
    #[inline]
    fn visit_comment(&mut self, _span: Span, _content: &'tt str, _unclosed: bool) -> Result<(), E> {
        Ok(())
    }

    /// Visits a [`Token::Extension`].
    #[inline]
    fn visit_extension(
        &mut self,
        _span: Span,
        _name: &'tt str,
        _content: Option<&'tt str>,
    ) -> Result<(), E> {
        Ok(())
    }

    /// Visits a [`Token::Heading`].
    #[inline]
    fn visit_heading(
        &mut self,
        _span: Span,
        _level: HeadingLevel,
        content: &'tt [Spanned<Token>],
    ) -> Result<(), E> {
        self.visit_tokens(content)
    }

    /// Visits a [`Token::IncludeOnly`].
    #[inline]
    fn visit_include_only(&mut self, _span: Span, content: &'tt [Spanned<Token>]) -> Result<(), E> {
        self.visit_tokens(content)
    }

    /// Visits a [`Token::Link`].
    #[inline]
    fn visit_link(
        &mut self,
        _span: Span,
        _namespace: Option<&'tt str>,
        _target: &'tt str,
        _label: Option<&'tt str>,
        _trail: Option<&'tt str>,
    ) -> Result<(), E> {
        Ok(())
    }

    /// Visits a [`Token::Paragraph`].
    #[inline]
    fn visit_paragraph(&mut self, _span: Span, content: &'tt [Spanned<Token>]) -> Result<(), E> {
        self.visit_tokens(content)
    }

    /// Visits a [`Token::Parameter`].
    #[inline]
    fn visit_parameter(
        &mut self,
        span: Span,
        name: &'tt str,
        default: Option<&'tt Value>,
    ) -> Result<(), E> {
        visit_parameter(self, span, name, default)
    }

    /// Visits a [`Token::ParserFunction`].
    #[inline]
    fn visit_parser_function(
        &mut self,
        _span: Span,
        _name: &'tt str,
        arguments: &'tt [Value],
    ) -> Result<(), E> {
        visit_values(self, arguments)
    }

    /// Visits a [`Token::Template`].
    #[inline]
    fn visit_template(
        &mut self,
        span: Span,
        namespace: Option<&'tt str>,
        target: &'tt str,
        arguments: &'tt [Spanned<Argument>],
    ) -> Result<(), E> {
        visit_template(self, span, namespace, target, arguments)
    }

    /// Visits a [`Token::Text`].
    #[inline]
    fn visit_text(&mut self, _text: &'tt str) -> Result<(), E> {
        Ok(())
    }

    /// Visits a [`Token::TextStyle`].
    #[inline]
    fn visit_text_style(
        &mut self,
        _span: Span,
        _style: TextStyle,
        content: &'tt [Spanned<Token>],
    ) -> Result<(), E> {
        self.visit_tokens(content)
    }

    /// Visits a [`Token::Variable`].
    #[inline]
    fn visit_variable(
        &mut self,
        _span: Span,
        _name: &'tt str,
        arguments: &'tt [Value],
    ) -> Result<(), E> {
        visit_values(self, arguments)
    }

    /// Visits a [`Token`].
    #[inline]
    fn visit_token(&mut self, token: &'tt Spanned<Token>) -> Result<(), E> {
        visit_token(self, token)
    }

    /// Visits a list of [`Token`]s.
    #[inline]
    fn visit_tokens(&mut self, tokens: &'tt [Spanned<Token>]) -> Result<(), E> {
        visit_tokens(self, tokens)
    }
}

/// Default implementation of [`Visitor::visit_parameter`].
#[inline]
pub(crate) fn visit_parameter<'tt, V, E>(
    visitor: &mut V,
    _span: Span,
    _name: &'tt str,
    default: Option<&'tt Value>,
) -> Result<(), E>
where
    V: Visitor<'tt, E> + ?Sized,
{
    if let Some(default) = default {
        visitor.visit_tokens(&default.node)?;
    }
    Ok(())
}

/// Default implementation of [`Visitor::visit_template`].
#[inline]
pub(crate) fn visit_template<'tt, V, E>(
    visitor: &mut V,
    _span: Span,
    _namespace: Option<&'tt str>,
    _target: &'tt str,
    arguments: &'tt [Spanned<Argument>],
) -> Result<(), E>
where
    V: Visitor<'tt, E> + ?Sized,
{
    for argument in arguments {
        visitor.visit_tokens(&argument.value.node)?;
    }
    Ok(())
}

/// Visits each of the given argument values.
#[inline]
fn visit_values<'tt, V, E>(visitor: &mut V, values: &'tt [Value]) -> Result<(), E>
where
    V: Visitor<'tt, E> + ?Sized,
{
    for value in values {
        visitor.visit_tokens(&value.node)?;
    }
    Ok(())
}

/// Default implementation of [`Visitor::visit_token`].
pub(crate) fn visit_token<'tt, V, E>(visitor: &mut V, token: &'tt Spanned<Token>) -> Result<(), E>
where
    V: Visitor<'tt, E> + ?Sized,
{
    let source = visitor.source();
    let text = move |span: Span| -> &'tt str { &source[span.into_range()] };
    match &token.node {
        Token::Abbr | Token::Text | Token::Unmatched | Token::Url => {
            visitor.visit_text(text(token.span))
        }
        Token::BehaviorSwitch
        | Token::HorizontalRule
        | Token::Indent
        | Token::LineBreak
        | Token::ListItem { .. }
        | Token::NoInclude { .. }
        | Token::Table
        | Token::ExternalLink { .. } => Ok(()),
        Token::Cite { content } => visitor.visit_cite(token.span, content),
        Token::Comment { content, unclosed } => {
            visitor.visit_comment(token.span, text(*content), *unclosed)
        }
        Token::Extension { name, content } => {
            visitor.visit_extension(token.span, text(*name), content.map(text))
        }
        Token::Heading { level, content } => visitor.visit_heading(token.span, *level, content),
        Token::IncludeOnly { content } => visitor.visit_include_only(token.span, content),
        Token::Link {
            namespace,
            target,
            label,
            trail,
            ..
        } => visitor.visit_link(
            token.span,
            namespace.map(text),
            text(*target),
            label.map(text),
            trail.map(text),
        ),
        Token::Paragraph { content } => visitor.visit_paragraph(token.span, content),
        Token::Parameter { name, default } => {
            visitor.visit_parameter(token.span, text(*name), default.as_ref())
        }
        Token::ParserFunction { name, arguments } => {
            visitor.visit_parser_function(token.span, text(*name), arguments)
        }
        Token::Template {
            namespace,
            target,
            arguments,
            ..
        } => visitor.visit_template(token.span, namespace.map(text), text(*target), arguments),
        Token::TextStyle { style, content } => {
            visitor.visit_text_style(token.span, *style, content)
        }
        Token::Variable { name, arguments } => {
            visitor.visit_variable(token.span, text(*name), arguments)
        }
    }
}

/// Default implementation of [`Visitor::visit_tokens`].
#[inline]
pub(crate) fn visit_tokens<'tt, V, E>(
    visitor: &mut V,
    tokens: &'tt [Spanned<Token>],
) -> Result<(), E>
where
    V: Visitor<'tt, E> + ?Sized,
{
    for token in tokens {
        visitor.visit_token(token)?;
    }
    Ok(())
}
