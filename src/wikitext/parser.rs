//! A parsing expression grammar for Wikitext documents.
//!
//! The grammar never fails. Each position in the document starts either one
//! markup construct, tried in a fixed order of precedence, or an unmatched
//! character. Constructs which contain other markup (headings, text styles,
//! arguments) recurse into the same set of constructs, up to a nesting limit.

// Clippy: Most of the arguments are hidden. It is not possible to apply
// this annotation directly to the parser because rust-peg does not understand
// it.
#![allow(clippy::too_many_arguments)]

use super::{
    Argument, Configuration, HeadingLevel, TextStyle, Token, Value,
    codemap::{Span, Spanned},
    config::KeywordSet,
};
use core::cell::Cell;
use memchr::memmem;
use peg::RuleResult;

peg::parser! { pub(super) grammar wikitext(config: &Configuration, depth: &Depth) for str {
    /// The top-level start rule.
    pub rule start() -> Vec<Spanned<Token>>
    = t:(markup() / unmatched())*
    { t }

    /// Any single markup construct. The order of the alternatives is the
    /// precedence of the constructs.
    #[cache]
    rule markup() -> Spanned<Token>
    = behavior_switch()
    / parameter()
    / noinclude()
    / includeonly()
    / comment()
    / extension_tag()
    / table()
    / line_break()
    / horizontal_rule()
    / link()
    / abbr()
    / url()
    / external_link()
    / list_item()
    / indent()
    / variable()
    / parser_function()
    / template()
    / heading()
    / paragraph()
    / text_style()
    / cite()
    / plain_text()
    / special()

    /// A character which starts no markup.
    rule unmatched() -> Spanned<Token>
    = spanned(<[_] { Token::Unmatched }>)

    /////////////////////
    // Inclusion logic //
    /////////////////////

    /// A template parameter.
    ///
    /// ```wikitext
    /// {{{name|default}}}
    /// ```
    rule parameter() -> Spanned<Token>
    = spanned(<
        "{{{"
        name:span(<[^'|'|'='|'{'|'}']+>)
        default:("|" v:value() { v })?
        "}}}"
        { Token::Parameter { name, default } }
    >)

    /// A section excluded from transclusion.
    rule noinclude() -> Spanned<Token>
    = spanned(<"<noinclude>" content:until("</noinclude>") { Token::NoInclude { content } }>)

    /// A section only used by transclusion. Its content is parsed, since
    /// a template keeps the section and its parameters.
    rule includeonly() -> Spanned<Token>
    = spanned(<
        "<includeonly>"
        enter() content:(!"</includeonly>" t:(markup() / unmatched()) { t })* leave()
        "</includeonly>"
        { Token::IncludeOnly { content } }
    >)

    /// A template inclusion.
    ///
    /// ```wikitext
    /// {{subst:Template:Name|arg|name=value}}
    /// ```
    rule template() -> Spanned<Token>
    = spanned(<
        "{{"
        modifier:(m:span(<keyword(&config.modifiers)>) ":" { m })?
        namespace:(n:span(<keyword(&config.namespaces.keywords)>) ":" { n })?
        target:span(<page_name()>)
        arguments:template_argument()*
        "}}"
        { Token::Template { modifier, namespace, target, arguments } }
    >)

    /// A named or positional template argument.
    rule template_argument() -> Spanned<Argument>
    = "|" a:spanned(<
        name:(n:span(<[^'|'|'='|'{'|'}'|'['|']'|'<'|'>']+>) "=" { n })?
        value:value()
        { Argument { name, value } }
    >)
    { a }

    /// A variable.
    ///
    /// ```wikitext
    /// {{PAGENAME}}
    /// ```
    rule variable() -> Spanned<Token>
    = spanned(<
        "{{" name:span(<keyword(&config.variables)>) arguments:magic_arguments() "}}"
        { Token::Variable { name, arguments } }
    >)

    /// A parser function.
    ///
    /// ```wikitext
    /// {{#if:a|b|c}}
    /// ```
    rule parser_function() -> Spanned<Token>
    = spanned(<
        "{{" name:span(<keyword(&config.parser_functions)>) arguments:magic_arguments() "}}"
        { Token::ParserFunction { name, arguments } }
    >)

    /// The arguments of a variable or parser function.
    rule magic_arguments() -> Vec<Value>
    = ":" a:(value() ++ "|") { a }
    / { Vec::new() }

    /// A possibly empty run of markup, as found in arguments.
    rule value() -> Value
    = spanned(<enter() t:markup()* leave() { t }>)

    ///////////
    // Links //
    ///////////

    /// An internal link.
    ///
    /// ```wikitext
    /// [[:en:wikt:Category:Name#Section|Label]]trail
    /// ```
    rule link() -> Spanned<Token>
    = spanned(<
        "[["
        interwiki:span(<interwiki()>)?
        namespace:(n:span(<keyword(&config.namespaces.keywords)>) ":" { n })?
        target:span(<page_name()>)
        section:("#" s:span(<[^'|'|'['|']']+>) { s })?
        label:("|" l:span(<[^'|'|'['|']']+>)? { l })?
        "]]"
        trail:span(<['a'..='z'|'A'..='Z']+>)?
        { Token::Link { interwiki, namespace, target, section, label: label.flatten(), trail } }
    >)

    /// An interwiki prefix.
    ///
    /// ```wikitext
    /// :en:wikt:  wikt:en:  :en:  wikt:
    /// ```
    rule interwiki()
    = ":" keyword(&config.languages) ":" keyword(&config.projects) ":"
    / keyword(&config.projects) ":" keyword(&config.languages) ":"
    / ":" keyword(&config.languages) ":"
    / keyword(&config.projects) ":"

    /// A page name.
    rule page_name()
    = [^'|'|'['|']'|'#'|'<'|'>'|'{'|'}']+

    /// A bare URL. A scheme without `//` is not enough to start one, or
    /// every `word:` in prose would become a URL.
    rule url() -> Spanned<Token>
    = spanned(<url_scheme() ":" "//" uri_char()* { Token::Url }>)

    /// An external link.
    ///
    /// ```wikitext
    /// [https://example.com anchor text]
    /// ```
    rule external_link() -> Spanned<Token>
    = spanned(<
        "["
        target:span(<url_scheme() ":" "//"? uri_char()*>)
        anchor:(whitespace()+ a:span(<[^'['|']']*>) { a })?
        "]"
        { Token::ExternalLink { target, anchor } }
    >)

    /// A URL scheme.
    rule url_scheme()
    = ['a'..='z'|'A'..='Z'] ['a'..='z'|'A'..='Z'|'0'..='9'|'+'|'-'|'.']+

    /// A URI character, as reserved, unreserved, or percent-encoded.
    rule uri_char()
    = ['a'..='z'|'A'..='Z'|'0'..='9'|'-'|'_'|'.'|'~'
      |'!'|'*'|'\''|'('|')'|':'|'@'|'&'|'='|'+'|'$'|'/'|'#'|'?'|';'|',']
    / "%" ['0'..='9'|'a'..='f'|'A'..='F']*<2>

    ///////////////////
    // Magic words   //
    ///////////////////

    /// A behavior switch.
    ///
    /// ```wikitext
    /// __TOC__
    /// ```
    rule behavior_switch() -> Spanned<Token>
    = spanned(<keyword(&config.behavior_switches) { Token::BehaviorSwitch }>)

    //////////
    // Tags //
    //////////

    /// An HTML comment. An unclosed comment runs to the end of the input.
    rule comment() -> Spanned<Token>
    = spanned(<"<!--" content:span(<(!"-->" [_])*>) end:$("-->" / eof()) {
        Token::Comment { content, unclosed: end.is_empty() }
    }>)

    /// An extension tag, either self-closing or with content.
    ///
    /// ```wikitext
    /// <ref name="a">content</ref>
    /// <references />
    /// ```
    rule extension_tag() -> Spanned<Token>
    = spanned(<
        "<"
        name:spanned(<$(['a'..='z'|'A'..='Z'|'0'..='9'|'-']+)>)
        assert(contains_ignore_case(config.extension_tags, name.node), "extension tag")
        &(whitespace() / "/" / ">")
        (!("/>" / ">") [_])*
        content:(
            "/>" { None }
            / ">" c:end_tag(name.node) { Some(c) }
        )
        { Token::Extension { name: name.span, content } }
    >)

    /// An abbreviation element, which is kept as-is.
    rule abbr() -> Spanned<Token>
    = spanned(<"<abbr" &(whitespace() / ">") (!">" [_])* ">" until("</abbr>") { Token::Abbr }>)

    /// A line break element.
    rule line_break() -> Spanned<Token>
    = spanned(<"<br" " "? "/"? ">" { Token::LineBreak }>)

    /// A paragraph element.
    rule paragraph() -> Spanned<Token>
    = spanned(<"<p>" content:content(<"</p>">) "</p>" { Token::Paragraph { content } }>)

    /// A citation element.
    rule cite() -> Spanned<Token>
    = spanned(<"<cite>" content:content(<"</cite>">) "</cite>" { Token::Cite { content } }>)

    /////////////////
    // Block items //
    /////////////////

    /// A table, including any nested tables.
    rule table() -> Spanned<Token>
    = spanned(<"{|" #{|input, pos| match find_table_end(&input[pos..]) {
        Some(len) => RuleResult::Matched(pos + len, ()),
        None => RuleResult::Failed,
    }} { Token::Table }>)

    /// A horizontal rule.
    rule horizontal_rule() -> Spanned<Token>
    = spanned(<("----" "-"* / "<hr>") { Token::HorizontalRule }>)

    /// A list item marker at the start of a line. A colon followed by
    /// another colon is an indent instead.
    rule list_item() -> Spanned<Token>
    = spanned(<
        line_start()
        bullets:span(<['*'|'#']+ / [';'] / [':'] !":">)
        [' '|'\t']*
        { Token::ListItem { bullets } }
    >)

    /// An indent at the start of a line.
    rule indent() -> Spanned<Token>
    = spanned(<line_start() ":"+ { Token::Indent }>)

    /// A heading of any level.
    rule heading() -> Spanned<Token>
    = heading_level(HeadingLevel::ALL[0])
    / heading_level(HeadingLevel::ALL[1])
    / heading_level(HeadingLevel::ALL[2])
    / heading_level(HeadingLevel::ALL[3])
    / heading_level(HeadingLevel::ALL[4])
    / heading_level(HeadingLevel::ALL[5])

    /// A heading of the given level, in wiki or HTML form, which occupies a
    /// whole line.
    ///
    /// ```wikitext
    /// == Heading ==
    /// <h2>Heading</h2>
    /// ```
    rule heading_level(level: HeadingLevel) -> Spanned<Token>
    = spanned(<
        line_start()
        content:(
            literal(level.marker())
            c:content(<literal(level.marker()) line_end() / newline()>)
            literal(level.marker())
            { c }
            / literal(level.tags().0)
            c:content(<literal(level.tags().1)>)
            literal(level.tags().1)
            { c }
        )
        line_end()
        { Token::Heading { level, content } }
    >)

    ////////////////
    // Text style //
    ////////////////

    /// Italic, bold, or bold italic text.
    rule text_style() -> Spanned<Token>
    = quoted(TextStyle::Italic, "''")
    / tagged(TextStyle::Italic, "<i>", "</i>")
    / quoted(TextStyle::Bold, "'''")
    / tagged(TextStyle::Bold, "<b>", "</b>")
    / quoted(TextStyle::BoldItalic, "'''''")

    /// Text between apostrophe runs of exactly the length of `quotes`.
    rule quoted(style: TextStyle, quotes: &'static str) -> Spanned<Token>
    = spanned(<
        literal(quotes) !"'"
        content:content(<literal(quotes) !"'">)
        literal(quotes)
        { Token::TextStyle { style, content } }
    >)

    /// Text between an HTML start tag and end tag.
    rule tagged(style: TextStyle, open: &'static str, close: &'static str) -> Spanned<Token>
    = spanned(<
        literal(open)
        content:content(<literal(close)>)
        literal(close)
        { Token::TextStyle { style, content } }
    >)

    //////////
    // Text //
    //////////

    /// A run of plain text within one line, or a run of newlines.
    ///
    /// A markup character surrounded by ordinary characters is text too, so
    /// `don't` and `a:b` stay whole. The run stops before constructs which
    /// are removed from the middle of a line.
    rule plain_text() -> Spanned<Token>
    = spanned(<(
        !text_break()
        (
            [c if is_ordinary(c)] [c if is_markup(c)] [c if !is_excluded(c)]
            / [c if !is_excluded(c)]
        )
    )+ { Token::Text }>)
    / spanned(<newline()+ { Token::Text }>)

    /// A construct which ends a run of plain text.
    rule text_break()
    = behavior_switch() / "----"

    /// A markup character that did not start any markup.
    rule special() -> Spanned<Token>
    = spanned(<['['|']'|'*'|'#'|':'|';'|'<'|'>'|'='|'\''] { Token::Text }>)

    //////////////
    // Nesting  //
    //////////////

    /// One or more markup items up to, but not including, `close`.
    rule content<C>(close: rule<C>) -> Vec<Spanned<Token>>
    = enter() t:(!close() t:markup() { t })* leave()
    {? if t.is_empty() { Err("content") } else { Ok(t) } }

    /// Enters a level of nested markup.
    rule enter()
    = pos:position!() {? depth.enter(pos) }

    /// Leaves a level of nested markup.
    rule leave()
    = { depth.leave() }

    ////////////////
    // Primitives //
    ////////////////

    /// A keyword from the given set.
    rule keyword(set: &KeywordSet)
    = #{|input, pos| match set.match_at(input, pos) {
        Some(len) => RuleResult::Matched(pos + len, ()),
        None => RuleResult::Failed,
    }}

    /// Everything up to `end`, consuming `end`.
    rule until(end: &'static str) -> Span
    = #{|input, pos| match memmem::find(&input.as_bytes()[pos..], end.as_bytes()) {
        Some(len) => RuleResult::Matched(pos + len + end.len(), Span::new(pos, pos + len)),
        None => RuleResult::Failed,
    }}

    /// Everything up to the end tag for `name`, consuming the end tag.
    rule end_tag(name: &str) -> Span
    = #{|input, pos| match find_end_tag(&input[pos..], name) {
        Some((start, end)) => RuleResult::Matched(pos + end, Span::new(pos, pos + start)),
        None => RuleResult::Failed,
    }}

    /// Matches a string given at run time.
    rule literal(lit: &'static str)
    = #{|input, pos| if input[pos..].starts_with(lit) {
        RuleResult::Matched(pos + lit.len(), ())
    } else {
        RuleResult::Failed
    }}

    /// A positive lookahead for the start of a line.
    rule line_start()
    = #{|input, pos| if pos == 0 || matches!(input.as_bytes()[pos - 1], b'\n' | b'\r') {
        RuleResult::Matched(pos, ())
    } else {
        RuleResult::Failed
    }}

    /// Trailing spaces and a newline, or the end of the input.
    rule line_end()
    = [' '|'\t']* (newline() / eof())

    /// A newline in any of the common conventions.
    rule newline()
    = "\r\n" / "\n\r" / "\n" / "\r"

    /// Any whitespace.
    rule whitespace()
    = [' '|'\t'] / newline()

    /// A positive lookahead for the end of input.
    rule eof() = ![_]

    /// Asserts a precondition given by `cond`.
    rule assert(cond: bool, msg: &'static str)
    = {? if cond { Ok(()) } else { Err(msg) }}

    /// Returns the extent of `r`.
    rule span<T>(r: rule<T>) -> Span
    = start:position!() r() end:position!()
    { Span::new(start, end) }

    /// Wraps some `T` in a span.
    rule spanned<T>(r: rule<T>) -> Spanned<T>
    = start:position!() node:r() end:position!()
    { Spanned::new(node, start, end) }
}}

/// Nesting state for a single document.
#[derive(Debug)]
pub(super) struct Depth {
    /// The maximum nesting depth.
    limit: usize,
    /// The current nesting depth.
    current: Cell<usize>,
    /// The first position where the limit was hit.
    exceeded: Cell<Option<usize>>,
}

impl Depth {
    /// Creates a new nesting state with the given limit.
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            current: Cell::new(0),
            exceeded: Cell::new(None),
        }
    }

    /// The first position where the nesting limit was hit, if it was.
    pub fn exceeded(&self) -> Option<usize> {
        self.exceeded.get()
    }

    /// Enters a nesting level at `pos`.
    fn enter(&self, pos: usize) -> Result<(), &'static str> {
        let current = self.current.get();
        if current >= self.limit {
            if self.exceeded.get().is_none() {
                self.exceeded.set(Some(pos));
            }
            Err("nesting limit")
        } else {
            self.current.set(current + 1);
            Ok(())
        }
    }

    /// Leaves a nesting level.
    fn leave(&self) {
        self.current.set(self.current.get().saturating_sub(1));
    }
}

/// Characters which may directly precede an inline markup character in
/// plain text.
fn is_ordinary(c: char) -> bool {
    c.is_alphanumeric() || "!\"$%&()+,-./?@\\^_`~".contains(c)
}

/// Markup characters which are text between ordinary characters.
fn is_markup(c: char) -> bool {
    "[]*#:;='".contains(c)
}

/// Characters which never appear in a run of plain text.
fn is_excluded(c: char) -> bool {
    "|[]*#:;<>='{}\n\r".contains(c)
}

/// Returns the length of a table body up to and including the `|}` which
/// closes it, skipping nested tables.
fn find_table_end(input: &str) -> Option<usize> {
    let bytes = input.as_bytes();
    let mut nesting = 1_usize;
    let mut pos = 0;
    while let Some(offset) = memchr::memchr2(b'{', b'|', &bytes[pos..]) {
        let at = pos + offset;
        match (bytes[at], bytes.get(at + 1)) {
            (b'{', Some(b'|')) => {
                nesting += 1;
                pos = at + 2;
            }
            (b'|', Some(b'}')) => {
                nesting -= 1;
                pos = at + 2;
                if nesting == 0 {
                    return Some(pos);
                }
            }
            _ => pos = at + 1,
        }
    }
    None
}

/// Finds the start and end position of the next XML-like close tag which
/// matches the given tag name somewhere in the given input. The tag name
/// will be compared case-insensitively.
fn find_end_tag(input: &str, tag_name: &str) -> Option<(usize, usize)> {
    let bytes = input.as_bytes();
    let mut pos = 0;
    while let Some(offset) = memmem::find(&bytes[pos..], b"</") {
        let start = pos + offset;
        let name_end = start + 2 + tag_name.len();
        if bytes
            .get(start + 2..name_end)
            .is_some_and(|name| name.eq_ignore_ascii_case(tag_name.as_bytes()))
        {
            let mut end = name_end;
            while bytes.get(end).is_some_and(u8::is_ascii_whitespace) {
                end += 1;
            }
            if bytes.get(end) == Some(&b'>') {
                return Some((start, end + 1));
            }
        }
        pos = start + 2;
    }
    None
}

/// Returns true if any `candidates` case-insensitively match `value`.
#[inline]
fn contains_ignore_case(candidates: &phf::Set<&str>, value: &str) -> bool {
    candidates.contains(&value.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_end() {
        assert_eq!(find_table_end("\n| a\n|}"), Some(7));
        assert_eq!(find_table_end("\n{|\n|a\n|}\n|}tail"), Some(12));
        assert_eq!(find_table_end("\n| a"), None);
    }

    #[test]
    fn end_tag() {
        assert_eq!(find_end_tag("abc</ref>", "ref"), Some((3, 9)));
        assert_eq!(find_end_tag("a</REF >b", "ref"), Some((1, 8)));
        assert_eq!(find_end_tag("a</references>b</ref>", "ref"), Some((15, 21)));
        assert_eq!(find_end_tag("a</re", "ref"), None);
    }
}
