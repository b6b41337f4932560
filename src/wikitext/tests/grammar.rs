use super::*;

#[track_caller]
fn assert_kinds(input: &str, expected: &[(&str, &str)]) {
    assert_eq!(kinds(input, &tokens(input)), expected);
}

#[test]
fn behavior_switch_breaks_text() {
    assert_kinds("a__TOC__b", &[("text", "a"), ("behavior_switch", "__TOC__"), ("text", "b")]);
}

#[test]
fn link_parts() {
    let input = "[[:en:wikt:Foo#Bar|baz]]s";
    let root = tokens(input);
    assert_eq!(root.len(), 1);
    let Token::Link {
        interwiki,
        namespace,
        target,
        section,
        label,
        trail,
    } = root[0].node
    else {
        panic!("expected link, got {:?}", root[0]);
    };
    let text = |span: Option<Span>| span.map(|span| &input[span.into_range()]);
    assert_eq!(text(interwiki), Some(":en:wikt:"));
    assert_eq!(namespace, None);
    assert_eq!(&input[target.into_range()], "Foo");
    assert_eq!(text(section), Some("Bar"));
    assert_eq!(text(label), Some("baz"));
    assert_eq!(text(trail), Some("s"));
}

#[test]
fn link_namespace() {
    let input = "[[category:Foo]]";
    let root = tokens(input);
    let Token::Link { namespace, .. } = root[0].node else {
        panic!("expected link, got {:?}", root[0]);
    };
    assert_eq!(namespace.map(|ns| &input[ns.into_range()]), Some("category"));
}

#[test]
fn empty_label() {
    let root = tokens("[[Foo|]]");
    assert!(matches!(root[0].node, Token::Link { label: None, .. }));
}

#[test]
fn template_arguments() {
    let input = "{{foo|a|b=c}}";
    let root = tokens(input);
    assert_eq!(root.len(), 1);
    let Token::Template {
        modifier,
        namespace,
        target,
        arguments,
    } = &root[0].node
    else {
        panic!("expected template, got {:?}", root[0]);
    };
    assert_eq!(*modifier, None);
    assert_eq!(*namespace, None);
    assert_eq!(&input[target.into_range()], "foo");
    assert_eq!(arguments.len(), 2);
    assert_eq!(arguments[0].name, None);
    assert_eq!(&input[arguments[0].value.span.into_range()], "a");
    assert_eq!(arguments[1].name.map(|n| &input[n.into_range()]), Some("b"));
    assert_eq!(&input[arguments[1].value.span.into_range()], "c");
}

#[test]
fn template_modifier() {
    let input = "{{subst:Template:Foo}}";
    let root = tokens(input);
    let Token::Template {
        modifier,
        namespace,
        target,
        ..
    } = &root[0].node
    else {
        panic!("expected template, got {:?}", root[0]);
    };
    assert_eq!(modifier.map(|m| &input[m.into_range()]), Some("subst"));
    assert_eq!(namespace.map(|n| &input[n.into_range()]), Some("Template"));
    assert_eq!(&input[target.into_range()], "Foo");
}

#[test]
fn magic_words() {
    assert_kinds(
        "{{PAGENAME}}{{#if:a|b}}{{pagename}}",
        &[
            ("variable", "{{PAGENAME}}"),
            ("parser_function", "{{#if:a|b}}"),
            ("template", "{{pagename}}"),
        ],
    );
}

#[test]
fn heading() {
    let input = "== Foo ==\nbar";
    let root = tokens(input);
    assert_eq!(
        kinds(input, &root),
        [("heading", "== Foo ==\n"), ("text", "bar")]
    );
    let Token::Heading { level, content } = &root[0].node else {
        unreachable!();
    };
    assert_eq!(u8::from(*level), 2);
    assert_eq!(kinds(input, content), [("text", " Foo ")]);
}

#[test]
fn heading_must_close_on_its_line() {
    let input = "== Foo\nbar ==\n";
    assert!(
        tokens(input)
            .iter()
            .all(|token| !matches!(token.node, Token::Heading { .. }))
    );
}

#[test]
fn html_heading() {
    assert_kinds("<h3>Foo</h3>", &[("heading", "<h3>Foo</h3>")]);
}

#[test]
fn text_styles() {
    let input = "''i'' '''b''' '''''bi'''''";
    let root = tokens(input);
    let styles = root
        .iter()
        .filter_map(|token| match &token.node {
            Token::TextStyle { style, .. } => Some(*style),
            _ => None,
        })
        .collect::<Vec<_>>();
    assert_eq!(
        styles,
        [TextStyle::Italic, TextStyle::Bold, TextStyle::BoldItalic]
    );
}

#[test]
fn apostrophe_in_word() {
    assert_kinds("don't stop", &[("text", "don't stop")]);
}

#[test]
fn tags() {
    assert_kinds(
        "a<!-- x -->b<ref name=x>y</ref><references />c",
        &[
            ("text", "a"),
            ("comment", "<!-- x -->"),
            ("text", "b"),
            ("extension", "<ref name=x>y</ref>"),
            ("extension", "<references />"),
            ("text", "c"),
        ],
    );
}

#[test]
fn unclosed_comment() {
    let root = tokens("a<!-- x");
    assert!(matches!(
        root[1].node,
        Token::Comment { unclosed: true, .. }
    ));
}

#[test]
fn unknown_tag_is_not_an_extension() {
    assert_kinds("<span>", &[("text", "<"), ("text", "span"), ("text", ">")]);
}

#[test]
fn table() {
    assert_kinds(
        "{|\n|a\n{|\n|b\n|}\n|}c",
        &[("table", "{|\n|a\n{|\n|b\n|}\n|}"), ("text", "c")],
    );
}

#[test]
fn lists() {
    assert_kinds(
        "* a\n#* b\n:: c\n; d",
        &[
            ("list_item", "* "),
            ("text", "a"),
            ("text", "\n"),
            ("list_item", "#* "),
            ("text", "b"),
            ("text", "\n"),
            ("indent", "::"),
            ("text", " c"),
            ("text", "\n"),
            ("list_item", "; "),
            ("text", "d"),
        ],
    );
}

#[test]
fn list_marker_needs_line_start() {
    assert_kinds("a * b", &[("text", "a "), ("text", "*"), ("text", " b")]);
}

#[test]
fn links_and_urls() {
    assert_kinds(
        "https://example.org/a [http://example.org/ Example]",
        &[
            ("url", "https://example.org/a"),
            ("text", " "),
            ("external_link", "[http://example.org/ Example]"),
        ],
    );
}

#[test]
fn scheme_without_slashes_is_text() {
    assert_kinds("note:this", &[("text", "note:this")]);
}

#[test]
fn line_breaks_and_rules() {
    assert_kinds(
        "a<br/>b<br />c----d<hr>",
        &[
            ("text", "a"),
            ("line_break", "<br/>"),
            ("text", "b"),
            ("line_break", "<br />"),
            ("text", "c"),
            ("horizontal_rule", "----"),
            ("text", "d"),
            ("horizontal_rule", "<hr>"),
        ],
    );
}

#[test]
fn unmatched() {
    assert_kinds(
        "a|b}",
        &[("text", "a"), ("unmatched", "|"), ("text", "b"), ("unmatched", "}")],
    );
}

#[test]
fn inclusion_sections() {
    assert_kinds(
        "<noinclude>x</noinclude><includeonly>{{{1}}}</includeonly>",
        &[
            ("noinclude", "<noinclude>x</noinclude>"),
            ("includeonly", "<includeonly>{{{1}}}</includeonly>"),
        ],
    );
}

#[test]
fn abbr_and_cite() {
    assert_kinds(
        "<abbr title=\"x\">X</abbr><cite>c</cite><p>p</p>",
        &[
            ("abbr", "<abbr title=\"x\">X</abbr>"),
            ("cite", "<cite>c</cite>"),
            ("paragraph", "<p>p</p>"),
        ],
    );
}

#[test]
fn localized_namespace() {
    let config = german();
    let input = "[[Kategorie:Foo]]";
    let root = tokens_with_config(&config, input);
    let Token::Link { namespace, .. } = root[0].node else {
        panic!("expected link, got {:?}", root[0]);
    };
    assert_eq!(namespace.map(|ns| &input[ns.into_range()]), Some("Kategorie"));
}

#[test]
fn too_deep() {
    let config = Configuration::new(&CONFIG_SOURCE, None)
        .unwrap()
        .with_max_depth(2);
    let result = Parser::new(&config).tokenize("{{a|{{b|{{c|{{d}}}}}}}}");
    assert!(
        matches!(result, Err(Error::TooDeep { limit: 2, .. })),
        "{result:?}"
    );
}

#[test]
fn default_depth_limit() {
    fn nested(open: &str, close: &str, levels: usize) -> String {
        format!("{}x{}", open.repeat(levels), close.repeat(levels))
    }

    fn parse(input: &str) -> Result<Vec<Spanned<Token>>, Error> {
        Parser::new(&CONFIG).tokenize(input)
    }

    let run = || {
        for (open, close) in [("<b>", "</b>"), ("{{a|", "}}")] {
            let input = nested(open, close, DEFAULT_MAX_DEPTH);
            let root = parse(&input).unwrap();
            assert_eq!(root.len(), 1, "{open}");

            let result = parse(&nested(open, close, DEFAULT_MAX_DEPTH + 1));
            assert!(
                matches!(result, Err(Error::TooDeep { limit: DEFAULT_MAX_DEPTH, .. })),
                "{open}: {result:?}"
            );
        }
    };

    std::thread::Builder::new()
        .stack_size(crate::pipeline::WORKER_STACK_SIZE)
        .spawn(run)
        .unwrap()
        .join()
        .unwrap();
}

#[test]
fn line_endings() {
    for input in ["== a ==\r\nb", "== a ==\n\rb", "== a ==\rb"] {
        let root = tokens(input);
        assert_eq!(kinds(input, &root)[0], ("heading", &input[..input.len() - 1]));
        assert_eq!(kinds(input, &root)[1], ("text", "b"));
    }

    assert_kinds(
        "x\r* y",
        &[("text", "x"), ("text", "\r"), ("list_item", "* "), ("text", "y")],
    );
    assert_kinds(
        "x\n\r# y",
        &[("text", "x"), ("text", "\n\r"), ("list_item", "# "), ("text", "y")],
    );
    assert_kinds(
        "a\r\n\r\nb",
        &[("text", "a"), ("text", "\r\n\r\n"), ("text", "b")],
    );
}

#[test]
fn pathological() {
    for input in [
        "{".repeat(30),
        "[".repeat(30),
        "'".repeat(30),
        "=".repeat(30),
        "<".repeat(30),
    ] {
        let root = tokens(&input);
        assert_eq!(root.last().map(|token| token.span.end), Some(input.len()));
    }
}
