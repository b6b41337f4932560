use super::*;
use indexmap::IndexMap;

#[test]
fn stripped_constructs() {
    for input in [
        "<!-- comment -->",
        "<noinclude>doc</noinclude>",
        "<includeonly>{{{1}}}</includeonly>",
        "__NOTOC__",
        "----",
        "::",
        "<ref>cite</ref>",
        "<references/>",
        "{|\n|cell\n|}",
        "{{PAGENAME}}",
        "{{#if:a|b|c}}",
        "{{{1|x}}}",
    ] {
        assert_eq!(article(input).text, "", "{input:?}");
    }
}

#[test]
fn stripping_keeps_surrounding_text() {
    assert_eq!(article("a<!-- x -->b__TOC__c----d").text, "abcd");
}

#[test]
fn link_label() {
    assert_eq!(article("[[Pagename]]").text, "Pagename");
    assert_eq!(article("[[ Pagename |  Label ]]").text, "Label");
    assert_eq!(article("[[Pagename]]ism").text, "Pagenameism");
    assert_eq!(article("[[Pagename|]]").text, "Pagename");
}

#[test]
fn link_record() {
    let output = article("See [[Foo bar|the bar]]s.");
    assert_eq!(output.text, "See the bars.");
    assert_eq!(
        output.links,
        [Link {
            target: "Foo bar".into(),
            covered_text: "the bars".into(),
            start_doc: 4,
            end_doc: 12,
            source: Span::new(4, 24),
        }]
    );
    assert!(output.categories.is_empty());
}

#[test]
fn category() {
    let output = article("Text[[Category:Foo]]");
    assert_eq!(output.text, "Text");
    assert_eq!(output.categories, ["Foo"]);
    assert!(output.links.is_empty());
}

#[test]
fn category_kept_in_text() {
    let output = run_test_with_config(
        &CONFIG,
        "[[category:Foo|Sort key]]",
        Mode::Article {
            keep_categories: true,
        },
    );
    assert_eq!(output.text, "Sort key");
    assert_eq!(output.categories, ["Foo"]);
    assert!(output.links.is_empty());
}

#[test]
fn other_namespace_is_a_link() {
    let output = article("[[Help:Foo]]");
    assert_eq!(output.text, "Foo");
    assert_eq!(output.links.len(), 1);
    assert_eq!(output.links[0].target, "Foo");
    assert!(output.categories.is_empty());
}

#[test]
fn inclusion_name() {
    let output = article("{{foo}}");
    assert_eq!(output.text, "Template:Foo");
    assert_eq!(
        output.inclusions,
        [Inclusion {
            template: "Template:Foo".into(),
            args: IndexMap::new(),
            start_doc: 0,
            end_doc: 12,
            source: Span::new(0, 7),
        }]
    );
}

#[test]
fn inclusion_namespace() {
    assert_eq!(article("{{template:foo}}").text, "Template:Foo");
    assert_eq!(article("{{subst:foo}}").text, "Template:Foo");
    assert_eq!(article("{{Help:foo}}").text, "Help:Foo");
    assert_eq!(article("{{WP:foo}}").text, "Wikipedia:Foo");
}

#[test]
fn inclusion_arguments() {
    let output = article("{{Infobox person|name = Ada |born=1815| x |y}}");
    assert_eq!(output.inclusions.len(), 1);
    let args = &output.inclusions[0].args;
    assert_eq!(
        args.iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect::<Vec<_>>(),
        [("name", "Ada"), ("born", "1815"), ("0", " x "), ("1", "y")]
    );
    assert_eq!(output.inclusions[0].template, "Template:Infobox person");
}

#[test]
fn nested_inclusion_is_an_argument() {
    let output = article("{{outer|{{inner|1}}}}");
    assert_eq!(output.text, "Template:Outer");
    assert_eq!(output.inclusions.len(), 1);
    assert_eq!(output.inclusions[0].args["0"], "{{inner|1}}");
}

#[test]
fn localized_inclusion() {
    let config = german();
    let output = run_test_with_config(
        &config,
        "{{foo}}[[Kategorie:Bar]][[Category:Baz]]",
        Mode::Article {
            keep_categories: false,
        },
    );
    assert_eq!(output.text, "Vorlage:Foo");
    assert_eq!(output.inclusions[0].template, "Vorlage:Foo");
    assert_eq!(output.categories, ["Bar", "Baz"]);
}

#[test]
fn external_links() {
    assert_eq!(article("[http://example.org/ Example]").text, "Example");
    assert_eq!(article("[http://example.org/]").text, "http://example.org/");
    assert_eq!(article("[http://example.org/  ]").text, "http://example.org/");
    assert_eq!(article("see https://example.org/").text, "see https://example.org/");
}

#[test]
fn headings() {
    assert_eq!(article("== Foo ==\nbar").text, "\nFoo\nbar");
    assert_eq!(article("<h2> Foo </h2>\nbar").text, "\nFoo\nbar");
    assert_eq!(article("<h2>Foo</h2>bar").text, "<h2>Foo</h2>bar");
    assert_eq!(article("=== ''Foo'' ===").text, "\nFoo\n");
}

#[test]
fn line_endings() {
    assert_eq!(article("== Foo ==\r\nbar").text, "\nFoo\nbar");
    assert_eq!(article("== Foo ==\rbar").text, "\nFoo\nbar");
    assert_eq!(article("a\r* b").text, "a\r\n- b");
    assert_eq!(article("a\r\n\r\nb").text, "a\r\n\r\nb");
}

#[test]
fn lists() {
    assert_eq!(article("* a\n** b\n# c").text, "\n- a\n\n-- b\n\n- c");
    assert_eq!(article(": a").text, "\n- a");
    assert_eq!(article(":: a").text, " a");
}

#[test]
fn text_formatting() {
    assert_eq!(article("'''bold''' and ''it'' and '''''both'''''").text, "bold and it and both");
    assert_eq!(article("<b>b</b><i>i</i><cite>c</cite>").text, "bic");
    assert_eq!(article("a<br/>b<br>c").text, "a\nb\nc");
    assert_eq!(article("<p> para </p>").text, "\npara");
}

#[test]
fn abbr_is_kept() {
    assert_eq!(
        article("<abbr title=\"x\">X</abbr>").text,
        "<abbr title=\"x\">X</abbr>"
    );
}

#[test]
fn unmatched_characters() {
    assert_eq!(article("a|b}}").text, "a|b}}");

    let config = Configuration::new(&CONFIG_SOURCE, None)
        .unwrap()
        .with_drop_unmatched(true);
    let output = run_test_with_config(
        &config,
        "a|b}}",
        Mode::Article {
            keep_categories: false,
        },
    );
    assert_eq!(output.text, "ab");
}

#[test]
fn only_include() {
    let output = article("intro<onlyinclude>[[Foo]]</onlyinclude>outro");
    assert_eq!(output.text, "Foo");
    assert_eq!(output.links[0].source, Span::new(18, 25));
}

#[test]
fn parser_is_reusable() {
    let parser = Parser::new(&CONFIG);
    let mut first = Article::from(crate::page::Page {
        text: "[[A]] {{b}} [[Category:C]]".into(),
        ..Default::default()
    });
    parser.parse_article(&mut first, false).unwrap();
    assert_eq!(first.page.text, "A Template:B ");
    assert_eq!(first.links.len(), 1);
    assert_eq!(first.inclusions.len(), 1);
    assert_eq!(first.categories, ["C"]);

    let mut second = Article::from(crate::page::Page {
        text: "plain".into(),
        ..Default::default()
    });
    parser.parse_article(&mut second, false).unwrap();
    assert_eq!(second.page.text, "plain");
    assert!(second.links.is_empty());
    assert!(second.inclusions.is_empty());
    assert!(second.categories.is_empty());
}
