use super::*;

#[test]
fn parameters() {
    let output = template("<noinclude>doc</noinclude>{{{1|x}}} and {{{name}}}");
    assert_eq!(output.text, "{{{1|x}}} and {{{name}}}");
    assert_eq!(
        output.parameters,
        [
            Parameter {
                name: "1".into(),
                value: "x".into(),
                covered_text: "{{{1|x}}}".into(),
                start_doc: 0,
                end_doc: 9,
                source: Span::new(26, 35),
            },
            Parameter {
                name: "name".into(),
                value: String::new(),
                covered_text: "{{{name}}}".into(),
                start_doc: 14,
                end_doc: 24,
                source: Span::new(40, 50),
            },
        ]
    );
}

#[test]
fn parameter_name_is_trimmed() {
    let output = template("{{{ name |}}}");
    assert_eq!(output.parameters[0].name, "name");
    assert_eq!(output.parameters[0].value, "");
    assert_eq!(output.parameters[0].covered_text, "{{{ name |}}}");
}

#[test]
fn markup_is_kept() {
    let input = "== [[Foo]] ==\n''x'' {{bar|y}} <!-- c --> __TOC__";
    let output = template(input);
    assert_eq!(output.text, input);
    assert!(output.parameters.is_empty());
    assert!(output.inclusions.is_empty());
    assert!(output.links.is_empty());
}

#[test]
fn nested_parameters() {
    let output = template("{{foo|{{{1}}}}}");
    assert_eq!(output.text, "{{foo|{{{1}}}}}");
    assert_eq!(output.parameters.len(), 1);
    assert_eq!(output.parameters[0].name, "1");
    assert_eq!(output.parameters[0].start_doc, 6);
    assert_eq!(output.parameters[0].end_doc, 13);
}

#[test]
fn parameter_in_default() {
    let output = template("{{{1|{{{2}}}}}}");
    let names = output
        .parameters
        .iter()
        .map(|p| (p.name.as_str(), p.value.as_str(), p.start_doc, p.end_doc))
        .collect::<Vec<_>>();
    assert_eq!(names, [("1", "{{{2}}}", 0, 15), ("2", "", 5, 12)]);
}

#[test]
fn include_only_is_kept() {
    let output = template("<includeonly>{{{a}}}</includeonly>");
    assert_eq!(output.text, "<includeonly>{{{a}}}</includeonly>");
    assert_eq!(output.parameters.len(), 1);
    assert_eq!(output.parameters[0].start_doc, 13);
    assert_eq!(output.parameters[0].end_doc, 20);
}

#[test]
fn offsets_after_noinclude() {
    let output = template("<noinclude>a</noinclude>b{{{1}}}");
    assert_eq!(output.text, "b{{{1}}}");
    assert_eq!(output.parameters[0].start_doc, 1);
    assert_eq!(output.parameters[0].end_doc, 8);
    assert_eq!(output.parameters[0].source, Span::new(25, 32));
}

#[test]
fn parse_template_page() {
    let mut page = Template::from(crate::page::Page {
        title: "Template:Greeting".into(),
        text: "Hello, {{{name|world}}}!<noinclude>[[Category:Greetings]]</noinclude>".into(),
        ..Default::default()
    });
    Parser::new(&CONFIG).parse_template(&mut page).unwrap();
    assert_eq!(page.page.text, "Hello, {{{name|world}}}!");
    assert_eq!(page.params.len(), 1);
    assert_eq!(page.params[0].name, "name");
    assert_eq!(page.params[0].value, "world");
}
