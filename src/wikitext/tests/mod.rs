use super::*;
use crate::{config::CONFIG_SOURCE, localization::Localization};
use std::sync::LazyLock;

mod article;
mod grammar;
mod template;

static CONFIG: LazyLock<Configuration> =
    LazyLock::new(|| Configuration::new(&CONFIG_SOURCE, None).unwrap());

#[track_caller]
fn tokens(input: &str) -> Vec<Spanned<Token>> {
    tokens_with_config(&CONFIG, input)
}

#[track_caller]
fn tokens_with_config(config: &Configuration, input: &str) -> Vec<Spanned<Token>> {
    let _ = env_logger::try_init();
    let root = Parser::new(config).tokenize(input).unwrap();
    log::debug!("{:#?}", inspect(&FileMap::new(input), &root));
    root
}

#[track_caller]
fn article(input: &str) -> Output {
    run_test_with_config(&CONFIG, input, Mode::Article { keep_categories: false })
}

#[track_caller]
fn template(input: &str) -> Output {
    run_test_with_config(&CONFIG, input, Mode::Template)
}

#[track_caller]
fn run_test_with_config(config: &Configuration, input: &str, mode: Mode) -> Output {
    let _ = env_logger::try_init();
    let output = Parser::new(config).transform(input, mode).unwrap();
    log::debug!("{output:#?}");
    output
}

/// Builds a configuration with German namespace names.
fn german() -> Configuration {
    let l10n = Localization::from_toml(
        "[NAMESPACES]\n10 = \"Vorlage\"\n14 = \"Kategorie\"\n\n[MODIFIERS]\nsubst = \"ers\"\n",
    )
    .unwrap();
    Configuration::new(&CONFIG_SOURCE, Some(&l10n)).unwrap()
}

/// Returns the source text of each token with the name of its kind.
fn kinds<'a>(input: &'a str, tokens: &[Spanned<Token>]) -> Vec<(&'static str, &'a str)> {
    tokens
        .iter()
        .map(|token| {
            let kind = match &token.node {
                Token::Abbr => "abbr",
                Token::BehaviorSwitch => "behavior_switch",
                Token::Cite { .. } => "cite",
                Token::Comment { .. } => "comment",
                Token::Extension { .. } => "extension",
                Token::ExternalLink { .. } => "external_link",
                Token::Heading { .. } => "heading",
                Token::HorizontalRule => "horizontal_rule",
                Token::IncludeOnly { .. } => "includeonly",
                Token::Indent => "indent",
                Token::LineBreak => "line_break",
                Token::Link { .. } => "link",
                Token::ListItem { .. } => "list_item",
                Token::NoInclude { .. } => "noinclude",
                Token::Paragraph { .. } => "paragraph",
                Token::Parameter { .. } => "parameter",
                Token::ParserFunction { .. } => "parser_function",
                Token::Table => "table",
                Token::Template { .. } => "template",
                Token::Text => "text",
                Token::TextStyle { .. } => "text_style",
                Token::Unmatched => "unmatched",
                Token::Url => "url",
                Token::Variable { .. } => "variable",
            };
            (kind, &input[token.span.into_range()])
        })
        .collect()
}
