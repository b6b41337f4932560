//! Parser configuration data.

use super::Error;
use crate::{localization::Localization, title::Namespace};
use phf::Set;

/// Site specific keyword tables for a wiki, as compiled into the program.
#[derive(Debug)]
pub(crate) struct ConfigurationSource {
    /// Behavior switches, including their `__` markers.
    pub behavior_switches: &'static [&'static str],

    /// Tag names of registered extension tags, lowercased.
    pub extension_tags: Set<&'static str>,

    /// Language codes usable in interwiki prefixes.
    pub language_codes: &'static [&'static str],

    /// Inclusion modifiers (`subst:` and friends).
    pub modifiers: &'static [&'static str],

    /// Registered title namespaces.
    pub namespaces: &'static [Namespace],

    /// Namespace names which must match with exact letter case.
    pub exact_case_namespaces: &'static [&'static str],

    /// Project names which must match with exact letter case.
    pub exact_case_projects: &'static [&'static str],

    /// Parser function names.
    pub parser_functions: &'static [&'static str],

    /// Interwiki project names.
    pub projects: &'static [&'static str],

    /// Variable names.
    pub variables: &'static [&'static str],
}

/// The default nesting limit for recursive markup.
pub(crate) const DEFAULT_MAX_DEPTH: usize = 64;

/// Processed configuration data for the parser.
///
/// This is immutable once built and is shared by every parser.
#[derive(Debug)]
pub(crate) struct Configuration {
    /// Behavior switches.
    pub behavior_switches: KeywordSet,
    /// Whether characters that start no markup are deleted instead of being
    /// copied to the output.
    pub drop_unmatched: bool,
    /// Tag names of registered extension tags, lowercased.
    pub extension_tags: &'static Set<&'static str>,
    /// Interwiki language codes.
    pub languages: KeywordSet,
    /// The maximum nesting depth of recursive markup.
    pub max_depth: usize,
    /// Inclusion modifiers.
    pub modifiers: KeywordSet,
    /// Namespace names.
    pub namespaces: Namespaces,
    /// Parser functions.
    pub parser_functions: KeywordSet,
    /// Interwiki projects.
    pub projects: KeywordSet,
    /// Variables.
    pub variables: KeywordSet,
}

impl Configuration {
    /// Compiles the keyword tables from the built-in `source`, extended by
    /// the synonyms from `localization`.
    pub fn new(
        source: &'static ConfigurationSource,
        localization: Option<&Localization>,
    ) -> Result<Self, Error> {
        let localized = |f: fn(&Localization) -> Vec<&str>| {
            localization.map(f).unwrap_or_default().into_iter()
        };

        Ok(Self {
            behavior_switches: KeywordSet::new(
                "behavior switches",
                source
                    .behavior_switches
                    .iter()
                    .copied()
                    .chain(localized(|l| l.behavior_switches().collect())),
                Case::Sensitive,
                false,
            )?,
            drop_unmatched: false,
            extension_tags: &source.extension_tags,
            languages: KeywordSet::new(
                "language codes",
                source.language_codes.iter().copied(),
                Case::Insensitive,
                true,
            )?,
            max_depth: DEFAULT_MAX_DEPTH,
            modifiers: KeywordSet::new(
                "modifiers",
                source
                    .modifiers
                    .iter()
                    .copied()
                    .chain(localized(|l| l.modifiers().collect())),
                Case::Insensitive,
                true,
            )?,
            namespaces: Namespaces::new(source, localization)?,
            parser_functions: KeywordSet::new(
                "parser functions",
                source
                    .parser_functions
                    .iter()
                    .copied()
                    .chain(localized(|l| l.parser_functions().collect())),
                Case::Sensitive,
                false,
            )?,
            projects: KeywordSet::new(
                "projects",
                source.projects.iter().copied(),
                Case::Insensitive,
                true,
            )?
            .with_exact_case(source.exact_case_projects),
            variables: KeywordSet::new(
                "variables",
                source
                    .variables
                    .iter()
                    .copied()
                    .chain(localized(|l| l.variables().collect())),
                Case::Sensitive,
                false,
            )?,
        })
    }

    /// Sets the maximum nesting depth of recursive markup.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets whether characters that start no markup are deleted.
    #[must_use]
    pub fn with_drop_unmatched(mut self, drop_unmatched: bool) -> Self {
        self.drop_unmatched = drop_unmatched;
        self
    }
}

/// The letter case rule of a keyword.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Case {
    /// The keyword matches only with the same letter case.
    Sensitive,
    /// The keyword matches regardless of letter case.
    Insensitive,
}

/// A single keyword.
#[derive(Clone, Debug)]
struct Keyword {
    /// The keyword text.
    text: String,
    /// The number of characters in the keyword.
    chars: usize,
    /// The letter case rule.
    case: Case,
}

impl Keyword {
    /// Returns the byte length of the prefix of `input` which matches this
    /// keyword.
    fn prefix_len(&self, input: &str) -> Option<usize> {
        match self.case {
            Case::Sensitive => input.starts_with(&self.text).then_some(self.text.len()),
            Case::Insensitive => {
                let end = input
                    .char_indices()
                    .nth(self.chars)
                    .map_or(input.len(), |(end, _)| end);
                let candidate = &input[..end];
                (candidate.chars().count() == self.chars
                    && unicase::eq(candidate, self.text.as_str()))
                .then_some(end)
            }
        }
    }
}

/// A compiled set of keywords which are matched longest-first.
#[derive(Clone, Debug)]
pub(crate) struct KeywordSet {
    /// The keywords, longest first.
    keywords: Vec<Keyword>,
    /// Bytes which can start a keyword.
    first_bytes: BitMap,
    /// If true, a keyword must not be followed immediately by an identifier
    /// character.
    boundary: bool,
}

impl KeywordSet {
    /// Compiles a keyword set. Empty words are ignored.
    ///
    /// Returns an error if no keywords remain, since such a set can never
    /// match anything.
    pub fn new<'a>(
        category: &'static str,
        words: impl IntoIterator<Item = &'a str>,
        case: Case,
        boundary: bool,
    ) -> Result<Self, Error> {
        let mut keywords = words
            .into_iter()
            .filter(|word| !word.is_empty())
            .map(|word| Keyword {
                text: word.to_string(),
                chars: word.chars().count(),
                case,
            })
            .collect::<Vec<_>>();

        if keywords.is_empty() {
            return Err(Error::EmptyKeywords(category));
        }

        keywords.sort_by(|a, b| b.chars.cmp(&a.chars).then_with(|| a.text.cmp(&b.text)));
        keywords.dedup_by(|a, b| a.text == b.text);

        let mut this = Self {
            keywords,
            first_bytes: BitMap::default(),
            boundary,
        };
        this.update_first_bytes();
        Ok(this)
    }

    /// Makes the given keywords match only with their exact letter case.
    #[must_use]
    pub fn with_exact_case(mut self, words: &[&str]) -> Self {
        for keyword in &mut self.keywords {
            if words.contains(&keyword.text.as_str()) {
                keyword.case = Case::Sensitive;
            }
        }
        self.update_first_bytes();
        self
    }

    /// Returns the byte length of the longest keyword at `pos` in `input`.
    pub fn match_at(&self, input: &str, pos: usize) -> Option<usize> {
        let rest = &input[pos..];
        if !rest
            .as_bytes()
            .first()
            .is_some_and(|b| self.first_bytes.contains(*b))
        {
            return None;
        }

        self.keywords.iter().find_map(|keyword| {
            let len = keyword.prefix_len(rest)?;
            (!self.boundary || !rest[len..].starts_with(is_identifier_char)).then_some(len)
        })
    }

    /// Rebuilds the lookup table of first bytes.
    fn update_first_bytes(&mut self) {
        let mut bits = BitMap::default();
        for keyword in &self.keywords {
            let Some(first) = keyword.text.chars().next() else {
                continue;
            };
            let mut set = |c: char| {
                let mut buf = [0; 4];
                bits.set(c.encode_utf8(&mut buf).as_bytes()[0]);
            };
            set(first);
            if keyword.case == Case::Insensitive {
                first.to_lowercase().for_each(&mut set);
                first.to_uppercase().for_each(&mut set);
            }
        }
        self.first_bytes = bits;
    }
}

/// Returns true if `c` may continue an identifier, which makes it a keyword
/// boundary violation.
fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// The namespace table of a wiki.
#[derive(Clone, Debug)]
pub(crate) struct Namespaces {
    /// Namespace IDs and their names. The first name is canonical.
    names: Vec<(i32, Vec<String>)>,
    /// All namespace names, for matching.
    pub keywords: KeywordSet,
    /// Names which must match with exact letter case.
    exact_case: &'static [&'static str],
}

impl Namespaces {
    /// Builds the namespace table. Localized names come first, so they
    /// become the canonical spelling.
    fn new(
        source: &'static ConfigurationSource,
        localization: Option<&Localization>,
    ) -> Result<Self, Error> {
        let mut names = source
            .namespaces
            .iter()
            .map(|ns| {
                let mut names = localization
                    .map(|l| l.namespace_names(ns.id).map(String::from).collect::<Vec<_>>())
                    .unwrap_or_default();
                names.extend(ns.names.iter().map(|name| (*name).to_string()));
                (ns.id, names)
            })
            .collect::<Vec<_>>();

        if let Some(localization) = localization {
            for id in localization.namespace_ids() {
                if !names.iter().any(|(known, _)| *known == id) {
                    names.push((id, localization.namespace_names(id).map(String::from).collect()));
                }
            }
        }

        for required in [Namespace::TEMPLATE, Namespace::CATEGORY] {
            if !names
                .iter()
                .any(|(id, names)| *id == required && names.iter().any(|n| !n.is_empty()))
            {
                return Err(Error::MissingNamespace(required));
            }
        }

        let keywords = KeywordSet::new(
            "namespaces",
            names.iter().flat_map(|(_, names)| names.iter().map(String::as_str)),
            Case::Insensitive,
            true,
        )?
        .with_exact_case(source.exact_case_namespaces);

        Ok(Self {
            names,
            keywords,
            exact_case: source.exact_case_namespaces,
        })
    }

    /// Finds the ID of the namespace with the given name.
    pub fn resolve(&self, name: &str) -> Option<i32> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        self.names.iter().find_map(|(id, names)| {
            names
                .iter()
                .any(|known| {
                    if self.exact_case.contains(&known.as_str()) {
                        known == name
                    } else {
                        unicase::eq(known.as_str(), name)
                    }
                })
                .then_some(*id)
        })
    }

    /// Returns the canonical name of the namespace with the given ID.
    pub fn canonical(&self, id: i32) -> Option<&str> {
        self.names
            .iter()
            .find(|(known, _)| *known == id)
            .and_then(|(_, names)| names.first())
            .map(String::as_str)
    }
}

/// A simple bitmap of bytes.
#[derive(Clone, Copy, Debug, Default)]
struct BitMap([u8; 32]);

impl BitMap {
    /// Returns true if the bitmap contains the given byte.
    fn contains(&self, byte: u8) -> bool {
        self.0[usize::from(byte / 8)] & (1 << (byte & 7)) != 0
    }

    /// Adds the given byte to the bitmap.
    fn set(&mut self, byte: u8) {
        self.0[usize::from(byte / 8)] |= 1 << (byte & 7);
    }
}
