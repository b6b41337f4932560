//! Localized keyword synonyms.
//!
//! A wiki in another language spells namespaces and magic words differently.
//! A localization file lists those spellings per canonical key, for example:
//!
//! ```toml
//! [NAMESPACES]
//! 10 = "Vorlage"
//! 14 = "Kategorie"
//!
//! [BEHAVIOR_SWITCHES]
//! __NOTOC__ = "__KEIN_INHALTSVERZEICHNIS__,__KEININHALTSVERZEICHNIS__"
//! ```
//!
//! Every value is a comma-separated list of synonyms. Missing sections are
//! empty.

use serde::Deserialize;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

/// Errors that may occur when loading a localization file.
#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    /// The file could not be read.
    #[error("failed to read localization file at {path}: {source}")]
    Read {
        /// The file path.
        path: PathBuf,
        /// The underlying error.
        source: std::io::Error,
    },

    /// The file was not valid TOML, or had the wrong shape.
    #[error("failed to parse localization file at {path}: {source}")]
    Parse {
        /// The file path.
        path: PathBuf,
        /// The underlying error.
        source: toml::de::Error,
    },

    /// A `NAMESPACES` key was not a namespace ID.
    #[error("invalid namespace id '{key}' in localization file at {path}")]
    NamespaceId {
        /// The file path.
        path: PathBuf,
        /// The offending key.
        key: String,
    },
}

/// Localized synonyms, keyed by canonical name.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) struct Localization {
    /// Namespace names, keyed by namespace ID.
    #[serde(default)]
    namespaces: BTreeMap<String, String>,
    /// Behavior switches, keyed by their English spelling.
    #[serde(default)]
    behavior_switches: BTreeMap<String, String>,
    /// Variables, keyed by their English spelling.
    #[serde(default)]
    variables: BTreeMap<String, String>,
    /// Parser functions, keyed by their English spelling.
    #[serde(default)]
    parser_functions: BTreeMap<String, String>,
    /// Inclusion modifiers, keyed by their English spelling.
    #[serde(default)]
    modifiers: BTreeMap<String, String>,
}

impl Localization {
    /// Loads a localization file.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let localization = Self::from_toml(&content).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(key) = localization
            .namespaces
            .keys()
            .find(|key| key.trim().parse::<i32>().is_err())
        {
            return Err(Error::NamespaceId {
                path: path.to_path_buf(),
                key: key.clone(),
            });
        }

        Ok(localization)
    }

    /// Finds the localization for a wiki content language in `dir`, as
    /// `<dir>/<language>.toml`.
    ///
    /// English is the built-in language and never has a localization. A
    /// missing file is not an error; the built-in tables are used alone.
    pub fn for_language(dir: impl AsRef<Path>, language: &str) -> Result<Option<Self>, Error> {
        if language.is_empty() || language == "en" {
            return Ok(None);
        }

        let path = dir.as_ref().join(format!("{language}.toml"));
        if !path.exists() {
            log::warn!(
                "No localization for language '{language}' at {}; using built-in names only",
                path.display()
            );
            return Ok(None);
        }

        log::info!("Using localization {}", path.display());
        Self::load_from_path(path).map(Some)
    }

    /// Parses localization data.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Localized names for the namespace with the given ID, in file order.
    pub fn namespace_names(&self, id: i32) -> impl Iterator<Item = &str> {
        self.namespaces
            .iter()
            .filter(move |(key, _)| key.trim().parse::<i32>().ok() == Some(id))
            .flat_map(|(_, names)| synonyms(names))
    }

    /// All namespace IDs that have localized names.
    pub fn namespace_ids(&self) -> impl Iterator<Item = i32> {
        self.namespaces
            .keys()
            .filter_map(|key| key.trim().parse::<i32>().ok())
    }

    /// All localized behavior switches.
    pub fn behavior_switches(&self) -> impl Iterator<Item = &str> {
        self.behavior_switches.values().flat_map(|v| synonyms(v))
    }

    /// All localized variables.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.variables.values().flat_map(|v| synonyms(v))
    }

    /// All localized parser functions.
    pub fn parser_functions(&self) -> impl Iterator<Item = &str> {
        self.parser_functions.values().flat_map(|v| synonyms(v))
    }

    /// All localized inclusion modifiers.
    pub fn modifiers(&self) -> impl Iterator<Item = &str> {
        self.modifiers.values().flat_map(|v| synonyms(v))
    }
}

/// Splits a comma-separated synonym list.
fn synonyms(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|name| !name.is_empty())
}
