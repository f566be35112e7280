//! Icon catalog
//!
//! The catalog is the fixed set of icons a quiz draws its subjects and
//! distractors from. It is loaded once (either from one of the bundled
//! catalogs or from JSON) and never mutated afterwards.

use std::{
    collections::HashSet,
    sync::{Arc, LazyLock},
};

use heck::ToTitleCase;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single icon together with the name players have to guess
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconCatalogEntry {
    /// Path or file token used by the presentation layer to show the icon
    pub identifier: String,
    /// The name shown on the answer buttons
    pub display_name: String,
}

impl IconCatalogEntry {
    /// Creates an entry from an identifier and an explicit display name
    pub fn new(identifier: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            display_name: display_name.into(),
        }
    }

    /// Creates an entry whose display name is derived from the icon file name
    ///
    /// The directory, the extension and the icon set's style suffix are
    /// removed and the remaining stem is title-cased, so
    /// `icons/branch_fork_link_24_regular.svg` becomes `Branch Fork Link`.
    /// Acronyms come out title-cased (`Database Kql`); use [`Self::new`] when
    /// the exact spelling matters.
    pub fn from_identifier(identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();
        let file_name = identifier.rsplit('/').next().unwrap_or(&identifier);
        let stem = file_name
            .rsplit_once('.')
            .map_or(file_name, |(stem, _)| stem);
        let stem = stem
            .strip_suffix(crate::constants::catalog::ICON_STYLE_SUFFIX)
            .unwrap_or(stem);
        let display_name = stem.to_title_case();
        Self {
            identifier,
            display_name,
        }
    }
}

/// Errors that can occur while building a catalog
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The catalog contains no entries
    #[error("catalog is empty")]
    Empty,
    /// Two entries share the same identifier
    #[error("duplicate icon identifier: {0}")]
    DuplicateIdentifier(String),
    /// A display name is empty or too long
    #[error("invalid display name for icon {0}")]
    InvalidDisplayName(String),
    /// The JSON source could not be parsed
    #[error("malformed catalog: {0}")]
    Json(String),
}

/// An immutable, name-deduplicated sequence of icons
///
/// Cloning is cheap; the entries are shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Arc<[IconCatalogEntry]>,
}

static COMPACT: LazyLock<Catalog> = LazyLock::new(|| {
    Catalog::from_json(include_str!("../catalogs/compact.json")).expect("bundled catalog is valid")
});

static FULL: LazyLock<Catalog> = LazyLock::new(|| {
    Catalog::from_json(include_str!("../catalogs/full.json")).expect("bundled catalog is valid")
});

impl Catalog {
    /// Builds a catalog from a list of entries
    ///
    /// Entries are deduplicated by display name, keeping the first
    /// occurrence, so that every name appears at most once among the options.
    ///
    /// # Errors
    ///
    /// * `Error::Empty` - no entries were given
    /// * `Error::InvalidDisplayName` - a display name is blank or too long
    /// * `Error::DuplicateIdentifier` - two kept entries share an identifier
    pub fn new<I: IntoIterator<Item = IconCatalogEntry>>(entries: I) -> Result<Self, Error> {
        let entries = entries
            .into_iter()
            .unique_by(|entry| entry.display_name.clone())
            .collect_vec();

        if entries.is_empty() {
            return Err(Error::Empty);
        }

        let mut identifiers = HashSet::new();
        for entry in &entries {
            let name = entry.display_name.trim();
            if name.is_empty()
                || name.chars().count() > crate::constants::catalog::MAX_DISPLAY_NAME_LENGTH
            {
                return Err(Error::InvalidDisplayName(entry.identifier.clone()));
            }
            if !identifiers.insert(entry.identifier.as_str()) {
                return Err(Error::DuplicateIdentifier(entry.identifier.clone()));
            }
        }

        Ok(Self {
            entries: entries.into(),
        })
    }

    /// Parses a catalog from a JSON array of `{identifier, displayName}`
    ///
    /// # Errors
    ///
    /// Returns `Error::Json` when the input is malformed, or any error of
    /// [`Catalog::new`].
    pub fn from_json(source: &str) -> Result<Self, Error> {
        let entries: Vec<IconCatalogEntry> =
            serde_json::from_str(source).map_err(|e| Error::Json(e.to_string()))?;
        Self::new(entries)
    }

    /// The seven-icon catalog of the compact widget
    pub fn compact() -> Self {
        COMPACT.clone()
    }

    /// The thirty Fabric icons, the two guest speakers and the Evidi logo
    pub fn full() -> Self {
        FULL.clone()
    }

    /// Looks up an entry by display name
    pub fn find(&self, display_name: &str) -> Option<&IconCatalogEntry> {
        self.entries
            .iter()
            .find(|entry| entry.display_name == display_name)
    }

    /// Returns the entries in catalog order
    pub fn entries(&self) -> &[IconCatalogEntry] {
        &self.entries
    }

    /// Returns an iterator over the entries
    pub fn iter(&self) -> std::slice::Iter<'_, IconCatalogEntry> {
        self.entries.iter()
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; an empty catalog cannot be built
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a IconCatalogEntry;
    type IntoIter = std::slice::Iter<'a, IconCatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
