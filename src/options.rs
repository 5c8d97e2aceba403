//! JSON options file.
//!
//! Toggles take booleans or `"yes"`/`"no"` words:
//!
//! ```json
//! {
//!     "enable_transform": "yes",
//!     "enable_will_change": "yes",
//!     "enable_backface": "no",
//!     "enable_perspective": false,
//!     "exclude_selectors": ".no-gpu, #legacy",
//!     "target_selectors": "animation, transition, @keyframes"
//! }
//! ```
//!
//! A toggle missing from the file is off, the way an unchecked box is simply
//! absent from a saved option set. A missing `exclude_selectors` excludes
//! nothing and a missing `target_selectors` keeps the default targets.
//! Without any file, [`Options::default`] enables every toggle. Lists may be
//! comma-separated strings or JSON arrays.

use std::fs;
use std::path::Path;

use gpucss::Configuration;
use gpucss::config::DEFAULT_TARGET_PROPERTIES;
use serde::de::{self, Deserializer};
use serde::Deserialize;

use crate::error::{Error, Result};

/// A list option: `"a, b"` or `["a", "b"]`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ListOption {
    Text(String),
    Items(Vec<String>),
}

impl ListOption {
    /// Raw entries; empty and whitespace-only entries are dropped later by
    /// [`Configuration`].
    pub fn entries(&self) -> Vec<&str> {
        match self {
            ListOption::Text(text) => text.split(',').collect(),
            ListOption::Items(items) => items.iter().map(String::as_str).collect(),
        }
    }
}

impl Default for ListOption {
    fn default() -> Self {
        ListOption::Text(String::new())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Options {
    #[serde(default, deserialize_with = "toggle")]
    pub enable_transform: bool,
    #[serde(default, deserialize_with = "toggle")]
    pub enable_will_change: bool,
    #[serde(default, deserialize_with = "toggle")]
    pub enable_backface: bool,
    #[serde(default, deserialize_with = "toggle")]
    pub enable_perspective: bool,
    #[serde(default)]
    pub exclude_selectors: ListOption,
    /// Property substrings, despite the key name.
    #[serde(default = "default_targets", alias = "target_properties")]
    pub target_selectors: ListOption,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            enable_transform: true,
            enable_will_change: true,
            enable_backface: true,
            enable_perspective: true,
            exclude_selectors: ListOption::default(),
            target_selectors: default_targets(),
        }
    }
}

fn default_targets() -> ListOption {
    ListOption::Text(DEFAULT_TARGET_PROPERTIES.join(", "))
}

impl Options {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let options = Self::from_json(&text)?;
        log::debug!("loaded options from {}", path.display());
        Ok(options)
    }

    pub fn to_configuration(&self) -> Configuration {
        Configuration::default()
            .with_transform(self.enable_transform)
            .with_will_change(self.enable_will_change)
            .with_backface(self.enable_backface)
            .with_perspective(self.enable_perspective)
            .with_exclude_selectors(self.exclude_selectors.entries())
            .with_target_properties(self.target_selectors.entries())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Toggle {
    Bool(bool),
    Word(String),
}

/// Accepts JSON booleans as well as `"yes"` / `"no"` style words.
fn toggle<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Toggle::deserialize(deserializer)? {
        Toggle::Bool(value) => Ok(value),
        Toggle::Word(word) => match word.trim().to_ascii_lowercase().as_str() {
            "yes" | "true" | "on" | "1" => Ok(true),
            "no" | "false" | "off" | "0" | "" => Ok(false),
            _ => Err(de::Error::custom(format!(
                "expected a boolean or \"yes\"/\"no\", got {word:?}"
            ))),
        },
    }
}
