//! # Configuration
//!
//! Settings live in `config.json` inside the data directory, next to the
//! `posts/` directory (never inside it, since every file there is a post).
//! A missing file means defaults; unknown fields are ignored.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `sort` | `created` | Listing order: `created`, `modified` (newest first) or `title` |
//! | `pretty-json` | `true` | Pretty-print post files when writing |
//! | `show-functional-tags` | `false` | Include `_`-prefixed tags in `kbase tags` |
//!
//! Keys may be written with dashes or underscores.

use crate::error::{KbError, Result};
use crate::model::Post;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

const CONFIG_FILENAME: &str = "config.json";

pub const KEYS: &[&str] = &["sort", "pretty-json", "show-functional-tags"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Oldest first (id order).
    #[default]
    Created,
    /// Most recently modified first.
    Modified,
    /// Case-insensitive title order.
    Title,
}

impl SortOrder {
    pub fn apply(self, posts: &mut [Post]) {
        match self {
            SortOrder::Created => posts.sort_by(|a, b| a.id.cmp(&b.id)),
            SortOrder::Modified => posts.sort_by(|a, b| {
                b.modified_time
                    .cmp(&a.modified_time)
                    .then_with(|| a.id.cmp(&b.id))
            }),
            SortOrder::Title => posts.sort_by(|a, b| {
                a.title
                    .to_lowercase()
                    .cmp(&b.title.to_lowercase())
                    .then_with(|| a.id.cmp(&b.id))
            }),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SortOrder::Created => "created",
            SortOrder::Modified => "modified",
            SortOrder::Title => "title",
        };
        f.write_str(s)
    }
}

impl FromStr for SortOrder {
    type Err = KbError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "created" => Ok(SortOrder::Created),
            "modified" => Ok(SortOrder::Modified),
            "title" => Ok(SortOrder::Title),
            other => Err(KbError::Config(format!(
                "Invalid sort order '{}' (expected created, modified or title)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KbConfig {
    #[serde(default)]
    pub sort: SortOrder,

    #[serde(default = "default_true")]
    pub pretty_json: bool,

    #[serde(default)]
    pub show_functional_tags: bool,
}

fn default_true() -> bool {
    true
}

impl Default for KbConfig {
    fn default() -> Self {
        Self {
            sort: SortOrder::default(),
            pretty_json: true,
            show_functional_tags: false,
        }
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_lowercase().replace('_', "-")
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(KbError::Config(format!(
            "Invalid value '{}' for {} (expected true or false)",
            value, key
        ))),
    }
}

impl KbConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(KbError::Io)?;
        let config: KbConfig =
            serde_json::from_str(&content).map_err(KbError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(KbError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(KbError::Serialization)?;
        fs::write(config_path, content).map_err(KbError::Io)?;
        Ok(())
    }

    /// Current value of `key`, formatted for display.
    pub fn get(&self, key: &str) -> Option<String> {
        match normalize_key(key).as_str() {
            "sort" => Some(self.sort.to_string()),
            "pretty-json" => Some(self.pretty_json.to_string()),
            "show-functional-tags" => Some(self.show_functional_tags.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let key = normalize_key(key);
        match key.as_str() {
            "sort" => self.sort = value.parse()?,
            "pretty-json" => self.pretty_json = parse_bool(&key, value)?,
            "show-functional-tags" => self.show_functional_tags = parse_bool(&key, value)?,
            _ => return Err(KbError::Config(format!("Unknown config key: {}", key))),
        }
        Ok(())
    }

    /// All keys with their current values, in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        KEYS.iter()
            .filter_map(|&k| self.get(k).map(|v| (k, v)))
            .collect()
    }
}
