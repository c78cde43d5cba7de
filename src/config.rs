//! The configuration document: one JSON file per page family, with a
//! `content` member bindings resolve against and a `theme` member for
//! the CSS custom properties. Neither member has a fixed schema.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize, Debug, Default)]
pub struct Config {
    /// Everything the binding passes, lists, sections and title read.
    /// Missing member deserializes to `Null`, which resolves to nothing.
    #[serde(default)]
    pub content: Value,
    /// Palette, shadows, fonts; applied as CSS custom properties.
    #[serde(default)]
    pub theme: Value,
}

impl Config {
    pub fn from_json(text: &str) -> Result<Config> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Config> {
        let text = std::fs::read_to_string(path)
            .with_context(|| anyhow!("reading config file {path:?}"))?;
        Self::from_json(&text)
            .with_context(|| anyhow!("parsing config file {path:?}"))
    }
}
