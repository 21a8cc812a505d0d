//! Configuration to acknowledge user preferences as well as set defaults.
//!
//! Specifically, we try to find a scasparse.toml, and if present we load settings from there.
//! This provides the input extensions, output format and layout, document naming and
//! parallelism. Command line flags override whatever is loaded here.

use crate::error::UnknownFormat;
use crate::render::{OutputFormat, RenderOptions};
use facet::Facet;
use std::fs;
use std::path::Path;

/// File looked up in the working directory.
pub const CONFIG_FILE: &str = "scasparse.toml";

#[derive(Facet, Clone, Debug, PartialEq)]
/// User preferences loaded from scasparse.toml or falling back to defaults.
pub struct Config {
    #[facet(default = vec!["json".to_string(), "ndjson".to_string(), "jsonl".to_string(), "md".to_string(), "docx".to_string()])]
    /// File suffixes to match when scanning directories.
    pub file_extensions: Vec<String>,
    #[facet(default = "xml".to_string())]
    /// Output format name: `xml`, `json` or `outline`.
    pub output_format: String,
    #[facet(default = 2)]
    /// Spaces per nesting level in XML output.
    pub indent: usize,
    #[facet(default = "3GPP TS".to_string())]
    /// Prefix for document names derived from spec numbers.
    pub name_prefix: String,
    #[facet(default = 0)]
    /// Worker threads for batch runs, 0 for one per core.
    pub jobs: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file_extensions: ["json", "ndjson", "jsonl", "md", "docx"]
                .iter()
                .map(ToString::to_string)
                .collect(),
            output_format: "xml".to_string(),
            indent: 2,
            name_prefix: "3GPP TS".to_string(),
            jobs: 0,
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from scasparse.toml if present.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    #[must_use]
    /// Load configuration from a specific file, falling back to defaults if it is missing or
    /// invalid.
    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            return Self::default();
        };
        if let Ok(config) = facet_toml::from_str::<Self>(&contents) {
            tracing::debug!(path = %path.display(), "loaded configuration");
            return config;
        }
        tracing::warn!(path = %path.display(), "ignoring invalid configuration file");
        Self::default()
    }

    /// The configured output format.
    ///
    /// # Errors
    ///
    /// Returns an error if the format name is not recognised.
    pub fn output_format(&self) -> Result<OutputFormat, UnknownFormat> {
        self.output_format.parse()
    }

    #[must_use]
    /// Layout settings for the renderers.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            indent: self.indent,
        }
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
