//! Configuration management
//!
//! Settings are read from a TOML file; every section falls back to its
//! defaults when absent.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::glyph::{glyph_nodes, DIGIT_COLUMNS, GLYPH_ROWS};
use crate::hopfield::{HopfieldConfig, MAX_NODES};

/// Glyph geometry; the network has rows x columns nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlyphConfig {
    pub rows: usize,
    pub columns: usize,
}

impl Default for GlyphConfig {
    fn default() -> Self {
        Self {
            rows: GLYPH_ROWS,
            columns: DIGIT_COLUMNS,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub glyph: GlyphConfig,
    pub recall: HopfieldConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file or use default
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Save configuration to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.node_count()?;
        if self.recall.max_sweeps == Some(0) {
            return Err(Error::Config("recall.max_sweeps must be positive".to_string()));
        }
        Ok(())
    }

    /// Nodes needed for one glyph
    pub fn node_count(&self) -> Result<usize> {
        glyph_nodes(self.glyph.rows, self.glyph.columns).ok_or_else(|| {
            Error::Config(format!(
                "glyph {}x{} must have between 1 and {} nodes",
                self.glyph.rows, self.glyph.columns, MAX_NODES
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.glyph.rows, 5);
        assert_eq!(config.node_count().unwrap(), 20);
        assert_eq!(config.recall.max_sweeps, None);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[glyph]\ncolumns = 8\n").unwrap();
        assert_eq!(config.glyph.rows, 5);
        assert_eq!(config.node_count().unwrap(), 40);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_save_and_load() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.recall.max_sweeps = Some(50);
        config.logging.level = "debug".to_string();

        config.save(file.path()).unwrap();
        assert_eq!(Config::load(file.path()).unwrap(), config);
    }

    #[test]
    fn test_load_rejects_invalid() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[glyph]\nrows = 0").unwrap();

        assert!(matches!(Config::load(file.path()), Err(Error::Config(_))));
        assert_eq!(Config::load_or_default(file.path()), Config::default());
    }

    #[test]
    fn test_validate_rejects_oversized_glyph() {
        let mut config = Config::default();
        config.glyph.columns = 4_000_000_000_000_000_000;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        config.glyph.columns = MAX_NODES;
        assert!(matches!(config.node_count(), Err(Error::Config(_))));

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[glyph]\ncolumns = 4000000000000000000").unwrap();
        assert!(matches!(Config::load(file.path()), Err(Error::Config(_))));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            Config::load("/nonexistent/hopfield.toml"),
            Err(Error::Io(_))
        ));
    }
}
