use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::Deserialize;
use std::{collections::HashMap, fs, path::PathBuf};

use crate::keywords::Keywords;
use crate::resolver::DEFAULT_FORMATS;

#[derive(Debug, Clone)]
pub struct Config {
    /// Display format for confirmations (e.g. "Friday, 14 Jun 2024").
    pub date_format: String,
    /// Accepted absolute date formats for user input.
    pub input_date_formats: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            date_format: "%A, %d %b %Y".to_string(),
            input_date_formats: DEFAULT_FORMATS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    date_format: Option<String>,
    input_date_formats: Option<Vec<String>>,
    /// Optional table:
    /// [synonyms]
    /// tmrw = "tomorrow"
    /// manana = "tomorrow"
    synonyms: Option<HashMap<String, String>>,
}

impl Config {
    /// Public entrypoint: load config from disk (first XDG path, then native), apply defaults,
    /// and extend the global Keywords registry with user-defined synonyms if present.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config().unwrap_or_else(|_| FileConfig {
            date_format: None,
            input_date_formats: None,
            synonyms: None,
        });

        let defaults = Self::default();
        let date_format = file_config.date_format.unwrap_or(defaults.date_format);
        let input_date_formats = file_config
            .input_date_formats
            .filter(|formats| !formats.is_empty())
            .unwrap_or(defaults.input_date_formats);

        // Extend global keyword registry once at startup.
        Self::load_synonyms(&file_config.synonyms);

        Ok(Self {
            date_format,
            input_date_formats,
        })
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            let xdg = b.home_dir().join(".config").join("appt").join("config.toml");
            v.push(xdg);
            let native = b.config_dir().join("appt").join("config.toml");
            v.push(native);
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig {
            date_format: None,
            input_date_formats: None,
            synonyms: None,
        })
    }

    /// Parse a TOML string into `FileConfig`.
    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }

    /// Merge `[synonyms]` into the global Keywords registry.
    /// Omits synonyms that collide with a canonical Keyword (eg. "today").
    /// Lowercases both alias and target for case-insensitive behavior.
    fn load_synonyms(synonyms: &Option<HashMap<String, String>>) {
        match synonyms {
            Some(map) if !map.is_empty() => {
                let pairs: Vec<(String, String)> = map
                    .iter()
                    .filter(|(alias, _)| !Keywords::is_canonical(alias))
                    .map(|(a, t)| (a.clone(), t.clone()))
                    .collect();

                if !pairs.is_empty() {
                    Keywords::extend(&pairs);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::keywords::{Keyword, Keywords};

    /// Test helper to create a default `Config` for testing purposes.
    ///
    /// This is the single source of truth for test configuration.
    /// If you add a field to `Config`, you only need to update it here.
    pub(crate) fn mk_config() -> Config {
        Config::default()
    }

    #[test]
    fn candidates_prioritize_xdg_then_native() {
        if let Some(b) = BaseDirs::new() {
            let expected_xdg = b.home_dir().join(".config").join("appt").join("config.toml");
            let expected_native = b.config_dir().join("appt").join("config.toml");
            let c = super::Config::config_file_paths();
            assert_eq!(c.first(), Some(&expected_xdg));
            assert_eq!(c.get(1), Some(&expected_native));
        }
    }

    #[test]
    fn parse_file_accepts_formats() {
        let toml = r#"
            date_format = "%d %B %Y"
            input_date_formats = ["%m/%d/%Y"]
        "#;
        let fc = super::Config::parse_file(toml).unwrap();
        assert_eq!(fc.date_format.as_deref(), Some("%d %B %Y"));
        assert_eq!(
            fc.input_date_formats.as_deref(),
            Some(&["%m/%d/%Y".to_string()][..])
        );
    }

    #[test]
    fn parse_file_accepts_synonyms_and_extends_registry() {
        let toml = r#"
            [synonyms]
            ystr = "yesterday"
            AYER = "yesterday"
        "#;

        let fc = super::Config::parse_file(toml).unwrap();
        assert!(fc.synonyms.is_some());

        super::Config::load_synonyms(&fc.synonyms);

        assert!(Keywords::matches(Keyword::Yesterday, "ystr"));
        assert!(Keywords::matches(Keyword::Yesterday, "ayer"));
    }

    #[test]
    fn parse_file_no_accepts_canonical_synonyms() {
        let toml = r#"
            [synonyms]
            today = "yesterday"
            ystr = "yesterday"
        "#;

        let fc = super::Config::parse_file(toml).unwrap();
        assert!(fc.synonyms.is_some());

        super::Config::load_synonyms(&fc.synonyms);

        assert!(!Keywords::matches(Keyword::Yesterday, "today"));
        assert!(Keywords::matches(Keyword::Yesterday, "ystr"));
    }

    #[test]
    fn defaults_fill_missing_fields() {
        let config = Config::default();
        assert_eq!(config.date_format, "%A, %d %b %Y");
        assert!(config.input_date_formats.contains(&"%Y-%m-%d".to_string()));
    }
}
