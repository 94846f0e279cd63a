use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::export::OutputFormat;
use crate::language::Language;

/// Settings for one analysis run, assembled from CLI arguments layered
/// over the optional `dep-graph.toml` at the base path.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Glob pattern selecting the files to analyze.
    pub pattern: String,
    /// Languages in scope; the first one is the primary resolution target.
    pub languages: Vec<Language>,
    pub format: OutputFormat,
    /// Root that module identifiers are made relative to.
    pub base_path: PathBuf,
    /// Destination file; stdout when absent.
    pub output: Option<PathBuf>,
    pub verbose: bool,
    /// Path substrings excluded from discovery.
    pub exclude: Vec<String>,
}

impl AnalyzerConfig {
    pub fn primary_language(&self) -> Language {
        self.languages.first().copied().unwrap_or(Language::Ts)
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            pattern: "**/*".to_owned(),
            languages: vec![Language::Ts, Language::Tsx, Language::Js, Language::Jsx],
            format: OutputFormat::Json,
            base_path: PathBuf::from("."),
            output: None,
            verbose: false,
            exclude: vec!["node_modules".to_owned()],
        }
    }
}

/// Optional overrides read from `dep-graph.toml`.
#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    pub pattern: Option<String>,
    pub languages: Option<Vec<Language>>,
    pub output: Option<PathBuf>,
    pub exclude: Option<Vec<String>>,
}

impl FileConfig {
    /// Load overrides from `dep-graph.toml` in the given root directory.
    ///
    /// Returns empty overrides if the file does not exist or cannot be parsed.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join("dep-graph.toml");

        if !config_path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => match toml::from_str::<Self>(&contents) {
                Ok(config) => config,
                Err(err) => {
                    eprintln!("warning: failed to parse dep-graph.toml: {err}. Using defaults.");
                    Self::default()
                }
            },
            Err(err) => {
                eprintln!("warning: failed to read dep-graph.toml: {err}. Using defaults.");
                Self::default()
            }
        }
    }

    /// Apply file-level overrides beneath values already set on the CLI.
    /// A value the user did not give on the CLI falls back to the file, then
    /// to the default.
    pub fn merge_into(
        self,
        config: &mut AnalyzerConfig,
        cli_had_pattern: bool,
        cli_had_languages: bool,
    ) {
        if !cli_had_pattern {
            if let Some(pattern) = self.pattern {
                config.pattern = pattern;
            }
        }
        if !cli_had_languages {
            if let Some(languages) = self.languages {
                if !languages.is_empty() {
                    config.languages = languages;
                }
            }
        }
        if config.output.is_none() {
            config.output = self.output;
        }
        if let Some(exclude) = self.exclude {
            config.exclude.extend(exclude);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn tmp() -> TempDir {
        TempDir::new().expect("create temp dir")
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tmp();
        let file = FileConfig::load(dir.path());
        assert!(file.pattern.is_none());
        assert!(file.exclude.is_none());
    }

    #[test]
    fn test_load_overrides() {
        let dir = tmp();
        fs::write(
            dir.path().join("dep-graph.toml"),
            "pattern = \"src/**/*.ts\"\nexclude = [\"dist\"]\n",
        )
        .expect("write config");
        let file = FileConfig::load(dir.path());
        assert_eq!(file.pattern.as_deref(), Some("src/**/*.ts"));
        assert_eq!(file.exclude, Some(vec!["dist".to_owned()]));
    }

    #[test]
    fn test_invalid_toml_falls_back_to_defaults() {
        let dir = tmp();
        fs::write(dir.path().join("dep-graph.toml"), "pattern = [not toml").expect("write config");
        let file = FileConfig::load(dir.path());
        assert!(file.pattern.is_none());
    }

    #[test]
    fn test_merge_respects_cli_precedence() {
        let mut config = AnalyzerConfig {
            pattern: "cli/**/*.ts".to_owned(),
            ..AnalyzerConfig::default()
        };
        let file = FileConfig {
            pattern: Some("file/**/*.ts".to_owned()),
            exclude: Some(vec!["build".to_owned()]),
            ..FileConfig::default()
        };
        file.merge_into(&mut config, true, false);
        assert_eq!(config.pattern, "cli/**/*.ts");
        assert!(config.exclude.iter().any(|e| e == "build"));
        assert!(config.exclude.iter().any(|e| e == "node_modules"));
    }

    #[test]
    fn test_explicit_cli_languages_beat_file_languages() {
        let mut config = AnalyzerConfig {
            languages: vec![Language::Ts, Language::Tsx, Language::Js, Language::Jsx],
            ..AnalyzerConfig::default()
        };
        let file = FileConfig {
            languages: Some(vec![Language::Js]),
            ..FileConfig::default()
        };
        file.merge_into(&mut config, false, true);
        assert_eq!(config.languages.len(), 4, "explicit CLI list is kept");

        let mut defaulted = AnalyzerConfig::default();
        let file = FileConfig {
            languages: Some(vec![Language::Js]),
            ..FileConfig::default()
        };
        file.merge_into(&mut defaulted, false, false);
        assert_eq!(defaulted.languages, vec![Language::Js]);
    }
}
