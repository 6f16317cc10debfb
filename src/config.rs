//! Configuration for clippings-ai.
//!
//! The config file lives at `{config_dir}/clippings-ai/config.toml`.
//! CLI flags override config file values, which override defaults. The API
//! key itself is never read from the file, only from the environment
//! variable the file names.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::clippings::{ExcerptMode, DEFAULT_CLIPPINGS_PATH};
use crate::error::{Error, Result};
use crate::prompt::EmptySelection;
use crate::style::Theme;

const CONFIG_DIR_NAME: &str = "clippings-ai";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Top-level config, deserialized from TOML.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub clippings: ClippingsConfig,
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
}

/// `[clippings]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClippingsConfig {
    pub path: PathBuf,
    pub excerpt: ExcerptMode,
}

impl Default for ClippingsConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_CLIPPINGS_PATH),
            excerpt: ExcerptMode::default(),
        }
    }
}

/// `[api]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Name of the env var holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Extra attempts after the first failed one.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay before the first retry; doubles on each further attempt.
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
        }
    }
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".into()
}
fn default_model() -> String {
    "gemini-1.5-flash".into()
}
fn default_api_key_env() -> String {
    "GEMINI_API_KEY".into()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_max_retries() -> u32 {
    2
}
fn default_retry_base_delay_ms() -> u64 {
    500
}

/// `[display]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub theme: Theme,
}

/// `[prompt]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    pub empty_selection: EmptySelection,
}

/// Values coming from the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub clippings: Option<PathBuf>,
    pub theme: Option<Theme>,
    pub model: Option<String>,
    pub full_excerpts: bool,
}

impl Config {
    /// Load from `explicit` if given (it must exist), otherwise from the
    /// default location when present, otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match default_config_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path),
                None => {
                    tracing::debug!("no config file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&data, path)?;
        tracing::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    fn parse(contents: &str, path: &Path) -> Result<Self> {
        toml::from_str(contents).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn apply_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(path) = overrides.clippings {
            self.clippings.path = path;
        }
        if let Some(theme) = overrides.theme {
            self.display.theme = theme;
        }
        if let Some(model) = overrides.model {
            self.api.model = model;
        }
        if overrides.full_excerpts {
            self.clippings.excerpt = ExcerptMode::Full;
        }
        self
    }

    /// API key from the process environment.
    pub fn api_key(&self) -> Result<String> {
        self.api_key_from(|name| std::env::var(name).ok())
    }

    pub fn api_key_from(&self, lookup: impl Fn(&str) -> Option<String>) -> Result<String> {
        lookup(&self.api.api_key_env)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::MissingApiKey {
                var: self.api.api_key_env.clone(),
            })
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse(toml: &str) -> Config {
        Config::parse(toml, Path::new("test.toml")).unwrap()
    }

    #[test]
    fn empty_file_gives_defaults() {
        let config = parse("");
        assert_eq!(config, Config::default());
        assert_eq!(config.clippings.path, PathBuf::from("/mnt/us/documents/My Clippings.txt"));
        assert_eq!(config.api.model, "gemini-1.5-flash");
        assert_eq!(config.api.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.display.theme, Theme::Color);
        assert_eq!(config.prompt.empty_selection, EmptySelection::BareQuestion);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = parse(
            r#"
            [clippings]
            excerpt = "full"

            [api]
            model = "gemini-2.0-flash"
            max_retries = 0

            [display]
            theme = "mono"

            [prompt]
            empty_selection = "template"
            "#,
        );
        assert_eq!(config.clippings.excerpt, ExcerptMode::Full);
        assert_eq!(config.clippings.path, PathBuf::from(DEFAULT_CLIPPINGS_PATH));
        assert_eq!(config.api.model, "gemini-2.0-flash");
        assert_eq!(config.api.max_retries, 0);
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.display.theme, Theme::Mono);
        assert_eq!(config.prompt.empty_selection, EmptySelection::Template);
    }

    #[test]
    fn unknown_theme_is_a_parse_error() {
        let err = Config::parse("[display]\ntheme = \"neon\"", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn overrides_win_over_file() {
        let config = parse("[display]\ntheme = \"mono\"").apply_overrides(Overrides {
            clippings: Some(PathBuf::from("/tmp/clips.txt")),
            theme: Some(Theme::Plain),
            model: Some("gemini-pro".into()),
            full_excerpts: true,
        });
        assert_eq!(config.clippings.path, PathBuf::from("/tmp/clips.txt"));
        assert_eq!(config.display.theme, Theme::Plain);
        assert_eq!(config.api.model, "gemini-pro");
        assert_eq!(config.clippings.excerpt, ExcerptMode::Full);
    }

    #[test]
    fn api_key_comes_from_the_named_variable() {
        let config = parse("[api]\napi_key_env = \"MY_KEY\"");
        let key = config
            .api_key_from(|name| (name == "MY_KEY").then(|| " secret ".to_string()))
            .unwrap();
        assert_eq!(key, "secret");
    }

    #[test]
    fn missing_or_blank_api_key_is_an_error() {
        let config = Config::default();
        let err = config.api_key_from(|_| None).unwrap_err();
        assert_eq!(err.to_string(), "no API key found; set the GEMINI_API_KEY environment variable");
        assert!(config.api_key_from(|_| Some("  ".into())).is_err());
    }

    #[test]
    fn explicit_config_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, Error::ConfigRead { .. }));
    }

    #[test]
    fn loads_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[clippings]\npath = \"/books/My Clippings.txt\"").unwrap();
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.clippings.path, PathBuf::from("/books/My Clippings.txt"));
    }
}
