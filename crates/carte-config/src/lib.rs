use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use self::output::OutputConfig;
use self::stats::StatsConfig;
use self::vocabulary::VocabularyConfig;

pub mod output;
pub mod stats;
pub mod vocabulary;

fn default_input_dir() -> PathBuf {
    PathBuf::from("content")
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding parsed menu documents
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,
    pub vocabulary: VocabularyConfig,
    pub stats: StatsConfig,
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            vocabulary: VocabularyConfig::default(),
            stats: StatsConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Defaults overridden by `CARTE_*` environment variables
    pub fn new() -> Self {
        let input_dir = env::var("CARTE_INPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_input_dir());

        Config {
            input_dir,
            vocabulary: VocabularyConfig::new(),
            stats: StatsConfig::new(),
            output: OutputConfig::new(),
        }
    }

    /// Load a JSON profile; missing sections fall back to defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Parse an environment variable, keeping `default` when unset or malformed
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
