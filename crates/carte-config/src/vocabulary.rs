use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_path() -> PathBuf {
    PathBuf::from("data/known_terms.tsv")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VocabularyConfig {
    /// Tab-separated vocabulary table
    #[serde(default = "default_path")]
    pub path: PathBuf,
    /// Optional external list of dish names used for linting
    #[serde(default)]
    pub cross_reference_path: Option<PathBuf>,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            cross_reference_path: None,
        }
    }
}

impl VocabularyConfig {
    pub fn new() -> Self {
        let path = env::var("CARTE_VOCABULARY_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_path());
        let cross_reference_path = env::var("CARTE_XREF_PATH").ok().map(PathBuf::from);

        Self {
            path,
            cross_reference_path,
        }
    }
}
