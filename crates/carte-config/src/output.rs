use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_pretty() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    #[serde(default = "default_dir")]
    pub dir: PathBuf,
    /// Indent written JSON artifacts
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            pretty: default_pretty(),
        }
    }
}

impl OutputConfig {
    pub fn new() -> Self {
        let dir = env::var("CARTE_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_dir());

        Self {
            dir,
            pretty: default_pretty(),
        }
    }
}
