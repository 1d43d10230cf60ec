use serde::{Deserialize, Serialize};

use crate::env_or;

fn default_top_characters() -> usize {
    10
}

fn default_uncovered_character_scan() -> usize {
    150
}

fn default_trigram_limit() -> usize {
    100
}

fn default_bigram_limit() -> usize {
    250
}

fn default_min_count() -> usize {
    3
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Number of characters reported in the ranking
    #[serde(default = "default_top_characters")]
    pub top_characters: usize,
    /// How many of the most frequent characters are checked for vocabulary coverage
    #[serde(default = "default_uncovered_character_scan")]
    pub uncovered_character_scan: usize,
    #[serde(default = "default_trigram_limit")]
    pub trigram_limit: usize,
    #[serde(default = "default_bigram_limit")]
    pub bigram_limit: usize,
    /// Noise threshold for n-grams and common dishes
    #[serde(default = "default_min_count")]
    pub min_count: usize,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            top_characters: default_top_characters(),
            uncovered_character_scan: default_uncovered_character_scan(),
            trigram_limit: default_trigram_limit(),
            bigram_limit: default_bigram_limit(),
            min_count: default_min_count(),
        }
    }
}

impl StatsConfig {
    pub fn new() -> Self {
        Self {
            top_characters: env_or("CARTE_TOP_CHARACTERS", default_top_characters()),
            min_count: env_or("CARTE_MIN_COUNT", default_min_count()),
            ..Self::default()
        }
    }
}
