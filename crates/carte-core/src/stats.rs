use std::collections::HashSet;
use std::fmt;

use carte_config::stats::StatsConfig;
use carte_types::MenuDocument;
use indexmap::IndexSet;
use serde::Serialize;

use crate::UNKNOWN_GLOSS_PLACEHOLDER;
use crate::ngram::{rank_by_count, top_ngrams};
use crate::segmenter::{Scope, Segment, Segmenter};
use crate::vocabulary::{MatchType, VocabularyStore};

/// English gloss attached to a ranked term
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Gloss {
    /// The term itself is a vocabulary spelling
    Exact(String),
    /// Borrowed from the entry with the shortest gloss whose spelling
    /// contains the term
    Approximate(String),
    /// Glosses of the term's greedy decomposition; `None` for unmatched chars
    Composite(Vec<Option<String>>),
    Unknown,
}

impl fmt::Display for Gloss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gloss::Exact(gloss) => f.write_str(gloss),
            Gloss::Approximate(gloss) => write!(f, "~{gloss}"),
            Gloss::Composite(parts) => {
                let parts: Vec<String> = parts
                    .iter()
                    .map(|part| match part {
                        Some(gloss) => format!("\"{gloss}\""),
                        None => UNKNOWN_GLOSS_PLACEHOLDER.to_string(),
                    })
                    .collect();
                f.write_str(&parts.join(" + "))
            }
            Gloss::Unknown => f.write_str(UNKNOWN_GLOSS_PLACEHOLDER),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedTerm {
    pub term: String,
    pub count: usize,
    pub gloss: Gloss,
    /// `gloss` rendered for display
    pub label: String,
}

impl RankedTerm {
    fn new(term: impl Into<String>, count: usize, gloss: Gloss) -> Self {
        let label = gloss.to_string();
        Self {
            term: term.into(),
            count,
            gloss,
            label,
        }
    }
}

/// Non-fatal finding from corpus statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QualityIssue {
    /// Frequent characters that occur in no vocabulary spelling
    UncoveredCharacters { characters: Vec<char> },
    /// A frequent item name with no dish entry
    FrequentNameMissing { name: String, count: usize },
    /// A name listed in the external cross-reference but with no dish entry
    CrossReferencedNameMissing { name: String, count: usize },
}

impl fmt::Display for QualityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityIssue::UncoveredCharacters { characters } => {
                let chars: String = characters.iter().collect();
                write!(f, "Top characters not present in vocabulary: {chars}")
            }
            QualityIssue::FrequentNameMissing { name, count } => {
                write!(f, "{name} (count {count}) is not in known dishes")
            }
            QualityIssue::CrossReferencedNameMissing { name, count } => write!(
                f,
                "{name} (count {count}) is not in known dishes but is in the cross-reference list"
            ),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct StatsReport {
    pub document_count: usize,
    pub unique_item_count: usize,
    pub unique_character_count: usize,
    pub top_characters: Vec<RankedTerm>,
    pub top_bigrams: Vec<RankedTerm>,
    pub top_trigrams: Vec<RankedTerm>,
    pub common_dishes: Vec<RankedTerm>,
    pub issues: Vec<QualityIssue>,
}

/// Primary item names, deduplicated within each document and concatenated
/// across documents, plus the number of documents seen
fn collect_primary_names<'d>(documents: impl IntoIterator<Item = &'d MenuDocument>) -> (Vec<&'d str>, usize) {
    let mut names = Vec::new();
    let mut count = 0;
    for document in documents {
        let per_document: IndexSet<&str> = document.primary_item_names().into_iter().collect();
        names.extend(per_document);
        count += 1;
    }
    (names, count)
}

fn character_gloss(store: &VocabularyStore, c: char) -> Gloss {
    let mut buf = [0u8; 4];
    let key: &str = c.encode_utf8(&mut buf);
    if let Some(entry) = store.lookup(key) {
        Gloss::Exact(entry.gloss().to_string())
    } else if let Some(entry) = store.find_containing(key, MatchType::Contains) {
        Gloss::Approximate(entry.gloss().to_string())
    } else {
        Gloss::Unknown
    }
}

fn ngram_gloss(segmenter: &Segmenter<'_>, ngram: &str) -> Gloss {
    if let Some(entry) = segmenter.store().lookup(ngram) {
        return Gloss::Exact(entry.gloss().to_string());
    }
    Gloss::Composite(
        segmenter
            .segment(ngram, Scope::All)
            .into_iter()
            .map(|seg| match seg {
                Segment::Term { entry, .. } => Some(entry.gloss().to_string()),
                Segment::Unmatched(_) => None,
            })
            .collect(),
    )
}

/// Corpus statistics over primary item names, cross-referenced against the
/// vocabulary. Never fails; anomalies are logged and returned as issues.
pub fn gather_stats<'d>(
    documents: impl IntoIterator<Item = &'d MenuDocument>,
    store: &VocabularyStore,
    config: &StatsConfig,
    cross_reference: Option<&HashSet<String>>,
) -> StatsReport {
    let segmenter = Segmenter::new(store);
    let mut issues = Vec::new();

    let (names, document_count) = collect_primary_names(documents);
    let unique_names: IndexSet<&str> = names.iter().copied().collect();

    // Characters
    let ranked_chars = rank_by_count(names.iter().flat_map(|n| n.chars()).filter(|c| c.is_alphabetic()));
    let covered = store.covered_characters();
    let uncovered: Vec<char> = ranked_chars
        .iter()
        .take(config.uncovered_character_scan)
        .map(|(c, _)| *c)
        .filter(|c| !covered.contains(c))
        .collect();
    if !uncovered.is_empty() {
        issues.push(QualityIssue::UncoveredCharacters {
            characters: uncovered,
        });
    }
    let top_characters = ranked_chars
        .iter()
        .take(config.top_characters)
        .map(|&(c, count)| RankedTerm::new(c.to_string(), count, character_gloss(store, c)))
        .collect();

    // Alphabetic runs of each unique name feed the n-grams
    let tokens: Vec<&str> = unique_names
        .iter()
        .flat_map(|name| name.split(|c: char| !c.is_alphabetic()))
        .filter(|token| !token.is_empty())
        .collect();

    let top_trigrams: Vec<RankedTerm> = top_ngrams(&tokens, 3, config.trigram_limit)
        .into_iter()
        .filter(|(_, count)| *count >= config.min_count)
        .map(|(ngram, count)| {
            let gloss = ngram_gloss(&segmenter, &ngram);
            RankedTerm::new(ngram, count, gloss)
        })
        .collect();

    // Bigrams inside a reported trigram are redundant
    let top_bigrams: Vec<RankedTerm> = top_ngrams(&tokens, 2, config.bigram_limit)
        .into_iter()
        .filter(|(_, count)| *count >= config.min_count)
        .filter(|(ngram, _)| !top_trigrams.iter().any(|t| t.term.contains(ngram.as_str())))
        .map(|(ngram, count)| {
            let gloss = ngram_gloss(&segmenter, &ngram);
            RankedTerm::new(ngram, count, gloss)
        })
        .collect();

    // Common dishes
    let name_counts = rank_by_count(names.iter().copied());
    let frequent: Vec<(&str, usize)> = name_counts
        .iter()
        .copied()
        .filter(|(_, count)| *count >= config.min_count)
        .collect();
    let common_dishes = frequent
        .iter()
        .map(|&(name, count)| {
            let gloss = match store.lookup_dish(name) {
                Some(entry) => Gloss::Exact(entry.gloss().to_string()),
                None => Gloss::Unknown,
            };
            RankedTerm::new(name, count, gloss)
        })
        .collect();

    for &(name, count) in &frequent {
        if store.lookup_dish(name).is_none() {
            issues.push(QualityIssue::FrequentNameMissing {
                name: name.to_string(),
                count,
            });
        }
    }

    if let Some(cross_reference) = cross_reference {
        for &(name, count) in &name_counts {
            if store.lookup_dish(name).is_none() && cross_reference.contains(name) {
                issues.push(QualityIssue::CrossReferencedNameMissing {
                    name: name.to_string(),
                    count,
                });
            }
        }
    }

    for issue in &issues {
        match issue {
            QualityIssue::CrossReferencedNameMissing { .. } => {
                tracing::warn!(priority = "high", "{issue}")
            }
            _ => tracing::warn!("{issue}"),
        }
    }

    let report = StatsReport {
        document_count,
        unique_item_count: unique_names.len(),
        unique_character_count: ranked_chars.len(),
        top_characters,
        top_bigrams,
        top_trigrams,
        common_dishes,
        issues,
    };

    tracing::info!(
        "Stats gathered: {} documents, {} unique items, {} unique characters, {} common dishes",
        report.document_count,
        report.unique_item_count,
        report.unique_character_count,
        report.common_dishes.len()
    );

    report
}
