use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::sync::Mutex;

use indexmap::IndexMap;
use url::Url;

use crate::error::VocabularyError;

/// Words left untouched when checking or producing title case
const EN_STOPWORDS: [&str; 7] = ["a", "an", "and", "BBQ", "for", "in", "with"];

const TRANSLATE_PROXY_PREFIX: &str = "https://translate.google.com/translate?sl=auto&tl=en&u=";

/// How a substring is matched against indexed spellings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchType {
    Contains,
    Prefix,
    Suffix,
}

impl MatchType {
    fn matches(self, spelling: &str, substr: &str) -> bool {
        match self {
            MatchType::Contains => spelling.contains(substr),
            MatchType::Prefix => spelling.starts_with(substr),
            MatchType::Suffix => spelling.ends_with(substr),
        }
    }
}

/// Title-case every word except stopwords and words containing
/// non-alphabetic characters
pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            if word.is_empty()
                || EN_STOPWORDS.contains(&word)
                || !word.chars().all(char::is_alphabetic)
            {
                return word.to_string();
            }
            let mut chars = word.chars();
            let mut titled = String::with_capacity(word.len());
            if let Some(first) = chars.next() {
                titled.extend(first.to_uppercase());
            }
            for c in chars {
                titled.extend(c.to_lowercase());
            }
            titled
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Route non-English reference links through a translation proxy
fn rewrite_reference_url(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(parsed) => match parsed.host_str() {
            Some(host) if !host.starts_with("en.") => format!("{TRANSLATE_PROXY_PREFIX}{raw}"),
            _ => raw.to_string(),
        },
        Err(_) => raw.to_string(),
    }
}

fn non_empty(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_string())
    }
}

/// Curated dictionary row: native spellings mapped to an English gloss
#[derive(Debug)]
pub struct VocabularyEntry {
    native_spellings: IndexMap<String, Vec<String>>,
    gloss_en: String,
    reference_url: Option<String>,
    image_url: Option<String>,
    description_en: Option<String>,
    category_tag: Option<String>,
    referencing_document_ids: Mutex<BTreeSet<String>>,
}

impl VocabularyEntry {
    pub fn new(gloss_en: impl Into<String>) -> Self {
        Self {
            native_spellings: IndexMap::new(),
            gloss_en: gloss_en.into(),
            reference_url: None,
            image_url: None,
            description_en: None,
            category_tag: None,
            referencing_document_ids: Mutex::new(BTreeSet::new()),
        }
    }

    /// Add spellings for a script tag. `raw` may hold comma-joined variants;
    /// blanks are dropped.
    pub fn with_spelling(mut self, script_tag: impl Into<String>, raw: &str) -> Self {
        let variants = self.native_spellings.entry(script_tag.into()).or_default();
        variants.extend(
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        );
        self
    }

    pub fn with_reference_url(mut self, url: impl Into<String>) -> Self {
        self.reference_url = non_empty(url).map(|u| rewrite_reference_url(&u));
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = non_empty(url);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description_en = non_empty(description);
        self
    }

    /// Mark the entry as a dish; an empty tag leaves it a plain term
    pub fn with_category_tag(mut self, tag: impl Into<String>) -> Self {
        self.category_tag = non_empty(tag);
        self
    }

    pub fn gloss(&self) -> &str {
        &self.gloss_en
    }

    pub fn title_cased_gloss(&self) -> String {
        title_case(&self.gloss_en)
    }

    pub fn reference_url(&self) -> Option<&str> {
        self.reference_url.as_deref()
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description_en.as_deref()
    }

    pub fn category_tag(&self) -> Option<&str> {
        self.category_tag.as_deref()
    }

    pub fn is_dish(&self) -> bool {
        self.category_tag.is_some()
    }

    pub fn script_tags(&self) -> impl Iterator<Item = &str> {
        self.native_spellings.keys().map(String::as_str)
    }

    pub fn spellings_for(&self, script_tag: &str) -> &[String] {
        self.native_spellings
            .get(script_tag)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every spelling variant across all scripts, in declared order
    pub fn spellings(&self) -> impl Iterator<Item = &str> {
        self.native_spellings
            .values()
            .flat_map(|variants| variants.iter().map(String::as_str))
    }

    pub fn primary_spelling(&self) -> Option<&str> {
        self.spellings().next()
    }

    /// Record that a document references this entry. Returns false if it
    /// was already recorded.
    pub fn register_document(&self, document_id: &str) -> bool {
        let mut ids = self
            .referencing_document_ids
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if ids.contains(document_id) {
            return false;
        }
        ids.insert(document_id.to_string())
    }

    /// Sorted ids of documents that matched this entry
    pub fn referencing_documents(&self) -> Vec<String> {
        self.referencing_document_ids
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .cloned()
            .collect()
    }
}

/// Non-fatal data-quality finding raised while building the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VocabularyIssue {
    DuplicateSpelling { script_tag: String, spelling: String },
    GlossNotTitleCased { gloss: String, expected: String },
}

impl fmt::Display for VocabularyIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VocabularyIssue::DuplicateSpelling {
                script_tag,
                spelling,
            } => write!(f, "duplicate {script_tag} key \"{spelling}\" in vocabulary"),
            VocabularyIssue::GlossNotTitleCased { gloss, expected } => write!(
                f,
                "\"{gloss}\" is tagged as a dish but is not title cased (expected \"{expected}\")"
            ),
        }
    }
}

/// Reference dictionary with spelling indices.
///
/// Duplicate spellings resolve first-wins: the earliest entry keeps the key.
#[derive(Debug)]
pub struct VocabularyStore {
    entries: Vec<VocabularyEntry>,
    term_index: HashMap<String, usize>,
    dish_index: HashMap<String, usize>,
    issues: Vec<VocabularyIssue>,
}

impl VocabularyStore {
    pub fn build(entries: Vec<VocabularyEntry>) -> Result<Self, VocabularyError> {
        if entries.is_empty() {
            return Err(VocabularyError::Empty);
        }
        if let Some((index, entry)) = entries
            .iter()
            .enumerate()
            .find(|(_, e)| e.spellings().next().is_none())
        {
            return Err(VocabularyError::NoUsableSpelling {
                index,
                gloss: entry.gloss().to_string(),
            });
        }

        let issues = Self::lint(&entries);

        let mut term_index = HashMap::new();
        let mut dish_index = HashMap::new();
        for (idx, entry) in entries.iter().enumerate() {
            for spelling in entry.spellings() {
                term_index.entry(spelling.to_string()).or_insert(idx);
                if entry.is_dish() {
                    dish_index.entry(spelling.to_string()).or_insert(idx);
                }
            }
        }

        tracing::info!(
            "Vocabulary built: {} entries, {} spellings, {} dish spellings",
            entries.len(),
            term_index.len(),
            dish_index.len()
        );

        Ok(Self {
            entries,
            term_index,
            dish_index,
            issues,
        })
    }

    fn lint(entries: &[VocabularyEntry]) -> Vec<VocabularyIssue> {
        let mut issues = Vec::new();

        let mut seen: HashMap<&str, HashSet<&str>> = HashMap::new();
        for entry in entries {
            for tag in entry.script_tags() {
                let names = seen.entry(tag).or_default();
                for spelling in entry.spellings_for(tag) {
                    if !names.insert(spelling.as_str()) {
                        issues.push(VocabularyIssue::DuplicateSpelling {
                            script_tag: tag.to_string(),
                            spelling: spelling.clone(),
                        });
                    }
                }
            }
        }

        for entry in entries.iter().filter(|e| e.is_dish()) {
            let expected = entry.title_cased_gloss();
            if expected != entry.gloss() {
                issues.push(VocabularyIssue::GlossNotTitleCased {
                    gloss: entry.gloss().to_string(),
                    expected,
                });
            }
        }

        for issue in &issues {
            tracing::warn!("{issue}");
        }
        issues
    }

    /// Exact, case-sensitive spelling lookup over all entries
    pub fn lookup(&self, spelling: &str) -> Option<&VocabularyEntry> {
        self.term_index.get(spelling).map(|&idx| &self.entries[idx])
    }

    /// Exact spelling lookup restricted to dish entries
    pub fn lookup_dish(&self, spelling: &str) -> Option<&VocabularyEntry> {
        self.dish_index.get(spelling).map(|&idx| &self.entries[idx])
    }

    /// Best-effort lookup: among spellings matching `substr`, pick the entry
    /// with the shortest gloss, ties broken by spelling order.
    pub fn find_containing(&self, substr: &str, match_type: MatchType) -> Option<&VocabularyEntry> {
        self.term_index
            .iter()
            .filter(|(spelling, _)| match_type.matches(spelling, substr))
            .map(|(spelling, &idx)| (self.entries[idx].gloss().chars().count(), spelling.as_str(), idx))
            .min()
            .map(|(_, _, idx)| &self.entries[idx])
    }

    /// Indexed spellings sorted longest first (ties by spelling), optionally
    /// leaving out spellings that resolve to dish entries
    pub fn spellings_longest_first(&self, include_dishes: bool) -> Vec<&str> {
        let mut keys: Vec<&str> = self
            .term_index
            .iter()
            .filter(|(_, idx)| include_dishes || !self.entries[**idx].is_dish())
            .map(|(spelling, _)| spelling.as_str())
            .collect();
        keys.sort_by_key(|k| (Reverse(k.chars().count()), *k));
        keys
    }

    /// Every character that occurs in at least one indexed spelling
    pub fn covered_characters(&self) -> HashSet<char> {
        self.term_index.keys().flat_map(|k| k.chars()).collect()
    }

    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    pub fn dishes(&self) -> impl Iterator<Item = &VocabularyEntry> {
        self.entries.iter().filter(|e| e.is_dish())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn issues(&self) -> &[VocabularyIssue] {
        &self.issues
    }
}
