use carte_types::Enrichment;
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::vocabulary::{VocabularyEntry, VocabularyStore};

/// Which vocabulary keys take part in matching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Plain terms only; used for section headers so a header is never
    /// tagged as a whole dish
    Terms,
    /// Every term including dishes; used for item names
    All,
}

/// One step of the greedy decomposition
#[derive(Debug, Clone)]
pub enum Segment<'s> {
    Term {
        native: String,
        entry: &'s VocabularyEntry,
    },
    Unmatched(char),
}

/// Rendered unit of an annotated name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnnotationUnit {
    Term {
        native: String,
        gloss: String,
        reference_url: Option<String>,
    },
    Plain(char),
}

impl AnnotationUnit {
    pub fn write_markup(&self, out: &mut String) {
        match self {
            AnnotationUnit::Term {
                native,
                gloss,
                reference_url,
            } => {
                out.push_str(r#"<span class="dish-term-native">"#);
                out.push_str(&encode_text(native));
                out.push_str(r#"<span class="dish-term-translated">"#);
                match reference_url {
                    Some(url) => {
                        out.push_str(r#"<a href=""#);
                        out.push_str(&encode_double_quoted_attribute(url));
                        out.push_str(r#"" target="wikipedia" rel="noopener">"#);
                        out.push_str(&encode_text(gloss));
                        out.push_str("</a>");
                    }
                    None => out.push_str(&encode_text(gloss)),
                }
                out.push_str("</span></span>");
            }
            AnnotationUnit::Plain(c) => {
                let mut buf = [0u8; 4];
                out.push_str(r#"<span class="dish-term-native">"#);
                out.push_str(&encode_text(c.encode_utf8(&mut buf)));
                out.push_str("</span>");
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Annotation<'s> {
    pub markup: String,
    pub units: Vec<AnnotationUnit>,
    /// Matched entries in left-to-right order, repeats included
    pub matches: Vec<&'s VocabularyEntry>,
}

/// Fill absent optional fields from a vocabulary entry
pub trait Backfill {
    /// Returns true if any field was filled
    fn backfill_from(&mut self, entry: &VocabularyEntry) -> bool;
}

impl Backfill for Enrichment {
    fn backfill_from(&mut self, entry: &VocabularyEntry) -> bool {
        let mut changed = false;
        for (slot, value) in [
            (&mut self.reference_url, entry.reference_url()),
            (&mut self.image_url, entry.image_url()),
            (&mut self.description_en, entry.description()),
        ] {
            if slot.is_none() {
                if let Some(value) = value {
                    *slot = Some(value.to_string());
                    changed = true;
                }
            }
        }
        changed
    }
}

/// Greedy left-to-right decomposition of `text`.
///
/// `keys` must be ordered longest first so the first hit is the longest
/// match. Keys missing from `store` never match. Unmatched input advances
/// one `char` at a time; grapheme clusters are not kept together.
pub fn segment<'s>(text: &str, keys: &[&str], store: &'s VocabularyStore) -> Vec<Segment<'s>> {
    let mut segments = Vec::new();
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        let hit = keys.iter().find_map(|key| {
            if !key.is_empty() && rest.starts_with(key) {
                store.lookup(key).map(|entry| (*key, entry))
            } else {
                None
            }
        });

        match hit {
            Some((key, entry)) => {
                segments.push(Segment::Term {
                    native: key.to_string(),
                    entry,
                });
                rest = &rest[key.len()..];
            }
            None => {
                segments.push(Segment::Unmatched(c));
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    segments
}

/// Segmenter over a vocabulary store with both key scopes pre-sorted
pub struct Segmenter<'s> {
    store: &'s VocabularyStore,
    term_keys: Vec<&'s str>,
    all_keys: Vec<&'s str>,
}

impl<'s> Segmenter<'s> {
    pub fn new(store: &'s VocabularyStore) -> Self {
        Self {
            store,
            term_keys: store.spellings_longest_first(false),
            all_keys: store.spellings_longest_first(true),
        }
    }

    pub fn store(&self) -> &'s VocabularyStore {
        self.store
    }

    pub fn keys(&self, scope: Scope) -> &[&'s str] {
        match scope {
            Scope::Terms => &self.term_keys,
            Scope::All => &self.all_keys,
        }
    }

    /// Decompose without recording document references
    pub fn segment(&self, text: &str, scope: Scope) -> Vec<Segment<'s>> {
        segment(text, self.keys(scope), self.store)
    }

    /// Decompose `text`, render markup, register `document_id` on every
    /// matched entry and backfill `target` from matches.
    ///
    /// With `title_case_gloss` glosses are rendered in title case.
    pub fn annotate(
        &self,
        text: &str,
        scope: Scope,
        document_id: &str,
        title_case_gloss: bool,
        mut target: Option<&mut Enrichment>,
    ) -> Annotation<'s> {
        let mut annotation = Annotation::default();

        for seg in self.segment(text, scope) {
            let unit = match seg {
                Segment::Term { native, entry } => {
                    entry.register_document(document_id);
                    if let Some(target) = target.as_mut() {
                        target.backfill_from(entry);
                    }
                    annotation.matches.push(entry);

                    let gloss = if title_case_gloss {
                        entry.title_cased_gloss()
                    } else {
                        entry.gloss().to_string()
                    };
                    AnnotationUnit::Term {
                        native,
                        gloss,
                        reference_url: entry.reference_url().map(str::to_string),
                    }
                }
                Segment::Unmatched(c) => AnnotationUnit::Plain(c),
            };
            unit.write_markup(&mut annotation.markup);
            annotation.units.push(unit);
        }

        tracing::debug!(
            "Annotated '{}' into {} units, {} matches",
            text,
            annotation.units.len(),
            annotation.matches.len()
        );
        annotation
    }
}
