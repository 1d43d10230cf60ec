pub mod catalog;
pub mod error;
pub mod language;
pub mod ngram;
pub mod pipeline;
pub mod segmenter;
pub mod stats;
pub mod vocabulary;

pub use catalog::{CatalogEntry, CatalogGroup, DishCatalog};
pub use error::VocabularyError;
pub use language::{LanguageProcessor, processor_for};
pub use ngram::{extract_ngrams, rank_by_count, top_ngrams};
pub use pipeline::{AnnotationSummary, DocumentAnnotator};
pub use segmenter::{Annotation, AnnotationUnit, Backfill, Scope, Segment, Segmenter};
pub use stats::{Gloss, QualityIssue, RankedTerm, StatsReport, gather_stats};
pub use vocabulary::{MatchType, VocabularyEntry, VocabularyIssue, VocabularyStore};

/// Shown in place of a gloss when no vocabulary entry covers a term
pub const UNKNOWN_GLOSS_PLACEHOLDER: &str = "🟨";
