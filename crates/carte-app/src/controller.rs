use anyhow::Context;
use carte_config::Config;
use carte_core::{DishCatalog, DocumentAnnotator, LanguageProcessor, Segmenter, gather_stats};
use carte_dictionary::{CrossReferenceLoader, VocabularyLoader};
use carte_lang_chinese::ChineseProcessor;

use crate::io;

/// Counts reported at the end of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub documents: usize,
    pub annotated: usize,
    pub issues: usize,
    pub dishes: usize,
}

/// Processors for every supported menu language
pub fn language_processors() -> Vec<Box<dyn LanguageProcessor>> {
    vec![Box::new(ChineseProcessor::new())]
}

/// Load inputs, annotate every document, gather stats and write artifacts.
///
/// Vocabulary and cross-reference errors abort before any document is read.
pub fn run(config: &Config) -> anyhow::Result<RunSummary> {
    let store = VocabularyLoader::load_from_file(&config.vocabulary.path).with_context(|| {
        format!("Failed to load vocabulary {}", config.vocabulary.path.display())
    })?;

    let cross_reference = match &config.vocabulary.cross_reference_path {
        Some(path) => Some(
            CrossReferenceLoader::load_from_file(path)
                .with_context(|| format!("Failed to load cross-reference list {}", path.display()))?,
        ),
        None => None,
    };

    let mut documents = io::load_documents(&config.input_dir)?;

    let processors = language_processors();
    let annotator = DocumentAnnotator::new(Segmenter::new(&store), &processors);
    let mut annotated = 0;
    for document in &mut documents {
        if annotator.annotate(document).is_some() {
            annotated += 1;
        }
    }

    let report = gather_stats(&documents, &store, &config.stats, cross_reference.as_ref());
    let catalog = DishCatalog::build(&store);

    io::write_artifacts(
        &config.output.dir,
        config.output.pretty,
        &documents,
        &report,
        &catalog,
    )?;

    Ok(RunSummary {
        documents: documents.len(),
        annotated,
        issues: store.issues().len() + report.issues.len(),
        dishes: catalog.len(),
    })
}
