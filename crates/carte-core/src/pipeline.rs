use carte_types::{MenuDocument, MenuItem, MenuSection};

use crate::language::{LanguageProcessor, processor_for};
use crate::segmenter::{Backfill, Scope, Segmenter};

/// Fragment identifier: every non-alphanumeric char becomes `-`
pub fn anchor_id(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect()
}

/// Per-document counts reported by [`DocumentAnnotator::annotate`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnnotationSummary {
    pub sections: usize,
    pub items: usize,
    pub matches: usize,
}

/// Writes annotations and enrichment back into menu documents
pub struct DocumentAnnotator<'s, 'p> {
    segmenter: Segmenter<'s>,
    processors: &'p [Box<dyn LanguageProcessor>],
}

impl<'s, 'p> DocumentAnnotator<'s, 'p> {
    pub fn new(segmenter: Segmenter<'s>, processors: &'p [Box<dyn LanguageProcessor>]) -> Self {
        Self {
            segmenter,
            processors,
        }
    }

    pub fn segmenter(&self) -> &Segmenter<'s> {
        &self.segmenter
    }

    /// Annotate every section and item of `document` in its primary language.
    ///
    /// Display languages are recorded for every menu. Returns `None` when the
    /// document has no menu or no registered processor handles its primary
    /// language; names and annotations are then left untouched.
    pub fn annotate(&self, document: &mut MenuDocument) -> Option<AnnotationSummary> {
        let document_id = document.id.clone();
        let menu = document.menu.as_mut()?;
        menu.fill_display_languages();
        let Some(lang) = menu.primary_language().map(str::to_string) else {
            tracing::warn!("{document_id}: menu declares no languages, skipping");
            return None;
        };
        let Some(processor) = processor_for(self.processors, &lang) else {
            tracing::debug!("{document_id}: no processor for '{lang}', skipping annotation");
            return None;
        };

        let mut summary = AnnotationSummary::default();
        for section in menu.sections_mut() {
            summary.matches += self.annotate_section(section, &lang, processor, &document_id);
            summary.sections += 1;

            for item in &mut section.items {
                if let Some(matches) = self.annotate_item(item, &lang, processor, &document_id) {
                    summary.matches += matches;
                    summary.items += 1;
                }
            }
        }

        tracing::info!(
            "Annotated {document_id}: {} sections, {} items, {} matches",
            summary.sections,
            summary.items,
            summary.matches
        );
        Some(summary)
    }

    fn annotate_section(
        &self,
        section: &mut MenuSection,
        lang: &str,
        processor: &dyn LanguageProcessor,
        document_id: &str,
    ) -> usize {
        let name = normalize_name(&mut section.names, lang, processor);

        let joined: Vec<&str> = section
            .names
            .values()
            .map(String::as_str)
            .filter(|n| !n.is_empty())
            .collect();
        if !joined.is_empty() {
            section.name_all_langs = Some(joined.join(" / "));
        }

        let Some(name) = name else {
            return 0;
        };
        section.anchor_id = Some(anchor_id(&name));

        let annotation = self
            .segmenter
            .annotate(&name, Scope::Terms, document_id, true, None);
        section.annotated_name = Some(annotation.markup);
        annotation.matches.len()
    }

    fn annotate_item(
        &self,
        item: &mut MenuItem,
        lang: &str,
        processor: &dyn LanguageProcessor,
        document_id: &str,
    ) -> Option<usize> {
        let name = normalize_name(&mut item.names, lang, processor)?;

        if let Some(dish) = self.segmenter.store().lookup_dish(&name) {
            item.enrichment.backfill_from(dish);
        }

        let annotation = self.segmenter.annotate(
            &name,
            Scope::All,
            document_id,
            false,
            Some(&mut item.enrichment),
        );
        item.annotated_name = Some(annotation.markup);
        Some(annotation.matches.len())
    }
}

/// Normalize the name for `lang` in place; `None` if missing or blank.
/// A blank name is written back empty so later passes skip it too.
fn normalize_name(
    names: &mut carte_types::Names,
    lang: &str,
    processor: &dyn LanguageProcessor,
) -> Option<String> {
    let slot = names.get_mut(lang)?;
    let normalized = processor.normalize(slot);
    if *slot != normalized {
        *slot = normalized.clone();
    }
    (!normalized.is_empty()).then_some(normalized)
}

#[cfg(test)]
mod tests {
    use carte_types::{Enrichment, Menu, MenuPage};

    use super::*;
    use crate::vocabulary::{VocabularyEntry, VocabularyStore};

    struct Trim;

    impl LanguageProcessor for Trim {
        fn language_code(&self) -> &str {
            "zh"
        }

        fn normalize(&self, text: &str) -> String {
            text.chars().filter(|c| !c.is_whitespace()).collect()
        }
    }

    fn store() -> VocabularyStore {
        VocabularyStore::build(vec![
            VocabularyEntry::new("Beef Noodle Soup")
                .with_spelling("zh-Hant", "牛肉麵")
                .with_category_tag("zh-TW")
                .with_reference_url("https://en.wikipedia.org/wiki/Beef_noodle_soup")
                .with_image_url("https://example.org/beef-noodle.jpg"),
            VocabularyEntry::new("beef").with_spelling("zh-Hant", "牛肉"),
            VocabularyEntry::new("noodles").with_spelling("zh-Hant", "麵"),
            VocabularyEntry::new("noodles with soup")
                .with_spelling("zh-Hant", "湯麵")
                .with_description("Noodles served in broth"),
        ])
        .unwrap()
    }

    fn item(name: &str) -> MenuItem {
        let mut item = MenuItem::default();
        item.names.insert("zh-Hant".to_string(), name.to_string());
        item.names.insert("en".to_string(), String::new());
        item
    }

    fn document(lang: &str) -> MenuDocument {
        let mut section = MenuSection::default();
        section.names.insert(lang.to_string(), "牛肉 湯麵".to_string());
        section.names.insert("en".to_string(), "Beef noodles".to_string());
        section.items = vec![item("牛肉麵"), item("紅燒 牛肉湯麵")];
        if lang != "zh-Hant" {
            for item in &mut section.items {
                let name = item.names.shift_remove("zh-Hant").unwrap_or_default();
                item.names.insert(lang.to_string(), name);
            }
        }

        MenuDocument {
            id: "taipei/noodles.html".to_string(),
            author: None,
            menu: Some(Menu {
                language_codes: vec![lang.to_string(), "en".to_string()],
                pages: vec![MenuPage {
                    sections: vec![section],
                    ..Default::default()
                }],
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_blank_item_name_is_cleared() {
        let store = store();
        let processors: Vec<Box<dyn LanguageProcessor>> = vec![Box::new(Trim)];
        let annotator = DocumentAnnotator::new(Segmenter::new(&store), &processors);

        let mut doc = document("zh-Hant");
        doc.menu.as_mut().unwrap().pages[0].sections[0].items = vec![item("\u{3000}"), item("牛肉麵")];
        let summary = annotator.annotate(&mut doc).unwrap();
        assert_eq!(summary.items, 1);

        let blank = &doc.menu.as_ref().unwrap().pages[0].sections[0].items[0];
        assert_eq!(blank.names["zh-Hant"], "");
        assert!(blank.annotated_name.is_none());
        assert_eq!(doc.primary_item_names(), vec!["牛肉麵"]);
    }

    #[test]
    fn test_display_languages_recorded_for_every_menu() {
        let store = store();
        let processors: Vec<Box<dyn LanguageProcessor>> = vec![Box::new(Trim)];
        let annotator = DocumentAnnotator::new(Segmenter::new(&store), &processors);

        let mut handled = document("zh-Hant");
        handled.menu.as_mut().unwrap().language_codes = vec!["zh-Hant".to_string()];
        annotator.annotate(&mut handled);
        assert_eq!(handled.menu.as_ref().unwrap().display_languages, vec!["zh-Hant", "en"]);

        let mut skipped = document("ja");
        annotator.annotate(&mut skipped);
        assert_eq!(skipped.menu.as_ref().unwrap().display_languages, vec!["ja", "en"]);
    }

    #[test]
    fn test_anchor_id() {
        assert_eq!(anchor_id("Beef & Noodles"), "Beef---Noodles");
        assert_eq!(anchor_id("湯麵(大)"), "湯麵-大-");
    }

    #[test]
    fn test_annotate_document() {
        let store = store();
        let processors: Vec<Box<dyn LanguageProcessor>> = vec![Box::new(Trim)];
        let annotator = DocumentAnnotator::new(Segmenter::new(&store), &processors);

        let mut doc = document("zh-Hant");
        let summary = annotator.annotate(&mut doc).unwrap();
        assert_eq!(
            summary,
            AnnotationSummary {
                sections: 1,
                items: 2,
                matches: 5,
            }
        );

        let section = &doc.menu.as_ref().unwrap().pages[0].sections[0];
        assert_eq!(section.names["zh-Hant"], "牛肉湯麵");
        assert_eq!(section.anchor_id.as_deref(), Some("牛肉湯麵"));
        assert_eq!(section.name_all_langs.as_deref(), Some("牛肉湯麵 / Beef noodles"));
        let header = section.annotated_name.as_deref().unwrap();
        assert!(header.contains("Beef"));
        assert!(header.contains("Noodles with Soup"));

        let whole = &section.items[0];
        assert_eq!(
            whole.enrichment.reference_url.as_deref(),
            Some("https://en.wikipedia.org/wiki/Beef_noodle_soup")
        );
        assert!(whole.annotated_name.as_deref().unwrap().contains("Beef Noodle Soup"));

        let braised = &section.items[1];
        assert_eq!(braised.names["zh-Hant"], "紅燒牛肉湯麵");
        assert_eq!(braised.enrichment, Enrichment {
            description_en: Some("Noodles served in broth".to_string()),
            ..Default::default()
        });
        let markup = braised.annotated_name.as_deref().unwrap();
        assert!(markup.contains("noodles with soup"));
        assert!(markup.starts_with(r#"<span class="dish-term-native">紅</span>"#));
    }

    #[test]
    fn test_section_header_never_matches_dish() {
        let store = store();
        let processors: Vec<Box<dyn LanguageProcessor>> = vec![Box::new(Trim)];
        let annotator = DocumentAnnotator::new(Segmenter::new(&store), &processors);

        let mut doc = document("zh-Hant");
        doc.menu.as_mut().unwrap().pages[0].sections[0]
            .names
            .insert("zh-Hant".to_string(), "牛肉麵".to_string());
        annotator.annotate(&mut doc);

        let section = &doc.menu.as_ref().unwrap().pages[0].sections[0];
        assert!(!section.annotated_name.as_deref().unwrap().contains("Beef Noodle Soup"));
    }

    #[test]
    fn test_references_are_recorded_per_document() {
        let store = store();
        let processors: Vec<Box<dyn LanguageProcessor>> = vec![Box::new(Trim)];
        let annotator = DocumentAnnotator::new(Segmenter::new(&store), &processors);

        let mut doc = document("zh-Hant");
        annotator.annotate(&mut doc);

        assert_eq!(
            store.lookup_dish("牛肉麵").unwrap().referencing_documents(),
            vec!["taipei/noodles.html"]
        );
        assert_eq!(
            store.lookup("湯麵").unwrap().referencing_documents(),
            vec!["taipei/noodles.html"]
        );
    }

    #[test]
    fn test_unhandled_language_is_left_untouched() {
        let store = store();
        let processors: Vec<Box<dyn LanguageProcessor>> = vec![Box::new(Trim)];
        let annotator = DocumentAnnotator::new(Segmenter::new(&store), &processors);

        let mut doc = document("ja");
        assert!(annotator.annotate(&mut doc).is_none());

        let section = &doc.menu.as_ref().unwrap().pages[0].sections[0];
        assert!(section.annotated_name.is_none());
        assert!(section.items.iter().all(|i| i.annotated_name.is_none()));
        assert!(store.lookup("牛肉").unwrap().referencing_documents().is_empty());
    }

    #[test]
    fn test_document_without_menu() {
        let store = store();
        let processors: Vec<Box<dyn LanguageProcessor>> = vec![Box::new(Trim)];
        let annotator = DocumentAnnotator::new(Segmenter::new(&store), &processors);

        let mut doc = MenuDocument::default();
        assert!(annotator.annotate(&mut doc).is_none());
    }
}
