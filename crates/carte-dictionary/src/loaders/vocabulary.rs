use std::fs::File;
use std::io::Read;
use std::path::Path;

use carte_core::{VocabularyEntry, VocabularyStore};
use csv::StringRecord;

use super::{clean_cell, tsv_reader};
use crate::error::LoadError;

const SPELLING_PREFIX: &str = "name_";
const GLOSS_COLUMN: &str = "name_en";
const REFERENCE_URL_COLUMN: &str = "wikipedia_url";
const IMAGE_URL_COLUMN: &str = "image_url";
const DESCRIPTION_COLUMN: &str = "description_en";
const CATEGORY_COLUMN: &str = "dish_cuisine_locale";

/// Column positions resolved from the header row
struct Layout {
    gloss: usize,
    spellings: Vec<(usize, String)>,
    reference_url: Option<usize>,
    image_url: Option<usize>,
    description: Option<usize>,
    category: Option<usize>,
    /// Every column not starting with `_`
    data: Vec<usize>,
}

impl Layout {
    fn from_headers(headers: &StringRecord) -> Result<Self, LoadError> {
        let position = |name: &str| headers.iter().position(|h| h.trim() == name);

        let gloss = position(GLOSS_COLUMN).ok_or_else(|| LoadError::MissingColumn(GLOSS_COLUMN.to_string()))?;
        let spellings: Vec<(usize, String)> = headers
            .iter()
            .enumerate()
            .filter_map(|(idx, h)| {
                let tag = h.trim().strip_prefix(SPELLING_PREFIX)?;
                (h.trim() != GLOSS_COLUMN && !tag.is_empty()).then(|| (idx, tag.to_string()))
            })
            .collect();
        if spellings.is_empty() {
            return Err(LoadError::MissingColumn(format!("{SPELLING_PREFIX}<script tag>")));
        }

        Ok(Self {
            gloss,
            spellings,
            reference_url: position(REFERENCE_URL_COLUMN),
            image_url: position(IMAGE_URL_COLUMN),
            description: position(DESCRIPTION_COLUMN),
            category: position(CATEGORY_COLUMN),
            data: headers
                .iter()
                .enumerate()
                .filter(|(_, h)| !h.trim().starts_with('_'))
                .map(|(idx, _)| idx)
                .collect(),
        })
    }
}

/// Loads the curated vocabulary table (tab-separated, header row)
pub struct VocabularyLoader;

impl VocabularyLoader {
    pub fn from_reader<R: Read>(reader: R) -> Result<VocabularyStore, LoadError> {
        let mut reader = tsv_reader(reader);
        let layout = Layout::from_headers(reader.headers()?)?;

        let mut entries = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let record = record?;
            let line = idx + 2;
            let cell = |col: Option<usize>| col.and_then(|c| record.get(c)).map(clean_cell).unwrap_or_default();

            if layout.data.iter().all(|&c| cell(Some(c)).is_empty()) {
                return Err(LoadError::EmptyRow { line });
            }

            let mut entry = VocabularyEntry::new(cell(Some(layout.gloss)));
            for (col, tag) in &layout.spellings {
                entry = entry.with_spelling(tag.as_str(), &cell(Some(*col)));
            }
            entry = entry
                .with_reference_url(cell(layout.reference_url))
                .with_image_url(cell(layout.image_url))
                .with_description(cell(layout.description))
                .with_category_tag(cell(layout.category));
            entries.push(entry);
        }

        Ok(VocabularyStore::build(entries)?)
    }

    pub fn load_from_file(path: &Path) -> Result<VocabularyStore, LoadError> {
        tracing::info!("Loading vocabulary from file: {}", path.display());
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_reader(file)?;
        tracing::info!(
            "Loaded {} vocabulary entries ({} dishes)",
            store.len(),
            store.dishes().count()
        );
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use carte_core::VocabularyError;

    use super::*;

    const TABLE: &str = "\
name_zh-Hans\tname_zh-Hant\tname_en\twikipedia_url\timage_url\tdescription_en\tdish_cuisine_locale\t_notes
牛肉面\t牛肉麵\tBeef Noodle Soup\thttps://zh.wikipedia.org/wiki/牛肉麵\thttps://example.org/beef.jpg\tBraised beef in broth\tzh-TW\tcheck
鸡\t雞\tchicken\t\t\t\t\t
\t湯麵, 湯面\tnoodles with soup\thttps://en.wikipedia.org/wiki/Noodle_soup\t\t\t\t
";

    #[test]
    fn test_load_table() {
        let store = VocabularyLoader::from_reader(TABLE.as_bytes()).unwrap();
        assert_eq!(store.len(), 3);

        let beef = store.lookup_dish("牛肉面").unwrap();
        assert_eq!(beef.gloss(), "Beef Noodle Soup");
        assert_eq!(beef.category_tag(), Some("zh-TW"));
        assert_eq!(beef.spellings_for("zh-Hant"), ["牛肉麵".to_string()]);
        assert_eq!(beef.image_url(), Some("https://example.org/beef.jpg"));
        assert_eq!(beef.description(), Some("Braised beef in broth"));
        assert!(
            beef.reference_url()
                .unwrap()
                .starts_with("https://translate.google.com/translate?")
        );

        let chicken = store.lookup("雞").unwrap();
        assert!(!chicken.is_dish());
        assert_eq!(chicken.reference_url(), None);

        assert_eq!(store.lookup("湯面").unwrap().gloss(), "noodles with soup");
        assert_eq!(
            store.lookup("湯麵").unwrap().reference_url(),
            Some("https://en.wikipedia.org/wiki/Noodle_soup")
        );
    }

    #[test]
    fn test_cells_are_nfc_normalized() {
        // "e" followed by a combining acute accent
        let table = "name_fr\tname_en\ncre\u{301}pe\tCrepe\n";
        let store = VocabularyLoader::from_reader(table.as_bytes()).unwrap();
        assert!(store.lookup("cr\u{e9}pe").is_some());
    }

    #[test]
    fn test_empty_row_is_rejected() {
        let table = "name_zh-Hant\tname_en\t_notes\n雞\tChicken\t\n\t\tonly a note\n";
        let err = VocabularyLoader::from_reader(table.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::EmptyRow { line: 3 }));
    }

    #[test]
    fn test_row_without_spelling_is_rejected() {
        let table = "name_zh-Hant\tname_en\n雞\tChicken\n\tOrphan\n";
        let err = VocabularyLoader::from_reader(table.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Vocabulary(VocabularyError::NoUsableSpelling { index: 1, .. })
        ));
    }

    #[test]
    fn test_missing_gloss_column() {
        let table = "name_zh-Hant\twikipedia_url\n雞\t\n";
        let err = VocabularyLoader::from_reader(table.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn(col) if col == "name_en"));
    }

    #[test]
    fn test_header_only_table_is_empty_vocabulary() {
        let table = "name_zh-Hant\tname_en\n";
        let err = VocabularyLoader::from_reader(table.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Vocabulary(VocabularyError::Empty)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TABLE.as_bytes()).unwrap();

        let store = VocabularyLoader::load_from_file(file.path()).unwrap();
        assert_eq!(store.dishes().count(), 1);
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = VocabularyLoader::load_from_file(&dir.path().join("absent.tsv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
