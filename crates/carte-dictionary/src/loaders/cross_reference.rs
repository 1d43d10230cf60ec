use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::{clean_cell, tsv_reader};
use crate::error::LoadError;

const NAME_COLUMN: &str = "name_native";
const ALT_NAMES_COLUMN: &str = "alt_names";

/// Loads an external list of dish names used to prioritise vocabulary gaps
pub struct CrossReferenceLoader;

impl CrossReferenceLoader {
    pub fn from_reader<R: Read>(reader: R) -> Result<HashSet<String>, LoadError> {
        let mut reader = tsv_reader(reader);
        let headers = reader.headers()?;
        let name_col = headers
            .iter()
            .position(|h| h.trim() == NAME_COLUMN)
            .ok_or_else(|| LoadError::MissingColumn(NAME_COLUMN.to_string()))?;
        let alt_col = headers.iter().position(|h| h.trim() == ALT_NAMES_COLUMN);

        let mut names = HashSet::new();
        for (idx, record) in reader.records().enumerate() {
            let record = record?;
            let name = record.get(name_col).map(clean_cell).unwrap_or_default();
            if name.is_empty() {
                return Err(LoadError::EmptyCell {
                    line: idx + 2,
                    column: NAME_COLUMN.to_string(),
                });
            }
            names.insert(name);

            if let Some(alts) = alt_col.and_then(|c| record.get(c)) {
                names.extend(
                    alts.split(',')
                        .map(clean_cell)
                        .filter(|alt| !alt.is_empty()),
                );
            }
        }

        Ok(names)
    }

    pub fn load_from_file(path: &Path) -> Result<HashSet<String>, LoadError> {
        tracing::info!("Loading cross-reference names from file: {}", path.display());
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let names = Self::from_reader(file)?;
        tracing::info!("Loaded {} cross-reference names", names.len());
        Ok(names)
    }
}
