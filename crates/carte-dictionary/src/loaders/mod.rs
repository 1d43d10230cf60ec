use unicode_normalization::UnicodeNormalization;

pub mod cross_reference;
pub mod vocabulary;

/// NFC-normalize and trim a table cell
pub(crate) fn clean_cell(cell: &str) -> String {
    let normalized: String = cell.nfc().collect();
    normalized.trim().to_string()
}

pub(crate) fn tsv_reader<R: std::io::Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .flexible(true)
        .from_reader(reader)
}
