#[derive(Debug, thiserror::Error)]
pub enum VocabularyError {
    #[error("Vocabulary dataset is empty")]
    Empty,

    #[error("Vocabulary entry {index} (\"{gloss}\") has no usable native spelling")]
    NoUsableSpelling { index: usize, gloss: String },
}
