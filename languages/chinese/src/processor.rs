use carte_core::LanguageProcessor;
use unicode_normalization::UnicodeNormalization;

/// Chinese language processor for `zh`, `zh-Hans`, `zh-Hant`, ...
#[derive(Debug, Default)]
pub struct ChineseProcessor;

impl ChineseProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageProcessor for ChineseProcessor {
    fn language_code(&self) -> &str {
        "zh"
    }

    /// NFC-normalize and drop all whitespace, including ideographic spaces
    fn normalize(&self, text: &str) -> String {
        text.nfc().filter(|c| !c.is_whitespace()).collect()
    }
}
