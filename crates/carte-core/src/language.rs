/// Script-specific handling for a family of language tags
pub trait LanguageProcessor: Send + Sync {
    /// Primary language subtag ("zh", "ja", ...)
    fn language_code(&self) -> &str;

    /// Whether names in `tag` should be segmented by this processor.
    /// Default: the tag's primary subtag equals `language_code`.
    fn handles(&self, tag: &str) -> bool {
        tag.split('-')
            .next()
            .is_some_and(|primary| primary.eq_ignore_ascii_case(self.language_code()))
    }

    /// Normalize a name before lookup and statistics
    fn normalize(&self, text: &str) -> String;
}

/// Find the first processor handling `tag`
pub fn processor_for<'p>(
    processors: &'p [Box<dyn LanguageProcessor>],
    tag: &str,
) -> Option<&'p dyn LanguageProcessor> {
    processors.iter().map(|p| p.as_ref()).find(|p| p.handles(tag))
}
