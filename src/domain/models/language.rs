#[cfg(test)]
#[path = "language_test.rs"]
mod tests;

use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

/// Target languages the generation service accepts. Free text is never sent.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Spanish,
    French,
    German,
    Italian,
}

impl Language {
    pub fn parse(text: &str) -> Option<Language> {
        return Language::iter().find(|e| return e.to_string() == text);
    }

    /// Cycles through the languages in declaration order, wrapping at the end.
    pub fn next(self) -> Language {
        let languages = Language::iter().collect::<Vec<Language>>();
        let idx = languages
            .iter()
            .position(|e| return *e == self)
            .unwrap_or_default();

        return languages[(idx + 1) % languages.len()];
    }
}
