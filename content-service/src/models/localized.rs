//! Multi-language content fields.
//!
//! The association publishes in English, French and Dutch. English is the
//! reference language and is always present; the others fall back to it.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Fr,
    Nl,
}

impl Locale {
    /// Tolerant parse for the public `?locale=` parameter: anything that is
    /// not a supported locale falls back to English.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "fr" => Locale::Fr,
            "nl" => Locale::Nl,
            _ => Locale::En,
        }
    }
}

/// A text field with one required English value and optional translations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub en: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nl: Option<String>,
}

impl LocalizedText {
    pub fn new(en: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            fr: None,
            nl: None,
        }
    }

    /// Resolve the text for a locale, falling back to English when the
    /// requested translation is missing.
    pub fn resolve(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.en,
            Locale::Fr => self.fr.as_deref().unwrap_or(&self.en),
            Locale::Nl => self.nl.as_deref().unwrap_or(&self.en),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_falls_back_to_english() {
        let text = LocalizedText {
            en: "Events".to_string(),
            fr: Some("Événements".to_string()),
            nl: None,
        };
        assert_eq!(text.resolve(Locale::En), "Events");
        assert_eq!(text.resolve(Locale::Fr), "Événements");
        assert_eq!(text.resolve(Locale::Nl), "Events");
    }

    #[test]
    fn test_locale_parse_is_tolerant() {
        assert_eq!(Locale::parse("fr"), Locale::Fr);
        assert_eq!(Locale::parse(" NL "), Locale::Nl);
        assert_eq!(Locale::parse("de"), Locale::En);
        assert_eq!(Locale::parse(""), Locale::En);
    }
}
