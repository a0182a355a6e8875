//! Mapping from human-readable language names to translation service codes.

use std::collections::HashMap;
use std::sync::LazyLock;

/// `(English name, localized name, code)` for every language offered to users.
const LANGUAGES: &[(&str, &str, &str)] = &[
    ("Spanish", "Español", "es"),
    ("French", "Francés", "fr"),
    ("German", "Alemán", "de"),
    ("Chinese (Simplified)", "Chino (Simplificado)", "zh"),
    ("Chinese (Traditional)", "Chino (Tradicional)", "zh-TW"),
    ("Arabic", "Árabe", "ar"),
    ("Japanese", "Japonés", "ja"),
    ("Portuguese", "Portugués", "pt"),
    ("Russian", "Ruso", "ru"),
    ("Korean", "Coreano", "ko"),
    ("Italian", "Italiano", "it"),
    ("Dutch", "Holandés", "nl"),
    ("Polish", "Polaco", "pl"),
    ("Turkish", "Turco", "tr"),
    ("Greek", "Griego", "el"),
    ("Hungarian", "Húngaro", "hu"),
    ("Swedish", "Sueco", "sv"),
    ("Finnish", "Finlandés", "fi"),
    ("Norwegian", "Noruego", "no"),
    ("Danish", "Danés", "da"),
    ("Czech", "Checo", "cs"),
    ("Romanian", "Rumano", "ro"),
    ("Vietnamese", "Vietnamita", "vi"),
    ("Thai", "Tailandés", "th"),
    ("Indonesian", "Indonesio", "id"),
    ("Filipino", "Filipino", "fil"),
    ("Malay", "Malayo", "ms"),
];

/// Lowercased name -> code, built once.
static NAME_TO_CODE: LazyLock<HashMap<String, &'static str>> = LazyLock::new(|| {
    LANGUAGES
        .iter()
        .flat_map(|&(english, localized, code)| {
            [(english.to_lowercase(), code), (localized.to_lowercase(), code)]
        })
        .collect()
});

/// Resolve a language name or code to the code sent to the service.
///
/// Known names match case-insensitively; anything else is lowercased and used
/// as-is, so `"ES"` becomes `"es"`.
pub fn resolve_language_code(language: &str) -> String {
    let key = language.trim().to_lowercase();
    match NAME_TO_CODE.get(&key) {
        Some(code) => (*code).to_string(),
        None => key,
    }
}

/// English names of the languages the lookup table knows about.
pub fn supported_languages() -> Vec<&'static str> {
    LANGUAGES.iter().map(|&(english, _, _)| english).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_names() {
        assert_eq!(resolve_language_code("Spanish"), "es");
        assert_eq!(resolve_language_code("Japanese"), "ja");
        assert_eq!(resolve_language_code("Chinese (Traditional)"), "zh-TW");
    }

    #[test]
    fn test_localized_names() {
        assert_eq!(resolve_language_code("Español"), "es");
        assert_eq!(resolve_language_code("Alemán"), "de");
        assert_eq!(resolve_language_code("Chino (Simplificado)"), "zh");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(resolve_language_code("spanish"), "es");
        assert_eq!(resolve_language_code("  FRENCH "), "fr");
        assert_eq!(resolve_language_code("ÁRABE"), "ar");
    }

    #[test]
    fn test_unknown_names_are_lowercased() {
        assert_eq!(resolve_language_code("es"), "es");
        assert_eq!(resolve_language_code("EN"), "en");
        assert_eq!(resolve_language_code("Klingon"), "klingon");
    }

    #[test]
    fn test_supported_languages() {
        let languages = supported_languages();
        assert!(languages.contains(&"Spanish"));
        assert!(languages.contains(&"Indonesian"));
        assert_eq!(languages.len(), LANGUAGES.len());
    }
}
