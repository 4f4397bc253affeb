//! Language name to ISO 639-1 code resolution.
//!
//! The pipeline accepts human-readable language names from the front end and
//! maps them to the short codes understood by the translation and synthesis
//! capabilities. The mapping is closed: an unrecognized name resolves to the
//! default language instead of failing.

use crate::defaults;

/// Closed mapping from human-readable language names to ISO 639-1 codes.
pub const LANGUAGES: &[(&str, &str)] = &[
    ("English", "en"),
    ("Spanish", "es"),
    ("French", "fr"),
    ("German", "de"),
    ("Russian", "ru"),
    ("Chinese", "zh"),
    ("Japanese", "ja"),
    ("Arabic", "ar"),
    ("Portuguese", "pt"),
    ("Italian", "it"),
    ("Korean", "ko"),
    ("Dutch", "nl"),
];

/// Resolve a human-readable language name to its ISO 639-1 code.
///
/// Unrecognized names resolve to the default language ("en") — an explicit
/// leniency policy rather than an error.
pub fn resolve_language_code(name: &str) -> &'static str {
    LANGUAGES
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, code)| *code)
        .unwrap_or(defaults::DEFAULT_LANGUAGE)
}

/// All language names accepted by [`resolve_language_code`], for front ends
/// that present a fixed choice list.
pub fn language_names() -> impl Iterator<Item = &'static str> {
    LANGUAGES.iter().map(|(name, _)| *name)
}
