//! Preferred-locale detection from the locale cookie and `Accept-Language`.

use crate::i18n::Locale;

/// Pick the best enabled locale from an `Accept-Language` header value.
///
/// Entries are ordered by descending quality (stable for ties). Each tag is
/// matched in full first (`en`), then by its primary subtag (`en-GB` -> `en`).
/// `q=0`, malformed weights and the `*` wildcard are ignored.
pub fn negotiate(accept_language: &str) -> Option<Locale> {
    let mut entries: Vec<(String, f32)> = accept_language
        .split(',')
        .filter_map(parse_entry)
        .collect();

    // sort_by is stable, so header order breaks ties
    entries.sort_by(|a, b| b.1.total_cmp(&a.1));

    entries.iter().find_map(|(tag, _)| match_tag(tag))
}

/// Resolve the visitor's preferred locale: cookie, then header, then default.
///
/// A cookie naming an unknown locale is ignored rather than rejected.
pub fn preferred_locale(cookie: Option<&str>, accept_language: Option<&str>) -> Locale {
    cookie
        .and_then(|code| Locale::from_code(code.trim()).ok())
        .or_else(|| accept_language.and_then(negotiate))
        .unwrap_or_else(Locale::default_locale)
}

fn parse_entry(raw: &str) -> Option<(String, f32)> {
    let mut parts = raw.split(';');
    let tag = parts.next()?.trim().to_ascii_lowercase();
    if tag.is_empty() || tag == "*" {
        return None;
    }

    let mut quality = 1.0_f32;
    for param in parts {
        let param = param.trim();
        if let Some(value) = param.strip_prefix("q=") {
            quality = value.trim().parse().ok()?;
        }
    }

    if !(quality > 0.0 && quality <= 1.0) {
        return None;
    }
    Some((tag, quality))
}

fn match_tag(tag: &str) -> Option<Locale> {
    if let Ok(locale) = Locale::from_code(tag) {
        return Some(locale);
    }
    let primary = tag.split(['-', '_']).next()?;
    Locale::from_code(primary).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== negotiate Tests ====================

    #[test]
    fn test_simple_tag() {
        assert_eq!(negotiate("en"), Some(Locale::ENGLISH));
        assert_eq!(negotiate("nl"), Some(Locale::DUTCH));
    }

    #[test]
    fn test_region_falls_back_to_primary() {
        assert_eq!(negotiate("en-GB"), Some(Locale::ENGLISH));
        assert_eq!(negotiate("nl-BE"), Some(Locale::DUTCH));
        assert_eq!(negotiate("EN-us"), Some(Locale::ENGLISH));
    }

    #[test]
    fn test_quality_ordering() {
        assert_eq!(negotiate("nl;q=0.5, en;q=0.9"), Some(Locale::ENGLISH));
        assert_eq!(negotiate("en;q=0.4,nl"), Some(Locale::DUTCH));
    }

    #[test]
    fn test_ties_keep_header_order() {
        assert_eq!(negotiate("en;q=0.8, nl;q=0.8"), Some(Locale::ENGLISH));
    }

    #[test]
    fn test_skips_unsupported_tags() {
        assert_eq!(negotiate("fr-FR, de;q=0.9, en;q=0.1"), Some(Locale::ENGLISH));
    }

    #[test]
    fn test_zero_quality_is_excluded() {
        assert_eq!(negotiate("en;q=0, nl;q=0.1"), Some(Locale::DUTCH));
        assert_eq!(negotiate("en;q=0"), None);
    }

    #[test]
    fn test_malformed_quality_is_excluded() {
        assert_eq!(negotiate("en;q=abc"), None);
        assert_eq!(negotiate("en;q=2"), None);
    }

    #[test]
    fn test_wildcard_and_empty() {
        assert_eq!(negotiate("*"), None);
        assert_eq!(negotiate(""), None);
        assert_eq!(negotiate(" , ,"), None);
    }

    // ==================== preferred_locale Tests ====================

    #[test]
    fn test_cookie_wins_over_header() {
        assert_eq!(preferred_locale(Some("en"), Some("nl")), Locale::ENGLISH);
    }

    #[test]
    fn test_invalid_cookie_falls_back_to_header() {
        assert_eq!(preferred_locale(Some("fr"), Some("en-US")), Locale::ENGLISH);
    }

    #[test]
    fn test_nothing_means_default() {
        assert_eq!(preferred_locale(None, None), Locale::default_locale());
        assert_eq!(preferred_locale(None, Some("ja")), Locale::default_locale());
    }
}
