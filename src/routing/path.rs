//! Path normalization and locale-prefix detection.

use crate::i18n::{Locale, LocaleRegistry};

/// A site path with any locale prefix removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrippedPath {
    /// Always starts with `/`
    pub bare_path: String,

    /// The prefixed locale, or `None` for unprefixed (default-locale) paths
    pub locale: Option<Locale>,
}

impl StrippedPath {
    /// The locale the path is served in; unprefixed means default.
    pub fn effective_locale(&self) -> Locale {
        self.locale.unwrap_or_else(Locale::default_locale)
    }
}

/// Normalize a site-relative path so it starts with exactly one `/`.
///
/// Empty input becomes `/`. Trailing slashes are left alone.
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_start_matches('/');
    let mut out = String::with_capacity(trimmed.len() + 1);
    out.push('/');
    out.push_str(trimmed);
    out
}

/// Remove a leading non-default locale prefix from `path`.
///
/// `/en` and `/en/...` match; `/english` does not. Repeated prefixes
/// (`/en/en/about`) are all removed so that stripping is idempotent; the
/// first one is the detected locale.
pub fn strip_locale_prefix(path: &str) -> StrippedPath {
    let mut bare = normalize_path(path);
    let mut detected = None;

    while let Some((locale, rest)) = match_prefix(&bare) {
        detected.get_or_insert(locale);
        bare = rest;
    }

    StrippedPath {
        bare_path: bare,
        locale: detected,
    }
}

/// If `path` carries the default locale's prefix (which it never should),
/// return the unprefixed equivalent.
pub fn default_locale_remainder(path: &str) -> Option<String> {
    let path = normalize_path(path);
    let code = LocaleRegistry::get().default_locale().code;
    prefix_remainder(&path, code)
}

fn match_prefix(path: &str) -> Option<(Locale, String)> {
    LocaleRegistry::get()
        .list_prefixed()
        .into_iter()
        .find_map(|config| {
            let rest = prefix_remainder(path, config.code)?;
            let locale = Locale::from_code(config.code).ok()?;
            Some((locale, rest))
        })
}

/// `/{code}` -> `/`, `/{code}/rest` -> `/rest`, anything else -> `None`.
fn prefix_remainder(path: &str, code: &str) -> Option<String> {
    let after = path.strip_prefix('/')?.strip_prefix(code)?;
    if after.is_empty() {
        Some("/".to_string())
    } else if after.starts_with('/') {
        Some(after.to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== normalize_path Tests ====================

    #[test]
    fn test_normalize_empty_is_root() {
        assert_eq!(normalize_path(""), "/");
    }

    #[test]
    fn test_normalize_adds_leading_slash() {
        assert_eq!(normalize_path("about"), "/about");
        assert_eq!(normalize_path("/about"), "/about");
    }

    #[test]
    fn test_normalize_collapses_leading_slashes() {
        assert_eq!(normalize_path("//about"), "/about");
    }

    #[test]
    fn test_normalize_keeps_trailing_slash() {
        assert_eq!(normalize_path("/blog/"), "/blog/");
    }

    // ==================== strip_locale_prefix Tests ====================

    #[test]
    fn test_strip_prefixed_path() {
        let stripped = strip_locale_prefix("/en/about");
        assert_eq!(stripped.bare_path, "/about");
        assert_eq!(stripped.locale, Some(Locale::ENGLISH));
    }

    #[test]
    fn test_strip_bare_locale_root() {
        let stripped = strip_locale_prefix("/en");
        assert_eq!(stripped.bare_path, "/");
        assert_eq!(stripped.locale, Some(Locale::ENGLISH));

        let stripped = strip_locale_prefix("/en/");
        assert_eq!(stripped.bare_path, "/");
    }

    #[test]
    fn test_strip_unprefixed_path() {
        let stripped = strip_locale_prefix("/about");
        assert_eq!(stripped.bare_path, "/about");
        assert_eq!(stripped.locale, None);
        assert_eq!(stripped.effective_locale(), Locale::DUTCH);
    }

    #[test]
    fn test_strip_requires_segment_boundary() {
        let stripped = strip_locale_prefix("/english/news");
        assert_eq!(stripped.bare_path, "/english/news");
        assert_eq!(stripped.locale, None);
    }

    #[test]
    fn test_strip_ignores_default_locale_prefix() {
        let stripped = strip_locale_prefix("/nl/about");
        assert_eq!(stripped.bare_path, "/nl/about");
        assert_eq!(stripped.locale, None);
    }

    #[test]
    fn test_strip_ignores_unknown_prefix() {
        let stripped = strip_locale_prefix("/fr/about");
        assert_eq!(stripped.bare_path, "/fr/about");
        assert_eq!(stripped.locale, None);
    }

    #[test]
    fn test_strip_empty_is_root() {
        let stripped = strip_locale_prefix("");
        assert_eq!(stripped.bare_path, "/");
        assert_eq!(stripped.locale, None);
    }

    #[test]
    fn test_strip_repeated_prefix() {
        let stripped = strip_locale_prefix("/en/en/about");
        assert_eq!(stripped.bare_path, "/about");
        assert_eq!(stripped.locale, Some(Locale::ENGLISH));
    }

    // ==================== default_locale_remainder Tests ====================

    #[test]
    fn test_default_remainder() {
        assert_eq!(default_locale_remainder("/nl/about").as_deref(), Some("/about"));
        assert_eq!(default_locale_remainder("/nl").as_deref(), Some("/"));
        assert_eq!(default_locale_remainder("/nl/").as_deref(), Some("/"));
    }

    #[test]
    fn test_default_remainder_none() {
        assert_eq!(default_locale_remainder("/about"), None);
        assert_eq!(default_locale_remainder("/en/about"), None);
        assert_eq!(default_locale_remainder("/nlx"), None);
    }
}
