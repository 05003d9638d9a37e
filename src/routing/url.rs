//! Localized URL construction: canonical URLs and hreflang alternates.

use crate::i18n::Locale;
use crate::routing::path::normalize_path;
use serde::Serialize;
use std::fmt;

/// `hreflang` key of the fallback alternate.
pub const X_DEFAULT: &str = "x-default";

/// An absolute URL for a (path, locale) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LocalizedUrl(String);

impl LocalizedUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for LocalizedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for LocalizedUrl {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for LocalizedUrl {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Per-locale URL variants of one page, plus `x-default`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternateLinkSet {
    /// (hreflang, url) in registry order, `x-default` last
    entries: Vec<(&'static str, LocalizedUrl)>,
}

impl AlternateLinkSet {
    /// Look up an entry by `hreflang` key (a locale code or `x-default`).
    pub fn get(&self, hreflang: &str) -> Option<&LocalizedUrl> {
        self.entries
            .iter()
            .find(|(key, _)| *key == hreflang)
            .map(|(_, url)| url)
    }

    pub fn x_default(&self) -> Option<&LocalizedUrl> {
        self.get(X_DEFAULT)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &LocalizedUrl)> {
        self.entries.iter().map(|(key, url)| (*key, url))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds localized URLs against a fixed site origin.
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    origin: String,
}

impl UrlBuilder {
    /// `origin` is scheme + host (+ port); trailing slashes are dropped.
    pub fn new(origin: &str) -> Self {
        Self {
            origin: origin.trim_end_matches('/').to_string(),
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Site-relative path of `base_path` under `locale`.
    ///
    /// The default locale is unprefixed; others get `/{code}`, and the root
    /// path collapses to just `/{code}`.
    pub fn localized_path(&self, base_path: &str, locale: Locale) -> String {
        let base = normalize_path(base_path);
        if locale.is_default() {
            return base;
        }
        if base == "/" {
            format!("/{}", locale.code())
        } else {
            format!("/{}{}", locale.code(), base)
        }
    }

    /// Absolute URL of `base_path` under `locale`.
    ///
    /// The default-locale root is the bare origin, without a trailing slash.
    pub fn build_url(&self, base_path: &str, locale: Locale) -> LocalizedUrl {
        let path = self.localized_path(base_path, locale);
        if path == "/" {
            LocalizedUrl(self.origin.clone())
        } else {
            LocalizedUrl(format!("{}{}", self.origin, path))
        }
    }

    /// URLs of `base_path` in every enabled locale, plus `x-default`
    /// (always the default-locale URL).
    pub fn build_alternates(&self, base_path: &str) -> AlternateLinkSet {
        let mut entries: Vec<(&'static str, LocalizedUrl)> = Locale::all()
            .into_iter()
            .map(|locale| (locale.code(), self.build_url(base_path, locale)))
            .collect();

        entries.push((X_DEFAULT, self.build_url(base_path, Locale::default_locale())));

        AlternateLinkSet { entries }
    }
}
