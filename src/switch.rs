//! Language switching: same page, other locale.

use crate::i18n::Locale;
use crate::navigation::Navigator;
use crate::routing::{strip_locale_prefix, LocalizedUrl, UrlBuilder};
use tracing::info;

/// Where the visitor's locale choice is remembered.
pub trait PreferenceStore {
    fn save_locale(&mut self, locale: Locale);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// Already in the requested locale; nothing saved, no navigation
    Unchanged,

    /// Preference saved and navigation triggered
    Navigated(LocalizedUrl),
}

/// Switch controller bound to the page currently shown.
pub struct LanguageSwitch<'a> {
    urls: &'a UrlBuilder,
    bare_path: String,
    current: Locale,
}

impl<'a> LanguageSwitch<'a> {
    /// `current_path` is the site-relative path being viewed, with or
    /// without a locale prefix.
    pub fn new(urls: &'a UrlBuilder, current_path: &str) -> Self {
        let stripped = strip_locale_prefix(current_path);
        let current = stripped.effective_locale();
        Self {
            urls,
            bare_path: stripped.bare_path,
            current,
        }
    }

    pub fn current_locale(&self) -> Locale {
        self.current
    }

    pub fn bare_path(&self) -> &str {
        &self.bare_path
    }

    /// URL of the current page in `locale`.
    pub fn target_url(&self, locale: Locale) -> LocalizedUrl {
        self.urls.build_url(&self.bare_path, locale)
    }

    pub fn switch_to<S, N>(&self, new_locale: Locale, store: &mut S, navigator: &mut N) -> SwitchOutcome
    where
        S: PreferenceStore + ?Sized,
        N: Navigator + ?Sized,
    {
        if new_locale == self.current {
            return SwitchOutcome::Unchanged;
        }

        store.save_locale(new_locale);
        let target = self.target_url(new_locale);
        info!(
            "Switching locale {} -> {} for {}",
            self.current, new_locale, self.bare_path
        );
        navigator.navigate(target.as_str());
        SwitchOutcome::Navigated(target)
    }
}
