//! Locale registry: Single source of truth for all supported site locales.
//!
//! The registry is immutable static data, initialized once with `OnceLock`.
//! Exactly one locale is the default: its pages are served without a path
//! prefix, every other locale lives under `/{code}`.

use std::sync::OnceLock;

/// Configuration for a supported locale.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    /// ISO 639-1 code, also used as the URL prefix and `hreflang` value
    pub code: &'static str,

    /// English name of the locale (e.g., "Dutch")
    pub name: &'static str,

    /// Native name, shown in the language switcher (e.g., "Nederlands")
    pub native_name: &'static str,

    /// Open Graph locale (e.g., "nl_NL")
    pub og_locale: &'static str,

    /// Whether this is the unprefixed default locale (exactly one is)
    pub is_default: bool,

    /// Whether this locale is served
    pub enabled: bool,
}

/// Global locale registry.
pub struct LocaleRegistry {
    locales: Vec<LocaleConfig>,
}

static REGISTRY: OnceLock<LocaleRegistry> = OnceLock::new();

impl LocaleRegistry {
    /// Get the global locale registry instance.
    pub fn get() -> &'static LocaleRegistry {
        REGISTRY.get_or_init(|| LocaleRegistry {
            locales: default_locales(),
        })
    }

    /// Get a locale configuration by its code (exact, case-sensitive match).
    pub fn get_by_code(&self, code: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|locale| locale.code == code)
    }

    /// All enabled locales, in registry order.
    pub fn list_enabled(&self) -> Vec<&LocaleConfig> {
        self.locales.iter().filter(|locale| locale.enabled).collect()
    }

    /// All locales, including disabled ones.
    pub fn list_all(&self) -> Vec<&LocaleConfig> {
        self.locales.iter().collect()
    }

    /// Enabled locales that are served under a `/{code}` prefix.
    pub fn list_prefixed(&self) -> Vec<&LocaleConfig> {
        self.locales
            .iter()
            .filter(|locale| locale.enabled && !locale.is_default)
            .collect()
    }

    /// Get the default locale configuration.
    ///
    /// # Panics
    /// Panics if the registry does not define exactly one default locale.
    /// The registry is static, so this is a programming error caught by the
    /// registry tests.
    pub fn default_locale(&self) -> &LocaleConfig {
        let defaults: Vec<_> = self
            .locales
            .iter()
            .filter(|locale| locale.is_default)
            .collect();

        match defaults.len() {
            0 => panic!("No default locale found in registry"),
            1 => defaults[0],
            _ => panic!("Multiple default locales found in registry"),
        }
    }

    /// Check if a locale code is supported and enabled.
    pub fn is_enabled(&self, code: &str) -> bool {
        self.get_by_code(code)
            .map(|locale| locale.enabled)
            .unwrap_or(false)
    }
}

/// Dutch is the default (unprefixed) locale; English lives under `/en`.
fn default_locales() -> Vec<LocaleConfig> {
    vec![
        LocaleConfig {
            code: "nl",
            name: "Dutch",
            native_name: "Nederlands",
            og_locale: "nl_NL",
            is_default: true,
            enabled: true,
        },
        LocaleConfig {
            code: "en",
            name: "English",
            native_name: "English",
            og_locale: "en_US",
            is_default: false,
            enabled: true,
        },
    ]
}
