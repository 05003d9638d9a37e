//! Internationalization (i18n): supported locales and localized strings.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for all supported locales and the default
//! - `locale`: Type-safe `Locale` validated against the registry
//! - `negotiate`: Preferred locale from cookie and `Accept-Language`
//! - `strings`: Per-locale user-facing strings
//! - `tags`: Rich-text tags inside localized strings
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::i18n::{Locale, LocaleRegistry};
//!
//! let default = Locale::default_locale();
//! let english = Locale::from_code("en")?;
//! let locales = LocaleRegistry::get().list_enabled();
//! ```

mod locale;
mod negotiate;
mod registry;
mod strings;
pub mod tags;

pub use locale::Locale;
pub use negotiate::{negotiate, preferred_locale};
pub use registry::{LocaleConfig, LocaleRegistry};
pub use strings::LocaleStrings;
