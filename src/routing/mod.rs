//! Locale-prefix routing.
//!
//! - `path`: normalize paths and detect/strip locale prefixes
//! - `url`: build canonical localized URLs and hreflang alternates
//! - `router`: per-request studio rewrite / redirect / pass-through decisions

pub mod path;
pub mod router;
pub mod url;

pub use path::{normalize_path, strip_locale_prefix, StrippedPath};
pub use router::{RequestRouter, RouteDecision, RouteRequest};
pub use url::{AlternateLinkSet, LocalizedUrl, UrlBuilder, X_DEFAULT};
