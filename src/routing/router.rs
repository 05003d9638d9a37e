//! Per-request routing decisions: studio rewrite, exclusions, locale redirects.
//!
//! Everything here is a pure function of the request head. Applying the
//! decision to an actual HTTP request is the job of `server::middleware`.

use crate::i18n::{preferred_locale, Locale};
use crate::routing::path::{default_locale_remainder, normalize_path, strip_locale_prefix};
use crate::routing::url::UrlBuilder;
use regex::Regex;

/// Internal route the studio subdomain is rewritten to.
pub const STUDIO_ROUTE: &str = "/studio";

/// Prefix of built static assets.
pub const ASSET_PREFIX: &str = "/_assets";

/// Prefix of the JSON API.
pub const API_PREFIX: &str = "/api";

/// What to do with an inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Serve as-is. `locale` is `None` for excluded paths, which get no
    /// locale processing.
    PassThrough { locale: Option<Locale> },

    /// Tell the client to request `location` (site-relative, query kept).
    Redirect { location: String },

    /// Serve `path` instead, without the client seeing it (query kept).
    Rewrite { path: String },
}

/// The parts of a request the router looks at.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteRequest<'a> {
    pub host: Option<&'a str>,
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub locale_cookie: Option<&'a str>,
    pub accept_language: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct RequestRouter {
    studio_label: String,
    excluded: Regex,
    urls: UrlBuilder,
}

impl RequestRouter {
    /// `studio_label` is the reserved subdomain label (e.g. `studio`).
    pub fn new(studio_label: &str, urls: UrlBuilder) -> Self {
        let prefixes = [API_PREFIX, ASSET_PREFIX, STUDIO_ROUTE]
            .iter()
            .map(|p| regex::escape(p.trim_start_matches('/')))
            .collect::<Vec<_>>()
            .join("|");

        // Reserved prefixes, or a last segment with a file extension
        let pattern = format!(r"^/(?:{})(?:/|$)|\.[^/]+$", prefixes);
        let excluded = Regex::new(&pattern).expect("exclusion pattern is valid");

        Self {
            studio_label: studio_label.to_ascii_lowercase(),
            excluded,
            urls,
        }
    }

    /// Whether `path` skips locale processing entirely.
    pub fn is_excluded(&self, path: &str) -> bool {
        self.excluded.is_match(path)
    }

    pub fn decide(&self, req: &RouteRequest<'_>) -> RouteDecision {
        let path = normalize_path(req.path);

        if self.is_excluded(&path) {
            return RouteDecision::PassThrough { locale: None };
        }

        if req.host.is_some_and(|host| self.is_studio_host(host)) {
            let target = if path == "/" {
                STUDIO_ROUTE.to_string()
            } else {
                format!("{}{}", STUDIO_ROUTE, path)
            };
            return RouteDecision::Rewrite {
                path: with_query(target, req.query),
            };
        }

        // The default locale never carries a prefix
        if let Some(rest) = default_locale_remainder(&path) {
            return RouteDecision::Redirect {
                location: with_query(rest, req.query),
            };
        }

        let stripped = strip_locale_prefix(&path);
        if let Some(locale) = stripped.locale {
            // Collapse repeated prefixes (`/en/en/about`) onto one URL
            let canonical = self.urls.localized_path(&stripped.bare_path, locale);
            if canonical != path {
                return RouteDecision::Redirect {
                    location: with_query(canonical, req.query),
                };
            }
            return RouteDecision::PassThrough {
                locale: Some(locale),
            };
        }

        let preferred = preferred_locale(req.locale_cookie, req.accept_language);
        if preferred.is_default() {
            RouteDecision::PassThrough {
                locale: Some(preferred),
            }
        } else {
            RouteDecision::Redirect {
                location: with_query(self.urls.localized_path(&path, preferred), req.query),
            }
        }
    }

    /// `studio.example.nl`, `STUDIO.example.nl:8080`; not `studios.example.nl`
    /// and not a bare `studio` host.
    fn is_studio_host(&self, host: &str) -> bool {
        let host = host.split(':').next().unwrap_or(host).to_ascii_lowercase();
        host.split_once('.')
            .is_some_and(|(label, rest)| label == self.studio_label && !rest.is_empty())
    }
}

fn with_query(path: String, query: Option<&str>) -> String {
    match query {
        Some(q) if !q.is_empty() => format!("{}?{}", path, q),
        _ => path,
    }
}
