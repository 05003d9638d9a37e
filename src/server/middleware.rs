use crate::i18n::Locale;
use crate::routing::{strip_locale_prefix, RouteDecision, RouteRequest};
use crate::server::AppState;
use axum::{
    extract::{Request, State},
    http::{
        header::{ACCEPT_LANGUAGE, COOKIE, HOST, SET_COOKIE},
        HeaderMap, HeaderValue, Uri,
    },
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::{debug, warn};

/// One year, in seconds.
const LOCALE_COOKIE_MAX_AGE: u64 = 31_536_000;

/// The locale a page request is served in, attached by [`locale_middleware`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedLocale(pub Locale);

/// Applies the routing decision for every request before the inner router
/// dispatches it: redirects, studio rewrites and locale resolution.
pub async fn locale_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let cookie_name = state.config.locale_cookie.as_str();

    let (decision, refresh_cookie) = {
        let headers = request.headers();
        let uri = request.uri();
        let cookie = cookie_value(headers, cookie_name);

        let route = RouteRequest {
            host: request_host(headers, uri),
            path: uri.path(),
            query: uri.query(),
            locale_cookie: cookie.as_deref(),
            accept_language: headers.get(ACCEPT_LANGUAGE).and_then(|v| v.to_str().ok()),
        };
        let decision = state.router.decide(&route);

        // Only a locale chosen through the URL updates the remembered preference
        let refresh_cookie = match &decision {
            RouteDecision::PassThrough { locale: Some(locale) } => {
                strip_locale_prefix(uri.path()).locale.is_some()
                    && cookie.as_deref() != Some(locale.code())
            }
            _ => false,
        };

        debug!("{} {} -> {:?}", request.method(), uri, decision);
        (decision, refresh_cookie)
    };

    state.metrics.record_decision(&decision);

    match decision {
        RouteDecision::Redirect { location } => Redirect::temporary(&location).into_response(),
        RouteDecision::Rewrite { path } => {
            match path.parse::<Uri>() {
                Ok(uri) => *request.uri_mut() = uri,
                Err(e) => warn!("Cannot rewrite request to '{}': {}", path, e),
            }
            next.run(request).await
        }
        RouteDecision::PassThrough { locale: None } => next.run(request).await,
        RouteDecision::PassThrough { locale: Some(locale) } => {
            request.extensions_mut().insert(ResolvedLocale(locale));
            let mut response = next.run(request).await;
            if refresh_cookie {
                if let Ok(value) = HeaderValue::from_str(&locale_cookie(cookie_name, locale)) {
                    response.headers_mut().append(SET_COOKIE, value);
                }
            }
            response
        }
    }
}

/// `Host` header, falling back to the URI authority (HTTP/2).
fn request_host<'a>(headers: &'a HeaderMap, uri: &'a Uri) -> Option<&'a str> {
    headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| uri.authority().map(|a| a.as_str()))
}

/// Value of the named cookie across all `Cookie` headers.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().trim_matches('"').to_string())
}

/// `Set-Cookie` value remembering the visitor's locale.
pub fn locale_cookie(name: &str, locale: Locale) -> String {
    format!(
        "{}={}; Path=/; Max-Age={}; SameSite=Lax",
        name,
        locale.code(),
        LOCALE_COOKIE_MAX_AGE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_value() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark; locale=en; other=1"));
        assert_eq!(cookie_value(&headers, "locale").as_deref(), Some("en"));
        assert_eq!(cookie_value(&headers, "missing"), None);
    }

    #[test]
    fn test_cookie_value_across_headers() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("a=1"));
        headers.append(COOKIE, HeaderValue::from_static("locale=\"nl\""));
        assert_eq!(cookie_value(&headers, "locale").as_deref(), Some("nl"));
    }

    #[test]
    fn test_cookie_name_must_match_exactly() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("mylocale=en"));
        assert_eq!(cookie_value(&headers, "locale"), None);
    }

    #[test]
    fn test_locale_cookie_format() {
        assert_eq!(
            locale_cookie("locale", Locale::ENGLISH),
            "locale=en; Path=/; Max-Age=31536000; SameSite=Lax"
        );
    }

    #[test]
    fn test_request_host_prefers_header() {
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_static("studio.example.nl"));
        let uri: Uri = "https://www.example.nl/foo".parse().unwrap();
        assert_eq!(request_host(&headers, &uri), Some("studio.example.nl"));
        assert_eq!(request_host(&HeaderMap::new(), &uri), Some("www.example.nl"));
    }
}
