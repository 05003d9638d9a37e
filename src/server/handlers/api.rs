use crate::contact::{forward as forward_contact, ContactRequest};
use crate::i18n::{preferred_locale, Locale, LocaleStrings};
use crate::navigation::Navigator;
use crate::rate_limit::{client_key, RateLimitDecision};
use crate::retry::RetryConfig;
use crate::security::{check_revalidate_secret, SecretCheck};
use crate::server::error::ApiError;
use crate::server::middleware::{cookie_value, locale_cookie};
use crate::server::AppState;
use crate::switch::{LanguageSwitch, PreferenceStore, SwitchOutcome};
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{
        header::{ACCEPT_LANGUAGE, SET_COOKIE},
        HeaderMap, HeaderValue,
    },
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{info, warn};

pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "documents": state.content.snapshot().len(),
        "routing": state.metrics.report(),
    }))
}

// ==================== Language switch ====================

#[derive(Debug, Deserialize)]
pub struct SwitchQuery {
    pub to: String,
    pub from: Option<String>,
}

/// Remembers the choice as a `Set-Cookie` header on the response.
struct CookiePreference<'a> {
    cookie_name: &'a str,
    set_cookie: Option<String>,
}

impl PreferenceStore for CookiePreference<'_> {
    fn save_locale(&mut self, locale: Locale) {
        self.set_cookie = Some(locale_cookie(self.cookie_name, locale));
    }
}

/// Navigation becomes a `303 See Other` to the recorded URL.
#[derive(Default)]
struct RedirectNavigator {
    location: Option<String>,
}

impl Navigator for RedirectNavigator {
    fn navigate(&mut self, url: &str) {
        self.location = Some(url.to_string());
    }
}

/// Only site-relative paths; `//host` and `/\host` would leave the site.
fn safe_return_path(from: Option<&str>) -> &str {
    match from {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => path,
        _ => "/",
    }
}

pub async fn switch_locale(
    State(state): State<AppState>,
    Query(query): Query<SwitchQuery>,
) -> Result<Response, ApiError> {
    let target = Locale::from_code(query.to.trim()).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let from = safe_return_path(query.from.as_deref());

    let switch = LanguageSwitch::new(&state.urls, from);
    let mut preference = CookiePreference {
        cookie_name: &state.config.locale_cookie,
        set_cookie: None,
    };
    let mut navigator = RedirectNavigator::default();

    let location = match switch.switch_to(target, &mut preference, &mut navigator) {
        SwitchOutcome::Unchanged => switch.target_url(target).into_string(),
        SwitchOutcome::Navigated(url) => navigator.location.unwrap_or_else(|| url.into_string()),
    };

    let mut response = Redirect::to(&location).into_response();
    if let Some(cookie) = preference.set_cookie {
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }
    Ok(response)
}

// ==================== Contact ====================

pub async fn contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let locale = preferred_locale(
        cookie_value(&headers, &state.config.locale_cookie).as_deref(),
        headers.get(ACCEPT_LANGUAGE).and_then(|v| v.to_str().ok()),
    );
    let strings = LocaleStrings::for_locale(locale);

    let client = client_key(&headers);
    if let RateLimitDecision::Limited { retry_after } = state.limiter.check(&client) {
        state.metrics.record_rate_limited();
        // Round up so clients never retry early
        let seconds = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
        warn!("Rate limited contact request from {}", client);
        return Err(ApiError::RateLimited {
            message: strings.too_many_requests.replace("{seconds}", &seconds.to_string()),
            retry_after_secs: seconds,
        });
    }

    let Ok(Json(request)) = body else {
        return Err(ApiError::BadRequest(strings.contact_invalid.to_string()));
    };
    let submission = request.validate().map_err(|e| {
        info!("Rejected contact request: {}", e);
        ApiError::BadRequest(strings.contact_invalid.to_string())
    })?;

    match &state.config.contact_webhook_url {
        Some(url) => {
            forward_contact(&state.http, url, &submission, locale, &RetryConfig::webhook())
                .await
                .map_err(|e| {
                    warn!("Contact delivery failed: {}", e);
                    ApiError::Upstream(e.to_string())
                })?;
        }
        None => info!(
            "Contact message from {} accepted (no webhook configured)",
            submission.email
        ),
    }

    Ok(Json(json!({ "message": strings.contact_received })))
}

// ==================== Revalidate ====================

pub async fn revalidate(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<Value>, ApiError> {
    match check_revalidate_secret(state.config.revalidate_secret.as_deref(), &headers) {
        SecretCheck::Disabled => return Err(ApiError::NotFound),
        SecretCheck::Rejected => {
            warn!("Revalidate request with invalid secret");
            return Err(ApiError::Unauthorized);
        }
        SecretCheck::Accepted => {}
    }

    let documents = state
        .reload_content()
        .await
        .map_err(|e| ApiError::Upstream(e.to_string()))?;

    Ok(Json(json!({ "revalidated": true, "documents": documents })))
}
