//! Localized HTML pages.
//!
//! Markup is a minimal semantic shell: head metadata, navigation, a language
//! switcher and the page content.

use crate::cms::{ContentSet, Document, DocumentKind};
use crate::i18n::{tags, Locale, LocaleStrings};
use crate::markup::escape;
use crate::metadata::{blog_posting_schema, person_schema, website_schema, PageMetadata};
use crate::routing::strip_locale_prefix;
use crate::server::middleware::ResolvedLocale;
use crate::server::AppState;
use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Extension,
};
use url::form_urlencoded;

/// Tags localized strings may use in rendered HTML.
const RICH_TEXT_TAGS: &[&str] = &["strong", "em"];

/// Latest posts shown on the home page.
const HOME_POST_COUNT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Home,
    About,
    Blog,
    BlogPost(String),
    Projects,
    Project(String),
    Experience,
    Cv,
}

impl Page {
    /// Match a bare (unprefixed) path. A trailing slash is ignored.
    pub fn from_path(bare_path: &str) -> Option<Page> {
        let trimmed = bare_path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();

        let page = match segments.as_slice() {
            [] => Page::Home,
            ["about"] => Page::About,
            ["blog"] => Page::Blog,
            ["blog", slug] if !slug.is_empty() => Page::BlogPost(slug.to_string()),
            ["projects"] => Page::Projects,
            ["projects", slug] if !slug.is_empty() => Page::Project(slug.to_string()),
            ["experience"] => Page::Experience,
            ["cv"] => Page::Cv,
            _ => return None,
        };
        Some(page)
    }

    /// Canonical bare path.
    pub fn path(&self) -> String {
        match self {
            Page::Home => "/".to_string(),
            Page::About => "/about".to_string(),
            Page::Blog => "/blog".to_string(),
            Page::BlogPost(slug) => format!("/blog/{}", slug),
            Page::Projects => "/projects".to_string(),
            Page::Project(slug) => format!("/projects/{}", slug),
            Page::Experience => "/experience".to_string(),
            Page::Cv => "/cv".to_string(),
        }
    }
}

/// Fallback handler: every path the API and SEO routes don't claim.
pub async fn page(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    resolved: Option<Extension<ResolvedLocale>>,
) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }
    // Files and reserved prefixes never render as pages
    if state.router.is_excluded(uri.path()) {
        return StatusCode::NOT_FOUND.into_response();
    }

    let stripped = strip_locale_prefix(uri.path());
    let locale = resolved
        .map(|Extension(ResolvedLocale(locale))| locale)
        .unwrap_or_else(|| stripped.effective_locale());

    let content = state.content.snapshot();
    let rendered = Page::from_path(&stripped.bare_path)
        .and_then(|page| render_page(&state, &content, &page, locale));

    match rendered {
        Some(html) => Html(html).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html(render_not_found(&state, locale, &stripped.bare_path)),
        )
            .into_response(),
    }
}

pub async fn studio(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"robots\" content=\"noindex\">\n<title>{} Studio</title>\n</head>\n\
         <body>\n<div id=\"studio\"></div>\n</body>\n</html>\n",
        escape(&state.config.site_name)
    ))
}

/// `None` when the page needs a document that doesn't exist.
pub fn render_page(state: &AppState, content: &ContentSet, page: &Page, locale: Locale) -> Option<String> {
    let strings = LocaleStrings::for_locale(locale);
    let urls = &state.urls;
    let config = &state.config;
    let path = page.path();

    let (meta, main) = match page {
        Page::Home => {
            let intro = tags::render_html(strings.home_intro, RICH_TEXT_TAGS)
                .replace("{author}", &escape(&config.author_name));
            let mut main = format!(
                "<h1>{}</h1>\n<p>{}</p>\n",
                escape(&config.site_name),
                intro
            );
            let posts: Vec<&Document> = content
                .list(DocumentKind::Post, locale)
                .into_iter()
                .take(HOME_POST_COUNT)
                .collect();
            main.push_str(&render_listing(state, &posts, locale));

            let description = tags::plain_text(strings.home_intro).replace("{author}", &config.author_name);
            let meta = PageMetadata::new(urls, &path, locale, &config.site_name, &description)
                .with_json_ld(website_schema(urls, &config.site_name, locale))
                .with_json_ld(person_schema(urls, &config.author_name));
            (meta, main)
        }
        Page::About => render_page_document(state, content, "about", strings.nav_about, &path, locale),
        Page::Cv => render_page_document(state, content, "cv", strings.nav_cv, &path, locale),
        Page::Blog => render_index(state, content, DocumentKind::Post, strings.nav_blog, &path, locale),
        Page::Projects => {
            render_index(state, content, DocumentKind::Project, strings.nav_projects, &path, locale)
        }
        Page::Experience => render_index(
            state,
            content,
            DocumentKind::Experience,
            strings.nav_experience,
            &path,
            locale,
        ),
        Page::BlogPost(slug) => {
            let doc = content.find(DocumentKind::Post, slug, locale)?;
            let meta = document_metadata(state, doc, &path, locale)
                .with_og_type("article")
                .with_json_ld(blog_posting_schema(urls, doc, locale, &config.author_name));
            (meta, render_document(doc, locale))
        }
        Page::Project(slug) => {
            let doc = content.find(DocumentKind::Project, slug, locale)?;
            let meta = document_metadata(state, doc, &path, locale);
            (meta, render_document(doc, locale))
        }
    };

    Some(layout(state, locale, &path, &meta.render_head(), &main))
}

fn document_metadata(state: &AppState, doc: &Document, path: &str, locale: Locale) -> PageMetadata {
    let description = doc.summary.as_deref().unwrap_or(&state.config.site_name);
    PageMetadata::new(&state.urls, path, locale, &doc.title, description)
}

/// Static page backed by an optional `page` document with the given slug.
fn render_page_document(
    state: &AppState,
    content: &ContentSet,
    slug: &str,
    title: &str,
    path: &str,
    locale: Locale,
) -> (PageMetadata, String) {
    match content.find(DocumentKind::Page, slug, locale) {
        Some(doc) => (
            document_metadata(state, doc, path, locale),
            render_document(doc, locale),
        ),
        None => (
            PageMetadata::new(&state.urls, path, locale, title, &state.config.site_name),
            format!("<h1>{}</h1>\n", escape(title)),
        ),
    }
}

fn render_index(
    state: &AppState,
    content: &ContentSet,
    kind: DocumentKind,
    title: &str,
    path: &str,
    locale: Locale,
) -> (PageMetadata, String) {
    let docs = content.list(kind, locale);
    let main = format!(
        "<h1>{}</h1>\n{}",
        escape(title),
        render_listing(state, &docs, locale)
    );
    let meta = PageMetadata::new(&state.urls, path, locale, title, &state.config.site_name);
    (meta, main)
}

fn render_listing(state: &AppState, docs: &[&Document], locale: Locale) -> String {
    let strings = LocaleStrings::for_locale(locale);
    if docs.is_empty() {
        return format!("<p>{}</p>\n", escape(strings.empty_listing));
    }

    let mut html = String::from("<ul>\n");
    for doc in docs {
        html.push_str("<li><article>");
        html.push_str(&format!("<h2>{}</h2>", escape(&doc.title)));
        if let Some(summary) = &doc.summary {
            html.push_str(&format!("<p>{}</p>", escape(summary)));
        }
        if let Some(detail) = doc.kind.detail_path(&doc.slug) {
            html.push_str(&format!(
                "<a href=\"{}\">{}</a>",
                escape(&state.urls.localized_path(&detail, locale)),
                escape(strings.read_more)
            ));
        }
        html.push_str("</article></li>\n");
    }
    html.push_str("</ul>\n");
    html
}

fn render_document(doc: &Document, locale: Locale) -> String {
    let strings = LocaleStrings::for_locale(locale);
    let mut html = format!("<article lang=\"{}\">\n<h1>{}</h1>\n", doc.locale, escape(&doc.title));

    if let Some(updated) = doc.updated_at {
        html.push_str(&format!(
            "<p>{} <time datetime=\"{}\">{}</time></p>\n",
            escape(strings.updated_on),
            updated.to_rfc3339(),
            updated.format("%Y-%m-%d")
        ));
    }

    for paragraph in doc
        .body
        .as_deref()
        .unwrap_or_default()
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
    {
        html.push_str(&format!("<p>{}</p>\n", escape(paragraph)));
    }

    html.push_str("</article>\n");
    html
}

fn render_not_found(state: &AppState, locale: Locale, bare_path: &str) -> String {
    let strings = LocaleStrings::for_locale(locale);
    let head = format!(
        "<title>{}</title>\n<meta name=\"robots\" content=\"noindex\">\n",
        escape(&tags::plain_text(strings.not_found_title))
    );
    let main = format!(
        "<h1>{}</h1>\n<p>{}</p>\n<p><a href=\"{}\">{}</a></p>\n",
        escape(strings.not_found_title),
        tags::render_html(strings.not_found_body, RICH_TEXT_TAGS),
        escape(&state.urls.localized_path("/", locale)),
        escape(strings.back_home)
    );
    layout(state, locale, bare_path, &head, &main)
}

fn layout(state: &AppState, locale: Locale, bare_path: &str, head: &str, main: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"{}\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n{}</head>\n\
         <body>\n<header>\n{}{}</header>\n<main>\n{}</main>\n</body>\n</html>\n",
        locale,
        head,
        render_nav(state, locale),
        render_language_switch(state, locale, bare_path),
        main
    )
}

fn render_nav(state: &AppState, locale: Locale) -> String {
    let strings = LocaleStrings::for_locale(locale);
    let items = [
        ("/", strings.nav_home),
        ("/about", strings.nav_about),
        ("/blog", strings.nav_blog),
        ("/projects", strings.nav_projects),
        ("/experience", strings.nav_experience),
        ("/cv", strings.nav_cv),
    ];

    let mut html = String::from("<nav>\n<ul>\n");
    for (path, label) in items {
        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            escape(&state.urls.localized_path(path, locale)),
            escape(label)
        ));
    }
    html.push_str("</ul>\n</nav>\n");
    html
}

/// Links through `/api/locale` so the choice is remembered before navigating.
fn render_language_switch(state: &AppState, current: Locale, bare_path: &str) -> String {
    let strings = LocaleStrings::for_locale(current);
    let from: String =
        form_urlencoded::byte_serialize(state.urls.localized_path(bare_path, current).as_bytes()).collect();

    let mut html = format!("<nav aria-label=\"{}\">\n<ul>\n", escape(strings.switch_label));
    for locale in Locale::all() {
        let href = format!("/api/locale?to={}&from={}", locale.code(), from);
        let current_attr = if locale == current { " aria-current=\"true\"" } else { "" };
        html.push_str(&format!(
            "<li><a href=\"{}\" hreflang=\"{}\" lang=\"{}\"{}>{}</a></li>\n",
            escape(&href),
            locale,
            locale,
            current_attr,
            escape(locale.native_name())
        ));
    }
    html.push_str("</ul>\n</nav>\n");
    html
}
