//! CMS documents, resolved into one canonical shape at the fetch boundary.
//!
//! The CMS hands out slugs either as plain strings or as `{ "current": ... }`
//! objects, and wraps query results in `{ "result": [...] }` or not at all.
//! Both are untagged unions here and never leak past `parse_dataset`.

use crate::error::ContentError;
use crate::i18n::Locale;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DocumentKind {
    Post,
    Project,
    Experience,
    Page,
}

impl DocumentKind {
    fn from_type(doc_type: &str) -> Option<Self> {
        match doc_type {
            "post" => Some(DocumentKind::Post),
            "project" => Some(DocumentKind::Project),
            "experience" => Some(DocumentKind::Experience),
            "page" => Some(DocumentKind::Page),
            _ => None,
        }
    }

    /// Bare path of a document's detail page, for kinds that have one.
    pub fn detail_path(&self, slug: &Slug) -> Option<String> {
        match self {
            DocumentKind::Post => Some(format!("/blog/{}", slug)),
            DocumentKind::Project => Some(format!("/projects/{}", slug)),
            DocumentKind::Experience | DocumentKind::Page => None,
        }
    }
}

/// URL-safe document identifier, without surrounding slashes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slug(String);

impl Slug {
    /// Returns `None` for slugs that are empty after trimming.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim().trim_matches('/');
        if trimmed.is_empty() {
            None
        } else {
            Some(Slug(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub kind: DocumentKind,
    pub title: String,
    pub slug: Slug,
    pub locale: Locale,
    pub summary: Option<String>,
    pub body: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawSlug {
    Text(String),
    Object { current: String },
}

impl RawSlug {
    fn into_slug(self) -> Option<Slug> {
        match self {
            RawSlug::Text(s) | RawSlug::Object { current: s } => Slug::new(&s),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_type")]
    doc_type: String,
    #[serde(rename = "_updatedAt", default)]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    slug: Option<RawSlug>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    body: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DatasetPayload {
    Wrapped { result: Vec<Value> },
    Bare(Vec<Value>),
}

impl RawDocument {
    fn resolve(self) -> Option<Document> {
        let Some(kind) = DocumentKind::from_type(&self.doc_type) else {
            warn!("Skipping document {} with unknown type '{}'", self.id, self.doc_type);
            return None;
        };

        let Some(slug) = self.slug.and_then(RawSlug::into_slug) else {
            warn!("Skipping document {} without a slug", self.id);
            return None;
        };

        let locale = self
            .language
            .as_deref()
            .and_then(|code| Locale::from_code(code).ok())
            .unwrap_or_else(Locale::default_locale);

        Some(Document {
            id: self.id,
            kind,
            title: self.title.unwrap_or_default(),
            slug,
            locale,
            summary: self.summary.filter(|s| !s.trim().is_empty()),
            body: self.body.filter(|s| !s.trim().is_empty()),
            updated_at: self.updated_at,
        })
    }
}

/// Parse a CMS dataset export into canonical documents.
///
/// Malformed documents, documents of unknown type, and documents without a
/// slug are skipped. Only a payload that is not a document list fails.
pub fn parse_dataset(json: &str) -> Result<Vec<Document>, ContentError> {
    let raw = match serde_json::from_str::<DatasetPayload>(json)? {
        DatasetPayload::Wrapped { result } => result,
        DatasetPayload::Bare(documents) => documents,
    };

    Ok(raw.into_iter().filter_map(decode_document).collect())
}

fn decode_document(value: Value) -> Option<Document> {
    let id = value
        .get("_id")
        .and_then(Value::as_str)
        .unwrap_or("<no id>")
        .to_string();

    match serde_json::from_value::<RawDocument>(value) {
        Ok(raw) => raw.resolve(),
        Err(e) => {
            warn!("Skipping malformed document {}: {}", id, e);
            None
        }
    }
}
