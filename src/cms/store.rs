use crate::cms::document::{Document, DocumentKind, Slug};
use crate::i18n::Locale;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::sync::{Arc, RwLock};

/// An immutable snapshot of all CMS documents.
#[derive(Debug, Clone, Default)]
pub struct ContentSet {
    documents: Vec<Document>,
}

impl ContentSet {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// The document for (kind, slug) in `locale`, falling back to the
    /// default-locale version when no localized one exists.
    pub fn find(&self, kind: DocumentKind, slug: &str, locale: Locale) -> Option<&Document> {
        let default = Locale::default_locale();
        let mut fallback = None;

        for doc in self
            .documents
            .iter()
            .filter(|d| d.kind == kind && d.slug.as_str() == slug)
        {
            if doc.locale == locale {
                return Some(doc);
            }
            if doc.locale == default && fallback.is_none() {
                fallback = Some(doc);
            }
        }

        fallback
    }

    /// One document per slug of `kind` in `locale` (with default-locale
    /// fallback), newest first.
    pub fn list(&self, kind: DocumentKind, locale: Locale) -> Vec<&Document> {
        let mut docs: Vec<&Document> = self
            .slugs(kind)
            .into_iter()
            .filter_map(|slug| self.find(kind, slug.as_str(), locale))
            .collect();

        // None sorts before Some, so reverse puts undated documents last
        docs.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| a.title.cmp(&b.title))
        });
        docs
    }

    /// Distinct slugs of `kind`, sorted.
    pub fn slugs(&self, kind: DocumentKind) -> Vec<&Slug> {
        self.documents
            .iter()
            .filter(|d| d.kind == kind)
            .map(|d| &d.slug)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Newest update across all locale versions of (kind, slug).
    pub fn last_modified(&self, kind: DocumentKind, slug: &str) -> Option<DateTime<Utc>> {
        self.documents
            .iter()
            .filter(|d| d.kind == kind && d.slug.as_str() == slug)
            .filter_map(|d| d.updated_at)
            .max()
    }
}

/// Shared holder of the current content snapshot.
///
/// Readers take a cheap `Arc` clone; reloads swap the whole snapshot.
#[derive(Debug, Default)]
pub struct ContentStore {
    current: RwLock<Arc<ContentSet>>,
}

impl ContentStore {
    pub fn new(content: ContentSet) -> Self {
        Self {
            current: RwLock::new(Arc::new(content)),
        }
    }

    pub fn snapshot(&self) -> Arc<ContentSet> {
        let guard = self.current.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    pub fn replace(&self, content: ContentSet) {
        let mut guard = self.current.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::new(content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn doc(id: &str, kind: DocumentKind, slug: &str, locale: Locale, day: Option<u32>) -> Document {
        Document {
            id: id.to_string(),
            kind,
            title: format!("Title {}", id),
            slug: Slug::new(slug).unwrap(),
            locale,
            summary: None,
            body: None,
            updated_at: day.map(|d| Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()),
        }
    }

    fn sample() -> ContentSet {
        ContentSet::new(vec![
            doc("p1-nl", DocumentKind::Post, "first", Locale::DUTCH, Some(1)),
            doc("p1-en", DocumentKind::Post, "first", Locale::ENGLISH, Some(3)),
            doc("p2-nl", DocumentKind::Post, "second", Locale::DUTCH, Some(2)),
            doc("p3-en", DocumentKind::Post, "english-only", Locale::ENGLISH, None),
            doc("pr1", DocumentKind::Project, "site", Locale::DUTCH, Some(5)),
        ])
    }

    // ==================== find Tests ====================

    #[test]
    fn test_find_localized() {
        let content = sample();
        let found = content.find(DocumentKind::Post, "first", Locale::ENGLISH).unwrap();
        assert_eq!(found.id, "p1-en");
    }

    #[test]
    fn test_find_falls_back_to_default() {
        let content = sample();
        let found = content.find(DocumentKind::Post, "second", Locale::ENGLISH).unwrap();
        assert_eq!(found.id, "p2-nl");
    }

    #[test]
    fn test_find_no_reverse_fallback() {
        let content = sample();
        assert!(content.find(DocumentKind::Post, "english-only", Locale::DUTCH).is_none());
    }

    #[test]
    fn test_find_respects_kind() {
        let content = sample();
        assert!(content.find(DocumentKind::Project, "first", Locale::DUTCH).is_none());
        assert!(content.find(DocumentKind::Project, "site", Locale::ENGLISH).is_some());
    }

    // ==================== list Tests ====================

    #[test]
    fn test_list_english_with_fallback_newest_first() {
        let content = sample();
        let ids: Vec<_> = content
            .list(DocumentKind::Post, Locale::ENGLISH)
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(ids, vec!["p1-en", "p2-nl", "p3-en"]);
    }

    #[test]
    fn test_list_dutch() {
        let content = sample();
        let ids: Vec<_> = content
            .list(DocumentKind::Post, Locale::DUTCH)
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(ids, vec!["p2-nl", "p1-nl"]);
    }

    // ==================== slugs / last_modified Tests ====================

    #[test]
    fn test_slugs_are_distinct_and_sorted() {
        let content = sample();
        let slugs: Vec<_> = content
            .slugs(DocumentKind::Post)
            .iter()
            .map(|s| s.as_str())
            .collect();
        assert_eq!(slugs, vec!["english-only", "first", "second"]);
    }

    #[test]
    fn test_last_modified_across_locales() {
        let content = sample();
        let modified = content.last_modified(DocumentKind::Post, "first").unwrap();
        assert_eq!(modified.format("%Y-%m-%d").to_string(), "2024-01-03");
        assert_eq!(content.last_modified(DocumentKind::Post, "english-only"), None);
    }

    // ==================== ContentStore Tests ====================

    #[test]
    fn test_store_replace_swaps_snapshot() {
        let store = ContentStore::new(ContentSet::default());
        let before = store.snapshot();
        store.replace(sample());

        assert!(before.is_empty(), "old snapshot must stay intact");
        assert_eq!(store.snapshot().len(), 5);
    }
}
