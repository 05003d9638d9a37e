//! Per-page SEO metadata: canonical URL, hreflang alternates, Open Graph and
//! JSON-LD structured data.

use crate::cms::Document;
use crate::i18n::Locale;
use crate::markup::escape;
use crate::routing::{AlternateLinkSet, LocalizedUrl, UrlBuilder};
use serde_json::{json, Value};

#[derive(Debug, Clone)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
    pub locale: Locale,
    pub canonical: LocalizedUrl,
    pub alternates: AlternateLinkSet,
    pub og_type: &'static str,
    pub json_ld: Vec<Value>,
}

impl PageMetadata {
    pub fn new(urls: &UrlBuilder, bare_path: &str, locale: Locale, title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            locale,
            canonical: urls.build_url(bare_path, locale),
            alternates: urls.build_alternates(bare_path),
            og_type: "website",
            json_ld: Vec::new(),
        }
    }

    pub fn with_og_type(mut self, og_type: &'static str) -> Self {
        self.og_type = og_type;
        self
    }

    pub fn with_json_ld(mut self, value: Value) -> Self {
        self.json_ld.push(value);
        self
    }

    /// Render the `<head>` contents.
    pub fn render_head(&self) -> String {
        let mut head = String::with_capacity(1024);

        head.push_str(&format!("<title>{}</title>\n", escape(&self.title)));
        head.push_str(&format!(
            "<meta name=\"description\" content=\"{}\">\n",
            escape(&self.description)
        ));
        head.push_str(&format!(
            "<link rel=\"canonical\" href=\"{}\">\n",
            escape(self.canonical.as_str())
        ));

        for (hreflang, url) in self.alternates.iter() {
            head.push_str(&format!(
                "<link rel=\"alternate\" hreflang=\"{}\" href=\"{}\">\n",
                hreflang,
                escape(url.as_str())
            ));
        }

        head.push_str(&format!(
            "<meta property=\"og:title\" content=\"{}\">\n",
            escape(&self.title)
        ));
        head.push_str(&format!(
            "<meta property=\"og:description\" content=\"{}\">\n",
            escape(&self.description)
        ));
        head.push_str(&format!(
            "<meta property=\"og:url\" content=\"{}\">\n",
            escape(self.canonical.as_str())
        ));
        head.push_str(&format!("<meta property=\"og:type\" content=\"{}\">\n", self.og_type));
        head.push_str(&format!(
            "<meta property=\"og:locale\" content=\"{}\">\n",
            self.locale.og_locale()
        ));
        for other in Locale::all().into_iter().filter(|l| *l != self.locale) {
            head.push_str(&format!(
                "<meta property=\"og:locale:alternate\" content=\"{}\">\n",
                other.og_locale()
            ));
        }

        for value in &self.json_ld {
            head.push_str("<script type=\"application/ld+json\">");
            head.push_str(&script_safe_json(value));
            head.push_str("</script>\n");
        }

        head
    }
}

/// JSON for embedding in `<script>`: `<` is escaped so the payload can never
/// close the element.
fn script_safe_json(value: &Value) -> String {
    value.to_string().replace('<', "\\u003c")
}

// ==================== JSON-LD ====================

pub fn person_schema(urls: &UrlBuilder, name: &str) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "Person",
        "name": name,
        "url": urls.origin(),
    })
}

pub fn website_schema(urls: &UrlBuilder, site_name: &str, locale: Locale) -> Value {
    json!({
        "@context": "https://schema.org",
        "@type": "WebSite",
        "name": site_name,
        "url": urls.build_url("/", locale),
        "inLanguage": locale.code(),
    })
}

pub fn blog_posting_schema(urls: &UrlBuilder, doc: &Document, locale: Locale, author: &str) -> Value {
    let path = format!("/blog/{}", doc.slug);
    let mut value = json!({
        "@context": "https://schema.org",
        "@type": "BlogPosting",
        "headline": doc.title,
        "url": urls.build_url(&path, locale),
        "inLanguage": doc.locale.code(),
        "author": { "@type": "Person", "name": author },
    });

    if let (Some(updated), Some(obj)) = (doc.updated_at, value.as_object_mut()) {
        obj.insert("dateModified".to_string(), json!(updated.to_rfc3339()));
    }
    if let (Some(summary), Some(obj)) = (&doc.summary, value.as_object_mut()) {
        obj.insert("description".to_string(), json!(summary));
    }
    value
}
