//! Multilingual sitemap generation.
//!
//! Every route is listed once per locale, each entry carrying `xhtml:link`
//! alternates for all locales plus `x-default`:
//!
//! ```xml
//! <url>
//!   <loc>https://example.nl/en/about</loc>
//!   <xhtml:link rel="alternate" hreflang="nl" href="https://example.nl/about"/>
//!   ...
//!   <changefreq>monthly</changefreq>
//!   <priority>0.8</priority>
//! </url>
//! ```

use crate::cms::{ContentSet, DocumentKind};
use crate::i18n::Locale;
use crate::markup::escape;
use crate::routing::{AlternateLinkSet, LocalizedUrl, UrlBuilder};
use chrono::{DateTime, Utc};
use std::fmt;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
const XHTML_NS: &str = "http://www.w3.org/1999/xhtml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Weekly,
    Monthly,
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeFrequency::Weekly => f.write_str("weekly"),
            ChangeFrequency::Monthly => f.write_str("monthly"),
        }
    }
}

/// Static pages: (bare path, priority, change frequency).
pub const STATIC_ROUTES: &[(&str, f32, ChangeFrequency)] = &[
    ("/", 1.0, ChangeFrequency::Weekly),
    ("/about", 0.8, ChangeFrequency::Monthly),
    ("/blog", 0.8, ChangeFrequency::Weekly),
    ("/projects", 0.8, ChangeFrequency::Monthly),
    ("/experience", 0.7, ChangeFrequency::Monthly),
    ("/cv", 0.7, ChangeFrequency::Monthly),
];

/// CMS detail pages: (kind, priority, change frequency).
const CONTENT_ROUTES: &[(DocumentKind, f32, ChangeFrequency)] = &[
    (DocumentKind::Post, 0.7, ChangeFrequency::Monthly),
    (DocumentKind::Project, 0.6, ChangeFrequency::Monthly),
];

#[derive(Debug, Clone)]
pub struct SitemapEntry {
    pub loc: LocalizedUrl,
    pub alternates: AlternateLinkSet,
    pub lastmod: Option<DateTime<Utc>>,
    pub changefreq: ChangeFrequency,
    pub priority: f32,
}

#[derive(Debug, Clone, Default)]
pub struct Sitemap {
    entries: Vec<SitemapEntry>,
}

impl Sitemap {
    pub fn build(urls: &UrlBuilder, content: &ContentSet) -> Self {
        let mut sitemap = Sitemap::default();

        for &(path, priority, changefreq) in STATIC_ROUTES {
            sitemap.push_route(urls, path, None, changefreq, priority);
        }

        for &(kind, priority, changefreq) in CONTENT_ROUTES {
            for slug in content.slugs(kind) {
                let Some(path) = kind.detail_path(slug) else {
                    continue;
                };
                let lastmod = content.last_modified(kind, slug.as_str());
                sitemap.push_route(urls, &path, lastmod, changefreq, priority);
            }
        }

        sitemap
    }

    fn push_route(
        &mut self,
        urls: &UrlBuilder,
        path: &str,
        lastmod: Option<DateTime<Utc>>,
        changefreq: ChangeFrequency,
        priority: f32,
    ) {
        let alternates = urls.build_alternates(path);
        for locale in Locale::all() {
            self.entries.push(SitemapEntry {
                loc: urls.build_url(path, locale),
                alternates: alternates.clone(),
                lastmod,
                changefreq,
                priority,
            });
        }
    }

    pub fn entries(&self) -> &[SitemapEntry] {
        &self.entries
    }

    pub fn into_xml(self) -> String {
        let mut xml = String::with_capacity(256 + self.entries.len() * 512);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str(&format!(
            "<urlset xmlns=\"{}\" xmlns:xhtml=\"{}\">\n",
            SITEMAP_NS, XHTML_NS
        ));

        for entry in self.entries {
            xml.push_str("  <url>\n    <loc>");
            xml.push_str(&escape(entry.loc.as_str()));
            xml.push_str("</loc>\n");
            for (hreflang, url) in entry.alternates.iter() {
                xml.push_str(&format!(
                    "    <xhtml:link rel=\"alternate\" hreflang=\"{}\" href=\"{}\"/>\n",
                    hreflang,
                    escape(url.as_str())
                ));
            }
            if let Some(lastmod) = entry.lastmod {
                xml.push_str(&format!("    <lastmod>{}</lastmod>\n", lastmod.format("%Y-%m-%d")));
            }
            xml.push_str(&format!("    <changefreq>{}</changefreq>\n", entry.changefreq));
            xml.push_str(&format!("    <priority>{:.1}</priority>\n", entry.priority));
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

/// robots.txt allowing everything except the API and the studio.
pub fn robots_txt(urls: &UrlBuilder) -> String {
    format!(
        "User-agent: *\nAllow: /\nDisallow: /api/\nDisallow: /studio/\n\nSitemap: {}/sitemap.xml\n",
        urls.origin()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::parse_dataset;

    fn urls() -> UrlBuilder {
        UrlBuilder::new("https://www.example.nl")
    }

    fn content() -> ContentSet {
        ContentSet::new(
            parse_dataset(
                r#"[
                {"_id": "1", "_type": "post", "slug": "hello", "_updatedAt": "2024-02-01T00:00:00Z"},
                {"_id": "2", "_type": "post", "slug": "hello", "language": "en", "_updatedAt": "2024-03-01T00:00:00Z"},
                {"_id": "3", "_type": "project", "slug": {"current": "site"}},
                {"_id": "4", "_type": "experience", "slug": "acme"}
            ]"#,
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_static_routes_times_locales() {
        let sitemap = Sitemap::build(&urls(), &ContentSet::default());
        assert_eq!(sitemap.entries().len(), STATIC_ROUTES.len() * Locale::all().len());
    }

    #[test]
    fn test_content_routes_included() {
        let sitemap = Sitemap::build(&urls(), &content());
        // 6 static + post + project, each in 2 locales; experience has no page
        assert_eq!(sitemap.entries().len(), 16);

        let locs: Vec<_> = sitemap.entries().iter().map(|e| e.loc.as_str()).collect();
        assert!(locs.contains(&"https://www.example.nl/blog/hello"));
        assert!(locs.contains(&"https://www.example.nl/en/blog/hello"));
        assert!(locs.contains(&"https://www.example.nl/en/projects/site"));
        assert!(!locs.iter().any(|l| l.contains("acme")));
    }

    #[test]
    fn test_priorities() {
        let sitemap = Sitemap::build(&urls(), &content());
        let find = |loc: &str| {
            sitemap
                .entries()
                .iter()
                .find(|e| e.loc == loc)
                .unwrap()
                .clone()
        };

        let home = find("https://www.example.nl");
        assert_eq!(home.priority, 1.0);
        assert_eq!(home.changefreq, ChangeFrequency::Weekly);

        let post = find("https://www.example.nl/blog/hello");
        assert_eq!(post.priority, 0.7);
        assert_eq!(post.changefreq, ChangeFrequency::Monthly);
        assert_eq!(post.lastmod.unwrap().format("%Y-%m-%d").to_string(), "2024-03-01");

        let project = find("https://www.example.nl/projects/site");
        assert_eq!(project.priority, 0.6);
        assert!(project.lastmod.is_none());
    }

    #[test]
    fn test_xml_structure() {
        let xml = Sitemap::build(&urls(), &content()).into_xml();
        let lines: Vec<&str> = xml.lines().collect();

        assert_eq!(lines[0], r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        assert!(lines[1].starts_with("<urlset"));
        assert!(lines[1].contains(XHTML_NS));
        assert_eq!(lines.last().map(|l| l.trim()), Some("</urlset>"));
        assert_eq!(xml.matches("<url>").count(), 16);
    }

    #[test]
    fn test_xml_entry_contents() {
        let xml = Sitemap::build(&urls(), &ContentSet::default()).into_xml();

        assert!(xml.contains("<loc>https://www.example.nl/en/about</loc>"));
        assert!(xml.contains(
            r#"<xhtml:link rel="alternate" hreflang="x-default" href="https://www.example.nl/about"/>"#
        ));
        assert!(xml.contains("<priority>1.0</priority>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
        assert!(!xml.contains("<lastmod>"));
    }

    #[test]
    fn test_robots_txt() {
        let robots = robots_txt(&urls());
        assert!(robots.contains("Disallow: /api/"));
        assert!(robots.ends_with("Sitemap: https://www.example.nl/sitemap.xml\n"));
    }
}
