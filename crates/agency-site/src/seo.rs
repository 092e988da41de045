//! Sitemap and robots.txt generation.

use crate::{content::ContentStore, locale::Locale, templates::SitemapTemplate};

/// Pages that exist in every locale, as paths below the locale prefix.
pub const STATIC_PAGES: &[&str] = &["", "/services", "/work", "/about", "/contact"];

/// One `<url>` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    pub loc: String,
    /// `(hreflang, absolute URL)` for every locale the page exists in.
    pub alternates: Vec<(&'static str, String)>,
    pub lastmod: Option<String>,
}

/// Builds `sitemap.xml` for every page and case study in every locale.
pub fn sitemap(base_url: &str, content: &ContentStore) -> SitemapTemplate {
    let mut entries = Vec::new();

    for path in STATIC_PAGES {
        let alternates: Vec<(&'static str, String)> = Locale::ALL
            .into_iter()
            .map(|locale| (locale.html_lang(), page_url(base_url, locale, path)))
            .collect();
        for (_, loc) in &alternates {
            entries.push(SitemapEntry {
                loc: loc.clone(),
                alternates: alternates.clone(),
                lastmod: None,
            });
        }
    }

    for locale in Locale::ALL {
        for study in content.case_studies(locale) {
            let path = format!("/work/{}", study.slug);
            let alternates = Locale::ALL
                .into_iter()
                .filter(|other| content.case_study(*other, &study.slug).is_some())
                .map(|other| (other.html_lang(), page_url(base_url, other, &path)))
                .collect();
            entries.push(SitemapEntry {
                loc: page_url(base_url, locale, &path),
                alternates,
                lastmod: Some(study.date.format("%Y-%m-%d").to_string()),
            });
        }
    }

    SitemapTemplate { entries }
}

/// Renders `robots.txt`.
pub fn robots(base_url: &str) -> String {
    format!("User-agent: *\nAllow: /\nDisallow: /api/\n\nSitemap: {base_url}/sitemap.xml\n")
}

fn page_url(base_url: &str, locale: Locale, path: &str) -> String {
    format!("{base_url}/{locale}{path}")
}

#[cfg(test)]
mod tests {
    use std::fs;

    use askama::Template;
    use tempfile::TempDir;

    use super::*;

    const BASE: &str = "https://brightpath.example";

    fn store_with(studies: &[(&str, &str)]) -> (TempDir, ContentStore) {
        let root = TempDir::new().expect("temp dir");
        for (locale, slug) in studies {
            let dir = root.path().join(locale).join("work");
            fs::create_dir_all(&dir).expect("create work dir");
            let body = format!(
                "---\ntitle: {slug}\nslug: {slug}\nclient: Acme\ndate: \"2024-05-02\"\nexcerpt: x\n---\nBody\n"
            );
            fs::write(dir.join(format!("{slug}.md")), body).expect("write study");
        }
        let store = ContentStore::load(root.path());
        (root, store)
    }

    fn render(base_url: &str, content: &ContentStore) -> String {
        sitemap(base_url, content).render().expect("sitemap renders")
    }

    #[test]
    fn sitemap_starts_with_xml_declaration() {
        let xml = render(BASE, &ContentStore::default());
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn sitemap_lists_static_pages_in_both_locales() {
        let xml = render(BASE, &ContentStore::default());
        for path in STATIC_PAGES {
            assert!(xml.contains(&format!("<loc>{BASE}/en{path}</loc>")), "en{path}");
            assert!(xml.contains(&format!("<loc>{BASE}/fr{path}</loc>")), "fr{path}");
        }
        assert_eq!(xml.matches("<url>").count(), STATIC_PAGES.len() * 2);
        assert!(xml.contains("hreflang=\"fr\""));
    }

    #[test]
    fn case_studies_carry_lastmod_and_shared_alternates() {
        let (_root, store) = store_with(&[("en", "atlas"), ("fr", "atlas"), ("en", "solo")]);
        let xml = render(BASE, &store);

        assert!(xml.contains(&format!("<loc>{BASE}/en/work/atlas</loc>")));
        assert!(xml.contains(&format!("<loc>{BASE}/fr/work/atlas</loc>")));
        assert!(xml.contains("<lastmod>2024-05-02</lastmod>"));
        assert!(!xml.contains(&format!("{BASE}/fr/work/solo")));
    }

    #[test]
    fn urls_are_escaped() {
        let xml = render("https://example.com/?a=1&b=2", &ContentStore::default());
        assert!(xml.contains("?a=1&amp;b=2"));
        assert!(!xml.contains("&b="));
    }

    #[test]
    fn robots_points_at_sitemap() {
        let robots = robots(BASE);
        assert!(robots.contains("Disallow: /api/"));
        assert!(robots.ends_with(&format!("Sitemap: {BASE}/sitemap.xml\n")));
    }
}
