//! Case Study Loading
//!
//! Portfolio entries are Markdown files with YAML frontmatter, one directory
//! per locale: `{content_dir}/{locale}/work/*.md`.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use gray_matter::{engine::YAML, Matter, ParsedEntity};
use pulldown_cmark::{html, Options, Parser};
use serde::Deserialize;

use crate::locale::Locale;

/// A portfolio entry with metadata and rendered content.
#[derive(Clone, Debug)]
pub struct CaseStudy {
    pub slug: String,
    pub title: String,
    pub client: String,
    pub date: NaiveDate,
    pub excerpt: String,
    pub services: Vec<String>,
    pub content_html: String,
}

/// Frontmatter for case studies.
#[derive(Deserialize)]
struct CaseStudyFrontmatter {
    title: String,
    slug: String,
    client: String,
    date: String,
    excerpt: String,
    #[serde(default)]
    services: Vec<String>,
}

/// Case studies for a single locale, newest first.
#[derive(Clone, Debug, Default)]
struct LocaleShelf {
    studies: HashMap<String, CaseStudy>,
    sorted: Vec<String>,
}

/// Store for all case studies across locales.
#[derive(Clone, Debug, Default)]
pub struct ContentStore {
    shelves: HashMap<Locale, LocaleShelf>,
}

impl ContentStore {
    /// Load every locale's case studies from `content_dir`.
    pub fn load(content_dir: &Path) -> Self {
        let shelves = Locale::ALL
            .into_iter()
            .map(|locale| (locale, load_shelf(&work_dir(content_dir, locale))))
            .collect();
        Self { shelves }
    }

    /// Case studies for `locale`, newest first.
    pub fn case_studies(&self, locale: Locale) -> Vec<&CaseStudy> {
        self.shelves
            .get(&locale)
            .map(|shelf| shelf.sorted.iter().filter_map(|slug| shelf.studies.get(slug)).collect())
            .unwrap_or_default()
    }

    /// A single case study by slug.
    pub fn case_study(&self, locale: Locale, slug: &str) -> Option<&CaseStudy> {
        self.shelves.get(&locale)?.studies.get(slug)
    }

    /// Total number of loaded case studies.
    pub fn len(&self) -> usize {
        self.shelves.values().map(|shelf| shelf.studies.len()).sum()
    }

    /// True when no case study was loaded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn work_dir(content_dir: &Path, locale: Locale) -> PathBuf {
    content_dir.join(locale.as_str()).join("work")
}

fn load_shelf(dir: &Path) -> LocaleShelf {
    let mut shelf = LocaleShelf::default();

    if !dir.exists() {
        tracing::warn!("Case study directory does not exist: {:?}", dir);
        return shelf;
    }

    let Ok(entries) = fs::read_dir(dir) else {
        tracing::error!("Failed to read case study directory {:?}", dir);
        return shelf;
    };

    let matter = Matter::<YAML>::new();

    for entry in entries.flatten() {
        let path = entry.path();

        if path.extension().is_some_and(|ext| ext == "md") {
            match parse_case_study(&path, &matter) {
                Some(study) => {
                    if shelf.studies.contains_key(&study.slug) {
                        tracing::warn!(slug = %study.slug, ?path, "duplicate case study slug, keeping the first");
                        continue;
                    }
                    shelf.sorted.push(study.slug.clone());
                    shelf.studies.insert(study.slug.clone(), study);
                }
                None => tracing::warn!(?path, "skipping case study with invalid frontmatter"),
            }
        }
    }

    // Newest first, then by slug so equal dates keep a stable order
    let studies = &shelf.studies;
    shelf.sorted.sort_by(|a, b| match (studies.get(a), studies.get(b)) {
        (Some(x), Some(y)) => y.date.cmp(&x.date).then_with(|| a.cmp(b)),
        _ => std::cmp::Ordering::Equal,
    });

    shelf
}

fn parse_case_study(path: &Path, matter: &Matter<YAML>) -> Option<CaseStudy> {
    let content = fs::read_to_string(path).ok()?;
    let parsed: ParsedEntity<CaseStudyFrontmatter> = matter.parse(&content).ok()?;

    let frontmatter = parsed.data?;

    let date = NaiveDate::parse_from_str(&frontmatter.date, "%Y-%m-%d").ok()?;

    let parser = Parser::new_ext(&parsed.content, Options::all());
    let mut content_html = String::new();
    html::push_html(&mut content_html, parser);

    Some(CaseStudy {
        slug: frontmatter.slug,
        title: frontmatter.title,
        client: frontmatter.client,
        date,
        excerpt: frontmatter.excerpt,
        services: frontmatter.services,
        content_html,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_study(root: &Path, locale: &str, file: &str, slug: &str, date: &str) {
        let dir = root.join(locale).join("work");
        fs::create_dir_all(&dir).expect("create work dir");
        let body = format!(
            "---\ntitle: Project {slug}\nslug: {slug}\nclient: Acme\ndate: \"{date}\"\nexcerpt: Short summary\nservices:\n  - Branding\n---\n\n## Outcome\n\nIt **worked**.\n"
        );
        fs::write(dir.join(file), body).expect("write study");
    }

    #[test]
    fn loads_and_sorts_newest_first() {
        let root = TempDir::new().expect("temp dir");
        write_study(root.path(), "en", "a.md", "older", "2023-04-01");
        write_study(root.path(), "en", "b.md", "newer", "2024-09-15");
        write_study(root.path(), "fr", "a.md", "projet", "2024-01-01");

        let store = ContentStore::load(root.path());
        let slugs: Vec<&str> = store.case_studies(Locale::En).iter().map(|s| s.slug.as_str()).collect();
        assert_eq!(slugs, vec!["newer", "older"]);
        assert_eq!(store.case_studies(Locale::Fr).len(), 1);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn renders_markdown_and_keeps_frontmatter() {
        let root = TempDir::new().expect("temp dir");
        write_study(root.path(), "en", "a.md", "atlas", "2024-02-10");

        let store = ContentStore::load(root.path());
        let study = store.case_study(Locale::En, "atlas").expect("study loaded");
        assert_eq!(study.client, "Acme");
        assert_eq!(study.services, vec!["Branding".to_string()]);
        assert!(study.content_html.contains("<strong>worked</strong>"));
        assert!(store.case_study(Locale::Fr, "atlas").is_none());
    }

    #[test]
    fn skips_files_with_bad_dates_and_other_extensions() {
        let root = TempDir::new().expect("temp dir");
        write_study(root.path(), "en", "a.md", "broken", "last spring");
        write_study(root.path(), "en", "b.txt", "ignored", "2024-01-01");

        let store = ContentStore::load(root.path());
        assert!(store.is_empty());
    }

    #[test]
    fn missing_directory_yields_empty_store() {
        let root = TempDir::new().expect("temp dir");
        let store = ContentStore::load(&root.path().join("nowhere"));
        assert!(store.case_studies(Locale::En).is_empty());
    }
}
