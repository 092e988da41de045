//! Askama Templates
//!
//! Template structs for rendering HTML pages and the sitemap. Every page
//! carries a [`Page`] with the locale, its dictionary and the data the shared
//! layout needs.

use std::sync::Arc;

use askama::Template;
use askama_web::WebTemplate;

use crate::{
    content::CaseStudy,
    i18n::{Dictionary, Record},
    locale::Locale,
    seo::SitemapEntry,
    state::AppState,
};

/// Cache-busting token produced by the build script.
pub const BUILD_VERSION: &str = env!("BUILD_VERSION");

/// Stylesheet under `/public/css`: the minified copy when the build script
/// produced one, the source file otherwise.
pub const STYLESHEET: &str = env!("SITE_STYLESHEET");

/// Layout data shared by every page.
pub struct Page {
    pub locale: Locale,
    pub i18n: Arc<Dictionary>,
    pub title: String,
    /// Path below the locale prefix, `""` for the home page.
    pub path: String,
    /// Navigation entry to highlight.
    pub active: &'static str,
    /// Connect to the live reload endpoint.
    pub live_reload: bool,
    base_url: String,
}

impl Page {
    /// Builds the layout data for `path` under `locale`. `title_key` names
    /// the dictionary entry holding the page title.
    pub fn new(state: &AppState, locale: Locale, title_key: &str, path: impl Into<String>, active: &'static str) -> Self {
        let i18n = state.dictionary(locale);
        let title = i18n.t(title_key).to_string();
        Self {
            locale,
            i18n,
            title,
            path: path.into(),
            active,
            live_reload: cfg!(debug_assertions) && state.config().live_reload,
            base_url: state.config().base_url.clone(),
        }
    }

    /// Overrides the title, e.g. with a case study name.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Translated string.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.i18n.t(key)
    }

    /// Translated string list.
    pub fn list(&self, key: &str) -> Vec<&str> {
        self.i18n.list(key)
    }

    /// Translated object list.
    pub fn records(&self, key: &str) -> Vec<Record<'_>> {
        self.i18n.records(key)
    }

    /// `lang` attribute of the document.
    pub fn lang(&self) -> &'static str {
        self.locale.html_lang()
    }

    /// Link to another page in the current locale.
    pub fn href(&self, path: &str) -> String {
        format!("/{}{}", self.locale, path)
    }

    /// Link to this page in the other locale.
    pub fn switch_href(&self) -> String {
        format!("/{}{}", self.locale.alternate(), self.path)
    }

    /// `lang` of the other locale.
    pub fn switch_lang(&self) -> &'static str {
        self.locale.alternate().html_lang()
    }

    /// Absolute URL of this page.
    pub fn canonical(&self) -> String {
        format!("{}/{}{}", self.base_url, self.locale, self.path)
    }

    /// `(hreflang, absolute URL)` for every locale version of this page.
    pub fn alternates(&self) -> Vec<(&'static str, String)> {
        Locale::ALL
            .into_iter()
            .map(|locale| (locale.html_lang(), format!("{}/{}{}", self.base_url, locale, self.path)))
            .collect()
    }

    /// Query string appended to static asset URLs.
    pub fn asset_version(&self) -> &'static str {
        BUILD_VERSION
    }

    /// Stylesheet file name under `/public/css`.
    pub fn stylesheet(&self) -> &'static str {
        STYLESHEET
    }

    /// Current year for the footer.
    pub fn year(&self) -> i32 {
        use chrono::Datelike;
        chrono::Utc::now().year()
    }
}

/// Case study card data for listings.
pub struct StudySummary {
    pub slug: String,
    pub title: String,
    pub client: String,
    pub date: String,
    pub excerpt: String,
    pub services: Vec<String>,
}

impl StudySummary {
    /// Builds the card for a case study, formatting its date for `locale`.
    pub fn new(study: &CaseStudy, locale: Locale) -> Self {
        Self {
            slug: study.slug.clone(),
            title: study.title.clone(),
            client: study.client.clone(),
            date: format_date(study, locale),
            excerpt: study.excerpt.clone(),
            services: study.services.clone(),
        }
    }
}

fn format_date(study: &CaseStudy, locale: Locale) -> String {
    match locale {
        Locale::En => study.date.format("%B %-d, %Y").to_string(),
        Locale::Fr => study.date.format("%d/%m/%Y").to_string(),
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub page: Page,
    pub studies: Vec<StudySummary>,
}

/// Services page template.
#[derive(Template, WebTemplate)]
#[template(path = "services.html")]
pub struct ServicesTemplate {
    pub page: Page,
}

/// Case study list page template.
#[derive(Template, WebTemplate)]
#[template(path = "work/index.html")]
pub struct WorkListTemplate {
    pub page: Page,
    pub studies: Vec<StudySummary>,
}

/// Individual case study template.
#[derive(Template, WebTemplate)]
#[template(path = "work/study.html")]
pub struct CaseStudyTemplate {
    pub page: Page,
    pub study: StudySummary,
    pub content_html: String,
}

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub page: Page,
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub page: Page,
}

/// Localized 404 page template.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub page: Page,
}

/// `sitemap.xml`. The `.xml` extension keeps askama's escaping on.
#[derive(Template, WebTemplate)]
#[template(path = "sitemap.xml")]
pub struct SitemapTemplate {
    pub entries: Vec<SitemapEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(debug_assertions)]
    fn debug_builds_link_the_source_stylesheet() {
        assert_eq!(STYLESHEET, "style.css");
    }

    #[test]
    fn stylesheet_is_a_css_file() {
        assert!(STYLESHEET.starts_with("style"));
        assert!(STYLESHEET.ends_with(".css"));
    }
}
