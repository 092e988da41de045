//! Locale Resolution
//!
//! Every page lives under a `/{locale}` prefix. Requests without one are
//! permanently redirected to the locale picked from, in order:
//!
//! 1. the `NEXT_LOCALE` cookie, when it names a supported tag
//! 2. the `Accept-Language` header, first supported tag found in it
//! 3. [`DEFAULT_LOCALE`]
//!
//! Static assets, API routes and internal paths are never redirected.

use std::{fmt, str::FromStr};

use axum::{
    body::Body,
    http::{header::ACCEPT_LANGUAGE, Request},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cookie holding the visitor's chosen locale.
pub const LOCALE_COOKIE: &str = "NEXT_LOCALE";

/// Locale used when no request signal names a supported one.
pub const DEFAULT_LOCALE: Locale = Locale::En;

/// Path prefixes that are served without a locale segment.
const RESERVED_PREFIXES: &[&str] = &["/api", "/public", "/_"];

/// A supported locale tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Fr,
}

/// Returned when a string is not a supported locale tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported locale: {0}")]
pub struct UnknownLocale(pub String);

impl Locale {
    /// All supported locales, default first.
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Fr];

    /// The two-letter tag, also used as the URL prefix.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fr => "fr",
        }
    }

    /// The other supported locale, used by the language switcher.
    pub const fn alternate(self) -> Self {
        match self {
            Self::En => Self::Fr,
            Self::Fr => Self::En,
        }
    }

    /// Value for the `lang` attribute and `hreflang` links.
    pub const fn html_lang(self) -> &'static str {
        self.as_str()
    }

    /// Parses a language tag such as `fr-BE` or `en_US` by its primary subtag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag.trim().split(['-', '_']).next()?;
        Self::ALL
            .into_iter()
            .find(|locale| primary.eq_ignore_ascii_case(locale.as_str()))
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|locale| trimmed.eq_ignore_ascii_case(locale.as_str()))
            .ok_or_else(|| UnknownLocale(s.to_string()))
    }
}

/// The parts of a request the resolver looks at.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocaleRequest<'a> {
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub cookie: Option<&'a str>,
    pub accept_language: Option<&'a str>,
}

/// What to do with a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Serve the request as is.
    PassThrough,
    /// Redirect to `location`, which carries the `locale` prefix.
    Redirect { locale: Locale, location: String },
}

/// Decides whether a request needs a locale prefix and, if so, which one.
pub fn resolve(request: &LocaleRequest<'_>) -> Resolution {
    if locale_prefix(request.path).is_some() || is_reserved(request.path) {
        return Resolution::PassThrough;
    }

    let locale = detect(request.cookie, request.accept_language);

    let mut location = if request.path.is_empty() || request.path == "/" {
        format!("/{locale}")
    } else {
        format!("/{locale}{}", request.path)
    };
    if let Some(query) = request.query.filter(|q| !q.is_empty()) {
        location.push('?');
        location.push_str(query);
    }

    Resolution::Redirect { locale, location }
}

/// Picks a locale from the cookie, then the header, then the default.
pub fn detect(cookie: Option<&str>, accept_language: Option<&str>) -> Locale {
    cookie
        .and_then(|value| value.parse().ok())
        .or_else(|| accept_language.and_then(from_accept_language))
        .unwrap_or(DEFAULT_LOCALE)
}

/// Finds the supported tag that occurs earliest in an `Accept-Language` value.
///
/// Matching is by substring, so `fr-BE,fr;q=0.9` yields `fr`. Anything that
/// contains no supported tag yields `None`.
pub fn from_accept_language(header: &str) -> Option<Locale> {
    let header = header.to_ascii_lowercase();
    Locale::ALL
        .into_iter()
        .filter_map(|locale| header.find(locale.as_str()).map(|at| (at, locale)))
        .min_by_key(|(at, _)| *at)
        .map(|(_, locale)| locale)
}

/// Returns the locale a path is prefixed with, if any.
///
/// Only whole segments count: `/en` and `/en/work` match, `/english` does not.
pub fn locale_prefix(path: &str) -> Option<Locale> {
    let rest = path.strip_prefix('/')?;
    Locale::ALL.into_iter().find(|locale| {
        rest.strip_prefix(locale.as_str())
            .is_some_and(|tail| tail.is_empty() || tail.starts_with('/'))
    })
}

/// Splits a prefixed path into its locale and the remainder.
///
/// `/fr/services` becomes `(Some(Fr), "/services")` and `/fr` becomes
/// `(Some(Fr), "")`. Unprefixed paths come back unchanged.
pub fn strip_locale_prefix(path: &str) -> (Option<Locale>, &str) {
    match locale_prefix(path) {
        Some(locale) => (Some(locale), &path[1 + locale.as_str().len()..]),
        None => (None, path),
    }
}

/// Static assets, API and internal routes.
fn is_reserved(path: &str) -> bool {
    path.contains('.')
        || path.contains("favicon")
        || RESERVED_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

/// Middleware redirecting unprefixed page requests to a localized URL.
pub async fn redirect_unprefixed(jar: CookieJar, request: Request<Body>, next: Next) -> Response {
    let resolution = resolve(&LocaleRequest {
        path: request.uri().path(),
        query: request.uri().query(),
        cookie: jar.get(LOCALE_COOKIE).map(|cookie| cookie.value()),
        accept_language: request
            .headers()
            .get(ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok()),
    });

    match resolution {
        Resolution::PassThrough => next.run(request).await,
        Resolution::Redirect { locale, location } => {
            tracing::debug!(%locale, from = %request.uri(), to = %location, "locale redirect");
            Redirect::permanent(&location).into_response()
        }
    }
}
