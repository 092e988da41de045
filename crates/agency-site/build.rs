//! Build script for agency-site
//!
//! - Exposes `BUILD_VERSION` (git short hash, else build timestamp) for
//!   cache busting of static assets
//! - In release builds, writes a minified `style.min.css` with lightningcss
//! - Exposes `SITE_STYLESHEET`, the file `base.html` links: `style.min.css`
//!   when minification succeeded, `style.css` otherwise

use std::process::Command;

const CSS_DIR: &str = "../../public/css";

fn main() {
    println!("cargo:rerun-if-changed={CSS_DIR}");
    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-changed=templates");
    println!("cargo:rerun-if-changed=locales");

    println!("cargo:rustc-env=BUILD_VERSION={}", build_version());

    #[cfg(not(debug_assertions))]
    let minified = minify_css(std::path::Path::new(CSS_DIR));
    #[cfg(debug_assertions)]
    let minified = false;

    let stylesheet = if minified { "style.min.css" } else { "style.css" };
    println!("cargo:rustc-env=SITE_STYLESHEET={stylesheet}");
}

fn build_version() -> String {
    git_short_hash().unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| format!("{:x}", d.as_secs()))
            .unwrap_or_else(|_| "dev".to_string())
    })
}

fn git_short_hash() -> Option<String> {
    let output = Command::new("git").args(["rev-parse", "--short=8", "HEAD"]).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?;
    let hash = hash.trim();
    (!hash.is_empty()).then(|| hash.to_string())
}

#[cfg(not(debug_assertions))]
fn minify_css(css_dir: &std::path::Path) -> bool {
    use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};

    let Ok(css) = std::fs::read_to_string(css_dir.join("style.css")) else {
        return false;
    };
    let Ok(mut stylesheet) = StyleSheet::parse(&css, ParserOptions::default()) else {
        println!("cargo:warning=style.css did not parse, skipping minification");
        return false;
    };
    if stylesheet.minify(MinifyOptions::default()).is_err() {
        return false;
    }
    let printer = PrinterOptions {
        minify: true,
        ..Default::default()
    };
    match stylesheet.to_css(printer) {
        Ok(result) => std::fs::write(css_dir.join("style.min.css"), result.code).is_ok(),
        Err(_) => false,
    }
}
