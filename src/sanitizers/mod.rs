//! Site-specific HTML sanitizers and their dispatch registry.
//!
//! A sanitizer extracts readable article text from raw page markup. Each
//! supported site gets its own submodule with a single `sanitize` function;
//! dispatch happens through [`SanitizerRegistry`], keyed by the article URL's
//! normalized host.
//!
//! # Host keys
//!
//! The registry key is the URL's host component with every `.` collapsed to
//! `_`, so `https://www.inosmi.ru/...` looks up `www_inosmi_ru`. The port is
//! not part of the key.
//!
//! # Supported Sites
//!
//! | Site | Module | Keys |
//! |------|--------|------|
//! | ИноСМИ | [`inosmi`] | `inosmi_ru`, `www_inosmi_ru` |
//!
//! The registry is open: callers can [`register`](SanitizerRegistry::register)
//! additional sanitizers, which is also how tests plug in fake sites.

pub mod inosmi;

use std::collections::HashMap;
use thiserror::Error;
use url::Url;

/// A site-specific text extractor: `sanitize(markup, plaintext)`.
///
/// With `plaintext = true` the result is readable plain text; otherwise it
/// is the cleaned article markup.
pub type Sanitizer = fn(&str, bool) -> String;

/// Why a sanitizer lookup failed. Both cases surface as `PARSING_ERROR` in
/// the article report.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    /// The URL could not be parsed or has no host component.
    #[error("url has no parseable host: {0}")]
    MalformedUrl(String),
    /// No sanitizer is registered under the derived host key.
    #[error("no sanitizer registered for host key {0}")]
    UnregisteredHost(String),
}

/// Derive the registry key from a URL: the host with `.` collapsed to `_`.
pub fn host_key(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(host.replace('.', "_"))
}

/// Maps normalized host keys to sanitizer functions.
#[derive(Debug, Clone)]
pub struct SanitizerRegistry {
    sanitizers: HashMap<String, Sanitizer>,
}

impl Default for SanitizerRegistry {
    /// Registry with all built-in site sanitizers.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("inosmi_ru", inosmi::sanitize as Sanitizer);
        registry.register("www_inosmi_ru", inosmi::sanitize as Sanitizer);
        registry
    }
}

impl SanitizerRegistry {
    /// Registry with no sanitizers at all.
    pub fn empty() -> Self {
        Self {
            sanitizers: HashMap::new(),
        }
    }

    /// Register a sanitizer under a host key, replacing any previous entry.
    pub fn register(&mut self, key: impl Into<String>, sanitizer: Sanitizer) {
        self.sanitizers.insert(key.into(), sanitizer);
    }

    /// Resolve the sanitizer for an article URL.
    pub fn lookup(&self, url: &str) -> Result<Sanitizer, LookupError> {
        let key = host_key(url).ok_or_else(|| LookupError::MalformedUrl(url.to_string()))?;
        self.sanitizers
            .get(&key)
            .copied()
            .ok_or(LookupError::UnregisteredHost(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_key_collapses_dots() {
        assert_eq!(
            host_key("https://www.inosmi.ru/20220204/armiya.html").as_deref(),
            Some("www_inosmi_ru")
        );
        assert_eq!(host_key("https://inosmi.ru/").as_deref(), Some("inosmi_ru"));
    }

    #[test]
    fn test_host_key_ignores_port() {
        assert_eq!(
            host_key("http://127.0.0.1:8080/article").as_deref(),
            Some("127_0_0_1")
        );
    }

    #[test]
    fn test_host_key_rejects_garbage() {
        assert_eq!(host_key("not a url"), None);
    }

    #[test]
    fn test_default_registry_resolves_inosmi() {
        let registry = SanitizerRegistry::default();
        assert!(registry.lookup("https://inosmi.ru/20220204/armiya.html").is_ok());
        assert!(registry.lookup("https://www.inosmi.ru/x.html").is_ok());
    }

    #[test]
    fn test_lookup_unregistered_host() {
        let registry = SanitizerRegistry::default();
        let err = registry.lookup("https://lenta.ru/news/").unwrap_err();
        assert_eq!(err, LookupError::UnregisteredHost("lenta_ru".to_string()));
    }

    #[test]
    fn test_lookup_malformed_url() {
        let registry = SanitizerRegistry::default();
        let err = registry.lookup("not a url").unwrap_err();
        assert_eq!(err, LookupError::MalformedUrl("not a url".to_string()));
    }

    #[test]
    fn test_register_extends_the_registry() {
        fn passthrough(markup: &str, _plaintext: bool) -> String {
            markup.to_string()
        }

        let mut registry = SanitizerRegistry::empty();
        registry.register("example_com", passthrough);
        let sanitize = registry.lookup("https://example.com/a").unwrap();
        assert_eq!(sanitize("<p>hi</p>", true), "<p>hi</p>");
    }
}
