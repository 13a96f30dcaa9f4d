//! Named-format validator registry.
//!
//! Models validate string fields that declare a named format (`date-time`,
//! `uuid`, ...) through a [`FormatRegistry`] supplied by the caller. The
//! registry is always passed explicitly; there is no process-wide instance.
//!
//! No field of the Tang connectivity records declares a format, so those
//! records never consult the registry. [`StandardFormats`] and
//! [`validate_format`] are an extension for callers layering their own
//! field rules on top of the record traversal.

use std::collections::BTreeMap;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use base64::Engine as _;

use crate::error::{ErrorCode, FieldError};

/// Capability answering whether a value conforms to a named format.
pub trait FormatRegistry: Send + Sync {
    /// Whether `format` is known to this registry.
    fn contains(&self, format: &str) -> bool;

    /// Whether `value` conforms to `format`. Unknown formats return `false`.
    fn validates(&self, format: &str, value: &str) -> bool;
}

type Checker = Box<dyn Fn(&str) -> bool + Send + Sync>;

/// Registry preloaded with the formats shared across API models.
///
/// | Format | Accepts |
/// |--------|---------|
/// | `date-time` | RFC 3339 timestamp |
/// | `uuid` | hyphenated or simple UUID |
/// | `uri` | absolute URL |
/// | `hostname` | RFC 1123 host name |
/// | `byte` | standard base64 with padding |
/// | `ipv4` / `ipv6` | textual IP address |
pub struct StandardFormats {
    checkers: BTreeMap<String, Checker>,
}

impl StandardFormats {
    pub fn new() -> Self {
        let mut formats = Self::empty();
        formats.register("date-time", |v| {
            chrono::DateTime::parse_from_rfc3339(v).is_ok()
        });
        formats.register("uuid", |v| uuid::Uuid::parse_str(v).is_ok());
        formats.register("uri", |v| url::Url::parse(v).is_ok());
        formats.register("hostname", is_hostname);
        formats.register("byte", |v| {
            base64::engine::general_purpose::STANDARD.decode(v).is_ok()
        });
        formats.register("ipv4", |v| v.parse::<Ipv4Addr>().is_ok());
        formats.register("ipv6", |v| v.parse::<Ipv6Addr>().is_ok());
        formats
    }

    /// Registry with no formats.
    pub fn empty() -> Self {
        Self {
            checkers: BTreeMap::new(),
        }
    }

    /// Add or replace a format check.
    pub fn register<F>(&mut self, format: impl Into<String>, check: F) -> &mut Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.checkers.insert(format.into(), Box::new(check));
        self
    }

    /// Builder-style variant of [`register`](Self::register).
    pub fn with_format<F>(mut self, format: impl Into<String>, check: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.register(format, check);
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.checkers.keys().map(String::as_str)
    }
}

impl Default for StandardFormats {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StandardFormats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StandardFormats")
            .field("formats", &self.checkers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl FormatRegistry for StandardFormats {
    fn contains(&self, format: &str) -> bool {
        self.checkers.contains_key(format)
    }

    fn validates(&self, format: &str, value: &str) -> bool {
        self.checkers.get(format).is_some_and(|check| check(value))
    }
}

/// Check `value` at `path` against `format`, producing a labeled error.
pub fn validate_format(
    path: &str,
    format: &str,
    value: &str,
    registry: &dyn FormatRegistry,
) -> Result<(), FieldError> {
    if !registry.contains(format) {
        return Err(FieldError::new(
            path,
            ErrorCode::UnknownFormat,
            format!("unknown format '{format}'"),
        ));
    }
    if !registry.validates(format, value) {
        return Err(FieldError::new(
            path,
            ErrorCode::InvalidFormat,
            format!("must be of type {format}: \"{value}\""),
        ));
    }
    Ok(())
}

fn is_hostname(value: &str) -> bool {
    let host = value.strip_suffix('.').unwrap_or(value);
    if host.is_empty() || host.len() > 253 {
        return false;
    }
    host.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_formats_accept_valid_values() {
        let formats = StandardFormats::new();
        assert!(formats.validates("date-time", "2024-05-01T12:30:00Z"));
        assert!(formats.validates("uuid", "6f1c2a0e-8a5b-4d5e-9c11-1f0e6c2b7a10"));
        assert!(formats.validates("uri", "http://tang1.example.com:7500"));
        assert!(formats.validates("hostname", "tang-1.example.com"));
        assert!(formats.validates("byte", "eyJhbGciOiJFUzUxMiJ9"));
        assert!(formats.validates("ipv4", "192.168.1.10"));
        assert!(formats.validates("ipv6", "fe80::1"));
    }

    #[test]
    fn test_standard_formats_reject_invalid_values() {
        let formats = StandardFormats::new();
        assert!(!formats.validates("date-time", "yesterday"));
        assert!(!formats.validates("uuid", "not-a-uuid"));
        assert!(!formats.validates("uri", "tang1"));
        assert!(!formats.validates("hostname", "-bad-.example"));
        assert!(!formats.validates("byte", "***"));
        assert!(!formats.validates("ipv4", "300.1.1.1"));
        assert!(!formats.validates("ipv6", "fe80:::1::"));
    }

    #[test]
    fn test_unknown_format_never_validates() {
        let formats = StandardFormats::new();
        assert!(!formats.contains("mac"));
        assert!(!formats.validates("mac", "00:11:22:33:44:55"));
    }

    #[test]
    fn test_register_custom_format() {
        let formats = StandardFormats::empty().with_format("tang-url", |v| v.starts_with("http"));
        assert_eq!(formats.names().collect::<Vec<_>>(), vec!["tang-url"]);
        assert!(formats.validates("tang-url", "http://tang1"));
        assert!(!formats.validates("tang-url", "tang1"));
    }

    #[test]
    fn test_validate_format_labels_failure() {
        let formats = StandardFormats::new();
        let err = validate_format("tang_url", "uri", "tang1", &formats).unwrap_err();
        assert_eq!(err.path, "tang_url");
        assert_eq!(err.code, ErrorCode::InvalidFormat);

        let err = validate_format("payload", "jwk", "x", &formats).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownFormat);

        assert!(validate_format("payload", "byte", "YWJj", &formats).is_ok());
    }
}
