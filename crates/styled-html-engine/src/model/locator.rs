use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// A syntactically valid URL reference, absolute or relative.
///
/// Only the shape is checked: non-empty, no whitespace or control
/// characters, none of `< > " { } | \ ^` or backtick, and every `%` starts a
/// two-digit escape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Locator(String);

fn valid_locator() -> &'static Regex {
    static VALID: OnceLock<Regex> = OnceLock::new();
    VALID.get_or_init(|| {
        Regex::new(r#"^(?:[^\s\x00-\x1F\x7F<>"{}|\\^`%]|%[0-9A-Fa-f]{2})+$"#)
            .expect("Invalid locator regex")
    })
}

fn scheme() -> &'static Regex {
    static SCHEME: OnceLock<Regex> = OnceLock::new();
    SCHEME.get_or_init(|| Regex::new(r"^([A-Za-z][A-Za-z0-9+.\-]*):").expect("Invalid scheme regex"))
}

impl Locator {
    pub fn parse(s: &str) -> Option<Self> {
        valid_locator().is_match(s).then(|| Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn scheme(&self) -> Option<&str> {
        scheme()
            .captures(&self.0)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }

    /// The locator as a bare relative path, if it has no scheme, authority,
    /// query or fragment and does not start at the root.
    pub fn relative_path(&self) -> Option<&str> {
        let s = self.0.as_str();
        let plain = self.scheme().is_none()
            && !s.starts_with('/')
            && !s.contains('?')
            && !s.contains('#');
        plain.then_some(s)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
