//! # linkmeta-pattern
//!
//! Compiles glob-style URL templates, as found in oEmbed provider lists, into
//! anchored regular expressions and tests candidate URLs against them.
//!
//! ## Pattern language
//!
//! A pattern has the shape `scheme://domain/path`:
//!
//! - Scheme and literal characters match exactly.
//! - In the domain, `*.` matches an optional single subdomain label, so
//!   `*.example.com` matches both `example.com` and `www.example.com`. A
//!   bare `*` matches any run of characters.
//! - In the path, `*` matches any run of characters.
//! - Matching is anchored at the start of the URL only. A URL that merely
//!   begins with a match of the pattern also matches.
//!
//! ## Quick Start
//!
//! ```
//! use linkmeta_pattern::UrlPattern;
//!
//! let pattern = UrlPattern::compile("http://*.example.com/*").unwrap();
//!
//! assert!(pattern.matches("http://sub.example.com/p"));
//! assert!(pattern.matches("http://example.com/p"));
//! assert!(!pattern.matches("http://notexample.com/p"));
//! ```

use std::fmt;
use std::str::FromStr;

use regex::Regex;

/// Matches an optional single subdomain label, used for a `*.` domain prefix.
const OPTIONAL_LABEL: &str = "(?:[^.]+\\.)?";

/// Matches any run of characters, shortest first.
const ANY: &str = ".*?";

/// Errors produced while compiling a pattern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    /// The pattern does not have the `scheme://domain/path` shape.
    #[error("pattern {0:?} has no scheme separator")]
    MissingScheme(String),

    /// The generated expression was rejected by the regex engine.
    #[error("pattern {pattern:?} does not compile: {reason}")]
    Invalid { pattern: String, reason: String },
}

/// A compiled URL pattern.
///
/// Compilation is pure: the same source string always yields the same
/// matching behavior. The source string is kept for display and equality.
#[derive(Debug, Clone)]
pub struct UrlPattern {
    source: String,
    regex: Regex,
}

impl UrlPattern {
    /// Compile a glob-style pattern.
    pub fn compile(pattern: &str) -> Result<Self, PatternError> {
        let parts = split(pattern)?;

        let mut expr = String::with_capacity(pattern.len() * 2);
        expr.push('^');
        expr.push_str(&regex::escape(parts.scheme));
        expr.push_str("://");
        push_domain(&mut expr, parts.domain);
        push_path(&mut expr, parts.path);

        let regex = Regex::new(&expr).map_err(|e| PatternError::Invalid {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// Test a candidate URL against this pattern.
    pub fn matches(&self, url: &str) -> bool {
        self.regex.is_match(url)
    }

    /// The pattern string this was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl PartialEq for UrlPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for UrlPattern {}

impl fmt::Display for UrlPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for UrlPattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}

/// Compile a glob-style pattern. Shorthand for [`UrlPattern::compile`].
pub fn compile(pattern: &str) -> Result<UrlPattern, PatternError> {
    UrlPattern::compile(pattern)
}

/// Test a candidate URL against a compiled pattern.
pub fn matches(pattern: &UrlPattern, url: &str) -> bool {
    pattern.matches(url)
}

struct Parts<'a> {
    scheme: &'a str,
    domain: &'a str,
    path: &'a str,
}

/// Split into scheme, domain, and path.
///
/// The scheme runs up to the first `:`, which must be followed by `/` and an
/// optional second `/`. The domain runs up to the first `/` or `?`.
fn split(pattern: &str) -> Result<Parts<'_>, PatternError> {
    let missing = || PatternError::MissingScheme(pattern.to_string());

    let (scheme, rest) = pattern.split_once(':').ok_or_else(missing)?;
    let rest = rest.strip_prefix('/').ok_or_else(missing)?;
    let rest = rest.strip_prefix('/').unwrap_or(rest);

    let domain_end = rest.find(['/', '?']).unwrap_or(rest.len());
    let (domain, path) = rest.split_at(domain_end);

    Ok(Parts {
        scheme,
        domain,
        path,
    })
}

fn push_domain(expr: &mut String, domain: &str) {
    let mut chars = domain.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '*' {
            if chars.peek() == Some(&'.') {
                chars.next();
                expr.push_str(OPTIONAL_LABEL);
            } else {
                expr.push_str(ANY);
            }
        } else {
            push_literal(expr, c);
        }
    }
}

fn push_path(expr: &mut String, path: &str) {
    for c in path.chars() {
        if c == '*' {
            expr.push_str(ANY);
        } else {
            push_literal(expr, c);
        }
    }
}

fn push_literal(expr: &mut String, c: char) {
    let mut buf = [0u8; 4];
    expr.push_str(&regex::escape(c.encode_utf8(&mut buf)));
}
