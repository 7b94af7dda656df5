//! secrets
//!
//! Secret model and the format resolver.
//!
//! # Overview
//!
//! A stored entry decrypts to raw bytes in one of three formats:
//!
//! - [`parse_mime`] - the legacy MIME-style format with an identifier
//!   line and RFC-822 style headers
//! - [`parse_yaml`] - a password line followed by a `---`-delimited
//!   key/value block
//! - [`parse_akv`] - the catch-all format: password line plus opaque body
//!
//! [`parse`] tries them in that order and always yields a usable secret;
//! see [`ParseOutcome`] for how degraded parses are signalled.
//!
//! # Invariants
//!
//! - Re-serializing a parsed secret never drops body text, even when the
//!   input only matched the catch-all format.
//! - Repeated keys are preserved as an ordered list, never collapsed.
//!
//! # Security
//!
//! Parse errors carry structural descriptions only, never input bytes.

mod akv;
mod mime;
mod parse;
mod yaml;

pub use akv::parse_akv;
pub use mime::{parse_mime, MIME_IDENT};
pub use parse::{must_parse, parse, ParseOutcome};
pub use yaml::parse_yaml;

use thiserror::Error;

/// Errors from secret parsing.
///
/// Only [`ParseError::Permanent`] short-circuits the resolver; the other
/// variants mean "try the next format".
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input lacks the legacy MIME identifier line.
    #[error("not a legacy MIME secret: {0}")]
    NotMime(String),

    /// The input carries the legacy MIME identifier but is structurally
    /// broken. The identifier proves it cannot match any other specific
    /// format, so the resolver skips straight to the catch-all.
    #[error("malformed legacy MIME secret: {0}")]
    Permanent(String),

    /// The input has no `---`-delimited front matter, or the block inside
    /// it is malformed.
    #[error("not a YAML front-matter secret: {0}")]
    NotYaml(String),
}

impl ParseError {
    /// Whether this failure proves the input can never match a more
    /// specific format.
    pub fn is_permanent(&self) -> bool {
        matches!(self, ParseError::Permanent(_))
    }
}

/// A structured secret.
///
/// Every format resolves into this shape: a primary password, an ordered
/// multi-valued field list, and opaque leftover body text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Secret {
    password: String,
    fields: Vec<(String, Vec<String>)>,
    body: String,
}

impl Secret {
    /// Create an empty secret.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a secret holding only a password.
    pub fn with_password(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            ..Self::default()
        }
    }

    /// The primary content value.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Replace the password.
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }

    /// First value for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values(key).and_then(|vs| vs.first()).map(String::as_str)
    }

    /// All values for `key`, in insertion order.
    pub fn values(&self, key: &str) -> Option<&[String]> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, vs)| vs.as_slice())
    }

    /// Replace all values for `key` with a single value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, vs)) => *vs = vec![value],
            None => self.fields.push((key, vec![value])),
        }
    }

    /// Append a value for `key`, preserving earlier values.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some((_, vs)) => vs.push(value),
            None => self.fields.push((key, vec![value])),
        }
    }

    /// Field keys, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// Opaque leftover body text.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Replace the body text.
    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    /// Whether the secret holds nothing at all.
    pub fn is_empty(&self) -> bool {
        self.password.is_empty() && self.fields.is_empty() && self.body.is_empty()
    }

    /// Serialize the secret for storage.
    ///
    /// Secrets with structured fields serialize as YAML front matter;
    /// secrets without serialize as password line plus body. Legacy MIME
    /// secrets are upgraded to front matter on the next write.
    pub fn bytes(&self) -> Vec<u8> {
        if self.is_empty() {
            return Vec::new();
        }

        let mut out = String::new();
        out.push_str(&self.password);
        out.push('\n');

        if !self.fields.is_empty() {
            out.push_str("---\n");
            for (key, values) in &self.fields {
                for value in values {
                    out.push_str(key);
                    out.push_str(": ");
                    out.push_str(value);
                    out.push('\n');
                }
            }
            if !self.body.is_empty() {
                out.push_str("---\n");
            }
        }

        out.push_str(&self.body);
        out.into_bytes()
    }
}
