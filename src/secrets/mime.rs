//! secrets::mime
//!
//! The legacy MIME-style secret format.
//!
//! # Layout
//!
//! ```text
//! PASSGROVE-SECRET-1.0
//! Password: hunter2
//! Url: example.com
//!
//! free-form body text
//! ```
//!
//! An identifier line, RFC-822 style headers up to the first blank line,
//! then the body. The `Password` header carries the primary value;
//! repeated headers accumulate as multi-values.
//!
//! # Failure classification
//!
//! A missing identifier is an ordinary mismatch: the bytes may still be a
//! YAML front-matter secret. A present identifier with broken headers is a
//! *permanent* failure - the marker proves the bytes cannot match any
//! other specific format, so the resolver stops trying them.

use super::{ParseError, Secret};

/// Identifier line marking the legacy MIME format.
pub const MIME_IDENT: &str = "PASSGROVE-SECRET-1.0";

/// Parse bytes as a legacy MIME secret.
pub fn parse_mime(input: &[u8]) -> Result<Secret, ParseError> {
    let text = String::from_utf8_lossy(input);

    let (first, rest) = match text.split_once('\n') {
        Some(split) => split,
        None => {
            if text.trim_end() == MIME_IDENT {
                // identifier only: a valid, completely empty secret
                return Ok(Secret::new());
            }
            return Err(ParseError::NotMime("missing identifier line".into()));
        }
    };

    if first.trim_end() != MIME_IDENT {
        return Err(ParseError::NotMime("missing identifier line".into()));
    }

    let mut sec = Secret::new();
    let mut rest = rest;

    loop {
        let (line, tail) = match rest.split_once('\n') {
            Some(split) => split,
            None => (rest, ""),
        };
        let done = tail.is_empty() && !rest.contains('\n');

        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            // blank line ends the header block; the remainder is the body
            sec.set_body(tail);
            break;
        }

        let (key, value) = line.split_once(':').ok_or_else(|| {
            ParseError::Permanent(format!("header line {} has no colon", short(line)))
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(ParseError::Permanent("header line has an empty key".into()));
        }
        let value = value.trim();

        if key.eq_ignore_ascii_case("password") {
            sec.set_password(value);
        } else {
            sec.add(key, value);
        }

        if done {
            break;
        }
        rest = tail;
    }

    Ok(sec)
}

/// Describe a header line by position only; header lines may name secret
/// keys, so the content itself stays out of error messages.
fn short(line: &str) -> String {
    format!("of {} bytes", line.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_secret() {
        let input = b"PASSGROVE-SECRET-1.0\nPassword: hunter2\nUrl: example.com\n\nnotes\n";
        let sec = parse_mime(input).expect("parse");
        assert_eq!(sec.password(), "hunter2");
        assert_eq!(sec.get("Url"), Some("example.com"));
        assert_eq!(sec.body(), "notes\n");
    }

    #[test]
    fn headers_without_body() {
        let input = b"PASSGROVE-SECRET-1.0\nPassword: pw\nUser: alice";
        let sec = parse_mime(input).expect("parse");
        assert_eq!(sec.password(), "pw");
        assert_eq!(sec.get("User"), Some("alice"));
        assert_eq!(sec.body(), "");
    }

    #[test]
    fn repeated_headers_accumulate() {
        let input = b"PASSGROVE-SECRET-1.0\nUrl: a.example.com\nUrl: b.example.com\n";
        let sec = parse_mime(input).expect("parse");
        assert_eq!(
            sec.values("Url").unwrap(),
            ["a.example.com", "b.example.com"]
        );
    }

    #[test]
    fn crlf_line_endings() {
        let input = b"PASSGROVE-SECRET-1.0\r\nPassword: pw\r\n\r\nbody";
        let sec = parse_mime(input).expect("parse");
        assert_eq!(sec.password(), "pw");
        assert_eq!(sec.body(), "body");
    }

    #[test]
    fn missing_identifier_is_transient() {
        let err = parse_mime(b"pw\nUrl: example.com\n").unwrap_err();
        assert!(!err.is_permanent());
    }

    #[test]
    fn broken_header_is_permanent() {
        let input = b"PASSGROVE-SECRET-1.0\nPassword: pw\nnot a header\n";
        let err = parse_mime(input).unwrap_err();
        assert!(err.is_permanent());
    }

    #[test]
    fn header_value_stays_out_of_errors() {
        let input = b"PASSGROVE-SECRET-1.0\ntopsecretvalue\n";
        let err = parse_mime(input).unwrap_err();
        assert!(!err.to_string().contains("topsecretvalue"));
    }

    #[test]
    fn identifier_only() {
        let sec = parse_mime(b"PASSGROVE-SECRET-1.0").expect("parse");
        assert!(sec.is_empty());
    }
}
