//! secrets::yaml
//!
//! The YAML front-matter secret format.
//!
//! # Layout
//!
//! ```text
//! hunter2
//! ---
//! user: alice
//! url: example.com
//! ---
//! free-form body text
//! ```
//!
//! First line is the password, a `---` line opens the key/value block, an
//! optional second `---` ends it; everything after that is body text.
//! Repeated keys accumulate as multi-values.
//!
//! All failures here are transient: bytes that are not front matter may
//! still parse under the catch-all format.

use super::{ParseError, Secret};

/// Parse bytes as a YAML front-matter secret.
pub fn parse_yaml(input: &[u8]) -> Result<Secret, ParseError> {
    let text = String::from_utf8_lossy(input);

    let (first, rest) = text
        .split_once('\n')
        .ok_or_else(|| ParseError::NotYaml("no front-matter separator".into()))?;

    let block = if let Some(block) = rest.strip_prefix("---\n") {
        block
    } else if rest.trim_end() == "---" {
        ""
    } else {
        return Err(ParseError::NotYaml("missing --- separator".into()));
    };

    let mut sec = Secret::with_password(first.trim_end_matches('\r'));

    let mut rest = block;
    while !rest.is_empty() {
        let (line, tail) = match rest.split_once('\n') {
            Some(split) => split,
            None => (rest, ""),
        };

        let line = line.trim_end_matches('\r');
        if line.trim_end() == "---" {
            // end of the block; the remainder is the body
            sec.set_body(tail);
            return Ok(sec);
        }

        if !line.is_empty() {
            let (key, value) = line.split_once(':').ok_or_else(|| {
                ParseError::NotYaml("block line is not a key/value pair".into())
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(ParseError::NotYaml("block line has an empty key".into()));
            }
            sec.add(key, value.trim());
        }

        rest = tail;
    }

    Ok(sec)
}
