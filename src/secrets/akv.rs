//! secrets::akv
//!
//! The catch-all secret format: first line is the password, everything
//! after it is opaque body text. No structured key extraction happens
//! here, which is what makes this parser total.

use super::Secret;

/// Parse any byte sequence as a catch-all secret.
///
/// This never fails. Empty input yields an empty secret.
pub fn parse_akv(input: &[u8]) -> Secret {
    let text = String::from_utf8_lossy(input);

    let mut sec = Secret::new();
    match text.split_once('\n') {
        Some((first, rest)) => {
            sec.set_password(first.trim_end_matches('\r'));
            sec.set_body(rest);
        }
        None => sec.set_password(text.trim_end_matches('\r')),
    }

    sec
}
