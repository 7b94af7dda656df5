//! Property-based tests for the secret format resolver.
//!
//! These tests use proptest to verify invariants hold across randomly
//! generated inputs.

use proptest::prelude::*;

use passgrove::secrets::{parse, parse_akv, Secret};

proptest! {
    /// The resolver yields a usable secret for any byte sequence.
    #[test]
    fn parse_is_total(input in prop::collection::vec(any::<u8>(), 0..512)) {
        let _secret = parse(&input).into_secret();
    }

    /// The catch-all parser keeps the entire input: password line plus
    /// body account for every character of valid UTF-8 input.
    #[test]
    fn akv_drops_nothing(input in "[ -~\n]{0,256}") {
        let secret = parse_akv(input.as_bytes());
        let separator = usize::from(input.contains('\n'));
        assert_eq!(
            secret.password().len() + secret.body().len() + separator,
            input.len()
        );
        prop_assert!(input.ends_with(secret.body()));
    }

    /// Serializing a parsed secret and parsing it again preserves
    /// password, fields, and body.
    #[test]
    fn serialize_parse_round_trip(
        password in "[a-zA-Z0-9!@#%^&*]{0,32}",
        keys in prop::collection::vec("[a-zA-Z][a-zA-Z0-9_]{0,12}", 0..5),
        value in "[a-zA-Z0-9]{1,24}",
        body in "[a-zA-Z0-9 \n]{0,64}",
    ) {
        let mut secret = Secret::with_password(password);
        for key in &keys {
            secret.add(key.clone(), value.clone());
        }
        // body text always ends on a line of its own
        if !body.is_empty() {
            secret.set_body(format!("{}\n", body.trim_end_matches('\n')));
        }

        let reparsed = parse(&secret.bytes()).into_secret();
        prop_assert_eq!(reparsed, secret);
    }

    /// Unstructured single-line input becomes the password, untouched.
    #[test]
    fn bare_line_is_the_password(line in "[ -~]{0,64}") {
        prop_assume!(line.trim_end() != passgrove::secrets::MIME_IDENT);
        let secret = parse(line.as_bytes()).into_secret();
        prop_assert_eq!(secret.password(), line.trim_end_matches('\r'));
    }
}
