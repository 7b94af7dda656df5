//! secrets::parse
//!
//! The format resolver: an ordered attempt chain over the specific
//! formats, falling back to the catch-all parser that always succeeds.
//!
//! # Resolution order
//!
//! 1. Legacy MIME. Success wins outright.
//! 2. If the MIME failure was *permanent* (identifier present, structure
//!    broken), skip YAML and return the catch-all secret together with the
//!    permanent error.
//! 3. YAML front matter. Success wins.
//! 4. Catch-all, which cannot fail.
//!
//! Every outcome carries a usable secret; an attached error only signals
//! that the input had structure the specific parsers could not honor.

use super::{akv, mime, yaml, ParseError, Secret};

/// Result of resolving raw bytes into a secret.
///
/// The dual "secret plus error" shape of [`ParseOutcome::Unrecognizable`]
/// is deliberate: callers decide whether a degraded parse is a note or a
/// failure, the resolver does not.
#[derive(Debug)]
pub enum ParseOutcome {
    /// A specific format parser accepted the bytes.
    Recognized(Secret),

    /// A specific parser proved the bytes can never match any specific
    /// format; the catch-all secret is returned alongside the proof.
    Unrecognizable {
        /// The catch-all rendering of the input.
        secret: Secret,
        /// Why the specific parse is permanently impossible.
        error: ParseError,
    },

    /// No specific parser matched; the catch-all format applied cleanly.
    Fallback(Secret),
}

impl ParseOutcome {
    /// Consume the outcome, yielding the secret regardless of degradation.
    pub fn into_secret(self) -> Secret {
        match self {
            ParseOutcome::Recognized(secret)
            | ParseOutcome::Unrecognizable { secret, .. }
            | ParseOutcome::Fallback(secret) => secret,
        }
    }

    /// The degraded-parse signal, if any.
    pub fn error(&self) -> Option<&ParseError> {
        match self {
            ParseOutcome::Unrecognizable { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Resolve raw bytes into a structured secret.
///
/// Always yields a usable secret; see [`ParseOutcome`].
pub fn parse(input: &[u8]) -> ParseOutcome {
    match mime::parse_mime(input) {
        Ok(secret) => return ParseOutcome::Recognized(secret),
        Err(error) if error.is_permanent() => {
            return ParseOutcome::Unrecognizable {
                secret: akv::parse_akv(input),
                error,
            };
        }
        Err(_) => {}
    }

    match yaml::parse_yaml(input) {
        Ok(secret) => ParseOutcome::Recognized(secret),
        Err(_) => ParseOutcome::Fallback(akv::parse_akv(input)),
    }
}

/// Parse a secret or panic on a degraded outcome.
///
/// Test helper only; production callers use [`parse`] and decide what a
/// degraded parse means for them.
pub fn must_parse(input: &str) -> Secret {
    match parse(input.as_bytes()) {
        ParseOutcome::Unrecognizable { error, .. } => {
            panic!("failed to parse secret: {error}")
        }
        outcome => outcome.into_secret(),
    }
}
