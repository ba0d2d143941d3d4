//! The authentication gate.
//!
//! A pure decision function: given the credential candidates extracted from
//! one connection attempt and the configured secret, decide accept or
//! reject. Callers perform the actual accept/reject action and any logging;
//! the gate itself has no side effects and no shared state, so concurrent
//! attempts need no coordination.

use crate::config::SharedSecret;

/// Where a credential candidate was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    /// The `Authorization` header, expected as `Bearer <token>`.
    Header,
    /// The `auth` query parameter, carrying the raw token.
    Query,
}

impl CredentialSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialSource::Header => "header",
            CredentialSource::Query => "query",
        }
    }
}

/// One credential extracted from a request. Lives only for the duration of
/// a single authentication decision.
#[derive(Debug, Clone, Copy)]
pub struct CredentialCandidate<'a> {
    pub source: CredentialSource,
    pub value: Option<&'a str>,
}

impl<'a> CredentialCandidate<'a> {
    /// Candidate from the raw `Authorization` header value, if present.
    pub fn header(value: Option<&'a str>) -> Self {
        Self {
            source: CredentialSource::Header,
            value,
        }
    }

    /// Candidate from the raw query parameter value, if present.
    pub fn query(value: Option<&'a str>) -> Self {
        Self {
            source: CredentialSource::Query,
            value,
        }
    }

    /// The bare token this candidate carries, if any. Header candidates must
    /// have the `Bearer ` prefix; anything else is not a token.
    fn token(&self) -> Option<&'a str> {
        match self.source {
            CredentialSource::Header => self.value.and_then(|v| v.strip_prefix("Bearer ")),
            CredentialSource::Query => self.value,
        }
    }
}

/// Outcome of one authentication decision.
#[derive(Debug, Clone, Copy)]
pub struct AuthDecision {
    matched: Option<CredentialSource>,
}

impl AuthDecision {
    pub fn accepted(&self) -> bool {
        self.matched.is_some()
    }

    /// Which candidate matched, for masked logging: `header`, `query` or
    /// `none`. Never the candidate value itself.
    pub fn matched_source(&self) -> &'static str {
        match self.matched {
            Some(source) => source.as_str(),
            None => "none",
        }
    }
}

/// Decide whether one connection attempt is authenticated.
///
/// Candidates are checked in order; the first match wins. Callers pass the
/// header candidate before the query candidate, so the query token is a
/// fallback rather than a second identity.
pub fn authenticate(
    candidates: &[CredentialCandidate<'_>],
    expected: &SharedSecret,
) -> AuthDecision {
    for candidate in candidates {
        if let Some(token) = candidate.token() {
            if constant_time_eq(token, expected.expose()) {
                return AuthDecision {
                    matched: Some(candidate.source),
                };
            }
        }
    }

    AuthDecision { matched: None }
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}
