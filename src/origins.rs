//! Candidate origin generation.
//!
//! Derives the ordered list of `Origin` header values sent to a target. The
//! order is fixed: under short-circuit mode the first reflected candidate is
//! the one reported.

use std::fmt;

use crate::config::{
    FOREIGN_TLD, SENTINEL_DOMAIN, SENTINEL_LABEL, SPECIAL_CHARS, THIRD_PARTY_ORIGINS,
};
use crate::target::TargetUrl;

/// Number of candidates that do not depend on the special-character set.
pub const STRUCTURAL_CANDIDATES: usize = 9 + THIRD_PARTY_ORIGINS.len();

/// The validation bypass a candidate origin is meant to exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BypassClass {
    Wildcard,
    NullOrigin,
    Reflection,
    CrossTld,
    SubdomainPrefix,
    SubdomainSuffix,
    UnescapedDot,
    ThirdParty,
    SpecialCharacter,
}

impl BypassClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            BypassClass::Wildcard => "wildcard",
            BypassClass::NullOrigin => "null origin",
            BypassClass::Reflection => "origin reflection",
            BypassClass::CrossTld => "another TLD",
            BypassClass::SubdomainPrefix => "prefix",
            BypassClass::SubdomainSuffix => "suffix",
            BypassClass::UnescapedDot => "unescaped dot",
            BypassClass::ThirdParty => "third-party origin",
            BypassClass::SpecialCharacter => "special character",
        }
    }
}

impl fmt::Display for BypassClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `Origin` header value to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginCandidate {
    pub origin: String,
    pub class: BypassClass,
}

impl OriginCandidate {
    fn new(class: BypassClass, origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            class,
        }
    }
}

/// Builds the candidate origins for a target, in probe order.
///
/// Pure and deterministic: the same target always yields the same sequence of
/// `STRUCTURAL_CANDIDATES + SPECIAL_CHARS.len()` entries. Nothing is
/// deduplicated.
pub fn generate_origins(target: &TargetUrl) -> Vec<OriginCandidate> {
    let scheme = target.scheme();
    let domain = target.domain();
    let host = target.registrable();

    let mut origins = Vec::with_capacity(STRUCTURAL_CANDIDATES + SPECIAL_CHARS.len());

    origins.push(OriginCandidate::new(BypassClass::Wildcard, "*"));
    origins.push(OriginCandidate::new(BypassClass::NullOrigin, "null"));
    origins.push(OriginCandidate::new(
        BypassClass::Reflection,
        format!("{scheme}://{SENTINEL_DOMAIN}"),
    ));
    origins.push(OriginCandidate::new(
        BypassClass::CrossTld,
        format!("{scheme}://{domain}.{FOREIGN_TLD}"),
    ));

    origins.push(OriginCandidate::new(
        BypassClass::SubdomainPrefix,
        format!("{scheme}://{domain}.{SENTINEL_DOMAIN}"),
    ));
    origins.push(OriginCandidate::new(
        BypassClass::SubdomainPrefix,
        format!("{scheme}://{host}.{SENTINEL_DOMAIN}"),
    ));

    origins.push(OriginCandidate::new(
        BypassClass::SubdomainSuffix,
        format!("{scheme}://{SENTINEL_LABEL}.{host}"),
    ));
    origins.push(OriginCandidate::new(
        BypassClass::SubdomainSuffix,
        format!("{scheme}://{SENTINEL_DOMAIN}.{host}"),
    ));

    // No dot between sentinel and domain: catches allow-list regexes with an unescaped `.`
    origins.push(OriginCandidate::new(
        BypassClass::UnescapedDot,
        format!("{scheme}://{SENTINEL_LABEL}{host}"),
    ));

    origins.extend(
        THIRD_PARTY_ORIGINS
            .iter()
            .map(|origin| OriginCandidate::new(BypassClass::ThirdParty, *origin)),
    );

    origins.extend(SPECIAL_CHARS.iter().map(|ch| {
        OriginCandidate::new(
            BypassClass::SpecialCharacter,
            format!("{scheme}://{host}{ch}.{SENTINEL_DOMAIN}"),
        )
    }));

    origins
}
