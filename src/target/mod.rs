//! Target URL parsing.
//!
//! Splits a raw URL into the parts the origin generator needs, using the
//! Public Suffix List (PSL) to find the registrable domain:
//!
//! - `scheme` - `http` or `https`
//! - `domain` - registrable domain without its suffix (`example` for `www.example.co.uk`)
//! - `tld` - the public suffix (`co.uk`)
//!
//! Hosts without a registrable domain (IP literals, `localhost`) keep the whole
//! host as `domain` and an empty `tld`.

use psl::{List, Psl};
use url::{Host, Url};

use crate::config::MAX_URL_LENGTH;
use crate::error_handling::TargetError;

/// A parsed probe target. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetUrl {
    raw: String,
    canonical: String,
    scheme: String,
    domain: String,
    tld: String,
}

impl TargetUrl {
    /// Parses a raw URL string.
    ///
    /// The raw string (trimmed) is kept verbatim: probe requests are sent to
    /// exactly what was read, never to a rewritten URL.
    ///
    /// # Errors
    ///
    /// Returns a `TargetError` if the URL is too long, does not parse, uses a
    /// scheme other than http/https, or has no host.
    pub fn parse(raw: &str) -> Result<Self, TargetError> {
        let raw = raw.trim();
        if raw.len() > MAX_URL_LENGTH {
            return Err(TargetError::TooLong {
                length: raw.len(),
                max: MAX_URL_LENGTH,
            });
        }

        let parsed = Url::parse(raw).map_err(|e| TargetError::InvalidUrl {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;

        match parsed.scheme() {
            "http" | "https" => {}
            other => {
                return Err(TargetError::UnsupportedScheme {
                    url: raw.to_string(),
                    scheme: other.to_string(),
                })
            }
        }

        let (domain, tld) = match parsed.host() {
            Some(Host::Domain(host)) => split_host(host.trim_end_matches('.')),
            Some(Host::Ipv4(addr)) => (addr.to_string(), String::new()),
            Some(Host::Ipv6(addr)) => (format!("[{addr}]"), String::new()),
            None => return Err(TargetError::MissingHost(raw.to_string())),
        };
        if domain.is_empty() {
            return Err(TargetError::MissingHost(raw.to_string()));
        }

        Ok(Self {
            raw: raw.to_string(),
            canonical: parsed.to_string(),
            scheme: parsed.scheme().to_string(),
            domain,
            tld,
        })
    }

    /// The URL exactly as supplied (trimmed); probe requests go here.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The normalized serialization of the URL.
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn tld(&self) -> &str {
        &self.tld
    }

    /// `{domain}.{tld}`, or just `{domain}` when there is no public suffix.
    pub fn registrable(&self) -> String {
        if self.tld.is_empty() {
            self.domain.clone()
        } else {
            format!("{}.{}", self.domain, self.tld)
        }
    }
}

impl std::fmt::Display for TargetUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Splits a DNS host into (registrable label, public suffix).
fn split_host(host: &str) -> (String, String) {
    let Some(registrable) = List.domain(host.as_bytes()) else {
        return (host.to_string(), String::new());
    };
    let suffix = String::from_utf8_lossy(registrable.suffix().as_bytes()).to_string();
    let registrable = String::from_utf8_lossy(registrable.as_bytes()).to_string();

    let label = registrable
        .strip_suffix(&suffix)
        .and_then(|rest| rest.strip_suffix('.'))
        .unwrap_or(&registrable)
        .to_string();
    (label, suffix)
}
