//! Configuration constants.
//!
//! Defaults for the probing engine plus the fixed values the origin generator
//! builds its candidates from.

use std::time::Duration;

/// Default number of concurrent workers.
pub const DEFAULT_CONCURRENCY: usize = 20;
/// Default pause before every probe request, in milliseconds.
pub const DEFAULT_DELAY_MS: u64 = 100;
/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Default HTTP method for probe requests.
pub const DEFAULT_METHOD: &str = "GET";

/// TCP connect timeout ceiling in seconds.
///
/// The connect phase never waits longer than the request timeout; this only
/// caps it when the request timeout is very large.
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Idle keep-alive for pooled connections inside one worker's client.
pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(1);

/// Maximum URL length (2048 characters), matching common browser and server limits.
pub const MAX_URL_LENGTH: usize = 2048;

/// Default User-Agent string for probe requests.
///
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

// Origin generation
/// Attacker-controlled domain used in every derived candidate origin.
pub const SENTINEL_DOMAIN: &str = "corsmisc.com";
/// Sentinel label without its TLD (used for suffix and unescaped-dot candidates).
pub const SENTINEL_LABEL: &str = "corsmisc";
/// TLD substituted for the target's own TLD in the cross-TLD candidate.
pub const FOREIGN_TLD: &str = "anothertld";

/// Script-hosting and code-playground origins that are frequently allow-listed by mistake.
pub const THIRD_PARTY_ORIGINS: &[&str] = &[
    "https://whatever.github.io",
    "http://jsbin.com",
    "https://codepen.io",
    "https://jsfiddle.net",
    "http://www.webdevout.net",
    "https://repl.it",
];

/// Characters injected between the target host and the sentinel domain.
///
/// `%60` and `%0b` are sent percent-encoded (backtick, vertical tab); the
/// literal backtick is tested as well.
pub const SPECIAL_CHARS: &[&str] = &[
    "_", "-", "+", "$", "{", "}", "^", "%60", "!", "~", "`", ";", "|", "&", "(", ")", "*", "'",
    "\"", "=", "%0b",
];

// CORS response headers
pub const HEADER_ACCESS_CONTROL_ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
pub const HEADER_ACCESS_CONTROL_ALLOW_CREDENTIALS: &str = "Access-Control-Allow-Credentials";
