use serde::{Deserialize, Serialize};

/// CORS findings for one target.
///
/// Only built for targets where at least one candidate origin was reflected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    /// The target URL as read from the input.
    pub url: String,
    /// Reflected origins, in the order they were probed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub acao: Vec<String>,
    /// `Access-Control-Allow-Credentials` from the response of the latest hit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acac: Option<String>,
}

impl ScanResult {
    /// Reflection together with `Access-Control-Allow-Credentials: true`.
    pub fn is_exploitable(&self) -> bool {
        !self.acao.is_empty() && self.acac.as_deref() == Some("true")
    }
}
