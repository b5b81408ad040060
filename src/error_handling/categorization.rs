//! Error categorization.
//!
//! Maps transport failures onto `ErrorType` so a run can report how its
//! skipped candidates failed. Probes are never retried, so there is no retry
//! strategy here.

use super::types::ErrorType;

/// Categorizes a `reqwest::Error` into an `ErrorType`.
///
/// Redirects are not followed by the probe client, so a redirect error only
/// shows up if a policy error is raised while building the response.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ErrorType {
    if error.is_builder() {
        ErrorType::HttpRequestBuilderError
    } else if error.is_redirect() {
        ErrorType::HttpRequestRedirectError
    } else if error.is_timeout() {
        ErrorType::HttpRequestTimeoutError
    } else if error.is_connect() {
        ErrorType::HttpRequestConnectError
    } else if error.is_request() {
        ErrorType::HttpRequestRequestError
    } else if error.is_body() || error.is_decode() {
        ErrorType::HttpRequestBodyError
    } else {
        ErrorType::HttpRequestOtherError
    }
}
