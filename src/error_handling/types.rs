//! Error type definitions.
//!
//! This module defines the error types used throughout the application and
//! the categories transport failures are counted under.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// A configuration value that cannot be used.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Per-target failure: the URL could not be turned into a probe target.
///
/// Never fatal to a run; the dispatcher logs it and moves on.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TargetError {
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("unsupported scheme '{scheme}' in URL '{url}'")]
    UnsupportedScheme { url: String, scheme: String },

    #[error("URL '{0}' has no host component")]
    MissingHost(String),

    #[error("URL exceeds maximum length ({length} > {max})")]
    TooLong { length: usize, max: usize },
}

/// Failure to obtain the URL list. Fatal to the whole run.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to open input file {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No URLs on stdin (stdin is a terminal)")]
    NoStdin,

    #[error("Failed to read URL list")]
    Read(#[from] std::io::Error),
}

/// Failure to persist results. Only raised after probing has finished.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write results to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read results from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to (de)serialize results: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Categories of failures counted during a run.
///
/// Transport categories mirror the predicates `reqwest::Error` exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIterMacro)]
pub enum ErrorType {
    // Per-target
    UrlParseError,
    // Per-candidate transport failures
    HttpRequestBuilderError,
    HttpRequestRedirectError,
    HttpRequestTimeoutError,
    HttpRequestConnectError,
    HttpRequestRequestError,
    HttpRequestBodyError,
    HttpRequestOtherError,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::UrlParseError => "URL parse error",
            ErrorType::HttpRequestBuilderError => "HTTP request builder error",
            ErrorType::HttpRequestRedirectError => "HTTP request redirect error",
            ErrorType::HttpRequestTimeoutError => "HTTP request timeout error",
            ErrorType::HttpRequestConnectError => "HTTP request connect error",
            ErrorType::HttpRequestRequestError => "HTTP request error",
            ErrorType::HttpRequestBodyError => "HTTP request body error",
            ErrorType::HttpRequestOtherError => "HTTP request other error",
        }
    }

    /// Whether this category comes from a failed probe request.
    pub fn is_transport(&self) -> bool {
        !matches!(self, ErrorType::UrlParseError)
    }
}
