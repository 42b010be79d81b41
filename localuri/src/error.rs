//! Error types for classification and catalog loading.
//!
//! [`ClassifyError`] rejects a single caller input and is meant to be shown
//! back to the caller. [`CatalogError`] is a configuration fault: fatal at
//! startup, an internal error if it ever surfaces per request.

use std::{fmt, path::PathBuf};

use thiserror::Error;

use crate::classify::{ILLEGAL_PATH_PARAMETER_CHARACTERS, SUPPORTED_HOST, SUPPORTED_PORT};

/// Which of the two validated timeouts an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeoutKind {
    Connection,
    Socket,
}

impl fmt::Display for TimeoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeoutKind::Connection => f.write_str("connection"),
            TimeoutKind::Socket => f.write_str("socket"),
        }
    }
}

fn banned_characters() -> String {
    ILLEGAL_PATH_PARAMETER_CHARACTERS
        .iter()
        .map(|ch| format!("{ch:?}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Why a caller's URI-like input was rejected.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("the url field or the path field must be defined")]
    MissingRequiredFields,

    #[error("{kind} timeout {value} is not in the range of {min} - {max}")]
    TimeoutOutOfRange {
        kind: TimeoutKind,
        value: i32,
        min: i32,
        max: i32,
    },

    #[error("invalid url `{url}`: {reason}")]
    InvalidUrl {
        /// The input field the malformed value came from.
        field: &'static str,
        url: String,
        reason: String,
    },

    #[error("the url field `{url}` and the uri fields `{from_fields}` form different urls")]
    ConflictingUrlAndComponents { url: String, from_fields: String },

    #[error(
        "only host `{}` and port `{}` are supported, got host `{host}` and port `{port}`",
        SUPPORTED_HOST,
        SUPPORTED_PORT
    )]
    UnsupportedHostOrPort { host: String, port: u16 },

    #[error("the api could not be determined from the path `{path}`")]
    UnsupportedApi { path: String },

    #[error(
        "the path parameters `{params}` contain invalid characters or spaces; please omit: {}",
        banned_characters()
    )]
    InvalidPathParams { params: String },

    #[error("the {api} api requires path parameters")]
    MissingPathParams { api: &'static str },

    #[error("the {api} api does not use path parameters, got `{params}`")]
    UnsupportedPathParams { api: &'static str, params: String },
}

impl ClassifyError {
    /// The input field a caller should correct.
    pub fn field(&self) -> &'static str {
        match self {
            ClassifyError::MissingRequiredFields | ClassifyError::ConflictingUrlAndComponents { .. } => {
                "url"
            }
            ClassifyError::TimeoutOutOfRange {
                kind: TimeoutKind::Connection,
                ..
            } => "connection_timeout",
            ClassifyError::TimeoutOutOfRange {
                kind: TimeoutKind::Socket,
                ..
            } => "socket_timeout",
            ClassifyError::InvalidUrl { field, .. } => *field,
            ClassifyError::UnsupportedHostOrPort { host, .. } => {
                if host.eq_ignore_ascii_case(SUPPORTED_HOST) {
                    "port"
                } else {
                    "host"
                }
            }
            ClassifyError::UnsupportedApi { .. } => "path",
            ClassifyError::InvalidPathParams { .. }
            | ClassifyError::MissingPathParams { .. }
            | ClassifyError::UnsupportedPathParams { .. } => "path_params",
        }
    }
}

/// A dotted field path that cannot be used in an allow-list.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("field path `{path}` is empty or has an empty segment")]
pub struct FieldPathError {
    pub path: String,
}

/// A fault in the API or redaction catalogs.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("allow-list resource is not valid: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read allow-list resource `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("allow-list for `{api}` root `{root}` is invalid: {source}")]
    InvalidFieldPath {
        api: String,
        root: String,
        #[source]
        source: FieldPathError,
    },

    #[error("api path `{path}` is not in the allow-list catalog")]
    UnknownApiPath { path: String },

    #[error("allow-list catalog has no entry for: {}", paths.join(", "))]
    MissingApiPaths { paths: Vec<String> },
}
