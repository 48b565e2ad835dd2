//! Errors raised while fetching and interpreting review statuses.

use std::fmt;

use thiserror::Error;

/// Errors that can occur during a polling cycle.
#[derive(Debug, Error)]
pub enum PracticumError {
    #[error("Connection to {endpoint} failed: {source}")]
    Connection {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Endpoint {endpoint} is unavailable. Status: {status} {reason}, body: {body}")]
    InvalidStatusCode {
        endpoint: String,
        status: u16,
        reason: String,
        body: String,
    },

    #[error("API response is not valid JSON: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("API response is not a JSON object")]
    NotAnObject,

    #[error("API response has no \"homeworks\" key")]
    MissingHomeworks,

    #[error("\"homeworks\" in API response is not a list")]
    HomeworksNotAList,

    #[error("Homework record is not a JSON object")]
    HomeworkNotAnObject,

    #[error("Homework record has no \"{0}\" key")]
    MissingKey(&'static str),

    #[error("Unexpected homework status: {0}")]
    UnknownStatus(String),
}

/// Coarse classification of [`PracticumError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The API could not be reached.
    Connectivity,
    /// The API answered with something other than the expected payload.
    InvalidResponse,
    /// A homework record carried a status outside the verdict table.
    UnrecognizedStatus,
}

impl PracticumError {
    /// Returns the coarse kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Connection { .. } => ErrorKind::Connectivity,
            Self::UnknownStatus(_) => ErrorKind::UnrecognizedStatus,
            Self::InvalidStatusCode { .. }
            | Self::Decode(_)
            | Self::NotAnObject
            | Self::MissingHomeworks
            | Self::HomeworksNotAList
            | Self::HomeworkNotAnObject
            | Self::MissingKey(_) => ErrorKind::InvalidResponse,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Connectivity => "connectivity",
            Self::InvalidResponse => "invalid-response",
            Self::UnrecognizedStatus => "unrecognized-status",
        };
        f.write_str(name)
    }
}
