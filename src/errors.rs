use std::fmt;

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use thiserror::Error;

use crate::JsonResponse;

// ----------------- Library Errors -----------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} must be set")]
    MissingVar(&'static str),
    #[error("base url {input:?} is not a valid absolute url: {source}")]
    InvalidBaseUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },
    #[error("base url {0:?} has no host-based origin")]
    OpaqueOrigin(String),
    #[error("site configuration was already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Error)]
pub enum TimestampError {
    #[error("timestamp {value:?} is not ISO-8601: {source}")]
    Malformed {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ProblemKind {
    Missing,
    WrongType { expected: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldProblem {
    pub path: String,
    #[serde(flatten)]
    pub kind: ProblemKind,
}

impl FieldProblem {
    pub fn missing(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: ProblemKind::Missing,
        }
    }

    pub fn wrong_type(path: impl Into<String>, expected: &'static str) -> Self {
        Self {
            path: path.into(),
            kind: ProblemKind::WrongType { expected },
        }
    }
}

impl fmt::Display for FieldProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ProblemKind::Missing => write!(f, "{} is missing", self.path),
            ProblemKind::WrongType { expected } => {
                write!(f, "{} must be {}", self.path, expected)
            }
        }
    }
}

/// Raised when a value handed over as an article does not match the article shape.
#[derive(Debug, Error)]
pub enum ConformanceError {
    #[error("article does not conform: {}", join_problems(.0))]
    Fields(Vec<FieldProblem>),
    #[error("article could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ConformanceError {
    pub fn problems(&self) -> &[FieldProblem] {
        match self {
            ConformanceError::Fields(problems) => problems,
            ConformanceError::Decode(_) => &[],
        }
    }
}

fn join_problems(problems: &[FieldProblem]) -> String {
    problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

// ----------------- Request Errors -----------------

#[derive(Debug)]
pub enum RequestError {
    NotFound,
    RunTimeError(&'static str),
    NonConforming(ConformanceError),
    ServerError,
}

#[derive(Serialize)]
pub struct RequestErrorJsonWrapper {
    errors: RequestErrorJson,
}

#[derive(Serialize)]
pub struct RequestErrorJson {
    body: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<FieldProblem>,
}

impl RequestErrorJsonWrapper {
    pub fn new(error: &str) -> RequestErrorJsonWrapper {
        RequestErrorJsonWrapper {
            errors: RequestErrorJson {
                body: vec![error.to_string()],
                fields: vec![],
            },
        }
    }

    pub fn with_fields(error: &str, fields: Vec<FieldProblem>) -> RequestErrorJsonWrapper {
        RequestErrorJsonWrapper {
            errors: RequestErrorJson {
                body: vec![error.to_string()],
                fields,
            },
        }
    }
}

impl From<ConformanceError> for RequestError {
    fn from(value: ConformanceError) -> Self {
        Self::NonConforming(value)
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> axum::response::Response {
        self.to_json_response().into_response()
    }
}

impl RequestError {
    pub fn to_json_response(&self) -> JsonResponse<RequestErrorJsonWrapper> {
        let (status_code, json) = match self {
            RequestError::NotFound => (
                StatusCode::NOT_FOUND,
                RequestErrorJsonWrapper::new("Not Found"),
            ),
            RequestError::RunTimeError(message) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                RequestErrorJsonWrapper::new(message),
            ),
            RequestError::NonConforming(e) => {
                tracing::debug!(error = %e, "rejected non-conforming article");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    RequestErrorJsonWrapper::with_fields(&e.to_string(), e.problems().to_vec()),
                )
            }
            RequestError::ServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                RequestErrorJsonWrapper::new("Internal Server Error"),
            ),
        };
        (status_code, Json(json))
    }
}
