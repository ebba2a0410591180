use reqwest::StatusCode;
use shared::{domain::Tag, error::ApiError};
use thiserror::Error;

use crate::validation::ValidationErrorSet;

/// Failure at the remote-store boundary.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("request to remote store failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("remote store answered {status}: {}", describe_body(.body))]
    Status { status: StatusCode, body: String },
    #[error("malformed response from remote store: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid remote store url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl RemoteError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RemoteError::Status { status, .. } => Some(*status),
            RemoteError::Transport(err) => err.status(),
            _ => None,
        }
    }
}

fn describe_body(body: &str) -> String {
    if let Some(api_error) = ApiError::from_body(body) {
        return api_error.message;
    }
    if body.is_empty() {
        "<empty body>".to_string()
    } else {
        body.to_string()
    }
}

/// One or more submitted fields failed validation.
#[derive(Debug, Clone, Error)]
#[error("invalid contact form: {}", .0.messages().join(" "))]
pub struct ValidationError(pub ValidationErrorSet);

/// The tag is already part of the draft.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("tag '{0}' is already selected")]
pub struct TagSelectionConflict(pub Tag);
