//! Store and session error taxonomy.

use caixa_core::{AccountingError, ValidationError};
use serde_json::Value;
use thiserror::Error;

const GENERIC_FAILURE: &str = "the request could not be completed";

#[derive(Debug, Error)]
pub enum StoreError {
    /// 401 from an authenticated endpoint. Never retried.
    #[error("not logged in or session expired")]
    AuthRequired,

    #[error("store returned {status}: {}", detail.as_deref().unwrap_or(GENERIC_FAILURE))]
    Api { status: u16, detail: Option<String> },

    #[error("could not reach the store: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response from the store: {0}")]
    Decode(String),
}

impl StoreError {
    /// Classify a non-2xx response.
    pub fn from_response(status: u16, body: &str) -> Self {
        if status == 401 {
            return StoreError::AuthRequired;
        }
        StoreError::Api {
            status,
            detail: parse_detail(body),
        }
    }

    /// Text to show the user: the store's `detail` when present.
    pub fn user_message(&self) -> String {
        match self {
            StoreError::Api {
                detail: Some(detail),
                ..
            } => detail.clone(),
            StoreError::Api { detail: None, .. } => GENERIC_FAILURE.to_string(),
            other => other.to_string(),
        }
    }
}

/// Pull a readable message out of an error body.
///
/// `detail` is usually a string; request validation failures send a list of
/// objects with a `msg` each.
fn parse_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Array(items) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|i| i.get("msg").and_then(Value::as_str))
                .collect();
            (!msgs.is_empty()).then(|| msgs.join("; "))
        }
        _ => None,
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    /// Rejected locally; nothing was sent.
    #[error(transparent)]
    Accounting(#[from] AccountingError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ValidationError> for SessionError {
    fn from(err: ValidationError) -> Self {
        SessionError::Accounting(err.into())
    }
}

impl SessionError {
    pub fn is_auth_required(&self) -> bool {
        matches!(self, SessionError::Store(StoreError::AuthRequired))
    }
}
