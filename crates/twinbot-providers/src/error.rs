//! Typed errors for the HTTP clients in this crate.

use thiserror::Error;

/// Failure talking to the chat completions endpoint.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request never produced an HTTP response.
    #[error("request to {provider} failed: {source}")]
    Http {
        provider: String,
        #[source]
        source: reqwest::Error,
    },

    /// The endpoint answered with a non-2xx status.
    #[error("{provider} returned {status}: {body}")]
    Api {
        provider: String,
        status: reqwest::StatusCode,
        body: String,
    },

    /// The body was not a chat completion.
    #[error("failed to parse {provider} response: {source}")]
    Parse {
        provider: String,
        #[source]
        source: reqwest::Error,
    },

    /// A well-formed response with an empty `choices` array.
    #[error("{provider} returned no choices")]
    NoChoices { provider: String },
}

impl ProviderError {
    /// HTTP status reported by the endpoint, if it got that far.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            ProviderError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failure delivering an operator notification.
///
/// Only surfaced by `try_notify`; `Notifier::notify` swallows it.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Token or user key missing.
    #[error("notifications are not configured")]
    NotConfigured,

    #[error("notification request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("notification endpoint returned {0}")]
    Status(reqwest::StatusCode),
}
