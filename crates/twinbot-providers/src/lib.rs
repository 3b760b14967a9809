//! HTTP clients for Twinbot's two external collaborators.
//!
//! # Architecture
//!
//! - [`traits::LlmProvider`] — trait the conversation loop calls the model through
//! - [`http_provider::HttpProvider`] — OpenAI-compatible chat completions client
//! - [`pushover::Notifier`] / [`pushover::PushoverNotifier`] — best-effort operator alerts
//! - [`error`] — typed failures for both clients

pub mod error;
pub mod http_provider;
pub mod pushover;
pub mod traits;

pub use error::{NotifyError, ProviderError};
pub use http_provider::{create_provider, HttpProvider};
pub use pushover::{Notifier, PushoverNotifier};
pub use traits::{LlmProvider, LlmRequestConfig};
