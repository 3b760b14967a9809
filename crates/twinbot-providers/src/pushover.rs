//! Operator notifications via the Pushover messages API.
//!
//! Notifications are best-effort: a missing token, a network error or a
//! non-2xx answer is logged and dropped, never returned to the caller.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use twinbot_core::config::schema::PushoverConfig;
use twinbot_core::utils::truncate_string;

use crate::error::NotifyError;

// ─────────────────────────────────────────────
// Trait
// ─────────────────────────────────────────────

/// Sends a short text alert to whoever operates the twin.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver `message`. Never fails; delivery problems are only logged.
    async fn notify(&self, message: &str);
}

// ─────────────────────────────────────────────
// Pushover
// ─────────────────────────────────────────────

/// Posts `token`, `user`, `message` form fields to `{api_base}/1/messages.json`.
pub struct PushoverNotifier {
    token: String,
    user: String,
    api_base: String,
    client: reqwest::Client,
}

impl PushoverNotifier {
    /// Create a notifier from config. An unconfigured notifier is valid and
    /// simply skips every message.
    pub fn new(config: &PushoverConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            token: config.token.clone(),
            user: config.user.clone(),
            api_base: config.api_base.clone(),
            client,
        }
    }

    /// Whether both the app token and the user key are set.
    pub fn is_configured(&self) -> bool {
        !self.token.is_empty() && !self.user.is_empty()
    }

    fn messages_url(&self) -> String {
        format!("{}/1/messages.json", self.api_base.trim_end_matches('/'))
    }

    /// Attempt one delivery and report what happened.
    pub async fn try_notify(&self, message: &str) -> Result<(), NotifyError> {
        if !self.is_configured() {
            return Err(NotifyError::NotConfigured);
        }

        let resp = self
            .client
            .post(self.messages_url())
            .form(&[
                ("token", self.token.as_str()),
                ("user", self.user.as_str()),
                ("message", message),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(NotifyError::Status(status));
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for PushoverNotifier {
    async fn notify(&self, message: &str) {
        match self.try_notify(message).await {
            Ok(()) => info!(message = %truncate_string(message, 80), "operator notified"),
            Err(NotifyError::NotConfigured) => {
                debug!("Pushover not configured; notification skipped")
            }
            Err(e) => warn!(error = %e, "failed to deliver notification"),
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn make_config(token: &str, user: &str, api_base: &str) -> PushoverConfig {
        PushoverConfig {
            token: token.into(),
            user: user.into(),
            api_base: api_base.into(),
            timeout_secs: 2,
        }
    }

    #[tokio::test]
    async fn test_posts_form_fields() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/1/messages.json"))
            .and(body_string_contains("token=app-token"))
            .and(body_string_contains("user=user-key"))
            .and(body_string_contains("message=Recording+question"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": 1})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let notifier = PushoverNotifier::new(&make_config("app-token", "user-key", &mock_server.uri()));
        notifier.try_notify("Recording question").await.unwrap();
    }

    #[tokio::test]
    async fn test_not_configured_skips_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let notifier = PushoverNotifier::new(&make_config("", "user-key", &mock_server.uri()));
        assert!(!notifier.is_configured());
        assert!(matches!(
            notifier.try_notify("hello").await,
            Err(NotifyError::NotConfigured)
        ));
        // The infallible path must not panic or send either.
        notifier.notify("hello").await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_reported() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/1/messages.json"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "status": 0,
                "errors": ["application token is invalid"]
            })))
            .mount(&mock_server)
            .await;

        let notifier = PushoverNotifier::new(&make_config("bad", "user-key", &mock_server.uri()));
        match notifier.try_notify("hello").await {
            Err(NotifyError::Status(status)) => assert_eq!(status.as_u16(), 400),
            other => panic!("expected status error, got {other:?}"),
        }
        notifier.notify("hello").await;
    }

    #[tokio::test]
    async fn test_network_error_is_swallowed() {
        let notifier = PushoverNotifier::new(&make_config("tok", "usr", "http://127.0.0.1:1"));
        assert!(matches!(
            notifier.try_notify("hello").await,
            Err(NotifyError::Http(_))
        ));
        notifier.notify("hello").await;
    }

    #[test]
    fn test_messages_url_trailing_slash() {
        let notifier = PushoverNotifier::new(&make_config("t", "u", "https://api.pushover.net/"));
        assert_eq!(notifier.messages_url(), "https://api.pushover.net/1/messages.json");
    }
}
