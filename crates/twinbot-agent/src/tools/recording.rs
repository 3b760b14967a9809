//! Recording tools — alert the operator about leads and unanswered questions.
//!
//! Both tools acknowledge with `{"recorded": "ok"}` whether or not the
//! notification actually went out.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use twinbot_providers::Notifier;

use super::base::{optional_string, require_string, Tool};

pub const RECORD_USER_DETAILS: &str = "record_user_details";
pub const RECORD_UNKNOWN_QUESTION: &str = "record_unknown_question";

fn recorded_ok() -> Value {
    json!({ "recorded": "ok" })
}

// ─────────────────────────────────────────────
// RecordUserDetailsTool
// ─────────────────────────────────────────────

/// Records a visitor who wants to get in touch.
pub struct RecordUserDetailsTool {
    notifier: Arc<dyn Notifier>,
}

impl RecordUserDetailsTool {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }
}

#[async_trait]
impl Tool for RecordUserDetailsTool {
    fn name(&self) -> &str {
        RECORD_USER_DETAILS
    }

    fn description(&self) -> &str {
        "Use this tool to record that a user is interested in being in touch and provided an email address"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "email": {
                    "type": "string",
                    "description": "The email address of this user"
                },
                "name": {
                    "type": "string",
                    "description": "The user's name, if they provided it"
                },
                "notes": {
                    "type": "string",
                    "description": "Any additional information about the conversation that's worth recording to give context"
                }
            },
            "required": ["email"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, params: HashMap<String, Value>) -> anyhow::Result<Value> {
        let email = require_string(&params, "email")?;
        let name = optional_string(&params, "name").unwrap_or_else(|| "Name not provided".into());
        let notes = optional_string(&params, "notes").unwrap_or_else(|| "not provided".into());

        debug!(email = %email, "recording user details");
        self.notifier
            .notify(&format!("Recording {name} with email {email} and notes {notes}"))
            .await;

        Ok(recorded_ok())
    }
}

// ─────────────────────────────────────────────
// RecordUnknownQuestionTool
// ─────────────────────────────────────────────

/// Records a question the twin could not answer.
pub struct RecordUnknownQuestionTool {
    notifier: Arc<dyn Notifier>,
}

impl RecordUnknownQuestionTool {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }
}

#[async_trait]
impl Tool for RecordUnknownQuestionTool {
    fn name(&self) -> &str {
        RECORD_UNKNOWN_QUESTION
    }

    fn description(&self) -> &str {
        "Always use this tool to record any question that couldn't be answered as you didn't know the answer"
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "question": {
                    "type": "string",
                    "description": "The question that couldn't be answered"
                }
            },
            "required": ["question"],
            "additionalProperties": false
        })
    }

    async fn execute(&self, params: HashMap<String, Value>) -> anyhow::Result<Value> {
        let question = require_string(&params, "question")?;

        debug!(question = %question, "recording unknown question");
        self.notifier.notify(&format!("Recording {question}")).await;

        Ok(recorded_ok())
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use twinbot_core::config::schema::PushoverConfig;
    use twinbot_providers::PushoverNotifier;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// Notifier that remembers every message.
    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn notify(&self, message: &str) {
            self.sent.lock().unwrap().push(message.to_string());
        }
    }

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), json!(v)))
            .collect()
    }

    #[tokio::test]
    async fn test_user_details_with_defaults() {
        let notifier = Arc::new(RecordingNotifier::default());
        let tool = RecordUserDetailsTool::new(notifier.clone());

        let result = tool.execute(params(&[("email", "a@b.com")])).await.unwrap();

        assert_eq!(result, json!({"recorded": "ok"}));
        assert_eq!(
            notifier.sent.lock().unwrap().as_slice(),
            ["Recording Name not provided with email a@b.com and notes not provided"]
        );
    }

    #[tokio::test]
    async fn test_user_details_all_fields() {
        let notifier = Arc::new(RecordingNotifier::default());
        let tool = RecordUserDetailsTool::new(notifier.clone());

        tool.execute(params(&[
            ("email", "ada@example.com"),
            ("name", "Ada"),
            ("notes", "wants a platform audit"),
        ]))
        .await
        .unwrap();

        assert_eq!(
            notifier.sent.lock().unwrap()[0],
            "Recording Ada with email ada@example.com and notes wants a platform audit"
        );
    }

    #[tokio::test]
    async fn test_user_details_missing_email_is_error() {
        let notifier = Arc::new(RecordingNotifier::default());
        let tool = RecordUserDetailsTool::new(notifier.clone());

        assert!(tool.execute(params(&[("name", "Ada")])).await.is_err());
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_question() {
        let notifier = Arc::new(RecordingNotifier::default());
        let tool = RecordUnknownQuestionTool::new(notifier.clone());

        let result = tool
            .execute(params(&[("question", "What is your favourite editor?")]))
            .await
            .unwrap();

        assert_eq!(result, json!({"recorded": "ok"}));
        assert_eq!(
            notifier.sent.lock().unwrap().as_slice(),
            ["Recording What is your favourite editor?"]
        );
    }

    fn json_params(value: Value) -> HashMap<String, Value> {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_non_string_arguments_are_still_recorded() {
        let notifier = Arc::new(RecordingNotifier::default());
        let details = RecordUserDetailsTool::new(notifier.clone());
        let question = RecordUnknownQuestionTool::new(notifier.clone());

        let result = details
            .execute(json_params(json!({"email": 12345, "name": null, "notes": 7})))
            .await
            .unwrap();
        assert_eq!(result, json!({"recorded": "ok"}));

        let result = question.execute(json_params(json!({"question": 42}))).await.unwrap();
        assert_eq!(result, json!({"recorded": "ok"}));

        assert_eq!(
            notifier.sent.lock().unwrap().as_slice(),
            [
                "Recording Name not provided with email 12345 and notes 7",
                "Recording 42",
            ]
        );
    }

    #[tokio::test]
    async fn test_ack_even_when_notification_fails() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(2)
            .mount(&mock_server)
            .await;

        let notifier: Arc<dyn Notifier> = Arc::new(PushoverNotifier::new(&PushoverConfig {
            token: "tok".into(),
            user: "usr".into(),
            api_base: mock_server.uri(),
            timeout_secs: 2,
        }));

        let details = RecordUserDetailsTool::new(notifier.clone());
        let question = RecordUnknownQuestionTool::new(notifier);

        assert_eq!(
            details.execute(params(&[("email", "a@b.com")])).await.unwrap(),
            json!({"recorded": "ok"})
        );
        assert_eq!(
            question.execute(params(&[("question", "?")])).await.unwrap(),
            json!({"recorded": "ok"})
        );
    }

    #[tokio::test]
    async fn test_ack_when_notifications_unconfigured() {
        let notifier: Arc<dyn Notifier> = Arc::new(PushoverNotifier::new(&PushoverConfig::default()));
        let tool = RecordUnknownQuestionTool::new(notifier);

        let result = tool.execute(params(&[("question", "?")])).await.unwrap();
        assert_eq!(result, json!({"recorded": "ok"}));
    }

    #[test]
    fn test_schemas_match_declared_contract() {
        let notifier: Arc<dyn Notifier> = Arc::new(RecordingNotifier::default());

        let details = RecordUserDetailsTool::new(notifier.clone()).to_definition();
        assert_eq!(details.function.name, "record_user_details");
        assert_eq!(details.function.parameters["required"], json!(["email"]));
        assert_eq!(details.function.parameters["additionalProperties"], json!(false));

        let question = RecordUnknownQuestionTool::new(notifier).to_definition();
        assert_eq!(question.function.name, "record_unknown_question");
        assert_eq!(question.function.parameters["required"], json!(["question"]));
    }
}
