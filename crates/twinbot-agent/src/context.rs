//! Persona context — the system prompt and the per-turn message list.
//!
//! The prompt is rebuilt on every turn from immutable inputs: the persona
//! identity and the knowledge base.

use twinbot_core::types::{Message, ToolCall};

use crate::knowledge::KnowledgeBase;
use crate::tools::recording::{RECORD_UNKNOWN_QUESTION, RECORD_USER_DETAILS};

// ─────────────────────────────────────────────
// Persona builder
// ─────────────────────────────────────────────

/// Builds system prompts and conversation message lists for the agent loop.
#[derive(Clone, Debug)]
pub struct PersonaBuilder {
    /// Full name of the person the twin speaks for.
    name: String,
    /// Optional expertise/tone line.
    about: Option<String>,
    knowledge: KnowledgeBase,
}

impl PersonaBuilder {
    /// Create a new persona builder.
    pub fn new(name: impl Into<String>, knowledge: KnowledgeBase) -> Self {
        Self {
            name: name.into(),
            about: None,
            knowledge,
        }
    }

    /// Add an expertise/tone line (builder pattern).
    pub fn with_about(mut self, about: impl Into<String>) -> Self {
        let about = about.into();
        self.about = (!about.trim().is_empty()).then_some(about);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    // ────────────── System prompt ──────────────

    /// Build the full system prompt.
    ///
    /// Knowledge sections are only emitted when they have content.
    pub fn build_system_prompt(&self) -> String {
        let mut prompt = self.build_identity();

        if !self.knowledge.summary.is_empty() {
            prompt.push_str(&format!("\n## Summary:\n{}\n", self.knowledge.summary));
        }
        if !self.knowledge.profile.is_empty() {
            prompt.push_str(&format!("\n## LinkedIn Profile:\n{}\n", self.knowledge.profile));
        }

        prompt.push_str(&format!(
            "\nWith this context, please stay in character as {name} \
             and respond naturally to the user.",
            name = self.name
        ));

        prompt
    }

    /// Fixed persona block: who the twin is and when to use its tools.
    fn build_identity(&self) -> String {
        let name = &self.name;
        let expertise = match &self.about {
            Some(about) => format!(" — {about}"),
            None => String::new(),
        };

        format!(
            "You are {name}'s AI twin{expertise}. \
             Your tone is professional yet friendly, and you explain technical topics \
             with clarity, real-world examples, and actionable advice.\n\n\
             You are representing {name} on their professional website and responding \
             to visitors' questions about {name}'s career, background, skills, and experience. \
             Be helpful and engaging, as if speaking to a potential client, recruiter, \
             or collaborator.\n\n\
             If you don't know the answer to a question, call the `{RECORD_UNKNOWN_QUESTION}` tool \
             to log it. If a visitor seems interested in connecting, ask politely for their email \
             and record it using the `{RECORD_USER_DETAILS}` tool.\n"
        )
    }

    // ────────────── Message building ──────────────

    /// Build the full message list for the first model call of a turn.
    ///
    /// 1. System prompt
    /// 2. Prior history, as given
    /// 3. Current user message
    pub fn build_messages(&self, history: &[Message], user_text: &str) -> Vec<Message> {
        let mut messages = Vec::with_capacity(history.len() + 2);
        messages.push(Message::system(self.build_system_prompt()));
        messages.extend_from_slice(history);
        messages.push(Message::user(user_text));
        messages
    }

    /// Append a tool result.
    pub fn add_tool_result(messages: &mut Vec<Message>, tool_call_id: &str, result: &str) {
        messages.push(Message::tool_result(tool_call_id, result));
    }

    /// Append the assistant turn that requested `tool_calls`.
    pub fn add_assistant_tool_calls(
        messages: &mut Vec<Message>,
        content: Option<String>,
        tool_calls: Vec<ToolCall>,
    ) {
        messages.push(Message::assistant_tool_calls(content, tool_calls));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_without_knowledge_has_no_headers() {
        let persona = PersonaBuilder::new("Ada Lovelace", KnowledgeBase::default());
        let prompt = persona.build_system_prompt();

        assert!(prompt.contains("You are Ada Lovelace's AI twin."));
        assert!(prompt.contains("record_unknown_question"));
        assert!(prompt.contains("record_user_details"));
        assert!(prompt.ends_with("please stay in character as Ada Lovelace and respond naturally to the user."));
        assert!(!prompt.contains("## Summary:"));
        assert!(!prompt.contains("## LinkedIn Profile:"));
    }

    #[test]
    fn test_prompt_with_only_summary() {
        let persona = PersonaBuilder::new("Ada", KnowledgeBase::new("", "Analytical engine fan."));
        let prompt = persona.build_system_prompt();

        assert!(prompt.contains("\n## Summary:\nAnalytical engine fan.\n"));
        assert!(!prompt.contains("## LinkedIn Profile:"));
    }

    #[test]
    fn test_prompt_section_order() {
        let persona = PersonaBuilder::new("Ada", KnowledgeBase::new("PROFILE TEXT", "SUMMARY TEXT"))
            .with_about("a mathematician");
        let prompt = persona.build_system_prompt();

        assert!(prompt.contains("You are Ada's AI twin — a mathematician."));
        let summary = prompt.find("## Summary:").unwrap();
        let profile = prompt.find("## LinkedIn Profile:").unwrap();
        let closing = prompt.find("With this context").unwrap();
        assert!(summary < profile && profile < closing);
    }

    #[test]
    fn test_blank_about_is_ignored() {
        let persona = PersonaBuilder::new("Ada", KnowledgeBase::default()).with_about("   ");
        assert!(persona.build_system_prompt().contains("You are Ada's AI twin."));
    }

    #[test]
    fn test_build_messages_layout() {
        let persona = PersonaBuilder::new("Ada", KnowledgeBase::default());
        let history = vec![
            Message::user("previous question"),
            Message::assistant("previous answer"),
        ];
        let msgs = persona.build_messages(&history, "new question");

        // system + 2 history + 1 user = 4
        assert_eq!(msgs.len(), 4);
        assert!(matches!(msgs[0], Message::System { .. }));
        assert_eq!(msgs[1], Message::user("previous question"));
        assert_eq!(msgs[3], Message::user("new question"));
    }

    #[test]
    fn test_system_prompt_is_recomputed_each_turn() {
        let persona = PersonaBuilder::new("Ada", KnowledgeBase::new("", "v1"));
        let first = persona.build_messages(&[], "one");
        let second = persona.build_messages(&first[1..], "two");

        assert_eq!(second.len(), 3);
        assert_eq!(second[0], first[0]);
        assert_eq!(second.iter().filter(|m| m.role() == "system").count(), 1);
    }

    #[test]
    fn test_add_tool_messages() {
        let mut msgs = vec![Message::user("test")];
        let tc = ToolCall::new("id1", "record_unknown_question", r#"{"question":"?"}"#);
        PersonaBuilder::add_assistant_tool_calls(&mut msgs, None, vec![tc]);
        PersonaBuilder::add_tool_result(&mut msgs, "id1", r#"{"recorded":"ok"}"#);

        assert_eq!(msgs.len(), 3);
        assert_eq!(msgs[2], Message::tool_result("id1", r#"{"recorded":"ok"}"#));
    }
}
