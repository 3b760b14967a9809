//! Twinbot Agent — conversation loop, tools, persona context and knowledge.
//!
//! This crate contains:
//! - **knowledge**: Profile + summary documents loaded at startup
//! - **context**: System prompt and message list construction
//! - **tools**: Tool trait, registry, and the two recording tools
//! - **agent_loop**: The LLM ↔ tool-calling turn

pub mod agent_loop;
pub mod context;
pub mod knowledge;
pub mod tools;

pub use agent_loop::{default_tools, AgentLoop, DEFAULT_MAX_ITERATIONS};
pub use context::PersonaBuilder;
pub use knowledge::KnowledgeBase;
pub use tools::{Tool, ToolRegistry};
