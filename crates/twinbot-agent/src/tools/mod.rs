//! Tool modules for the Twinbot agent.

pub mod base;
pub mod recording;
pub mod registry;

pub use base::{optional_string, parse_arguments, require_string, Tool};
pub use recording::{RecordUnknownQuestionTool, RecordUserDetailsTool};
pub use registry::ToolRegistry;
