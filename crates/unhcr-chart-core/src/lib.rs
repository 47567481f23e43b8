pub mod content;
pub mod protocol;
pub mod tool;
pub mod utils;

pub use protocol::result::{CallToolResult, InitializeResult};
pub use tool::{Tool, ToolCall};
pub use unhcr_chart_error as error;
