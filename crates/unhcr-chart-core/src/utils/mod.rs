pub mod cleanup;
pub mod parse_message;

pub use cleanup::CleanupStream;
pub use parse_message::parse_json_rpc_message;
