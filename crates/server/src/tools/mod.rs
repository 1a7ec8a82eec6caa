pub mod envelope;
pub mod handlers;
pub mod registry;

pub use handlers::register_tools;
pub use registry::{ToolExecutionResult, ToolHandler, ToolHandlerContext, ToolRegistry};
