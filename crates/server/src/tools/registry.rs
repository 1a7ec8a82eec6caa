use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde_json::Value;

use waypoint_common::config::SearchDefaults;

use crate::backend::PlaceBackend;

/// Shared context available to all tool handlers.
pub struct ToolHandlerContext {
    pub backend: Arc<dyn PlaceBackend>,
    pub search_defaults: SearchDefaults,
}

/// Handler function signature — takes args and context, returns JSON or
/// an error string for the caller.
pub type ToolHandler = Arc<
    dyn Fn(
            Value,
            Arc<ToolHandlerContext>,
        ) -> Pin<Box<dyn Future<Output = Result<Value, String>> + Send>>
        + Send
        + Sync,
>;

/// Outcome of one tool invocation.
pub struct ToolExecutionResult {
    pub content: Value,
    pub is_error: bool,
}

/// Registry routing named tool invocations to handler functions.
pub struct ToolRegistry {
    handlers: HashMap<String, ToolHandler>,
    context: Arc<ToolHandlerContext>,
}

impl ToolRegistry {
    pub fn new(context: ToolHandlerContext) -> Self {
        Self {
            handlers: HashMap::new(),
            context: Arc::new(context),
        }
    }

    /// Register a tool handler by name.
    pub fn register(&mut self, name: &str, handler: ToolHandler) {
        self.handlers.insert(name.to_string(), handler);
    }

    /// Registered tool names, sorted for stable listings.
    pub fn tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Execute a tool call by name.
    pub async fn execute(&self, tool_name: &str, args: Value) -> ToolExecutionResult {
        let start = std::time::Instant::now();

        let handler = match self.handlers.get(tool_name) {
            Some(h) => h,
            None => {
                tracing::warn!(tool = %tool_name, "Unknown tool called");
                metrics::counter!("tools.execution.errors", "tool" => tool_name.to_string())
                    .increment(1);
                return ToolExecutionResult {
                    content: Value::String(format!(
                        "Unknown tool: '{}'. Available tools: {:?}",
                        tool_name,
                        self.tool_names()
                    )),
                    is_error: true,
                };
            }
        };

        let result = handler(args, Arc::clone(&self.context)).await;

        let latency = start.elapsed().as_secs_f64();
        metrics::histogram!("tools.execution.latency", "tool" => tool_name.to_string())
            .record(latency);
        metrics::counter!("tools.execution.count", "tool" => tool_name.to_string()).increment(1);

        match result {
            Ok(value) => {
                tracing::debug!(tool = %tool_name, latency_s = latency, "Tool call succeeded");
                ToolExecutionResult {
                    content: value,
                    is_error: false,
                }
            }
            Err(msg) => {
                tracing::warn!(tool = %tool_name, latency_s = latency, error = %msg, "Tool call failed");
                metrics::counter!("tools.execution.errors", "tool" => tool_name.to_string())
                    .increment(1);
                ToolExecutionResult {
                    content: Value::String(msg),
                    is_error: true,
                }
            }
        }
    }
}
