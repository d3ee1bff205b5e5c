//! Request dispatcher: one uniform response envelope per tool call.
//!
//! The pipeline is lookup -> validate -> invoke -> wrap, and every terminal
//! state produces exactly one `CallToolResult`. Failures never escape this
//! boundary as protocol errors; they are folded into the error shape of the
//! envelope so hosts need exactly one parsing path for success and one for
//! failure, regardless of which tool was invoked.

use std::sync::Arc;

use rmcp::model::{CallToolResult, Content, Meta};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::registry::{ToolRegistry, WidgetReply};
use crate::schema::ValidationError;
use crate::widget::WidgetDescriptor;

/// Terminal failure states of one dispatch. The display text is the
/// caller-visible message, so every variant names what went wrong and what
/// to do next.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Unknown tool '{name}'. Available tools: {available}")]
    UnknownTool { name: String, available: String },
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("Tool '{tool}' failed: {message}")]
    Handler { tool: String, message: String },
}

/// Stateless per-request dispatcher over an immutable registry.
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
    base_url: String,
}

impl Dispatcher {
    pub fn new(registry: Arc<ToolRegistry>, base_url: impl Into<String>) -> Self {
        Self {
            registry,
            base_url: base_url.into(),
        }
    }

    /// Handle one tool call. Never fails past this boundary.
    pub fn dispatch(&self, name: &str, arguments: Option<&Map<String, Value>>) -> CallToolResult {
        match self.try_dispatch(name, arguments) {
            Ok(result) => result,
            Err(err) => {
                log::debug!("tool call '{}' rejected: {}", name, err);
                error_envelope(err.to_string())
            }
        }
    }

    fn try_dispatch(
        &self,
        name: &str,
        arguments: Option<&Map<String, Value>>,
    ) -> Result<CallToolResult, DispatchError> {
        let entry = self
            .registry
            .lookup(name)
            .ok_or_else(|| DispatchError::UnknownTool {
                name: name.to_string(),
                available: self.registry.names().join(", "),
            })?;

        let empty = Map::new();
        let record = entry.schema.validate(arguments.unwrap_or(&empty))?;

        let reply = (entry.handler)(&record).map_err(|message| DispatchError::Handler {
            tool: name.to_string(),
            message,
        })?;

        Ok(success_envelope(&entry.descriptor, reply, &self.base_url))
    }
}

/// Success shape: summary text, structured content, and invocation
/// metadata (template reference plus status strings) from the descriptor.
fn success_envelope(
    descriptor: &WidgetDescriptor,
    reply: WidgetReply,
    base_url: &str,
) -> CallToolResult {
    let mut meta = descriptor.ui_meta(base_url);
    meta.insert(
        "invoking".to_string(),
        Value::String(descriptor.invoking.to_string()),
    );
    meta.insert(
        "invoked".to_string(),
        Value::String(descriptor.invoked.to_string()),
    );
    CallToolResult {
        content: vec![Content::text(reply.summary)],
        structured_content: Some(reply.structured),
        is_error: Some(false),
        meta: Some(Meta(meta)),
    }
}

/// Error shape: one actionable text block, no structured content, no meta.
fn error_envelope(message: String) -> CallToolResult {
    CallToolResult {
        content: vec![Content::text(message)],
        structured_content: None,
        is_error: Some(true),
        meta: None,
    }
}
