//! Vitrine — interactive UI widgets served as MCP tools.
//!
//! A conversational host calls a widget tool, receives shape-stable
//! structured content plus a `ui://` template reference, and mounts the
//! pre-built HTML bundle that this server exposes as an MCP resource.
//!
//! Request flow: tool call -> registry lookup -> schema validation ->
//! handler -> response envelope. The registry and the bundle cache are
//! built once at startup and read-only afterwards; all request handling
//! is lock-free lookups over immutable state.

pub mod bundles;
pub mod config;
pub mod dispatch;
pub mod http;
pub mod mcp;
pub mod registry;
pub mod schema;
pub mod widget;
pub mod widgets;
