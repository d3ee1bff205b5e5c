//! MCP server surface for the widget tools.
//!
//! Wires the registry, dispatcher, and bundle cache into an rmcp
//! `ServerHandler`: `tools/list` carries each widget's declarative schema
//! and `_meta.ui` block, `tools/call` flows through the dispatcher, and
//! widget bundles are exposed as `ui://` resources. Runs over streamable
//! HTTP behind axum or over stdio for host-spawned processes.

use std::sync::Arc;

use rmcp::model::{
    Annotated, CallToolRequestParams, CallToolResult, Implementation, ListResourcesResult,
    ListToolsResult, Meta, PaginatedRequestParams, ProtocolVersion, RawResource,
    ReadResourceRequestParams, ReadResourceResult, ResourceContents, ServerCapabilities,
    ServerInfo, Tool, ToolAnnotations,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::ErrorData as McpError;
use rmcp::ServerHandler;

use crate::bundles::BundleCache;
use crate::config::ServerConfig;
use crate::dispatch::Dispatcher;
use crate::registry::ToolRegistry;
use crate::widget::MIME_TYPE;

/// Default port for the widget MCP server.
pub const MCP_PORT: u16 = 8090;

/// Widget MCP server: immutable registry + bundle cache behind rmcp.
#[derive(Clone)]
pub struct WidgetMcpServer {
    registry: Arc<ToolRegistry>,
    bundles: Arc<BundleCache>,
    dispatcher: Arc<Dispatcher>,
    base_url: String,
}

impl WidgetMcpServer {
    /// Both the registry and the bundle cache must be fully populated
    /// before construction; nothing is loaded lazily at request time.
    pub fn new(
        registry: Arc<ToolRegistry>,
        bundles: Arc<BundleCache>,
        base_url: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into();
        let dispatcher = Arc::new(Dispatcher::new(registry.clone(), base_url.clone()));
        Self {
            registry,
            bundles,
            dispatcher,
            base_url,
        }
    }

    fn tools(&self) -> Vec<Tool> {
        self.registry
            .iter()
            .map(|entry| {
                let d = &entry.descriptor;
                Tool {
                    name: d.identifier.into(),
                    title: Some(d.title.into()),
                    description: Some(d.description.into()),
                    input_schema: Arc::new(entry.schema.to_json_schema()),
                    output_schema: None,
                    annotations: Some(ToolAnnotations {
                        read_only_hint: Some(true),
                        destructive_hint: Some(false),
                        idempotent_hint: Some(true),
                        open_world_hint: Some(false),
                        ..Default::default()
                    }),
                    icons: None,
                    execution: None,
                    meta: Some(Meta(d.ui_meta(&self.base_url))),
                }
            })
            .collect()
    }
}

impl ServerHandler for WidgetMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(format!(
                "Vitrine widget server — every tool renders an interactive UI widget.\n\
                 Calling a tool returns structured content plus the ui:// template the\n\
                 host mounts. All tools accept an empty argument object and fill in\n\
                 their defaults; unknown argument keys are rejected.\n\
                 Tools: {}",
                self.registry.names().join(", ")
            )),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tools(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        // All failure paths fold into the envelope at the dispatcher
        // boundary; tool-shaped problems never become protocol errors.
        Ok(self
            .dispatcher
            .dispatch(&request.name, request.arguments.as_ref()))
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        let resources = self
            .registry
            .iter()
            .map(|entry| {
                let d = &entry.descriptor;
                Annotated {
                    raw: RawResource {
                        uri: d.template_uri.to_string(),
                        name: d.identifier.to_string(),
                        title: Some(d.title.to_string()),
                        description: Some(format!("HTML template for the {} widget", d.title)),
                        mime_type: Some(MIME_TYPE.to_string()),
                        size: None,
                        icons: None,
                        meta: None,
                    },
                    annotations: None,
                }
            })
            .collect();
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let uri = request.uri.as_str();
        let bundle = self.bundles.get(uri).ok_or_else(|| {
            let mut known: Vec<&str> = self.bundles.uris().collect();
            known.sort_unstable();
            McpError::invalid_request(
                format!(
                    "Unknown resource '{}'. Known widget templates: {}",
                    uri,
                    known.join(", ")
                ),
                None,
            )
        })?;
        Ok(ReadResourceResult {
            contents: vec![ResourceContents::TextResourceContents {
                uri: uri.to_string(),
                mime_type: Some(MIME_TYPE.to_string()),
                text: bundle.html.clone(),
                meta: None,
            }],
        })
    }
}

/// Start the MCP HTTP server: streamable MCP mounted at `/mcp`, widget
/// assets and the catalog on the same listener. Blocks until shutdown.
pub async fn run_http(server: WidgetMcpServer, config: &ServerConfig) -> anyhow::Result<()> {
    use rmcp::transport::streamable_http_server::{
        session::local::LocalSessionManager, StreamableHttpService,
    };

    let registry = server.registry.clone();
    let bundles = server.bundles.clone();
    let server_for_factory = server;

    let mcp_service = StreamableHttpService::new(
        move || Ok(server_for_factory.clone()),
        LocalSessionManager::default().into(),
        Default::default(),
    );

    let router = axum::Router::new()
        .nest_service("/mcp", mcp_service)
        .merge(crate::http::router(registry, bundles));

    let bind_addr = format!("127.0.0.1:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    log::info!("MCP server listening on http://{}/mcp", bind_addr);
    log::info!("Widget assets at {}/assets", config.base_url);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("MCP server stopped.");
    Ok(())
}

/// Serve MCP over stdio, for hosts that spawn the server as a child
/// process. stdout carries only JSON-RPC; logs go to stderr.
pub async fn run_stdio(server: WidgetMcpServer) -> anyhow::Result<()> {
    use rmcp::transport::io::stdio;
    use rmcp::ServiceExt;

    log::info!("MCP server ready on stdio");
    let service = server.serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        let mut sigterm = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler");
        tokio::select! {
            _ = ctrl_c => {},
            _ = sigterm.recv() => {},
        }
    }

    #[cfg(not(unix))]
    ctrl_c.await.expect("failed to install Ctrl+C handler");

    log::info!("Shutdown signal received");
}
