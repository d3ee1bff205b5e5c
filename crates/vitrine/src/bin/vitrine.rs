//! Vitrine CLI - widget MCP server
//!
//! Usage:
//!   vitrine serve                 # HTTP mode on port 8090
//!   vitrine serve -p 9000         # custom port
//!   vitrine serve --stdio         # stdio mode for host-spawned servers
//!   vitrine widgets               # print the widget catalog
//!   vitrine widgets -f json       # catalog as JSON

use std::sync::Arc;

use argh::FromArgs;

use vitrine::bundles::BundleCache;
use vitrine::config::ServerConfig;
use vitrine::mcp::{self, WidgetMcpServer};
use vitrine::widgets;

/// Vitrine - interactive UI widgets as MCP tools
#[derive(FromArgs)]
struct Args {
    /// show version information
    #[argh(switch, short = 'V')]
    version: bool,

    #[argh(subcommand)]
    command: Option<Command>,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Command {
    Serve(ServeArgs),
    Widgets(WidgetsArgs),
}

/// Run the widget MCP server
#[derive(FromArgs)]
#[argh(subcommand, name = "serve")]
struct ServeArgs {
    /// run in stdio mode (JSON-RPC over stdin/stdout)
    #[argh(switch)]
    stdio: bool,

    /// HTTP port (only used without --stdio, default: 8090)
    #[argh(option, short = 'p', default = "vitrine::mcp::MCP_PORT")]
    port: u16,

    /// advertised base URL for widget assets (default: http://127.0.0.1:<port>)
    #[argh(option, short = 'b')]
    base_url: Option<String>,
}

/// Print the registered widget catalog
#[derive(FromArgs)]
#[argh(subcommand, name = "widgets")]
struct WidgetsArgs {
    /// output format: table, json (default: table)
    #[argh(option, short = 'f', default = "String::from(\"table\")")]
    format: String,
}

/// Build the registry and bundle cache, then serve.
///
/// Startup is a strict barrier: a duplicate tool or a missing bundle
/// aborts here, before the server accepts any request.
async fn run_serve(args: ServeArgs) -> anyhow::Result<()> {
    let registry = Arc::new(widgets::build_registry()?);
    let bundles = Arc::new(BundleCache::load(registry.iter().map(|e| &e.descriptor))?);
    log::info!(
        "Registered {} widgets, {} bundles resident",
        registry.len(),
        bundles.len()
    );

    let config = ServerConfig::new(args.port, args.base_url);
    let server = WidgetMcpServer::new(registry, bundles, config.base_url.clone());

    if args.stdio {
        mcp::run_stdio(server).await
    } else {
        mcp::run_http(server, &config).await
    }
}

fn run_widgets(args: WidgetsArgs) -> anyhow::Result<()> {
    let registry = widgets::build_registry()?;
    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&registry.catalog())?);
    } else {
        for entry in registry.iter() {
            let d = &entry.descriptor;
            println!("{:<18} {:<14} {}", d.identifier, d.title, d.template_uri);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let args: Args = argh::from_env();

    if args.version {
        println!("vitrine {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    match args.command {
        None => {
            eprintln!("Vitrine - interactive UI widgets as MCP tools\n");
            eprintln!("Usage: vitrine <command>\n");
            eprintln!("Commands:");
            eprintln!("  serve     Run the widget MCP server:");
            eprintln!("              --stdio: JSON-RPC over stdin/stdout");
            eprintln!("              -p, --port <port>: HTTP mode (default: 8090)");
            eprintln!("              -b, --base-url <url>: advertised asset origin");
            eprintln!("  widgets   Print the registered widget catalog (-f table|json)");
            eprintln!("\nRun 'vitrine <command> --help' for more information.");
            Ok(())
        }
        Some(Command::Serve(serve_args)) => run_serve(serve_args).await,
        Some(Command::Widgets(widgets_args)) => run_widgets(widgets_args),
    }
}
