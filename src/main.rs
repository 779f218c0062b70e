use anyhow::Result;
use clap::{Parser, Subcommand};
use devto_client::{ClientConfig, ForemClient};
use devto_config::ServerConfig;
use devto_mcp::McpServer;
use devto_tools::ToolRegistry;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "devto-mcp-server")]
#[command(about = "MCP server exposing Dev.to article and user tools", long_about = None)]
struct Cli {
    #[arg(short, long, value_name = "FILE", default_value = "config.yaml")]
    config: PathBuf,

    #[arg(short, long, action = clap::ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the MCP server on stdin/stdout
    Serve,

    /// List registered tools
    Tools,

    /// Invoke a single tool and print its text result
    Call {
        /// Tool name, e.g. get_latest_articles
        #[arg(short, long)]
        name: String,

        /// Tool arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        args: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = if cli.config.exists() {
        info!("Loading configuration from: {:?}", cli.config);
        ServerConfig::from_yaml(&cli.config)?
    } else {
        info!("Using default configuration");
        ServerConfig::default()
    };

    let client = ForemClient::new(ClientConfig {
        base_url: config.api.base_url.clone(),
        timeout: Duration::from_secs(config.api.timeout_seconds),
        api_key: config.api.api_key.clone(),
    })?;
    let registry = Arc::new(ToolRegistry::with_default_tools(Arc::new(client)));

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let server = McpServer::new(
                config.server.name.clone(),
                env!("CARGO_PKG_VERSION"),
                registry,
            );
            server.run_stdio().await?;
        }
        Commands::Tools => {
            list_tools(&registry);
        }
        Commands::Call { name, args } => {
            let tool = registry
                .get(&name)
                .ok_or_else(|| anyhow::anyhow!("unknown tool: {name}"))?;
            let args: serde_json::Value = serde_json::from_str(&args)?;
            let output = tool.execute(args).await?;
            println!("{output}");
        }
    }

    Ok(())
}

fn list_tools(registry: &ToolRegistry) {
    for tool in registry.get_all() {
        println!("{}", tool.name());
        println!("   {}", tool.description());
        println!();
    }
}

/// Logs go to stderr; stdout is reserved for protocol traffic when serving.
fn init_logging(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
