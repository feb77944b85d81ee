use figma_image_gateway::config::GatewayConfig;
use figma_image_gateway::server;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        eprintln!("Usage: {} [--bind <addr:port>]", args[0]);
        eprintln!("Required environment: FIGMA_TOKEN, ADMIN_USER, ADMIN_PASS");
        eprintln!("Optional: GATEWAY_BIND, FIGMA_API_BASE, STORAGE_DIR, EDGE_CACHE_TTL_SECS, EDGE_CACHE_MAX_BYTES");
        std::process::exit(0);
    }

    let config = GatewayConfig::from_env()?.with_args(&args)?;

    tracing::info!("Starting gateway on {}", config.bind_addr);
    tracing::info!("Rendering API at {}", config.figma_api_base);

    server::run(config).await
}
