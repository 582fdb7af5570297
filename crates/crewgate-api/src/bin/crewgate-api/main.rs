use clap::Parser;
use crewgate::{ChatCompletionEngine, EngineExt};
use crewgate_api::config::LogFormat;
use crewgate_api::{ApiConfig, AppState, build_app};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Crewgate API Server
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(short = 'H', long, env = "CREWGATE_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "CREWGATE_PORT")]
    port: Option<u16>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "CREWGATE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Config file path
    #[arg(short, long, env = "CREWGATE_CONFIG")]
    config_file: Option<PathBuf>,

    /// Disable Swagger UI
    #[arg(long, env = "CREWGATE_DISABLE_SWAGGER", default_value_t = false)]
    disable_swagger: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    let dotenv_loaded = crewgate::load_dotenv();

    // Load configuration
    let mut config = ApiConfig::load(cli.config_file.as_deref())?;

    // Override with CLI options
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(log_level) = cli.log_level {
        config.log_level = log_level;
    }
    if cli.disable_swagger {
        config.enable_swagger = false;
    }

    init_logging(&config);

    match &cli.config_file {
        Some(path) => info!("Configuration loaded from: {}", path.display()),
        None => info!("No config file given. Using default configuration."),
    }
    if dotenv_loaded {
        debug!("Loaded environment from .env");
    }

    let addr = config.socket_addr()?;

    // Initialize engine and application state
    let engine = ChatCompletionEngine::from_config(&config.crew.llm)
        .map_err(|e| anyhow::anyhow!("Failed to create engine: {}", e))?;
    if !engine.has_api_key() {
        warn!(
            "${} is not set; capability requests will fail until it is",
            config.crew.llm.api_key_env
        );
    }
    let state = AppState::from_config(engine.shared(), &config.crew);

    if state.tokens.is_empty() {
        warn!("No auth tokens configured; every capability request will be rejected");
    }

    // Build application
    let app = build_app(state.clone(), &config);

    // Start server
    info!("Starting server on: {}", addr);
    if config.enable_swagger {
        info!("Swagger UI: http://{}/swagger-ui", addr);
    }
    info!(
        "Model: {} (max_tokens={}, temperature={})",
        config.crew.llm.model, config.crew.llm.max_tokens, config.crew.llm.temperature
    );
    info!("Enabled features: {:?}", state.features().enabled());

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}

fn init_logging(config: &ApiConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| config.log_filter().into());
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Full => registry.with(fmt::layer()).init(),
        LogFormat::Compact => registry.with(fmt::layer().compact()).init(),
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
