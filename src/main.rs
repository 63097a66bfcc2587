use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{Level, info, warn};

use bfhl::config::ServerConfig;
use bfhl::consts::{
    DEFAULT_AI_TIMEOUT_SECS, DEFAULT_GEMINI_BASE_URL, DEFAULT_IDENTITY, DEFAULT_MODEL,
    DEFAULT_PORT, FIBONACCI_CEILING,
};
use bfhl::dispatch::Dispatcher;
use bfhl::oracle::gemini::GeminiOracle;
use bfhl::server::{self, AppState};

#[derive(Parser)]
#[command(name = "bfhl", version, about = "One endpoint, five operations.")]
struct Cli {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Identity returned in every response envelope
    #[arg(long, env = "OFFICIAL_EMAIL", default_value = DEFAULT_IDENTITY)]
    identity: String,

    /// Gemini API key (AI requests fail without one)
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    gemini_api_key: Option<String>,

    /// Gemini model name
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    gemini_model: String,

    /// Gemini API base URL
    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_GEMINI_BASE_URL)]
    gemini_base_url: String,

    /// Timeout for the AI call in seconds
    #[arg(long, env = "AI_TIMEOUT_SECS", default_value_t = DEFAULT_AI_TIMEOUT_SECS)]
    ai_timeout: u64,

    /// Largest accepted fibonacci input
    #[arg(long, env = "MAX_FIBONACCI", default_value_t = FIBONACCI_CEILING)]
    max_fibonacci: u64,

    /// Reject non-integer lcm/hcf elements with 400 instead of 500
    #[arg(long, env = "STRICT_REDUCTIONS", default_value_t = false)]
    strict_reductions: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: Level,
}

impl From<Cli> for ServerConfig {
    fn from(cli: Cli) -> Self {
        Self {
            host: cli.host,
            port: cli.port,
            identity: cli.identity,
            gemini_api_key: cli.gemini_api_key,
            gemini_model: cli.gemini_model,
            gemini_base_url: cli.gemini_base_url,
            ai_timeout_secs: cli.ai_timeout,
            max_fibonacci: cli.max_fibonacci,
            strict_reductions: cli.strict_reductions,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; real environment variables still apply.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .init();

    let config = ServerConfig::from(cli).validated()?;

    info!(
        model = %config.gemini_model,
        strict_reductions = config.strict_reductions,
        max_fibonacci = config.max_fibonacci,
        "starting bfhl"
    );
    if config.gemini_api_key.is_none() {
        warn!("GEMINI_API_KEY not set; AI requests will fail");
    }

    let oracle = Arc::new(GeminiOracle::new(config.gemini())?);
    let state = Arc::new(AppState {
        identity: config.identity.clone(),
        dispatcher: Dispatcher::new(oracle, config.dispatch()),
    });

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    server::serve(listener, state).await
}
