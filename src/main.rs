//! WebAssist - voice and text driven browser automation.
//!
//! Main entry point: loads configuration, connects to Chrome and runs the
//! command loop on the console channel.

mod console;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use webassist_browser_cdp::{BrowserManager, BrowserManagerConfig};
use webassist_config::{Config, ConfigLoader, ConfigValidator, InputMode, LlmConfig};
use webassist_core::{
    ActionPlanner, Assistant, Engine, GenerationOptions, Session, TextGenerator,
};
use webassist_protocols::{LLMProvider, PageDriver, SpeechChannel};
use webassist_provider_gemini::GeminiProvider;

use crate::console::ConsoleChannel;

/// WebAssist CLI.
#[derive(Parser)]
#[command(name = "webassist")]
#[command(about = "Voice and text driven browser automation assistant")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/webassist.toml")]
    config: PathBuf,

    /// Initial input mode (text or voice)
    #[arg(short, long)]
    mode: Option<InputMode>,

    /// Run Chrome without a window
    #[arg(long)]
    headless: bool,

    /// Page opened before the first command
    #[arg(long)]
    start_url: Option<String>,

    /// Gemini API key, used when the configuration has none
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Run a single command and exit
    #[arg(long)]
    command: Option<String>,

    /// Also log to the console
    #[arg(short, long)]
    verbose: bool,
}

fn webassist_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".webassist")
}

/// Initialize tracing with a daily log file and an optional console layer.
fn init_tracing(console: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = webassist_dir().join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("webassist")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The worker flushes until the guard drops.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout carries the conversation, so console logs go to stderr.
    let console_layer = console.then(|| {
        fmt::layer()
            .with_target(true)
            .with_ansi(true)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = ConfigLoader::load_or_default(&cli.config)?;

    if let Some(mode) = cli.mode {
        config.voice.initial_mode = mode;
    }
    if cli.headless {
        config.browser.headless = true;
    }
    if let Some(url) = &cli.start_url {
        config.browser.start_url = url.clone();
    }
    if config.llm.api_key.as_deref().is_none_or(str::is_empty) {
        config.llm.api_key = cli.api_key.clone();
    }

    let result = ConfigValidator::validate(&config);
    for warning in &result.warnings {
        warn!("Config warning: {}: {}", warning.path, warning.message);
    }
    if !result.is_valid() {
        for err in &result.errors {
            error!("Config error: {}", err);
        }
        return Err(format!("invalid configuration in {}", cli.config.display()).into());
    }

    Ok(config)
}

/// The action planner, when an LLM is configured and reachable with a key.
fn build_planner(llm: &LlmConfig) -> Option<Arc<ActionPlanner>> {
    if !llm.is_enabled() {
        info!("LLM planner disabled");
        return None;
    }

    let provider: Arc<dyn LLMProvider> = match llm.provider.as_str() {
        "gemini" => match llm.api_key.as_deref().filter(|k| !k.is_empty()) {
            Some(key) => Arc::new(GeminiProvider::new(key.to_string())),
            None => {
                warn!("No Gemini API key; running without the LLM planner");
                return None;
            }
        },
        other => {
            warn!("Unknown LLM provider '{}'; running without the LLM planner", other);
            return None;
        }
    };

    info!("LLM planner: provider={}, model={}", provider.id(), llm.model);
    let options = GenerationOptions {
        temperature: llm.temperature,
        max_tokens: llm.max_tokens,
        timeout: Duration::from_secs(llm.timeout_seconds),
    };
    Some(Arc::new(ActionPlanner::new(
        TextGenerator::new(provider, llm.model.clone()),
        options,
    )))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_tracing(cli.verbose)?;

    let config = load_config(&cli)?;
    info!("WebAssist v{} starting", env!("CARGO_PKG_VERSION"));

    let browser = BrowserManager::new(BrowserManagerConfig::from(&config.browser));
    let driver: Arc<dyn PageDriver> = Arc::new(browser.driver().await?);

    let start_url = &config.browser.start_url;
    if !start_url.is_empty() {
        if let Err(e) = driver
            .goto(start_url, config.automation.navigation_timeout())
            .await
        {
            warn!("Could not open start page {}: {}", start_url, e);
        }
    }

    let channel: Arc<dyn SpeechChannel> = Arc::new(ConsoleChannel::new("> "));
    let engine = Engine::new(
        driver,
        channel,
        build_planner(&config.llm),
        config.automation.clone(),
    );
    let mut assistant = Assistant::new(engine, Session::from_config(&config));

    match &cli.command {
        Some(command) => {
            assistant.process(command).await;
        }
        None => {
            tokio::select! {
                _ = assistant.run() => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupted");
                }
            }
        }
    }

    if let Err(e) = browser.shutdown().await {
        warn!("Browser shutdown failed: {}", e);
    }
    info!("WebAssist stopped");
    Ok(())
}
