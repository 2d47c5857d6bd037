use clap::{Parser, Subcommand};
use std::sync::Arc;

use kizuna_bot::application::errors::BotError;
use kizuna_bot::application::messaging::Router;
use kizuna_bot::domain::traits::RandomSource;
use kizuna_bot::infrastructure::adapters::{discord, ConsoleAdapter, DiscordHandler};
use kizuna_bot::infrastructure::api::ApiClient;
use kizuna_bot::infrastructure::config::Config;
use kizuna_bot::infrastructure::random::ThreadRandom;

#[derive(Parser)]
#[command(name = "kizuna-bot")]
#[command(about = "A chatty Discord companion bot", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Bot token (overrides config and BOT_TOKEN)
    #[arg(short, long)]
    token: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect to Discord and start answering
    Run,
    /// Chat with the bot on stdin/stdout
    Console,
    /// Show version
    Version,
    /// Print the default config
    InitConfig,
}

fn main() {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            let config = load_config(&cli.config, cli.token);
            if let Err(e) = block_on(run_discord(config)) {
                tracing::error!("Bot stopped: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Console => {
            let config = load_config(&cli.config, cli.token);
            if let Err(e) = block_on(run_console(config)) {
                tracing::error!("Console session failed: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Version => {
            println!("kizuna-bot v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => init_config(),
    }
}

fn load_config(path: &str, token_override: Option<String>) -> Config {
    let mut config = if std::path::Path::new(path).exists() {
        match Config::load(path) {
            Ok(config) => config.with_env(),
            Err(e) => {
                tracing::warn!("Failed to load config: {}, using defaults", e);
                Config::load_env()
            }
        }
    } else {
        Config::load_env()
    };

    if token_override.is_some() {
        config.bot.token = token_override;
    }
    config
}

fn block_on<F: std::future::Future<Output = Result<(), BotError>>>(future: F) -> Result<(), BotError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| BotError::Internal(format!("Failed to create runtime: {}", e)))?
        .block_on(future)
}

fn build_router(config: Arc<Config>) -> Result<Router, BotError> {
    let random: Arc<dyn RandomSource> = Arc::new(ThreadRandom);
    let api = ApiClient::new(config.clone(), random.clone())?;

    Ok(Router::new(config.bot.prefix.clone(), Arc::new(api), random)
        .with_rank_sample(config.features.rank_total_count)
        .with_featured_channel(config.features.featured_channel_id.clone()))
}

async fn run_discord(config: Config) -> Result<(), BotError> {
    let token = config.require_token()?.to_string();
    let invite_url = config.invite_url();
    let config = Arc::new(config);

    tracing::info!("Starting {} with prefix '{}'", config.bot.name, config.bot.prefix);

    let router = Arc::new(build_router(config)?);
    let handler = DiscordHandler::new(router).with_invite_url(invite_url);
    discord::run(&token, handler).await
}

async fn run_console(config: Config) -> Result<(), BotError> {
    let name = config.bot.name.clone();
    let router = build_router(Arc::new(config))?;
    ConsoleAdapter::new(name).run(&router).await
}

fn init_config() {
    match serde_yaml::to_string(&Config::default()) {
        Ok(yaml) => print!("{}", yaml),
        Err(e) => {
            tracing::error!("Failed to render default config: {}", e);
            std::process::exit(1);
        }
    }
}
