use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use portfolio_images::infrastructure::{
    AppConfig, CliArgs, ConfigLoader, DiskImageCache, ImageProxy, UpstreamFetcher,
};
use portfolio_images::presentation::{ServerConfig, run_server};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    let stdout_layer = fmt::layer().with_target(true);

    if let Some(log_path) = &config.log_path {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(stdout_layer)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(stdout_layer)
            .init();
    }

    Ok(())
}

fn load_config(args: CliArgs) -> Result<AppConfig> {
    let loader =
        ConfigLoader::new().unwrap_or_else(|_| ConfigLoader::with_dir(PathBuf::from(".")));
    let mut config = loader.load_config(args.config.as_deref())?;
    config.merge_with_args(args);
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = dotenvy::dotenv()
        && !e.not_found()
    {
        eprintln!("Failed to load .env file: {e}");
    }

    let config = load_config(CliArgs::parse())?;
    init_logging(&config)?;

    info!(
        version = portfolio_images::VERSION,
        "Starting {}",
        portfolio_images::NAME
    );
    if let Some(path) = config.effective_config_path() {
        info!(path = %path.display(), "Configuration path");
    }

    let allow_list = config.allow_list();
    if allow_list.hosts().is_empty() {
        warn!("No CDN hosts are allow-listed; every proxy request will be rejected");
    }

    let upstream = UpstreamFetcher::new(
        allow_list.clone(),
        &config.upstream.user_agent,
        config.upstream_timeout(),
    )?;
    let disk_cache = DiskImageCache::new(&config.server.cache_dir);
    disk_cache.ensure_dir().await?;
    info!(dir = %disk_cache.cache_dir().display(), "Image cache ready");

    let proxy = ImageProxy::new(Arc::new(upstream), disk_cache, allow_list);

    let server_config = ServerConfig {
        addr: config.bind_addr()?,
        static_dir: config.server.static_dir.clone(),
        public_base_url: config.public_base_url(),
    };

    run_server(proxy, server_config).await?;

    Ok(())
}
