//! Campaign Desk server binary.

use anyhow::Context;
use campaign_desk::{
    api::routes::create_app,
    cli::{
        init::{self, InitConfig, InitResult},
        output::Output,
        Cli, Commands,
    },
    AppConfig, AppState, DatabaseProvider,
};
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse_args();
    let output = Output::from_flags(cli.no_color);

    match cli.command {
        Some(Commands::Init {
            path,
            force,
            host,
            port,
        }) => {
            let result = init::run(
                InitConfig {
                    path,
                    force,
                    host,
                    port,
                },
                &output,
            );
            match result {
                InitResult::Success => Ok(()),
                InitResult::AlreadyExists => std::process::exit(1),
                InitResult::Error(e) => anyhow::bail!(e),
            }
        }
        Some(Commands::Config { full, validate }) => {
            show_config(&cli.config, full, validate, &output)
        }
        None => serve(&cli.config, cli.verbose, &output).await,
    }
}

async fn serve(config_path: &Path, verbose: bool, output: &Output) -> anyhow::Result<()> {
    let config = match AppConfig::load(config_path) {
        Ok(config) => config,
        Err(e) => {
            output.error(&e.to_string());
            output.hint("Run 'campaign-server init' to create campaign.toml");
            return Err(e.into());
        }
    };

    init_tracing(&config.server.log_level, verbose);
    output.banner();

    let auth = config.resolve_auth()?;
    let provider = DatabaseProvider::from_config(&config);
    tracing::info!("Opening {} database", provider.kind());
    let db = provider
        .create_client()
        .await
        .context("Failed to open database")?;

    let addr = config.bind_address();
    let state = AppState::new(config, db, &auth)?;
    let app = create_app(state)?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// `RUST_LOG` wins over the configured level; `--verbose` forces debug.
fn init_tracing(log_level: &str, verbose: bool) {
    let default = if verbose {
        "debug,tower_http=debug".to_string()
    } else {
        format!("{},tower_http=info", log_level)
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn show_config(path: &Path, full: bool, validate: bool, output: &Output) -> anyhow::Result<()> {
    output.header(&format!("Configuration: {}", path.display()));

    let config = if validate {
        match AppConfig::load(path) {
            Ok(config) => {
                output.success("Configuration is valid");
                config
            }
            Err(e) => {
                output.error(&e.to_string());
                return Err(e.into());
            }
        }
    } else {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        AppConfig::from_toml(&content)?
    };

    output.kv("bind", &config.bind_address());
    output.kv("log level", &config.server.log_level);
    output.kv("database", &config.database.url);
    output.kv("jwt secret env", &config.auth.jwt_secret_env);

    if full {
        output.kv("issuer", &config.auth.issuer);
        output.kv("audience", &config.auth.audience);
        output.kv("token lifetime", &format!("{}s", config.auth.access_expiry));
        output.header("CORS origins");
        for origin in &config.cors.allowed_origins {
            output.list_item(origin);
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
