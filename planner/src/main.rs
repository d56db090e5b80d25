use std::net::SocketAddr;
use std::process::ExitCode;

use clap::Parser;
use planner::{cors_layer, create_router, config::PlannerConfig, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Route planning facade between a map front-end and the geocoding/routing services.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:8080")]
    listen: SocketAddr,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "planner=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let config = match PlannerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("configuration error: {err}");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(
        routing = %config.routing_base_url,
        geocoder = %config.geocoder_base_url,
        "configuration loaded"
    );

    let state = match AppState::from_config(&config) {
        Ok(state) => state,
        Err(err) => {
            tracing::error!("failed to build HTTP client: {err}");
            return ExitCode::FAILURE;
        }
    };
    let cors = match cors_layer(&config.frontend_origin) {
        Ok(cors) => cors,
        Err(err) => {
            tracing::error!("invalid FRONTEND_ORIGIN {:?}: {err}", config.frontend_origin);
            return ExitCode::FAILURE;
        }
    };
    let app = create_router(state).layer(cors);

    let listener = match tokio::net::TcpListener::bind(cli.listen).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind {}: {err}", cli.listen);
            return ExitCode::FAILURE;
        }
    };
    tracing::info!("starting planner on http://{}", cli.listen);
    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!("server error: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
