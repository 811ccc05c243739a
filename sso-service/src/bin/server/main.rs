use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use sso_service::config::Config;
use sso_service::domain::auth::service::AuthService;
use sso_service::inbound::grpc::AuthGrpcService;
use sso_service::outbound::repositories;
use sso_service::outbound::repositories::SqliteAppRepository;
use sso_service::outbound::repositories::SqliteUserRepository;
use sso_service::outbound::token::JwtTokenIssuer;
use sso_service::proto::auth_server::AuthServer;
use sso_service::telemetry;
use tonic::transport::Server;

/// `sso-service` command arguments.
#[derive(Debug, Parser)]
#[command(name = "sso-service", about = "Single sign-on gRPC service", version)]
struct CliArgs {
    /// Configuration file layered over the defaults. Falls back to `CONFIG_PATH`.
    #[arg(long = "config-path", env = "CONFIG_PATH", value_name = "path")]
    config_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = CliArgs::parse();
    let config = Config::load(args.config_path.as_deref())?;
    let token_ttl = config.token_ttl()?;

    telemetry::init(config.env);

    tracing::info!(
        service = "sso-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    tracing::info!(
        env = ?config.env,
        database_url = %config.database.url,
        grpc_port = config.server.grpc_port,
        timeout_seconds = config.server.timeout_seconds,
        token_ttl_seconds = config.token.ttl_seconds,
        "Configuration loaded"
    );

    let pool = repositories::connect(&config.database).await?;
    tracing::info!(database = "sqlite", "Database connection pool created");

    repositories::MIGRATOR.run(&pool).await?;
    tracing::info!(database = "sqlite", "Database migrations completed");

    let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
    let app_repository = Arc::new(SqliteAppRepository::new(pool.clone()));
    let token_issuer = Arc::new(JwtTokenIssuer::new());

    let auth_service = Arc::new(AuthService::new(
        user_repository,
        app_repository,
        token_issuer,
        token_ttl,
    ));

    let grpc_address: SocketAddr = format!("0.0.0.0:{}", config.server.grpc_port).parse()?;
    let grpc_service = AuthGrpcService::new(auth_service);
    tracing::info!(
        address = %grpc_address,
        port = config.server.grpc_port,
        protocol = "grpc",
        "gRpc server listening"
    );

    Server::builder()
        .timeout(config.request_timeout())
        .add_service(AuthServer::new(grpc_service))
        .serve_with_shutdown(grpc_address, shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Service stopped");

    Ok(())
}

/// Resolves on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!(signal = "SIGINT", "Stopping service"),
        _ = terminate => tracing::info!(signal = "SIGTERM", "Stopping service"),
    }
}
