//! Backend entry-point: loads configuration, connects the document store and
//! serves the resource endpoints.

use std::path::PathBuf;
use std::sync::Arc;

use actix_web::web;
use dotenvy::{Error as DotenvError, dotenv};
use mockable::{DefaultClock, DefaultEnv};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use marketplace::domain::ports::{RequestAuthenticator, StoreHealth};
use marketplace::domain::{
    AllowAllAuthenticator, BearerTokenAuthenticator, Client, Freelancer, Invoice, Project, User,
};
use marketplace::inbound::http::health::HealthState;
use marketplace::inbound::http::state::HttpStatePorts;
use marketplace::outbound::persistence::{MongoStore, StoreConfig};
use marketplace::server::{ServerConfig, create_server};
use marketplace::settings::{ServerSettings, settings_from_env};

enum EnvLoadStatus {
    Loaded(PathBuf),
    NotFound,
    Failed(DotenvError),
}

fn load_env_file() -> EnvLoadStatus {
    match dotenv() {
        Ok(path) => EnvLoadStatus::Loaded(path),
        Err(DotenvError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
            EnvLoadStatus::NotFound
        }
        Err(err) => EnvLoadStatus::Failed(err),
    }
}

fn report_env_status(status: &EnvLoadStatus) {
    match status {
        EnvLoadStatus::Loaded(path) => {
            info!(path = %path.display(), "loaded environment variables from file");
        }
        EnvLoadStatus::NotFound => {
            info!("no .env file found; using process environment only");
        }
        EnvLoadStatus::Failed(err) => {
            warn!(error = %err, "failed to load .env file");
        }
    }
}

fn build_authenticator(settings: &ServerSettings) -> Arc<dyn RequestAuthenticator> {
    match &settings.auth_token {
        Some(token) => {
            info!("bearer token authentication enabled");
            Arc::new(BearerTokenAuthenticator::new(token.as_str()))
        }
        None => {
            warn!("no bearer token configured; every request is let through");
            Arc::new(AllowAllAuthenticator)
        }
    }
}

/// Log a fatal start-up error and turn it into the process exit error.
fn startup_failure(context: &'static str, err: &dyn std::fmt::Display) -> std::io::Error {
    error!(error = %err, "{context}");
    std::io::Error::other(format!("{context}: {err}"))
}

/// Resolve once SIGTERM or SIGINT arrives.
#[cfg(unix)]
async fn shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut term = signal(SignalKind::terminate())?;
    let mut int = signal(SignalKind::interrupt())?;
    tokio::select! {
        _ = term.recv() => {},
        _ = int.recv() => {},
    }
    Ok(())
}

#[cfg(not(unix))]
async fn shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let env_status = load_env_file();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }
    report_env_status(&env_status);

    let settings = settings_from_env(&DefaultEnv::new())
        .map_err(|err| startup_failure("invalid configuration", &err))?;

    let store_config = StoreConfig::new(settings.mongodb_uri.as_str(), settings.database.as_str());
    let store = MongoStore::connect(&store_config)
        .await
        .map_err(|err| startup_failure("document store unavailable", &err))?;
    if let Err(error) = store.ping().await {
        warn!(%error, "document store did not answer the start-up ping");
    }

    let ports = HttpStatePorts {
        users: Arc::new(store.repository::<User>()),
        freelancers: Arc::new(store.repository::<Freelancer>()),
        clients: Arc::new(store.repository::<Client>()),
        projects: Arc::new(store.repository::<Project>()),
        invoices: Arc::new(store.repository::<Invoice>()),
        authenticator: build_authenticator(&settings),
        clock: Arc::new(DefaultClock),
    };
    let health_state = web::Data::new(HealthState::new(Arc::new(store)));

    let server = create_server(
        health_state.clone(),
        ServerConfig::new(settings.bind_addr, ports),
    )
    .map_err(|err| startup_failure("failed to bind http server", &err))?;
    let handle = server.handle();
    actix_web::rt::spawn(async move {
        if let Err(err) = shutdown_signal().await {
            warn!(error = %err, "shutdown signal handlers unavailable");
            return;
        }
        health_state.mark_unhealthy();
        info!("shutdown requested; draining connections");
        handle.stop(true).await;
    });
    server.await
}
