mod config;

use std::path::Path;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use solace_api::{AppState, AppStateInner};
use solace_auth::{AuthService, TokenIssuer};
use solace_companion::{CompletionBackend, Dispatcher, FallbackResponder, RemoteCompletion};
use solace_db::Database;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env.local wins over .env
    config::load_env_files(Path::new("."));

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "solace=debug,solace_api=debug,solace_auth=debug,solace_companion=debug,solace_db=info,tower_http=debug"
                    .into()
            }),
        )
        .init();

    let config = Config::from_env()?;

    // Init credential store
    let db = if config.db_path == Path::new(":memory:") {
        info!("Using an in-memory database; accounts will not survive a restart");
        Database::open_in_memory()?
    } else {
        Database::open(&config.db_path)?
    };
    let auth = AuthService::new(db, TokenIssuer::new(&config.jwt_secret));

    // Chat pipeline
    let backend: Option<Arc<dyn CompletionBackend>> = match config.llm {
        Some(llm) => {
            let remote = RemoteCompletion::new(llm)?;
            info!("Remote completions enabled (model {})", remote.model());
            Some(Arc::new(remote))
        }
        None => {
            info!("SOLACE_LLM_API_KEY not set; chat will use the local fallback only");
            None
        }
    };
    let dispatcher = Dispatcher::new(backend, FallbackResponder::builtin()?);

    let state: AppState = Arc::new(AppStateInner {
        auth,
        dispatcher,
        secure_cookies: config.production,
    });

    let app = solace_api::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    info!("Solace server listening on {}", config.addr);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
                }
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                ctrl_c.await.ok();
                info!("Received Ctrl+C, shutting down...");
            }
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
