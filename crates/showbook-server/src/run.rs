use axum::{routing::get, Router};
use futures::FutureExt;
use showbook_app::{error::panic_response, pages, state::AppState};
use tokio::net::TcpListener;
use tower_http::{catch_panic::CatchPanicLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;

use crate::{build_state, config::ServerConfig, error::Result};

pub async fn run(args: ServerConfig) -> Result<()> {
    let state = build_state(&args).await?;
    run_with_state(args, state).await
}

pub async fn run_with_state(args: ServerConfig, state: AppState) -> Result<()> {
    let shutdown = tokio::signal::ctrl_c().map(|_| ());
    run_graceful_with_state(args, state, shutdown).await
}

pub async fn run_graceful_with_state<S>(
    args: ServerConfig,
    state: AppState,
    shutdown_signal: S,
) -> Result<()>
where
    S: std::future::Future<Output = ()> + Send + 'static,
{
    let ip: std::net::IpAddr = args.listen_address.parse()?;
    let addr = std::net::SocketAddr::from((ip, args.port));
    let listener = TcpListener::bind(&addr).await?;
    serve(listener, &args, state, shutdown_signal).await
}

/// Serves on already bound listener until shutdown signal completes
pub async fn serve<S>(
    listener: TcpListener,
    args: &ServerConfig,
    state: AppState,
    shutdown_signal: S,
) -> Result<()>
where
    S: std::future::Future<Output = ()> + Send + 'static,
{
    let app = main_router(state, args);
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server stopped");
    Ok(())
}

pub fn main_router(state: AppState, args: &ServerConfig) -> Router<()> {
    let mut router = Router::new()
        .route("/", get(pages::home))
        .nest("/venues", pages::venue::router())
        .nest("/artists", pages::artist::router())
        .nest("/shows", pages::show::router())
        .fallback(pages::not_found)
        .with_state(state)
        .route("/health", get(pages::health));

    if let Some(static_dir) = &args.static_dir {
        router = router.nest_service("/static", ServeDir::new(static_dir));
    }

    router
        .layer(tower_cookies::CookieManagerLayer::new())
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
}
