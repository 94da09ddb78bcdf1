use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    routing::get,
    Router,
};
use configuration::Settings;
use database::DbRepository;
use service::{GuestBook, GuestBookService};
use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::Level;

pub mod error;
pub mod handlers;

/// Drafts are at most a few kilobytes; anything far beyond that is not a guest book entry.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub guestbook: Arc<dyn GuestBook>,
}

/// Builds the full router: routes, fallbacks, CORS and request logging.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    // One span per request plus a completion event with status and latency.
    let trace = TraceLayer::new_for_http()
        .make_span_with(|request: &axum::http::Request<_>| {
            tracing::info_span!(
                "http.request",
                method = %request.method(),
                path = %request.uri().path(),
            )
        })
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        );

    Router::new()
        .route(
            "/",
            get(handlers::api_info).fallback(handlers::method_not_allowed),
        )
        .route(
            "/health",
            get(handlers::health).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/v1/health",
            get(handlers::health_with_store).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/v1/guestbook",
            get(handlers::list_messages)
                .post(handlers::create_message)
                .fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/v1/guestbook/:id",
            get(handlers::get_message).fallback(handlers::message_method_not_allowed),
        )
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(trace)
}

/// The main function to configure and run the web server.
///
/// Connects the pool, makes sure the schema exists, serves until SIGINT or
/// SIGTERM, drains for at most `shutdown_timeout` and finally closes the pool.
pub async fn run_server(settings: &Settings) -> anyhow::Result<()> {
    let pool = database::connect(&settings.database).await?;
    let repo = Arc::new(DbRepository::new(pool.clone()));
    let guestbook = GuestBookService::new(repo, settings.server.request_timeout);
    guestbook.initialize_schema().await?;

    let app = build_router(AppState {
        guestbook: Arc::new(guestbook),
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.server.port));
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Web server started and listening");

    serve(
        listener,
        app,
        shutdown_signal(),
        settings.server.shutdown_timeout,
    )
    .await?;

    pool.close().await;
    tracing::info!("Database connection closed");
    Ok(())
}

/// Serves `app` until `shutdown` resolves, then waits up to `grace` for
/// in-flight requests before dropping whatever is still open.
pub async fn serve<F>(
    listener: TcpListener,
    app: Router,
    shutdown: F,
    grace: Duration,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (signalled_tx, signalled_rx) = tokio::sync::oneshot::channel::<()>();
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            tracing::info!("Shutting down server...");
            let _ = signalled_tx.send(());
        })
        .into_future();

    let drain_deadline = async move {
        match signalled_rx.await {
            Ok(()) => tokio::time::sleep(grace).await,
            // The server stopped on its own; let its result win.
            Err(_) => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        result = server => {
            tracing::info!("Server gracefully stopped");
            result
        }
        _ = drain_deadline => {
            tracing::warn!(?grace, "Shutdown grace period elapsed, dropping open connections");
            Ok(())
        }
    }
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
