//! HTTP transport adapter.
//!
//! | Route           | Operation                         |
//! |-----------------|-----------------------------------|
//! | `POST /data`    | ingest sensor reading             |
//! | `GET /control`  | read control intent               |
//! | `POST /control` | partial control write             |
//! | `GET /status`   | resolve (and commit) pump state   |
//! | `GET /health`   | coordinator + device liveness     |
//!
//! Write routes take the raw body and decode it leniently, so a malformed
//! request is answered with defaults instead of a 4xx.

use std::sync::Arc;

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    routing::{get, post},
};
use log::info;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::adapters::log_sink::LogEventSink;
use crate::adapters::time::SystemClock;
use crate::api::{Ack, ControlView, HealthView, StatusView, codec};
use crate::app::service::AppService;
use crate::error::{Error, Result};

/// Service type the coordinator binary runs.
pub type Coordinator = AppService<SystemClock, LogEventSink>;

type SharedCoordinator = Arc<Coordinator>;

/// Build the router.  `cors` adds a permissive CORS layer.
pub fn router(service: SharedCoordinator, cors: bool) -> Router {
    let app = Router::new()
        .route("/data", post(post_data))
        .route("/control", get(get_control).post(post_control))
        .route("/status", get(get_status))
        .route("/health", get(get_health))
        .with_state(service)
        .layer(TraceLayer::new_for_http());

    if cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}

/// Bind `addr` and serve until Ctrl-C / SIGTERM.
pub async fn serve(service: SharedCoordinator, addr: &str, cors: bool) -> Result<()> {
    let app = router(service, cors);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| Error::Bind {
            addr: addr.to_owned(),
            source,
        })?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(Error::Serve)?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::warn!("Ctrl-C handler unavailable: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                log::warn!("SIGTERM handler unavailable: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received");
}

// ============================================================================
// Handlers
// ============================================================================

async fn post_data(State(service): State<SharedCoordinator>, body: Bytes) -> Json<Ack> {
    service.ingest_sensor(codec::decode_sensor(&body));
    Json(Ack::SUCCESS)
}

async fn get_control(State(service): State<SharedCoordinator>) -> Json<ControlView> {
    Json(ControlView::from(&service.read_control()))
}

async fn post_control(State(service): State<SharedCoordinator>, body: Bytes) -> Json<Ack> {
    service.write_control(&codec::decode_control(&body));
    Json(Ack::UPDATED)
}

async fn get_status(State(service): State<SharedCoordinator>) -> Json<StatusView> {
    Json(StatusView::from(&service.query_status()))
}

async fn get_health(State(service): State<SharedCoordinator>) -> Json<HealthView> {
    Json(HealthView::from(&service.health()))
}
