//! Application assembly: routes, global middleware, startup connection check, shutdown.

use crate::docs::swagger_ui;
use crate::routes::{common_routes, product_routes, PRODUCTS_PREFIX};
use crate::state::AppState;
use crate::store::ProductStore;
use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, HeaderValue, Method, Request},
    Router,
};
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{info_span, Span};

/// Largest accepted request body (100 KiB).
pub const BODY_LIMIT_BYTES: usize = 100 * 1024;

/// Allow cross-origin requests from `frontend_url` only.
pub fn cors_layer(frontend_url: &str) -> Result<CorsLayer, axum::http::header::InvalidHeaderValue> {
    let origin = HeaderValue::from_str(frontend_url.trim_end_matches('/'))?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([CONTENT_TYPE]))
}

/// Full application router: products under `/api/products`, docs under `/api-docs`,
/// probes at the root. `cors` is applied to every route when given.
pub fn app(state: AppState, cors: Option<CorsLayer>) -> Router {
    let mut router = Router::new()
        .merge(common_routes(state.clone()))
        .nest(PRODUCTS_PREFIX, product_routes(state))
        .merge(swagger_ui());

    if let Some(cors) = cors {
        router = router.layer(cors);
    }

    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http().make_span_with(make_span))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES)),
    )
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("none");
    info_span!(
        "http-request",
        method = %request.method(),
        path = request.uri().path(),
        request_id
    )
}

/// One connection attempt at startup, creating the products table on success.
/// Failure is logged and swallowed: the server keeps running and requests
/// fail in the data access layer until storage is reachable.
pub async fn connect_to_db(store: &dyn ProductStore) -> bool {
    match store.sync().await {
        Ok(()) => {
            tracing::info!("Connection has been established successfully");
            true
        }
        Err(e) => {
            tracing::error!(error = %e, "Unable to connect to the database");
            false
        }
    }
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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
    tracing::info!("Gracefully shutdown");
}
