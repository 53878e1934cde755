//! Web server module for the form intake API.
//!
//! Routes:
//! - `POST /api/lead` and `POST /api/quote`: validate, relay by email, reply with JSON
//! - `GET /health`: liveness probe

pub mod handlers;
pub mod layers;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

pub use handlers::{handle_form, health, lead, quote, AppState, HealthResponse};
pub use layers::{cors_layer, panic_response, with_security_headers, SECURITY_HEADERS};

/// Build the full application router.
///
/// Fails only when `ALLOWED_ORIGIN` is not a valid header value.
pub fn router(state: AppState) -> Result<Router> {
    let routes = Router::new()
        .route("/health", get(health))
        .route("/api/lead", post(lead))
        .route("/api/quote", post(quote));

    with_layers(routes, state)
}

/// Wrap `routes` in the middleware stack, outermost first: tracing, security
/// headers, CORS, panic guard.
///
/// CORS sits outside the panic guard so panic responses still carry the
/// allow-origin header. The guard relies on unwinding; the release profile
/// must not set `panic = "abort"`.
fn with_layers(routes: Router<AppState>, state: AppState) -> Result<Router> {
    let cors = cors_layer(state.config.allowed_origin.as_deref())?;

    let app = routes
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors)
        .with_state(state);

    Ok(with_security_headers(app).layer(TraceLayer::new_for_http()))
}
