use axum::extract::rejection::JsonRejection;
use axum::{extract::State, http::StatusCode, routing::{get, post}, Json, Router};
use precis::{summarize, SummaryReport, SummaryRequest, TextGenerator};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer, AllowOrigin};
use tower_http::trace::TraceLayer;

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<dyn TextGenerator>,
}

pub fn build_app(generator: Arc<dyn TextGenerator>) -> Router {
    let app_state = AppState { generator };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/summarize", post(summarize_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn error(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<ErrorBody>) {
    (status, Json(ErrorBody { error: message.into() }))
}

pub async fn summarize_handler(
    State(state): State<AppState>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> Result<Json<SummaryReport>, (StatusCode, Json<ErrorBody>)> {
    // Malformed bodies get the same JSON error shape as validation failures.
    let Json(request) = payload.map_err(|rejection| error(StatusCode::BAD_REQUEST, rejection.body_text()))?;
    request
        .validate()
        .map_err(|err| error(StatusCode::BAD_REQUEST, err.to_string()))?;

    let start = std::time::Instant::now();
    let mode = request.mode;
    // The abstractive path blocks on the generator, so keep it off the async workers.
    let generator = state.generator.clone();
    let report = tokio::task::spawn_blocking(move || summarize(&request, generator.as_ref()))
        .await
        .map_err(|err| {
            tracing::error!(error = %err, "summarization task failed");
            error(StatusCode::INTERNAL_SERVER_ERROR, "summarization failed")
        })?;

    tracing::info!(%mode, took_s = start.elapsed().as_secs_f64(), "summary served");
    Ok(Json(report))
}
