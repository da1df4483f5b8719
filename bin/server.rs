// Expense Tracker - Web Server
// Serves the browser page and a JSON API over one in-memory tracker

use anyhow::{Context, Result};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{delete, get, post},
    Router,
};
use expense_tracker::validation::MSG_FILL_ALL_FIELDS;
use expense_tracker::{
    load_settings, ClearOutcome, ExpenseForm, ExpenseId, ExpenseTracker, ViewModel,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Shared application state
#[derive(Clone)]
struct AppState {
    tracker: Arc<Mutex<ExpenseTracker>>,
}

impl AppState {
    fn new(tracker: ExpenseTracker) -> Self {
        Self {
            tracker: Arc::new(Mutex::new(tracker)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, ExpenseTracker>, Response> {
        self.tracker.lock().map_err(|_| {
            error!("tracker mutex poisoned");
            ApiResponse::<()>::err(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        })
    }
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(status: StatusCode, message: impl Into<String>) -> Response {
        let body = ApiResponse::<T> {
            success: false,
            data: None,
            error: Some(message.into()),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Serialize)]
struct DeleteResponse {
    removed: bool,
    view: ViewModel,
}

#[derive(Deserialize)]
struct ClearRequest {
    #[serde(default)]
    confirmed: bool,
}

#[derive(Serialize)]
struct ClearResponse {
    /// "cleared", "declined" or "nothing_to_clear"
    outcome: &'static str,
    removed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    view: ViewModel,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/view - Summary, category cards and expense list
async fn get_view(State(state): State<AppState>) -> Response {
    let tracker = match state.lock() {
        Ok(t) => t,
        Err(resp) => return resp,
    };
    (StatusCode::OK, Json(ApiResponse::ok(tracker.view()))).into_response()
}

/// POST /api/expenses - Add an expense from raw form values
async fn add_expense(
    State(state): State<AppState>,
    body: Result<Json<ExpenseForm>, JsonRejection>,
) -> Response {
    let Json(form) = match body {
        Ok(form) => form,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "unreadable expense body");
            return ApiResponse::<ViewModel>::err(StatusCode::BAD_REQUEST, MSG_FILL_ALL_FIELDS);
        }
    };

    let mut tracker = match state.lock() {
        Ok(t) => t,
        Err(resp) => return resp,
    };

    match tracker.submit(&form) {
        Ok(_) => (StatusCode::CREATED, Json(ApiResponse::ok(tracker.view()))).into_response(),
        Err(e) => ApiResponse::<ViewModel>::err(StatusCode::BAD_REQUEST, e.user_message()),
    }
}

/// DELETE /api/expenses/:id - Delete one expense (absent id is not an error)
async fn delete_expense(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    let mut tracker = match state.lock() {
        Ok(t) => t,
        Err(resp) => return resp,
    };

    let removed = tracker.delete(ExpenseId(id));
    let body = DeleteResponse {
        removed,
        view: tracker.view(),
    };
    (StatusCode::OK, Json(ApiResponse::ok(body))).into_response()
}

/// POST /api/expenses/clear - Clear all, only when the user confirmed
async fn clear_expenses(
    State(state): State<AppState>,
    Json(req): Json<ClearRequest>,
) -> Response {
    let mut tracker = match state.lock() {
        Ok(t) => t,
        Err(resp) => return resp,
    };

    let outcome = tracker.clear_all(&mut |_: &str| req.confirmed);
    let (label, removed) = match outcome {
        ClearOutcome::Cleared(n) => ("cleared", n),
        ClearOutcome::Declined => ("declined", 0),
        ClearOutcome::NothingToClear => ("nothing_to_clear", 0),
    };

    let body = ClearResponse {
        outcome: label,
        removed,
        message: outcome.message(),
        view: tracker.view(),
    };
    (StatusCode::OK, Json(ApiResponse::ok(body))).into_response()
}

/// GET / - Serve index.html
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/view", get(get_view))
        .route("/expenses", post(add_expense))
        .route("/expenses/clear", post(clear_expenses))
        .route("/expenses/:id", delete(delete_expense))
        .with_state(state);

    Router::new()
        .route("/", get(serve_index))
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let settings = load_settings()?;

    let filter = EnvFilter::try_new(&settings.log_filter)
        .with_context(|| format!("invalid log filter '{}'", settings.log_filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("🌐 Expense Tracker - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let state = AppState::new(ExpenseTracker::from_settings(&settings)?);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&settings.server_bind)
        .await
        .with_context(|| format!("failed to bind to {}", settings.server_bind))?;

    info!(addr = %settings.server_bind, "server listening");
    println!("\n🚀 Server running on http://{}", settings.server_bind);
    println!("   API: http://{}/api/view", settings.server_bind);
    println!("\n   Expenses live in memory only; they are gone when the server stops.");
    println!("   Press Ctrl+C to stop\n");

    axum::serve(listener, app)
        .await
        .context("server error")?;

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
