//! Translations API: the two JSON endpoints over the CSV store.
//!
//! The store is re-read on every request, so edits to the CSV from
//! outside the server show up without a restart. Appends rewrite the
//! whole file and there is no cross-process locking; last write wins.

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::info;

use fanyi_core::dictionary::PhraseBook;
use fanyi_core::settings::Settings;
use fanyi_core::store::{PhrasePair, PhraseStore, StoreError};
use fanyi_core::wire::{
    AddRequest, AddResponse, TranslationsResponse, ERR_DUPLICATE, ERR_MISSING_FIELDS,
};

type SharedState = Arc<AppState>;

pub struct AppState {
    store_path: PathBuf,
}

pub async fn serve(settings: Settings) -> std::io::Result<()> {
    let state = Arc::new(AppState {
        store_path: settings.store.path.clone(),
    });
    let router = build_router(state);
    info!(
        addr = %settings.server.addr,
        store = %settings.store.path.display(),
        "binding HTTP listener"
    );
    let listener = TcpListener::bind(settings.server.addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP server exited");
    Ok(())
}

fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/api/translations", get(get_translations))
        .route("/api/translations/add", post(add_translation))
        .route("/healthz", get(health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Failure shape shared by both endpoints:
/// `{"success": false, "error": ...}` plus a status code.
#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn conflict(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate => ApiError::conflict(ERR_DUPLICATE),
            // Phrases that trim to nothing fail the same way as absent fields
            StoreError::InvalidPhrase { .. } => ApiError::bad_request(ERR_MISSING_FIELDS),
            StoreError::Io(err) => ApiError::internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let payload = serde_json::json!({ "success": false, "error": self.message });
        (self.status, Json(payload)).into_response()
    }
}

async fn get_translations(
    State(state): State<SharedState>,
) -> Result<Json<TranslationsResponse>, ApiError> {
    let store = PhraseStore::load(&state.store_path)?;
    let book = PhraseBook::from_pairs(store.pairs());
    Ok(Json(TranslationsResponse::from(book)))
}

async fn add_translation(
    State(state): State<SharedState>,
    Json(request): Json<AddRequest>,
) -> Result<Json<AddResponse>, ApiError> {
    if request.english.is_empty() || request.chinese.is_empty() {
        return Err(ApiError::bad_request(ERR_MISSING_FIELDS));
    }
    let pair = PhrasePair::new(&request.english, &request.chinese)?;
    let mut store = PhraseStore::load(&state.store_path)?;
    store.append(pair)?;
    info!(english = %request.english, chinese = %request.chinese, "translation added");
    Ok(Json(AddResponse::added()))
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok", "service": "fanyid" }))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        let _ = signal::ctrl_c().await;
    };
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        if let Ok(mut stream) = signal(SignalKind::terminate()) {
            let _ = stream.recv().await;
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
