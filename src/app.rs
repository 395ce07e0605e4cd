use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/submit", post(handlers::submit_form))
        .route("/admin", post(handlers::admin_form))
        .route("/reset", post(handlers::reset_form))
        .route("/qr.svg", get(handlers::qr_code))
        .route("/archives/:name", get(handlers::archive_file))
        .route("/api/session", get(handlers::get_session))
        .route("/api/submit", post(handlers::submit_json))
        .route("/api/admin", post(handlers::admin_json))
        .route("/api/words", get(handlers::get_words))
        .route("/api/reset", post(handlers::reset_json))
        .with_state(state)
}
