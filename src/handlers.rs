use crate::archive::{is_archive_filename, reset};
use crate::errors::AppError;
use crate::models::{
    AdminRequest, AdminResponse, ResetResponse, SessionResponse, SubmitRequest, SubmitResponse,
    WordCount, WordCountsResponse,
};
use crate::render::{render_cloud_svg, render_histogram_svg};
use crate::session::{Notice, SessionState, Sessions, session_id};
use crate::state::AppState;
use crate::ui::{AdminView, PageView, render_index};
use crate::vote::{SubmitOutcome, admit, record};
use crate::words::count_words;
use axum::{
    Form, Json,
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse, Redirect},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::Local;
use std::time::Instant;
use tokio::fs;
use tracing::info;
use uuid::Uuid;

const RESERVED_NOTICE: &str = "⚠️ Le nuage de mots est réservé à l'administrateur. \
     Veuillez entrer le code administrateur dans le panneau administrateur.";
const RESET_NOTICE: &str = "Les mots et les graphiques ont été sauvegardés et réinitialisés.";

pub async fn index(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), AppError> {
    let (jar, id) = session_id(jar);
    let (notice, has_participated, admin_denied, saved_files) = {
        let mut sessions = state.sessions.lock().await;
        let session = Sessions::touch(&mut sessions, id);
        (
            session.notice.take(),
            session.has_participated,
            session.admin_denied,
            session
                .admin_authenticated
                .then(|| session.saved_files.clone()),
        )
    };

    let admin = match saved_files {
        Some(saved_files) => {
            let words = state.store.load().await?;
            let total = words.len();
            let (cloud_svg, histogram_svg) = if words.is_empty() {
                (None, None)
            } else {
                let (cloud, histogram) = tokio::task::spawn_blocking(move || {
                    (render_cloud_svg(&words), render_histogram_svg(&words))
                })
                .await?;
                (Some(cloud), Some(histogram))
            };
            Some(AdminView {
                total,
                cloud_svg,
                histogram_svg,
                saved_files,
            })
        }
        None => None,
    };

    let view = PageView {
        notice,
        has_participated,
        admin_denied,
        admin,
        public_url: &state.config.public_url,
        refresh_secs: state.config.refresh_secs,
    };
    Ok((jar, Html(render_index(&view))))
}

pub async fn qr_code(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "image/svg+xml")],
        state.qr_svg.to_string(),
    )
}

pub async fn submit_form(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(payload): Form<SubmitRequest>,
) -> Result<(CookieJar, Redirect), AppError> {
    let (jar, id) = session_id(jar);
    let outcome = apply_submit(&state, id, &payload.word).await?;

    let mut sessions = state.sessions.lock().await;
    Sessions::touch(&mut sessions, id).notice = Some(outcome.notice());
    Ok((jar, Redirect::to("/")))
}

pub async fn admin_form(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(payload): Form<AdminRequest>,
) -> (CookieJar, Redirect) {
    let (jar, id) = session_id(jar);
    let admin = apply_admin(&state, id, &payload.code).await;

    let mut sessions = state.sessions.lock().await;
    let session = Sessions::touch(&mut sessions, id);
    session.notice = if admin {
        Some(Notice::success("Mode administrateur activé."))
    } else if session.admin_denied {
        Some(Notice::warning(RESERVED_NOTICE))
    } else {
        None
    };
    (jar, Redirect::to("/"))
}

pub async fn reset_form(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), AppError> {
    let (jar, id) = session_id(jar);
    apply_reset(&state, id).await?;

    let mut sessions = state.sessions.lock().await;
    Sessions::touch(&mut sessions, id).notice = Some(Notice::success(RESET_NOTICE));
    Ok((jar, Redirect::to("/")))
}

pub async fn archive_file(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let (jar, id) = session_id(jar);
    require_admin(&state.sessions, id).await?;
    if !is_archive_filename(&name) {
        return Err(AppError::not_found("no such archive"));
    }

    let bytes = match fs::read(state.config.archive_dir.join(&name)).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::not_found("no such archive"));
        }
        Err(err) => return Err(err.into()),
    };
    Ok((jar, [(header::CONTENT_TYPE, "image/png")], bytes))
}

pub async fn get_session(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<SessionResponse>) {
    let (jar, id) = session_id(jar);
    let mut sessions = state.sessions.lock().await;
    // Read-only: an unknown id is answered from defaults without being stored.
    let response = match sessions.get_mut(&id) {
        Some(session) => {
            session.last_seen = Instant::now();
            SessionResponse::from(&*session)
        }
        None => SessionResponse::from(&SessionState::default()),
    };
    (jar, Json(response))
}

pub async fn submit_json(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<SubmitRequest>,
) -> Result<(CookieJar, Json<SubmitResponse>), AppError> {
    let (jar, id) = session_id(jar);
    let outcome = apply_submit(&state, id, &payload.word).await?;
    let total = state.store.load().await?.len();

    Ok((
        jar,
        Json(SubmitResponse {
            outcome,
            message: outcome.message().to_string(),
            total,
        }),
    ))
}

pub async fn admin_json(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(payload): Json<AdminRequest>,
) -> (CookieJar, Json<AdminResponse>) {
    let (jar, id) = session_id(jar);
    let admin = apply_admin(&state, id, &payload.code).await;
    (jar, Json(AdminResponse { admin }))
}

pub async fn get_words(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<WordCountsResponse>), AppError> {
    let (jar, id) = session_id(jar);
    require_admin(&state.sessions, id).await?;

    let words = state.store.load().await?;
    let counts = count_words(&words)
        .into_iter()
        .map(|(word, count)| WordCount { word, count })
        .collect();
    Ok((
        jar,
        Json(WordCountsResponse {
            total: words.len(),
            counts,
        }),
    ))
}

pub async fn reset_json(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ResetResponse>), AppError> {
    let (jar, id) = session_id(jar);
    let response = apply_reset(&state, id).await?;
    Ok((jar, Json(response)))
}

async fn apply_submit(state: &AppState, id: Uuid, word: &str) -> Result<SubmitOutcome, AppError> {
    let admitted = {
        let mut sessions = state.sessions.lock().await;
        admit(Sessions::touch(&mut sessions, id), word)
    };
    let (word, outcome) = match admitted {
        Ok(admitted) => admitted,
        Err(outcome) => return Ok(outcome),
    };

    if let Err(err) = record(&state.store, word, outcome).await {
        if outcome == SubmitOutcome::Recorded {
            if let Some(session) = state.sessions.lock().await.get_mut(&id) {
                session.has_participated = false;
            }
        }
        return Err(err);
    }
    Ok(outcome)
}

async fn apply_admin(state: &AppState, id: Uuid, code: &str) -> bool {
    let mut sessions = state.sessions.lock().await;
    let session = Sessions::touch(&mut sessions, id);
    let admin = session.authenticate(code, &state.config.admin_code);
    if !code.is_empty() {
        info!(success = admin, "admin authentication attempt");
    }
    admin
}

/// The archive render runs without the session map locked; only this session's counter and
/// history are written back once it is done.
async fn apply_reset(state: &AppState, id: Uuid) -> Result<ResetResponse, AppError> {
    let mut snapshot = {
        let mut sessions = state.sessions.lock().await;
        let session = Sessions::touch(&mut sessions, id);
        if !session.admin_authenticated {
            return Err(AppError::forbidden("administrator code required"));
        }
        session.clone()
    };

    let archived = reset(
        &state.store,
        &state.config.archive_dir,
        &mut snapshot,
        Local::now().naive_local(),
    )
    .await?;

    let mut sessions = state.sessions.lock().await;
    let session = Sessions::touch(&mut sessions, id);
    session.appreciation_number = session.appreciation_number.max(snapshot.appreciation_number);
    if let Some(file) = &archived {
        session.saved_files.push(file.clone());
    }
    let response = ResetResponse {
        archived,
        appreciation_number: session.appreciation_number,
        saved_files: session.saved_files.clone(),
    };

    Sessions::clear_participation(&mut sessions);
    info!("votes reset");
    Ok(response)
}

async fn require_admin(sessions: &Sessions, id: Uuid) -> Result<(), AppError> {
    let mut sessions = sessions.lock().await;
    match sessions.get_mut(&id) {
        Some(session) if session.admin_authenticated => {
            session.last_seen = Instant::now();
            Ok(())
        }
        _ => Err(AppError::forbidden("administrator code required")),
    }
}
