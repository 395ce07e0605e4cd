use crate::errors::AppError;
use crate::render::render_combined_png;
use crate::session::SessionState;
use crate::storage::WordStore;
use chrono::NaiveDateTime;
use std::path::Path;
use tokio::fs;
use tracing::info;

const PREFIX: &str = "Appreciations_creches_";
const SUFFIX: &str = "_combined.png";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

pub fn archive_filename(number: u32, at: NaiveDateTime) -> String {
    format!("{PREFIX}{number}_{}{SUFFIX}", at.format(TIMESTAMP_FORMAT))
}

/// Accepts exactly the names produced by [`archive_filename`].
pub fn is_archive_filename(name: &str) -> bool {
    let Some(middle) = name
        .strip_prefix(PREFIX)
        .and_then(|rest| rest.strip_suffix(SUFFIX))
    else {
        return false;
    };
    let Some((number, stamp)) = middle.split_once('_') else {
        return false;
    };
    !number.is_empty()
        && number.bytes().all(|b| b.is_ascii_digit())
        && NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).is_ok()
}

/// Archives the current words as a combined image (when there are any), then empties the
/// list and clears this session's participation flag.
///
/// Returns the archive filename. Participation flags of other sessions are the caller's to clear.
pub async fn reset(
    store: &WordStore,
    archive_dir: &Path,
    session: &mut SessionState,
    at: NaiveDateTime,
) -> Result<Option<String>, AppError> {
    // Submissions wait until the list is archived and emptied, so none is dropped unseen.
    let _writes = store.write_guard().await;
    let words = store.load().await?;

    let archived = if words.is_empty() {
        None
    } else {
        let count = words.len();
        let png = tokio::task::spawn_blocking(move || render_combined_png(&words)).await??;
        let filename = archive_filename(session.appreciation_number, at);
        fs::write(archive_dir.join(&filename), png).await?;
        info!(file = %filename, words = count, "archive written");

        session.appreciation_number += 1;
        session.saved_files.push(filename.clone());
        Some(filename)
    };

    store.save(&[]).await?;
    session.has_participated = false;
    Ok(archived)
}
