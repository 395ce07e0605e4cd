use crate::session::SessionState;
use crate::vote::SubmitOutcome;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub word: String,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub outcome: SubmitOutcome,
    pub message: String,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct AdminRequest {
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct AdminResponse {
    pub admin: bool,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub has_participated: bool,
    pub admin: bool,
    pub appreciation_number: u32,
    pub saved_files: Vec<String>,
}

impl From<&SessionState> for SessionResponse {
    fn from(session: &SessionState) -> Self {
        Self {
            has_participated: session.has_participated,
            admin: session.admin_authenticated,
            appreciation_number: session.appreciation_number,
            saved_files: session.saved_files.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct WordCountsResponse {
    pub total: usize,
    pub counts: Vec<WordCount>,
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub archived: Option<String>,
    pub appreciation_number: u32,
    pub saved_files: Vec<String>,
}
