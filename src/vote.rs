use crate::errors::AppError;
use crate::session::{Notice, SessionState};
use crate::storage::WordStore;
use crate::words::normalize;
use serde::Serialize;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitOutcome {
    Recorded,
    RecordedByAdmin,
    AlreadyParticipated,
    EmptySelection,
}

impl SubmitOutcome {
    pub fn accepted(self) -> bool {
        matches!(self, Self::Recorded | Self::RecordedByAdmin)
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Recorded => "Merci pour votre mot !",
            Self::RecordedByAdmin => "Le mot a été ajouté par l'administrateur.",
            Self::AlreadyParticipated => {
                "Vous avez déjà soumis un mot. Merci de votre participation !"
            }
            Self::EmptySelection => "Veuillez sélectionner un mot avant de soumettre.",
        }
    }

    pub fn notice(self) -> Notice {
        if self.accepted() {
            Notice::success(self.message())
        } else {
            Notice::warning(self.message())
        }
    }
}

/// Decides whether `selection` may be recorded for `session`.
///
/// Administrators may submit any number of times. Visitors get one accepted word per
/// session; the participation check runs before the blank-selection check. An admitted
/// visitor is marked as having participated right away, so two concurrent requests from
/// the same session cannot both get through.
pub fn admit(
    session: &mut SessionState,
    selection: &str,
) -> Result<(String, SubmitOutcome), SubmitOutcome> {
    if !session.admin_authenticated && session.has_participated {
        debug!("rejected repeat submission");
        return Err(SubmitOutcome::AlreadyParticipated);
    }

    let Some(word) = normalize(selection) else {
        debug!("rejected blank selection");
        return Err(SubmitOutcome::EmptySelection);
    };

    if session.admin_authenticated {
        Ok((word, SubmitOutcome::RecordedByAdmin))
    } else {
        session.has_participated = true;
        Ok((word, SubmitOutcome::Recorded))
    }
}

/// Stores a word previously returned by [`admit`].
pub async fn record(store: &WordStore, word: String, outcome: SubmitOutcome) -> Result<(), AppError> {
    info!(word = %word, admin = outcome == SubmitOutcome::RecordedByAdmin, "word submitted");
    store.append(word).await?;
    Ok(())
}

/// Admits and records `selection` in one step.
pub async fn submit(
    store: &WordStore,
    session: &mut SessionState,
    selection: &str,
) -> Result<SubmitOutcome, AppError> {
    match admit(session, selection) {
        Ok((word, outcome)) => {
            if let Err(err) = record(store, word, outcome).await {
                session.has_participated = false;
                return Err(err);
            }
            Ok(outcome)
        }
        Err(outcome) => Ok(outcome),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch() -> (tempfile::TempDir, WordStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = WordStore::new(dir.path().join("words.json"));
        (dir, store)
    }

    #[tokio::test]
    async fn visitor_votes_once() {
        let (_dir, store) = scratch();
        let mut session = SessionState::default();

        let first = submit(&store, &mut session, "Innovante").await.unwrap();
        assert_eq!(first, SubmitOutcome::Recorded);
        assert!(session.has_participated);

        let second = submit(&store, &mut session, "Originale").await.unwrap();
        assert_eq!(second, SubmitOutcome::AlreadyParticipated);
        assert_eq!(store.load().await.unwrap(), vec!["innovante"]);
    }

    #[tokio::test]
    async fn admin_votes_without_limit() {
        let (_dir, store) = scratch();
        let mut session = SessionState::default();
        session.authenticate("2018", "2018");

        for _ in 0..10 {
            let outcome = submit(&store, &mut session, "Inspirée").await.unwrap();
            assert_eq!(outcome, SubmitOutcome::RecordedByAdmin);
        }
        assert_eq!(store.load().await.unwrap().len(), 10);
        assert!(!session.has_participated);
    }

    #[tokio::test]
    async fn blank_selection_changes_nothing() {
        let (_dir, store) = scratch();
        let mut session = SessionState::default();

        let outcome = submit(&store, &mut session, "   ").await.unwrap();
        assert_eq!(outcome, SubmitOutcome::EmptySelection);
        assert!(!session.has_participated);
        assert!(store.load().await.unwrap().is_empty());

        session.authenticate("2018", "2018");
        let outcome = submit(&store, &mut session, " ").await.unwrap();
        assert_eq!(outcome, SubmitOutcome::EmptySelection);
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn case_variants_are_both_kept() {
        let (_dir, store) = scratch();
        let mut admin = SessionState::default();
        admin.authenticate("2018", "2018");

        submit(&store, &mut admin, "Joyeux").await.unwrap();
        submit(&store, &mut admin, "joyeux").await.unwrap();
        assert_eq!(store.load().await.unwrap(), vec!["joyeux", "joyeux"]);
    }

    #[test]
    fn admit_reserves_the_visitor_vote() {
        let mut session = SessionState::default();
        let (word, outcome) = admit(&mut session, " Originale ").unwrap();
        assert_eq!(word, "originale");
        assert_eq!(outcome, SubmitOutcome::Recorded);
        assert!(session.has_participated);
        assert_eq!(
            admit(&mut session, "Originale"),
            Err(SubmitOutcome::AlreadyParticipated)
        );
    }

    #[tokio::test]
    async fn failed_write_releases_the_vote() {
        let dir = tempfile::tempdir().unwrap();
        let store = WordStore::new(dir.path().join("missing").join("words.json"));
        let mut session = SessionState::default();

        assert!(submit(&store, &mut session, "Innovante").await.is_err());
        assert!(!session.has_participated);
    }

    #[test]
    fn rejections_are_warnings() {
        assert_eq!(
            SubmitOutcome::AlreadyParticipated.notice().kind,
            crate::session::NoticeKind::Warning
        );
        assert_eq!(
            SubmitOutcome::Recorded.notice().kind,
            crate::session::NoticeKind::Success
        );
    }
}
