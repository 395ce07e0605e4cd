use crate::config::Config;
use crate::errors::AppError;
use crate::qr::qr_svg;
use crate::session::Sessions;
use crate::storage::WordStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: WordStore,
    pub sessions: Sessions,
    pub qr_svg: Arc<str>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let qr_svg = qr_svg(&config.public_url)?;
        Ok(Self {
            store: WordStore::new(config.data_path.clone()),
            sessions: Sessions::new(config.session_ttl),
            qr_svg: Arc::from(qr_svg),
            config: Arc::new(config),
        })
    }
}
