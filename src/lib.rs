pub mod app;
pub mod archive;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod qr;
pub mod render;
pub mod session;
pub mod state;
pub mod storage;
pub mod ui;
pub mod vote;
pub mod words;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::WordStore;
