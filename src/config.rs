use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};
use tracing::{info, warn};

pub const DEFAULT_ADMIN_CODE: &str = "2018";
pub const DEFAULT_SESSION_TTL_SECS: u64 = 12 * 60 * 60;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub archive_dir: PathBuf,
    pub admin_code: String,
    pub public_url: String,
    /// Seconds between automatic reloads of the admin view. `None` disables it.
    pub refresh_secs: Option<u64>,
    /// Sessions not seen for this long are forgotten.
    pub session_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        let port = try_load("PORT", 8080u16);
        let public_url = env::var("PUBLIC_URL").unwrap_or_else(|_| {
            let url = format!("http://localhost:{port}/");
            info!("PUBLIC_URL not set, using default: {url}");
            url
        });
        let refresh_secs = match try_load("REFRESH_SECS", 0u64) {
            0 => None,
            secs => Some(secs),
        };

        Self {
            port,
            data_path: PathBuf::from(try_load("APP_DATA_PATH", String::from("words.json"))),
            archive_dir: PathBuf::from(try_load("APP_ARCHIVE_DIR", String::from("."))),
            admin_code: env::var("ADMIN_CODE").unwrap_or_else(|_| DEFAULT_ADMIN_CODE.to_string()),
            public_url,
            refresh_secs,
            session_ttl: Duration::from_secs(try_load("SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            data_path: PathBuf::from("words.json"),
            archive_dir: PathBuf::from("."),
            admin_code: DEFAULT_ADMIN_CODE.to_string(),
            public_url: String::from("http://localhost:8080/"),
            refresh_secs: None,
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
        }
    }
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|err| {
            warn!("invalid {key} value {raw:?}: {err}, using default: {default}");
            default
        }),
        Err(_) => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}
