//! Configuration module for the Skeramos backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Fallback admin password used when `SKERAMOS_ADMIN_PASSWORD` is unset.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin";

/// Fallback signing secret used when `SKERAMOS_SESSION_SECRET` is unset.
pub const DEFAULT_SESSION_SECRET: &str = "skeramos-dev-secret";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Admin panel password, compared as a plain string
    pub admin_password: String,
    /// Secret used to sign session tokens
    pub session_secret: String,
    /// Directory holding one JSON file per content collection
    pub data_dir: PathBuf,
    /// Directory holding one JSON file per translation language
    pub translations_dir: PathBuf,
    /// Directory uploaded images are written to
    pub upload_dir: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Whether session cookies carry the Secure flag (enable behind HTTPS)
    pub secure_cookies: bool,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let admin_password = env::var("SKERAMOS_ADMIN_PASSWORD")
            .unwrap_or_else(|_| DEFAULT_ADMIN_PASSWORD.to_string());

        let session_secret = env::var("SKERAMOS_SESSION_SECRET")
            .unwrap_or_else(|_| DEFAULT_SESSION_SECRET.to_string());

        let data_dir = env::var("SKERAMOS_DATA_DIR")
            .unwrap_or_else(|_| "./data/content".to_string())
            .into();

        let translations_dir = env::var("SKERAMOS_TRANSLATIONS_DIR")
            .unwrap_or_else(|_| "./data/translations".to_string())
            .into();

        let upload_dir = env::var("SKERAMOS_UPLOAD_DIR")
            .unwrap_or_else(|_| "./public/uploads".to_string())
            .into();

        let bind_addr = env::var("SKERAMOS_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid SKERAMOS_BIND_ADDR format");

        let log_level = env::var("SKERAMOS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let secure_cookies = env::var("SKERAMOS_SECURE_COOKIES")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            admin_password,
            session_secret,
            data_dir,
            translations_dir,
            upload_dir,
            bind_addr,
            log_level,
            secure_cookies,
        }
    }
}
