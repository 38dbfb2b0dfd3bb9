//! Application configuration. Listen port, database file, web dir, auth.
//!
//! Every key is read from `TODO_*` environment variables (after `.env`), with
//! an optional config file named by `TODO_CONFIG`.

use serde::Deserialize;

pub const DEFAULT_PORT: u16 = 7540;
pub const DEFAULT_DB_FILE: &str = "scheduler.db";
pub const DEFAULT_WEB_DIR: &str = "./web";
pub const DEFAULT_TOKEN_TTL_HOURS: u64 = 8;
/// Upper bound on rows returned by task listing.
pub const DEFAULT_LIST_LIMIT: u32 = 50;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// HTTP listen port. Read from TODO_PORT.
    #[serde(default)]
    pub port: Option<u16>,

    /// SQLite database file; `:memory:` keeps tasks in process memory. Read from TODO_DBFILE.
    #[serde(default)]
    pub dbfile: Option<String>,

    /// Directory served for non-API paths. Read from TODO_WEB_DIR.
    #[serde(default)]
    pub web_dir: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Auth
    // ─────────────────────────────────────────────────────────────────────────
    /// Sign-in password. Auth is disabled when unset or empty. Read from TODO_PASSWORD.
    #[serde(default)]
    pub password: Option<String>,

    /// HMAC secret for session tokens. Defaults to the password. Read from TODO_JWT_SECRET.
    #[serde(default)]
    pub jwt_secret: Option<String>,

    /// Session token lifetime in hours. Read from TODO_TOKEN_TTL_HOURS.
    #[serde(default)]
    pub token_ttl_hours: Option<u64>,

    /// Max rows per task listing. Read from TODO_LIST_LIMIT.
    #[serde(default)]
    pub list_limit: Option<u32>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        if let Ok(path) = std::env::var("TODO_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        // Environment wins over the file.
        c = c.add_source(config::Environment::with_prefix("TODO"));
        c.build()?.try_deserialize()
    }

    pub fn port_or_default(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn dbfile_or_default(&self) -> String {
        self.dbfile
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_DB_FILE.to_string())
    }

    pub fn web_dir_or_default(&self) -> String {
        self.web_dir
            .clone()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_WEB_DIR.to_string())
    }

    /// Returns the password if auth is enabled.
    pub fn password(&self) -> Option<String> {
        self.password.clone().filter(|s| !s.is_empty())
    }

    /// Returns the token signing secret, falling back to the password so a
    /// password change invalidates issued tokens.
    pub fn jwt_secret(&self) -> Option<String> {
        self.jwt_secret
            .clone()
            .filter(|s| !s.is_empty())
            .or_else(|| self.password())
    }

    pub fn token_ttl_hours_or_default(&self) -> u64 {
        self.token_ttl_hours.unwrap_or(DEFAULT_TOKEN_TTL_HOURS)
    }

    pub fn list_limit_or_default(&self) -> u32 {
        self.list_limit
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_LIST_LIMIT)
    }

    /// Returns true if sign-in is required for task endpoints.
    pub fn is_auth_enabled(&self) -> bool {
        self.password().is_some()
    }
}
