/// Runtime configuration, loaded from the environment (a `.env` file is
/// honored when present).
///
/// | Environment variable | Default | Meaning |
/// |----------------------|---------------|---------------------------------|
/// | STOCKROOM_DB | stockroom.db | SQLite database path |
/// | LOG_LEVEL | info | Tracing level filter |
/// | LOG_DIR | (unset) | Daily rolling file logs when set |
/// | CURRENCY | IRR | Currency code used in reports |
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub currency: String,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        Self {
            db_path: std::env::var("STOCKROOM_DB").unwrap_or_else(|_| "stockroom.db".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            currency: std::env::var("CURRENCY").unwrap_or_else(|_| "IRR".into()),
        }
    }
}
