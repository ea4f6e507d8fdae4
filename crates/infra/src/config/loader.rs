//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. If every required environment variable is set, loads from the
//!    environment; an invalid value there is an error, not a fallback
//! 2. If any required variable is absent, falls back to loading from file
//! 3. `PUMPSYNC_CONFIG` names the file explicitly; otherwise multiple paths
//!    are probed
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! Required:
//! - `PUMPSYNC_ORGANIZATION_CODE`, `PUMPSYNC_GAS_STATION_CODE`: site identity
//! - `PUMPSYNC_DB_HOST`, `PUMPSYNC_DB_NAME`, `PUMPSYNC_DB_USER`: connection
//! - `PUMPSYNC_DB_ROLE`: role assumed before querying
//! - `PUMPSYNC_DB_COMPANY_ID`: tenant id
//! - `PUMPSYNC_BASE_URL`: collection API base URL
//!
//! Optional:
//! - `PUMPSYNC_DB_PORT` (5432), `PUMPSYNC_DB_PASSWORD` (empty),
//!   `PUMPSYNC_DB_SCHEMA` (`dah`), `PUMPSYNC_DB_CONNECT_TIMEOUT` (seconds)
//! - `PUMPSYNC_REQUEST_TIMEOUT` (seconds)
//! - `PUMPSYNC_SYNC_INTERVAL` (5), `PUMPSYNC_LOOKBACK_HOURS` (12),
//!   `PUMPSYNC_SKIP_IF_BUSY` (false), `PUMPSYNC_CYCLE_TIMEOUT` (seconds)
//! - `PUMPSYNC_LOG_LEVEL` (`info`), `PUMPSYNC_LOG_FORMAT` (`pretty`|`json`)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./pumpsync.json` or `./pumpsync.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. The same names in the parent and grandparent directories
//! 4. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use pumpsync_domain::constants::{
    DEFAULT_DB_PORT, DEFAULT_DB_SCHEMA, DEFAULT_LOG_LEVEL, DEFAULT_LOOKBACK_HOURS,
    DEFAULT_SYNC_INTERVAL_SECS,
};
use pumpsync_domain::{
    Config, DatabaseConfig, DeliveryConfig, LogFormat, LoggingConfig, OverlapPolicy,
    PumpSyncError, Result, SiteIdentity, SyncConfig,
};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "PUMPSYNC_CONFIG";

const CONFIG_FILE_NAMES: [&str; 4] =
    ["pumpsync.json", "pumpsync.toml", "config.json", "config.toml"];

const REQUIRED_ENV_VARS: [&str; 8] = [
    "PUMPSYNC_ORGANIZATION_CODE",
    "PUMPSYNC_GAS_STATION_CODE",
    "PUMPSYNC_DB_HOST",
    "PUMPSYNC_DB_NAME",
    "PUMPSYNC_DB_USER",
    "PUMPSYNC_DB_ROLE",
    "PUMPSYNC_DB_COMPANY_ID",
    "PUMPSYNC_BASE_URL",
];

/// Load configuration with automatic fallback strategy
///
/// Uses the environment when every required variable is set. Only when at
/// least one required variable is absent does it fall back to a config file.
///
/// # Errors
/// Returns `PumpSyncError::Config` if:
/// - All required variables are set but one of the values is invalid
/// - No config file can be found or read
/// - File format is invalid
/// - Required fields are missing
pub fn load() -> Result<Config> {
    let missing = missing_required_env_vars();

    if missing.is_empty() {
        let config = load_from_env()?;
        tracing::info!("Configuration loaded from environment variables");
        return Ok(config);
    }

    tracing::debug!(?missing, "Environment configuration incomplete, trying file");
    let explicit = std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from);
    load_from_file(explicit)
}

/// Required variables that are not set at all.
fn missing_required_env_vars() -> Vec<&'static str> {
    REQUIRED_ENV_VARS.into_iter().filter(|key| std::env::var_os(key).is_none()).collect()
}

/// Load configuration from environment variables
///
/// All required environment variables must be present. Returns an error
/// if any are missing.
///
/// # Errors
/// Returns `PumpSyncError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    let site = SiteIdentity::new(
        env_var("PUMPSYNC_ORGANIZATION_CODE")?,
        env_var("PUMPSYNC_GAS_STATION_CODE")?,
    );

    let database = DatabaseConfig {
        host: env_var("PUMPSYNC_DB_HOST")?,
        port: env_parse_or("PUMPSYNC_DB_PORT", DEFAULT_DB_PORT)?,
        database: env_var("PUMPSYNC_DB_NAME")?,
        user: env_var("PUMPSYNC_DB_USER")?,
        password: std::env::var("PUMPSYNC_DB_PASSWORD").unwrap_or_default(),
        role: env_var("PUMPSYNC_DB_ROLE")?,
        company_id: env_parse("PUMPSYNC_DB_COMPANY_ID")?,
        schema: std::env::var("PUMPSYNC_DB_SCHEMA")
            .unwrap_or_else(|_| DEFAULT_DB_SCHEMA.to_string()),
        connect_timeout_secs: env_parse_opt("PUMPSYNC_DB_CONNECT_TIMEOUT")?,
    };

    let delivery = DeliveryConfig {
        base_url: env_var("PUMPSYNC_BASE_URL")?,
        request_timeout_secs: env_parse_opt("PUMPSYNC_REQUEST_TIMEOUT")?,
    };

    let overlap = if env_bool("PUMPSYNC_SKIP_IF_BUSY", false) {
        OverlapPolicy::SkipIfBusy
    } else {
        OverlapPolicy::Allow
    };

    let sync = SyncConfig {
        interval_seconds: env_parse_or("PUMPSYNC_SYNC_INTERVAL", DEFAULT_SYNC_INTERVAL_SECS)?,
        lookback_hours: env_parse_or("PUMPSYNC_LOOKBACK_HOURS", DEFAULT_LOOKBACK_HOURS)?,
        overlap,
        cycle_timeout_secs: env_parse_opt("PUMPSYNC_CYCLE_TIMEOUT")?,
    };

    let logging = LoggingConfig {
        level: std::env::var("PUMPSYNC_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string()),
        format: match std::env::var("PUMPSYNC_LOG_FORMAT") {
            Ok(raw) => parse_log_format(&raw)?,
            Err(_) => LogFormat::default(),
        },
    };

    Ok(Config { site, database, delivery, sync, logging })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `PumpSyncError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(PumpSyncError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            PumpSyncError::Config(
                "No configuration in environment and no config file found in any of the \
                 standard locations"
                    .to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| PumpSyncError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `PumpSyncError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| PumpSyncError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| PumpSyncError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(PumpSyncError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the working directory, its two parents, and the executable's
/// directory for `pumpsync.{json,toml}` and `config.{json,toml}`.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.extend(cwd.ancestors().take(3).map(Path::to_path_buf));
    }

    if let Some(exe_dir) =
        std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        roots.push(exe_dir);
    }

    roots
        .iter()
        .flat_map(|root| CONFIG_FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

fn parse_log_format(raw: &str) -> Result<LogFormat> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "pretty" | "text" => Ok(LogFormat::Pretty),
        "json" => Ok(LogFormat::Json),
        other => Err(PumpSyncError::Config(format!("Invalid log format: {other}"))),
    }
}

/// Get required environment variable
///
/// # Errors
/// Returns `PumpSyncError::Config` if the variable is not set.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| PumpSyncError::Config(format!("Missing required environment variable: {key}")))
}

fn env_parse<T>(key: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = env_var(key)?;
    raw.trim().parse().map_err(|e| PumpSyncError::Config(format!("Invalid {key}: {e}")))
}

fn env_parse_opt<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => env_parse(key).map(Some),
        _ => Ok(None),
    }
}

fn env_parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    Ok(env_parse_opt(key)?.unwrap_or(default))
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;

    use once_cell::sync::Lazy;
    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const REQUIRED_VALUES: [(&str, &str); 8] = [
        ("PUMPSYNC_ORGANIZATION_CODE", "fernandinho"),
        ("PUMPSYNC_GAS_STATION_CODE", "posto_itajai"),
        ("PUMPSYNC_DB_HOST", "10.0.0.5"),
        ("PUMPSYNC_DB_NAME", "gasstation"),
        ("PUMPSYNC_DB_USER", "sys"),
        ("PUMPSYNC_DB_ROLE", "dah"),
        ("PUMPSYNC_DB_COMPANY_ID", "1"),
        ("PUMPSYNC_BASE_URL", "https://collector.example.com/api"),
    ];

    const OPTIONAL: [&str; 11] = [
        "PUMPSYNC_DB_PORT",
        "PUMPSYNC_DB_PASSWORD",
        "PUMPSYNC_DB_SCHEMA",
        "PUMPSYNC_DB_CONNECT_TIMEOUT",
        "PUMPSYNC_REQUEST_TIMEOUT",
        "PUMPSYNC_SYNC_INTERVAL",
        "PUMPSYNC_LOOKBACK_HOURS",
        "PUMPSYNC_SKIP_IF_BUSY",
        "PUMPSYNC_CYCLE_TIMEOUT",
        "PUMPSYNC_LOG_LEVEL",
        "PUMPSYNC_LOG_FORMAT",
    ];

    fn set_required() {
        for (key, value) in REQUIRED_VALUES {
            std::env::set_var(key, value);
        }
    }

    fn clear_all() {
        for key in REQUIRED_ENV_VARS {
            std::env::remove_var(key);
        }
        for key in OPTIONAL {
            std::env::remove_var(key);
        }
    }

    fn temp_config(contents: &str, extension: &str) -> PathBuf {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(contents.as_bytes()).unwrap();
        let path = temp_file.path().with_extension(extension);
        std::fs::copy(temp_file.path(), &path).unwrap();
        path
    }

    #[test]
    fn test_env_bool_parsing() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        for value in ["1", "true", "yes", "on", "TRUE"] {
            std::env::set_var("PUMPSYNC_TEST_BOOL", value);
            assert!(env_bool("PUMPSYNC_TEST_BOOL", false), "{value} should be true");
        }

        for value in ["0", "false", "no", "off"] {
            std::env::set_var("PUMPSYNC_TEST_BOOL", value);
            assert!(!env_bool("PUMPSYNC_TEST_BOOL", true), "{value} should be false");
        }

        std::env::remove_var("PUMPSYNC_TEST_BOOL");
        assert!(env_bool("PUMPSYNC_TEST_BOOL", true));
        assert!(!env_bool("PUMPSYNC_TEST_BOOL", false));
    }

    #[test]
    fn test_load_from_env_applies_defaults() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_all();
        set_required();

        let result = load_from_env();
        clear_all();

        let config = result.expect("config from env");
        assert_eq!(config.site.organization_code, "fernandinho");
        assert_eq!(config.site.gas_station_code, "posto_itajai");
        assert_eq!(config.database.host, "10.0.0.5");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.database.password, "");
        assert_eq!(config.database.schema, "dah");
        assert_eq!(config.database.company_id, 1);
        assert_eq!(config.database.connect_timeout_secs, None);
        assert_eq!(config.delivery.request_timeout_secs, None);
        assert_eq!(config.sync.interval_seconds, 5);
        assert_eq!(config.sync.lookback_hours, 12);
        assert_eq!(config.sync.overlap, OverlapPolicy::Allow);
        assert_eq!(config.sync.cycle_timeout_secs, None);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_env_reads_optional_values() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_all();
        set_required();
        std::env::set_var("PUMPSYNC_DB_PORT", "6543");
        std::env::set_var("PUMPSYNC_DB_PASSWORD", "s3cret");
        std::env::set_var("PUMPSYNC_DB_SCHEMA", "posto");
        std::env::set_var("PUMPSYNC_DB_CONNECT_TIMEOUT", "3");
        std::env::set_var("PUMPSYNC_REQUEST_TIMEOUT", "20");
        std::env::set_var("PUMPSYNC_SYNC_INTERVAL", "30");
        std::env::set_var("PUMPSYNC_LOOKBACK_HOURS", "24");
        std::env::set_var("PUMPSYNC_SKIP_IF_BUSY", "yes");
        std::env::set_var("PUMPSYNC_CYCLE_TIMEOUT", "25");
        std::env::set_var("PUMPSYNC_LOG_LEVEL", "debug");
        std::env::set_var("PUMPSYNC_LOG_FORMAT", "json");

        let result = load_from_env();
        clear_all();

        let config = result.expect("config from env");
        assert_eq!(config.database.port, 6543);
        assert_eq!(config.database.password, "s3cret");
        assert_eq!(config.database.schema, "posto");
        assert_eq!(config.database.connect_timeout_secs, Some(3));
        assert_eq!(config.delivery.request_timeout_secs, Some(20));
        assert_eq!(config.sync.interval_seconds, 30);
        assert_eq!(config.sync.lookback_hours, 24);
        assert_eq!(config.sync.overlap, OverlapPolicy::SkipIfBusy);
        assert_eq!(config.sync.cycle_timeout_secs, Some(25));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_load_from_env_missing_var() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_all();
        set_required();
        std::env::remove_var("PUMPSYNC_DB_ROLE");

        let result = load_from_env();
        clear_all();

        assert!(
            matches!(result, Err(PumpSyncError::Config(ref msg)) if msg.contains("PUMPSYNC_DB_ROLE")),
            "got {result:?}"
        );
    }

    #[test]
    fn test_load_from_env_invalid_number() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_all();
        set_required();
        std::env::set_var("PUMPSYNC_DB_COMPANY_ID", "not-a-number");

        let result = load_from_env();
        clear_all();

        assert!(matches!(result, Err(PumpSyncError::Config(_))), "got {result:?}");
    }

    #[test]
    fn test_load_from_env_invalid_log_format() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_all();
        set_required();
        std::env::set_var("PUMPSYNC_LOG_FORMAT", "xml");

        let result = load_from_env();
        clear_all();

        assert!(matches!(result, Err(PumpSyncError::Config(_))), "got {result:?}");
    }

    #[test]
    fn test_load_from_file_json() {
        let json_content = r#"{
            "site": { "organizationCode": "fernandinho", "gasStationCode": "posto_itajai" },
            "database": {
                "host": "localhost",
                "database": "gasstation",
                "user": "sys",
                "password": "pw",
                "role": "dah",
                "company_id": 1
            },
            "delivery": { "base_url": "http://localhost:8080" },
            "sync": { "interval_seconds": 10, "lookback_hours": 12, "overlap": "skip_if_busy" }
        }"#;

        let path = temp_config(json_content, "json");
        let result = load_from_file(Some(path.clone()));
        std::fs::remove_file(path).ok();

        let config = result.expect("config from JSON file");
        assert_eq!(config.site.gas_station_code, "posto_itajai");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.database.password, "pw");
        assert_eq!(config.sync.interval_seconds, 10);
        assert_eq!(config.sync.overlap, OverlapPolicy::SkipIfBusy);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_from_file_toml() {
        let toml_content = r#"
[site]
organizationCode = "fernandinho"
gasStationCode = "posto_itajai"

[database]
host = "localhost"
port = 5433
database = "gasstation"
user = "sys"
role = "dah"
company_id = 7

[delivery]
base_url = "https://collector.example.com/"
request_timeout_secs = 15

[logging]
level = "warn"
format = "json"
"#;

        let path = temp_config(toml_content, "toml");
        let result = load_from_file(Some(path.clone()));
        std::fs::remove_file(path).ok();

        let config = result.expect("config from TOML file");
        assert_eq!(config.database.port, 5433);
        assert_eq!(config.database.company_id, 7);
        assert_eq!(config.database.schema, "dah");
        assert_eq!(config.delivery.request_timeout_secs, Some(15));
        assert_eq!(config.sync.interval_seconds, 5);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = load_from_file(Some(PathBuf::from("/nonexistent/pumpsync.json")));
        assert!(matches!(result, Err(PumpSyncError::Config(_))), "got {result:?}");
    }

    #[test]
    fn test_load_from_file_invalid_json() {
        let path = temp_config(r#"{ "this is": "not valid json" "#, "json");
        let result = load_from_file(Some(path.clone()));
        std::fs::remove_file(path).ok();

        assert!(matches!(result, Err(PumpSyncError::Config(msg)) if msg.contains("JSON")));
    }

    #[test]
    fn test_parse_config_missing_section() {
        let json_content = r#"{
            "site": { "organizationCode": "o", "gasStationCode": "g" },
            "delivery": { "base_url": "http://localhost" }
        }"#;

        let result = parse_config(json_content, Path::new("pumpsync.json"));
        assert!(result.is_err(), "database section is required");
    }

    #[test]
    fn test_parse_config_unsupported_format() {
        let result = parse_config("some content", Path::new("pumpsync.yaml"));
        assert!(matches!(result, Err(PumpSyncError::Config(msg)) if msg.contains("yaml")));
    }

    #[test]
    fn test_load_prefers_environment() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_all();
        set_required();
        std::env::set_var(CONFIG_PATH_ENV, "/nonexistent/pumpsync.toml");

        let result = load();
        clear_all();
        std::env::remove_var(CONFIG_PATH_ENV);

        assert_eq!(result.expect("config").database.user, "sys");
    }

    #[test]
    fn test_load_falls_back_to_explicit_file() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_all();

        let toml_content = r#"
[site]
organizationCode = "org"
gasStationCode = "station"

[database]
host = "db"
database = "gasstation"
user = "reader"
role = "dah"
company_id = 3

[delivery]
base_url = "http://collector"
"#;
        let path = temp_config(toml_content, "toml");
        std::env::set_var(CONFIG_PATH_ENV, &path);

        let result = load();
        std::env::remove_var(CONFIG_PATH_ENV);
        std::fs::remove_file(path).ok();

        let config = result.expect("config from file");
        assert_eq!(config.database.user, "reader");
        assert_eq!(config.database.company_id, 3);
    }

    const OTHER_SITE_TOML: &str = r#"
[site]
organizationCode = "OTHER"
gasStationCode = "elsewhere"

[database]
host = "db"
database = "gasstation"
user = "reader"
role = "dah"
company_id = 9

[delivery]
base_url = "http://collector"
"#;

    #[test]
    fn test_load_rejects_invalid_env_value_instead_of_using_file() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_all();
        set_required();
        std::env::set_var("PUMPSYNC_DB_PORT", "54x2");

        let path = temp_config(OTHER_SITE_TOML, "toml");
        std::env::set_var(CONFIG_PATH_ENV, &path);

        let result = load();
        clear_all();
        std::env::remove_var(CONFIG_PATH_ENV);
        std::fs::remove_file(path).ok();

        assert!(
            matches!(result, Err(PumpSyncError::Config(ref msg)) if msg.contains("PUMPSYNC_DB_PORT")),
            "got {result:?}"
        );
    }

    #[test]
    fn test_load_falls_back_when_one_required_var_is_absent() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_all();
        set_required();
        std::env::remove_var("PUMPSYNC_BASE_URL");

        let path = temp_config(OTHER_SITE_TOML, "toml");
        std::env::set_var(CONFIG_PATH_ENV, &path);

        let result = load();
        clear_all();
        std::env::remove_var(CONFIG_PATH_ENV);
        std::fs::remove_file(path).ok();

        let config = result.expect("config from file");
        assert_eq!(config.site.organization_code, "OTHER");
        assert_eq!(config.database.company_id, 9);
    }

    #[test]
    fn test_parse_config_partial_sync_section() {
        let toml_content = format!("{OTHER_SITE_TOML}\n[sync]\noverlap = \"skip_if_busy\"\n");

        let config = parse_config(&toml_content, Path::new("pumpsync.toml")).expect("partial sync");

        assert_eq!(config.sync.overlap, OverlapPolicy::SkipIfBusy);
        assert_eq!(config.sync.interval_seconds, DEFAULT_SYNC_INTERVAL_SECS);
        assert_eq!(config.sync.lookback_hours, DEFAULT_LOOKBACK_HOURS);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_config_partial_logging_section() {
        let toml_content = format!("{OTHER_SITE_TOML}\n[logging]\nformat = \"json\"\n");

        let config = parse_config(&toml_content, Path::new("pumpsync.toml")).expect("partial logging");

        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
    }
}
