use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::query::MatchMode;

pub const DEFAULT_GENERATION_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/meta-llama/Llama-2-7b-chat-hf";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub generation: GenerationConfig,
    pub search: SearchConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct GenerationConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub api_key: Option<SecretString>,
    pub timeout_secs: u64,
    pub max_length: u32,
}

#[derive(Clone, Debug)]
pub struct SearchConfig {
    pub match_mode: MatchMode,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    pub graceful_shutdown_secs: u64,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub database_url: Option<String>,
    pub log_level: Option<String>,
    pub generation_enabled: Option<bool>,
    pub generation_endpoint: Option<String>,
    pub match_mode: Option<MatchMode>,
    pub server_port: Option<u16>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "sqlite://fashion_dataset.db".to_string(),
                max_connections: 5,
                timeout_secs: 30,
            },
            generation: GenerationConfig {
                enabled: true,
                endpoint: DEFAULT_GENERATION_ENDPOINT.to_string(),
                api_key: None,
                timeout_secs: 30,
                max_length: 150,
            },
            search: SearchConfig { match_mode: MatchMode::Any },
            server: ServerConfig {
                bind_address: "127.0.0.1".to_string(),
                port: 8080,
                graceful_shutdown_secs: 15,
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

fn secret_value(value: String) -> SecretString {
    value.into()
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("stylist.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(database) = patch.database {
            if let Some(url) = database.url {
                self.database.url = url;
            }
            if let Some(max_connections) = database.max_connections {
                self.database.max_connections = max_connections;
            }
            if let Some(timeout_secs) = database.timeout_secs {
                self.database.timeout_secs = timeout_secs;
            }
        }

        if let Some(generation) = patch.generation {
            if let Some(enabled) = generation.enabled {
                self.generation.enabled = enabled;
            }
            if let Some(endpoint) = generation.endpoint {
                self.generation.endpoint = endpoint;
            }
            if let Some(api_key_value) = generation.api_key {
                self.generation.api_key = Some(secret_value(api_key_value));
            }
            if let Some(timeout_secs) = generation.timeout_secs {
                self.generation.timeout_secs = timeout_secs;
            }
            if let Some(max_length) = generation.max_length {
                self.generation.max_length = max_length;
            }
        }

        if let Some(search) = patch.search {
            if let Some(match_mode) = search.match_mode {
                self.search.match_mode = match_mode;
            }
        }

        if let Some(server) = patch.server {
            if let Some(bind_address) = server.bind_address {
                self.server.bind_address = bind_address;
            }
            if let Some(port) = server.port {
                self.server.port = port;
            }
            if let Some(graceful_shutdown_secs) = server.graceful_shutdown_secs {
                self.server.graceful_shutdown_secs = graceful_shutdown_secs;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("STYLIST_DATABASE_URL") {
            self.database.url = value;
        }
        if let Some(value) = read_env("STYLIST_DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = parse_u32("STYLIST_DATABASE_MAX_CONNECTIONS", &value)?;
        }
        if let Some(value) = read_env("STYLIST_DATABASE_TIMEOUT_SECS") {
            self.database.timeout_secs = parse_u64("STYLIST_DATABASE_TIMEOUT_SECS", &value)?;
        }

        if let Some(value) = read_env("STYLIST_GENERATION_ENABLED") {
            self.generation.enabled = parse_bool("STYLIST_GENERATION_ENABLED", &value)?;
        }
        if let Some(value) = read_env("STYLIST_GENERATION_ENDPOINT") {
            self.generation.endpoint = value;
        }
        if let Some(value) = read_env("STYLIST_GENERATION_API_KEY") {
            self.generation.api_key = Some(secret_value(value));
        }
        if let Some(value) = read_env("STYLIST_GENERATION_TIMEOUT_SECS") {
            self.generation.timeout_secs = parse_u64("STYLIST_GENERATION_TIMEOUT_SECS", &value)?;
        }
        if let Some(value) = read_env("STYLIST_GENERATION_MAX_LENGTH") {
            self.generation.max_length = parse_u32("STYLIST_GENERATION_MAX_LENGTH", &value)?;
        }

        if let Some(value) = read_env("STYLIST_SEARCH_MATCH_MODE") {
            self.search.match_mode =
                value.parse::<MatchMode>().map_err(|_| ConfigError::InvalidEnvOverride {
                    key: "STYLIST_SEARCH_MATCH_MODE".to_string(),
                    value: value.clone(),
                })?;
        }

        if let Some(value) = read_env("STYLIST_SERVER_BIND_ADDRESS") {
            self.server.bind_address = value;
        }
        if let Some(value) = read_env("STYLIST_SERVER_PORT") {
            self.server.port = parse_u16("STYLIST_SERVER_PORT", &value)?;
        }
        if let Some(value) = read_env("STYLIST_SERVER_GRACEFUL_SHUTDOWN_SECS") {
            self.server.graceful_shutdown_secs =
                parse_u64("STYLIST_SERVER_GRACEFUL_SHUTDOWN_SECS", &value)?;
        }

        let log_level =
            read_env("STYLIST_LOGGING_LEVEL").or_else(|| read_env("STYLIST_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("STYLIST_LOGGING_FORMAT").or_else(|| read_env("STYLIST_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(database_url) = overrides.database_url {
            self.database.url = database_url;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(enabled) = overrides.generation_enabled {
            self.generation.enabled = enabled;
        }
        if let Some(endpoint) = overrides.generation_endpoint {
            self.generation.endpoint = endpoint;
        }
        if let Some(match_mode) = overrides.match_mode {
            self.search.match_mode = match_mode;
        }
        if let Some(port) = overrides.server_port {
            self.server.port = port;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_database(&self.database)?;
        validate_generation(&self.generation)?;
        validate_server(&self.server)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("stylist.toml"), PathBuf::from("config/stylist.toml")]
        .into_iter()
        .find(|path| path.exists())
}

/// The config file `load` would read, if any.
pub fn detect_config_path() -> Option<PathBuf> {
    resolve_config_path(None)
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_database(database: &DatabaseConfig) -> Result<(), ConfigError> {
    let url = database.url.trim();
    let sqlite_url =
        url.starts_with("sqlite://") || url.starts_with("sqlite::") || url == ":memory:";
    if !sqlite_url {
        return Err(ConfigError::Validation(
            "database.url must be a sqlite URL (`sqlite://...`, `sqlite::...`, or `:memory:`)"
                .to_string(),
        ));
    }

    if database.max_connections == 0 {
        return Err(ConfigError::Validation(
            "database.max_connections must be greater than zero".to_string(),
        ));
    }

    if database.timeout_secs == 0 || database.timeout_secs > 300 {
        return Err(ConfigError::Validation(
            "database.timeout_secs must be in range 1..=300".to_string(),
        ));
    }

    Ok(())
}

fn validate_generation(generation: &GenerationConfig) -> Result<(), ConfigError> {
    if generation.timeout_secs == 0 || generation.timeout_secs > 300 {
        return Err(ConfigError::Validation(
            "generation.timeout_secs must be in range 1..=300".to_string(),
        ));
    }

    if generation.max_length == 0 {
        return Err(ConfigError::Validation(
            "generation.max_length must be greater than zero".to_string(),
        ));
    }

    let endpoint = generation.endpoint.trim();
    if generation.enabled && !endpoint.starts_with("http://") && !endpoint.starts_with("https://")
    {
        return Err(ConfigError::Validation(
            "generation.endpoint must start with http:// or https://".to_string(),
        ));
    }

    let blank_key = generation
        .api_key
        .as_ref()
        .map(|value| value.expose_secret().trim().is_empty())
        .unwrap_or(false);
    if blank_key {
        return Err(ConfigError::Validation(
            "generation.api_key must not be blank when set".to_string(),
        ));
    }

    Ok(())
}

fn validate_server(server: &ServerConfig) -> Result<(), ConfigError> {
    if server.bind_address.trim().is_empty() {
        return Err(ConfigError::Validation("server.bind_address is required".to_string()));
    }

    if server.graceful_shutdown_secs == 0 {
        return Err(ConfigError::Validation(
            "server.graceful_shutdown_secs must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u16(key: &str, value: &str) -> Result<u16, ConfigError> {
    value.parse::<u16>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.parse::<u32>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    value.parse::<bool>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    database: Option<DatabasePatch>,
    generation: Option<GenerationPatch>,
    search: Option<SearchPatch>,
    server: Option<ServerPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct DatabasePatch {
    url: Option<String>,
    max_connections: Option<u32>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct GenerationPatch {
    enabled: Option<bool>,
    endpoint: Option<String>,
    api_key: Option<String>,
    timeout_secs: Option<u64>,
    max_length: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct SearchPatch {
    match_mode: Option<MatchMode>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerPatch {
    bind_address: Option<String>,
    port: Option<u16>,
    graceful_shutdown_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
