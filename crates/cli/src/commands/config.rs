use std::env;
use std::fs;
use std::path::Path;

use stylist_core::config::{detect_config_path, AppConfig, LoadOptions};
use toml::Value;

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];

    lines.push(render_line(
        "database.url",
        &config.database.url,
        field_source(
            "database.url",
            &["STYLIST_DATABASE_URL"],
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "database.max_connections",
        &config.database.max_connections.to_string(),
        field_source(
            "database.max_connections",
            &["STYLIST_DATABASE_MAX_CONNECTIONS"],
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "database.timeout_secs",
        &config.database.timeout_secs.to_string(),
        field_source(
            "database.timeout_secs",
            &["STYLIST_DATABASE_TIMEOUT_SECS"],
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "generation.enabled",
        &config.generation.enabled.to_string(),
        field_source(
            "generation.enabled",
            &["STYLIST_GENERATION_ENABLED"],
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "generation.endpoint",
        &config.generation.endpoint,
        field_source(
            "generation.endpoint",
            &["STYLIST_GENERATION_ENDPOINT"],
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));

    let generation_api_key =
        if config.generation.api_key.is_some() { "<redacted>" } else { "<unset>" };
    lines.push(render_line(
        "generation.api_key",
        generation_api_key,
        field_source(
            "generation.api_key",
            &["STYLIST_GENERATION_API_KEY"],
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "generation.timeout_secs",
        &config.generation.timeout_secs.to_string(),
        field_source(
            "generation.timeout_secs",
            &["STYLIST_GENERATION_TIMEOUT_SECS"],
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "generation.max_length",
        &config.generation.max_length.to_string(),
        field_source(
            "generation.max_length",
            &["STYLIST_GENERATION_MAX_LENGTH"],
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "search.match_mode",
        &format!("{:?}", config.search.match_mode),
        field_source(
            "search.match_mode",
            &["STYLIST_SEARCH_MATCH_MODE"],
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "server.bind_address",
        &config.server.bind_address,
        field_source(
            "server.bind_address",
            &["STYLIST_SERVER_BIND_ADDRESS"],
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "server.port",
        &config.server.port.to_string(),
        field_source(
            "server.port",
            &["STYLIST_SERVER_PORT"],
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "server.graceful_shutdown_secs",
        &config.server.graceful_shutdown_secs.to_string(),
        field_source(
            "server.graceful_shutdown_secs",
            &["STYLIST_SERVER_GRACEFUL_SHUTDOWN_SECS"],
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "logging.level",
        &config.logging.level,
        field_source(
            "logging.level",
            &["STYLIST_LOGGING_LEVEL", "STYLIST_LOG_LEVEL"],
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));
    lines.push(render_line(
        "logging.format",
        &format!("{:?}", config.logging.format),
        field_source(
            "logging.format",
            &["STYLIST_LOGGING_FORMAT", "STYLIST_LOG_FORMAT"],
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        ),
    ));

    lines.join("\n")
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}
