use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tally_core::config::{AppConfig, LoadOptions};
use tally_core::ApplicationError;
use toml::Value;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct ConfigField {
    key: &'static str,
    value: String,
    source: String,
}

pub fn run() -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return CommandResult::from_error("config", &ApplicationError::from(error)),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());
    let source = |key_path: &str, env_keys: &[&str]| {
        field_source(key_path, env_keys, config_file_doc.as_ref(), config_file_path.as_deref())
    };

    let grants = config
        .workflow
        .extra_grants
        .iter()
        .map(|grant| format!("{}:{}:{}", grant.role, grant.status, grant.action))
        .collect::<Vec<_>>()
        .join(", ");

    let fields = vec![
        ConfigField {
            key: "workflow.hr_is_admin",
            value: config.workflow.hr_is_admin.to_string(),
            source: source("workflow.hr_is_admin", &["TALLY_WORKFLOW_HR_IS_ADMIN"]),
        },
        ConfigField {
            key: "workflow.extra_grants",
            value: if grants.is_empty() { "<none>".to_string() } else { grants },
            source: source("workflow.extra_grants", &[]),
        },
        ConfigField {
            key: "limits.min_hours",
            value: config.limits.min_hours.to_string(),
            source: source("limits.min_hours", &["TALLY_LIMITS_MIN_HOURS"]),
        },
        ConfigField {
            key: "limits.max_hours",
            value: config.limits.max_hours.to_string(),
            source: source("limits.max_hours", &["TALLY_LIMITS_MAX_HOURS"]),
        },
        ConfigField {
            key: "limits.min_hourly_rate",
            value: config.limits.min_hourly_rate.to_string(),
            source: source("limits.min_hourly_rate", &["TALLY_LIMITS_MIN_HOURLY_RATE"]),
        },
        ConfigField {
            key: "limits.max_hourly_rate",
            value: config.limits.max_hourly_rate.to_string(),
            source: source("limits.max_hourly_rate", &["TALLY_LIMITS_MAX_HOURLY_RATE"]),
        },
        ConfigField {
            key: "limits.max_description_len",
            value: config.limits.max_description_len.to_string(),
            source: source("limits.max_description_len", &["TALLY_LIMITS_MAX_DESCRIPTION_LEN"]),
        },
        ConfigField {
            key: "logging.level",
            value: config.logging.level.clone(),
            source: source("logging.level", &["TALLY_LOGGING_LEVEL", "TALLY_LOG_LEVEL"]),
        },
        ConfigField {
            key: "logging.format",
            value: format!("{:?}", config.logging.format).to_ascii_lowercase(),
            source: source("logging.format", &["TALLY_LOGGING_FORMAT", "TALLY_LOG_FORMAT"]),
        },
    ];

    CommandResult::success_with(
        "config",
        "effective config (source precedence: env > file > default)",
        fields,
    )
}

fn detect_config_path() -> Option<PathBuf> {
    [PathBuf::from("tally.toml"), PathBuf::from("config/tally.toml")]
        .into_iter()
        .find(|path| path.exists())
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
    if let Some(env_key) = env_keys.iter().find(|key| env_is_set(key)) {
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

/// Matches the loader: blank values do not override.
fn env_is_set(key: &str) -> bool {
    env::var(key).is_ok_and(|value| !value.trim().is_empty())
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
