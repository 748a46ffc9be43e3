use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::role::Role;
use crate::domain::timesheet::TimesheetLimits;
use crate::workflow::action::Action;
use crate::workflow::engine::WorkflowEngine;
use crate::workflow::rules::{RoleGrant, RoleRules};
use crate::workflow::status::{classify_status, StatusNormalization};
use crate::workflow::transitions::TransitionTable;

#[derive(Clone, Debug, Serialize)]
pub struct AppConfig {
    pub workflow: WorkflowConfig,
    pub limits: TimesheetLimits,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, Serialize)]
pub struct WorkflowConfig {
    pub hr_is_admin: bool,
    pub extra_grants: Vec<GrantSpec>,
}

/// A grant as written in the config file, resolved against the workflow
/// vocabulary during validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantSpec {
    pub role: String,
    pub status: String,
    pub action: String,
}

#[derive(Clone, Debug, Serialize)]
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
    pub hr_is_admin: Option<bool>,
    pub max_hours: Option<Decimal>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
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
            workflow: WorkflowConfig { hr_is_admin: true, extra_grants: Vec::new() },
            limits: TimesheetLimits::default(),
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
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
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("tally.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    /// Parses an authenticated role string, honouring the HR alias setting.
    pub fn role_from_str(&self, raw: &str) -> Result<Role, crate::domain::role::RoleParseError> {
        Role::parse(raw, self.workflow.hr_is_admin)
    }

    /// Standard transition table with the standard grants plus any configured
    /// extra grants.
    pub fn workflow_engine(&self) -> Result<WorkflowEngine, ConfigError> {
        let grants = self.workflow.resolve_grants()?;
        if grants.is_empty() {
            return Ok(WorkflowEngine::standard().clone());
        }

        Ok(WorkflowEngine::new(
            TransitionTable::standard(),
            RoleRules::standard().with_grants(grants),
        ))
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(workflow) = patch.workflow {
            if let Some(hr_is_admin) = workflow.hr_is_admin {
                self.workflow.hr_is_admin = hr_is_admin;
            }
            if let Some(extra_grants) = workflow.extra_grants {
                self.workflow.extra_grants = extra_grants;
            }
        }

        if let Some(limits) = patch.limits {
            if let Some(min_hours) = limits.min_hours {
                self.limits.min_hours = min_hours;
            }
            if let Some(max_hours) = limits.max_hours {
                self.limits.max_hours = max_hours;
            }
            if let Some(min_hourly_rate) = limits.min_hourly_rate {
                self.limits.min_hourly_rate = min_hourly_rate;
            }
            if let Some(max_hourly_rate) = limits.max_hourly_rate {
                self.limits.max_hourly_rate = max_hourly_rate;
            }
            if let Some(max_description_len) = limits.max_description_len {
                self.limits.max_description_len = max_description_len;
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
        if let Some(value) = read_env("TALLY_WORKFLOW_HR_IS_ADMIN") {
            self.workflow.hr_is_admin = parse_bool("TALLY_WORKFLOW_HR_IS_ADMIN", &value)?;
        }

        if let Some(value) = read_env("TALLY_LIMITS_MIN_HOURS") {
            self.limits.min_hours = parse_decimal("TALLY_LIMITS_MIN_HOURS", &value)?;
        }
        if let Some(value) = read_env("TALLY_LIMITS_MAX_HOURS") {
            self.limits.max_hours = parse_decimal("TALLY_LIMITS_MAX_HOURS", &value)?;
        }
        if let Some(value) = read_env("TALLY_LIMITS_MIN_HOURLY_RATE") {
            self.limits.min_hourly_rate = parse_decimal("TALLY_LIMITS_MIN_HOURLY_RATE", &value)?;
        }
        if let Some(value) = read_env("TALLY_LIMITS_MAX_HOURLY_RATE") {
            self.limits.max_hourly_rate = parse_decimal("TALLY_LIMITS_MAX_HOURLY_RATE", &value)?;
        }
        if let Some(value) = read_env("TALLY_LIMITS_MAX_DESCRIPTION_LEN") {
            self.limits.max_description_len =
                parse_usize("TALLY_LIMITS_MAX_DESCRIPTION_LEN", &value)?;
        }

        if let Some(value) = read_env("TALLY_LOGGING_LEVEL").or_else(|| read_env("TALLY_LOG_LEVEL"))
        {
            self.logging.level = value;
        }
        if let Some(value) =
            read_env("TALLY_LOGGING_FORMAT").or_else(|| read_env("TALLY_LOG_FORMAT"))
        {
            self.logging.format = value.parse::<LogFormat>()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(hr_is_admin) = overrides.hr_is_admin {
            self.workflow.hr_is_admin = hr_is_admin;
        }
        if let Some(max_hours) = overrides.max_hours {
            self.limits.max_hours = max_hours;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(format) = overrides.log_format {
            self.logging.format = format;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.workflow.resolve_grants()?;
        validate_limits(&self.limits)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

impl WorkflowConfig {
    pub fn resolve_grants(&self) -> Result<Vec<RoleGrant>, ConfigError> {
        self.extra_grants
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                let role = Role::parse(&spec.role, self.hr_is_admin).map_err(|_| {
                    ConfigError::Validation(format!(
                        "workflow.extra_grants[{index}].role `{}` is not a known role",
                        spec.role
                    ))
                })?;
                let status = match classify_status(&spec.status) {
                    StatusNormalization::Unrecognized { .. } => {
                        return Err(ConfigError::Validation(format!(
                            "workflow.extra_grants[{index}].status `{}` is not a known status",
                            spec.status
                        )));
                    }
                    recognized => recognized.status(),
                };
                let action = spec.action.parse::<Action>().map_err(|_| {
                    ConfigError::Validation(format!(
                        "workflow.extra_grants[{index}].action `{}` is not a known action",
                        spec.action
                    ))
                })?;
                Ok(RoleGrant::new(role, status, action))
            })
            .collect()
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("tally.toml"), PathBuf::from("config/tally.toml")]
        .into_iter()
        .find(|path| path.exists())
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

fn validate_limits(limits: &TimesheetLimits) -> Result<(), ConfigError> {
    if limits.min_hours <= Decimal::ZERO {
        return Err(ConfigError::Validation(
            "limits.min_hours must be greater than zero".to_string(),
        ));
    }

    if limits.max_hours <= limits.min_hours {
        return Err(ConfigError::Validation(
            "limits.max_hours must be greater than limits.min_hours".to_string(),
        ));
    }

    if limits.min_hourly_rate <= Decimal::ZERO {
        return Err(ConfigError::Validation(
            "limits.min_hourly_rate must be greater than zero".to_string(),
        ));
    }

    if limits.max_hourly_rate <= limits.min_hourly_rate {
        return Err(ConfigError::Validation(
            "limits.max_hourly_rate must be greater than limits.min_hourly_rate".to_string(),
        ));
    }

    if limits.max_description_len == 0 {
        return Err(ConfigError::Validation(
            "limits.max_description_len must be greater than zero".to_string(),
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

fn parse_usize(key: &str, value: &str) -> Result<usize, ConfigError> {
    value.trim().parse::<usize>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_decimal(key: &str, value: &str) -> Result<Decimal, ConfigError> {
    value.trim().parse::<Decimal>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    value.trim().parse::<bool>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    workflow: Option<WorkflowPatch>,
    limits: Option<LimitsPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct WorkflowPatch {
    hr_is_admin: Option<bool>,
    extra_grants: Option<Vec<GrantSpec>>,
}

#[derive(Debug, Default, Deserialize)]
struct LimitsPatch {
    min_hours: Option<Decimal>,
    max_hours: Option<Decimal>,
    min_hourly_rate: Option<Decimal>,
    max_hourly_rate: Option<Decimal>,
    max_description_len: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::io;
    use std::sync::{Mutex, OnceLock};

    use rust_decimal::Decimal;
    use tempfile::TempDir;

    use super::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
    use crate::domain::role::Role;
    use crate::workflow::action::Action;
    use crate::workflow::status::CanonicalStatus;

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    const TALLY_VARS: [&str; 10] = [
        "TALLY_WORKFLOW_HR_IS_ADMIN",
        "TALLY_LIMITS_MIN_HOURS",
        "TALLY_LIMITS_MAX_HOURS",
        "TALLY_LIMITS_MIN_HOURLY_RATE",
        "TALLY_LIMITS_MAX_HOURLY_RATE",
        "TALLY_LIMITS_MAX_DESCRIPTION_LEN",
        "TALLY_LOGGING_LEVEL",
        "TALLY_LOG_LEVEL",
        "TALLY_LOGGING_FORMAT",
        "TALLY_LOG_FORMAT",
    ];

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_vars(vars: &[&str]) {
        for var in vars {
            env::remove_var(var);
        }
    }

    fn ensure(condition: bool, message: &'static str) -> Result<(), String> {
        if condition {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }

    fn write_config(dir: &TempDir, contents: &str) -> Result<std::path::PathBuf, String> {
        let path = dir.path().join("tally.toml");
        fs::write(&path, contents).map_err(|err| err.to_string())?;
        Ok(path)
    }

    #[test]
    fn defaults_match_the_standard_workflow() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(&TALLY_VARS);

        let config = AppConfig::load(LoadOptions::default())
            .map_err(|err| format!("config load failed: {err}"))?;

        ensure(config.workflow.hr_is_admin, "hr alias is on by default")?;
        ensure(config.limits.max_hours == Decimal::new(40, 0), "max hours default is 40")?;
        ensure(config.logging.format == LogFormat::Compact, "default format is compact")?;
        let engine = config.workflow_engine().map_err(|err| err.to_string())?;
        ensure(
            &engine == crate::workflow::engine::WorkflowEngine::standard(),
            "no extra grants means the standard engine",
        )
    }

    #[test]
    fn file_load_supports_env_interpolation() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(&TALLY_VARS);
        env::set_var("TEST_TALLY_MAX_HOURS", "38.5");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = write_config(
                &dir,
                r#"
[limits]
max_hours = "${TEST_TALLY_MAX_HOURS}"
"#,
            )?;

            let config =
                AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                    .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.limits.max_hours == Decimal::new(385, 1),
                "max hours should be interpolated from the environment",
            )
        })();

        clear_vars(&["TEST_TALLY_MAX_HOURS"]);
        result
    }

    #[test]
    fn logging_env_aliases_are_supported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(&TALLY_VARS);
        env::set_var("TALLY_LOG_LEVEL", "warn");
        env::set_var("TALLY_LOG_FORMAT", "pretty");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.logging.level == "warn", "warning log level should be set from env var")?;
            ensure(
                matches!(config.logging.format, LogFormat::Pretty),
                "pretty logging format should be set from env var",
            )
        })();

        clear_vars(&TALLY_VARS);
        result
    }

    #[test]
    fn precedence_defaults_file_env_overrides() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(&TALLY_VARS);
        env::set_var("TALLY_LIMITS_MAX_HOURS", "30");
        env::set_var("TALLY_WORKFLOW_HR_IS_ADMIN", "false");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = write_config(
                &dir,
                r#"
[workflow]
hr_is_admin = true

[limits]
max_hours = "20"
max_hourly_rate = "150.00"

[logging]
level = "warn"
"#,
            )?;

            let config = AppConfig::load(LoadOptions {
                config_path: Some(path),
                overrides: ConfigOverrides {
                    max_hours: Some(Decimal::new(25, 0)),
                    log_level: Some("debug".to_string()),
                    ..ConfigOverrides::default()
                },
                ..LoadOptions::default()
            })
            .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.limits.max_hours == Decimal::new(25, 0),
                "override max hours should win",
            )?;
            ensure(config.logging.level == "debug", "overridden log level should be debug")?;
            ensure(!config.workflow.hr_is_admin, "env should win over the file")?;
            ensure(
                config.limits.max_hourly_rate == Decimal::new(15_000, 2),
                "file value should win over the default",
            )?;
            ensure(
                config.role_from_str("HR").is_err(),
                "HR is not an administrator once the alias is disabled",
            )
        })();

        clear_vars(&TALLY_VARS);
        result
    }

    #[test]
    fn extra_grants_extend_the_standard_rules() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(&TALLY_VARS);

        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let path = write_config(
            &dir,
            r#"
[[workflow.extra_grants]]
role = "lecturer"
status = "draft"
action = "submit"
"#,
        )?;

        let config =
            AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                .map_err(|err| format!("config load failed: {err}"))?;
        let engine = config.workflow_engine().map_err(|err| err.to_string())?;

        ensure(
            engine
                .resolve_permission(Role::Lecturer, CanonicalStatus::Draft, Action::Submit)
                .is_enabled(),
            "configured grant should enable lecturer submit",
        )?;
        ensure(
            engine
                .resolve_permission(Role::Tutor, CanonicalStatus::Draft, Action::Submit)
                .is_enabled(),
            "standard grants remain in place",
        )
    }

    #[test]
    fn unknown_grant_vocabulary_fails_validation() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(&TALLY_VARS);

        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let path = write_config(
            &dir,
            r#"
[[workflow.extra_grants]]
role = "dean"
status = "DRAFT"
action = "APPROVE"
"#,
        )?;

        let error =
            match AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
            {
                Ok(_) => return Err("expected grant validation failure".to_string()),
                Err(error) => error,
            };
        ensure(
            matches!(
                error,
                ConfigError::Validation(ref message)
                    if message.contains("workflow.extra_grants[0].role")
            ),
            "validation failure should name the offending grant",
        )
    }

    #[test]
    fn validation_fails_fast_with_actionable_error() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(&TALLY_VARS);
        env::set_var("TALLY_LIMITS_MAX_HOURS", "0.05");

        let result = (|| -> Result<(), String> {
            let error = match AppConfig::load(LoadOptions::default()) {
                Ok(_) => {
                    return Err("expected validation failure but config load succeeded".to_string())
                }
                Err(error) => error,
            };
            let has_message = matches!(
                error,
                ConfigError::Validation(ref message) if message.contains("limits.max_hours")
            );
            ensure(has_message, "validation failure should mention limits.max_hours")
        })();

        clear_vars(&TALLY_VARS);
        result
    }

    #[test]
    fn limit_ranges_must_not_collapse() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(&TALLY_VARS);
        env::set_var("TALLY_LIMITS_MIN_HOURLY_RATE", "50");
        env::set_var("TALLY_LIMITS_MAX_HOURLY_RATE", "50");

        let result = match AppConfig::load(LoadOptions::default()) {
            Err(ConfigError::Validation(message)) => ensure(
                message == "limits.max_hourly_rate must be greater than limits.min_hourly_rate",
                "equal rate bounds should be refused",
            ),
            Err(error) => Err(format!("unexpected error: {error}")),
            Ok(_) => Err("expected validation failure for equal bounds".to_string()),
        };

        clear_vars(&TALLY_VARS);
        result
    }

    #[test]
    fn malformed_env_values_are_reported_with_their_key() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(&TALLY_VARS);
        env::set_var("TALLY_WORKFLOW_HR_IS_ADMIN", "sometimes");

        let result = match AppConfig::load(LoadOptions::default()) {
            Err(ConfigError::InvalidEnvOverride { key, .. }) => {
                ensure(key == "TALLY_WORKFLOW_HR_IS_ADMIN", "error should carry the env key")
            }
            other => Err(format!("unexpected load result: {other:?}")),
        };

        clear_vars(&TALLY_VARS);
        result
    }

    #[test]
    fn required_file_must_exist() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        clear_vars(&TALLY_VARS);

        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let missing = dir.path().join("absent.toml");
        let result = AppConfig::load(LoadOptions {
            config_path: Some(missing),
            require_file: true,
            ..LoadOptions::default()
        });

        ensure(
            matches!(result, Err(ConfigError::MissingConfigFile(_))),
            "missing required file should be reported",
        )
    }
}
