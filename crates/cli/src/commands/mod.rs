pub mod actions;
pub mod batch;
pub mod config;
pub mod plan;
pub mod resolve;
pub mod table;

use serde::Serialize;
use serde_json::Value;
use tally_core::config::{AppConfig, LoadOptions};
use tally_core::workflow::{classify_status, StatusNormalization};
use tally_core::{ApplicationError, CanonicalStatus, Role, WorkflowEngine};

pub const EXIT_CONFIG: u8 = 2;
pub const EXIT_INVALID_INPUT: u8 = 3;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl CommandResult {
    pub fn success_with(command: &str, message: impl Into<String>, data: impl Serialize) -> Self {
        let data = match serde_json::to_value(data) {
            Ok(data) => data,
            Err(error) => {
                return Self::failure(command, "serialization", error.to_string(), 1);
            }
        };
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
            data: Some(data),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
            data: None,
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    pub fn from_error(command: &str, error: &ApplicationError) -> Self {
        let exit_code = match error {
            ApplicationError::Configuration(_) => EXIT_CONFIG,
            ApplicationError::InvalidInput(_) | ApplicationError::Domain(_) => EXIT_INVALID_INPUT,
        };
        Self::failure(command, error.error_class(), error.to_string(), exit_code)
    }
}

/// Loaded configuration plus the engine built from it.
pub struct CommandContext {
    pub config: AppConfig,
    pub engine: WorkflowEngine,
}

impl CommandContext {
    pub fn load() -> Result<Self, ApplicationError> {
        let config = AppConfig::load(LoadOptions::default())?;
        let engine = config.workflow_engine()?;
        Ok(Self { config, engine })
    }

    pub fn role(&self, raw: &str) -> Result<Role, ApplicationError> {
        Ok(self.config.role_from_str(raw)?)
    }
}

/// Normalizes a status argument, logging when an unknown value fell back to draft.
pub fn status_arg(raw: &str) -> (CanonicalStatus, StatusNormalization) {
    let normalization = classify_status(raw);
    if !normalization.is_recognized() {
        tracing::warn!(
            event_name = "cli.status.unrecognized",
            input = raw,
            "unrecognized status argument treated as DRAFT"
        );
    }
    (normalization.status(), normalization)
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}
