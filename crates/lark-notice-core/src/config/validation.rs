use lark_notice_api::RobotRegistry;

use super::interpolation::has_variables;
use super::schema::NoticeConfig;

#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigError>,
    pub warnings: Vec<ConfigWarning>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_issues(&self) -> bool {
        !self.errors.is_empty() || !self.warnings.is_empty()
    }

    pub fn add_error(&mut self, field: String, message: &str, code: ConfigErrorCode) {
        self.errors.push(ConfigError {
            field,
            message: message.to_string(),
            code,
        });
    }

    pub fn add_warning(&mut self, field: String, message: &str, code: ConfigWarningCode) {
        self.warnings.push(ConfigWarning {
            field,
            message: message.to_string(),
            code,
        });
    }

    pub fn summary(&self) -> String {
        if self.errors.is_empty() && self.warnings.is_empty() {
            "Configuration is valid".to_string()
        } else {
            format!(
                "{} error(s), {} warning(s)",
                self.errors.len(),
                self.warnings.len()
            )
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigError {
    pub field: String,
    pub message: String,
    pub code: ConfigErrorCode,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} ({})", self.field, self.message, self.code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorCode {
    MissingRequired,
    UnknownRobotType,
    InvalidValue,
}

impl std::fmt::Display for ConfigErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequired => write!(f, "MISSING_REQUIRED"),
            Self::UnknownRobotType => write!(f, "UNKNOWN_ROBOT_TYPE"),
            Self::InvalidValue => write!(f, "INVALID_VALUE"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub field: String,
    pub message: String,
    pub code: ConfigWarningCode,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} ({})", self.field, self.message, self.code)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigWarningCode {
    PlainTextWebhook,
    UnusedSetting,
}

impl std::fmt::Display for ConfigWarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PlainTextWebhook => write!(f, "PLAIN_TEXT_WEBHOOK"),
            Self::UnusedSetting => write!(f, "UNUSED"),
        }
    }
}

pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a config as written in the file, before interpolation.
    pub fn validate(config: &NoticeConfig, registry: &RobotRegistry) -> ValidationResult {
        let mut result = ValidationResult::new();

        for (id, robot) in &config.robots {
            let field = |name: &str| format!("robots.{}.{}", id, name);

            if registry.resolve(&robot.robot_type).is_none() {
                result.add_error(
                    field("type"),
                    &format!(
                        "unknown robot type '{}', expected one of: {}",
                        robot.robot_type,
                        registry.robot_ids().join(", ")
                    ),
                    ConfigErrorCode::UnknownRobotType,
                );
            }

            if robot.webhook.trim().is_empty() {
                result.add_error(
                    field("webhook"),
                    "webhook is required",
                    ConfigErrorCode::MissingRequired,
                );
            } else if !has_variables(&robot.webhook) {
                result.add_warning(
                    field("webhook"),
                    "webhook is stored in plain text, consider ${ENV_VAR}",
                    ConfigWarningCode::PlainTextWebhook,
                );
            }

            if robot.notify_on.is_empty() {
                result.add_error(
                    field("notify_on"),
                    "at least one status is required",
                    ConfigErrorCode::InvalidValue,
                );
            }

            if !robot.enabled && (robot.at_all || robot.mention_executor) {
                result.add_warning(
                    field("enabled"),
                    "mention settings have no effect on a disabled robot",
                    ConfigWarningCode::UnusedSetting,
                );
            }
        }

        result
    }
}
