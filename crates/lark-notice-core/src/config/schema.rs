use std::path::PathBuf;

use indexmap::IndexMap;
use lark_notice_api::BuildStatus;
use serde::{
    Deserialize,
    Serialize,
};

use crate::logging::DEFAULT_LOG_FILTER;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NoticeConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    /// Robots keyed by id, in file order
    #[serde(default)]
    pub robots: IndexMap<String, RobotFileConfig>,
}

impl NoticeConfig {
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .map(|p| p.join("lark-notice"))
            .unwrap_or_else(|| PathBuf::from(".lark-notice"))
    }

    pub fn enabled_robots(&self) -> impl Iterator<Item = (&String, &RobotFileConfig)> {
        self.robots.iter().filter(|(_, robot)| robot.enabled)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RobotFileConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Robot type id as registered in the robot registry (e.g. "lark")
    #[serde(rename = "type")]
    pub robot_type: String,

    #[serde(default)]
    pub webhook: String,

    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Statuses this robot is notified about
    #[serde(default = "default_notify_on")]
    pub notify_on: Vec<BuildStatus>,

    #[serde(default)]
    pub at_all: bool,

    /// Mention the user who triggered the build
    #[serde(default)]
    pub mention_executor: bool,
}

impl RobotFileConfig {
    pub fn new(robot_type: impl Into<String>, webhook: impl Into<String>) -> Self {
        Self {
            name: None,
            robot_type: robot_type.into(),
            webhook: webhook.into(),
            enabled: default_enabled(),
            notify_on: default_notify_on(),
            at_all: false,
            mention_executor: false,
        }
    }

    pub fn notifies(&self, status: BuildStatus) -> bool {
        self.notify_on.contains(&status)
    }
}

fn default_enabled() -> bool {
    true
}

fn default_notify_on() -> Vec<BuildStatus> {
    BuildStatus::all().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_robot_defaults() {
        let robot: RobotFileConfig = toml::from_str(r#"type = "lark""#).unwrap();
        assert!(robot.enabled);
        assert!(robot.webhook.is_empty());
        assert_eq!(robot.notify_on.len(), BuildStatus::all().len());
        assert!(!robot.at_all);
    }

    #[test]
    fn test_notifies() {
        let mut robot = RobotFileConfig::new("lark", "https://hook");
        robot.notify_on = vec![BuildStatus::Failure];
        assert!(robot.notifies(BuildStatus::Failure));
        assert!(!robot.notifies(BuildStatus::Success));
    }

    #[test]
    fn test_enabled_robots_keeps_order() {
        let mut config = NoticeConfig::default();
        config
            .robots
            .insert("b".to_string(), RobotFileConfig::new("lark", "x"));
        let mut disabled = RobotFileConfig::new("lark", "y");
        disabled.enabled = false;
        config.robots.insert("c".to_string(), disabled);
        config
            .robots
            .insert("a".to_string(), RobotFileConfig::new("ding_talk", "z"));

        let ids: Vec<&str> = config.enabled_robots().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
