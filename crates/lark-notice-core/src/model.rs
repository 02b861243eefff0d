use chrono::TimeDelta;
use lark_notice_api::{
    BuildStatus,
    NoticeResult,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::duration::format_elapsed;

/// Duration value reported for a build that has not begun yet
pub const NOT_STARTED: &str = "Not started yet";

/// Snapshot of one build at a status transition (started, finished, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildEvent {
    pub title: String,
    pub project_name: String,
    #[serde(default)]
    pub project_url: String,
    #[serde(default)]
    pub job_name: String,
    #[serde(default)]
    pub job_url: String,
    pub status_type: BuildStatus,
    /// Human-readable elapsed time, or [`NOT_STARTED`]
    #[serde(default = "default_duration")]
    pub duration: String,
    #[serde(default)]
    pub executor_name: String,
    #[serde(default)]
    pub executor_mobile: String,
    #[serde(default)]
    pub executor_open_id: String,
    #[serde(default)]
    pub content: Option<String>,
    /// Not rendered
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub pi_project_name: String,
    #[serde(default)]
    pub git_branch: String,
    #[serde(default)]
    pub git_commit_id: Option<String>,
    #[serde(default)]
    pub job_action: String,
}

fn default_duration() -> String {
    NOT_STARTED.to_string()
}

impl BuildEvent {
    pub fn new(
        title: impl Into<String>, project_name: impl Into<String>, status_type: BuildStatus,
    ) -> Self {
        Self {
            title: title.into(),
            project_name: project_name.into(),
            project_url: String::new(),
            job_name: String::new(),
            job_url: String::new(),
            status_type,
            duration: default_duration(),
            executor_name: String::new(),
            executor_mobile: String::new(),
            executor_open_id: String::new(),
            content: None,
            description: String::new(),
            pi_project_name: String::new(),
            git_branch: String::new(),
            git_commit_id: None,
            job_action: String::new(),
        }
    }

    pub fn is_started(&self) -> bool {
        self.duration != NOT_STARTED
    }

    /// Marks the build as started, `elapsed` ago.
    #[must_use]
    pub fn with_elapsed(mut self, elapsed: TimeDelta) -> Self {
        self.duration = format_elapsed(elapsed);
        self
    }

    pub fn from_json(json: &str) -> NoticeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
