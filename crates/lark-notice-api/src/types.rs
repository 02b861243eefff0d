use serde::{
    Deserialize,
    Serialize,
};

use crate::error::NoticeError;

/// Display metadata of a build status.
///
/// The renderer only ever reads statuses through this trait, so new status
/// tables can be plugged in without touching the line templates.
pub trait StatusMeta {
    /// Human-readable label shown in the status line (e.g. "成功")
    fn label(&self) -> &str;

    /// Color token embedded in the colored status tag (e.g. "green")
    fn color(&self) -> &str;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildStatus {
    Start,
    Success,
    Failure,
    Aborted,
    Unstable,
    NotBuilt,
}

impl BuildStatus {
    pub fn all() -> &'static [BuildStatus] {
        &[
            BuildStatus::Start,
            BuildStatus::Success,
            BuildStatus::Failure,
            BuildStatus::Aborted,
            BuildStatus::Unstable,
            BuildStatus::NotBuilt,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildStatus::Start => "start",
            BuildStatus::Success => "success",
            BuildStatus::Failure => "failure",
            BuildStatus::Aborted => "aborted",
            BuildStatus::Unstable => "unstable",
            BuildStatus::NotBuilt => "not_built",
        }
    }

    /// Maps a Jenkins build result to a status. A missing result means the
    /// build is still running, which is reported as a start notice.
    pub fn from_jenkins_result(result: Option<&str>) -> Self {
        match result {
            Some("SUCCESS") => BuildStatus::Success,
            Some("FAILURE") => BuildStatus::Failure,
            Some("UNSTABLE") => BuildStatus::Unstable,
            Some("ABORTED") => BuildStatus::Aborted,
            Some("NOT_BUILT") => BuildStatus::NotBuilt,
            None => BuildStatus::Start,
            _ => BuildStatus::Failure,
        }
    }
}

impl StatusMeta for BuildStatus {
    fn label(&self) -> &str {
        match self {
            BuildStatus::Start => "开始",
            BuildStatus::Success => "成功",
            BuildStatus::Failure => "失败",
            BuildStatus::Aborted => "终止",
            BuildStatus::Unstable => "不稳定",
            BuildStatus::NotBuilt => "未构建",
        }
    }

    fn color(&self) -> &str {
        match self {
            BuildStatus::Start => "blue",
            BuildStatus::Success => "green",
            BuildStatus::Failure => "red",
            BuildStatus::Aborted | BuildStatus::NotBuilt => "grey",
            BuildStatus::Unstable => "orange",
        }
    }
}

impl std::fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BuildStatus {
    type Err = NoticeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "start" | "started" => Ok(Self::Start),
            "success" => Ok(Self::Success),
            "failure" | "failed" => Ok(Self::Failure),
            "aborted" => Ok(Self::Aborted),
            "unstable" => Ok(Self::Unstable),
            "not_built" | "notbuilt" => Ok(Self::NotBuilt),
            _ => Err(NoticeError::UnknownStatus(s.to_string())),
        }
    }
}
