use serde::{
    Deserialize,
    Serialize,
};

use crate::types::BuildStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MsgType {
    Text,
    Post,
    Image,
    ShareChat,
    /// Interactive rich card, used for all build notices
    Card,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ButtonKind {
    Primary,
    #[default]
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub kind: ButtonKind,
}

impl Button {
    pub fn new(title: impl Into<String>, url: impl Into<String>, kind: ButtonKind) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            kind,
        }
    }
}

/// Produces the action buttons attached to a build card
pub trait ButtonFactory {
    fn make_default_buttons(&self, job_url: &str) -> Vec<Button>;
}

/// Links to the change list and the console log of a Jenkins job run
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultButtons;

impl ButtonFactory for DefaultButtons {
    fn make_default_buttons(&self, job_url: &str) -> Vec<Button> {
        if job_url.is_empty() {
            return Vec::new();
        }

        vec![
            Button::new("更改记录", join_url(job_url, "changes"), ButtonKind::Primary),
            Button::new("控制台", join_url(job_url, "console"), ButtonKind::Default),
        ]
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path)
}

/// Routing metadata of a build card, waiting for its rendered body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundDraft {
    pub kind: MsgType,
    pub status_type: BuildStatus,
    pub buttons: Vec<Button>,
    pub title: String,
}

impl OutboundDraft {
    /// Merges a rendered body into the draft
    pub fn into_message(self, text: impl Into<String>) -> OutboundMessage {
        OutboundMessage {
            kind: self.kind,
            status_type: self.status_type,
            title: self.title,
            text: text.into(),
            buttons: self.buttons,
            at_all: false,
            at_open_ids: Vec::new(),
            at_mobiles: Vec::new(),
        }
    }
}

/// A complete message ready for the delivery layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub kind: MsgType,
    pub status_type: BuildStatus,
    pub title: String,
    pub text: String,
    pub buttons: Vec<Button>,
    pub at_all: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub at_open_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub at_mobiles: Vec<String>,
}

impl OutboundMessage {
    #[must_use]
    pub fn with_at_all(mut self, at_all: bool) -> Self {
        self.at_all = at_all;
        self
    }

    /// Adds a user to the mention lists. Empty identifiers and duplicates are skipped.
    #[must_use]
    pub fn with_mention(mut self, mobile: &str, open_id: &str) -> Self {
        if !mobile.is_empty() && !self.at_mobiles.iter().any(|m| m == mobile) {
            self.at_mobiles.push(mobile.to_string());
        }
        if !open_id.is_empty() && !self.at_open_ids.iter().any(|o| o == open_id) {
            self.at_open_ids.push(open_id.to_string());
        }
        self
    }
}
