//! Rendering core for Lark Notice build notifications.
//!
//! A [`BuildEvent`] is rendered into a markdown body for each configured chat
//! robot, and projected into an [`OutboundDraft`] carrying the card routing
//! fields. [`Notifier`] combines both for every robot in a [`NoticeConfig`].

pub mod config;
pub mod duration;
pub mod logging;
pub mod model;
pub mod notifier;
pub mod render;

pub use config::{
    ConfigLoader,
    NoticeConfig,
    RobotFileConfig,
};
pub use duration::format_elapsed;
pub use lark_notice_api::{
    BuildStatus,
    OutboundDraft,
    OutboundMessage,
    RobotRegistry,
    RobotType,
};
pub use model::{
    BuildEvent,
    NOT_STARTED,
};
pub use notifier::{
    Notifier,
    PreparedNotice,
};
pub use render::{
    infer_environment,
    normalize_commit,
    render,
    to_outbound_draft,
    to_outbound_draft_with,
};
