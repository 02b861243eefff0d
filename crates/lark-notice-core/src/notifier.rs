//! Fans one build event out to every configured robot.

use lark_notice_api::{
    NoticeError,
    NoticeResult,
    OutboundMessage,
    RobotProfile,
    RobotRegistry,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::config::{
    NoticeConfig,
    RobotFileConfig,
};
use crate::model::BuildEvent;
use crate::render::{
    render,
    to_outbound_draft,
};

/// A rendered message addressed to one robot, ready for delivery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreparedNotice {
    pub robot_id: String,
    pub robot_type: String,
    pub webhook: String,
    pub message: OutboundMessage,
}

pub struct Notifier {
    config: NoticeConfig,
    registry: RobotRegistry,
}

impl Notifier {
    pub fn new(config: NoticeConfig, registry: RobotRegistry) -> Self {
        Self { config, registry }
    }

    pub fn config(&self) -> &NoticeConfig {
        &self.config
    }

    /// Renders `event` once per enabled robot subscribed to its status, in
    /// config order.
    pub fn prepare(&self, event: &BuildEvent) -> NoticeResult<Vec<PreparedNotice>> {
        let mut notices = Vec::new();

        for (robot_id, robot_config) in self.config.enabled_robots() {
            if !robot_config.notifies(event.status_type) {
                tracing::debug!(
                    robot_id = %robot_id,
                    status = %event.status_type,
                    "Robot not subscribed to status, skipping"
                );
                continue;
            }

            notices.push(self.prepare_for(robot_id, robot_config, event)?);
        }

        tracing::info!(
            project = %event.project_name,
            status = %event.status_type,
            count = notices.len(),
            "Prepared build notices"
        );

        Ok(notices)
    }

    fn prepare_for(
        &self, robot_id: &str, robot_config: &RobotFileConfig, event: &BuildEvent,
    ) -> NoticeResult<PreparedNotice> {
        let profile = self.registry.resolve(&robot_config.robot_type).ok_or_else(|| {
            tracing::warn!(
                robot_id = %robot_id,
                robot_type = %robot_config.robot_type,
                "Robot type is not registered"
            );
            NoticeError::RobotNotSupported(robot_config.robot_type.clone())
        })?;

        let body = render(event, profile);
        let mut message = to_outbound_draft(event)
            .into_message(body)
            .with_at_all(robot_config.at_all);

        if robot_config.mention_executor {
            message = message.with_mention(&event.executor_mobile, &event.executor_open_id);
        }

        Ok(PreparedNotice {
            robot_id: robot_id.to_string(),
            robot_type: profile.id().to_string(),
            webhook: robot_config.webhook.clone(),
            message,
        })
    }
}
