//! Markdown body rendering for build notices.
//!
//! The body is a fixed sequence of template lines. Robots differ only in the
//! inline tag used to color text and in whether the body opens with a colored
//! title block, which also switches line joins to hard markdown breaks.

use lark_notice_api::{
    ButtonFactory,
    DefaultButtons,
    MsgType,
    OutboundDraft,
    RobotProfile,
    StatusMeta,
};

use crate::model::BuildEvent;

/// Ordered environment tokens. The first token contained in the project name
/// wins, so the site-specific test tokens must stay ahead of `test`.
const ENVIRONMENT_RULES: &[(&str, &str)] = &[
    ("test_fz", "测试环境(福州)"),
    ("test_xm", "测试环境(厦门)"),
    ("test", "测试环境"),
    ("pre", "预发环境"),
    ("prod", "生产环境"),
];

const COMMIT_DISPLAY_LEN: usize = 8;

const MISSING_COMMIT: &str = "null";

const DIVIDER: &str = "---";

const LINE_SEPARATOR: &str = "\n";

/// Two trailing spaces force a hard line break in DingTalk markdown
const HARD_BREAK_SEPARATOR: &str = "  \n";

/// Classifies the deployment environment from a project name.
pub fn infer_environment(project_name: &str) -> &'static str {
    ENVIRONMENT_RULES
        .iter()
        .find(|(token, _)| project_name.contains(token))
        .map(|(_, environment)| *environment)
        .unwrap_or("")
}

/// Shortens a commit id to its first 8 characters, or `"null"` when absent.
pub fn normalize_commit(commit_id: Option<&str>) -> String {
    match commit_id {
        None | Some("") => MISSING_COMMIT.to_string(),
        Some(id) => id.chars().take(COMMIT_DISPLAY_LEN).collect(),
    }
}

fn colored_tag(tag_name: &str, color: &str, text: &str) -> String {
    format!("<{tag} color='{color}'>{text}</{tag}>", tag = tag_name)
}

/// Renders the message body of `event` for `robot`.
pub fn render<R>(event: &BuildEvent, robot: &R) -> String
where
    R: RobotProfile + ?Sized,
{
    let leading_block = robot.requires_leading_tag_block();
    let tag_name = robot.status_tag_name();
    let status = &event.status_type;
    let started = event.is_started();

    let mut lines: Vec<String> = Vec::with_capacity(9);

    if leading_block {
        lines.push(format!(
            "## {}",
            colored_tag(tag_name, status.color(), &event.title)
        ));
        lines.push(DIVIDER.to_string());
    }

    let environment = infer_environment(&event.project_name);

    lines.push(format!(
        "工程名称：[{}]({}) - [{}]({})",
        event.project_name, event.project_url, event.job_name, event.job_url
    ));
    lines.push(format!("发布环境：{}-{}", event.pi_project_name, environment));

    if started {
        let commit = normalize_commit(event.git_commit_id.as_deref());
        lines.push(format!(
            "构建分支：{} ({} [{}])",
            event.job_action, event.git_branch, commit
        ));
    } else {
        lines.push(format!("构建分支：{} ({})", event.job_action, event.git_branch));
    }

    lines.push(format!(
        "当前状态：{}",
        colored_tag(tag_name, status.color(), status.label())
    ));

    if started {
        lines.push(format!("构建用时：{}", event.duration));
    }

    lines.push(format!("触发用户：{}", event.executor_name));
    lines.push(event.content.clone().unwrap_or_default());

    tracing::debug!(
        robot = robot.id(),
        status = %event.status_type,
        started,
        lines = lines.len(),
        "Rendered build notice"
    );

    let separator = if leading_block {
        HARD_BREAK_SEPARATOR
    } else {
        LINE_SEPARATOR
    };
    lines.join(separator)
}

/// Projects the routing fields of `event` into a card draft.
pub fn to_outbound_draft(event: &BuildEvent) -> OutboundDraft {
    to_outbound_draft_with(event, &DefaultButtons)
}

pub fn to_outbound_draft_with<F>(event: &BuildEvent, buttons: &F) -> OutboundDraft
where
    F: ButtonFactory + ?Sized,
{
    OutboundDraft {
        kind: MsgType::Card,
        status_type: event.status_type,
        buttons: buttons.make_default_buttons(&event.job_url),
        title: event.title.clone(),
    }
}

#[cfg(test)]
mod tests {
    use lark_notice_api::{
        BuildStatus,
        Button,
        ButtonKind,
        RobotType,
    };

    use super::*;
    use crate::model::NOT_STARTED;

    fn make_event(duration: &str) -> BuildEvent {
        let mut event =
            BuildEvent::new("app-test_xm-svc #12", "app-test_xm-svc", BuildStatus::Success);
        event.project_url = "https://ci.example.com/job/app-test_xm-svc/".to_string();
        event.job_name = "#12".to_string();
        event.job_url = "https://ci.example.com/job/app-test_xm-svc/12/".to_string();
        event.duration = duration.to_string();
        event.executor_name = "alice".to_string();
        event.executor_mobile = "13800000000".to_string();
        event.pi_project_name = "payments".to_string();
        event.git_branch = "main".to_string();
        event.git_commit_id = Some("a1b2c3d4e5f6".to_string());
        event.job_action = "deploy".to_string();
        event
    }

    #[test]
    fn test_environment_priority() {
        assert_eq!(infer_environment("svc-test_fz-prod"), "测试环境(福州)");
        assert_eq!(infer_environment("svc-prod-test_fz"), "测试环境(福州)");
        assert_eq!(infer_environment("svc-test_xm"), "测试环境(厦门)");
        assert_eq!(infer_environment("svc-test-prod"), "测试环境");
        assert_eq!(infer_environment("svc-pre"), "预发环境");
        assert_eq!(infer_environment("svc-prod"), "生产环境");
    }

    #[test]
    fn test_environment_unmatched_and_case_sensitive() {
        assert_eq!(infer_environment("svc-staging"), "");
        assert_eq!(infer_environment("svc-PROD"), "");
        assert_eq!(infer_environment(""), "");
    }

    #[test]
    fn test_environment_plain_substring() {
        // "preview" contains "pre"
        assert_eq!(infer_environment("preview-site"), "预发环境");
    }

    #[test]
    fn test_normalize_commit() {
        assert_eq!(normalize_commit(None), "null");
        assert_eq!(normalize_commit(Some("")), "null");
        assert_eq!(normalize_commit(Some("abcd")), "abcd");
        assert_eq!(normalize_commit(Some("abcdefgh")), "abcdefgh");
        assert_eq!(normalize_commit(Some("abcdefgh12345")), "abcdefgh");
    }

    #[test]
    fn test_not_started_for_lark() {
        let body = render(&make_event(NOT_STARTED), &RobotType::Lark);
        let lines: Vec<&str> = body.split('\n').collect();

        assert_eq!(
            lines,
            vec![
                "工程名称：[app-test_xm-svc](https://ci.example.com/job/app-test_xm-svc/) - [#12](https://ci.example.com/job/app-test_xm-svc/12/)",
                "发布环境：payments-测试环境(厦门)",
                "构建分支：deploy (main)",
                "当前状态：<text_tag color='green'>成功</text_tag>",
                "触发用户：alice",
                "",
            ]
        );
        assert!(!body.contains("构建用时"));
        assert!(!body.contains("a1b2c3d4"));
    }

    #[test]
    fn test_started_for_lark() {
        let body = render(&make_event("3m12s"), &RobotType::Lark);
        let lines: Vec<&str> = body.split('\n').collect();

        assert_eq!(lines.len(), 7);
        assert_eq!(lines[2], "构建分支：deploy (main [a1b2c3d4])");
        assert_eq!(lines[3], "当前状态：<text_tag color='green'>成功</text_tag>");
        assert_eq!(lines[4], "构建用时：3m12s");
        assert_eq!(lines[5], "触发用户：alice");
    }

    #[test]
    fn test_started_without_commit_renders_null() {
        let mut event = make_event("10s");
        event.git_commit_id = None;
        let body = render(&event, &RobotType::Lark);
        assert!(body.contains("(main [null])"));
    }

    #[test]
    fn test_ding_talk_leading_block_and_hard_breaks() {
        let body = render(&make_event("3m12s"), &RobotType::DingTalk);
        let lines: Vec<&str> = body.split("  \n").collect();

        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "## <font color='green'>app-test_xm-svc #12</font>");
        assert_eq!(lines[1], "---");
        assert_eq!(lines[5], "当前状态：<font color='green'>成功</font>");
        assert_eq!(lines[8], "");
    }

    #[test]
    fn test_line_count_ignores_content() {
        for robot in RobotType::all() {
            for duration in [NOT_STARTED, "1m2s"] {
                let empty = make_event(duration);
                let mut filled = make_event(duration);
                filled.content = Some("build log tail".to_string());

                let separator = if robot.requires_leading_tag_block() {
                    "  \n"
                } else {
                    "\n"
                };
                let empty_body = render(&empty, robot);
                let filled_body = render(&filled, robot);

                assert_eq!(
                    empty_body.split(separator).count(),
                    filled_body.split(separator).count()
                );
                assert!(filled_body.ends_with("build log tail"));
                assert!(empty_body.ends_with(separator));
            }
        }
    }

    #[test]
    fn test_description_and_contacts_not_rendered() {
        let mut event = make_event("5s");
        event.description = "nightly rollout".to_string();
        event.executor_open_id = "ou_123".to_string();
        let body = render(&event, &RobotType::Lark);

        assert!(!body.contains("nightly rollout"));
        assert!(!body.contains("13800000000"));
        assert!(!body.contains("ou_123"));
    }

    #[test]
    fn test_render_is_repeatable() {
        let event = make_event("3m12s");
        let original = event.clone();

        for robot in RobotType::all() {
            assert_eq!(render(&event, robot), render(&event, robot));
        }
        assert_eq!(event, original);
    }

    #[test]
    fn test_render_through_trait_object() {
        let robot: &dyn RobotProfile = &RobotType::DingTalk;
        let body = render(&make_event(NOT_STARTED), robot);
        assert!(body.starts_with("## <font color='green'>"));
    }

    #[test]
    fn test_unmatched_environment_renders_empty() {
        let mut event = make_event(NOT_STARTED);
        event.project_name = "billing".to_string();
        let body = render(&event, &RobotType::Lark);
        assert!(body.contains("发布环境：payments-\n"));
    }

    #[test]
    fn test_draft_projection() {
        let event = make_event("3m12s");
        let draft = to_outbound_draft(&event);

        assert_eq!(draft.kind, MsgType::Card);
        assert_eq!(draft.status_type, BuildStatus::Success);
        assert_eq!(draft.title, "app-test_xm-svc #12");
        assert_eq!(draft.buttons.len(), 2);
        assert_eq!(
            draft.buttons[1].url,
            "https://ci.example.com/job/app-test_xm-svc/12/console"
        );
    }

    #[test]
    fn test_draft_with_custom_factory() {
        struct SingleButton;

        impl ButtonFactory for SingleButton {
            fn make_default_buttons(&self, job_url: &str) -> Vec<Button> {
                vec![Button::new("open", job_url, ButtonKind::Primary)]
            }
        }

        let event = make_event(NOT_STARTED);
        let draft = to_outbound_draft_with(&event, &SingleButton);
        assert_eq!(draft.buttons.len(), 1);
        assert_eq!(draft.buttons[0].url, event.job_url);
    }

    #[test]
    fn test_draft_without_job_url_has_no_buttons() {
        let mut event = make_event(NOT_STARTED);
        event.job_url.clear();
        assert!(to_outbound_draft(&event).buttons.is_empty());
    }
}
