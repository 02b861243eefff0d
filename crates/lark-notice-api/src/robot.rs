use crate::error::NoticeError;

/// Rendering traits of a chat robot platform
pub trait RobotProfile: Send + Sync {
    /// Robot identifier (e.g., "lark")
    fn id(&self) -> &str;

    /// Robot display name (e.g., "Lark")
    fn display_name(&self) -> &str {
        self.id()
    }

    /// Whether the body starts with a colored title heading and a divider.
    /// Robots that need it also use hard markdown line breaks.
    fn requires_leading_tag_block(&self) -> bool;

    /// Inline tag used to color the status text (e.g., "font")
    fn status_tag_name(&self) -> &str;
}

/// Built-in robot platforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RobotType {
    Lark,
    DingTalk,
}

impl RobotType {
    pub fn all() -> &'static [RobotType] {
        &[RobotType::Lark, RobotType::DingTalk]
    }
}

impl RobotProfile for RobotType {
    fn id(&self) -> &str {
        match self {
            RobotType::Lark => "lark",
            RobotType::DingTalk => "ding_talk",
        }
    }

    fn display_name(&self) -> &str {
        match self {
            RobotType::Lark => "Lark",
            RobotType::DingTalk => "DingTalk",
        }
    }

    fn requires_leading_tag_block(&self) -> bool {
        matches!(self, RobotType::DingTalk)
    }

    fn status_tag_name(&self) -> &str {
        match self {
            RobotType::Lark => "text_tag",
            RobotType::DingTalk => "font",
        }
    }
}

impl std::fmt::Display for RobotType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl std::str::FromStr for RobotType {
    type Err = NoticeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lark" | "feishu" => Ok(Self::Lark),
            "ding_talk" | "dingtalk" | "ding-talk" => Ok(Self::DingTalk),
            _ => Err(NoticeError::RobotNotSupported(format!(
                "{}. Valid options: lark, ding_talk",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_ding_talk_needs_leading_block() {
        assert!(RobotType::DingTalk.requires_leading_tag_block());
        assert!(!RobotType::Lark.requires_leading_tag_block());
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("feishu".parse::<RobotType>().unwrap(), RobotType::Lark);
        assert_eq!("DingTalk".parse::<RobotType>().unwrap(), RobotType::DingTalk);
        assert!(matches!(
            "slack".parse::<RobotType>(),
            Err(NoticeError::RobotNotSupported(_))
        ));
    }

    #[test]
    fn test_id_parses_back() {
        for robot in RobotType::all() {
            assert_eq!(robot.id().parse::<RobotType>().unwrap(), *robot);
        }
    }
}
