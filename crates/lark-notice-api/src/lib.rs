pub mod error;
pub mod message;
pub mod registry;
pub mod robot;
pub mod types;

pub use error::{
    NoticeError,
    NoticeResult,
};
pub use message::{
    Button,
    ButtonFactory,
    ButtonKind,
    DefaultButtons,
    MsgType,
    OutboundDraft,
    OutboundMessage,
};
pub use registry::RobotRegistry;
pub use robot::{
    RobotProfile,
    RobotType,
};
pub use types::{
    BuildStatus,
    StatusMeta,
};
