//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod debate_message_repo;
pub mod debate_report_repo;
pub mod debate_room_repo;
pub mod debate_script_repo;
pub mod debate_topic_repo;
pub mod mcq_repo;

pub use debate_message_repo::DebateMessageRepo;
pub use debate_report_repo::DebateReportRepo;
pub use debate_room_repo::DebateRoomRepo;
pub use debate_script_repo::DebateScriptRepo;
pub use debate_topic_repo::DebateTopicRepo;
pub use mcq_repo::{McqRepo, McqTreeLookup};
