//! Row models and DTOs, one module per table group.

pub mod debate_message;
pub mod debate_report;
pub mod debate_room;
pub mod debate_script;
pub mod debate_topic;
pub mod mcq;
