pub mod debate;
pub mod topic;
