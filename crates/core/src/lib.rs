//! Domain logic for the Rostrum debate service.
//!
//! This crate has no database or HTTP dependencies. Repositories and
//! handlers pass plain data in; everything here is deterministic except the
//! [`tree_walk::NodeLookup`] seam, which the db crate implements over
//! PostgreSQL.

pub mod debate;
pub mod error;
pub mod pagination;
pub mod playback;
pub mod prompts;
pub mod report;
pub mod tree_walk;
pub mod types;
