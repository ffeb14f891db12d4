//! The debate engine.
//!
//! - [`session`] -- room creation for all three modes.
//! - [`dispatcher`] -- loads a room, checks it accepts the action, claims the
//!   turn, and hands off to one mode handler.
//! - [`free_text`], [`playback`], [`tree_walk`] -- the mode handlers.
//! - [`report`] -- report generation and the single completion write.
//! - [`views`] -- response payloads.

pub mod dispatcher;
pub mod free_text;
pub mod playback;
pub mod report;
pub mod session;
pub mod tree_walk;
pub mod views;
