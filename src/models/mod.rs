//! Data models for teams, projects, kanbans and tasks.
//!
//! The same types travel over the wire and live in the client store. Child
//! collections hold `Arc`s so the store can share untouched sub-trees between
//! snapshots.

mod kanban;
mod project;
mod task;
mod team;
mod user;

pub use kanban::*;
pub use project::*;
pub use task::*;
pub use team::*;
pub use user::*;
