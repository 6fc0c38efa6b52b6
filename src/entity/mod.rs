//! SeaORM entity definitions for the SQLite store.

pub mod budget_category;
pub mod budget_transaction;
pub mod forum_comment;
pub mod forum_post;
pub mod forum_vote;
pub mod magic_link;
pub mod project;
pub mod prompt;
pub mod session;
pub mod user;
