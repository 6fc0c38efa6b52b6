//! VibeCoders server library.
//!
//! Storage, authentication, the JSON API and the rendered pages behind the
//! VibeCoders community site.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod entity;
pub mod error;
pub mod middleware;
pub mod migration;
pub mod models;
pub mod services;
