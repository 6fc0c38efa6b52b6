//! Business logic services.

pub mod accounts;
pub mod assets;
pub mod templates;

pub use templates::PageRenderer;
