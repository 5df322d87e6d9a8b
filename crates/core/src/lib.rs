//! Core types for docreply: unified errors, configuration, and logging.

pub mod config;
pub mod error;
pub mod logging;

pub use error::{AppError, AppResult};
