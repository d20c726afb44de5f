//! Core Module - infrastructure components of the application
//!
//! - Configuration
//! - Error handling
//! - Application state

pub mod config;
pub mod error;
pub mod state;

// Re-exports for easier imports
pub use config::Config;
pub use error::{AppError, ErrorKind};
pub use state::AppState;
