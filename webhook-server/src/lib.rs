//! Webhook server for triggering the repository optimization script.
//!
//! A GitHub push webhook lands on `/api/webhook`, its HMAC-SHA256 signature
//! is verified against a shared secret, and a qualifying push launches the
//! optimization script as a child process, capturing its output.
//!
//! ## Architecture
//!
//! ```text
//! GitHub push → Web Server → signature check → ref check → gitagent.py
//! ```

pub mod config;
pub mod task;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use task::{LaunchError, ScriptRunner, TaskOutput, TaskRunner};
pub use web::AppState;
