//! Configuration module for environment variable parsing.
//!
//! Reads all configuration from environment variables, matching the form the
//! original deployment used (Vercel environment variables).

use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,

    /// GitHub webhook secret for HMAC signature verification.
    ///
    /// When unset, signature verification is disabled entirely (fail-open).
    pub github_webhook_secret: Option<String>,

    /// Command used to launch the optimization script (interpreter or binary)
    pub script_command: String,

    /// Path to the optimization script passed to the command
    pub script_path: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Config {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),

            github_webhook_secret: env::var("GITHUB_WEBHOOK_SECRET").ok(),

            script_command: env::var("SCRIPT_COMMAND")
                .unwrap_or_else(|_| "python3".to_string()),

            script_path: env::var("SCRIPT_PATH").unwrap_or_else(|_| default_script_path()),
        }
    }
}

/// Default script location: `gitagent.py` in the current working directory.
fn default_script_path() -> String {
    env::current_dir()
        .map(|dir| dir.join("gitagent.py").to_string_lossy().into_owned())
        .unwrap_or_else(|_| "gitagent.py".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_script_path_ends_with_script_name() {
        assert!(default_script_path().ends_with("gitagent.py"));
    }

    #[test]
    fn test_config_overrides() {
        env::set_var("PORT", "9090");
        env::set_var("SCRIPT_COMMAND", "bash");
        env::set_var("SCRIPT_PATH", "/opt/agent/run.sh");

        let config = Config::from_env();
        assert_eq!(config.port, 9090);
        assert_eq!(config.script_command, "bash");
        assert_eq!(config.script_path, "/opt/agent/run.sh");

        // Unparseable PORT falls back to the default.
        env::set_var("PORT", "not-a-port");
        let config = Config::from_env();
        assert_eq!(config.port, 8080);

        env::remove_var("PORT");
        env::remove_var("SCRIPT_COMMAND");
        env::remove_var("SCRIPT_PATH");
    }
}
