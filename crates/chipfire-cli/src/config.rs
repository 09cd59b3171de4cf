//! Environment configuration for the terminal front end.

use std::path::PathBuf;

use chipfire_engine::SessionConfig;

/// Settings read from `CHIPFIRE_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    /// Scene size and seed handed to the session
    pub session: SessionConfig,

    /// Where progress is saved between runs
    pub save_path: PathBuf,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl CliConfig {
    /// Create config from environment variables with sensible defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from any key lookup; unparsable values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = SessionConfig::default();
        let number = |key: &str, default: f64| {
            lookup(key)
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite() && *v > 0.0)
                .unwrap_or(default)
        };

        let session = SessionConfig {
            scene_width: number("CHIPFIRE_WIDTH", defaults.scene_width),
            scene_height: number("CHIPFIRE_HEIGHT", defaults.scene_height),
            seed: lookup("CHIPFIRE_SEED").and_then(|v| v.trim().parse().ok()),
        };

        let save_path = PathBuf::from(
            lookup("CHIPFIRE_SAVE").unwrap_or_else(|| "./chipfire-save.json".to_string()),
        );

        Self { session, save_path }
    }
}
