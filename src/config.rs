use config::{Config, Environment, File};
use serde::Deserialize;

use crate::FetchError;

/// Client settings
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Feed used when no URL is given on the command line
    #[serde(default = "default_recipes_url")]
    pub recipes_url: String,
    /// Connect timeout in milliseconds
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Read timeout in milliseconds
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,
    /// Custom `User-Agent` header
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            recipes_url: default_recipes_url(),
            connect_timeout_ms: default_connect_timeout_ms(),
            read_timeout_ms: default_read_timeout_ms(),
            user_agent: None,
        }
    }
}

// Default value functions
fn default_recipes_url() -> String {
    "https://d17h27t6h515a5.cloudfront.net/topher/2017/May/59121517_baking/baking.json"
        .to_string()
}

fn default_connect_timeout_ms() -> u64 {
    15_000
}

fn default_read_timeout_ms() -> u64 {
    10_000
}

/// Load settings from the named file and the environment
///
/// Settings are loaded with the following priority (highest to lowest):
/// 1. Environment variables with BAKING__ prefix
/// 2. The named file (extension optional, may be missing)
/// 3. Default values
///
/// Environment variable format: BAKING__RECIPES_URL
///
/// # Errors
/// Returns [`FetchError::Config`] if the file is unreadable or a value has the wrong type.
pub fn load_settings(file_name: &str) -> Result<Settings, FetchError> {
    let settings = Config::builder()
        .add_source(File::with_name(file_name).required(false))
        .add_source(
            Environment::with_prefix("BAKING")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    #[test]
    fn test_default_values() {
        let settings = Settings::default();
        assert!(settings.recipes_url.ends_with("baking.json"));
        assert_eq!(settings.connect_timeout_ms, 15_000);
        assert_eq!(settings.read_timeout_ms, 10_000);
        assert!(settings.user_agent.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let path = env::temp_dir().join(format!("baking-time-{}.toml", std::process::id()));
        fs::write(
            &path,
            "recipes_url = \"http://localhost:9000/recipes.json\"\nread_timeout_ms = 2500\n",
        )
        .unwrap();

        let settings = load_settings(path.to_str().unwrap()).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(settings.recipes_url, "http://localhost:9000/recipes.json");
        assert_eq!(settings.read_timeout_ms, 2500);
        assert_eq!(settings.connect_timeout_ms, 15_000);
    }

    #[test]
    fn test_load_malformed_file() {
        let path = env::temp_dir().join(format!("baking-time-bad-{}.toml", std::process::id()));
        fs::write(&path, "recipes_url = \"unterminated\nread_timeout_ms = [\n").unwrap();

        let result = load_settings(path.to_str().unwrap());
        fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(FetchError::Config(_))));
    }

    #[test]
    fn test_load_wrong_type() {
        let path = env::temp_dir().join(format!("baking-time-type-{}.toml", std::process::id()));
        fs::write(&path, "connect_timeout_ms = \"soon\"\n").unwrap();

        let result = load_settings(path.to_str().unwrap());
        fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(FetchError::Config(_))));
    }

    #[test]
    fn test_load_without_file() {
        let settings = load_settings("does-not-exist-baking-time");
        // Environment overrides may be present, but loading must not fail
        assert!(settings.is_ok());
    }
}
