//! Client-side context management.
//!
//! Reads/writes `~/.qrportal/config.toml`.

use std::path::{Path, PathBuf};

use qrportal_console::ConsoleConfig;
use serde::{Deserialize, Serialize};

/// A single context: one conference backend and the token used against it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Context {
    /// Context name (e.g. "devcon-2025").
    pub name: String,

    /// Backend URL (e.g. "https://qr.example.com/api").
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub server: String,

    /// ID token from the identity provider (set by `qrportal login`).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub token: String,
}

/// Client configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Name of the currently active context.
    #[serde(rename = "current-context", default)]
    pub current_context: String,

    #[serde(default)]
    pub contexts: Vec<Context>,

    /// Console tunables shared by every context.
    #[serde(default)]
    pub console: ConsoleConfig,
}

impl ClientConfig {
    /// Default config file path: ~/.qrportal/config.toml.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// Load config from disk, or return default if file doesn't exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn current(&self) -> Option<&Context> {
        self.contexts.iter().find(|c| c.name == self.current_context)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Context> {
        self.contexts.iter_mut().find(|c| c.name == name)
    }

    /// Add or update a context.
    pub fn upsert_context(&mut self, ctx: Context) {
        if let Some(existing) = self.get_mut(&ctx.name) {
            *existing = ctx;
        } else {
            self.contexts.push(ctx);
        }
    }

    /// Remove a context by name. Returns true if it was found.
    pub fn remove_context(&mut self, name: &str) -> bool {
        let len = self.contexts.len();
        self.contexts.retain(|c| c.name != name);
        if self.current_context == name {
            self.current_context = String::new();
        }
        self.contexts.len() < len
    }
}

/// Return the config directory (~/.qrportal).
fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".qrportal")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert!(config.current_context.is_empty());
        assert!(config.contexts.is_empty());
        assert_eq!(config.console.page_size, 10);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = ClientConfig {
            current_context: "devcon".to_string(),
            ..Default::default()
        };
        config.upsert_context(Context {
            name: "devcon".to_string(),
            server: "http://localhost:8080/api".to_string(),
            token: String::new(),
        });
        config.console.page_size = 20;
        config.save(&path).unwrap();

        let back = ClientConfig::load(&path).unwrap();
        assert_eq!(back.current().unwrap().server, "http://localhost:8080/api");
        assert_eq!(back.console.page_size, 20);
        assert_eq!(back.console.idle_timeout_secs, 900);
    }

    #[test]
    fn test_partial_console_table() {
        let config: ClientConfig = toml::from_str(
            r#"
current-context = "a"

[[contexts]]
name = "a"
server = "http://a"

[console]
idle_timeout_secs = 60
"#,
        )
        .unwrap();
        assert_eq!(config.console.idle_timeout_secs, 60);
        assert_eq!(config.console.page_size, 10);
        assert!(config.current().unwrap().token.is_empty());
    }

    #[test]
    fn test_remove_current_context() {
        let mut config = ClientConfig::default();
        config.upsert_context(Context {
            name: "a".into(),
            ..Default::default()
        });
        config.current_context = "a".into();
        assert!(config.remove_context("a"));
        assert!(config.current_context.is_empty());
        assert!(!config.remove_context("a"));
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClientConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert!(config.contexts.is_empty());
    }
}
