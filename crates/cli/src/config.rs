use anyhow::{Context, Result, bail};
use fwtag_api_client::FlywheelClient;
use fwtag_tag_store::{FileBackend, TagStore};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "fwtag.toml";

const DEFAULT_SERVER_URL: &str = "https://flywheel.example.org";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CliConfig {
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_url")]
    pub url: String,
    #[serde(default)]
    pub api_key: String,
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_server_url(),
            api_key: String::new(),
        }
    }
}

/// Get the config directory path (~/.config/fwtag/)
pub fn config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .context("Could not determine home directory")?;
    Ok(PathBuf::from(home).join(".config").join("fwtag"))
}

/// Canonical config file path.
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load config from disk, returning defaults if the file does not exist.
pub fn load_config() -> Result<CliConfig> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(CliConfig::default());
    }
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config at {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config at {}", path.display()))?;
    Ok(config)
}

/// Save config to disk (in `fwtag.toml`).
pub fn save_config(config: &CliConfig) -> Result<()> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create config dir at {}", dir.display()))?;
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    let path = config_path()?;
    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write config at {}", path.display()))?;
    Ok(())
}

/// Print current config.
pub fn show_config() -> Result<()> {
    let config = load_config()?;
    let path = config_path()?;
    println!("Config file: {}", path.display());
    println!();
    println!("[server]");
    println!("  url     = {}", config.server.url);
    println!("  api_key = {}", mask_key(&config.server.api_key));
    Ok(())
}

/// Update config with provided values.
pub fn set_config(server_url: Option<String>, api_key: Option<String>) -> Result<()> {
    let mut config = load_config()?;

    if let Some(url) = server_url {
        config.server.url = url;
    }
    if let Some(key) = api_key {
        config.server.api_key = key;
    }

    save_config(&config)?;
    println!("Configuration updated.");
    show_config()?;
    Ok(())
}

/// Build an API client from the stored key and URL.
pub fn client_for(config: &CliConfig) -> Result<FlywheelClient> {
    if config.server.api_key.trim().is_empty() {
        bail!("API key not set. Run `fwtag login` or `fwtag config --api-key <KEY>` first.");
    }
    FlywheelClient::new(&config.server.url, &config.server.api_key)
}

/// Open the tag store at the default state directory.
pub fn open_store() -> Result<TagStore<FileBackend>> {
    Ok(TagStore::new(FileBackend::open_default()?))
}

pub fn mask_key(key: &str) -> String {
    if key.is_empty() {
        "(not set)".to_string()
    } else {
        let prefix: String = key.chars().take(8).collect();
        format!("{prefix}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config: CliConfig = toml::from_str("").expect("parse empty config");
        assert_eq!(config.server.url, DEFAULT_SERVER_URL);
        assert!(config.server.api_key.is_empty());
    }

    #[test]
    fn partial_server_section_keeps_default_url() {
        let config: CliConfig = toml::from_str(
            r#"
[server]
api_key = "abcd1234efgh"
"#,
        )
        .expect("parse config");
        assert_eq!(config.server.url, DEFAULT_SERVER_URL);
        assert_eq!(config.server.api_key, "abcd1234efgh");
    }

    #[test]
    fn config_round_trips_through_toml() {
        let config = CliConfig {
            server: ServerConfig {
                url: "https://fw.lab.edu".to_string(),
                api_key: "k".to_string(),
            },
        };
        let encoded = toml::to_string_pretty(&config).expect("encode config");
        let decoded: CliConfig = toml::from_str(&encoded).expect("decode config");
        assert_eq!(decoded.server.url, "https://fw.lab.edu");
        assert_eq!(decoded.server.api_key, "k");
    }

    #[test]
    fn mask_key_hides_all_but_prefix() {
        assert_eq!(mask_key(""), "(not set)");
        assert_eq!(mask_key("short"), "short...");
        assert_eq!(mask_key("abcdefghijkl"), "abcdefgh...");
    }

    #[test]
    fn mask_key_respects_char_boundaries() {
        // A hand-edited config can hold non-ASCII; masking must not split a
        // multi-byte character.
        assert_eq!(mask_key("ключ-доступа"), "ключ-дос...");
        assert_eq!(mask_key("日本語"), "日本語...");
    }
}
