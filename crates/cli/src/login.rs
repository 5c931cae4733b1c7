use anyhow::{Context, Result};
use dialoguer::{Input, Password};

use crate::config::{load_config, mask_key, save_config};

/// Interactive key entry: prompt for the server URL and API key, then persist.
pub fn run_login() -> Result<()> {
    let mut config = load_config()?;

    let url: String = Input::new()
        .with_prompt("Server URL")
        .default(config.server.url.clone())
        .interact_text()
        .context("failed to read server URL")?;

    let api_key: String = Password::new()
        .with_prompt("API key")
        .interact()
        .context("failed to read API key")?;

    config.server.url = url.trim_end_matches('/').to_string();
    config.server.api_key = api_key.trim().to_string();
    save_config(&config)?;

    println!(
        "Saved credentials for {} (key {})",
        config.server.url,
        mask_key(&config.server.api_key)
    );
    Ok(())
}
