//! Context management commands.

use std::path::Path;

use anyhow::Result;

use crate::config::{ClientConfig, Context};

/// Register a context for a backend URL.
pub fn create(name: &str, server: &str, client_config_path: &Path) -> Result<()> {
    if server.is_empty() {
        anyhow::bail!("Server URL cannot be empty.");
    }
    let mut config = ClientConfig::load(client_config_path)?;
    config.upsert_context(Context {
        name: name.to_string(),
        server: server.to_string(),
        token: String::new(),
    });
    if config.current_context.is_empty() {
        config.current_context = name.to_string();
    }
    config.save(client_config_path)?;

    println!("Context \"{}\" created.", name);
    println!("  Server: {}", server);
    Ok(())
}

pub fn list(client_config_path: &Path) -> Result<()> {
    let config = ClientConfig::load(client_config_path)?;

    if config.contexts.is_empty() {
        println!("No contexts configured.");
        println!("Run: qrportal context create <name> --server <url>");
        return Ok(());
    }

    println!("{:2} {:20} {:40} {:10}", "", "NAME", "SERVER", "LOGGED IN");
    for ctx in &config.contexts {
        let marker = if ctx.name == config.current_context {
            "*"
        } else {
            " "
        };
        let server = if ctx.server.is_empty() { "-" } else { &ctx.server };
        let logged_in = if ctx.token.is_empty() { "no" } else { "yes" };
        println!("{:2} {:20} {:40} {:10}", marker, ctx.name, server, logged_in);
    }

    Ok(())
}

pub fn use_context(name: &str, client_config_path: &Path) -> Result<()> {
    let mut config = ClientConfig::load(client_config_path)?;

    if !config.contexts.iter().any(|c| c.name == name) {
        anyhow::bail!(
            "Context \"{}\" not found. Run `qrportal context list` to see available contexts.",
            name
        );
    }

    config.current_context = name.to_string();
    config.save(client_config_path)?;
    println!("Switched to context \"{}\".", name);
    Ok(())
}

/// Change the server of an existing context. The stored token is dropped
/// because it was issued for the old backend.
pub fn set(name: &str, server: Option<&str>, client_config_path: &Path) -> Result<()> {
    let mut config = ClientConfig::load(client_config_path)?;

    let ctx = config
        .get_mut(name)
        .ok_or_else(|| anyhow::anyhow!("Context \"{}\" not found.", name))?;

    if let Some(s) = server {
        if ctx.server != s {
            ctx.server = s.to_string();
            ctx.token = String::new();
        }
    }

    config.save(client_config_path)?;
    println!("Context \"{}\" updated.", name);
    Ok(())
}

pub fn delete(name: &str, client_config_path: &Path) -> Result<()> {
    let mut config = ClientConfig::load(client_config_path)?;

    if !config.remove_context(name) {
        anyhow::bail!("Context \"{}\" not found.", name);
    }

    config.save(client_config_path)?;
    println!("Context \"{}\" deleted.", name);
    Ok(())
}
