//! Login / logout / whoami.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use super::{build_console, claims_for, current_context, flush_notifications, print_json, session};
use crate::config::ClientConfig;

/// Verify an ID token against the current context and store it.
///
/// The token is only saved once the privilege service has resolved at
/// least one console role for it.
pub async fn login(token: &str, client_config_path: &Path) -> Result<()> {
    let token = token.trim();
    if token.is_empty() {
        anyhow::bail!("Token cannot be empty.");
    }

    let mut config = ClientConfig::load(client_config_path)?;
    let ctx = current_context(&config)?;
    let claims = claims_for(token, &ctx.name)?;

    let console = build_console(&ctx, token, &config)?;
    if let Err(e) = console.sign_in(claims).await {
        anyhow::bail!("Login failed: {}", e);
    }
    let auth = console.auth();

    let ctx_mut = config
        .get_mut(&ctx.name)
        .ok_or_else(|| anyhow::anyhow!("Context disappeared"))?;
    ctx_mut.token = token.to_string();
    config.save(client_config_path)?;

    let name = auth
        .identity
        .as_ref()
        .map(|i| i.display_name())
        .unwrap_or_default();
    println!("Logged in as {} <{}>.", name, auth.email());
    println!("Roles: {}", roles_line(&auth.capabilities));
    println!("Token saved to context \"{}\".", ctx.name);
    Ok(())
}

/// Logout: clear token from current context.
pub fn logout(client_config_path: &Path) -> Result<()> {
    let mut config = ClientConfig::load(client_config_path)?;

    let current_name = config.current_context.clone();
    if current_name.is_empty() {
        anyhow::bail!("No current context.");
    }

    let ctx = config
        .get_mut(&current_name)
        .ok_or_else(|| anyhow::anyhow!("Current context not found."))?;

    ctx.token = String::new();
    config.save(client_config_path)?;
    println!("Logged out from context \"{}\".", current_name);
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WhoAmI {
    name: String,
    email: String,
    job_role: String,
    roles: Vec<&'static str>,
    menu: Vec<String>,
}

pub async fn whoami(json: bool, client_config_path: &Path) -> Result<()> {
    let console = session(client_config_path).await?;
    let auth = console.auth();
    let Some(identity) = auth.identity.as_ref() else {
        anyhow::bail!("Not signed in.");
    };

    let me = WhoAmI {
        name: identity.display_name(),
        email: identity.email().to_string(),
        job_role: identity.user.job_role.clone(),
        roles: auth.capabilities.roles().iter().map(|r| r.as_str()).collect(),
        menu: console.menu().paths,
    };
    if json {
        return print_json(&me);
    }

    println!("Name:   {}", me.name);
    println!("Email:  {}", me.email);
    if !me.job_role.is_empty() {
        println!("Job:    {}", me.job_role);
    }
    println!("Roles:  {}", roles_line(&auth.capabilities));
    println!("Pages:");
    for route in console.menu().routes {
        println!("  {:16} {}", route.path, route.text);
    }
    flush_notifications(&console);
    Ok(())
}

fn roles_line(caps: &qrportal_console::Capabilities) -> String {
    caps.roles()
        .iter()
        .map(|r| r.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
