//! Command implementations.

pub mod context;
pub mod event_types;
pub mod login;
pub mod lookups;
pub mod qr;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use qrportal_client::{HttpConsoleApi, StaticToken};
use qrportal_console::{Console, Level, TokenClaims};

use crate::config::{ClientConfig, Context};

/// Current context, checked for a server URL.
fn current_context(config: &ClientConfig) -> Result<Context> {
    let ctx = config
        .current()
        .ok_or_else(|| anyhow::anyhow!("No current context. Run `qrportal use context <name>`."))?
        .clone();
    if ctx.server.is_empty() {
        anyhow::bail!(
            "No server URL set for context \"{}\". Run `qrportal context set {} --server <url>`.",
            ctx.name,
            ctx.name
        );
    }
    Ok(ctx)
}

/// Build a console for `ctx` using `token`.
fn build_console(ctx: &Context, token: &str, config: &ClientConfig) -> Result<Console> {
    let api = HttpConsoleApi::new(&ctx.server, Arc::new(StaticToken::new(token)))?;
    Ok(Console::new(Arc::new(api), config.console.clone())?)
}

/// Decode a token and refuse it if it has expired.
fn claims_for(token: &str, context: &str) -> Result<TokenClaims> {
    let claims = TokenClaims::decode(token)?;
    if claims.is_expired(chrono::Utc::now()) {
        anyhow::bail!(
            "Token for context \"{}\" has expired. Run `qrportal login --token <id-token>`.",
            context
        );
    }
    Ok(claims)
}

/// Signed-in console for the current context.
pub async fn session(client_config_path: &Path) -> Result<Console> {
    let config = ClientConfig::load(client_config_path)?;
    let ctx = current_context(&config)?;
    if ctx.token.is_empty() {
        anyhow::bail!(
            "Not logged in to context \"{}\". Run `qrportal login --token <id-token>`.",
            ctx.name
        );
    }
    let claims = claims_for(&ctx.token, &ctx.name)?;
    let console = build_console(&ctx, &ctx.token, &config)?;
    console.sign_in(claims).await?;
    Ok(console)
}

/// Print and drain pending notifications.
pub fn flush_notifications(console: &Console) {
    for note in console.take_notifications() {
        let tag = match note.level {
            Level::Success => "ok",
            Level::Warning => "warning",
            Level::Error => "error",
        };
        eprintln!("[{}] {}", tag, note.message);
    }
}

/// Ask before a destructive action.
pub fn confirm(prompt: &str) -> Result<bool> {
    eprint!("{} [y/N]: ", prompt);
    let mut s = String::new();
    std::io::stdin().read_line(&mut s)?;
    Ok(s.trim().eq_ignore_ascii_case("y"))
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
