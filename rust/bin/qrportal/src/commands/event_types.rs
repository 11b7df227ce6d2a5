//! Event type commands.

use std::path::Path;

use anyhow::Result;
use qrportal_console::form::into_error;
use qrportal_console::{EventTypeForm, UpdateEventTypeReq};

use super::{confirm, flush_notifications, print_json, session};

pub async fn list(json: bool, client_config_path: &Path) -> Result<()> {
    let console = session(client_config_path).await?;
    let result = console.load_event_types().await;
    flush_notifications(&console);
    result?;

    let event_types = console.event_types().event_types;
    if json {
        return print_json(&event_types);
    }

    if event_types.is_empty() {
        println!("No event types found.");
        return Ok(());
    }
    println!("{:30} {:10} {:>6} {}", "NAME", "CATEGORY", "COINS", "DESCRIPTION");
    for et in &event_types {
        println!(
            "{:30} {:10} {:>6} {}",
            et.event_type_name,
            et.category.as_str(),
            et.default_coins,
            et.description.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

pub async fn create(
    name: &str,
    default_coins: i64,
    description: Option<String>,
    client_config_path: &Path,
) -> Result<()> {
    let form = EventTypeForm {
        name: name.to_string(),
        description: description.unwrap_or_default(),
        default_coins,
    };
    let req = form.validate_create().map_err(into_error)?;

    let console = session(client_config_path).await?;
    let result = console.create_event_type(req).await;
    flush_notifications(&console);
    let created = result?;
    println!(
        "Event type \"{}\" created ({} coins).",
        created.event_type_name, created.default_coins
    );
    Ok(())
}

/// Only the given fields change; the rest keep their stored values.
pub async fn update(
    name: &str,
    default_coins: Option<i64>,
    description: Option<String>,
    client_config_path: &Path,
) -> Result<()> {
    let default_coins = default_coins
        .map(|c| u32::try_from(c).map_err(|_| anyhow::anyhow!("Default coins must be a positive number")))
        .transpose()?;

    let console = session(client_config_path).await?;
    console.load_event_types().await?;

    let req = UpdateEventTypeReq {
        name: name.to_string(),
        description,
        default_coins,
    };
    let result = console.update_event_type(req).await;
    flush_notifications(&console);
    let updated = result?;
    println!(
        "Event type \"{}\" updated ({} coins).",
        updated.event_type_name, updated.default_coins
    );
    Ok(())
}

pub async fn delete(name: &str, yes: bool, client_config_path: &Path) -> Result<()> {
    let console = session(client_config_path).await?;
    console.load_event_types().await?;

    if !yes && !confirm(&format!("Delete event type \"{}\"?", name))? {
        println!("Cancelled.");
        return Ok(());
    }

    let result = console.delete_event_type(name).await;
    flush_notifications(&console);
    result?;
    Ok(())
}
