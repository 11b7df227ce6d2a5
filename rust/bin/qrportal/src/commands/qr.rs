//! QR code commands.

use std::path::Path;

use anyhow::Result;
use qrportal_client::{EventCategory, QrCode, QrCodeInfo};
use qrportal_console::display::format_created_on;
use qrportal_console::form::into_error;
use qrportal_console::page::search_label;
use qrportal_console::Console;

use super::{confirm, flush_notifications, print_json, session};

pub struct ListArgs {
    /// 1-based.
    pub page: usize,
    pub page_size: Option<usize>,
    pub search: Option<String>,
}

pub async fn list(args: ListArgs, json: bool, client_config_path: &Path) -> Result<()> {
    let console = session(client_config_path).await?;

    if let Some(size) = args.page_size {
        console.set_page_size(size).await?;
    }
    if args.page == 0 {
        anyhow::bail!("Pages start at 1.");
    }
    let result = console.go_to_page(args.page - 1).await;
    flush_notifications(&console);
    result?;

    let searching = args.search.as_deref().is_some_and(|q| !q.trim().is_empty());
    let rows = match args.search.as_deref() {
        Some(q) if searching => {
            // Search also matches session and employee names.
            let _ = console.load_sessions().await;
            let _ = console.load_employees().await;
            console.search(q)
        }
        _ => console.qr().qr_codes,
    };

    if json {
        return print_json(&rows);
    }

    print_table(&console, &rows);

    let view = console.page_view();
    match args.search.as_deref() {
        Some(q) if searching => println!("{}", search_label(rows.len(), q.trim())),
        _ => {
            if view.show_controls(false) {
                println!(
                    "{}  (page {}/{})",
                    view.label(),
                    view.page_index() + 1,
                    view.page_count()
                );
            }
        }
    }
    Ok(())
}

fn print_table(console: &Console, rows: &[QrCode]) {
    if rows.is_empty() {
        println!("No QR codes found.");
        return;
    }
    println!(
        "{:24} {:10} {:32} {:>6} {:14} {:3}",
        "ID", "TYPE", "TARGET", "COINS", "CREATED", "DEL"
    );
    for qr in rows {
        let deletable = if console.can_delete(qr) { "yes" } else { "" };
        println!(
            "{:24} {:10} {:32} {:>6} {:14} {:3}",
            qr.qr_id,
            qr.info.category().as_str(),
            target(&qr.info),
            qr.coins,
            format_created_on(&qr.created_on),
            deletable
        );
    }
}

fn target(info: &QrCodeInfo) -> &str {
    match info {
        QrCodeInfo::Session { session_id } => session_id,
        QrCodeInfo::O2bar { email } => email,
        QrCodeInfo::General { event_type_name } => event_type_name,
    }
}

pub struct CreateArgs {
    pub category: EventCategory,
    pub email: Option<String>,
    pub session_id: Option<String>,
    pub event_type: Option<String>,
    pub coins: Option<i64>,
    pub description: Option<String>,
}

pub async fn create(args: CreateArgs, client_config_path: &Path) -> Result<()> {
    let console = session(client_config_path).await?;
    console.load_event_types().await?;

    if !console
        .category_options()
        .iter()
        .any(|o| o.category == args.category)
    {
        anyhow::bail!(
            "You cannot issue {} QR codes, or no {} event type exists.",
            args.category,
            args.category
        );
    }

    let event_types = console.event_types();
    let mut form = console.create_form();
    if let Some(name) = args.event_type {
        form.select_event_type(&name, &event_types);
    }
    form.select_category(args.category, &event_types);
    if let Some(email) = args.email {
        form.email = email;
    }
    if let Some(id) = args.session_id {
        form.session_id = id;
    }
    if let Some(coins) = args.coins {
        form.coins = coins;
    }
    if let Some(description) = args.description {
        form.description = description;
    }

    if let Err(errors) = form.validate() {
        for (field, message) in &errors {
            eprintln!("  {}: {}", field, message);
        }
        return Err(into_error(errors).into());
    }

    let result = console.submit_qr_form(&form).await;
    flush_notifications(&console);
    let qr_id = result?;
    println!("Created QR code {}.", qr_id);
    Ok(())
}

pub async fn delete(qr_id: &str, yes: bool, client_config_path: &Path) -> Result<()> {
    let console = session(client_config_path).await?;

    if !yes && !confirm(&format!("Delete QR code \"{}\"?", qr_id))? {
        println!("Cancelled.");
        return Ok(());
    }

    let result = console.delete_qr_code(qr_id).await;
    flush_notifications(&console);
    result?;
    Ok(())
}
