//! Read-only lookups: sessions and employees.

use std::path::Path;

use anyhow::Result;
use qrportal_console::display::{employee_display_name, format_presenters};

use super::{flush_notifications, print_json, session};

pub async fn sessions(json: bool, client_config_path: &Path) -> Result<()> {
    let console = session(client_config_path).await?;
    let result = console.load_sessions().await;
    flush_notifications(&console);
    result?;

    let sessions = console.sessions().sessions;
    if json {
        return print_json(&sessions);
    }
    if sessions.is_empty() {
        println!("No sessions found.");
        return Ok(());
    }
    println!("{:16} {:40} {}", "ID", "NAME", "PRESENTERS");
    for s in &sessions {
        println!("{:16} {:40} {}", s.id, s.name, format_presenters(&s.presenters));
    }
    Ok(())
}

pub async fn employees(search: Option<&str>, json: bool, client_config_path: &Path) -> Result<()> {
    let console = session(client_config_path).await?;
    let result = console.load_employees().await;
    flush_notifications(&console);
    result?;

    let employees = console.search_employees(search.unwrap_or(""));
    if json {
        return print_json(&employees);
    }
    if employees.is_empty() {
        println!("No employees found.");
        return Ok(());
    }
    println!("{:30} {}", "NAME", "EMAIL");
    for e in &employees {
        println!("{:30} {}", employee_display_name(e), e.work_email);
    }
    Ok(())
}
