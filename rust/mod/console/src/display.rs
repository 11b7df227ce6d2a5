//! Text shown in QR code rows and pickers.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use qrportal_client::{Employee, QrCode};

/// Human label for an event type or category name.
///
/// `SESSION` → `Session`, `O2BAR` → `O2 Bar`, `swagPickup` → `Swag Pickup`,
/// `raffle_2024` → `Raffle 2024`.
pub fn title_case(name: &str) -> String {
    match name {
        "SESSION" => return "Session".into(),
        "O2BAR" => return "O2 Bar".into(),
        _ => {}
    }

    // Break camelCase before lowercasing.
    let mut spaced = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;
    for c in name.chars() {
        if c.is_uppercase() && prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit()) {
            spaced.push(' ');
        }
        spaced.push(c);
        prev = Some(c);
    }

    spaced
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|w| !w.is_empty())
        .map(|word| {
            if word == "o2" || word.starts_with(|c: char| c.is_ascii_digit()) {
                return word.to_uppercase();
            }
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `A`, `A & B`, `A & 2 more`.
pub fn format_presenters(presenters: &[String]) -> String {
    match presenters {
        [] => String::new(),
        [one] => one.clone(),
        [a, b] => format!("{} & {}", a, b),
        [first, rest @ ..] => format!("{} & {} more", first, rest.len()),
    }
}

/// Full name, or the work email when no name is on record.
pub fn employee_display_name(employee: &Employee) -> String {
    let full = format!("{} {}", employee.first_name.trim(), employee.last_name.trim());
    let full = full.trim();
    if full.is_empty() {
        employee.work_email.clone()
    } else {
        full.to_string()
    }
}

/// Only the creator may delete a QR code.
pub fn can_delete(qr: &QrCode, signed_in_email: &str) -> bool {
    !qr.created_by.is_empty()
        && !signed_in_email.is_empty()
        && qr.created_by.to_lowercase() == signed_in_email.to_lowercase()
}

/// `Mar 05, 2025`. Unparseable values are shown as-is.
pub fn format_created_on(created_on: &str) -> String {
    const FORMAT: &str = "%b %d, %Y";
    if let Ok(dt) = DateTime::parse_from_rfc3339(created_on) {
        return dt.format(FORMAT).to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(created_on, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format(FORMAT).to_string();
    }
    if let Ok(d) = NaiveDate::parse_from_str(created_on, "%Y-%m-%d") {
        return d.format(FORMAT).to_string();
    }
    created_on.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use qrportal_client::QrCodeInfo;

    #[test]
    fn title_case_names() {
        assert_eq!(title_case("SESSION"), "Session");
        assert_eq!(title_case("O2BAR"), "O2 Bar");
        assert_eq!(title_case("GENERAL"), "General");
        assert_eq!(title_case("swagPickup"), "Swag Pickup");
        assert_eq!(title_case("raffle_2024"), "Raffle 2024");
        assert_eq!(title_case("o2-refill"), "O2 Refill");
        assert_eq!(title_case("  spaced   out "), "Spaced Out");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn presenters() {
        let names = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(format_presenters(&[]), "");
        assert_eq!(format_presenters(&names(&["Ann"])), "Ann");
        assert_eq!(format_presenters(&names(&["Ann", "Bob"])), "Ann & Bob");
        assert_eq!(format_presenters(&names(&["Ann", "Bob", "Cy"])), "Ann & 2 more");
    }

    #[test]
    fn employee_names() {
        let e = Employee {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            work_email: "jane@example.com".into(),
        };
        assert_eq!(employee_display_name(&e), "Jane Doe");

        let only_first = Employee {
            last_name: String::new(),
            ..e.clone()
        };
        assert_eq!(employee_display_name(&only_first), "Jane");

        let nameless = Employee {
            first_name: String::new(),
            last_name: String::new(),
            ..e
        };
        assert_eq!(employee_display_name(&nameless), "jane@example.com");
    }

    #[test]
    fn delete_is_creator_only() {
        let qr = QrCode {
            qr_id: "q1".into(),
            info: QrCodeInfo::O2bar {
                email: "x@y.com".into(),
            },
            description: None,
            coins: 1,
            created_by: "Jane@Example.com".into(),
            created_on: String::new(),
        };
        assert!(can_delete(&qr, "jane@example.com"));
        assert!(!can_delete(&qr, "bob@example.com"));
        assert!(!can_delete(&qr, ""));

        let orphan = QrCode {
            created_by: String::new(),
            ..qr
        };
        assert!(!can_delete(&orphan, ""));
    }

    #[test]
    fn created_on_formats() {
        assert_eq!(format_created_on("2025-03-05T10:15:00Z"), "Mar 05, 2025");
        assert_eq!(format_created_on("2025-03-05T10:15:00.123"), "Mar 05, 2025");
        assert_eq!(format_created_on("2025-12-31"), "Dec 31, 2025");
        assert_eq!(format_created_on("yesterday"), "yesterday");
    }
}
