//! Client-side filters over data already loaded. Nothing here hits the network.

use qrportal_client::{Employee, QrCode, QrCodeInfo, Session};

use crate::display::employee_display_name;

const PICKER_BROWSE_LIMIT: usize = 50;
const PICKER_MATCH_LIMIT: usize = 100;

/// QR codes on the current page whose text contains `query`, ignoring case.
///
/// Looks at the description, the id, and the participant: the email or the
/// employee's name for O2BAR, the session id, name or presenters for SESSION,
/// the event type name for GENERAL. A blank query keeps everything.
pub fn filter_qr_codes<'a>(
    qr_codes: &'a [QrCode],
    query: &str,
    sessions: &[Session],
    employees: &[Employee],
) -> Vec<&'a QrCode> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return qr_codes.iter().collect();
    }
    qr_codes
        .iter()
        .filter(|qr| matches(qr, &needle, sessions, employees))
        .collect()
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn matches(qr: &QrCode, needle: &str, sessions: &[Session], employees: &[Employee]) -> bool {
    if contains(&qr.qr_id, needle) {
        return true;
    }
    if qr.description.as_deref().is_some_and(|d| contains(d, needle)) {
        return true;
    }
    match &qr.info {
        QrCodeInfo::O2bar { email } => {
            contains(email, needle)
                || employees
                    .iter()
                    .find(|e| e.work_email.eq_ignore_ascii_case(email))
                    .is_some_and(|e| contains(&employee_display_name(e), needle))
        }
        QrCodeInfo::Session { session_id } => {
            contains(session_id, needle)
                || sessions
                    .iter()
                    .find(|s| &s.id == session_id)
                    .is_some_and(|s| {
                        contains(&s.name, needle) || s.presenters.iter().any(|p| contains(p, needle))
                    })
        }
        QrCodeInfo::General { event_type_name } => contains(event_type_name, needle),
    }
}

/// Employee picker options. Under two characters the first 50 are offered;
/// otherwise up to 100 whose name or email contains the input.
pub fn filter_employees<'a>(employees: &'a [Employee], input: &str) -> Vec<&'a Employee> {
    let needle = input.trim().to_lowercase();
    if needle.chars().count() < 2 {
        return employees.iter().take(PICKER_BROWSE_LIMIT).collect();
    }
    employees
        .iter()
        .filter(|e| contains(&employee_display_name(e), &needle) || contains(&e.work_email, &needle))
        .take(PICKER_MATCH_LIMIT)
        .collect()
}
