//! Session and employee lookups for the QR form and search.

use qrportal_flux::StateStore;
use tracing::{debug, info, warn};

use super::{fail, ConsoleContext};
use crate::error::ConsoleError;
use crate::msg;
use crate::state::{EmployeesAction, EmployeesSlice, SessionsAction, SessionsSlice};

/// Handle `sessions/load`.
pub async fn handle_load_sessions(
    store: &StateStore,
    ctx: &ConsoleContext,
) -> Result<(), ConsoleError> {
    store.dispatch::<SessionsSlice>(SessionsAction::Started);
    match ctx.api.list_sessions().await {
        Ok(sessions) => {
            info!(count = sessions.len(), "sessions loaded");
            store.dispatch::<SessionsSlice>(SessionsAction::Fulfilled(sessions));
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "session fetch failed");
            let err = ConsoleError::from_api(&e, msg::FETCH_SESSIONS);
            store.dispatch::<SessionsSlice>(SessionsAction::Rejected(err.to_string()));
            fail(store, ctx, &err);
            Err(err)
        }
    }
}

/// Handle `employees/load`. A newer load supersedes this one.
pub async fn handle_load_employees(
    store: &StateStore,
    ctx: &ConsoleContext,
) -> Result<(), ConsoleError> {
    let generation = ctx.employee_seq.issue();
    if !store
        .dispatch::<EmployeesSlice>(EmployeesAction::Started { generation })
        .is_applied()
    {
        return Err(ConsoleError::Cancelled);
    }

    match ctx.api.list_employees().await {
        Ok(employees) => {
            let count = employees.len();
            let applied = store.dispatch::<EmployeesSlice>(EmployeesAction::Fulfilled {
                generation,
                employees,
            });
            if !applied.is_applied() {
                debug!(generation, "stale employee list dropped");
                return Err(ConsoleError::Cancelled);
            }
            info!(count, "employees loaded");
            Ok(())
        }
        Err(e) => {
            let err = ConsoleError::from_api(&e, msg::FETCH_EMPLOYEES);
            let applied = store.dispatch::<EmployeesSlice>(EmployeesAction::Rejected {
                generation,
                error: err.to_string(),
            });
            if !applied.is_applied() {
                return Err(ConsoleError::Cancelled);
            }
            warn!(error = %e, "employee fetch failed");
            fail(store, ctx, &err);
            Err(err)
        }
    }
}
