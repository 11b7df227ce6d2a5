//! Sign-in, sign-out and session denial.

use qrportal_flux::StateStore;
use tracing::{debug, info, warn};

use super::{notify, ConsoleContext};
use crate::error::ConsoleError;
use crate::identity::Identity;
use crate::msg;
use crate::notify::Level;
use crate::request::SignInReq;
use crate::role::{resolve_roles, Capabilities, PrivilegeSet};
use crate::route::filter_routes;
use crate::state::*;

/// Handle `auth/signIn`: fetch privileges, resolve roles, build the menu.
///
/// Returns `Cancelled` when a sign-out, denial or newer sign-in landed
/// while privileges were being fetched.
pub async fn handle_sign_in(
    req: &SignInReq,
    store: &StateStore,
    ctx: &ConsoleContext,
) -> Result<Capabilities, ConsoleError> {
    let generation = ctx.auth_seq.issue();
    store.dispatch::<AuthSlice>(AuthAction::Started {
        generation,
        claims: req.claims.clone(),
    });

    let user = match ctx.api.user_info().await {
        Ok(user) => user,
        Err(e) => {
            warn!(error = %e, "user info fetch failed");
            let err = ConsoleError::from_api(&e, msg::FETCH_PRIVILEGES);
            return Err(deny_at(store, ctx, generation, err));
        }
    };

    let privileges: PrivilegeSet = user.privileges.iter().copied().collect();
    let capabilities = match resolve_roles(&privileges) {
        Ok(caps) => caps,
        Err(err) => {
            warn!(email = %user.work_email, ?privileges, "no console role");
            return Err(deny_at(store, ctx, generation, err));
        }
    };

    let identity = Identity::new(user, req.claims.clone());
    let email = identity.email().to_string();
    let menu = filter_routes(&ctx.routes, &capabilities);
    let accepted = store.dispatch::<AuthSlice>(AuthAction::Authenticated {
        generation,
        identity,
        capabilities: capabilities.clone(),
    });
    if !accepted.is_applied() {
        debug!(generation, "stale sign-in result dropped");
        return Err(ConsoleError::Cancelled);
    }
    store.dispatch::<MenuSlice>(MenuAction::Set(menu));
    info!(email = %email, roles = ?capabilities.roles(), "signed in");
    Ok(capabilities)
}

/// Handle `auth/signOut`. Pending notifications survive so the reason for
/// an automatic sign-out can still be shown.
pub fn handle_sign_out(store: &StateStore, ctx: &ConsoleContext) {
    let generation = ctx.auth_seq.issue();
    reset_data(store, ctx);
    store.dispatch::<MenuSlice>(MenuAction::Clear);
    if store
        .dispatch::<AuthSlice>(AuthAction::SignedOut { generation })
        .is_applied()
    {
        info!("signed out");
    }
}

/// End the session with an authorization failure.
pub(crate) fn deny(store: &StateStore, ctx: &ConsoleContext, err: &ConsoleError) {
    let generation = ctx.auth_seq.issue();
    deny_at(store, ctx, generation, err.clone());
}

/// Deny on behalf of sign-in `generation`. A superseded sign-in turns into
/// `Cancelled` and leaves the session alone.
fn deny_at(
    store: &StateStore,
    ctx: &ConsoleContext,
    generation: u64,
    err: ConsoleError,
) -> ConsoleError {
    let denied = store.dispatch::<AuthSlice>(AuthAction::Denied {
        generation,
        message: err.to_string(),
    });
    if !denied.is_applied() {
        debug!(generation, error = %err, "stale sign-in failure dropped");
        return ConsoleError::Cancelled;
    }
    reset_data(store, ctx);
    store.dispatch::<MenuSlice>(MenuAction::Clear);
    notify(store, Level::Error, err.to_string());
    err
}

/// Drop every data slice. Fresh generations invalidate fetches in flight.
fn reset_data(store: &StateStore, ctx: &ConsoleContext) {
    store.dispatch::<QrSlice>(QrAction::Reset {
        generation: ctx.qr_seq.issue(),
    });
    store.dispatch::<EventTypesSlice>(EventTypesAction::Reset {
        generation: ctx.event_type_seq.issue(),
    });
    store.dispatch::<EmployeesSlice>(EmployeesAction::Reset {
        generation: ctx.employee_seq.issue(),
    });
    store.dispatch::<SessionsSlice>(SessionsAction::Reset);
}
