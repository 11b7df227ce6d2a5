//! Request handlers and their wiring into the Flux router.
//!
//! Each `handle_*` function is an ordinary async fn returning a typed
//! result, so the [`Console`](crate::Console) facade can call it directly.
//! `register_handlers` also exposes every one of them on the router for
//! front-ends that only speak `emit(path, payload)`.

pub mod auth;
pub mod event_types;
pub mod lookups;
pub mod qr;

use std::sync::Arc;

use qrportal_client::ConsoleApi;
use qrportal_flux::{Flux, RequestSeq, StateStore};
use tracing::{debug, warn};

use crate::error::ConsoleError;
use crate::notify::Level;
use crate::request::*;
use crate::route::{route_tree, RouteNode};
use crate::state::{NotificationQueue, NotifyAction};

/// Everything the handlers need besides the store.
pub struct ConsoleContext {
    pub api: Arc<dyn ConsoleApi>,
    pub routes: Vec<RouteNode>,
    pub auth_seq: RequestSeq,
    pub qr_seq: RequestSeq,
    pub event_type_seq: RequestSeq,
    pub employee_seq: RequestSeq,
}

impl ConsoleContext {
    pub fn new(api: Arc<dyn ConsoleApi>) -> Self {
        Self {
            api,
            routes: route_tree(),
            auth_seq: RequestSeq::new(),
            qr_seq: RequestSeq::new(),
            event_type_seq: RequestSeq::new(),
            employee_seq: RequestSeq::new(),
        }
    }
}

pub(crate) fn notify(store: &StateStore, level: Level, message: impl Into<String>) {
    store.dispatch::<NotificationQueue>(NotifyAction::Push {
        level,
        message: message.into(),
    });
}

/// Surface a failed operation. Authorization failures end the session;
/// cancellations stay silent.
pub(crate) fn fail(store: &StateStore, ctx: &ConsoleContext, err: &ConsoleError) {
    match err {
        ConsoleError::Cancelled => {}
        ConsoleError::Authorization(_) => auth::deny(store, ctx, err),
        _ => notify(store, Level::Error, err.to_string()),
    }
}

fn settle<T>(path: &str, result: Result<T, ConsoleError>) {
    match result {
        Ok(_) => {}
        Err(ConsoleError::Cancelled) => debug!(path, "request superseded"),
        Err(e) => warn!(path, error = %e, "request failed"),
    }
}

/// Register all handlers with a Flux instance.
pub fn register_handlers(flux: &Flux, ctx: Arc<ConsoleContext>) {
    // auth/signIn
    {
        let ctx = ctx.clone();
        flux.on(SignInReq::PATH, move |_, payload, store: Arc<StateStore>| {
            let ctx = ctx.clone();
            async move {
                let Some(req) = payload.downcast_ref::<SignInReq>() else {
                    warn!(path = SignInReq::PATH, "unexpected payload type");
                    return;
                };
                settle(SignInReq::PATH, auth::handle_sign_in(req, &store, &ctx).await);
            }
        });
    }

    // auth/signOut
    {
        let ctx = ctx.clone();
        flux.on(SignOutReq::PATH, move |_, _, store: Arc<StateStore>| {
            let ctx = ctx.clone();
            async move {
                auth::handle_sign_out(&store, &ctx);
            }
        });
    }

    // qr/list
    {
        let ctx = ctx.clone();
        flux.on(ListQrReq::PATH, move |_, payload, store: Arc<StateStore>| {
            let ctx = ctx.clone();
            async move {
                let Some(req) = payload.downcast_ref::<ListQrReq>() else {
                    warn!(path = ListQrReq::PATH, "unexpected payload type");
                    return;
                };
                settle(ListQrReq::PATH, qr::handle_list(req, &store, &ctx).await);
            }
        });
    }

    // qr/create
    {
        let ctx = ctx.clone();
        flux.on(CreateQrReq::PATH, move |_, payload, store: Arc<StateStore>| {
            let ctx = ctx.clone();
            async move {
                let Some(req) = payload.downcast_ref::<CreateQrReq>() else {
                    warn!(path = CreateQrReq::PATH, "unexpected payload type");
                    return;
                };
                settle(CreateQrReq::PATH, qr::handle_create(req, &store, &ctx).await);
            }
        });
    }

    // qr/delete
    {
        let ctx = ctx.clone();
        flux.on(DeleteQrReq::PATH, move |_, payload, store: Arc<StateStore>| {
            let ctx = ctx.clone();
            async move {
                let Some(req) = payload.downcast_ref::<DeleteQrReq>() else {
                    warn!(path = DeleteQrReq::PATH, "unexpected payload type");
                    return;
                };
                settle(DeleteQrReq::PATH, qr::handle_delete(req, &store, &ctx).await);
            }
        });
    }

    // eventTypes/list
    {
        let ctx = ctx.clone();
        flux.on(ListEventTypesReq::PATH, move |_, _, store: Arc<StateStore>| {
            let ctx = ctx.clone();
            async move {
                settle(
                    ListEventTypesReq::PATH,
                    event_types::handle_list(&store, &ctx).await,
                );
            }
        });
    }

    // eventTypes/create
    {
        let ctx = ctx.clone();
        flux.on(CreateEventTypeReq::PATH, move |_, payload, store: Arc<StateStore>| {
            let ctx = ctx.clone();
            async move {
                let Some(req) = payload.downcast_ref::<CreateEventTypeReq>() else {
                    warn!(path = CreateEventTypeReq::PATH, "unexpected payload type");
                    return;
                };
                settle(
                    CreateEventTypeReq::PATH,
                    event_types::handle_create(req, &store, &ctx).await,
                );
            }
        });
    }

    // eventTypes/update
    {
        let ctx = ctx.clone();
        flux.on(UpdateEventTypeReq::PATH, move |_, payload, store: Arc<StateStore>| {
            let ctx = ctx.clone();
            async move {
                let Some(req) = payload.downcast_ref::<UpdateEventTypeReq>() else {
                    warn!(path = UpdateEventTypeReq::PATH, "unexpected payload type");
                    return;
                };
                settle(
                    UpdateEventTypeReq::PATH,
                    event_types::handle_update(req, &store, &ctx).await,
                );
            }
        });
    }

    // eventTypes/delete
    {
        let ctx = ctx.clone();
        flux.on(DeleteEventTypeReq::PATH, move |_, payload, store: Arc<StateStore>| {
            let ctx = ctx.clone();
            async move {
                let Some(req) = payload.downcast_ref::<DeleteEventTypeReq>() else {
                    warn!(path = DeleteEventTypeReq::PATH, "unexpected payload type");
                    return;
                };
                settle(
                    DeleteEventTypeReq::PATH,
                    event_types::handle_delete(req, &store, &ctx).await,
                );
            }
        });
    }

    // sessions/load
    {
        let ctx = ctx.clone();
        flux.on(LoadSessionsReq::PATH, move |_, _, store: Arc<StateStore>| {
            let ctx = ctx.clone();
            async move {
                settle(
                    LoadSessionsReq::PATH,
                    lookups::handle_load_sessions(&store, &ctx).await,
                );
            }
        });
    }

    // employees/load
    flux.on(LoadEmployeesReq::PATH, move |_, _, store: Arc<StateStore>| {
        let ctx = ctx.clone();
        async move {
            settle(
                LoadEmployeesReq::PATH,
                lookups::handle_load_employees(&store, &ctx).await,
            );
        }
    });
}
