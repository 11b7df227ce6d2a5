//! Event type list and GENERAL-type management.

use qrportal_client::{EventCategory, EventType};
use qrportal_flux::StateStore;
use tracing::{debug, info, warn};

use super::{fail, notify, ConsoleContext};
use crate::error::ConsoleError;
use crate::form::{check_event_type_fields, into_error};
use crate::msg;
use crate::notify::Level;
use crate::request::{CreateEventTypeReq, DeleteEventTypeReq, UpdateEventTypeReq};
use crate::state::{EventTypesAction, EventTypesSlice};

fn reject(store: &StateStore, err: ConsoleError) -> ConsoleError {
    store.dispatch::<EventTypesSlice>(EventTypesAction::MutationRejected {
        error: err.to_string(),
    });
    err
}

/// Handle `eventTypes/list`. Superseded like the QR list.
pub async fn handle_list(store: &StateStore, ctx: &ConsoleContext) -> Result<(), ConsoleError> {
    let generation = ctx.event_type_seq.issue();
    if !store
        .dispatch::<EventTypesSlice>(EventTypesAction::ListStarted { generation })
        .is_applied()
    {
        return Err(ConsoleError::Cancelled);
    }

    match ctx.api.list_event_types().await {
        Ok(event_types) => {
            let count = event_types.len();
            let applied = store.dispatch::<EventTypesSlice>(EventTypesAction::ListFulfilled {
                generation,
                event_types,
            });
            if !applied.is_applied() {
                debug!(generation, "stale event type list dropped");
                return Err(ConsoleError::Cancelled);
            }
            info!(count, "event types loaded");
            Ok(())
        }
        Err(e) => {
            let err = ConsoleError::from_api(&e, msg::FETCH_EVENT_TYPES);
            let applied = store.dispatch::<EventTypesSlice>(EventTypesAction::ListRejected {
                generation,
                error: err.to_string(),
            });
            if !applied.is_applied() {
                return Err(ConsoleError::Cancelled);
            }
            warn!(error = %e, "event type list failed");
            fail(store, ctx, &err);
            Err(err)
        }
    }
}

/// Handle `eventTypes/create`. Only GENERAL types can be created.
pub async fn handle_create(
    req: &CreateEventTypeReq,
    store: &StateStore,
    ctx: &ConsoleContext,
) -> Result<EventType, ConsoleError> {
    let errors = check_event_type_fields(
        &req.name,
        req.description.as_deref().unwrap_or_default(),
    );
    if !errors.is_empty() {
        return Err(reject(store, into_error(errors)));
    }

    let event_type = EventType {
        event_type_name: req.name.trim().to_string(),
        category: EventCategory::General,
        description: req.description.clone(),
        default_coins: req.default_coins,
    };
    store.dispatch::<EventTypesSlice>(EventTypesAction::MutationStarted {
        message: "Creating event type...",
    });
    match ctx.api.create_event_type(&event_type).await {
        Ok(created) => {
            info!(name = %created.event_type_name, "event type created");
            store.dispatch::<EventTypesSlice>(EventTypesAction::Created(created.clone()));
            notify(store, Level::Success, msg::EVENT_TYPE_CREATED);
            Ok(created)
        }
        Err(e) => {
            warn!(name = %event_type.event_type_name, error = %e, "event type create failed");
            let err = reject(
                store,
                ConsoleError::from_create(&e, msg::DUPLICATE_EVENT_TYPE, msg::CREATE_EVENT_TYPE),
            );
            fail(store, ctx, &err);
            Err(err)
        }
    }
}

/// Handle `eventTypes/update`. The category always comes from the stored
/// entry; only the description and default coins change.
pub async fn handle_update(
    req: &UpdateEventTypeReq,
    store: &StateStore,
    ctx: &ConsoleContext,
) -> Result<EventType, ConsoleError> {
    let Some(existing) = store.select::<EventTypesSlice, _>(|s| s.find(&req.name).cloned()) else {
        return Err(reject(store, ConsoleError::NotFound(msg::EVENT_TYPE_NOT_FOUND.into())));
    };

    let description = match &req.description {
        Some(d) => {
            let d = d.trim();
            (!d.is_empty()).then(|| d.to_string())
        }
        None => existing.description.clone(),
    };
    let errors = check_event_type_fields(
        &existing.event_type_name,
        description.as_deref().unwrap_or_default(),
    );
    if !errors.is_empty() {
        return Err(reject(store, into_error(errors)));
    }

    let event_type = EventType {
        event_type_name: existing.event_type_name.clone(),
        category: existing.category,
        description,
        default_coins: req.default_coins.unwrap_or(existing.default_coins),
    };
    store.dispatch::<EventTypesSlice>(EventTypesAction::MutationStarted {
        message: "Updating event type...",
    });
    match ctx
        .api
        .update_event_type(&existing.event_type_name, &event_type)
        .await
    {
        Ok(mut updated) => {
            if updated.category != existing.category {
                warn!(
                    name = %existing.event_type_name,
                    returned = %updated.category,
                    "backend changed event type category, keeping {}",
                    existing.category
                );
            }
            updated.category = existing.category;
            info!(name = %updated.event_type_name, coins = updated.default_coins, "event type updated");
            store.dispatch::<EventTypesSlice>(EventTypesAction::Updated(updated.clone()));
            notify(store, Level::Success, msg::EVENT_TYPE_UPDATED);
            Ok(updated)
        }
        Err(e) => {
            warn!(name = %existing.event_type_name, error = %e, "event type update failed");
            let err = reject(store, ConsoleError::from_api(&e, msg::UPDATE_EVENT_TYPE));
            fail(store, ctx, &err);
            Err(err)
        }
    }
}

/// Handle `eventTypes/delete`. System-seeded types are refused without a
/// network call.
pub async fn handle_delete(
    req: &DeleteEventTypeReq,
    store: &StateStore,
    ctx: &ConsoleContext,
) -> Result<(), ConsoleError> {
    let category = store.select::<EventTypesSlice, _>(|s| s.find(&req.name).map(|et| et.category));
    if category.is_some_and(EventCategory::is_system) {
        let err = reject(store, ConsoleError::ReadOnly(msg::SYSTEM_EVENT_TYPE.into()));
        notify(store, Level::Error, err.to_string());
        return Err(err);
    }

    store.dispatch::<EventTypesSlice>(EventTypesAction::MutationStarted {
        message: "Deleting event type...",
    });
    match ctx.api.delete_event_type(&req.name).await {
        Ok(()) => {
            info!(name = %req.name, "event type deleted");
            store.dispatch::<EventTypesSlice>(EventTypesAction::Removed {
                name: req.name.clone(),
            });
            notify(store, Level::Success, msg::EVENT_TYPE_DELETED);
            Ok(())
        }
        Err(e) => {
            warn!(name = %req.name, error = %e, "event type delete failed");
            let err = reject(store, ConsoleError::from_api(&e, msg::DELETE_EVENT_TYPE));
            fail(store, ctx, &err);
            Err(err)
        }
    }
}
