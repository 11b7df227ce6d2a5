//! QR code list, create and delete.

use qrportal_flux::StateStore;
use tracing::{debug, info, warn};

use super::{fail, notify, ConsoleContext};
use crate::error::ConsoleError;
use crate::form::validate_info;
use crate::msg;
use crate::notify::Level;
use crate::request::{CreateQrReq, DeleteQrReq, ListQrReq};
use crate::state::{QrAction, QrSlice};

/// Handle `qr/list`. A zero limit means "keep the current page size".
///
/// Returns `Cancelled` when a newer list request has started, whether that
/// happened before this one began or while it was in flight.
pub async fn handle_list(
    req: &ListQrReq,
    store: &StateStore,
    ctx: &ConsoleContext,
) -> Result<(), ConsoleError> {
    let limit = match req.limit {
        0 => store.select::<QrSlice, _>(|s| s.limit),
        n => n,
    };
    let generation = ctx.qr_seq.issue();
    let started = store.dispatch::<QrSlice>(QrAction::ListStarted {
        generation,
        limit,
        offset: req.offset,
    });
    if !started.is_applied() {
        debug!(generation, "qr list superseded before start");
        return Err(ConsoleError::Cancelled);
    }

    match ctx.api.list_qr_codes(limit, req.offset).await {
        Ok(page) => {
            let total = page.total_count;
            let applied = store.dispatch::<QrSlice>(QrAction::ListFulfilled { generation, page });
            if !applied.is_applied() {
                debug!(generation, "stale qr list result dropped");
                return Err(ConsoleError::Cancelled);
            }
            info!(generation, limit, offset = req.offset, total, "qr codes loaded");
            Ok(())
        }
        Err(e) => {
            let err = ConsoleError::from_api(&e, msg::FETCH_QR_CODES);
            let applied = store.dispatch::<QrSlice>(QrAction::ListRejected {
                generation,
                error: err.to_string(),
            });
            if !applied.is_applied() {
                debug!(generation, error = %e, "stale qr list failure dropped");
                return Err(ConsoleError::Cancelled);
            }
            warn!(generation, error = %e, "qr list failed");
            fail(store, ctx, &err);
            Err(err)
        }
    }
}

/// Handle `qr/create`. The new record is not added to the page window;
/// callers re-list to see it.
pub async fn handle_create(
    req: &CreateQrReq,
    store: &StateStore,
    ctx: &ConsoleContext,
) -> Result<String, ConsoleError> {
    if let Err(err) = validate_info(&req.payload.info) {
        store.dispatch::<QrSlice>(QrAction::CreateRejected {
            error: err.to_string(),
        });
        return Err(err);
    }

    store.dispatch::<QrSlice>(QrAction::CreateStarted);
    match ctx.api.create_qr_code(&req.payload).await {
        Ok(created) => {
            info!(
                qr_id = %created.qr_id,
                category = %req.payload.info.category(),
                coins = req.payload.coins,
                "qr code created"
            );
            store.dispatch::<QrSlice>(QrAction::CreateFulfilled {
                qr_id: created.qr_id.clone(),
            });
            notify(store, Level::Success, msg::QR_CREATED);
            Ok(created.qr_id)
        }
        Err(e) => {
            let err = ConsoleError::from_create(&e, msg::DUPLICATE_QR_CODE, msg::CREATE_QR_CODE);
            warn!(error = %e, "qr create failed");
            store.dispatch::<QrSlice>(QrAction::CreateRejected {
                error: err.to_string(),
            });
            fail(store, ctx, &err);
            Err(err)
        }
    }
}

/// Handle `qr/delete`. The page is not backfilled from the next offset.
pub async fn handle_delete(
    req: &DeleteQrReq,
    store: &StateStore,
    ctx: &ConsoleContext,
) -> Result<(), ConsoleError> {
    store.dispatch::<QrSlice>(QrAction::DeleteStarted {
        qr_id: req.qr_id.clone(),
    });
    match ctx.api.delete_qr_code(&req.qr_id).await {
        Ok(()) => {
            info!(qr_id = %req.qr_id, "qr code deleted");
            store.dispatch::<QrSlice>(QrAction::DeleteFulfilled {
                qr_id: req.qr_id.clone(),
            });
            notify(store, Level::Success, msg::QR_DELETED);
            Ok(())
        }
        Err(e) => {
            let err = ConsoleError::from_api(&e, msg::DELETE_QR_CODE);
            warn!(qr_id = %req.qr_id, error = %e, "qr delete failed");
            store.dispatch::<QrSlice>(QrAction::DeleteRejected {
                error: err.to_string(),
            });
            fail(store, ctx, &err);
            Err(err)
        }
    }
}
