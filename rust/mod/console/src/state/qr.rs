//! QR code page window, stored at `qr/state`.

use qrportal_client::{QrCode, QrCodePage};
use qrportal_flux::{Outcome, Slice};
use serde::Serialize;

use super::op::OpStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QrSlice {
    /// Status of the list fetch.
    pub status: OpStatus,
    pub create: OpStatus,
    pub delete: OpStatus,
    pub qr_codes: Vec<QrCode>,
    pub total_count: usize,
    pub limit: usize,
    pub offset: usize,
    /// Generation of the newest list request; older results are dropped.
    pub generation: u64,
    /// Id returned by the last successful create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_created: Option<String>,
    /// Id currently being deleted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleting: Option<String>,
}

impl Default for QrSlice {
    fn default() -> Self {
        Self {
            status: OpStatus::default(),
            create: OpStatus::default(),
            delete: OpStatus::default(),
            qr_codes: Vec::new(),
            total_count: 0,
            limit: 10,
            offset: 0,
            generation: 0,
            last_created: None,
            deleting: None,
        }
    }
}

#[derive(Debug, Clone)]
pub enum QrAction {
    SetLimit(usize),
    SetOffset(usize),
    ListStarted {
        generation: u64,
        limit: usize,
        offset: usize,
    },
    ListFulfilled {
        generation: u64,
        page: QrCodePage,
    },
    ListRejected {
        generation: u64,
        error: String,
    },
    CreateStarted,
    CreateFulfilled {
        qr_id: String,
    },
    CreateRejected {
        error: String,
    },
    DeleteStarted {
        qr_id: String,
    },
    DeleteFulfilled {
        qr_id: String,
    },
    DeleteRejected {
        error: String,
    },
    /// Drop everything (sign-out). The new generation invalidates any list
    /// request still in flight.
    Reset {
        generation: u64,
    },
}

impl Slice for QrSlice {
    const PATH: &'static str = "qr/state";
    type Action = QrAction;

    fn reduce(&mut self, action: QrAction) -> Outcome {
        match action {
            QrAction::SetLimit(limit) => {
                if limit == 0 {
                    return Outcome::Ignored;
                }
                self.limit = limit;
            }
            QrAction::SetOffset(offset) => {
                self.offset = offset;
            }
            QrAction::ListStarted {
                generation,
                limit,
                offset,
            } => {
                if generation <= self.generation {
                    return Outcome::Ignored;
                }
                self.generation = generation;
                if limit > 0 {
                    self.limit = limit;
                }
                self.offset = offset;
                self.status.start("Fetching QR codes...");
            }
            QrAction::ListFulfilled { generation, page } => {
                if generation != self.generation {
                    return Outcome::Ignored;
                }
                let mut qrs = page.qrs;
                qrs.truncate(self.limit);
                self.qr_codes = qrs;
                self.total_count = page.total_count;
                self.status.succeed();
            }
            QrAction::ListRejected { generation, error } => {
                if generation != self.generation {
                    return Outcome::Ignored;
                }
                self.status.fail(error);
            }
            QrAction::CreateStarted => {
                self.create.start("Creating QR code...");
                self.last_created = None;
            }
            QrAction::CreateFulfilled { qr_id } => {
                self.create.succeed();
                self.last_created = Some(qr_id);
            }
            QrAction::CreateRejected { error } => {
                self.create.fail(error);
            }
            QrAction::DeleteStarted { qr_id } => {
                self.delete.start("Deleting QR code...");
                self.deleting = Some(qr_id);
            }
            QrAction::DeleteFulfilled { qr_id } => {
                let before = self.qr_codes.len();
                self.qr_codes.retain(|qr| qr.qr_id != qr_id);
                let removed = self.qr_codes.len() < before;
                // A record outside the window still counts toward the total,
                // but the total never drops below what is on screen.
                if removed || self.total_count > self.qr_codes.len() {
                    self.total_count = self.total_count.saturating_sub(1);
                }
                self.total_count = self.total_count.max(self.qr_codes.len());
                self.delete.succeed();
                self.deleting = None;
            }
            QrAction::DeleteRejected { error } => {
                self.delete.fail(error);
                self.deleting = None;
            }
            QrAction::Reset { generation } => {
                *self = QrSlice {
                    limit: self.limit,
                    generation: generation.max(self.generation),
                    ..QrSlice::default()
                };
            }
        }
        Outcome::Applied
    }
}

impl QrSlice {
    /// Zero-based index of the current page.
    pub fn page_index(&self) -> usize {
        if self.limit == 0 {
            return 0;
        }
        self.offset / self.limit
    }
}
