//! QR portal admin console controller.
//!
//! Resolves roles from the privilege service, filters the navigation tree,
//! and runs the QR code and event type lifecycles against the conference
//! backend. All state lives in a [`Flux`] store as typed slices; the browser
//! UI and the CLI both read it through [`Console`].

pub mod config;
pub mod display;
pub mod error;
pub mod form;
pub mod handlers;
pub mod identity;
pub mod idle;
pub mod notify;
pub mod page;
pub mod request;
pub mod role;
pub mod route;
pub mod search;
pub mod state;

use std::sync::{Arc, Mutex};

use qrportal_client::{ConsoleApi, CreateQrCodePayload, Employee, EventType, QrCode};
use qrportal_flux::Flux;
use tracing::info;

pub use config::ConsoleConfig;
pub use error::ConsoleError;
pub use form::{CategoryOption, CreateQrForm, EventTypeForm, FieldErrors};
pub use handlers::{register_handlers, ConsoleContext};
pub use identity::{Identity, TokenClaims};
pub use idle::{IdleEvent, IdleStatus, IdleTracker};
pub use notify::{msg, Level, Notification};
pub use page::{PageView, PAGE_SIZES};
pub use request::*;
pub use role::{resolve_roles, Capabilities, PrivilegeSet, Role};
pub use route::{filter_routes, route_tree, Icon, RouteNode};
pub use state::{
    AuthAction, AuthPhase, AuthSlice, EmployeesAction, EmployeesSlice, EventTypesAction,
    EventTypesSlice, MenuAction, MenuSlice, NotificationQueue, NotifyAction, OpStatus, Phase,
    QrAction, QrSlice, SessionsAction, SessionsSlice,
};

use handlers::{auth, event_types, lookups, notify as push, qr};

/// Composition root: one store, one set of handlers, one backend.
pub struct Console {
    flux: Flux,
    ctx: Arc<ConsoleContext>,
    idle: Mutex<IdleTracker>,
}

impl Console {
    pub fn new(api: Arc<dyn ConsoleApi>, config: ConsoleConfig) -> Result<Self, ConsoleError> {
        config.validate()?;
        let flux = Flux::new();
        flux.dispatch::<QrSlice>(QrAction::SetLimit(config.page_size));
        let ctx = Arc::new(ConsoleContext::new(api));
        register_handlers(&flux, ctx.clone());
        Ok(Self {
            flux,
            ctx,
            idle: Mutex::new(IdleTracker::from_config(&config)),
        })
    }

    pub fn flux(&self) -> &Flux {
        &self.flux
    }

    // ====================================================================
    // Session
    // ====================================================================

    pub async fn sign_in(&self, claims: TokenClaims) -> Result<Capabilities, ConsoleError> {
        let caps = auth::handle_sign_in(&SignInReq { claims }, self.flux.store(), &self.ctx).await?;
        self.record_activity();
        Ok(caps)
    }

    pub fn sign_out(&self) {
        auth::handle_sign_out(self.flux.store(), &self.ctx);
    }

    pub fn record_activity(&self) {
        self.idle.lock().unwrap().record_activity();
    }

    /// Poll the idle tracker. Raises the warning once and signs out on expiry.
    pub fn check_idle(&self) -> IdleStatus {
        let (event, status) = {
            let mut idle = self.idle.lock().unwrap();
            (idle.poll(), idle.status())
        };
        if !self.auth().is_authenticated() {
            return status;
        }
        match event {
            IdleEvent::Warn { remaining } => {
                info!(remaining_ms = remaining.as_millis() as u64, "session idle");
                push(self.flux.store(), Level::Warning, msg::SESSION_EXPIRING);
            }
            IdleEvent::Expire => {
                info!("idle timeout reached");
                self.sign_out();
                push(self.flux.store(), Level::Warning, msg::SESSION_EXPIRED);
            }
            IdleEvent::None => {}
        }
        status
    }

    // ====================================================================
    // QR codes
    // ====================================================================

    pub async fn list_qr_codes(&self, limit: usize, offset: usize) -> Result<(), ConsoleError> {
        qr::handle_list(&ListQrReq { limit, offset }, self.flux.store(), &self.ctx).await
    }

    /// Re-fetch the current page.
    pub async fn refresh(&self) -> Result<(), ConsoleError> {
        let view = self.page_view();
        self.list_qr_codes(view.limit, view.offset).await
    }

    /// Zero-based page at the current page size.
    pub async fn go_to_page(&self, page: usize) -> Result<(), ConsoleError> {
        let view = self.page_view();
        self.list_qr_codes(view.limit, view.offset_for_page(page))
            .await
    }

    /// Change the page size and return to the first page.
    pub async fn set_page_size(&self, size: usize) -> Result<(), ConsoleError> {
        if !page::is_page_size(size) {
            return Err(ConsoleError::Validation(format!(
                "page size must be one of {:?}",
                PAGE_SIZES
            )));
        }
        self.list_qr_codes(size, 0).await
    }

    pub async fn create_qr_code(&self, payload: CreateQrCodePayload) -> Result<String, ConsoleError> {
        qr::handle_create(&CreateQrReq { payload }, self.flux.store(), &self.ctx).await
    }

    pub async fn submit_qr_form(&self, form: &CreateQrForm) -> Result<String, ConsoleError> {
        let payload = form.validate().map_err(form::into_error)?;
        self.create_qr_code(payload).await
    }

    pub async fn delete_qr_code(&self, qr_id: &str) -> Result<(), ConsoleError> {
        let req = DeleteQrReq {
            qr_id: qr_id.to_string(),
        };
        qr::handle_delete(&req, self.flux.store(), &self.ctx).await
    }

    // ====================================================================
    // Event types
    // ====================================================================

    pub async fn load_event_types(&self) -> Result<(), ConsoleError> {
        event_types::handle_list(self.flux.store(), &self.ctx).await
    }

    pub async fn create_event_type(&self, req: CreateEventTypeReq) -> Result<EventType, ConsoleError> {
        event_types::handle_create(&req, self.flux.store(), &self.ctx).await
    }

    pub async fn update_event_type(&self, req: UpdateEventTypeReq) -> Result<EventType, ConsoleError> {
        event_types::handle_update(&req, self.flux.store(), &self.ctx).await
    }

    pub async fn delete_event_type(&self, name: &str) -> Result<(), ConsoleError> {
        let req = DeleteEventTypeReq {
            name: name.to_string(),
        };
        event_types::handle_delete(&req, self.flux.store(), &self.ctx).await
    }

    // ====================================================================
    // Lookups
    // ====================================================================

    pub async fn load_sessions(&self) -> Result<(), ConsoleError> {
        lookups::handle_load_sessions(self.flux.store(), &self.ctx).await
    }

    pub async fn load_employees(&self) -> Result<(), ConsoleError> {
        lookups::handle_load_employees(self.flux.store(), &self.ctx).await
    }

    // ====================================================================
    // Selectors
    // ====================================================================

    pub fn auth(&self) -> AuthSlice {
        self.flux.slice::<AuthSlice>()
    }

    pub fn capabilities(&self) -> Capabilities {
        self.flux.select::<AuthSlice, _>(|a| a.capabilities.clone())
    }

    pub fn menu(&self) -> MenuSlice {
        self.flux.slice::<MenuSlice>()
    }

    pub fn qr(&self) -> QrSlice {
        self.flux.slice::<QrSlice>()
    }

    pub fn event_types(&self) -> EventTypesSlice {
        self.flux.slice::<EventTypesSlice>()
    }

    pub fn sessions(&self) -> SessionsSlice {
        self.flux.slice::<SessionsSlice>()
    }

    pub fn employees(&self) -> EmployeesSlice {
        self.flux.slice::<EmployeesSlice>()
    }

    pub fn page_view(&self) -> PageView {
        self.flux.select::<QrSlice, _>(PageView::of)
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.flux
            .select::<NotificationQueue, _>(|q| q.items.iter().cloned().collect())
    }

    pub fn take_notifications(&self) -> Vec<Notification> {
        self.flux
            .store()
            .modify::<NotificationQueue, _>(NotificationQueue::take)
    }

    pub fn dismiss_notification(&self, id: u64) {
        self.flux.dispatch::<NotificationQueue>(NotifyAction::Dismiss(id));
    }

    /// Current page filtered by `query`.
    pub fn search(&self, query: &str) -> Vec<QrCode> {
        let qr = self.qr();
        let sessions = self.sessions();
        let employees = self.employees();
        search::filter_qr_codes(&qr.qr_codes, query, &sessions.sessions, &employees.employees)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn search_employees(&self, input: &str) -> Vec<Employee> {
        self.flux.select::<EmployeesSlice, _>(|s| {
            search::filter_employees(&s.employees, input)
                .into_iter()
                .cloned()
                .collect()
        })
    }

    pub fn category_options(&self) -> Vec<CategoryOption> {
        let event_types = self.event_types();
        form::category_options(&self.capabilities(), &event_types)
    }

    /// A create form pre-filled for the signed-in user.
    pub fn create_form(&self) -> CreateQrForm {
        let auth = self.auth();
        let event_types = self.event_types();
        CreateQrForm::initial(&auth.capabilities, &event_types, auth.email())
    }

    pub fn can_delete(&self, qr: &QrCode) -> bool {
        self.flux
            .select::<AuthSlice, _>(|a| display::can_delete(qr, a.email()))
    }
}
