//! In-memory conference backend for console tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use qrportal_client::{
    ApiError, ConsoleApi, CreateQrCodePayload, CreatedQr, Employee, EventCategory, EventType,
    QrCode, QrCodeInfo, QrCodePage, Session, UserInfo,
};
use qrportal_console::{Console, ConsoleConfig, TokenClaims};

pub const USER_EMAIL: &str = "jane@example.com";

struct Inner {
    privileges: Vec<u32>,
    qrs: Vec<QrCode>,
    event_types: Vec<EventType>,
    sessions: Vec<Session>,
    employees: Vec<Employee>,
    list_delays: VecDeque<Duration>,
    user_info_delay: Option<Duration>,
    failures: HashMap<&'static str, u16>,
    calls: Vec<&'static str>,
    next_id: u32,
}

pub struct FakeApi {
    inner: Mutex<Inner>,
}

fn server(status: u16, message: &str) -> ApiError {
    ApiError::Server {
        status,
        message: message.to_string(),
    }
}

fn event_type(name: &str, category: EventCategory, coins: u32) -> EventType {
    EventType {
        event_type_name: name.into(),
        category,
        description: None,
        default_coins: coins,
    }
}

impl FakeApi {
    /// 25 QR codes, the two system event types plus "Swag", one session,
    /// one employee.
    pub fn new(privileges: &[u32]) -> Arc<Self> {
        let qrs = (1..=25)
            .map(|i| QrCode {
                qr_id: format!("qr-{:02}", i),
                info: QrCodeInfo::O2bar {
                    email: format!("user{}@example.com", i),
                },
                description: None,
                coins: 5,
                created_by: USER_EMAIL.into(),
                created_on: "2025-03-05T10:15:00Z".into(),
            })
            .collect();
        Arc::new(Self {
            inner: Mutex::new(Inner {
                privileges: privileges.to_vec(),
                qrs,
                event_types: vec![
                    event_type("SESSION", EventCategory::Session, 10),
                    event_type("O2BAR", EventCategory::O2bar, 5),
                    event_type("Swag", EventCategory::General, 3),
                ],
                sessions: vec![Session {
                    id: "s-1".into(),
                    name: "Rust in Production".into(),
                    presenters: vec!["Ann Lee".into()],
                }],
                employees: vec![Employee {
                    first_name: "Jane".into(),
                    last_name: "Doe".into(),
                    work_email: USER_EMAIL.into(),
                }],
                list_delays: VecDeque::new(),
                user_info_delay: None,
                failures: HashMap::new(),
                calls: Vec::new(),
                next_id: 100,
            }),
        })
    }

    /// Delay the next `list_qr_codes` calls, in call order.
    pub fn delay_lists(&self, delays: &[Duration]) {
        self.inner.lock().unwrap().list_delays.extend(delays);
    }

    /// Delay every `user_info` call.
    pub fn delay_user_info(&self, delay: Duration) {
        self.inner.lock().unwrap().user_info_delay = Some(delay);
    }

    /// Answer every call to `endpoint` with `status` until cleared.
    pub fn fail(&self, endpoint: &'static str, status: u16) {
        self.inner.lock().unwrap().failures.insert(endpoint, status);
    }

    pub fn clear_failures(&self) {
        self.inner.lock().unwrap().failures.clear();
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn qr_count(&self) -> usize {
        self.inner.lock().unwrap().qrs.len()
    }

    pub fn stored_event_type(&self, name: &str) -> Option<EventType> {
        self.inner
            .lock()
            .unwrap()
            .event_types
            .iter()
            .find(|et| et.event_type_name == name)
            .cloned()
    }

    fn enter(&self, endpoint: &'static str) -> Result<(), ApiError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(endpoint);
        match inner.failures.get(endpoint) {
            Some(&status) => Err(server(status, "injected failure")),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ConsoleApi for FakeApi {
    async fn user_info(&self) -> Result<UserInfo, ApiError> {
        let delay = self.inner.lock().unwrap().user_info_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.enter("user_info")?;
        Ok(UserInfo {
            employee_id: "E1".into(),
            work_email: USER_EMAIL.into(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            job_role: "Engineer".into(),
            employee_thumbnail: None,
            privileges: self.inner.lock().unwrap().privileges.clone(),
        })
    }

    async fn list_qr_codes(&self, limit: usize, offset: usize) -> Result<QrCodePage, ApiError> {
        let delay = self.inner.lock().unwrap().list_delays.pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.enter("list_qr_codes")?;
        let inner = self.inner.lock().unwrap();
        let limit = if limit == 0 { inner.qrs.len() } else { limit };
        Ok(QrCodePage {
            total_count: inner.qrs.len(),
            qrs: inner.qrs.iter().skip(offset).take(limit).cloned().collect(),
        })
    }

    async fn create_qr_code(&self, payload: &CreateQrCodePayload) -> Result<CreatedQr, ApiError> {
        self.enter("create_qr_code")?;
        let mut inner = self.inner.lock().unwrap();
        if inner.qrs.iter().any(|qr| qr.info == payload.info) {
            return Err(server(400, "duplicate"));
        }
        inner.next_id += 1;
        let qr_id = format!("qr-{}", inner.next_id);
        inner.qrs.push(QrCode {
            qr_id: qr_id.clone(),
            info: payload.info.clone(),
            description: payload.description.clone(),
            coins: payload.coins,
            created_by: USER_EMAIL.into(),
            created_on: "2025-03-06T09:00:00Z".into(),
        });
        Ok(CreatedQr { qr_id })
    }

    async fn delete_qr_code(&self, qr_id: &str) -> Result<(), ApiError> {
        self.enter("delete_qr_code")?;
        let mut inner = self.inner.lock().unwrap();
        let before = inner.qrs.len();
        inner.qrs.retain(|qr| qr.qr_id != qr_id);
        if inner.qrs.len() == before {
            return Err(server(404, "not found"));
        }
        Ok(())
    }

    async fn list_event_types(&self) -> Result<Vec<EventType>, ApiError> {
        self.enter("list_event_types")?;
        Ok(self.inner.lock().unwrap().event_types.clone())
    }

    async fn create_event_type(&self, event_type: &EventType) -> Result<EventType, ApiError> {
        self.enter("create_event_type")?;
        let mut inner = self.inner.lock().unwrap();
        if inner
            .event_types
            .iter()
            .any(|et| et.event_type_name == event_type.event_type_name)
        {
            return Err(server(400, "duplicate"));
        }
        inner.event_types.push(event_type.clone());
        Ok(event_type.clone())
    }

    async fn update_event_type(
        &self,
        name: &str,
        event_type: &EventType,
    ) -> Result<EventType, ApiError> {
        self.enter("update_event_type")?;
        let mut inner = self.inner.lock().unwrap();
        let Some(stored) = inner
            .event_types
            .iter_mut()
            .find(|et| et.event_type_name == name)
        else {
            return Err(server(404, "not found"));
        };
        *stored = event_type.clone();
        Ok(event_type.clone())
    }

    async fn delete_event_type(&self, name: &str) -> Result<(), ApiError> {
        self.enter("delete_event_type")?;
        let mut inner = self.inner.lock().unwrap();
        inner.event_types.retain(|et| et.event_type_name != name);
        Ok(())
    }

    async fn list_sessions(&self) -> Result<Vec<Session>, ApiError> {
        self.enter("list_sessions")?;
        Ok(self.inner.lock().unwrap().sessions.clone())
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, ApiError> {
        self.enter("list_employees")?;
        Ok(self.inner.lock().unwrap().employees.clone())
    }
}

pub fn claims() -> TokenClaims {
    TokenClaims {
        sub: "jane".into(),
        name: Some("Jane Doe".into()),
        email: Some(USER_EMAIL.into()),
        ..Default::default()
    }
}

pub fn console(api: &Arc<FakeApi>) -> Console {
    console_with(api, ConsoleConfig::default())
}

pub fn console_with(api: &Arc<FakeApi>, config: ConsoleConfig) -> Console {
    let api: Arc<dyn ConsoleApi> = api.clone();
    Console::new(api, config).unwrap()
}

/// A console already signed in with `privileges`.
pub async fn signed_in(privileges: &[u32]) -> (Arc<FakeApi>, Console) {
    let api = FakeApi::new(privileges);
    let console = console(&api);
    console.sign_in(claims()).await.unwrap();
    (api, console)
}
