use crate::error::ApiError;
use crate::model::{
    CreateQrCodePayload, CreatedQr, Employee, EventType, QrCodePage, Session, UserInfo,
};

/// Every backend call the console makes.
///
/// Object-safe so the console can hold an `Arc<dyn ConsoleApi>` and tests
/// can substitute an in-memory backend.
#[async_trait::async_trait]
pub trait ConsoleApi: Send + Sync + 'static {
    /// `GET /user-info`: the caller's profile and privilege codes.
    async fn user_info(&self) -> Result<UserInfo, ApiError>;

    /// `GET /qrCodes?limit=&offset=`
    async fn list_qr_codes(&self, limit: usize, offset: usize) -> Result<QrCodePage, ApiError>;

    /// `POST /qrCodes`
    async fn create_qr_code(&self, payload: &CreateQrCodePayload) -> Result<CreatedQr, ApiError>;

    /// `DELETE /qrCodes/{qrId}`
    async fn delete_qr_code(&self, qr_id: &str) -> Result<(), ApiError>;

    /// `GET /eventTypes`
    async fn list_event_types(&self) -> Result<Vec<EventType>, ApiError>;

    /// `POST /eventTypes`
    async fn create_event_type(&self, event_type: &EventType) -> Result<EventType, ApiError>;

    /// `PUT /eventTypes/{name}` with the full entity.
    async fn update_event_type(
        &self,
        name: &str,
        event_type: &EventType,
    ) -> Result<EventType, ApiError>;

    /// `DELETE /eventTypes/{name}`
    async fn delete_event_type(&self, name: &str) -> Result<(), ApiError>;

    /// `GET /sessions`
    async fn list_sessions(&self) -> Result<Vec<Session>, ApiError>;

    /// `GET /employees`
    async fn list_employees(&self) -> Result<Vec<Employee>, ApiError>;
}
