use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::api::ConsoleApi;
use crate::error::ApiError;
use crate::model::{
    CreateQrCodePayload, CreatedQr, Employee, EventType, QrCodePage, Session, UserInfo,
};
use crate::token::TokenSource;

/// reqwest-backed [`ConsoleApi`].
///
/// Paths are resolved under `base_url`, so a base of
/// `https://host/api` yields `https://host/api/qrCodes`.
pub struct HttpConsoleApi {
    http: reqwest::Client,
    base_url: Url,
    token_source: Arc<dyn TokenSource>,
}

impl HttpConsoleApi {
    pub fn new(base_url: &str, token_source: Arc<dyn TokenSource>) -> Result<Self, ApiError> {
        Self::with_client(reqwest::Client::new(), base_url, token_source)
    }

    pub fn with_client(
        http: reqwest::Client,
        base_url: &str,
        token_source: Arc<dyn TokenSource>,
    ) -> Result<Self, ApiError> {
        let base_url =
            Url::parse(base_url).map_err(|e| ApiError::Url(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Url(format!("{base_url}: not a base URL")));
        }
        Ok(Self {
            http,
            base_url,
            token_source,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `{base}/{segments...}`; each segment is percent-encoded whole,
    /// so a `/` inside a name never splits the path.
    fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Url(format!("{}: not a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, ApiError> {
        let url = self.url(segments)?;
        debug!(%method, %url, "api request");
        let builder = self.http.request(method, url);
        match self.token_source.token().await? {
            Some(token) => Ok(builder.bearer_auth(token)),
            None => Ok(builder),
        }
    }

    async fn send_json<B, R>(&self, method: Method, segments: &[&str], body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let resp = self.request(method, segments).await?.json(body).send().await?;
        Self::parse(resp).await
    }

    /// Map a non-2xx response to `ApiError::Server`, preferring the
    /// backend's `message` field over the raw body.
    async fn check(resp: Response) -> Result<Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
            .unwrap_or(body);
        Err(ApiError::Server {
            status: status.as_u16(),
            message,
        })
    }

    async fn parse<R: DeserializeOwned>(resp: Response) -> Result<R, ApiError> {
        let resp = Self::check(resp).await?;
        resp.json::<R>()
            .await
            .map_err(|e| ApiError::Decode(format!("response body: {}", e)))
    }
}

#[async_trait::async_trait]
impl ConsoleApi for HttpConsoleApi {
    async fn user_info(&self) -> Result<UserInfo, ApiError> {
        let resp = self.request(Method::GET, &["user-info"]).await?.send().await?;
        Self::parse(resp).await
    }

    async fn list_qr_codes(&self, limit: usize, offset: usize) -> Result<QrCodePage, ApiError> {
        let mut query: Vec<(&str, usize)> = Vec::new();
        if limit > 0 {
            query.push(("limit", limit));
        }
        if offset > 0 {
            query.push(("offset", offset));
        }
        let resp = self
            .request(Method::GET, &["qrCodes"])
            .await?
            .query(&query)
            .send()
            .await?;
        Self::parse(resp).await
    }

    async fn create_qr_code(&self, payload: &CreateQrCodePayload) -> Result<CreatedQr, ApiError> {
        self.send_json(Method::POST, &["qrCodes"], payload).await
    }

    async fn delete_qr_code(&self, qr_id: &str) -> Result<(), ApiError> {
        let resp = self
            .request(Method::DELETE, &["qrCodes", qr_id])
            .await?
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn list_event_types(&self) -> Result<Vec<EventType>, ApiError> {
        let resp = self.request(Method::GET, &["eventTypes"]).await?.send().await?;
        Self::parse(resp).await
    }

    async fn create_event_type(&self, event_type: &EventType) -> Result<EventType, ApiError> {
        self.send_json(Method::POST, &["eventTypes"], event_type).await
    }

    async fn update_event_type(
        &self,
        name: &str,
        event_type: &EventType,
    ) -> Result<EventType, ApiError> {
        self.send_json(Method::PUT, &["eventTypes", name], event_type)
            .await
    }

    async fn delete_event_type(&self, name: &str) -> Result<(), ApiError> {
        let resp = self
            .request(Method::DELETE, &["eventTypes", name])
            .await?
            .send()
            .await?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn list_sessions(&self) -> Result<Vec<Session>, ApiError> {
        let resp = self.request(Method::GET, &["sessions"]).await?.send().await?;
        Self::parse(resp).await
    }

    async fn list_employees(&self) -> Result<Vec<Employee>, ApiError> {
        let resp = self.request(Method::GET, &["employees"]).await?.send().await?;
        Self::parse(resp).await
    }
}
