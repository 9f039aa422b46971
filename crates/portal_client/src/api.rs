//! HTTP client for the portal API

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use core_kernel::ClientId;
use domain_case::{CaseStats, CaseStatus, ClientSubmission};
use interface_api::dto::{
    LoginRequest, LoginResponse, StatsResponse, SubmissionResponse,
    UpdateStatusRequest, UpdateStatusResponse, UserResponse,
};
use interface_api::error::ErrorResponse;

use crate::error::ClientError;
use crate::session::Session;
use crate::wire::ReceivedCase;

/// Thin typed wrapper over the REST API
///
/// Authenticated calls take the [`Session`] explicitly; nothing is read from
/// ambient state.
#[derive(Debug, Clone)]
pub struct PortalClient {
    http: Client,
    base_url: String,
}

impl PortalClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, builder: RequestBuilder, session: &Session) -> RequestBuilder {
        builder.bearer_auth(&session.token)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&request)
            .send()
            .await?;
        decode(response).await
    }

    /// Profile behind the session's token
    pub async fn me(&self, session: &Session) -> Result<UserResponse, ClientError> {
        let response = self
            .authed(self.http.get(self.url("/api/auth/me")), session)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn submit_application(
        &self,
        submission: &ClientSubmission,
    ) -> Result<SubmissionResponse, ClientError> {
        let response = self
            .http
            .post(self.url("/api/clients/submit"))
            .json(submission)
            .send()
            .await?;
        decode(response).await
    }

    /// The logged-in client's own case
    pub async fn client_dashboard(&self, session: &Session) -> Result<ReceivedCase, ClientError> {
        let response = self
            .authed(self.http.get(self.url("/api/clients/me/dashboard")), session)
            .send()
            .await?;
        received_case(decode(response).await?)
    }

    pub async fn list_cases(
        &self,
        session: &Session,
        status: Option<CaseStatus>,
    ) -> Result<Vec<ReceivedCase>, ClientError> {
        let mut builder = self.http.get(self.url("/api/admin/clients"));
        if let Some(status) = status {
            builder = builder.query(&[("status", status.as_str())]);
        }
        let response = self.authed(builder, session).send().await?;
        let items: Vec<Value> = decode(response).await?;
        items.into_iter().map(received_case).collect()
    }

    pub async fn fetch_case(&self, session: &Session, id: ClientId) -> Result<ReceivedCase, ClientError> {
        let path = format!("/api/admin/clients/{}", id.as_uuid());
        let response = self
            .authed(self.http.get(self.url(&path)), session)
            .send()
            .await?;
        received_case(decode(response).await?)
    }

    pub async fn update_case_status(
        &self,
        session: &Session,
        id: ClientId,
        status: CaseStatus,
        notes: Option<&str>,
    ) -> Result<UpdateStatusResponse, ClientError> {
        let path = format!("/api/admin/clients/{}/status", id.as_uuid());
        let body = UpdateStatusRequest {
            status: status.as_str().to_string(),
            notes: notes.map(str::to_string),
        };
        let response = self
            .authed(self.http.patch(self.url(&path)), session)
            .json(&body)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn stats(&self, session: &Session) -> Result<CaseStats, ClientError> {
        let response = self
            .authed(self.http.get(self.url("/api/admin/stats")), session)
            .send()
            .await?;
        let stats: StatsResponse = decode(response).await?;
        Ok(stats.into())
    }
}

fn received_case(value: Value) -> Result<ReceivedCase, ClientError> {
    ReceivedCase::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Decodes a success body or maps the error body to a [`ClientError`]
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        let bytes = response.bytes().await?;
        return serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()));
    }

    let bytes = response.bytes().await?;
    let message = serde_json::from_slice::<ErrorResponse>(&bytes)
        .map(|body| body.message)
        .unwrap_or_else(|_| String::from_utf8_lossy(&bytes).into_owned());
    debug!(status = %status, message = %message, "API call failed");

    Err(match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
        StatusCode::FORBIDDEN => ClientError::Forbidden(message),
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        other => ClientError::Api {
            status: other.as_u16(),
            message,
        },
    })
}
