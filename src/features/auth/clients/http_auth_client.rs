use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};
use crate::features::auth::model::{ProviderSession, ProviderUser};
use crate::features::auth::provider::AuthProvider;

/// Error body returned by the provider's auth API
#[derive(Debug, Default, Deserialize)]
struct ProviderErrorResponse {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl ProviderErrorResponse {
    fn describe(self) -> Option<String> {
        self.error_description.or(self.msg).or(self.message)
    }
}

/// Client for a GoTrue-compatible auth API
pub struct HttpAuthClient {
    base_url: String,
    api_key: String,
    http_client: reqwest::Client,
}

impl HttpAuthClient {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            http_client: reqwest::Client::new(),
        }
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.http_client
            .get(format!("{}{}", self.base_url, path))
            .header("apikey", &self.api_key)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.http_client
            .post(format!("{}{}", self.base_url, path))
            .header("apikey", &self.api_key)
    }

    fn put(&self, path: &str) -> RequestBuilder {
        self.http_client
            .put(format!("{}{}", self.base_url, path))
            .header("apikey", &self.api_key)
    }

    async fn send(&self, request: RequestBuilder, action: &str) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            tracing::error!("Failed to {}: {}", action, e);
            AppError::ExternalServiceError(format!("Failed to {}: {}", action, e))
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ProviderErrorResponse>(&body)
            .ok()
            .and_then(ProviderErrorResponse::describe);

        Err(map_error_status(status, detail, &body))
    }

    async fn parse<T: DeserializeOwned>(response: Response, action: &str) -> Result<T> {
        response.json::<T>().await.map_err(|e| {
            tracing::error!("Failed to parse {} response: {}", action, e);
            AppError::ExternalServiceError(format!("Failed to parse {} response: {}", action, e))
        })
    }
}

/// Credential problems become auth errors, everything else is an upstream failure
fn map_error_status(status: StatusCode, detail: Option<String>, body: &str) -> AppError {
    match status {
        StatusCode::BAD_REQUEST
        | StatusCode::UNAUTHORIZED
        | StatusCode::FORBIDDEN
        | StatusCode::NOT_FOUND
        | StatusCode::UNPROCESSABLE_ENTITY => {
            AppError::Auth(detail.unwrap_or_else(|| "Invalid credentials".to_string()))
        }
        StatusCode::TOO_MANY_REQUESTS => AppError::Auth(
            detail.unwrap_or_else(|| "Too many attempts, try again later".to_string()),
        ),
        _ => {
            tracing::error!("Auth provider error: HTTP {} - {}", status, body);
            AppError::ExternalServiceError(format!("Auth provider error: HTTP {}", status))
        }
    }
}

#[async_trait]
impl AuthProvider for HttpAuthClient {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<ProviderSession> {
        tracing::debug!("Signing in operator: {}", email);

        let request = self
            .post("/token?grant_type=password")
            .json(&serde_json::json!({ "email": email, "password": password }));

        let response = self.send(request, "sign in").await?;
        Self::parse(response, "sign in").await
    }

    async fn get_user(&self, access_token: &str) -> Result<ProviderUser> {
        let request = self.get("/user").bearer_auth(access_token);
        let response = self.send(request, "get user").await?;
        Self::parse(response, "get user").await
    }

    async fn sign_out(&self, access_token: &str) -> Result<()> {
        let request = self.post("/logout").bearer_auth(access_token);
        self.send(request, "sign out").await?;
        Ok(())
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<ProviderSession> {
        let request = self
            .post("/token?grant_type=refresh_token")
            .json(&serde_json::json!({ "refresh_token": refresh_token }));

        let response = self.send(request, "refresh session").await?;
        Self::parse(response, "refresh session").await
    }

    async fn request_password_reset(&self, email: &str) -> Result<()> {
        let request = self
            .post("/recover")
            .json(&serde_json::json!({ "email": email }));

        self.send(request, "request password reset").await?;
        tracing::info!("Password recovery code sent to: {}", email);
        Ok(())
    }

    async fn verify_recovery_code(&self, email: &str, code: &str) -> Result<ProviderSession> {
        let request = self.post("/verify").json(&serde_json::json!({
            "type": "recovery",
            "email": email,
            "token": code,
        }));

        let response = self.send(request, "verify recovery code").await?;
        Self::parse(response, "verify recovery code").await
    }

    async fn update_password(&self, access_token: &str, new_password: &str) -> Result<()> {
        let request = self
            .put("/user")
            .bearer_auth(access_token)
            .json(&serde_json::json!({ "password": new_password }));

        self.send(request, "update password").await?;
        Ok(())
    }
}
