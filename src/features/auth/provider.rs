use async_trait::async_trait;

use super::model::{ProviderSession, ProviderUser};
use crate::core::error::Result;

/// External authentication provider holding operator credentials
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<ProviderSession>;

    /// Resolve the user behind a live access token
    async fn get_user(&self, access_token: &str) -> Result<ProviderUser>;

    async fn sign_out(&self, access_token: &str) -> Result<()>;

    async fn refresh_session(&self, refresh_token: &str) -> Result<ProviderSession>;

    /// Send a six digit recovery code to the address
    async fn request_password_reset(&self, email: &str) -> Result<()>;

    async fn verify_recovery_code(&self, email: &str, code: &str) -> Result<ProviderSession>;

    async fn update_password(&self, access_token: &str, new_password: &str) -> Result<()>;
}
