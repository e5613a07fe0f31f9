use async_trait::async_trait;
use shared::{LoginRequest, RegisterRequest, SessionInformation};

use super::{send_empty, send_json, ApiClient};
use crate::error::Result;

const LOGIN_ENDPOINT: &str = "api/auth/login";
const REGISTER_ENDPOINT: &str = "api/auth/register";

#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<SessionInformation>;

    async fn register(&self, request: &RegisterRequest) -> Result<()>;
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, request: &LoginRequest) -> Result<SessionInformation> {
        let response = send_json::<SessionInformation>(self.http_post(LOGIN_ENDPOINT)?.json(request)).await?;
        tracing::info!(email = %request.email, user_id = response.id, "Api auth login");
        Ok(response)
    }

    async fn register(&self, request: &RegisterRequest) -> Result<()> {
        send_empty(self.http_post(REGISTER_ENDPOINT)?.json(request)).await?;
        tracing::info!(email = %request.email, "Api auth register");
        Ok(())
    }
}
