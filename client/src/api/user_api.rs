use async_trait::async_trait;
use shared::{User, UserId};

use super::{send_empty, send_json, ApiClient};
use crate::error::Result;

const ENDPOINT: &str = "api/user";

#[async_trait]
pub trait UserApi: Send + Sync {
    async fn get_by_id(&self, id: UserId) -> Result<User>;

    async fn delete(&self, id: UserId) -> Result<()>;
}

#[async_trait]
impl UserApi for ApiClient {
    async fn get_by_id(&self, id: UserId) -> Result<User> {
        let user = send_json::<User>(self.http_get(&format!("{ENDPOINT}/{id}"))?).await?;
        tracing::info!(user_id = id, "Api get user by id");
        Ok(user)
    }

    async fn delete(&self, id: UserId) -> Result<()> {
        send_empty(self.http_delete(&format!("{ENDPOINT}/{id}"))?).await?;
        tracing::info!(user_id = id, "Api delete user");
        Ok(())
    }
}
