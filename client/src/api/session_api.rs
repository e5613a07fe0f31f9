use async_trait::async_trait;
use shared::{Session, SessionId, SessionRequest, UserId};

use super::{send_empty, send_json, ApiClient};
use crate::error::Result;

const ENDPOINT: &str = "api/session";

#[async_trait]
pub trait SessionApi: Send + Sync {
    async fn all(&self) -> Result<Vec<Session>>;

    async fn detail(&self, id: SessionId) -> Result<Session>;

    async fn create(&self, request: &SessionRequest) -> Result<Session>;

    async fn update(&self, id: SessionId, request: &SessionRequest) -> Result<Session>;

    async fn delete(&self, id: SessionId) -> Result<()>;

    async fn participate(&self, id: SessionId, user_id: UserId) -> Result<()>;

    async fn un_participate(&self, id: SessionId, user_id: UserId) -> Result<()>;
}

#[async_trait]
impl SessionApi for ApiClient {
    async fn all(&self) -> Result<Vec<Session>> {
        let sessions = send_json::<Vec<Session>>(self.http_get(ENDPOINT)?).await?;
        tracing::info!(count = sessions.len(), "Api list sessions");
        Ok(sessions)
    }

    async fn detail(&self, id: SessionId) -> Result<Session> {
        let session = send_json::<Session>(self.http_get(&format!("{ENDPOINT}/{id}"))?).await?;
        tracing::info!(session_id = id, "Api get session by id");
        Ok(session)
    }

    async fn create(&self, request: &SessionRequest) -> Result<Session> {
        let session = send_json::<Session>(self.http_post(ENDPOINT)?.json(request)).await?;
        tracing::info!(session_id = session.id, name = %session.name, "Api create session");
        Ok(session)
    }

    async fn update(&self, id: SessionId, request: &SessionRequest) -> Result<Session> {
        let endpoint = format!("{ENDPOINT}/{id}");
        let session = send_json::<Session>(self.http_put(&endpoint)?.json(request)).await?;
        tracing::info!(session_id = id, "Api update session");
        Ok(session)
    }

    async fn delete(&self, id: SessionId) -> Result<()> {
        send_empty(self.http_delete(&format!("{ENDPOINT}/{id}"))?).await?;
        tracing::info!(session_id = id, "Api delete session");
        Ok(())
    }

    async fn participate(&self, id: SessionId, user_id: UserId) -> Result<()> {
        send_empty(self.http_post(&format!("{ENDPOINT}/{id}/participate/{user_id}"))?).await?;
        tracing::info!(session_id = id, user_id, "Api participate");
        Ok(())
    }

    async fn un_participate(&self, id: SessionId, user_id: UserId) -> Result<()> {
        send_empty(self.http_delete(&format!("{ENDPOINT}/{id}/participate/{user_id}"))?).await?;
        tracing::info!(session_id = id, user_id, "Api un-participate");
        Ok(())
    }
}
