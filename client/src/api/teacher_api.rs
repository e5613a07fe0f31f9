use async_trait::async_trait;
use shared::{Teacher, TeacherId};

use super::{send_json, ApiClient};
use crate::error::Result;

const ENDPOINT: &str = "api/teacher";

#[async_trait]
pub trait TeacherApi: Send + Sync {
    async fn all(&self) -> Result<Vec<Teacher>>;

    async fn detail(&self, id: TeacherId) -> Result<Teacher>;
}

#[async_trait]
impl TeacherApi for ApiClient {
    async fn all(&self) -> Result<Vec<Teacher>> {
        let teachers = send_json::<Vec<Teacher>>(self.http_get(ENDPOINT)?).await?;
        tracing::info!(count = teachers.len(), "Api list teachers");
        Ok(teachers)
    }

    async fn detail(&self, id: TeacherId) -> Result<Teacher> {
        let teacher = send_json::<Teacher>(self.http_get(&format!("{ENDPOINT}/{id}"))?).await?;
        tracing::info!(teacher_id = id, "Api get teacher by id");
        Ok(teacher)
    }
}
