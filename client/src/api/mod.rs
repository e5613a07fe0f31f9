use std::time::Duration;

use reqwest::{Client as HttpClient, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{Error, Result};
use crate::user_session::UserSession;
use crate::Config;

pub mod auth_api;
pub mod session_api;
pub mod teacher_api;
pub mod user_api;

pub use auth_api::AuthApi;
pub use session_api::SessionApi;
pub use teacher_api::TeacherApi;
pub use user_api::UserApi;

/// HTTP client for the studio REST API. Every request made while logged in
/// carries the bearer token of the current [`UserSession`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: HttpClient,
    base_url: Url,
    user_session: UserSession,
}

impl ApiClient {
    pub fn new(config: &Config, user_session: UserSession) -> Result<Self> {
        let mut builder = HttpClient::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            http: builder.build()?,
            base_url: normalize_base(config.api_url.clone()),
            user_session,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.user_session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub(crate) fn http_get(&self, path: &str) -> Result<RequestBuilder> {
        Ok(self.authorize(self.http.get(self.endpoint(path)?)))
    }

    pub(crate) fn http_post(&self, path: &str) -> Result<RequestBuilder> {
        Ok(self.authorize(self.http.post(self.endpoint(path)?)))
    }

    pub(crate) fn http_put(&self, path: &str) -> Result<RequestBuilder> {
        Ok(self.authorize(self.http.put(self.endpoint(path)?)))
    }

    pub(crate) fn http_delete(&self, path: &str) -> Result<RequestBuilder> {
        Ok(self.authorize(self.http.delete(self.endpoint(path)?)))
    }
}

fn normalize_base(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let url = response.url().clone();
    let body = response.text().await.unwrap_or_default();
    tracing::warn!(
        %url,
        status = status.as_u16(),
        response = %body,
        "Api unexpected response"
    );
    Err(Error::unexpected_status(status, body))
}

pub(crate) async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
    let response = check_status(request.send().await?).await?;
    Ok(response.json::<T>().await?)
}

/// For endpoints whose success body carries nothing the client uses.
pub(crate) async fn send_empty(request: RequestBuilder) -> Result<()> {
    check_status(request.send().await?).await?;
    Ok(())
}
