use std::sync::Arc;

use clap::Args;
use url::Url;

use self::api::{ApiClient, AuthApi, SessionApi, TeacherApi, UserApi};
use self::notice::Notifier;
use self::router::Navigator;
use self::user_session::UserSession;

pub mod api;
pub mod app;
pub mod error;
pub mod forms;
pub mod gate;
pub mod notice;
pub mod pages;
pub mod router;
pub mod user_session;

#[cfg(test)]
pub(crate) mod testing;

#[derive(Debug, Clone, Args)]
pub struct Config {
    #[arg(
        long,
        help = "Base URL of the studio REST API",
        env = "YOGA_API_URL",
        default_value = "http://localhost:8080/"
    )]
    pub api_url: Url,

    #[arg(
        long,
        help = "Per-request timeout in seconds, none by default",
        env = "YOGA_REQUEST_TIMEOUT_SECS"
    )]
    pub request_timeout_secs: Option<u64>,
}

/// Everything a view needs, built once per application instance and passed
/// down explicitly.
#[derive(Clone)]
pub struct AppContext {
    pub user_session: UserSession,
    pub auth_api: Arc<dyn AuthApi>,
    pub session_api: Arc<dyn SessionApi>,
    pub teacher_api: Arc<dyn TeacherApi>,
    pub user_api: Arc<dyn UserApi>,
    pub navigator: Arc<dyn Navigator>,
    pub notifier: Arc<dyn Notifier>,
}

impl AppContext {
    pub fn new(
        config: &Config,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> error::Result<Self> {
        let user_session = UserSession::new();
        let api = Arc::new(ApiClient::new(config, user_session.clone())?);
        tracing::debug!(api_url = %api.base_url(), "Api client configured");
        Ok(Self {
            user_session,
            auth_api: api.clone(),
            session_api: api.clone(),
            teacher_api: api.clone(),
            user_api: api,
            navigator,
            notifier,
        })
    }
}
