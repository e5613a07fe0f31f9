use shared::User;
use tracing::{debug, instrument, warn};

use crate::notice::Notice;
use crate::router::Route;
use crate::AppContext;

pub const ADMIN_LABEL: &str = "You are admin";

/// Account page of the logged-in user.
pub struct MePage {
    ctx: AppContext,
    user: Option<User>,
    pub on_error: bool,
}

impl MePage {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            user: None,
            on_error: false,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[instrument(skip_all)]
    pub async fn mount(&mut self) {
        let Some(user_id) = self.ctx.user_session.user_id() else {
            debug!("No identity, nothing to show");
            return;
        };
        match self.ctx.user_api.get_by_id(user_id).await {
            Ok(user) => self.user = Some(user),
            Err(error) => {
                warn!(%error, user_id, "Fail to fetch account");
                self.on_error = true;
            }
        }
    }

    /// `Name: {first} {LAST}`
    pub fn name_label(&self) -> Option<String> {
        self.user.as_ref().map(|user| {
            format!(
                "Name: {} {}",
                user.first_name,
                user.last_name.to_uppercase()
            )
        })
    }

    pub fn email_label(&self) -> Option<String> {
        self.user
            .as_ref()
            .map(|user| format!("Email: {}", user.email))
    }

    pub fn admin_label(&self) -> Option<&'static str> {
        self.user
            .as_ref()
            .filter(|user| user.admin)
            .map(|_| ADMIN_LABEL)
    }

    /// Admin accounts cannot delete themselves.
    pub fn can_delete(&self) -> bool {
        self.user.as_ref().is_some_and(|user| !user.admin)
    }

    #[instrument(skip_all)]
    pub async fn delete(&mut self) {
        let user_id = match &self.user {
            Some(user) if !user.admin => user.id,
            _ => {
                debug!("Account delete not available");
                return;
            }
        };
        match self.ctx.user_api.delete(user_id).await {
            Ok(()) => {
                self.ctx.notifier.open(Notice::AccountDeleted);
                self.ctx.user_session.log_out();
                self.ctx.navigator.navigate(Route::Home);
            }
            Err(error) => {
                warn!(%error, user_id, "Account delete failed");
                self.on_error = true;
            }
        }
    }

    pub fn back(&self) {
        self.ctx.navigator.back();
    }
}
