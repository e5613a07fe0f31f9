use tracing::{debug, instrument, warn};

use super::ERROR_MESSAGE;
use crate::forms::LoginForm;
use crate::router::Route;
use crate::AppContext;

pub struct LoginPage {
    ctx: AppContext,
    pub form: LoginForm,
    pub on_error: bool,
}

impl LoginPage {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            form: LoginForm::default(),
            on_error: false,
        }
    }

    pub fn can_submit(&self) -> bool {
        self.form.is_valid()
    }

    pub fn error_message(&self) -> Option<&'static str> {
        self.on_error.then_some(ERROR_MESSAGE)
    }

    #[instrument(skip_all, fields(email = %self.form.email))]
    pub async fn submit(&mut self) {
        let request = match self.form.validate() {
            Ok(request) => request,
            Err(error) => {
                debug!(%error, "Login form invalid, submit disabled");
                return;
            }
        };
        match self.ctx.auth_api.login(&request).await {
            Ok(session_information) => {
                self.on_error = false;
                self.ctx.user_session.log_in(session_information);
                self.ctx.navigator.navigate(Route::Sessions);
            }
            Err(error) => {
                warn!(%error, "Login failed");
                self.on_error = true;
            }
        }
    }
}
