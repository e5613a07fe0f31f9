use tracing::{debug, info, instrument, warn};

use super::ERROR_MESSAGE;
use crate::forms::RegisterForm;
use crate::router::Route;
use crate::AppContext;

pub struct RegisterPage {
    ctx: AppContext,
    pub form: RegisterForm,
    pub on_error: bool,
}

impl RegisterPage {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            form: RegisterForm::default(),
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
                debug!(%error, "Register form invalid, submit disabled");
                return;
            }
        };
        match self.ctx.auth_api.register(&request).await {
            Ok(()) => {
                info!("Account registered");
                self.on_error = false;
                self.ctx.navigator.navigate(Route::Login);
            }
            Err(error) => {
                warn!(%error, "Register failed");
                self.on_error = true;
            }
        }
    }
}
