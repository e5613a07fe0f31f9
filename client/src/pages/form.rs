use shared::{SessionId, Teacher};
use tracing::{debug, instrument, warn};

use crate::error::Result;
use crate::forms::SessionForm;
use crate::gate::{self, GateDecision};
use crate::notice::Notice;
use crate::router::Route;
use crate::AppContext;

/// Create/update screen for sessions, admin only.
pub struct SessionFormPage {
    ctx: AppContext,
    update_id: Option<SessionId>,
    teachers: Vec<Teacher>,
    pub form: SessionForm,
    pub on_error: bool,
}

impl SessionFormPage {
    /// `route` decides the mode: `Update { id }` edits that session, anything
    /// else creates a new one.
    pub fn new(ctx: AppContext, route: &Route) -> Self {
        let update_id = match route {
            Route::Update { id } => Some(*id),
            _ => None,
        };
        Self {
            ctx,
            update_id,
            teachers: Vec::new(),
            form: SessionForm::default(),
            on_error: false,
        }
    }

    pub fn teachers(&self) -> &[Teacher] {
        &self.teachers
    }

    pub fn is_update(&self) -> bool {
        self.update_id.is_some()
    }

    /// Returns `false` when the user was redirected away.
    #[instrument(skip_all, fields(update_id = ?self.update_id))]
    pub async fn mount(&mut self) -> bool {
        if let GateDecision::Redirect(route) = gate::guard_admin_screen(&self.ctx.user_session) {
            self.ctx.navigator.navigate(route);
            return false;
        }
        if let Err(error) = self.load().await {
            warn!(%error, "Fail to load session form");
            self.on_error = true;
        }
        true
    }

    async fn load(&mut self) -> Result<()> {
        self.teachers = self.ctx.teacher_api.all().await?;
        if let Some(id) = self.update_id {
            let session = self.ctx.session_api.detail(id).await?;
            self.form = SessionForm::from(&session);
        }
        Ok(())
    }

    pub fn can_submit(&self) -> bool {
        self.form.is_valid()
    }

    /// The admin gate is checked again here, so a demotion after `mount`
    /// still blocks the save.
    #[instrument(skip_all, fields(update_id = ?self.update_id))]
    pub async fn submit(&mut self) {
        if let GateDecision::Redirect(route) = gate::guard_admin_screen(&self.ctx.user_session) {
            self.ctx.navigator.navigate(route);
            return;
        }
        let request = match self.form.validate() {
            Ok(request) => request,
            Err(error) => {
                debug!(%error, "Session form invalid, submit disabled");
                return;
            }
        };
        let result = match self.update_id {
            Some(id) => self
                .ctx
                .session_api
                .update(id, &request)
                .await
                .map(|_| Notice::SessionUpdated),
            None => self
                .ctx
                .session_api
                .create(&request)
                .await
                .map(|_| Notice::SessionCreated),
        };
        match result {
            Ok(notice) => {
                self.on_error = false;
                self.ctx.notifier.open(notice);
                self.ctx.navigator.navigate(Route::Sessions);
            }
            Err(error) => {
                warn!(%error, "Session save failed");
                self.on_error = true;
            }
        }
    }
}
