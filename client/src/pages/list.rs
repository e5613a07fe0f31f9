use shared::{Session, SessionInformation};
use tracing::{instrument, warn};

use crate::gate::{self, ListAffordances};
use crate::router::Route;
use crate::AppContext;

pub struct SessionList {
    ctx: AppContext,
    sessions: Option<Vec<Session>>,
    pub on_error: bool,
}

impl SessionList {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            sessions: None,
            on_error: false,
        }
    }

    /// Always fetches; the list is never served from an earlier copy.
    #[instrument(skip_all)]
    pub async fn mount(&mut self) {
        match self.ctx.session_api.all().await {
            Ok(sessions) => {
                self.sessions = Some(sessions);
                self.on_error = false;
            }
            Err(error) => {
                warn!(%error, "Fail to fetch sessions");
                self.on_error = true;
            }
        }
    }

    pub fn sessions(&self) -> &[Session] {
        self.sessions.as_deref().unwrap_or_default()
    }

    pub fn user(&self) -> Option<SessionInformation> {
        self.ctx.user_session.session_information()
    }

    pub fn affordances(&self) -> ListAffordances {
        gate::list_affordances(&self.ctx.user_session)
    }

    pub fn open_create(&self) {
        if self.affordances().create {
            self.ctx.navigator.navigate(Route::Create);
        }
    }

    pub fn open_detail(&self, session: &Session) {
        self.ctx
            .navigator
            .navigate(Route::Detail { id: session.id });
    }

    pub fn open_edit(&self, session: &Session) {
        if self.affordances().edit {
            self.ctx
                .navigator
                .navigate(Route::Update { id: session.id });
        }
    }
}
