//! Session detail view and the booking state machine.
//!
//! The view never edits its copy of the participant list. After any successful
//! participate/un-participate it fetches the session again, then its teacher,
//! and renders whatever the server returned. A failed mutation leaves the
//! previous data in place and issues no fetch. Session and teacher are only
//! replaced together, once both reads succeeded.

use shared::{Session, SessionId, Teacher, UserId};
use strum_macros::Display;
use tracing::{debug, info, instrument, warn};

use crate::error::Result;
use crate::gate::{self, DetailAffordances};
use crate::notice::Notice;
use crate::router::Route;
use crate::AppContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DetailState {
    Viewing,
    Mutating,
}

#[derive(Debug, Clone, Copy)]
enum Mutation {
    Participate(UserId),
    UnParticipate(UserId),
}

pub struct SessionDetail {
    ctx: AppContext,
    session_id: SessionId,
    session: Option<Session>,
    teacher: Option<Teacher>,
    state: DetailState,
    pub on_error: bool,
}

impl SessionDetail {
    pub fn new(ctx: AppContext, session_id: SessionId) -> Self {
        Self {
            ctx,
            session_id,
            session: None,
            teacher: None,
            state: DetailState::Viewing,
            on_error: false,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn teacher(&self) -> Option<&Teacher> {
        self.teacher.as_ref()
    }

    pub fn state(&self) -> DetailState {
        self.state
    }

    pub fn attendees(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.users.len())
    }

    /// Nothing is offered until the session is loaded.
    pub fn affordances(&self) -> DetailAffordances {
        self.session
            .as_ref()
            .map(|session| gate::detail_affordances(&self.ctx.user_session, session))
            .unwrap_or_default()
    }

    #[instrument(skip_all, fields(session_id = self.session_id))]
    pub async fn mount(&mut self) {
        if let Err(error) = self.fetch().await {
            warn!(%error, "Fail to fetch session detail");
            self.on_error = true;
        }
    }

    async fn fetch(&mut self) -> Result<()> {
        let session = self.ctx.session_api.detail(self.session_id).await?;
        let teacher = self.ctx.teacher_api.detail(session.teacher_id).await?;
        self.session = Some(session);
        self.teacher = Some(teacher);
        self.on_error = false;
        Ok(())
    }

    #[instrument(skip_all, fields(session_id = self.session_id))]
    pub async fn participate(&mut self) {
        match self.ctx.user_session.user_id() {
            Some(user_id) if self.affordances().participate => {
                self.mutate(Mutation::Participate(user_id)).await
            }
            _ => debug!("Participate not available"),
        }
    }

    #[instrument(skip_all, fields(session_id = self.session_id))]
    pub async fn un_participate(&mut self) {
        match self.ctx.user_session.user_id() {
            Some(user_id) if self.affordances().un_participate => {
                self.mutate(Mutation::UnParticipate(user_id)).await
            }
            _ => debug!("Un-participate not available"),
        }
    }

    async fn mutate(&mut self, mutation: Mutation) {
        self.state = DetailState::Mutating;
        let result = match mutation {
            Mutation::Participate(user_id) => {
                self.ctx
                    .session_api
                    .participate(self.session_id, user_id)
                    .await
            }
            Mutation::UnParticipate(user_id) => {
                self.ctx
                    .session_api
                    .un_participate(self.session_id, user_id)
                    .await
            }
        };
        match result {
            Ok(()) => {
                info!(?mutation, "Booking changed, refreshing");
                if let Err(error) = self.fetch().await {
                    warn!(%error, "Fail to refresh session after booking change");
                    self.on_error = true;
                }
            }
            Err(error) => {
                warn!(?mutation, %error, "Booking change failed");
                self.on_error = true;
            }
        }
        self.state = DetailState::Viewing;
    }

    #[instrument(skip_all, fields(session_id = self.session_id))]
    pub async fn delete(&mut self) {
        if !self.affordances().delete {
            debug!("Delete not available");
            return;
        }
        self.state = DetailState::Mutating;
        match self.ctx.session_api.delete(self.session_id).await {
            Ok(()) => {
                self.ctx.notifier.open(Notice::SessionDeleted);
                self.ctx.navigator.navigate(Route::Sessions);
            }
            Err(error) => {
                warn!(%error, "Session delete failed");
                self.on_error = true;
            }
        }
        self.state = DetailState::Viewing;
    }

    pub fn back(&self) {
        self.ctx.navigator.back();
    }
}
