//! Admin/non-admin gating. Every check reads the current identity at the time
//! of the call; nothing here is cached.

use shared::{Session, SessionInformation};
use strum_macros::Display;

use crate::router::Route;
use crate::user_session::UserSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Capability {
    Admin,
    Member,
}

impl Capability {
    /// No identity is the same as a non-admin one.
    pub fn of(session_information: Option<&SessionInformation>) -> Self {
        match session_information {
            Some(info) if info.admin => Capability::Admin,
            _ => Capability::Member,
        }
    }

    pub fn current(user_session: &UserSession) -> Self {
        if user_session.is_admin() {
            Capability::Admin
        } else {
            Capability::Member
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Capability::Admin)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Proceed,
    Redirect(Route),
}

/// Entry check for the create/update screens.
pub fn guard_admin_screen(user_session: &UserSession) -> GateDecision {
    let capability = Capability::current(user_session);
    if capability.is_admin() {
        GateDecision::Proceed
    } else {
        tracing::debug!(%capability, "Admin screen refused, redirecting");
        GateDecision::Redirect(Route::Sessions)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListAffordances {
    pub create: bool,
    pub edit: bool,
    pub detail: bool,
}

pub fn list_affordances(user_session: &UserSession) -> ListAffordances {
    let admin = Capability::current(user_session).is_admin();
    ListAffordances {
        create: admin,
        edit: admin,
        detail: true,
    }
}

/// Admins never book, so they never get participate/un-participate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetailAffordances {
    pub delete: bool,
    pub participate: bool,
    pub un_participate: bool,
}

pub fn detail_affordances(user_session: &UserSession, session: &Session) -> DetailAffordances {
    let info = user_session.session_information();
    let capability = Capability::of(info.as_ref());
    let participant = info
        .as_ref()
        .is_some_and(|info| session.has_participant(info.id));
    let admin = capability.is_admin();
    DetailAffordances {
        delete: admin,
        participate: !admin && !participant,
        un_participate: !admin && participant,
    }
}
