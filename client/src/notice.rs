use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use strum_macros::{Display, IntoStaticStr};

pub const NOTICE_DURATION: Duration = Duration::from_millis(3000);
pub const CLOSE_ACTION: &str = "Close";

/// Confirmation shown after a successful mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
pub enum Notice {
    #[strum(serialize = "Session created !")]
    SessionCreated,
    #[strum(serialize = "Session updated !")]
    SessionUpdated,
    #[strum(serialize = "Session deleted !")]
    SessionDeleted,
    #[strum(serialize = "Your account has been deleted !")]
    AccountDeleted,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        self.into()
    }

    pub fn action(&self) -> &'static str {
        CLOSE_ACTION
    }

    pub fn duration(&self) -> Duration {
        NOTICE_DURATION
    }
}

pub trait Notifier: Send + Sync {
    fn open(&self, notice: Notice);
}

/// Keeps every notice opened, in order.
#[derive(Debug, Default)]
pub struct NoticeLog {
    opened: Mutex<Vec<Notice>>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> Vec<Notice> {
        self.opened
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for NoticeLog {
    fn open(&self, notice: Notice) {
        tracing::info!(
            message = notice.message(),
            action = notice.action(),
            duration_ms = notice.duration().as_millis() as u64,
            "Notice opened"
        );
        self.opened
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}
