use std::sync::{Arc, Mutex, PoisonError};

use shared::{SessionInformation, UserId};
use tokio::sync::{mpsc, watch};

/// Holds the identity of the logged-in user for one application instance.
///
/// The logged-in flag is not stored: it is derived from whether a
/// [`SessionInformation`] is present. Clones share the same state; there is one
/// writer path (`log_in`/`log_out`) and any number of readers.
#[derive(Debug, Clone)]
pub struct UserSession {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    tx: watch::Sender<Option<SessionInformation>>,
    observers: Mutex<Vec<mpsc::UnboundedSender<bool>>>,
}

impl Default for UserSession {
    fn default() -> Self {
        Self::new()
    }
}

impl UserSession {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                tx,
                observers: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn log_in(&self, session_information: SessionInformation) {
        tracing::info!(
            user_id = session_information.id,
            username = %session_information.username,
            admin = session_information.admin,
            "User logged in"
        );
        self.publish(Some(session_information));
    }

    pub fn log_out(&self) {
        tracing::info!("User logged out");
        self.publish(None);
    }

    /// Replaces the identity and queues the new flag for every observer.
    /// Observers whose signal was dropped are forgotten here.
    fn publish(&self, session_information: Option<SessionInformation>) {
        let logged = session_information.is_some();
        let mut observers = self
            .inner
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        self.inner.tx.send_replace(session_information);
        observers.retain(|observer| observer.send(logged).is_ok());
    }

    pub fn is_logged(&self) -> bool {
        self.inner.tx.borrow().is_some()
    }

    pub fn session_information(&self) -> Option<SessionInformation> {
        self.inner.tx.borrow().clone()
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.inner.tx.borrow().as_ref().map(|info| info.id)
    }

    /// Absent identity counts as non-admin.
    pub fn is_admin(&self) -> bool {
        self.inner
            .tx
            .borrow()
            .as_ref()
            .is_some_and(|info| info.admin)
    }

    pub(crate) fn token(&self) -> Option<String> {
        self.inner
            .tx
            .borrow()
            .as_ref()
            .map(|info| info.token.clone())
    }

    /// Subscribes to the logged-in flag. The first `next()` resolves at once with
    /// the current value, later calls resolve with every login/logout in order.
    pub fn observe_logged_in(&self) -> LoggedInSignal {
        let (queue, rx) = mpsc::unbounded_channel();
        let mut observers = self
            .inner
            .observers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let current = self.inner.tx.subscribe();
        let _ = queue.send(current.borrow().is_some());
        observers.push(queue);
        LoggedInSignal { current, rx }
    }
}

pub struct LoggedInSignal {
    current: watch::Receiver<Option<SessionInformation>>,
    rx: mpsc::UnboundedReceiver<bool>,
}

impl LoggedInSignal {
    pub fn current(&self) -> bool {
        self.current.borrow().is_some()
    }

    /// Returns `None` once every `UserSession` handle has been dropped and
    /// all queued transitions were read.
    pub async fn next(&mut self) -> Option<bool> {
        self.rx.recv().await
    }

    /// Non-blocking variant of `next`, for render passes that only want the
    /// transitions queued since the last look.
    pub fn try_next(&mut self) -> Option<bool> {
        self.rx.try_recv().ok()
    }
}
