use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, PoisonError};

use shared::SessionId;

pub const NOT_FOUND_MESSAGE: &str = "Page not found !";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    Sessions,
    Detail { id: SessionId },
    Create,
    Update { id: SessionId },
    Me,
    NotFound,
}

impl Route {
    /// Routes that need a logged-in user.
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Route::Sessions
                | Route::Detail { .. }
                | Route::Create
                | Route::Update { .. }
                | Route::Me
        )
    }

    /// Routes only reachable while logged out.
    pub fn requires_guest(&self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::Login => write!(f, "/login"),
            Route::Register => write!(f, "/register"),
            Route::Sessions => write!(f, "/sessions"),
            Route::Detail { id } => write!(f, "/sessions/detail/{id}"),
            Route::Create => write!(f, "/sessions/create"),
            Route::Update { id } => write!(f, "/sessions/update/{id}"),
            Route::Me => write!(f, "/me"),
            Route::NotFound => write!(f, "/404"),
        }
    }
}

impl FromStr for Route {
    type Err = std::convert::Infallible;

    /// Unknown paths map to [`Route::NotFound`], so parsing never fails.
    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let route = match segments.as_slice() {
            [] => Route::Home,
            ["login"] => Route::Login,
            ["register"] => Route::Register,
            ["sessions"] => Route::Sessions,
            ["sessions", "create"] => Route::Create,
            ["sessions", "detail", id] => match id.parse() {
                Ok(id) => Route::Detail { id },
                Err(_) => Route::NotFound,
            },
            ["sessions", "update", id] => match id.parse() {
                Ok(id) => Route::Update { id },
                Err(_) => Route::NotFound,
            },
            ["me"] => Route::Me,
            _ => Route::NotFound,
        };
        Ok(route)
    }
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);

    fn back(&self);
}

/// In-memory navigation stack.
#[derive(Debug, Default)]
pub struct History {
    stack: Mutex<Vec<Route>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Route> {
        self.stack
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    pub fn entries(&self) -> Vec<Route> {
        self.stack
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for History {
    fn navigate(&self, route: Route) {
        tracing::info!(route = %route, "Navigate");
        self.stack
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(route);
    }

    fn back(&self) {
        let mut stack = self.stack.lock().unwrap_or_else(PoisonError::into_inner);
        let left = stack.pop();
        tracing::info!(left = ?left, "Navigate back");
    }
}
