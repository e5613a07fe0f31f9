use strum_macros::Display;
use tracing::{debug, info};

use crate::pages::detail::SessionDetail;
use crate::pages::form::SessionFormPage;
use crate::pages::list::SessionList;
use crate::pages::login::LoginPage;
use crate::pages::me::MePage;
use crate::pages::register::RegisterPage;
use crate::router::{Route, NOT_FOUND_MESSAGE};
use crate::user_session::LoggedInSignal;
use crate::AppContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum NavLink {
    Sessions,
    Account,
    Logout,
    Login,
    Register,
}

pub enum Page {
    Login(LoginPage),
    Register(RegisterPage),
    Sessions(SessionList),
    Detail(SessionDetail),
    Form(SessionFormPage),
    Me(MePage),
    NotFound(&'static str),
}

/// Application shell: resolves paths through the route guards, builds the
/// page for a route, and keeps the navigation bar in step with login state.
pub struct App {
    ctx: AppContext,
    logged_in: LoggedInSignal,
    nav_links: Vec<NavLink>,
}

impl App {
    pub fn new(ctx: AppContext) -> Self {
        let mut logged_in = ctx.user_session.observe_logged_in();
        let logged = logged_in.try_next().unwrap_or_else(|| logged_in.current());
        Self {
            ctx,
            logged_in,
            nav_links: links_for(logged),
        }
    }

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    /// Applies pending login/logout transitions and returns the links to show.
    pub fn nav_links(&mut self) -> &[NavLink] {
        while let Some(logged) = self.logged_in.try_next() {
            self.nav_links = links_for(logged);
        }
        &self.nav_links
    }

    /// Waits for the next login/logout and refreshes the links.
    pub async fn next_transition(&mut self) -> Option<bool> {
        let logged = self.logged_in.next().await?;
        self.nav_links = links_for(logged);
        Some(logged)
    }

    /// Logged-out users are sent to `/login` from protected routes, logged-in
    /// users to `/sessions` from `/login` and `/register`.
    pub fn guard(&self, route: Route) -> Route {
        let logged = self.ctx.user_session.is_logged();
        let resolved = match route {
            Route::Home if logged => Route::Sessions,
            Route::Home => Route::Login,
            route if route.requires_auth() && !logged => Route::Login,
            route if route.requires_guest() && logged => Route::Sessions,
            route => route,
        };
        debug!(resolved = %resolved, logged, "Route guard");
        resolved
    }

    pub fn open(&self, path: &str) -> (Route, Page) {
        let route = path.parse::<Route>().unwrap_or(Route::NotFound);
        let route = self.guard(route);
        let page = self.page(&route);
        (route, page)
    }

    fn page(&self, route: &Route) -> Page {
        let ctx = self.ctx.clone();
        match route {
            Route::Login => Page::Login(LoginPage::new(ctx)),
            Route::Register => Page::Register(RegisterPage::new(ctx)),
            Route::Home | Route::Sessions => Page::Sessions(SessionList::new(ctx)),
            Route::Detail { id } => Page::Detail(SessionDetail::new(ctx, *id)),
            Route::Create | Route::Update { .. } => Page::Form(SessionFormPage::new(ctx, route)),
            Route::Me => Page::Me(MePage::new(ctx)),
            Route::NotFound => Page::NotFound(NOT_FOUND_MESSAGE),
        }
    }

    pub fn log_out(&self) {
        info!("Logout requested");
        self.ctx.user_session.log_out();
        self.ctx.navigator.navigate(Route::Home);
    }
}

fn links_for(logged: bool) -> Vec<NavLink> {
    if logged {
        vec![NavLink::Sessions, NavLink::Account, NavLink::Logout]
    } else {
        vec![NavLink::Login, NavLink::Register]
    }
}
