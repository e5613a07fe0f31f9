//! In-memory stand-ins for the remote API, navigation and notices.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use shared::{
    LoginRequest, RegisterRequest, Session, SessionId, SessionInformation, SessionRequest,
    Teacher, TeacherId, User, UserId,
};

use crate::api::{AuthApi, SessionApi, TeacherApi, UserApi};
use crate::error::{Error, Result};
use crate::notice::NoticeLog;
use crate::router::History;
use crate::user_session::UserSession;
use crate::AppContext;

pub fn session_information(id: UserId, admin: bool) -> SessionInformation {
    SessionInformation {
        token: format!("token-{id}"),
        token_type: "Bearer".to_string(),
        id,
        username: "yoga@studio.com".to_string(),
        first_name: "Yoga".to_string(),
        last_name: "Studio".to_string(),
        admin,
    }
}

pub fn session(id: SessionId, users: Vec<UserId>) -> Session {
    Session {
        id,
        name: format!("Session {id}"),
        description: "Yoga session of the day".to_string(),
        date: Utc.with_ymd_and_hms(2024, 5, 28, 0, 0, 0).unwrap(),
        teacher_id: 1,
        users,
        created_at: None,
        updated_at: None,
    }
}

pub fn teacher(id: TeacherId) -> Teacher {
    Teacher {
        id,
        first_name: "Denice".to_string(),
        last_name: "Brice".to_string(),
        created_at: None,
        updated_at: None,
    }
}

pub fn user(id: UserId, admin: bool) -> User {
    User {
        id,
        email: "yoga@user.com".to_string(),
        first_name: "yoga".to_string(),
        last_name: "yoga".to_string(),
        admin,
        created_at: None,
        updated_at: None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Login(String),
    Register(String),
    AllSessions,
    SessionDetail(SessionId),
    CreateSession(String),
    UpdateSession(SessionId),
    DeleteSession(SessionId),
    Participate(SessionId, UserId),
    UnParticipate(SessionId, UserId),
    AllTeachers,
    TeacherDetail(TeacherId),
    GetUser(UserId),
    DeleteUser(UserId),
}

/// Remote API double. Mutations apply to its own state, so a re-fetch shows
/// what the server would return. Operations named in `failing` answer with a
/// server error instead.
#[derive(Default)]
pub struct StubBackend {
    pub identity: Mutex<Option<SessionInformation>>,
    pub sessions: Mutex<Vec<Session>>,
    pub teachers: Mutex<Vec<Teacher>>,
    pub users: Mutex<Vec<User>>,
    pub calls: Mutex<Vec<Call>>,
    pub failing: Mutex<HashSet<&'static str>>,
}

impl StubBackend {
    pub fn new() -> Arc<Self> {
        let backend = Self::default();
        backend.teachers.lock().unwrap().extend([teacher(1), teacher(2)]);
        Arc::new(backend)
    }

    pub fn with_identity(self: &Arc<Self>, info: SessionInformation) -> Arc<Self> {
        *self.identity.lock().unwrap() = Some(info);
        self.clone()
    }

    pub fn with_session(self: &Arc<Self>, session: Session) -> Arc<Self> {
        self.sessions.lock().unwrap().push(session);
        self.clone()
    }

    pub fn with_user(self: &Arc<Self>, user: User) -> Arc<Self> {
        self.users.lock().unwrap().push(user);
        self.clone()
    }

    pub fn fail(&self, operation: &'static str) {
        self.failing.lock().unwrap().insert(operation);
    }

    pub fn recover(&self, operation: &'static str) {
        self.failing.lock().unwrap().remove(operation);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| predicate(c)).count()
    }

    pub fn session(&self, id: SessionId) -> Option<Session> {
        self.sessions.lock().unwrap().iter().find(|s| s.id == id).cloned()
    }

    fn record(&self, operation: &'static str, call: Call) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if self.failing.lock().unwrap().contains(operation) {
            return Err(Error::unexpected_status(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("{operation} failed"),
            ));
        }
        Ok(())
    }

    fn with_session_mut<T>(&self, id: SessionId, f: impl FnOnce(&mut Session) -> T) -> Result<T> {
        let mut sessions = self.sessions.lock().unwrap();
        let session = sessions.iter_mut().find(|s| s.id == id).ok_or(Error::NotFound)?;
        Ok(f(session))
    }
}

#[async_trait]
impl AuthApi for StubBackend {
    async fn login(&self, request: &LoginRequest) -> Result<SessionInformation> {
        self.record("login", Call::Login(request.email.clone()))?;
        let identity = self.identity.lock().unwrap().clone();
        match identity {
            Some(info) if request.password.expose_secret() == "password!" => Ok(info),
            _ => Err(Error::unexpected_status(StatusCode::UNAUTHORIZED, String::new())),
        }
    }

    async fn register(&self, request: &RegisterRequest) -> Result<()> {
        self.record("register", Call::Register(request.email.clone()))
    }
}

#[async_trait]
impl SessionApi for StubBackend {
    async fn all(&self) -> Result<Vec<Session>> {
        self.record("all_sessions", Call::AllSessions)?;
        Ok(self.sessions.lock().unwrap().clone())
    }

    async fn detail(&self, id: SessionId) -> Result<Session> {
        self.record("session_detail", Call::SessionDetail(id))?;
        self.session(id).ok_or(Error::NotFound)
    }

    async fn create(&self, request: &SessionRequest) -> Result<Session> {
        self.record("create_session", Call::CreateSession(request.name.clone()))?;
        let mut sessions = self.sessions.lock().unwrap();
        let id = sessions.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        let created = Session {
            id,
            name: request.name.clone(),
            description: request.description.clone(),
            date: request.date,
            teacher_id: request.teacher_id,
            users: vec![],
            created_at: None,
            updated_at: None,
        };
        sessions.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: SessionId, request: &SessionRequest) -> Result<Session> {
        self.record("update_session", Call::UpdateSession(id))?;
        self.with_session_mut(id, |session| {
            session.name = request.name.clone();
            session.description = request.description.clone();
            session.date = request.date;
            session.teacher_id = request.teacher_id;
            session.clone()
        })
    }

    async fn delete(&self, id: SessionId) -> Result<()> {
        self.record("delete_session", Call::DeleteSession(id))?;
        self.sessions.lock().unwrap().retain(|s| s.id != id);
        Ok(())
    }

    async fn participate(&self, id: SessionId, user_id: UserId) -> Result<()> {
        self.record("participate", Call::Participate(id, user_id))?;
        self.with_session_mut(id, |session| session.users.push(user_id))
    }

    async fn un_participate(&self, id: SessionId, user_id: UserId) -> Result<()> {
        self.record("un_participate", Call::UnParticipate(id, user_id))?;
        self.with_session_mut(id, |session| session.users.retain(|u| *u != user_id))
    }
}

#[async_trait]
impl TeacherApi for StubBackend {
    async fn all(&self) -> Result<Vec<Teacher>> {
        self.record("all_teachers", Call::AllTeachers)?;
        Ok(self.teachers.lock().unwrap().clone())
    }

    async fn detail(&self, id: TeacherId) -> Result<Teacher> {
        self.record("teacher_detail", Call::TeacherDetail(id))?;
        self.teachers
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(Error::NotFound)
    }
}

#[async_trait]
impl UserApi for StubBackend {
    async fn get_by_id(&self, id: UserId) -> Result<User> {
        self.record("get_user", Call::GetUser(id))?;
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(Error::NotFound)
    }

    async fn delete(&self, id: UserId) -> Result<()> {
        self.record("delete_user", Call::DeleteUser(id))?;
        self.users.lock().unwrap().retain(|u| u.id != id);
        Ok(())
    }
}

pub struct Harness {
    pub ctx: AppContext,
    pub backend: Arc<StubBackend>,
    pub history: Arc<History>,
    pub notices: Arc<NoticeLog>,
}

impl Harness {
    pub fn new(backend: Arc<StubBackend>) -> Self {
        let history = Arc::new(History::new());
        let notices = Arc::new(NoticeLog::new());
        let ctx = AppContext {
            user_session: UserSession::new(),
            auth_api: backend.clone(),
            session_api: backend.clone(),
            teacher_api: backend.clone(),
            user_api: backend.clone(),
            navigator: history.clone(),
            notifier: notices.clone(),
        };
        Self {
            ctx,
            backend,
            history,
            notices,
        }
    }

    pub fn logged_in_as(self, info: SessionInformation) -> Self {
        self.ctx.user_session.log_in(info);
        self
    }
}
