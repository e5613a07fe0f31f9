use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use regex::Regex;
use secrecy::SecretString;
use shared::{LoginRequest, RegisterRequest, Session, SessionRequest, TeacherId};

use crate::error::{Error, Result};

const EMAIL_MAX_LEN: usize = 254;
const EMAIL_LOCAL_MAX_LEN: usize = 64;
const NAME_MIN_LEN: usize = 3;
const NAME_MAX_LEN: usize = 20;
const PASSWORD_MIN_LEN: usize = 3;
const PASSWORD_MAX_LEN: usize = 40;
const SESSION_NAME_MAX_LEN: usize = 50;
const DESCRIPTION_MAX_LEN: usize = 2000;

type FieldError = (&'static str, &'static str);

fn email_regex() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| {
            Regex::new(
                r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
            )
            .ok()
        })
        .as_ref()
}

/// Same acceptance as the browser's email input: a local part, `@`, and
/// dot-separated host labels.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, _)) = email.split_once('@') else {
        return false;
    };
    email.len() <= EMAIL_MAX_LEN
        && local.len() <= EMAIL_LOCAL_MAX_LEN
        && email_regex().is_some_and(|re| re.is_match(email))
}

fn check_email(email: &str, errors: &mut Vec<FieldError>) {
    if email.trim().is_empty() {
        errors.push(("email", "email must not be empty"));
    } else if !is_valid_email(email) {
        errors.push(("email", "email is malformed"));
    }
}

fn check_length(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
    errors: &mut Vec<FieldError>,
) {
    let len = value.chars().count();
    if value.trim().is_empty() {
        errors.push((field, "must not be empty"));
    } else if len < min {
        errors.push((field, "too short"));
    } else if len > max {
        errors.push((field, "too long"));
    }
}

fn into_result<T>(errors: Vec<FieldError>, value: impl FnOnce() -> T) -> Result<T> {
    if errors.is_empty() {
        Ok(value())
    } else {
        Err(Error::unprocessable_entity(errors))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest> {
        let mut errors = Vec::new();
        check_email(&self.email, &mut errors);
        check_length("password", &self.password, PASSWORD_MIN_LEN, usize::MAX, &mut errors);
        into_result(errors, || LoginRequest {
            email: self.email.trim().to_string(),
            password: SecretString::from(self.password.clone()),
        })
    }

    /// Whether the submit affordance is enabled.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<RegisterRequest> {
        let mut errors = Vec::new();
        check_length("firstName", &self.first_name, NAME_MIN_LEN, NAME_MAX_LEN, &mut errors);
        check_length("lastName", &self.last_name, NAME_MIN_LEN, NAME_MAX_LEN, &mut errors);
        check_email(&self.email, &mut errors);
        check_length(
            "password",
            &self.password,
            PASSWORD_MIN_LEN,
            PASSWORD_MAX_LEN,
            &mut errors,
        );
        into_result(errors, || RegisterRequest {
            email: self.email.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            password: SecretString::from(self.password.clone()),
        })
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionForm {
    pub name: String,
    pub date: Option<NaiveDate>,
    pub teacher_id: Option<TeacherId>,
    pub description: String,
}

impl SessionForm {
    pub fn validate(&self) -> Result<SessionRequest> {
        let mut errors = Vec::new();
        check_length("name", &self.name, 1, SESSION_NAME_MAX_LEN, &mut errors);
        if self.date.is_none() {
            errors.push(("date", "must not be empty"));
        }
        if self.teacher_id.is_none() {
            errors.push(("teacher_id", "must not be empty"));
        }
        check_length(
            "description",
            &self.description,
            1,
            DESCRIPTION_MAX_LEN,
            &mut errors,
        );
        match (self.date, self.teacher_id) {
            (Some(date), Some(teacher_id)) if errors.is_empty() => Ok(SessionRequest {
                name: self.name.trim().to_string(),
                date: Utc.from_utc_datetime(&date.and_time(NaiveTime::default())),
                teacher_id,
                description: self.description.clone(),
            }),
            _ => Err(Error::unprocessable_entity(errors)),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl From<&Session> for SessionForm {
    fn from(session: &Session) -> Self {
        Self {
            name: session.name.clone(),
            date: Some(session.date.date_naive()),
            teacher_id: Some(session.teacher_id),
            description: session.description.clone(),
        }
    }
}
