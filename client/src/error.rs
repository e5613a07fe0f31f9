use std::borrow::Cow;
use std::collections::HashMap;

use reqwest::StatusCode;

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub type FieldErrors = HashMap<Cow<'static, str>, Vec<Cow<'static, str>>>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("http_error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected_status: {status}")]
    UnexpectedStatus { status: StatusCode, body: String },
    #[error("resource_not_found")]
    NotFound,
    #[error("invalid_url: {0}")]
    Url(#[from] url::ParseError),
    #[error("invalid_form")]
    UnprocessableEntity { errors: FieldErrors },
}

impl Error {
    pub fn unprocessable_entity<K, V>(errors: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Cow<'static, str>>,
        V: Into<Cow<'static, str>>,
    {
        let mut error_map = HashMap::new();

        for (key, val) in errors {
            error_map
                .entry(key.into())
                .or_insert_with(Vec::new)
                .push(val.into());
        }

        Self::UnprocessableEntity { errors: error_map }
    }

    pub fn unexpected_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::NOT_FOUND => Self::NotFound,
            _ => Self::UnexpectedStatus { status, body },
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Http(error) => error.status(),
            Error::UnexpectedStatus { status, .. } => Some(*status),
            Error::NotFound => Some(StatusCode::NOT_FOUND),
            Error::Url(_) | Error::UnprocessableEntity { .. } => None,
        }
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Error::UnprocessableEntity { errors } => Some(errors),
            _ => None,
        }
    }
}
