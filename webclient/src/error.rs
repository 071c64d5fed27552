use std::{io, path::PathBuf};

use reqwest::StatusCode;

pub type Result<T> = ::std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("No session cookie saved at '{0}'")]
    CookieNotFound(PathBuf),

    #[error("Login failed: not authenticated after restoring cookies or submitting credentials")]
    LoginFailed,

    #[error("Unexpected response code '{status}' while requesting to {requested_url}")]
    RequestFailed {
        status: StatusCode,
        requested_url: String,
    },

    #[error("Failed to parse as URL '{url}'")]
    InvalidSyntaxUrl {
        url: String,

        #[source]
        source: url::ParseError,
    },

    #[error("Cannot {action} session file '{path}': {source}")]
    SessionFile {
        action: &'static str,
        path: PathBuf,

        #[source]
        source: io::Error,
    },

    #[error("Malformed session file '{path}': {reason}")]
    MalformedSessionFile { path: PathBuf, reason: String },

    #[error("Login form not found in {requested_url}")]
    NoLoginForm { requested_url: String },

    #[error("Failed to read credential: {0}")]
    Prompt(#[source] io::Error),

    #[error("Http error: {0}")]
    Http(#[from] reqwest::Error),
}

impl Error {
    pub fn is_cookie_not_found(&self) -> bool {
        matches!(self, Error::CookieNotFound(_))
    }
}
