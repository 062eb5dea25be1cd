#[macro_use]
extern crate lazy_static;

use std::fmt;

pub mod api;
pub mod config;
pub mod drafts;
pub mod safe_string;
pub mod session;
pub mod tokens;

pub use config::CONFIG;

#[derive(Debug)]
pub enum Error {
    /// Transport-level failure: DNS, TCP, TLS, timeouts.
    Http(reqwest::Error),
    /// Non-2xx response carrying a JSON `message` field.
    Api { status: u16, message: String },
    /// Non-2xx response whose body wasn't JSON. The body is truncated
    /// before being surfaced.
    UnexpectedBody { status: u16, body: String },
    /// No token, or the backend rejected it. Treated as logged out.
    Unauthorized,
    /// The draft can't be submitted as-is.
    Validation(String),
    Io(std::io::Error),
    Json(serde_json::Error),
    Url(url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Http(e) => write!(f, "request failed: {}", e),
            Error::Api { status, message } => write!(f, "{} ({})", message, status),
            Error::UnexpectedBody { status, body } => {
                write!(f, "unexpected response ({}): {}", status, body)
            }
            Error::Unauthorized => write!(f, "not logged in, or the session expired"),
            Error::Validation(msg) => write!(f, "{}", msg),
            Error::Io(e) => write!(f, "{}", e),
            Error::Json(e) => write!(f, "malformed response: {}", e),
            Error::Url(e) => write!(f, "invalid URL: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::Url(err)
    }
}
