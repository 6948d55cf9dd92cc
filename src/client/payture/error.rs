use std::fmt;

use failure::{Backtrace, Context, Fail};
use serde_json;

use models::Attributes;

#[derive(Debug)]
pub struct Error {
    inner: Context<ErrorKind>,
}

#[derive(Clone, PartialEq, Debug, Fail)]
pub enum ErrorKind {
    #[fail(display = "payture client error - gateway rejected request with {}", code)]
    Gateway { code: String, attributes: Attributes },
    #[fail(display = "payture client error - widget reported an error")]
    Widget,
    #[fail(display = "payture client error - widget messaging is not available")]
    UnsupportedContext,
    #[fail(display = "payture client error - unrecognized notification {:?}", _0)]
    UnrecognizedNotification(String),
    #[fail(display = "payture client error - unexpected http status {}", _0)]
    UnexpectedStatus(u16),
    #[fail(display = "payture client error - malformed response")]
    MalformedResponse,
    #[fail(display = "payture client error - malformed input")]
    MalformedInput,
    #[fail(display = "payture client error - invalid config")]
    InvalidConfig(serde_json::Value),
    #[fail(display = "payture client error - transport failure")]
    Transport,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Fail)]
pub enum ErrorSource {
    #[fail(display = "payture client source - codec")]
    Codec,
    #[fail(display = "payture client source - http client")]
    HttpClient,
    #[fail(display = "payture client source - chrono")]
    Chrono,
}

derive_error_impls!();

impl Error {
    /// Gateway `ErrCode` if the gateway rejected the request
    pub fn gateway_code(&self) -> Option<String> {
        match self.inner.get_context() {
            ErrorKind::Gateway { code, .. } => Some(code.clone()),
            _ => None,
        }
    }
}
