use std::fmt;

use failure::{Backtrace, Context, Fail};

#[derive(Debug)]
pub struct Error {
    inner: Context<ErrorKind>,
}

#[derive(Clone, PartialEq, Debug, Fail)]
pub enum ErrorKind {
    #[fail(display = "http client error - malformed input")]
    MalformedInput,
    #[fail(display = "http client error - transport failure")]
    Transport,
    #[fail(display = "http client error - too many redirects")]
    TooManyRedirects,
    #[fail(display = "http client error - internal error")]
    Internal,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Fail)]
pub enum ErrorSource {
    #[fail(display = "http client source - hyper")]
    Hyper,
    #[fail(display = "http client source - utf8")]
    Utf8,
    #[fail(display = "http client source - futures channel")]
    Channel,
}

derive_error_impls!();
