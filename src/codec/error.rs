use std::fmt;

use failure::{Backtrace, Context, Fail};

#[derive(Debug)]
pub struct Error {
    inner: Context<ErrorKind>,
}

#[derive(Clone, PartialEq, Debug, Fail)]
pub enum ErrorKind {
    #[fail(display = "codec error - malformed input")]
    MalformedInput,
    #[fail(display = "codec error - empty xml document")]
    EmptyDocument,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, Fail)]
pub enum ErrorSource {
    #[fail(display = "codec source - base64")]
    Base64,
    #[fail(display = "codec source - utf8")]
    Utf8,
    #[fail(display = "codec source - quick_xml")]
    QuickXml,
}

derive_error_impls!();
