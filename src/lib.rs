//! Payture is a client library for the Payture InPay payment gateway.
//! The layered structure of the crate is
//!
//! `PaytureClient -> Request transformer + Response classifier -> Codec + HttpClient`
//!
//! Each layer can only face errors of its base layers and only exposes its own errors.
//! E.g. `PaytureClient` deals with `codec` and `HttpClient` errors and only returns
//! `client::payture::Error`, so callers never have to match on transport or codec errors.

extern crate base64;
extern crate chrono;
extern crate config as config_crate;
#[macro_use]
extern crate derive_more;
#[macro_use]
extern crate failure;
extern crate futures;
extern crate hyper;
#[macro_use]
extern crate log;
extern crate percent_encoding;
extern crate quick_xml;
extern crate serde;
#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate serde_json;
extern crate tokio_core;
extern crate validator;
#[macro_use]
extern crate validator_derive;

#[macro_use]
pub mod macros;
pub mod client;
pub mod codec;
pub mod config;
pub mod models;
