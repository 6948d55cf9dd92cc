use chrono::{DateTime, NaiveDateTime};
use failure::Fail;

use super::error::*;
use codec::{form_decode, AMPERSAND};
use models::{Attributes, Notification, NotificationKind, NOTIFICATION, TRANSACTION_DATE};

const TRANSACTION_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%d.%m.%Y %H:%M:%S",
];

/// Accepts a server notification only if it reports a successful engine event.
///
/// A malformed `TransactionDate` fails first, then gateway errors, then unknown or failed events.
pub fn parse_notification(fields: Attributes) -> Result<Notification, Error> {
    let transaction_date = match fields.get(TRANSACTION_DATE) {
        Some(date) if !date.trim().is_empty() => Some(parse_transaction_date(date)?),
        _ => None,
    };

    if fields.is_error() {
        let code = fields.err_code().unwrap_or(super::response::UNKNOWN_ERROR_CODE).to_string();
        warn!("Payture notification reports error {}", code);
        return Err(ErrorKind::Gateway { code, attributes: fields }.into());
    }

    let tag = fields.get(NOTIFICATION).unwrap_or_default().to_string();
    let kind = NotificationKind::from(tag.as_str());
    if !kind.is_success() {
        warn!("Payture notification {:?} is not accepted", tag);
        return Err(ErrorKind::UnrecognizedNotification(tag).into());
    }

    info!("Payture notification {} for order {:?}", kind, fields.get("OrderId"));
    Ok(Notification {
        kind,
        success: fields.is_success(),
        err_code: fields.err_code().map(str::to_string),
        transaction_date,
        fields,
    })
}

/// Same as `parse_notification` for a raw `application/x-www-form-urlencoded` body
pub fn parse_notification_body(body: &str) -> Result<Notification, Error> {
    let fields = form_decode(body, AMPERSAND).map_err(ectx!(try ErrorSource::Codec, ErrorKind::MalformedInput => body))?;
    parse_notification(fields.into_iter().collect())
}

fn parse_transaction_date(value: &str) -> Result<NaiveDateTime, Error> {
    let value = value.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Ok(date.naive_utc());
    }
    TRANSACTION_DATE_FORMATS
        .iter()
        .filter_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .next()
        .ok_or_else(|| ectx!(try err format_err!("unsupported date format"), ErrorSource::Chrono, ErrorKind::MalformedInput => value))
}
