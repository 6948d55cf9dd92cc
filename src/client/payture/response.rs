//! Classifies raw gateway responses.

use failure::Fail;

use super::error::*;
use super::widget::WIDGET_ERROR;
use client::http::Response;
use codec::parse_xml_attributes;
use models::Attributes;

/// Error code reported when the gateway failed without naming a reason
pub const UNKNOWN_ERROR_CODE: &str = "UNKNOWN";

#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    /// Root attributes of an XML answer
    Attributes(Attributes),
    /// Payment page or widget markup
    Html(String),
    /// Anything else, passed through untouched
    Raw(String),
}

/// Decides by content type:
///
/// * `text/xml` - root attributes, or `Gateway` error if they report a failure
/// * `text/html` - the page, or `Widget` error if it carries the widget error marker
/// * anything else - raw body
pub fn classify(response: Response) -> Result<Payload, Error> {
    let content_type = response
        .content_type
        .as_ref()
        .map(|content_type| content_type.trim().to_ascii_lowercase())
        .unwrap_or_default();

    if content_type.starts_with("text/xml") {
        let status = response.status;
        let element = parse_xml_attributes(&response.body)
            .map_err(ectx!(try ErrorSource::Codec, ErrorKind::MalformedResponse => status))?;
        let attributes = element.attributes;
        if attributes.is_error() {
            let code = attributes.err_code().unwrap_or(UNKNOWN_ERROR_CODE).to_string();
            warn!("Payture rejected {} request with {}", element.name, code);
            return Err(ErrorKind::Gateway { code, attributes }.into());
        }
        Ok(Payload::Attributes(attributes))
    } else if content_type.starts_with("text/html") {
        if response.body.contains(WIDGET_ERROR) {
            warn!("Payture widget page reported an error");
            return Err(ErrorKind::Widget.into());
        }
        Ok(Payload::Html(response.body))
    } else {
        Ok(Payload::Raw(response.body))
    }
}
