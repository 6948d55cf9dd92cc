//! Pure encoding helpers for the gateway wire format: base64, JSON, form pairs and XML.

mod error;
mod form;
mod xml;

use failure::Fail;
use serde_json::Value;

pub use self::error::*;
pub use self::form::{form_decode, Form, FormValue, AMPERSAND, DATA_SEPARATOR};
pub use self::xml::{parse_xml_attributes, XmlElement};

pub fn encode_base64(text: &str) -> String {
    base64::encode(text.as_bytes())
}

pub fn decode_base64(value: &str) -> Result<String, Error> {
    let bytes = base64::decode(value).map_err(ectx!(try ErrorSource::Base64, ErrorKind::MalformedInput => value))?;
    String::from_utf8(bytes).map_err(ectx!(try ErrorSource::Utf8, ErrorKind::MalformedInput => value))
}

/// Object keys come out sorted, so equal values always give equal strings.
pub fn to_json(value: &Value) -> String {
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_matches_reference_encoding() {
        assert_eq!(encode_base64("Test Cheque Message"), "VGVzdCBDaGVxdWUgTWVzc2FnZQ==");
        assert_eq!(decode_base64("VGVzdCBDaGVxdWUgTWVzc2FnZQ==").unwrap(), "Test Cheque Message");
    }

    #[test]
    fn base64_keeps_utf8() {
        let text = "Чек №1";
        assert_eq!(decode_base64(&encode_base64(text)).unwrap(), text);
    }

    #[test]
    fn base64_rejects_garbage() {
        let err = decode_base64("not base64 at all!").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
    }

    #[test]
    fn json_key_order_is_stable() {
        let value = json!({"b": 1, "a": "x", "c": true});
        assert_eq!(to_json(&value), r#"{"a":"x","b":1,"c":true}"#);
    }
}
