use failure::Fail;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::error::*;

pub const AMPERSAND: &str = "&";
/// Separator of the pairs nested inside the init `Data` field
pub const DATA_SEPARATOR: &str = "; ";

/// Everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )` gets escaped, same as `encodeURIComponent`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Value that can be put into a form pair. `None` means the pair is left out.
pub trait FormValue {
    fn into_form_value(self) -> Option<String>;
}

impl FormValue for String {
    fn into_form_value(self) -> Option<String> {
        Some(self)
    }
}

impl<'a> FormValue for &'a str {
    fn into_form_value(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl<'a> FormValue for &'a String {
    fn into_form_value(self) -> Option<String> {
        Some(self.clone())
    }
}

/// The gateway speaks `True` / `False`, not `true` / `false`
impl FormValue for bool {
    fn into_form_value(self) -> Option<String> {
        Some(if self { "True" } else { "False" }.to_string())
    }
}

impl<T: FormValue> FormValue for Option<T> {
    fn into_form_value(self) -> Option<String> {
        self.and_then(FormValue::into_form_value)
    }
}

macro_rules! display_form_value {
    ($($ty:ty),*) => {
        $(
            impl FormValue for $ty {
                fn into_form_value(self) -> Option<String> {
                    Some(self.to_string())
                }
            }
        )*
    };
}

display_form_value!(u8, u16, u32, u64, i32, i64, f64);

/// Ordered list of form pairs. Pairs without a value are kept for lookups but never encoded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Form {
    pairs: Vec<(String, Option<String>)>,
}

impl Form {
    pub fn new() -> Self {
        Form::default()
    }

    pub fn field<K: Into<String>, V: FormValue>(mut self, key: K, value: V) -> Self {
        self.push(key, value);
        self
    }

    pub fn push<K: Into<String>, V: FormValue>(&mut self, key: K, value: V) {
        self.pairs.push((key.into(), value.into_form_value()));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, value)| value.as_ref().map(String::as_str))
    }

    /// Pairs that will actually be encoded
    pub fn present(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .filter_map(|(key, value)| value.as_ref().map(|value| (key.as_str(), value.as_str())))
    }

    pub fn encode(&self) -> String {
        self.encode_with(AMPERSAND)
    }

    pub fn encode_with(&self, separator: &str) -> String {
        self.present()
            .map(|(key, value)| format!("{}={}", escape(key), escape(value)))
            .collect::<Vec<_>>()
            .join(separator)
    }
}

fn escape(s: &str) -> String {
    utf8_percent_encode(s, URI_COMPONENT).to_string()
}

fn unescape(s: &str) -> Result<String, Error> {
    let s = s.replace('+', " ");
    let decoded = percent_decode_str(&s).decode_utf8().map(|value| value.into_owned());
    decoded.map_err(ectx!(try ErrorSource::Utf8, ErrorKind::MalformedInput => s))
}

/// Splits `input` into decoded pairs. A bare key decodes to an empty value.
/// Escapes that do not decode to UTF-8 fail with `MalformedInput`.
pub fn form_decode(input: &str, separator: &str) -> Result<Vec<(String, String)>, Error> {
    input
        .split(separator)
        .filter(|segment| !segment.is_empty())
        .map(|segment| -> Result<(String, String), Error> {
            match segment.find('=') {
                Some(idx) => Ok((unescape(&segment[..idx])?, unescape(&segment[idx + 1..])?)),
                None => Ok((unescape(segment)?, String::new())),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_absent_values() {
        let form = Form::new()
            .field("OrderId", "ABC123")
            .field("Description", None as Option<String>)
            .field("Amount", 50000u64)
            .field("Language", None as Option<&str>);

        assert_eq!(form.encode(), "OrderId=ABC123&Amount=50000");
        assert_eq!(form.get("Amount"), Some("50000"));
        assert_eq!(form.get("Description"), None);
    }

    #[test]
    fn empty_string_is_kept() {
        let form = Form::new().field("Description", "");
        assert_eq!(form.encode(), "Description=");
    }

    #[test]
    fn escapes_like_uri_component() {
        let form = Form::new().field("a b", "x&y=z/é").field("safe", "-_.!~*'()");
        assert_eq!(form.encode(), "a%20b=x%26y%3Dz%2F%C3%A9&safe=-_.!~*'()");
    }

    #[test]
    fn stringifies_scalars() {
        let form = Form::new()
            .field("paid", true)
            .field("refunded", false)
            .field("qty", 1.0f64)
            .field("half", 0.5f64)
            .field("big", 1_000_000u64)
            .field("neg", -7i64);
        assert_eq!(form.encode(), "paid=True&refunded=False&qty=1&half=0.5&big=1000000&neg=-7");
    }

    #[test]
    fn decode_restores_present_pairs() {
        let form = Form::new()
            .field("OrderId", "order #1")
            .field("Skipped", None as Option<u64>)
            .field("Amount", 1050u32)
            .field("Url", "http://example.com?orderid={orderid}&result={success}")
            .field("Paid", false);

        let decoded = form_decode(&form.encode(), AMPERSAND).unwrap();
        let expected: Vec<(String, String)> = form.present().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        assert_eq!(decoded, expected);
        assert!(decoded.iter().all(|(key, _)| key != "Skipped"));
    }

    #[test]
    fn nested_form_is_escaped_once_more_as_a_value() {
        let inner = Form::new().field("A", "x y").field("B", 1u8).encode_with(DATA_SEPARATOR);
        assert_eq!(inner, "A=x%20y; B=1");

        let outer = Form::new().field("Key", "M").field("Data", inner.as_str()).encode();
        assert_eq!(outer, "Key=M&Data=A%3Dx%2520y%3B%20B%3D1");

        let decoded = form_decode(&outer, AMPERSAND).unwrap();
        assert_eq!(decoded[1], ("Data".to_string(), inner.clone()));
        assert_eq!(
            form_decode(&decoded[1].1, DATA_SEPARATOR).unwrap(),
            vec![("A".to_string(), "x y".to_string()), ("B".to_string(), "1".to_string())]
        );
    }

    #[test]
    fn decode_accepts_plus_and_bare_keys() {
        assert_eq!(
            form_decode("Notification=EnginePaySuccess&Comment=two+words&Flag&&", AMPERSAND).unwrap(),
            vec![
                ("Notification".to_string(), "EnginePaySuccess".to_string()),
                ("Comment".to_string(), "two words".to_string()),
                ("Flag".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn decode_rejects_invalid_utf8() {
        let err = form_decode("OrderId=%FF%FE", AMPERSAND).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);

        assert_eq!(
            form_decode("Text=%D0%A7%D0%B5%D0%BA", AMPERSAND).unwrap(),
            vec![("Text".to_string(), "Чек".to_string())]
        );
    }
}
