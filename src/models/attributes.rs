use std::collections::btree_map::{BTreeMap, Iter};
use std::iter::FromIterator;

pub const SUCCESS_TRUE: &str = "True";
pub const SUCCESS_FALSE: &str = "False";
pub const ERROR_CODE_NONE: &str = "NONE";

pub const SUCCESS: &str = "Success";
pub const ERR_CODE: &str = "ErrCode";

/// Flat key/value attributes as sent by the gateway, either XML attributes of a
/// response or fields of a server notification.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes(BTreeMap<String, String>);

impl Attributes {
    pub fn new() -> Self {
        Attributes::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> Iter<String, String> {
        self.0.iter()
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }

    pub fn is_success(&self) -> bool {
        self.get(SUCCESS) == Some(SUCCESS_TRUE)
    }

    pub fn err_code(&self) -> Option<&str> {
        self.get(ERR_CODE)
    }

    /// `Success="False"` alone is not an error, the gateway uses `ErrCode="NONE"`
    /// for "not paid yet" answers.
    pub fn is_error(&self) -> bool {
        self.get(SUCCESS) == Some(SUCCESS_FALSE) && self.err_code() != Some(ERROR_CODE_NONE)
    }
}

impl From<BTreeMap<String, String>> for Attributes {
    fn from(map: BTreeMap<String, String>) -> Self {
        Attributes(map)
    }
}

impl FromIterator<(String, String)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Attributes(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        iter.into_iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }
}

impl IntoIterator for Attributes {
    type Item = (String, String);
    type IntoIter = ::std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
