use std::collections::BTreeMap;

use serde_json::Value;

use models::{Cheque, NewOrder};

/// Parameters of an embedded payment widget. `domain` and `key` fall back to configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetParams {
    pub domain: Option<String>,
    pub key: Option<String>,
    pub amount: u64,
    pub product: Option<String>,
    pub session: Option<String>,
    pub cheque: Option<Cheque>,
    /// Sent to the widget as a JSON object
    #[serde(default)]
    pub custom_params: BTreeMap<String, Value>,
}

impl WidgetParams {
    pub fn new(amount: u64) -> Self {
        WidgetParams {
            amount,
            ..WidgetParams::default()
        }
    }

    pub fn with_custom_param<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.custom_params.insert(key.into(), value.into());
        self
    }
}

/// Order fields the widget has no dedicated parameter for travel in `custom_params`.
impl From<NewOrder> for WidgetParams {
    fn from(order: NewOrder) -> Self {
        let NewOrder {
            order_id,
            amount,
            product,
            description,
            language,
            cheque,
            return_url,
            custom_params,
            ..
        } = order;

        let mut params = BTreeMap::new();
        params.insert("OrderId".to_string(), Value::String(order_id.into_inner()));
        if let Some(description) = description {
            params.insert("Description".to_string(), Value::String(description));
        }
        if let Some(language) = language {
            params.insert("Language".to_string(), Value::String(language));
        }
        if let Some(return_url) = return_url {
            params.insert("Url".to_string(), Value::String(return_url));
        }
        for (key, value) in custom_params {
            params.insert(key, Value::String(value));
        }

        WidgetParams {
            domain: None,
            key: None,
            amount,
            product,
            session: None,
            cheque,
            custom_params: params,
        }
    }
}
