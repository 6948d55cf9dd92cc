use serde_json::{Map, Value};

/// Fiscal receipt (54-FZ) attached to a payment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Cheque {
    /// Falls back to the configured contact email when empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub positions: Vec<Position>,
    pub check_close: CheckClose,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Position {
    pub quantity: f64,
    /// Unit price in minor units
    pub price: u64,
    /// Tax code of the item
    pub tax: u8,
    pub text: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CheckClose {
    pub taxation_system: u8,
}

impl Cheque {
    pub fn new(positions: Vec<Position>, taxation_system: u8) -> Self {
        Cheque {
            customer_contact: None,
            message: None,
            positions,
            check_close: CheckClose { taxation_system },
        }
    }

    pub fn with_message<S: Into<String>>(mut self, message: S) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_customer_contact<S: Into<String>>(mut self, contact: S) -> Self {
        self.customer_contact = Some(contact.into());
        self
    }

    /// Wire representation with `CustomerContact` always filled in.
    pub fn to_json_value(&self, default_contact: &str) -> Value {
        let positions = self
            .positions
            .iter()
            .map(|position| {
                json!({
                    "Quantity": position.quantity,
                    "Price": position.price,
                    "Tax": position.tax,
                    "Text": position.text,
                })
            })
            .collect::<Vec<_>>();

        let mut value = Map::new();
        value.insert(
            "CustomerContact".to_string(),
            json!(self.customer_contact.as_ref().map(String::as_str).unwrap_or(default_contact)),
        );
        if let Some(ref message) = self.message {
            value.insert("Message".to_string(), json!(message));
        }
        value.insert("Positions".to_string(), Value::Array(positions));
        value.insert(
            "CheckClose".to_string(),
            json!({ "TaxationSystem": self.check_close.taxation_system }),
        );
        Value::Object(value)
    }
}

impl Position {
    pub fn new<S: Into<String>>(quantity: f64, price: u64, tax: u8, text: S) -> Self {
        Position {
            quantity,
            price,
            tax,
            text: text.into(),
        }
    }
}
