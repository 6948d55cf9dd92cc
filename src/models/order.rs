use std::fmt;

use models::Cheque;

#[derive(Clone, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash, From, FromStr, Serialize, Deserialize)]
pub struct OrderId(String);

impl OrderId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        OrderId(id.into())
    }

    pub fn inner(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl<'a> From<&'a str> for OrderId {
    fn from(id: &'a str) -> Self {
        OrderId::new(id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionType {
    /// One-stage payment
    Pay,
    /// Two-stage payment, funds are blocked until charged
    Block,
}

impl Default for SessionType {
    fn default() -> Self {
        SessionType::Pay
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SessionType::Pay => f.write_str("Pay"),
            SessionType::Block => f.write_str("Block"),
        }
    }
}

/// Order to start a payment session for.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub order_id: OrderId,
    /// Total price in minor units (kopecks), `1000` is `10.00`
    pub amount: u64,
    /// Product name shown to the customer
    pub product: Option<String>,
    pub description: Option<String>,
    /// Payment page language, `EN` or `RU`
    pub language: Option<String>,
    pub cheque: Option<Cheque>,
    #[serde(default)]
    pub session_type: SessionType,
    /// Overrides the configured return url for this order only
    pub return_url: Option<String>,
    /// Extra pairs forwarded to the gateway as is, in this order
    #[serde(default)]
    pub custom_params: Vec<(String, String)>,
}

impl NewOrder {
    pub fn new<I: Into<OrderId>>(order_id: I, amount: u64) -> Self {
        NewOrder {
            order_id: order_id.into(),
            amount,
            product: None,
            description: None,
            language: None,
            cheque: None,
            session_type: SessionType::default(),
            return_url: None,
            custom_params: Vec::new(),
        }
    }

    pub fn with_product<S: Into<String>>(mut self, product: S) -> Self {
        self.product = Some(product.into());
        self
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_language<S: Into<String>>(mut self, language: S) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_cheque(mut self, cheque: Cheque) -> Self {
        self.cheque = Some(cheque);
        self
    }

    pub fn with_session_type(mut self, session_type: SessionType) -> Self {
        self.session_type = session_type;
        self
    }

    pub fn with_return_url<S: Into<String>>(mut self, return_url: S) -> Self {
        self.return_url = Some(return_url.into());
        self
    }

    pub fn with_custom_param<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.custom_params.push((key.into(), value.into()));
        self
    }
}
