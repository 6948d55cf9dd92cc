use models::{Attributes, OrderId};

#[derive(Clone, Debug, Display, PartialEq, Eq, Hash, From, FromStr, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        SessionId(id.into())
    }

    pub fn inner(&self) -> &str {
        &self.0
    }
}

impl<'a> From<&'a str> for SessionId {
    fn from(id: &'a str) -> Self {
        SessionId::new(id)
    }
}

/// Payment session created by the gateway
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Session {
    pub order_id: OrderId,
    /// Amount exactly as echoed by the gateway
    pub amount: String,
    pub session_id: SessionId,
    /// Page to redirect the customer to
    pub payment_url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaymentStatus {
    pub is_paid: bool,
    /// Everything the gateway answered, including fields not modeled here
    pub attributes: Attributes,
}

impl PaymentStatus {
    pub fn from_attributes(attributes: Attributes) -> Self {
        PaymentStatus {
            is_paid: attributes.is_success(),
            attributes,
        }
    }

    /// Gateway order state, e.g. `Charged`, `Authorized`, `Rejected`
    pub fn state(&self) -> Option<&str> {
        self.attributes.get("State")
    }

    pub fn amount(&self) -> Option<u64> {
        self.attributes.get("Amount").and_then(|amount| amount.parse().ok())
    }
}

/// Payment page served by the gateway for a session
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaymentPage {
    pub status: u16,
    pub html: String,
    pub location: Option<String>,
}
