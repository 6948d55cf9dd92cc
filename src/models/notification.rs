use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;

use models::{Attributes, OrderId};

pub const NOTIFICATION: &str = "Notification";
pub const TRANSACTION_DATE: &str = "TransactionDate";

/// Type tag of a server notification
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationKind {
    EngineBlockSuccess,
    EngineBlockFail,
    EngineChargeSuccess,
    EngineChargeFail,
    EnginePaySuccess,
    EnginePayFail,
    EngineRefundSuccess,
    EngineRefundFail,
    EngineUnblockSuccess,
    EngineUnblockFail,
    Other(String),
}

impl NotificationKind {
    pub fn is_success(&self) -> bool {
        match self {
            NotificationKind::EngineBlockSuccess
            | NotificationKind::EngineChargeSuccess
            | NotificationKind::EnginePaySuccess
            | NotificationKind::EngineRefundSuccess
            | NotificationKind::EngineUnblockSuccess => true,
            _ => false,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            NotificationKind::EngineBlockSuccess => "EngineBlockSuccess",
            NotificationKind::EngineBlockFail => "EngineBlockFail",
            NotificationKind::EngineChargeSuccess => "EngineChargeSuccess",
            NotificationKind::EngineChargeFail => "EngineChargeFail",
            NotificationKind::EnginePaySuccess => "EnginePaySuccess",
            NotificationKind::EnginePayFail => "EnginePayFail",
            NotificationKind::EngineRefundSuccess => "EngineRefundSuccess",
            NotificationKind::EngineRefundFail => "EngineRefundFail",
            NotificationKind::EngineUnblockSuccess => "EngineUnblockSuccess",
            NotificationKind::EngineUnblockFail => "EngineUnblockFail",
            NotificationKind::Other(tag) => tag.as_str(),
        }
    }
}

impl FromStr for NotificationKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "EngineBlockSuccess" => NotificationKind::EngineBlockSuccess,
            "EngineBlockFail" => NotificationKind::EngineBlockFail,
            "EngineChargeSuccess" => NotificationKind::EngineChargeSuccess,
            "EngineChargeFail" => NotificationKind::EngineChargeFail,
            "EnginePaySuccess" => NotificationKind::EnginePaySuccess,
            "EnginePayFail" => NotificationKind::EnginePayFail,
            "EngineRefundSuccess" => NotificationKind::EngineRefundSuccess,
            "EngineRefundFail" => NotificationKind::EngineRefundFail,
            "EngineUnblockSuccess" => NotificationKind::EngineUnblockSuccess,
            "EngineUnblockFail" => NotificationKind::EngineUnblockFail,
            other => NotificationKind::Other(other.to_string()),
        })
    }
}

impl<'a> From<&'a str> for NotificationKind {
    fn from(s: &'a str) -> Self {
        match s.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server notification accepted as a successful event
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub success: bool,
    pub err_code: Option<String>,
    pub transaction_date: Option<NaiveDateTime>,
    /// All fields as received
    pub fields: Attributes,
}

impl Notification {
    pub fn order_id(&self) -> Option<OrderId> {
        self.fields.get("OrderId").map(OrderId::from)
    }

    pub fn amount(&self) -> Option<u64> {
        self.fields.get("Amount").and_then(|amount| amount.parse().ok())
    }
}
