//! Turns domain values into gateway requests. Nothing here talks to the network.

use serde_json::Value;

use super::config::Config;
use client::http::{Request, CONTENT_TYPE, FORM_URL_ENCODED};
use codec::{encode_base64, to_json, Form, DATA_SEPARATOR};
use models::{Cheque, NewOrder, OrderId, SessionId, WidgetParams};

pub const ROUTE_INIT: &str = "/apim/Init";
pub const ROUTE_PAY: &str = "/apim/Pay";
pub const ROUTE_STATUS: &str = "/apim/PayStatus";

/// `POST /apim/Init` with the order packed into the `Data` field
pub fn init(config: &Config, order: &NewOrder) -> Request {
    let return_url = order.return_url.as_ref().map(String::as_str).unwrap_or(config.return_url());

    let mut data = Form::new()
        .field("SessionType", order.session_type.to_string())
        .field("Url", return_url)
        .field("OrderId", order.order_id.inner())
        .field("Amount", order.amount)
        .field("Product", order.product.as_ref())
        .field("Description", order.description.as_ref())
        .field("Language", order.language.as_ref())
        .field("Cheque", order.cheque.as_ref().map(|cheque| encode_cheque(config, cheque)));
    for (key, value) in &order.custom_params {
        data.push(key.as_str(), value.as_str());
    }

    let body = Form::new()
        .field("Key", config.merchant())
        .field("Data", data.encode_with(DATA_SEPARATOR))
        .encode();

    Request::post(format!("{}{}", config.host(), ROUTE_INIT), body).with_header(CONTENT_TYPE, FORM_URL_ENCODED)
}

/// `GET /apim/PayStatus`
pub fn status(config: &Config, order_id: &OrderId) -> Request {
    let query = Form::new()
        .field("Key", config.merchant())
        .field("OrderId", order_id.inner())
        .encode();

    Request::get(format!("{}{}?{}", config.host(), ROUTE_STATUS, query)).with_header(CONTENT_TYPE, FORM_URL_ENCODED)
}

/// `POST /apim/Pay`. Redirects are handed back to the caller, not followed.
pub fn pay(config: &Config, session_id: &SessionId) -> Request {
    let body = Form::new().field("SessionId", session_id.inner()).encode();

    Request::post(format!("{}{}", config.host(), ROUTE_PAY), body)
        .with_header(CONTENT_TYPE, FORM_URL_ENCODED)
        .without_redirects()
}

/// Page the customer is sent to for a freshly created session
pub fn payment_url(config: &Config, session_id: &SessionId) -> String {
    let query = Form::new().field("SessionId", session_id.inner()).encode();
    format!("{}{}?{}", config.host(), ROUTE_PAY, query)
}

/// Widget address. Equal params always give the same url.
pub fn widget_url(config: &Config, params: &WidgetParams) -> String {
    let custom_params = if params.custom_params.is_empty() {
        None
    } else {
        let object = params
            .custom_params
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        Some(to_json(&Value::Object(object)))
    };

    let query = Form::new()
        .field("domain", params.domain.as_ref().map(String::as_str).unwrap_or(config.widget_domain()))
        .field("key", params.key.as_ref().map(String::as_str).unwrap_or(config.merchant()))
        .field("amount", params.amount)
        .field("product", params.product.as_ref())
        .field("session", params.session.as_ref())
        .field("customParams", custom_params)
        .field(
            "chequeParams",
            params
                .cheque
                .as_ref()
                .map(|cheque| to_json(&cheque.to_json_value(config.cheque_contact_email()))),
        )
        .encode();

    format!("{}?{}", config.widget_host(), query)
}

fn encode_cheque(config: &Config, cheque: &Cheque) -> String {
    encode_base64(&to_json(&cheque.to_json_value(config.cheque_contact_email())))
}
