extern crate env_logger;
extern crate futures;
extern crate payture_lib;
#[macro_use]
extern crate serde_json;
extern crate tokio_core;
extern crate uuid;

use std::sync::Arc;

use futures::Future;
use tokio_core::reactor::Core;
use uuid::Uuid;

use payture_lib::client::http::mock::MockHttpClient;
use payture_lib::client::http::{self, Response, CONTENT_TYPE, FORM_URL_ENCODED};
use payture_lib::client::payture::{
    Config, ErrorKind, MessageBus, PaytureClient, PaytureClientImpl, WIDGET_ERROR, WIDGET_SUCCESS,
};
use payture_lib::codec::{decode_base64, form_decode, AMPERSAND, DATA_SEPARATOR};
use payture_lib::models::{Attributes, Cheque, NewOrder, NotificationKind, OrderId, Position, SessionId, WidgetParams};

fn client(http_client: &MockHttpClient) -> PaytureClientImpl<MockHttpClient> {
    let _ = env_logger::try_init();
    PaytureClientImpl::new(http_client.clone(), Config::default())
}

fn value<'a>(fields: &'a [(String, String)], key: &str) -> Option<&'a str> {
    fields.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

#[test]
fn init_creates_session() {
    let http_client = MockHttpClient::new().with_response(Response::xml(
        r#"<Init Success="True" OrderId="ABC123" Amount="50000" SessionId="SESS1"/>"#,
    ));
    let payture = client(&http_client);
    let mut core = Core::new().unwrap();

    let session = core
        .run(payture.init(NewOrder::new("ABC123", 50000).with_product("ticket").with_language("en")))
        .unwrap();

    assert_eq!(session.order_id, OrderId::new("ABC123"));
    assert_eq!(session.amount, "50000");
    assert_eq!(session.session_id, SessionId::new("SESS1"));
    assert_eq!(session.payment_url, "https://sandbox.payture.com/apim/Pay?SessionId=SESS1");

    let request = http_client.last_request().unwrap();
    assert_eq!(request.url, "https://sandbox.payture.com/apim/Init");
    assert_eq!(request.header(CONTENT_TYPE), Some(FORM_URL_ENCODED));
    let outer = form_decode(request.body.as_ref().unwrap(), AMPERSAND).unwrap();
    let data = form_decode(value(&outer, "Data").unwrap(), DATA_SEPARATOR).unwrap();
    assert_eq!(value(&data, "OrderId"), Some("ABC123"));
    assert_eq!(value(&data, "Amount"), Some("50000"));
    assert_eq!(value(&data, "Product"), Some("ticket"));
    assert_eq!(value(&data, "Language"), Some("en"));
}

#[test]
fn init_sends_cheque_through_nested_encoding() {
    let http_client = MockHttpClient::new().with_response(Response::xml(
        r#"<Init Success="True" OrderId="ABC123" Amount="50000" SessionId="SESS1"/>"#,
    ));
    let payture = client(&http_client);
    let cheque = Cheque::new(vec![Position::new(1.0, 50000, 6, "Test Good")], 6).with_message("Test Cheque Message");

    payture
        .init(NewOrder::new("ABC123", 50000).with_cheque(cheque))
        .wait()
        .unwrap();

    let request = http_client.last_request().unwrap();
    let outer = form_decode(request.body.as_ref().unwrap(), AMPERSAND).unwrap();
    let data = form_decode(value(&outer, "Data").unwrap(), DATA_SEPARATOR).unwrap();
    let cheque: serde_json::Value = serde_json::from_str(&decode_base64(value(&data, "Cheque").unwrap()).unwrap()).unwrap();

    assert_eq!(cheque["CustomerContact"], json!("web@example.com"));
    assert_eq!(cheque["Message"], json!("Test Cheque Message"));
    assert_eq!(cheque["Positions"][0]["Quantity"], json!(1.0));
    assert_eq!(cheque["CheckClose"]["TaxationSystem"], json!(6));
}

#[test]
fn init_without_session_id_is_malformed() {
    let http_client = MockHttpClient::new().with_response(Response::xml(r#"<Init Success="True" OrderId="ABC123"/>"#));
    let err = client(&http_client).init(NewOrder::new("ABC123", 100)).wait().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
}

#[test]
fn status_reports_gateway_error() {
    let order_id = Uuid::new_v4().to_string();
    let http_client = MockHttpClient::new().with_response(Response::xml(format!(
        r#"<PayStatus Success="False" OrderId="{}" ErrCode="ORDER_NOT_FOUND"/>"#,
        order_id
    )));
    let mut core = Core::new().unwrap();

    let err = core.run(client(&http_client).status(OrderId::new(order_id.clone()))).unwrap_err();

    assert_eq!(err.gateway_code(), Some("ORDER_NOT_FOUND".to_string()));
    match err.kind() {
        ErrorKind::Gateway { attributes, .. } => assert_eq!(attributes.get("OrderId"), Some(order_id.as_str())),
        kind => panic!("unexpected error kind {:?}", kind),
    }
    let request = http_client.last_request().unwrap();
    assert_eq!(
        request.url,
        format!("https://sandbox.payture.com/apim/PayStatus?Key=Merchant&OrderId={}", order_id)
    );
}

#[test]
fn status_of_paid_and_pending_orders() {
    let http_client = MockHttpClient::new()
        .with_response(Response::xml(r#"<PayStatus Success="True" OrderId="A" Amount="50000" State="Charged"/>"#))
        .with_response(Response::xml(r#"<PayStatus Success="False" OrderId="B" ErrCode="NONE" State="New"/>"#));
    let payture = client(&http_client);

    let paid = payture.status(OrderId::new("A")).wait().unwrap();
    assert!(paid.is_paid);
    assert_eq!(paid.state(), Some("Charged"));
    assert_eq!(paid.amount(), Some(50000));

    let pending = payture.status(OrderId::new("B")).wait().unwrap();
    assert!(!pending.is_paid);
    assert_eq!(pending.state(), Some("New"));
}

#[test]
fn non_success_status_fails_before_classification() {
    let http_client = MockHttpClient::new().with_response(Response::html("<html>oops</html>").with_status(500));
    let err = client(&http_client).status(OrderId::new("A")).wait().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnexpectedStatus(500));
}

#[test]
fn transport_errors_are_wrapped() {
    let http_client = MockHttpClient::new();
    http_client.push_error(http::ErrorKind::Transport);
    let err = client(&http_client).status(OrderId::new("A")).wait().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[test]
fn pay_returns_page_and_redirect() {
    let http_client = MockHttpClient::new()
        .with_response(Response::html("<html><form>card</form></html>"))
        .with_response(
            Response::new(302, Some("text/html"), "")
                .with_location("https://sandbox.payture.com/apim/Return"),
        );
    let payture = client(&http_client);

    let page = payture.pay(SessionId::new("SESS1")).wait().unwrap();
    assert_eq!(page.status, 200);
    assert_eq!(page.html, "<html><form>card</form></html>");
    assert_eq!(page.location, None);
    assert!(!http_client.last_request().unwrap().follow_redirects);

    let redirect = payture.pay(SessionId::new("SESS1")).wait().unwrap();
    assert_eq!(redirect.status, 302);
    assert_eq!(redirect.location, Some("https://sandbox.payture.com/apim/Return".to_string()));
}

#[test]
fn pay_page_with_widget_error() {
    let http_client = MockHttpClient::new().with_response(Response::html(format!("<html>{}</html>", WIDGET_ERROR)));
    let err = client(&http_client).pay(SessionId::new("SESS1")).wait().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Widget);
}

#[test]
fn widget_url_is_deterministic() {
    let payture = client(&MockHttpClient::new());
    let params = WidgetParams::from(NewOrder::new("ABC123", 50000).with_product("ticket"))
        .with_custom_param("Seats", 2);

    let url = payture.widget_url(params.clone());
    assert_eq!(url, payture.widget_url(params));
    assert!(url.starts_with("https://merchantgateway.payture.com?domain=2&key=Merchant&amount=50000&product=ticket"));
}

#[test]
fn server_notifications() {
    let payture = client(&MockHttpClient::new());
    let fields: Attributes = vec![
        ("Notification", "EngineChargeSuccess"),
        ("Success", "True"),
        ("OrderId", "ABC123"),
        ("TransactionDate", "05.10.2018 12:30:15"),
    ]
    .into_iter()
    .collect();

    let notification = payture.server_notification(fields).unwrap();
    assert_eq!(notification.kind, NotificationKind::EngineChargeSuccess);
    assert!(notification.transaction_date.is_some());

    let failed: Attributes = vec![("Notification", "EngineChargeFail")].into_iter().collect();
    assert_eq!(
        payture.server_notification(failed).unwrap_err().kind(),
        ErrorKind::UnrecognizedNotification("EngineChargeFail".to_string())
    );
}

#[test]
fn widget_status_needs_messenger() {
    let payture = client(&MockHttpClient::new());
    assert_eq!(payture.widget_status().err().map(|e| e.kind()), Some(ErrorKind::UnsupportedContext));
}

#[test]
fn widget_status_follows_messages() {
    let bus = Arc::new(MessageBus::new());
    let payture = Arc::new(client(&MockHttpClient::new()).with_messenger(bus.clone()));

    let succeeded = payture.widget_status().unwrap();
    bus.post(WIDGET_SUCCESS);
    assert!(succeeded.wait().is_ok());

    let cancelled = payture.widget_status().unwrap();
    let failed = payture.widget_status().unwrap();
    cancelled.cancel();
    bus.post(WIDGET_ERROR);
    assert_eq!(failed.wait().unwrap_err().kind(), ErrorKind::Widget);
    assert_eq!(bus.listener_count(), 0);
}
