//! Payture InPay client: session init, status, payment page, widget url, server
//! notifications and widget completion status.

mod config;
mod error;
pub mod notification;
pub mod request;
pub mod response;
pub mod widget;

use std::sync::Arc;

use failure::Fail;
use futures::Future;

use self::response::Payload;
use client::http::{HttpClient, Request};
use models::{Attributes, NewOrder, Notification, OrderId, PaymentPage, PaymentStatus, Session, SessionId, WidgetParams};

pub use self::config::*;
pub use self::error::*;
pub use self::widget::{CancelHandle, Listener, ListenerId, MessageBus, WidgetMessenger, WidgetStatus, WIDGET_ERROR, WIDGET_SUCCESS};

pub trait PaytureClient: Send + Sync + 'static {
    /// Creates a payment session for the order
    fn init(&self, order: NewOrder) -> Box<Future<Item = Session, Error = Error> + Send>;

    fn status(&self, order_id: OrderId) -> Box<Future<Item = PaymentStatus, Error = Error> + Send>;

    /// Fetches the payment page of a session without following redirects
    fn pay(&self, session_id: SessionId) -> Box<Future<Item = PaymentPage, Error = Error> + Send>;

    fn widget_url(&self, params: WidgetParams) -> String;

    fn server_notification(&self, fields: Attributes) -> Result<Notification, Error>;

    /// Fails with `UnsupportedContext` if no messenger is configured
    fn widget_status(&self) -> Result<WidgetStatus, Error>;
}

impl<T: ?Sized + PaytureClient> PaytureClient for Arc<T> {
    fn init(&self, order: NewOrder) -> Box<Future<Item = Session, Error = Error> + Send> {
        (**self).init(order)
    }

    fn status(&self, order_id: OrderId) -> Box<Future<Item = PaymentStatus, Error = Error> + Send> {
        (**self).status(order_id)
    }

    fn pay(&self, session_id: SessionId) -> Box<Future<Item = PaymentPage, Error = Error> + Send> {
        (**self).pay(session_id)
    }

    fn widget_url(&self, params: WidgetParams) -> String {
        (**self).widget_url(params)
    }

    fn server_notification(&self, fields: Attributes) -> Result<Notification, Error> {
        (**self).server_notification(fields)
    }

    fn widget_status(&self) -> Result<WidgetStatus, Error> {
        (**self).widget_status()
    }
}

struct Reply {
    status: u16,
    location: Option<String>,
    payload: Payload,
}

#[derive(Clone)]
pub struct PaytureClientImpl<C: HttpClient + Clone> {
    client: C,
    config: Config,
    messenger: Option<Arc<WidgetMessenger>>,
}

impl<C: HttpClient + Clone> PaytureClientImpl<C> {
    pub fn new(client: C, config: Config) -> Self {
        PaytureClientImpl {
            client,
            config,
            messenger: None,
        }
    }

    pub fn create_from_config(client: C, config: ::config::Payture) -> Result<Self, Error> {
        let config = ConfigBuilder::from(config).build()?;
        Ok(Self::new(client, config))
    }

    /// Enables `widget_status`
    pub fn with_messenger(mut self, messenger: Arc<WidgetMessenger>) -> Self {
        self.messenger = Some(messenger);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Sends the request and classifies the answer. Non-2xx statuses fail unless `any_status` is set.
    fn execute(&self, request: Request, any_status: bool) -> impl Future<Item = Reply, Error = Error> + Send {
        let method = request.method.clone();
        let url = request.url.clone();
        debug!("Payture request {} {}", method, url);

        self.client
            .request(request)
            .map_err(ectx!(try ErrorSource::HttpClient, ErrorKind::Transport => method, url))
            .and_then(move |response| -> Result<Reply, Error> {
                let status = response.status;
                debug!("Payture answered with status {}", status);
                if !any_status && !response.is_success() {
                    let body = response.body;
                    return Err(ectx!(try err format_err!("unexpected status"), ErrorKind::UnexpectedStatus(status) => body));
                }
                let location = response.location.clone();
                response::classify(response).map(|payload| Reply { status, location, payload })
            })
    }
}

impl<C: HttpClient + Clone> PaytureClient for PaytureClientImpl<C> {
    fn init(&self, order: NewOrder) -> Box<Future<Item = Session, Error = Error> + Send> {
        let config = self.config.clone();
        let request = request::init(&config, &order);
        let NewOrder {
            order_id: requested_id,
            amount: requested_amount,
            ..
        } = order;
        Box::new(self.execute(request, false).and_then(move |reply| {
            let attributes = into_attributes(reply.payload)?;
            let session_id = attributes
                .get("SessionId")
                .filter(|id| !id.is_empty())
                .map(SessionId::from)
                .ok_or_else(|| ectx!(try err format_err!("SessionId is missing"), ErrorKind::MalformedResponse => attributes))?;
            let order_id = attributes.get("OrderId").map(OrderId::from).unwrap_or(requested_id);
            let amount = attributes
                .get("Amount")
                .map(str::to_string)
                .unwrap_or_else(|| requested_amount.to_string());

            info!("Payture session {} created for order {}", session_id, order_id);
            Ok(Session {
                payment_url: request::payment_url(&config, &session_id),
                order_id,
                amount,
                session_id,
            })
        }))
    }

    fn status(&self, order_id: OrderId) -> Box<Future<Item = PaymentStatus, Error = Error> + Send> {
        let request = request::status(&self.config, &order_id);
        Box::new(self.execute(request, false).and_then(move |reply| {
            let status = PaymentStatus::from_attributes(into_attributes(reply.payload)?);
            debug!("Payture order {} is paid: {}", order_id, status.is_paid);
            Ok(status)
        }))
    }

    fn pay(&self, session_id: SessionId) -> Box<Future<Item = PaymentPage, Error = Error> + Send> {
        let request = request::pay(&self.config, &session_id);
        Box::new(self.execute(request, true).and_then(move |reply| match reply.payload {
            Payload::Html(html) | Payload::Raw(html) => Ok(PaymentPage {
                status: reply.status,
                html,
                location: reply.location,
            }),
            Payload::Attributes(attributes) => Err(ectx!(
                try err format_err!("expected payment page"),
                ErrorKind::MalformedResponse => session_id, attributes
            )),
        }))
    }

    fn widget_url(&self, params: WidgetParams) -> String {
        request::widget_url(&self.config, &params)
    }

    fn server_notification(&self, fields: Attributes) -> Result<Notification, Error> {
        notification::parse_notification(fields)
    }

    fn widget_status(&self) -> Result<WidgetStatus, Error> {
        match self.messenger {
            Some(ref messenger) => Ok(widget::widget_status(messenger.clone())),
            None => Err(ErrorKind::UnsupportedContext.into()),
        }
    }
}

fn into_attributes(payload: Payload) -> Result<Attributes, Error> {
    match payload {
        Payload::Attributes(attributes) => Ok(attributes),
        other => Err(ectx!(try err format_err!("expected xml attributes"), ErrorKind::MalformedResponse => other)),
    }
}

