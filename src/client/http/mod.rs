//! Http transport. `Client` owns the reactor-bound hyper client and is driven as a stream
//! on the event loop, `ClientHandle`s are cheap `Send + Sync` handles that submit requests to it.

mod error;
pub mod mock;
mod types;

use std::sync::Arc;

use failure::Fail;
use futures::future;
use futures::sync::{mpsc, oneshot};
use futures::{Future, Sink, Stream};
use hyper::client::{Connect, HttpConnector};
use hyper::header::ContentLength;
use hyper::{Headers, Method, Uri};
use tokio_core::reactor::Handle;

use config;

pub use self::error::*;
pub use self::types::*;

pub trait HttpClient: Send + Sync + 'static {
    fn request(&self, request: Request) -> Box<Future<Item = Response, Error = Error> + Send>;
}

impl<T: ?Sized + HttpClient> HttpClient for Arc<T> {
    fn request(&self, request: Request) -> Box<Future<Item = Response, Error = Error> + Send> {
        (**self).request(request)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Number of requests executed concurrently
    pub http_client_buffer_size: usize,
    /// Redirects followed for requests that allow it
    pub max_redirects: usize,
    pub dns_worker_thread_count: usize,
}

impl From<config::Client> for Config {
    fn from(config: config::Client) -> Self {
        let config::Client {
            http_client_buffer_size,
            max_redirects,
            dns_worker_thread_count,
        } = config;
        Config {
            http_client_buffer_size,
            max_redirects,
            dns_worker_thread_count,
        }
    }
}

type Payload = (Request, oneshot::Sender<Result<Response, Error>>);

pub struct Client<C: Connect = HttpConnector> {
    client: hyper::Client<C>,
    tx: mpsc::Sender<Payload>,
    rx: mpsc::Receiver<Payload>,
    buffer_size: usize,
    max_redirects: usize,
    https: bool,
}

impl Client<HttpConnector> {
    /// Plain http only, `https` urls fail with `MalformedInput`. The gateway hosts are all
    /// `https`, so talking to them needs a TLS connector passed to `with_connector`.
    pub fn new(config: &Config, handle: &Handle) -> Self {
        let connector = HttpConnector::new(config.dns_worker_thread_count.max(1), handle);
        Client {
            https: false,
            ..Client::with_connector(config, handle, connector)
        }
    }
}

impl<C: Connect + Clone> Client<C> {
    /// Use this to plug in e.g. a TLS connector
    pub fn with_connector(config: &Config, handle: &Handle, connector: C) -> Self {
        let buffer_size = config.http_client_buffer_size.max(1);
        let (tx, rx) = mpsc::channel(buffer_size);
        let client = hyper::Client::configure().connector(connector).build(handle);
        Client {
            client,
            tx,
            rx,
            buffer_size,
            max_redirects: config.max_redirects,
            https: true,
        }
    }

    pub fn handle(&self) -> ClientHandle {
        ClientHandle { tx: self.tx.clone() }
    }

    /// Must be spawned on the reactor, otherwise requests sent through handles never complete.
    /// Ends once the client and all of its handles are dropped.
    pub fn stream(self) -> Box<Stream<Item = (), Error = ()>> {
        let Client {
            client,
            rx,
            buffer_size,
            max_redirects,
            https,
            ..
        } = self;

        Box::new(
            rx.map(move |(request, reply): Payload| {
                send(client.clone(), request, max_redirects, https).then(move |result| {
                    if reply.send(result).is_err() {
                        debug!("Http client caller went away before the response arrived");
                    }
                    Ok::<(), ()>(())
                })
            })
            .buffer_unordered(buffer_size),
        )
    }
}

#[derive(Clone)]
pub struct ClientHandle {
    tx: mpsc::Sender<Payload>,
}

impl HttpClient for ClientHandle {
    fn request(&self, request: Request) -> Box<Future<Item = Response, Error = Error> + Send> {
        let (reply_tx, reply_rx) = oneshot::channel();
        let url = request.url.clone();

        Box::new(
            self.tx
                .clone()
                .send((request, reply_tx))
                .map_err({
                    let url = url.clone();
                    move |_| -> Error {
                        ectx!(err format_err!("http client stream is not running"), ErrorSource::Channel, ErrorKind::Internal => url)
                    }
                })
                .and_then(move |_| reply_rx.map_err(ectx!(try ErrorSource::Channel, ErrorKind::Internal => url)))
                .and_then(|result| result),
        )
    }
}

fn send<C: Connect + Clone>(
    client: hyper::Client<C>,
    request: Request,
    redirects_left: usize,
    https: bool,
) -> Box<Future<Item = Response, Error = Error>> {
    let uri = match request.url.parse::<Uri>() {
        Ok(uri) => uri,
        Err(e) => return Box::new(future::err(ectx!(try err e, ErrorSource::Hyper, ErrorKind::MalformedInput => request.url))),
    };
    if !https && uri.scheme() == Some("https") {
        let e = format_err!("https url on a client without TLS connector");
        return Box::new(future::err(ectx!(try err e, ErrorKind::MalformedInput => request.url)));
    }

    let mut hyper_request = hyper::Request::new(request.method.clone(), uri.clone());
    for (name, value) in &request.headers {
        hyper_request.headers_mut().set_raw(name.clone(), value.clone());
    }
    if let Some(ref body) = request.body {
        // hyper falls back to chunked encoding without it
        hyper_request.headers_mut().set(ContentLength(body.len() as u64));
        hyper_request.set_body(body.clone());
    }

    debug!("Sending {} request to {}", request.method, request.url);

    let fut = client
        .request(hyper_request)
        .map_err({
            let url = request.url.clone();
            ectx!(try ErrorSource::Hyper, ErrorKind::Transport => url)
        })
        .and_then(move |response| -> Box<Future<Item = Response, Error = Error>> {
            let status = u16::from(response.status());
            let location = header_value(response.headers(), "location");

            if request.follow_redirects && status >= 300 && status < 400 {
                if let Some(location) = location.clone() {
                    if redirects_left == 0 {
                        let e = format_err!("redirect limit reached");
                        return Box::new(future::err(
                            ectx!(try err e, ErrorKind::TooManyRedirects => request.url, location),
                        ));
                    }
                    let next = redirect(&request, &uri, status, &location);
                    return send(client, next, redirects_left - 1, https);
                }
            }

            let content_type = header_value(response.headers(), CONTENT_TYPE);
            let url = request.url;
            Box::new(
                response
                    .body()
                    .concat2()
                    .map_err({
                        let url = url.clone();
                        ectx!(try ErrorSource::Hyper, ErrorKind::Transport => url)
                    })
                    .and_then(move |chunk| {
                        let body = String::from_utf8(chunk.to_vec()).map_err(ectx!(try ErrorSource::Utf8, ErrorKind::Internal => url, status))?;
                        Ok(Response {
                            status,
                            content_type,
                            location,
                            body,
                        })
                    }),
            )
        });

    Box::new(fut)
}

/// 307 and 308 repeat the request as is, other redirects switch to a bodiless GET
fn redirect(request: &Request, uri: &Uri, status: u16, location: &str) -> Request {
    let url = resolve(uri, location);

    match status {
        307 | 308 => Request { url, ..request.clone() },
        _ => Request {
            method: Method::Get,
            url,
            body: None,
            ..request.clone()
        },
    }
}

/// Absolute url of a `Location` relative to the request uri
fn resolve(uri: &Uri, location: &str) -> String {
    let lower = location.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return location.to_string();
    }
    let (scheme, authority) = match (uri.scheme(), uri.authority()) {
        (Some(scheme), Some(authority)) => (scheme, authority),
        _ => return location.to_string(),
    };

    if location.starts_with("//") {
        format!("{}:{}", scheme, location)
    } else if location.starts_with('/') {
        format!("{}://{}{}", scheme, authority, location)
    } else {
        let path = uri.path();
        let base = match path.rfind('/') {
            Some(idx) => &path[..idx + 1],
            None => "/",
        };
        format!("{}://{}{}{}", scheme, authority, base, location)
    }
}

fn header_value(headers: &Headers, name: &str) -> Option<String> {
    headers
        .get_raw(name)
        .and_then(|raw| raw.one())
        .map(|value| String::from_utf8_lossy(value).into_owned())
}
