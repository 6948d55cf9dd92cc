//! Widget completion status. The embedded widget reports its outcome by posting a token
//! through a `WidgetMessenger`; `WidgetStatus` is a future resolved by the first token seen.

use std::sync::{Arc, Mutex, MutexGuard, Weak};

use futures::sync::oneshot;
use futures::{Async, Future, Poll};

use super::error::*;

/// Posted by the widget after a successful payment
pub const WIDGET_SUCCESS: &str = "payture-widget-success";
/// Posted by the widget on failure, also marks failed widget pages
pub const WIDGET_ERROR: &str = "payture-widget-error";

#[derive(Clone, Copy, Debug, Display, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub type Listener = Arc<Fn(&str) + Send + Sync>;

/// Message channel between the widget and the application
pub trait WidgetMessenger: Send + Sync + 'static {
    fn subscribe(&self, listener: Listener) -> ListenerId;
    /// Unknown ids are ignored
    fn unsubscribe(&self, id: ListenerId);
}

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, Listener)>,
}

/// In-process messenger. Every message goes to each listener registered when it was posted.
#[derive(Clone, Default)]
pub struct MessageBus {
    listeners: Arc<Mutex<Listeners>>,
}

impl MessageBus {
    pub fn new() -> Self {
        MessageBus::default()
    }

    pub fn post(&self, message: &str) {
        // listeners may unsubscribe while being called
        let listeners: Vec<Listener> = lock(&self.listeners)
            .entries
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        debug!("Delivering widget message {:?} to {} listeners", message, listeners.len());
        for listener in listeners {
            (*listener)(message);
        }
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.listeners).entries.len()
    }
}

impl WidgetMessenger for MessageBus {
    fn subscribe(&self, listener: Listener) -> ListenerId {
        let mut listeners = lock(&self.listeners);
        let id = ListenerId(listeners.next_id);
        listeners.next_id += 1;
        listeners.entries.push((id, listener));
        id
    }

    fn unsubscribe(&self, id: ListenerId) {
        lock(&self.listeners).entries.retain(|(entry, _)| *entry != id);
    }
}

type Outcome = Result<(), Error>;

struct Registration {
    sender: Mutex<Option<oneshot::Sender<Outcome>>>,
    listener: Mutex<Option<ListenerId>>,
    messenger: Weak<WidgetMessenger>,
}

impl Registration {
    fn settle(&self, outcome: Outcome) {
        let sender = lock(&self.sender).take();
        if let Some(sender) = sender {
            let _ = sender.send(outcome);
            self.detach();
        }
    }

    /// Drops the sender without a value, the status stays pending forever
    fn abandon(&self) {
        lock(&self.sender).take();
        self.detach();
    }

    fn detach(&self) {
        let id = lock(&self.listener).take();
        if let (Some(id), Some(messenger)) = (id, self.messenger.upgrade()) {
            messenger.unsubscribe(id);
        }
    }

    fn is_settled(&self) -> bool {
        lock(&self.sender).is_none()
    }
}

/// Resolves with `()` on the success token and fails with `ErrorKind::Widget` on the error token.
/// Once cancelled it never resolves.
pub struct WidgetStatus {
    receiver: oneshot::Receiver<Outcome>,
    registration: Arc<Registration>,
}

/// Stops a `WidgetStatus` from any thread
#[derive(Clone)]
pub struct CancelHandle {
    registration: Arc<Registration>,
}

impl CancelHandle {
    /// The listener is detached by the time this returns, later tokens change nothing
    pub fn cancel(&self) {
        self.registration.abandon();
    }
}

impl WidgetStatus {
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            registration: self.registration.clone(),
        }
    }

    pub fn cancel(&self) {
        self.registration.abandon();
    }
}

impl Future for WidgetStatus {
    type Item = ();
    type Error = Error;

    fn poll(&mut self) -> Poll<(), Error> {
        match self.receiver.poll() {
            Ok(Async::Ready(outcome)) => outcome.map(Async::Ready),
            Ok(Async::NotReady) => Ok(Async::NotReady),
            // sender dropped by cancellation
            Err(_) => Ok(Async::NotReady),
        }
    }
}

impl Drop for WidgetStatus {
    fn drop(&mut self) {
        self.registration.abandon();
    }
}

/// Starts listening for the widget outcome on `messenger`
pub fn widget_status(messenger: Arc<WidgetMessenger>) -> WidgetStatus {
    let (sender, receiver) = oneshot::channel();
    let registration = Arc::new(Registration {
        sender: Mutex::new(Some(sender)),
        listener: Mutex::new(None),
        messenger: Arc::downgrade(&messenger),
    });

    let listener: Listener = {
        let registration = registration.clone();
        Arc::new(move |message: &str| match message {
            WIDGET_SUCCESS => {
                info!("Widget reported success");
                registration.settle(Ok(()));
            }
            WIDGET_ERROR => {
                warn!("Widget reported an error");
                registration.settle(Err(ErrorKind::Widget.into()));
            }
            _ => {}
        })
    };

    let id = messenger.subscribe(listener);
    *lock(&registration.listener) = Some(id);
    // a token may have arrived while subscribing
    if registration.is_settled() {
        registration.detach();
    }

    WidgetStatus { receiver, registration }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}
