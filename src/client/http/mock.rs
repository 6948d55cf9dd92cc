use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use failure::Fail;
use futures::{future, Future};

use super::{Error, ErrorKind, HttpClient, Request, Response};

#[derive(Default)]
struct State {
    responses: VecDeque<Result<Response, ErrorKind>>,
    requests: Vec<Request>,
}

/// Stub gateway: answers with queued responses in order and records every request.
#[derive(Clone, Default)]
pub struct MockHttpClient {
    state: Arc<Mutex<State>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        MockHttpClient::default()
    }

    pub fn with_response(self, response: Response) -> Self {
        self.push_response(response);
        self
    }

    pub fn push_response(&self, response: Response) {
        self.lock().responses.push_back(Ok(response));
    }

    pub fn push_error(&self, kind: ErrorKind) {
        self.lock().responses.push_back(Err(kind));
    }

    pub fn requests(&self) -> Vec<Request> {
        self.lock().requests.clone()
    }

    pub fn last_request(&self) -> Option<Request> {
        self.lock().requests.last().cloned()
    }

    fn lock(&self) -> MutexGuard<State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl HttpClient for MockHttpClient {
    fn request(&self, request: Request) -> Box<Future<Item = Response, Error = Error> + Send> {
        let mut state = self.lock();
        let url = request.url.clone();
        state.requests.push(request);

        let result: Result<Response, Error> = match state.responses.pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(kind)) => Err(kind.into()),
            None => Err(ectx!(err format_err!("no response queued"), ErrorKind::Internal => url)),
        };

        Box::new(future::result(result))
    }
}
