use hyper::Method;

pub const CONTENT_TYPE: &str = "content-type";
pub const FORM_URL_ENCODED: &str = "application/x-www-form-urlencoded";

#[derive(Clone, Debug, PartialEq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    /// When unset, a 3xx response is handed back as is
    pub follow_redirects: bool,
}

impl Request {
    pub fn new<S: Into<String>>(method: Method, url: S) -> Self {
        Request {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            follow_redirects: true,
        }
    }

    pub fn get<S: Into<String>>(url: S) -> Self {
        Request::new(Method::Get, url)
    }

    pub fn post<S: Into<String>>(url: S, body: String) -> Self {
        Request {
            body: Some(body),
            ..Request::new(Method::Post, url)
        }
    }

    pub fn with_header<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn without_redirects(mut self) -> Self {
        self.follow_redirects = false;
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Response {
    pub status: u16,
    pub content_type: Option<String>,
    pub location: Option<String>,
    pub body: String,
}

impl Response {
    pub fn new<S: Into<String>>(status: u16, content_type: Option<&str>, body: S) -> Self {
        Response {
            status,
            content_type: content_type.map(str::to_string),
            location: None,
            body: body.into(),
        }
    }

    pub fn xml<S: Into<String>>(body: S) -> Self {
        Response::new(200, Some("text/xml; charset=utf-8"), body)
    }

    pub fn html<S: Into<String>>(body: S) -> Self {
        Response::new(200, Some("text/html; charset=utf-8"), body)
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn with_location<S: Into<String>>(mut self, location: S) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    pub fn is_redirection(&self) -> bool {
        self.status >= 300 && self.status < 400
    }
}
