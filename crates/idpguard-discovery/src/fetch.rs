/// Status and body of a completed HTTP GET.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a status code.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("request to {url} timed out")]
    Timeout { url: String },
    #[error("request to {url} failed: {message}")]
    Failed { url: String, message: String },
}

/// Blocking HTTP GET. Timeouts and TLS policy belong to the implementation.
pub trait HttpFetch {
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
}

impl<F> HttpFetch for F
where
    F: Fn(&str) -> Result<HttpResponse, TransportError>,
{
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self(url)
    }
}
