//! Client response abstraction.

/// A response whose body has already been read off the wire.
pub trait ClientResponse {
    /// HTTP status code.
    fn code(&self) -> u16;

    /// Status line reason phrase.
    fn message(&self) -> &str;

    /// First value of the named header, matched case-insensitively.
    fn header(&self, name: &str) -> Option<&str>;

    /// Raw body bytes.
    fn body(&self) -> &[u8];
}

/// In-memory response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawResponse {
    code: u16,
    message: String,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl RawResponse {
    /// Create a response with the given status code and body.
    pub fn new(code: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            code,
            message: String::new(),
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Set the reason phrase.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Append a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

impl ClientResponse for RawResponse {
    fn code(&self) -> u16 {
        self.code
    }

    fn message(&self) -> &str {
        &self.message
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    fn body(&self) -> &[u8] {
        &self.body
    }
}
