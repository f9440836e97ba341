use crate::http::HttpMethod;
use crate::http::headers::HeaderStore;

/// A fully parsed request. Only [`parse_request`](crate::http::parser::parse_request)
/// builds one, and it never hands out a partially filled value.
#[derive(Debug)]
pub struct HttpRequest {
    /// Uppercased method token.
    pub method: String,
    /// Request target exactly as received.
    pub path: String,
    /// `x` in `HTTP/1.x`.
    pub minor_version: u32,

    pub headers: HeaderStore,
    pub body: Option<Vec<u8>>,
    pub content_length: u64,
}

impl HttpRequest {
    pub fn method(&self) -> HttpMethod {
        HttpMethod::from_token(&self.method)
    }
}
