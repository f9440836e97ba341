pub mod headers;
pub mod parser;
pub mod request;
pub mod response;
pub mod status;

/// Request methods the responder distinguishes.
///
/// The parser keeps the method as uppercased text; this enum is only a
/// classification of that text, so unknown tokens survive as [`Other`](HttpMethod::Other).
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Delete,
    Connect,
    Options,
    Trace,
    Patch,
    Other,
}

impl HttpMethod {
    pub fn from_token(method: &str) -> HttpMethod {
        match method {
            "GET" => HttpMethod::Get,
            "HEAD" => HttpMethod::Head,
            "POST" => HttpMethod::Post,
            "PUT" => HttpMethod::Put,
            "DELETE" => HttpMethod::Delete,
            "TRACE" => HttpMethod::Trace,
            "OPTIONS" => HttpMethod::Options,
            "CONNECT" => HttpMethod::Connect,
            "PATCH" => HttpMethod::Patch,
            _ => HttpMethod::Other,
        }
    }
}
