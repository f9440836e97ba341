use std::time::SystemTime;

use crate::config::ServerConfig;
use crate::http::response::{Body, HttpResponse, ResponseHeader};
use crate::http::status::HttpStatus;

/// Starts a response carrying the fields every reply has.
pub fn base(status: HttpStatus, minor_version: u32, config: &ServerConfig) -> HttpResponse {
    let mut res = HttpResponse::new(status, minor_version);
    res.set_header(ResponseHeader::Date, &httpdate::fmt_http_date(SystemTime::now()));
    res.set_header(ResponseHeader::Server, &config.server_name);
    res.set_header(ResponseHeader::Connection, "close");
    res
}

fn html(mut res: HttpResponse, body: &'static [u8]) -> HttpResponse {
    res.body = Body::Bytes(body.to_vec());
    res.set_header(ResponseHeader::ContentLength, &res.body.len().to_string());
    res.set_header(ResponseHeader::ContentType, "text/html");
    res
}

pub fn bad_request(minor_version: u32, config: &ServerConfig) -> HttpResponse {
    html(
        base(HttpStatus::BadRequest, minor_version, config),
        b"<h1>400 Bad Request</h1>",
    )
}

pub fn not_found(minor_version: u32, config: &ServerConfig) -> HttpResponse {
    html(
        base(HttpStatus::NotFound, minor_version, config),
        b"<h1>404 Not Found</h1>",
    )
}

pub fn method_not_allowed(minor_version: u32, config: &ServerConfig) -> HttpResponse {
    let mut res = base(HttpStatus::MethodNotAllowed, minor_version, config);
    res.set_header(ResponseHeader::Allow, "GET, HEAD");
    html(res, b"<h1>405 Method Not Allowed</h1>")
}

pub fn internal_server_error(minor_version: u32, config: &ServerConfig) -> HttpResponse {
    html(
        base(HttpStatus::InternalServerError, minor_version, config),
        b"<h1>500 Internal Server Error</h1>",
    )
}
