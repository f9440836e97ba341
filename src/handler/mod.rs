mod responses;
mod router;
pub mod static_files;

use std::io::{self, Write};
use std::path::Path;

use tracing::info;

use crate::config::ServerConfig;
use crate::http::HttpMethod;
use crate::http::request::HttpRequest;

/// Writes the complete response to `req` onto `out`.
///
/// Every lookup or method failure is turned into an error response; only a
/// failure to deliver bytes is returned.
pub fn respond<W: Write>(req: &HttpRequest, docroot: &Path, out: &mut W, config: &ServerConfig) -> io::Result<()> {
    let res = router::route(req, docroot, config);
    info!(
        status = res.status.code(),
        method = %req.method,
        path = %req.path,
        "response"
    );
    res.write_to(out, req.method() != HttpMethod::Head)
}

/// Answers a request that never parsed. Nothing about it is known, so the
/// reply uses HTTP/1.0.
pub fn respond_bad_request<W: Write>(out: &mut W, config: &ServerConfig) -> io::Result<()> {
    let res = responses::bad_request(0, config);
    info!(status = res.status.code(), "response");
    res.write_to(out, true)
}
