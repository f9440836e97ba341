use std::path::Path;

use crate::config::ServerConfig;
use crate::handler::responses;
use crate::handler::static_files;
use crate::http::HttpMethod;
use crate::http::request::HttpRequest;
use crate::http::response::HttpResponse;

pub fn route(req: &HttpRequest, docroot: &Path, config: &ServerConfig) -> HttpResponse {
    match req.method() {
        HttpMethod::Get | HttpMethod::Head => static_files::serve(req, docroot, config),
        _ => responses::method_not_allowed(req.minor_version, config),
    }
}
