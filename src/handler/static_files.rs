use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, error, warn};

use crate::config::ServerConfig;
use crate::handler::responses;
use crate::http::request::HttpRequest;
use crate::http::response::{Body, HttpResponse, ResponseHeader};
use crate::http::status::HttpStatus;

/// Why a request path did not resolve to a servable file.
#[derive(Debug)]
pub enum Lookup {
    NotFound,
    /// The path would leave the document root.
    Escaped,
    Internal(io::Error),
}

/// Answers a GET or HEAD with the file the path names, or with 404/500.
///
/// The file is opened before the response is built, so the handle lives in
/// the returned [`Body`] and an open failure still yields a complete 500.
pub fn serve(req: &HttpRequest, docroot: &Path, config: &ServerConfig) -> HttpResponse {
    let minor = req.minor_version;

    let full_path = match resolve(docroot, &req.path) {
        Ok(path) => path,
        Err(Lookup::NotFound) => return responses::not_found(minor, config),
        Err(Lookup::Escaped) => {
            warn!(path = %req.path, "rejected path outside the document root");
            return responses::not_found(minor, config);
        }
        Err(Lookup::Internal(err)) => {
            error!(path = %req.path, %err, "cannot resolve request path");
            return responses::internal_server_error(minor, config);
        }
    };

    let (file, len) = match open_file(&full_path) {
        Ok(opened) => opened,
        Err(Lookup::Internal(err)) => {
            error!(path = %full_path.display(), %err, "cannot open resolved file");
            return responses::internal_server_error(minor, config);
        }
        Err(_) => return responses::not_found(minor, config),
    };

    let mut response = responses::base(HttpStatus::Ok, minor, config);
    response.body = Body::File { file, len };
    response.set_header(ResponseHeader::ContentLength, &response.body.len().to_string());
    response.set_header(ResponseHeader::ContentType, guess_mime(&full_path));
    response
}

/// Maps a request target onto a regular file under `docroot`.
///
/// Query and fragment are ignored. `.` and `..` are folded lexically first,
/// then the joined path is canonicalized so that symlinks cannot lead out of
/// the root either.
pub fn resolve(docroot: &Path, url_path: &str) -> Result<PathBuf, Lookup> {
    let url_path = url_path.split(['?', '#']).next().unwrap_or_default();
    let relative = sanitize_path(url_path).ok_or(Lookup::Escaped)?;

    let root = docroot.canonicalize().map_err(Lookup::Internal)?;

    // Past this point every failure is about the requested name (missing,
    // NUL byte, too long, symlink loop, unreadable), never about the server.
    let full_path = root.join(relative).canonicalize().map_err(|err| {
        debug!(%err, "request path does not resolve");
        Lookup::NotFound
    })?;

    if !full_path.starts_with(&root) {
        return Err(Lookup::Escaped);
    }

    match fs::metadata(&full_path) {
        Ok(meta) if meta.is_file() => Ok(full_path),
        _ => Err(Lookup::NotFound),
    }
}

/// Opens a resolved file and reads its length from the handle.
///
/// Permission denied means the file is not readable, which is a 404; any
/// other failure on a file that just resolved is internal.
fn open_file(path: &Path) -> Result<(File, u64), Lookup> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(err) if err.kind() == io::ErrorKind::PermissionDenied => return Err(Lookup::NotFound),
        Err(err) => return Err(Lookup::Internal(err)),
    };
    let len = file.metadata().map_err(Lookup::Internal)?.len();
    Ok((file, len))
}

/// Folds `.`/`..` segments. `None` when `..` climbs above the root.
fn sanitize_path(path: &str) -> Option<PathBuf> {
    let mut clean = PathBuf::new();
    for component in Path::new(path).components() {
        match component {
            Component::RootDir | Component::CurDir => {}
            Component::Normal(segment) => clean.push(segment),
            Component::ParentDir => {
                if !clean.pop() {
                    return None;
                }
            }
            Component::Prefix(_) => return None,
        }
    }
    Some(clean)
}

pub fn guess_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("htm") | Some("html") => "text/html",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("json") => "application/json",
        Some("xml") => "application/xml",
        Some("txt") => "text/plain",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_table() {
        assert_eq!(guess_mime(Path::new("/a/index.html")), "text/html");
        assert_eq!(guess_mime(Path::new("notes.TXT")), "text/plain");
        assert_eq!(guess_mime(Path::new("p.jpeg")), "image/jpeg");
        assert_eq!(guess_mime(Path::new("p.jpg")), "image/jpeg");
        assert_eq!(guess_mime(Path::new("p.gif")), "image/gif");
        assert_eq!(guess_mime(Path::new("p.png")), "image/png");
        assert_eq!(guess_mime(Path::new("archive.tar.gz")), "application/octet-stream");
        assert_eq!(guess_mime(Path::new("Makefile")), "application/octet-stream");
        assert_eq!(guess_mime(Path::new(".html")), "application/octet-stream");
    }

    #[test]
    fn sanitize_folds_dots() {
        assert_eq!(sanitize_path("/a/./b/../c.txt"), Some(PathBuf::from("a/c.txt")));
        assert_eq!(sanitize_path("/"), Some(PathBuf::new()));
        assert_eq!(sanitize_path("//a//b"), Some(PathBuf::from("a/b")));
    }

    #[cfg(unix)]
    #[test]
    fn open_failure_on_resolved_socket_is_internal() {
        use std::os::unix::net::UnixListener;

        let dir = std::env::temp_dir().join(format!("minihttpd-open-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let socket = dir.join("control.sock");
        let _ = fs::remove_file(&socket);
        let _listener = UnixListener::bind(&socket).unwrap();

        // open(2) on a socket fails with ENXIO
        let result = open_file(&socket);
        fs::remove_dir_all(&dir).unwrap();
        assert!(matches!(result, Err(Lookup::Internal(_))));
    }

    #[test]
    fn open_file_reports_length() {
        let dir = std::env::temp_dir().join(format!("minihttpd-len-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("seven.txt");
        fs::write(&path, b"1234567").unwrap();

        let result = open_file(&path);
        fs::remove_dir_all(&dir).unwrap();
        assert!(matches!(result, Ok((_, 7))));
    }

    #[test]
    fn sanitize_rejects_climbing_out() {
        assert_eq!(sanitize_path("/../etc/passwd"), None);
        assert_eq!(sanitize_path("/a/../../b"), None);
    }
}
