#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::{AtomicUsize, Ordering};

use minihttpd::{ServerConfig, service};

static NEXT_ROOT: AtomicUsize = AtomicUsize::new(0);

/// Throwaway document root, removed on drop.
pub struct DocRoot {
    path: PathBuf,
}

impl DocRoot {
    pub fn new() -> Self {
        let path = std::env::temp_dir().join(format!(
            "minihttpd-test-{}-{}",
            process::id(),
            NEXT_ROOT.fetch_add(1, Ordering::SeqCst)
        ));
        fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    pub fn with_file(self, name: &str, contents: &[u8]) -> Self {
        let file = self.path.join(name);
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(file, contents).unwrap();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for DocRoot {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

pub struct Response {
    pub status_line: String,
    pub headers: HashMap<String, String>,
    pub header_names: Vec<String>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn parse(raw: &[u8]) -> Self {
        let split = raw
            .windows(4)
            .position(|w| w == b"\r\n\r\n")
            .expect("response has no blank line");
        let head = std::str::from_utf8(&raw[..split]).expect("response head is not UTF-8");
        let mut lines = head.split("\r\n");
        let status_line = lines.next().unwrap().to_string();

        let mut headers = HashMap::new();
        let mut header_names = Vec::new();
        for line in lines {
            let (name, value) = line.split_once(": ").expect("malformed response header");
            header_names.push(name.to_string());
            headers.insert(name.to_ascii_lowercase(), value.to_string());
        }

        Self {
            status_line,
            headers,
            header_names,
            body: raw[split + 4..].to_vec(),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }
}

/// Runs one request through the driver with default limits.
pub fn exchange(root: &DocRoot, request: &[u8]) -> Response {
    exchange_with(root, request, &ServerConfig::default())
}

pub fn exchange_with(root: &DocRoot, request: &[u8], config: &ServerConfig) -> Response {
    let mut out = Vec::new();
    service(request, &mut out, root.path(), config).unwrap();
    Response::parse(&out)
}
