//! HTTP header containers for [`HttpRequest`](crate::http::request::HttpRequest) and
//! [`HttpResponse`](crate::http::response::HttpResponse)
//!
//! Requests and responses have different needs, so they get different types:
//!
//! - [`HeaderStore`] holds what a client sent. Names may repeat, and lookups
//!   are case-insensitive and return the most recently parsed field, so a
//!   repeated header hides the earlier ones.
//! - [`HttpHeaders`] holds what the server sends. Names are unique and the
//!   insertion order is the order on the wire.
//!
//! Neither type validates names or values.

use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderField {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Default)]
pub struct HeaderStore {
    // Arrival order; readers walk it backwards.
    fields: Vec<HeaderField>,
}

impl HeaderStore {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Adds a field in front of every field seen so far.
    pub fn prepend(&mut self, name: &str, value: &str) {
        self.fields.push(HeaderField {
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    /// First match in prepend order, i.e. the latest field with this name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
            .map(|f| f.value.as_str())
    }

    /// Fields newest first, the order a prepend-only list would expose.
    pub fn iter(&self) -> impl Iterator<Item = &HeaderField> {
        self.fields.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct HttpHeaders {
    headers: IndexMap<String, String>,
}

impl HttpHeaders {
    pub fn new() -> Self {
        Self {
            headers: IndexMap::new(),
        }
    }

    /// Sets a header. Overwriting keeps the header's original position.
    pub fn set_raw(&mut self, name: &str, value: &str) {
        self.headers.insert(name.to_string(), value.to_string());
    }

    pub fn stringify(&self) -> String {
        let mut result = String::new();
        for (name, value) in &self.headers {
            result.push_str(name);
            result.push_str(": ");
            result.push_str(value);
            result.push_str("\r\n");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        let mut store = HeaderStore::new();
        store.prepend("Content-Length", "12");
        assert_eq!(store.get("content-length"), Some("12"));
        assert_eq!(store.get("CONTENT-LENGTH"), Some("12"));
        assert_eq!(store.get("Host"), None);
    }

    #[test]
    fn later_field_hides_earlier_one() {
        let mut store = HeaderStore::new();
        store.prepend("Accept", "text/html");
        store.prepend("Host", "a");
        store.prepend("accept", "*/*");

        assert_eq!(store.get("Accept"), Some("*/*"));

        let names: Vec<_> = store.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["accept", "Host", "Accept"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn response_headers_keep_first_position_on_overwrite() {
        let mut headers = HttpHeaders::new();
        headers.set_raw("Server", "x");
        headers.set_raw("Content-Length", "1");
        headers.set_raw("Server", "y");
        assert_eq!(headers.stringify(), "Server: y\r\nContent-Length: 1\r\n");
    }
}
