use std::fs::File;
use std::io::{self, Read, Write};

use crate::http::headers::HttpHeaders;
use crate::http::status::HttpStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseHeader {
    Date,
    Server,
    Connection,
    Allow,
    ContentLength,
    ContentType,
}

/// Response payload. Files are streamed at write time rather than buffered.
#[derive(Debug)]
pub enum Body {
    Empty,
    Bytes(Vec<u8>),
    File { file: File, len: u64 },
}

impl Body {
    pub fn len(&self) -> u64 {
        match self {
            Body::Empty => 0,
            Body::Bytes(bytes) => bytes.len() as u64,
            Body::File { len, .. } => *len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug)]
pub struct HttpResponse {
    pub status: HttpStatus,
    pub minor_version: u32,
    pub headers: HttpHeaders,
    pub body: Body,
}

impl HttpResponse {
    pub fn new(status: HttpStatus, minor_version: u32) -> Self {
        Self {
            status,
            minor_version,
            headers: HttpHeaders::new(),
            body: Body::Empty,
        }
    }

    pub fn set_header(&mut self, h: ResponseHeader, value: &str) {
        let name = match h {
            ResponseHeader::Date => "Date",
            ResponseHeader::Server => "Server",
            ResponseHeader::Connection => "Connection",
            ResponseHeader::Allow => "Allow",
            ResponseHeader::ContentLength => "Content-Length",
            ResponseHeader::ContentType => "Content-Type",
        };

        self.headers.set_raw(name, value);
    }

    pub fn build_headers(&self) -> String {
        // HTTP/1.<minor> <status> <reason>\r\n
        // <header_name>: <header_value>\r\n
        // ...
        // \r\n
        format!(
            "HTTP/1.{} {} {}\r\n{}\r\n",
            self.minor_version,
            self.status.code(),
            self.status.reason(),
            self.headers.stringify(),
        )
    }

    /// Serializes the response. With `include_body == false` (HEAD) only the
    /// head is written and any file body is dropped unread.
    ///
    /// A file that yields fewer bytes than announced is an error: the head is
    /// already on the wire, so nothing can be taken back.
    pub fn write_to<W: Write>(self, out: &mut W, include_body: bool) -> io::Result<()> {
        out.write_all(self.build_headers().as_bytes())?;
        if !include_body {
            return Ok(());
        }

        match self.body {
            Body::Empty => {}
            Body::Bytes(bytes) => out.write_all(&bytes)?,
            Body::File { file, len } => {
                let copied = io::copy(&mut file.take(len), out)?;
                if copied < len {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        format!("file body truncated: sent {copied} of {len} bytes"),
                    ));
                }
            }
        }
        Ok(())
    }
}
