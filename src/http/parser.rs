//! Blocking HTTP/1.x request parser.
//!
//! The parser pulls one request off a [`BufRead`]: the request line, the
//! header block up to the first empty line, then exactly `Content-Length`
//! body bytes. Every line read is bounded by
//! [`max_line_length`](crate::config::ServerConfig::max_line_length) and the
//! body by [`max_body_size`](crate::config::ServerConfig::max_body_size), both
//! checked before anything is buffered past them.
//!
//! Failures are reported as [`ParseError`]; the caller answers them with
//! `400 Bad Request`.

use std::io::{self, BufRead, Read};
use std::num::IntErrorKind;

use thiserror::Error;

use crate::config::ServerConfig;
use crate::http::headers::HeaderStore;
use crate::http::request::HttpRequest;

const PROTOCOL_PREFIX: &str = "HTTP/1.";
const BODY_PREALLOC_LIMIT: usize = 8192;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("stream ended before the request was complete")]
    UnexpectedEof,

    #[error("line exceeds {limit} bytes")]
    LineTooLong { limit: usize },

    #[error("request head is not valid UTF-8")]
    NotUtf8,

    #[error("missing method/path delimiter")]
    MissingDelimiter,

    #[error("empty method")]
    EmptyMethod,

    #[error("empty path")]
    EmptyPath,

    #[error("unknown protocol {0:?}")]
    BadProtocol(String),

    #[error("bad minor version {0:?}")]
    BadMinorVersion(String),

    #[error("header line without colon: {0:?}")]
    MissingColon(String),

    #[error("unparsable Content-Length {0:?}")]
    InvalidContentLength(String),

    #[error("negative Content-Length {0}")]
    NegativeContentLength(i64),

    #[error("body too large: {length} exceeds {limit} bytes")]
    BodyTooLarge { length: String, limit: u64 },

    #[error("short read: expected {expected} body bytes, got {actual}")]
    ShortRead { expected: u64, actual: u64 },

    #[error("read error: {0}")]
    Io(#[from] io::Error),
}

/// Reads and parses exactly one request from `reader`.
pub fn parse_request<R: BufRead>(reader: &mut R, config: &ServerConfig) -> Result<HttpRequest, ParseError> {
    let line = read_text_line(reader, config.max_line_length)?;
    let (method, path, minor_version) = parse_request_line(&line)?;

    let mut headers = HeaderStore::new();
    loop {
        let line = read_text_line(reader, config.max_line_length)?;
        if line.is_empty() {
            break;
        }
        let (name, value) = parse_header_line(&line)?;
        headers.prepend(name, value);
    }

    let content_length = content_length(&headers, config.max_body_size)?;
    let body = if content_length > 0 {
        Some(read_body(reader, content_length)?)
    } else {
        None
    };

    Ok(HttpRequest {
        method,
        path,
        minor_version,
        headers,
        body,
        content_length,
    })
}

/// Reads one `\n`-terminated line of at most `limit` bytes, terminator
/// included, and returns it without the `\n` or a preceding `\r`.
pub fn read_line<R: BufRead>(reader: &mut R, limit: usize) -> Result<Vec<u8>, ParseError> {
    let mut line = Vec::new();
    reader.by_ref().take(limit as u64).read_until(b'\n', &mut line)?;

    if line.last() != Some(&b'\n') {
        if line.len() >= limit {
            return Err(ParseError::LineTooLong { limit });
        }
        return Err(ParseError::UnexpectedEof);
    }

    line.pop();
    if line.last() == Some(&b'\r') {
        line.pop();
    }
    Ok(line)
}

fn read_text_line<R: BufRead>(reader: &mut R, limit: usize) -> Result<String, ParseError> {
    String::from_utf8(read_line(reader, limit)?).map_err(|_| ParseError::NotUtf8)
}

/// Splits `METHOD SP PATH SP HTTP/1.x`.
fn parse_request_line(line: &str) -> Result<(String, String, u32), ParseError> {
    let (method, rest) = line.split_once(' ').ok_or(ParseError::MissingDelimiter)?;
    let (path, protocol) = rest.split_once(' ').ok_or(ParseError::MissingDelimiter)?;

    if method.is_empty() {
        return Err(ParseError::EmptyMethod);
    }
    if path.is_empty() {
        return Err(ParseError::EmptyPath);
    }

    let minor_version = parse_minor_version(protocol)?;
    Ok((method.to_ascii_uppercase(), path.to_string(), minor_version))
}

fn parse_minor_version(protocol: &str) -> Result<u32, ParseError> {
    let minor = protocol
        .get(..PROTOCOL_PREFIX.len())
        .filter(|prefix| prefix.eq_ignore_ascii_case(PROTOCOL_PREFIX))
        .map(|_| &protocol[PROTOCOL_PREFIX.len()..])
        .ok_or_else(|| ParseError::BadProtocol(protocol.to_string()))?;

    // `u32::from_str` would also take a leading '+'.
    if minor.is_empty() || !minor.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::BadMinorVersion(minor.to_string()));
    }
    minor
        .parse::<u32>()
        .map_err(|_| ParseError::BadMinorVersion(minor.to_string()))
}

fn parse_header_line(line: &str) -> Result<(&str, &str), ParseError> {
    let (name, value) = line
        .split_once(':')
        .ok_or_else(|| ParseError::MissingColon(line.to_string()))?;
    Ok((name, value.trim_start_matches([' ', '\t'])))
}

fn content_length(headers: &HeaderStore, limit: u64) -> Result<u64, ParseError> {
    let Some(raw) = headers.get("Content-Length") else {
        return Ok(0);
    };
    let raw = raw.trim();

    let length = match raw.parse::<i64>() {
        Ok(n) if n < 0 => return Err(ParseError::NegativeContentLength(n)),
        Ok(n) => n as u64,
        Err(err) if *err.kind() == IntErrorKind::PosOverflow => u64::MAX,
        Err(err) if *err.kind() == IntErrorKind::NegOverflow => {
            return Err(ParseError::NegativeContentLength(i64::MIN));
        }
        Err(_) => return Err(ParseError::InvalidContentLength(raw.to_string())),
    };

    if length > limit {
        return Err(ParseError::BodyTooLarge {
            length: raw.to_string(),
            limit,
        });
    }
    Ok(length)
}

fn read_body<R: BufRead>(reader: &mut R, length: u64) -> Result<Vec<u8>, ParseError> {
    // Grow with what actually arrives; the declared length is only a promise.
    let prealloc = usize::try_from(length).unwrap_or(usize::MAX).min(BODY_PREALLOC_LIMIT);
    let mut body = Vec::with_capacity(prealloc);
    reader.by_ref().take(length).read_to_end(&mut body)?;

    let actual = body.len() as u64;
    if actual < length {
        return Err(ParseError::ShortRead {
            expected: length,
            actual,
        });
    }
    Ok(body)
}
