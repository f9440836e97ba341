//! Single request lifecycle.
//!
//! [`service`] is what the outer glue calls: it gets a readable stream, a
//! writable stream and a document root, and runs one parse → respond cycle
//! on them. Malformed requests become `400 Bad Request`; the only error it
//! returns is a response that could not be delivered.

use std::io::{self, BufReader, Read, Write};
use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

use crate::config::ServerConfig;
use crate::handler;
use crate::http::parser::parse_request;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("cannot deliver response: {0}")]
    Delivery(#[from] io::Error),
}

pub fn service<R: Read, W: Write>(
    input: R,
    mut output: W,
    docroot: &Path,
    config: &ServerConfig,
) -> Result<(), ServiceError> {
    let mut reader = BufReader::new(input);

    match parse_request(&mut reader, config) {
        Ok(req) => {
            debug!(
                method = %req.method,
                path = %req.path,
                minor_version = req.minor_version,
                content_length = req.content_length,
                "parsed request"
            );
            handler::respond(&req, docroot, &mut output, config)?;
        }
        Err(err) => {
            warn!(%err, "rejecting malformed request");
            handler::respond_bad_request(&mut output, config)?;
        }
    }

    output.flush()?;
    Ok(())
}
