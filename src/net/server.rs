//! Sequential TCP front end.
//!
//! The core only knows how to answer one request over a pair of streams.
//! This module supplies those streams from a listening socket: it accepts a
//! connection, applies the configured read/write deadlines, runs
//! [`service`](crate::service::service) once on it and closes it before
//! accepting the next one. Connections are never handled in parallel.
//!
//! A failure on one connection (peer gone, deadline hit) is logged and does
//! not stop the loop.

use std::io::{self, BufWriter};
use std::net::{TcpListener, TcpStream};
use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::config::ServerConfig;
use crate::service::service;

pub struct Server {
    config: ServerConfig,
    docroot: PathBuf,
}

impl Server {
    pub fn new(config: ServerConfig, docroot: PathBuf) -> Self {
        Self { config, docroot }
    }

    /// Binds to the configured address and port and serves until accepting fails.
    pub fn run(&self) -> io::Result<()> {
        let listener = TcpListener::bind((self.config.address, self.config.port))?;
        info!(addr = %listener.local_addr()?, docroot = %self.docroot.display(), "listening");
        self.serve(listener)
    }

    pub fn serve(&self, listener: TcpListener) -> io::Result<()> {
        loop {
            let (stream, peer) = match listener.accept() {
                Ok(conn) => conn,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };

            if let Err(err) = self.handle_client(&stream) {
                warn!(%peer, %err, "connection failed");
            }
        }
    }

    fn handle_client(&self, stream: &TcpStream) -> io::Result<()> {
        stream.set_read_timeout(non_zero(self.config.read_timeout))?;
        stream.set_write_timeout(non_zero(self.config.write_timeout))?;

        if let Err(err) = service(stream, BufWriter::new(stream), &self.docroot, &self.config) {
            error!(%err, "request aborted");
        }
        Ok(())
    }
}

// `set_*_timeout` rejects a zero duration; zero in the config means no deadline.
fn non_zero(timeout: std::time::Duration) -> Option<std::time::Duration> {
    (!timeout.is_zero()).then_some(timeout)
}
