//! minihttpd - one-shot static file server
//!
//! Reads one HTTP/1.x request from a stream, answers it from a document
//! root and returns. See [`service::service`].

pub mod config;
pub mod handler;
pub mod http;
pub mod net;
pub mod service;

pub use config::ServerConfig;
pub use service::{ServiceError, service};
