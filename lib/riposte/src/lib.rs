//! Functional envelope over HTTP exchanges.
//!
//! riposte wraps a request/response exchange so callers get recoverable
//! [`Result`] values instead of raised faults, plus helpers for status-code
//! classification, typed body decoding, and replaying the original exchange.
//!
//! # Example
//!
//! ```ignore
//! use riposte::prelude::*;
//!
//! #[derive(Debug, Deserialize)]
//! pub struct User {
//!     id: u64,
//!     name: String,
//! }
//!
//! let client = RiposteClient::new();
//! let request = Request::builder(Method::GET, "https://api.example.com/users/42".parse()?)
//!     .header("Accept", "application/json")
//!     .build();
//!
//! let envelope = client.send_enveloped_async(request, BodyHandling::Text).await?;
//! envelope.on_failure(|| eprintln!("request was rejected"));
//! let user: Option<User> = envelope.decode_for_status(200)?;
//! ```
//!
//! The blocking variants ([`RiposteClient::send`],
//! [`RiposteClient::send_enveloped`], [`Envelope::retry`]) park the calling
//! thread on a shared runtime and must not be used from async code.

mod blocking;
mod client;
mod config;
mod envelope;
pub mod prelude;
mod transport;

pub use client::RiposteClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use envelope::Envelope;
pub use transport::HyperTransport;

// Re-export core types
pub use riposte_core::{
    Body, BodyHandling, BodyPublisher, BodySink, BodyStream, ContentType, DecodeError, DecodeKind,
    DeserializeError, Error, JsonCodec, Request, RequestBuilder, Response, Result, Transport,
};

// Re-export http types for methods, status codes, and versions
pub use riposte_core::{Method, StatusCode, Version};

// Re-export url for request building
pub use url;
