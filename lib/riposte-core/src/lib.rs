//! Core types for the riposte functional HTTP envelope.
//!
//! This crate provides the vocabulary shared by the envelope layer and the
//! transports:
//! - [`Request`] and [`RequestBuilder`] - immutable, replayable HTTP requests
//! - [`BodyHandling`] and [`Body`] - the closed set of body representations
//! - [`Response`] - raw response with a materialized body
//! - [`JsonCodec`] - path-aware JSON (de)serialization
//! - [`Error`], [`DecodeError`], and [`Result`] - error handling
//! - [`Transport`] - the contract a client implementation fulfills
//! - [`Method`], [`StatusCode`], [`Version`] - re-exported from the `http`
//!   crate

mod body;
mod codec;
mod error;
pub mod prelude;
mod request;
mod response;
mod transport;

pub use body::{Body, BodyHandling, BodySink, BodyStream};
pub use codec::JsonCodec;
pub use error::{DecodeError, DecodeKind, DeserializeError, Error, Result};
pub use request::{BodyPublisher, ContentType, Request, RequestBuilder};
pub use response::Response;
pub use transport::Transport;

// Re-export http crate types for methods, status codes, and versions
pub use http::{Method, StatusCode, Version};
