//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits
//! for easy glob importing:
//!
//! ```ignore
//! use riposte::prelude::*;
//! ```

pub use crate::{
    Body, BodyHandling, BodyPublisher, BodySink, BodyStream, ClientConfig, ContentType,
    DecodeError, DecodeKind, Envelope, Error, HyperTransport, JsonCodec, Method, Request,
    RequestBuilder, Response, Result, RiposteClient, StatusCode, Transport, Version,
};
pub use serde::{Deserialize, Serialize};
