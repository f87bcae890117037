//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits
//! for easy glob importing:
//!
//! ```ignore
//! use riposte_core::prelude::*;
//! ```

pub use crate::{
    Body, BodyHandling, BodyPublisher, BodySink, BodyStream, ContentType, DecodeError, DecodeKind,
    DeserializeError, Error, JsonCodec, Method, Request, RequestBuilder, Response, Result,
    StatusCode, Transport, Version,
};
