//! The response envelope.
//!
//! [`Envelope`] wraps one completed exchange: the raw [`Response`], the
//! original [`Request`], the [`BodyHandling`] strategy used, and the
//! [`RiposteClient`] that produced it. The envelope is immutable; replaying
//! the exchange always produces a new envelope.

use std::fs::File;
use std::io::BufReader;

use serde::de::DeserializeOwned;

use riposte_core::{
    Body, BodyHandling, DecodeError, DecodeKind, Request, Response, Result, Transport, Version,
};

use crate::client::RiposteClient;
use crate::transport::HyperTransport;

/// Immutable wrapper around one completed HTTP exchange.
///
/// On top of the raw response data, the envelope provides:
/// - status classification ([`is_success`](Self::is_success) and friends)
/// - conditional actions ([`on_ok`](Self::on_ok), [`on_success`](Self::on_success),
///   [`on_failure`](Self::on_failure))
/// - typed body decoding ([`decode`](Self::decode),
///   [`decode_for_status`](Self::decode_for_status))
/// - replay of the original exchange ([`retry`](Self::retry),
///   [`retry_async`](Self::retry_async))
pub struct Envelope<C = HyperTransport> {
    client: RiposteClient<C>,
    request: Request,
    handling: BodyHandling,
    response: Response,
}

impl<C: Transport> Envelope<C> {
    /// Wrap a completed exchange.
    #[must_use]
    pub const fn new(
        client: RiposteClient<C>,
        request: Request,
        handling: BodyHandling,
        response: Response,
    ) -> Self {
        Self {
            client,
            request,
            handling,
            response,
        }
    }

    // ========================================================================
    // Exchange data
    // ========================================================================

    /// The client that performed the exchange.
    #[must_use]
    pub const fn client(&self) -> &RiposteClient<C> {
        &self.client
    }

    /// The original request, kept for replay.
    #[must_use]
    pub const fn request(&self) -> &Request {
        &self.request
    }

    /// The body-handling strategy the exchange was executed with.
    #[must_use]
    pub const fn handling(&self) -> &BodyHandling {
        &self.handling
    }

    /// The wrapped raw response.
    #[must_use]
    pub const fn response(&self) -> &Response {
        &self.response
    }

    /// Unwrap into the raw response.
    #[must_use]
    pub fn into_response(self) -> Response {
        self.response
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.response.status()
    }

    /// Response headers.
    #[must_use]
    pub const fn headers(&self) -> &std::collections::HashMap<String, String> {
        self.response.headers()
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.response.header(name)
    }

    /// The URL the exchange was performed against.
    #[must_use]
    pub const fn url(&self) -> &url::Url {
        self.response.url()
    }

    /// Protocol version of the exchange.
    #[must_use]
    pub const fn version(&self) -> Version {
        self.response.version()
    }

    /// The materialized response body.
    #[must_use]
    pub const fn body(&self) -> &Body {
        self.response.body()
    }

    /// The response that preceded this one in a redirect chain, if any.
    #[must_use]
    pub fn previous(&self) -> Option<&Response> {
        self.response.previous()
    }

    // ========================================================================
    // Status classification
    // ========================================================================

    /// Status is 1xx.
    #[must_use]
    pub const fn is_informational(&self) -> bool {
        self.response.is_informational()
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.response.is_success()
    }

    /// Status is exactly 200 OK.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.response.is_ok()
    }

    /// Status is 3xx.
    #[must_use]
    pub const fn is_redirection(&self) -> bool {
        self.response.is_redirection()
    }

    /// Status is 4xx.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.response.is_client_error()
    }

    /// Status is 5xx.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.response.is_server_error()
    }

    // ========================================================================
    // Conditional actions
    // ========================================================================

    /// Run `action` if the status is exactly 200 OK, then return the
    /// envelope for chaining.
    pub fn on_ok(&self, action: impl FnOnce()) -> &Self {
        self.run(action, self.is_ok())
    }

    /// Run `action` if the status is 2xx, then return the envelope for
    /// chaining.
    pub fn on_success(&self, action: impl FnOnce()) -> &Self {
        self.run(action, self.is_success())
    }

    /// Run `action` if the status is not 2xx, then return the envelope for
    /// chaining.
    pub fn on_failure(&self, action: impl FnOnce()) -> &Self {
        self.run(action, !self.is_success())
    }

    fn run(&self, action: impl FnOnce(), should_run: bool) -> &Self {
        if should_run {
            action();
        }
        self
    }

    // ========================================================================
    // Body decoding
    // ========================================================================

    /// Decode the response body into a `T`, whatever shape the body was
    /// materialized into.
    ///
    /// Dispatches on the body tag in a fixed order: text, file, stream,
    /// bytes, lines. A file is opened, read, and its handle released; a
    /// stream is drained to completion but left open.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] carrying the materialized body value when
    /// the body is empty ([`DecodeKind::EmptyBody`]), when its shape cannot
    /// be decoded ([`DecodeKind::Unsupported`]), or when reading or
    /// deserialization fails.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, DecodeError> {
        let codec = self.client.codec();

        match self.response.body() {
            Body::Text(text) => codec.decode_str(text).map_err(|e| self.decode_error(e)),
            Body::File(path) => {
                let file = File::open(path).map_err(|e| self.decode_error(e))?;
                codec
                    .decode_reader(BufReader::new(file))
                    .map_err(|e| self.decode_error(e))
            }
            Body::Stream(stream) => {
                let buffered = stream.drain().map_err(|e| self.decode_error(e))?;
                codec
                    .decode_slice(&buffered)
                    .map_err(|e| self.decode_error(e))
            }
            Body::Bytes(bytes) => codec.decode_slice(bytes).map_err(|e| self.decode_error(e)),
            Body::Lines(lines) => codec
                .decode_str(&lines.concat())
                .map_err(|e| self.decode_error(e)),
            Body::Empty => Err(self.decode_error(DecodeKind::EmptyBody)),
            Body::Consumed => {
                Err(self.decode_error(DecodeKind::Unsupported(self.response.body().shape())))
            }
        }
    }

    /// Decode the response body only when the envelope's status equals
    /// `status`; otherwise return `Ok(None)` without touching the codec.
    ///
    /// # Errors
    ///
    /// On a status match, propagates the same errors as
    /// [`decode`](Self::decode).
    pub fn decode_for_status<T: DeserializeOwned>(
        &self,
        status: u16,
    ) -> Result<Option<T>, DecodeError> {
        if self.status() == status {
            self.decode().map(Some)
        } else {
            Ok(None)
        }
    }

    fn decode_error(&self, kind: impl Into<DecodeKind>) -> DecodeError {
        DecodeError::new(kind, self.response.body().clone())
    }

    // ========================================================================
    // Replay
    // ========================================================================

    /// Replay the original exchange, blocking until it completes.
    ///
    /// Uses the stored request and body-handling strategy unchanged and
    /// produces a brand-new envelope; this envelope is untouched either way.
    ///
    /// # Errors
    ///
    /// Returns an error if the replayed exchange fails.
    ///
    /// # Panics
    ///
    /// Panics if called from within an asynchronous context.
    pub fn retry(&self) -> Result<Self> {
        self.client
            .send_enveloped(self.request.clone(), self.handling.clone())
    }

    /// Replay the original exchange asynchronously.
    ///
    /// # Errors
    ///
    /// Returns an error if the replayed exchange fails.
    pub async fn retry_async(&self) -> Result<Self> {
        self.client
            .send_enveloped_async(self.request.clone(), self.handling.clone())
            .await
    }
}

impl<C> Clone for Envelope<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            request: self.request.clone(),
            handling: self.handling.clone(),
            response: self.response.clone(),
        }
    }
}

impl<C> std::fmt::Debug for Envelope<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Envelope")
            .field("request", &self.request)
            .field("handling", &self.handling)
            .field("response", &self.response)
            .finish_non_exhaustive()
    }
}
