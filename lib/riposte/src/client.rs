//! Client facade.
//!
//! [`RiposteClient`] owns the two collaborators of an exchange - a
//! [`Transport`] and a [`JsonCodec`] - and turns every environmental fault
//! into a recoverable [`Result`]. It is long-lived, cheap to clone, and safe
//! to share across threads; it holds no per-exchange state.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use riposte_core::{
    BodyHandling, BodyPublisher, JsonCodec, Request, Response, Result, Transport,
};

use crate::envelope::Envelope;
use crate::transport::HyperTransport;
use crate::{blocking, config::ClientConfig};

/// HTTP client facade returning recoverable results and response envelopes.
///
/// # Example
///
/// ```ignore
/// use riposte::{BodyHandling, Method, Request, RiposteClient};
///
/// let client = RiposteClient::new();
/// let request = Request::builder(Method::GET, "https://api.example.com/users/1".parse()?)
///     .header("Accept", "application/json")
///     .build();
///
/// let envelope = client.send_enveloped_async(request, BodyHandling::Text).await?;
/// let user: User = envelope.decode()?;
/// ```
pub struct RiposteClient<C = HyperTransport> {
    transport: Arc<C>,
    codec: Arc<JsonCodec>,
}

impl RiposteClient<HyperTransport> {
    /// Create a client with a default transport and codec.
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(Arc::new(HyperTransport::new()), Arc::new(JsonCodec::new()))
    }

    /// Create a client with a default codec and a transport built from the
    /// given configuration.
    #[must_use]
    pub fn with_config(config: ClientConfig) -> Self {
        Self::from_parts(
            Arc::new(HyperTransport::with_config(config)),
            Arc::new(JsonCodec::new()),
        )
    }
}

impl Default for RiposteClient<HyperTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> RiposteClient<C> {
    /// Create a client from its two collaborators.
    #[must_use]
    pub const fn from_parts(transport: Arc<C>, codec: Arc<JsonCodec>) -> Self {
        Self { transport, codec }
    }

    /// The transport performing the exchanges.
    #[must_use]
    pub const fn transport(&self) -> &Arc<C> {
        &self.transport
    }

    /// The codec decoding response payloads.
    #[must_use]
    pub const fn codec(&self) -> &Arc<JsonCodec> {
        &self.codec
    }

    /// Replace the transport.
    ///
    /// Returns the client unchanged when `transport` is the very same
    /// instance already held, otherwise a new client sharing the codec.
    #[must_use]
    pub fn with_transport(self, transport: Arc<C>) -> Self {
        if Arc::ptr_eq(&self.transport, &transport) {
            self
        } else {
            Self {
                transport,
                codec: self.codec,
            }
        }
    }

    /// Replace the codec.
    ///
    /// Returns the client unchanged when `codec` is the very same instance
    /// already held, otherwise a new client sharing the transport.
    #[must_use]
    pub fn with_codec(self, codec: Arc<JsonCodec>) -> Self {
        if Arc::ptr_eq(&self.codec, &codec) {
            self
        } else {
            Self {
                transport: self.transport,
                codec,
            }
        }
    }

    /// Wrap a value into a [`BodyPublisher`] by serializing it to JSON.
    ///
    /// Best effort: an absent value or a serialization failure degrades to
    /// [`BodyPublisher::Empty`], recording the reason at `warn` level rather
    /// than surfacing an error.
    #[must_use]
    pub fn json_body<T: Serialize>(&self, value: Option<&T>) -> BodyPublisher {
        let Some(value) = value else {
            warn!("no value to serialize, publishing no body");
            return BodyPublisher::Empty;
        };

        match self.codec.to_json_text(value) {
            Ok(text) => BodyPublisher::Text(text),
            Err(error) => {
                warn!(%error, "unable to serialize request body to JSON, publishing no body");
                BodyPublisher::Empty
            }
        }
    }
}

impl<C: Transport> RiposteClient<C> {
    /// Send a request, returning the raw transport response.
    ///
    /// Every transport-level fault (connection refused, I/O failure,
    /// timeout) comes back as an `Err`, never a panic.
    pub async fn send_async(&self, request: Request, handling: BodyHandling) -> Result<Response> {
        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending request");

        let result = self.transport.execute(request, handling).await;
        match &result {
            Ok(response) => debug!(status = response.status(), "request completed"),
            Err(error) => warn!(%method, %url, %error, "request failed"),
        }
        result
    }

    /// Send a request and wrap the successful response into an [`Envelope`]
    /// bound to this client, the original request, and the handling used.
    pub async fn send_enveloped_async(
        &self,
        request: Request,
        handling: BodyHandling,
    ) -> Result<Envelope<C>> {
        let response = self
            .send_async(request.clone(), handling.clone())
            .await?;
        Ok(Envelope::new(self.clone(), request, handling, response))
    }

    /// Blocking variant of [`send_async`](Self::send_async): parks the
    /// calling thread until the exchange completes.
    ///
    /// # Panics
    ///
    /// Panics if called from within an asynchronous context.
    pub fn send(&self, request: Request, handling: BodyHandling) -> Result<Response> {
        blocking::block_on(self.send_async(request, handling))
    }

    /// Blocking variant of
    /// [`send_enveloped_async`](Self::send_enveloped_async).
    ///
    /// # Panics
    ///
    /// Panics if called from within an asynchronous context.
    pub fn send_enveloped(&self, request: Request, handling: BodyHandling) -> Result<Envelope<C>> {
        blocking::block_on(self.send_enveloped_async(request, handling))
    }
}

impl<C> Clone for RiposteClient<C> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            codec: Arc::clone(&self.codec),
        }
    }
}

impl<C> std::fmt::Debug for RiposteClient<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RiposteClient")
            .field("codec", &self.codec)
            .finish_non_exhaustive()
    }
}
