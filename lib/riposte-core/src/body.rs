//! Response body representations.
//!
//! [`BodyHandling`] is the strategy picked when an exchange is executed; it
//! decides which [`Body`] shape the transport materializes the payload into.
//! The strategy is kept on the envelope so a replayed exchange re-materializes
//! its body identically.

use std::fmt;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use bytes::Bytes;

/// Strategy dictating how a response body is materialized.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyHandling {
    /// Decode the payload as a UTF-8 string ([`Body::Text`]).
    Text,
    /// Keep the raw byte buffer ([`Body::Bytes`]).
    Bytes,
    /// Expose the payload as a readable stream ([`Body::Stream`]).
    Stream,
    /// Split the payload into text lines ([`Body::Lines`]).
    Lines,
    /// Write the payload to the given path ([`Body::File`]).
    File(PathBuf),
    /// Copy the payload into a caller-supplied sink ([`Body::Consumed`]).
    Sink(BodySink),
    /// Drop the payload ([`Body::Empty`]).
    Discard,
}

/// A materialized response body.
///
/// This is a closed set: an exchange produces exactly one of these shapes,
/// determined by the [`BodyHandling`] it was executed with.
#[derive(Debug, Clone)]
pub enum Body {
    /// No body was kept for this exchange.
    Empty,
    /// A decoded text body.
    Text(String),
    /// A body written to a file, referenced by path.
    File(PathBuf),
    /// An open byte stream.
    Stream(BodyStream),
    /// A raw byte buffer.
    Bytes(Bytes),
    /// A sequence of text lines, line terminators stripped.
    Lines(Vec<String>),
    /// A body handed over to a [`BodySink`]; its content is gone.
    Consumed,
}

impl Body {
    /// Short name of the body shape, used in diagnostics.
    #[must_use]
    pub const fn shape(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Text(_) => "text",
            Self::File(_) => "file",
            Self::Stream(_) => "stream",
            Self::Bytes(_) => "bytes",
            Self::Lines(_) => "lines",
            Self::Consumed => "consumed",
        }
    }

    /// Returns `true` if no body was kept.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// A shared, readable response body stream.
///
/// Draining reads the underlying reader to completion but does not close it;
/// the reader stays at EOF and ownership remains with the holder.
#[derive(Clone)]
pub struct BodyStream {
    inner: Arc<Mutex<Box<dyn Read + Send>>>,
}

impl BodyStream {
    /// Wrap a reader into a shareable body stream.
    pub fn new(reader: impl Read + Send + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(reader))),
        }
    }

    /// Read the stream to completion, returning everything left in it.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the underlying reader fails.
    pub fn drain(&self) -> std::io::Result<Vec<u8>> {
        let mut reader = self.inner.lock().unwrap_or_else(PoisonError::into_inner);

        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer)?;
        Ok(buffer)
    }
}

impl fmt::Debug for BodyStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BodyStream").finish_non_exhaustive()
    }
}

/// A shared, writable destination for a response payload.
///
/// Used with [`BodyHandling::Sink`]: the transport copies the payload into
/// the sink and records the body as [`Body::Consumed`].
#[derive(Clone)]
pub struct BodySink {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl BodySink {
    /// Wrap a writer into a shareable body sink.
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// Write the whole chunk into the sink and flush it.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the underlying writer fails.
    pub fn write_all(&self, chunk: &[u8]) -> std::io::Result<()> {
        let mut writer = self.inner.lock().unwrap_or_else(PoisonError::into_inner);

        writer.write_all(chunk)?;
        writer.flush()
    }
}

impl fmt::Debug for BodySink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BodySink").finish_non_exhaustive()
    }
}

// Sinks compare by identity: two handles are equal iff they share a writer.
impl PartialEq for BodySink {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
