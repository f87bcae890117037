//! HTTP transport implementation using hyper-util.
//!
//! [`HyperTransport`] performs one exchange over a pooled hyper-util client
//! with rustls TLS, then materializes the payload into the [`Body`] shape
//! dictated by the exchange's [`BodyHandling`] strategy.

use std::collections::HashMap;
use std::io::Cursor;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{Client, connect::HttpConnector},
    rt::TokioExecutor,
};

use riposte_core::{Body, BodyHandling, BodyStream, Error, Request, Response, Result, Transport};

use crate::config::ClientConfig;

/// HTTP transport using hyper-util with connection pooling and rustls TLS.
///
/// # Example
///
/// ```ignore
/// use riposte::{ClientConfig, HyperTransport};
/// use std::time::Duration;
///
/// let transport = HyperTransport::with_config(
///     ClientConfig::builder()
///         .timeout(Duration::from_secs(5))
///         .build(),
/// );
/// ```
#[derive(Clone)]
pub struct HyperTransport {
    inner: Client<HttpsConnector<HttpConnector>, Full<Bytes>>,
    config: ClientConfig,
}

impl std::fmt::Debug for HyperTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperTransport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl HyperTransport {
    /// Create a transport with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a transport with custom configuration.
    #[must_use]
    pub fn with_config(config: ClientConfig) -> Self {
        let connector = https_connector(&config);

        let inner = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_idle_per_host)
            .build(connector);

        Self { inner, config }
    }

    /// Get the transport configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build a hyper request from a riposte request.
    fn build_http_request(request: Request) -> Result<http::Request<Full<Bytes>>> {
        let (method, url, headers, body) = request.into_parts();

        let mut builder = http::Request::builder().method(method).uri(url.as_str());

        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let body = if body.is_empty() {
            Full::default()
        } else {
            Full::new(body.to_bytes())
        };

        builder
            .body(body)
            .map_err(|e| Error::invalid_request(e.to_string()))
    }

    /// Extract response headers as a `HashMap`.
    fn extract_headers(headers: &http::HeaderMap) -> HashMap<String, String> {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect()
    }

    #[allow(clippy::needless_pass_by_value)]
    fn map_hyper_error(err: hyper_util::client::legacy::Error) -> Error {
        let msg = err.to_string();

        if err.is_connect() {
            return Error::connection(msg);
        }

        if msg.contains("ssl") || msg.contains("tls") || msg.contains("certificate") {
            return Error::tls(msg);
        }

        Error::connection(msg)
    }

    /// Materialize a buffered payload into the shape the handling dictates.
    async fn materialize(payload: Bytes, handling: &BodyHandling) -> Result<Body> {
        let body = match handling {
            BodyHandling::Text => Body::Text(String::from_utf8_lossy(&payload).into_owned()),
            BodyHandling::Bytes => Body::Bytes(payload),
            BodyHandling::Stream => Body::Stream(BodyStream::new(Cursor::new(payload.to_vec()))),
            BodyHandling::Lines => Body::Lines(
                String::from_utf8_lossy(&payload)
                    .lines()
                    .map(str::to_owned)
                    .collect(),
            ),
            BodyHandling::File(path) => {
                tokio::fs::write(path, &payload).await?;
                Body::File(path.clone())
            }
            BodyHandling::Sink(sink) => {
                sink.write_all(&payload)?;
                Body::Consumed
            }
            BodyHandling::Discard => Body::Empty,
        };
        Ok(body)
    }
}

impl Default for HyperTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for HyperTransport {
    async fn execute(&self, request: Request, handling: BodyHandling) -> Result<Response> {
        let url = request.url().clone();
        let http_request = Self::build_http_request(request)?;

        let response = tokio::time::timeout(self.config.timeout, self.inner.request(http_request))
            .await
            .map_err(|_| Error::Timeout)?
            .map_err(Self::map_hyper_error)?;

        let status = response.status().as_u16();
        let version = response.version();
        let headers = Self::extract_headers(response.headers());

        let payload = response
            .into_body()
            .collect()
            .await
            .map_err(|e| Error::connection(e.to_string()))?
            .to_bytes();

        let body = Self::materialize(payload, &handling).await?;

        Ok(Response::new(status, url, headers, body).with_version(version))
    }
}

/// Create an HTTPS connector with rustls.
///
/// Supports both HTTP/1.1 and HTTP/2, with TLS enabled using the Mozilla
/// root certificates.
fn https_connector(config: &ClientConfig) -> HttpsConnector<HttpConnector> {
    let root_store: rustls::RootCertStore =
        webpki_roots::TLS_SERVER_ROOTS.iter().cloned().collect();

    let tls_config = rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    let mut http = HttpConnector::new();
    http.set_connect_timeout(Some(config.connect_timeout));
    http.enforce_http(false);

    HttpsConnectorBuilder::new()
        .with_tls_config(tls_config)
        .https_or_http()
        .enable_http1()
        .enable_http2()
        .wrap_connector(http)
}

#[cfg(test)]
mod tests {
    use riposte_core::{BodySink, Method};

    use super::*;

    #[test]
    fn transport_default_config() {
        let transport = HyperTransport::new();
        assert_eq!(
            transport.config().timeout,
            std::time::Duration::from_secs(30)
        );
    }

    #[test]
    fn transport_is_clone_and_debug() {
        let transport = HyperTransport::new();
        let _cloned = transport.clone();
        let debug = format!("{transport:?}");
        assert!(debug.contains("HyperTransport"));
    }

    #[test]
    fn build_http_request_maps_parts() {
        let url = url::Url::parse("http://localhost/users?page=1").expect("url");
        let request = Request::builder(Method::POST, url)
            .header("Accept", "application/json")
            .text(r#"{"name":"test"}"#)
            .build();

        let http_request = HyperTransport::build_http_request(request).expect("request");

        assert_eq!(http_request.method(), &http::Method::POST);
        assert_eq!(http_request.uri(), "http://localhost/users?page=1");
        assert_eq!(
            http_request
                .headers()
                .get("Accept")
                .and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn materialize_text() {
        let body = HyperTransport::materialize(Bytes::from("hello"), &BodyHandling::Text)
            .await
            .expect("materialize");

        let Body::Text(text) = body else {
            panic!("expected a text body");
        };
        assert_eq!(text, "hello");
    }

    #[tokio::test]
    async fn materialize_lines_strips_terminators() {
        let body = HyperTransport::materialize(Bytes::from("one\ntwo\r\nthree"), &BodyHandling::Lines)
            .await
            .expect("materialize");

        let Body::Lines(lines) = body else {
            panic!("expected a lines body");
        };
        assert_eq!(lines, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn materialize_stream_is_drainable() {
        let body = HyperTransport::materialize(Bytes::from("streamed"), &BodyHandling::Stream)
            .await
            .expect("materialize");

        let Body::Stream(stream) = body else {
            panic!("expected a stream body");
        };
        assert_eq!(stream.drain().expect("drain"), b"streamed");
    }

    #[tokio::test]
    async fn materialize_file_writes_payload() {
        let path = std::env::temp_dir().join("riposte-materialize-file-test.json");
        let body = HyperTransport::materialize(
            Bytes::from(r#"{"ok":true}"#),
            &BodyHandling::File(path.clone()),
        )
        .await
        .expect("materialize");

        let Body::File(written) = body else {
            panic!("expected a file body");
        };
        assert_eq!(written, path);
        let content = std::fs::read_to_string(&path).expect("read back");
        assert_eq!(content, r#"{"ok":true}"#);
        std::fs::remove_file(&path).expect("cleanup");
    }

    #[tokio::test]
    async fn materialize_sink_consumes_payload() {
        let sink = BodySink::new(Vec::new());
        let body = HyperTransport::materialize(
            Bytes::from("gone"),
            &BodyHandling::Sink(sink),
        )
        .await
        .expect("materialize");

        assert!(matches!(body, Body::Consumed));
    }

    #[tokio::test]
    async fn materialize_discard_keeps_nothing() {
        let body = HyperTransport::materialize(Bytes::from("dropped"), &BodyHandling::Discard)
            .await
            .expect("materialize");

        assert!(body.is_empty());
    }
}
