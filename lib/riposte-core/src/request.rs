//! HTTP request building.
//!
//! [`Request`] is an immutable descriptor of one exchange: method, URL,
//! headers, and the [`BodyPublisher`] strategy. It is cheap to clone and
//! compares structurally, so a replayed exchange can be checked against the
//! original request.
//!
//! # Example
//!
//! ```
//! use riposte_core::{Method, Request};
//!
//! let request = Request::builder(Method::GET, "https://api.example.com".parse().unwrap())
//!     .header("Accept", "application/json")
//!     .query("page", "1")
//!     .build();
//! ```

use std::collections::HashMap;

use bytes::Bytes;
use http::Method;
use url::Url;

use crate::{JsonCodec, Result};

/// Request body publishing strategy.
///
/// Captured on the request so a replayed exchange publishes exactly the same
/// payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum BodyPublisher {
    /// No request body.
    #[default]
    Empty,
    /// A UTF-8 text body.
    Text(String),
    /// A raw byte body.
    Bytes(Bytes),
}

impl BodyPublisher {
    /// Returns `true` if no body will be published.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The bytes this publisher will put on the wire.
    #[must_use]
    pub fn to_bytes(&self) -> Bytes {
        match self {
            Self::Empty => Bytes::new(),
            Self::Text(text) => Bytes::copy_from_slice(text.as_bytes()),
            Self::Bytes(bytes) => bytes.clone(),
        }
    }
}

/// Content type for request bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// JSON content type (`application/json`).
    Json,
    /// Form URL-encoded content type (`application/x-www-form-urlencoded`).
    FormUrlEncoded,
}

impl ContentType {
    /// Get the MIME type string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::FormUrlEncoded => "application/x-www-form-urlencoded",
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An immutable HTTP request with method, URL, headers, and body publisher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    url: Url,
    headers: HashMap<String, String>,
    body: BodyPublisher,
}

impl Request {
    /// Creates a new [`RequestBuilder`].
    #[must_use]
    pub fn builder(method: Method, url: Url) -> RequestBuilder {
        RequestBuilder::new(method, url)
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Request URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Request headers.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Body publishing strategy.
    #[must_use]
    pub const fn body(&self) -> &BodyPublisher {
        &self.body
    }

    /// Consume into (method, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (Method, Url, HashMap<String, String>, BodyPublisher) {
        (self.method, self.url, self.headers, self.body)
    }
}

/// Builder for constructing [`Request`] instances.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: Url,
    headers: HashMap<String, String>,
    body: BodyPublisher,
}

impl RequestBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HashMap::new(),
            body: BodyPublisher::Empty,
        }
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets multiple headers.
    #[must_use]
    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Appends a query parameter to the URL.
    #[must_use]
    pub fn query(mut self, name: &str, value: &str) -> Self {
        self.url.query_pairs_mut().append_pair(name, value);
        self
    }

    /// Appends multiple query parameters to the URL.
    #[must_use]
    pub fn query_pairs(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        {
            let mut query = self.url.query_pairs_mut();
            for (name, value) in pairs {
                query.append_pair(&name, &value);
            }
        }
        self
    }

    /// Sets the body publishing strategy.
    #[must_use]
    pub fn publisher(mut self, body: BodyPublisher) -> Self {
        self.body = body;
        self
    }

    /// Sets a text body.
    #[must_use]
    pub fn text(self, text: impl Into<String>) -> Self {
        self.publisher(BodyPublisher::Text(text.into()))
    }

    /// Sets a raw byte body.
    #[must_use]
    pub fn bytes(self, bytes: impl Into<Bytes>) -> Self {
        self.publisher(BodyPublisher::Bytes(bytes.into()))
    }

    /// Set a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn json<T: serde::Serialize>(self, value: &T) -> Result<Self> {
        let body = JsonCodec::new().to_json_text(value)?;
        Ok(self
            .header("Content-Type", ContentType::Json.as_str())
            .text(body))
    }

    /// Set a form URL-encoded body.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn form<T: serde::Serialize>(self, value: &T) -> Result<Self> {
        let body = JsonCodec::new().to_form(value)?;
        Ok(self
            .header("Content-Type", ContentType::FormUrlEncoded.as_str())
            .bytes(body))
    }

    /// Builds the [`Request`].
    #[must_use]
    pub fn build(self) -> Request {
        Request {
            method: self.method,
            url: self.url,
            headers: self.headers,
            body: self.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_builder_basic() {
        let url = Url::parse("https://api.example.com/users").expect("valid URL");
        let request = Request::builder(Method::GET, url.clone())
            .header("Accept", "application/json")
            .build();

        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.url().as_str(), "https://api.example.com/users");
        assert_eq!(request.header("Accept"), Some("application/json"));
        assert!(request.body().is_empty());
    }

    #[test]
    fn request_builder_with_query() {
        let url = Url::parse("https://api.example.com/users").expect("valid URL");
        let request = Request::builder(Method::GET, url)
            .query("page", "1")
            .query("limit", "10")
            .build();

        assert_eq!(
            request.url().as_str(),
            "https://api.example.com/users?page=1&limit=10"
        );
    }

    #[test]
    fn request_builder_with_text_body() {
        let url = Url::parse("https://api.example.com/users").expect("valid URL");
        let request = Request::builder(Method::POST, url).text("hello").build();

        assert_eq!(
            request.body(),
            &BodyPublisher::Text("hello".to_string())
        );
        assert_eq!(request.body().to_bytes().as_ref(), b"hello");
    }

    #[test]
    fn request_builder_json() {
        #[derive(serde::Serialize)]
        struct User {
            name: String,
        }

        let url = Url::parse("https://api.example.com/users").expect("valid URL");
        let request = Request::builder(Method::POST, url)
            .json(&User {
                name: "test".to_string(),
            })
            .expect("json")
            .build();

        assert_eq!(request.header("Content-Type"), Some("application/json"));
        assert_eq!(
            request.body(),
            &BodyPublisher::Text(r#"{"name":"test"}"#.to_string())
        );
    }

    #[test]
    fn request_builder_form() {
        #[derive(serde::Serialize)]
        struct Login {
            username: String,
            password: String,
        }

        let url = Url::parse("https://api.example.com/login").expect("valid URL");
        let request = Request::builder(Method::POST, url)
            .form(&Login {
                username: "alice".to_string(),
                password: "secret".to_string(),
            })
            .expect("form")
            .build();

        assert_eq!(
            request.header("Content-Type"),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(
            request.body().to_bytes().as_ref(),
            b"username=alice&password=secret"
        );
    }

    #[test]
    fn request_replay_equality() {
        let url = Url::parse("https://api.example.com/users").expect("valid URL");
        let request = Request::builder(Method::PUT, url)
            .header("Accept", "application/json")
            .text("{}")
            .build();

        assert_eq!(request.clone(), request);
    }

    #[test]
    fn content_type_display() {
        assert_eq!(ContentType::Json.to_string(), "application/json");
        assert_eq!(
            ContentType::FormUrlEncoded.as_str(),
            "application/x-www-form-urlencoded"
        );
    }
}
