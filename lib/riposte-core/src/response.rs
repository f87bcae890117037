//! Raw HTTP responses.
//!
//! [`Response`] carries the outcome of one exchange: status, final URL,
//! headers, protocol version, the materialized [`Body`], and an optional link
//! to the previous response when the transport followed a redirect.
//! It is read-only after construction.

use std::collections::HashMap;

use http::Version;
use url::Url;

use crate::Body;

/// HTTP response with status, headers, and a materialized body.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    url: Url,
    headers: HashMap<String, String>,
    version: Version,
    body: Body,
    previous: Option<Box<Response>>,
}

impl Response {
    /// Creates a new response with protocol version HTTP/1.1 and no
    /// previous-response link.
    #[must_use]
    pub fn new(status: u16, url: Url, headers: HashMap<String, String>, body: Body) -> Self {
        Self {
            status,
            url,
            headers,
            version: Version::HTTP_11,
            body,
            previous: None,
        }
    }

    /// Sets the protocol version.
    #[must_use]
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    /// Links the response that preceded this one in a redirect chain.
    #[must_use]
    pub fn with_previous(mut self, previous: Self) -> Self {
        self.previous = Some(Box::new(previous));
        self
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// The URL the exchange was performed against.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Response headers.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Protocol version of the exchange.
    #[must_use]
    pub const fn version(&self) -> Version {
        self.version
    }

    /// The materialized response body.
    #[must_use]
    pub const fn body(&self) -> &Body {
        &self.body
    }

    /// Consume into the body.
    #[must_use]
    pub fn into_body(self) -> Body {
        self.body
    }

    /// The response that preceded this one in a redirect chain, if any.
    #[must_use]
    pub fn previous(&self) -> Option<&Self> {
        self.previous.as_deref()
    }

    /// Status is 1xx.
    #[must_use]
    pub const fn is_informational(&self) -> bool {
        self.status >= 100 && self.status < 200
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Status is exactly 200 OK.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.status == 200
    }

    /// Status is 3xx.
    #[must_use]
    pub const fn is_redirection(&self) -> bool {
        self.status >= 300 && self.status < 400
    }

    /// Status is 4xx.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }

    /// Status is 5xx.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status >= 500 && self.status < 600
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    fn url() -> Url {
        Url::parse("http://localhost/test").expect("valid URL")
    }

    fn response(status: u16) -> Response {
        Response::new(status, url(), HashMap::new(), Body::Empty)
    }

    #[test]
    fn response_basic() {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());

        let response = Response::new(
            200,
            url(),
            headers,
            Body::Bytes(Bytes::from(r#"{"id":1}"#)),
        );

        assert_eq!(response.status(), 200);
        assert_eq!(response.header("Content-Type"), Some("application/json"));
        assert_eq!(response.url().as_str(), "http://localhost/test");
        assert_eq!(response.version(), Version::HTTP_11);
        assert!(response.previous().is_none());
    }

    #[test]
    fn exactly_one_range_predicate_holds() {
        for status in 100..=599 {
            let response = response(status);
            let matching = [
                response.is_informational(),
                response.is_success(),
                response.is_redirection(),
                response.is_client_error(),
                response.is_server_error(),
            ]
            .iter()
            .filter(|hit| **hit)
            .count();

            assert_eq!(matching, 1, "status {status} matched {matching} ranges");
        }
    }

    #[test]
    fn out_of_range_statuses_match_nothing() {
        for status in [99, 600] {
            let response = response(status);
            assert!(!response.is_informational());
            assert!(!response.is_success());
            assert!(!response.is_ok());
            assert!(!response.is_redirection());
            assert!(!response.is_client_error());
            assert!(!response.is_server_error());
        }
    }

    #[test]
    fn ok_implies_success() {
        let ok = response(200);
        assert!(ok.is_ok());
        assert!(ok.is_success());

        let created = response(201);
        assert!(!created.is_ok());
        assert!(created.is_success());
    }

    #[test]
    fn range_bounds_are_closed() {
        assert!(response(100).is_informational());
        assert!(response(199).is_informational());
        assert!(response(299).is_success());
        assert!(response(399).is_redirection());
        assert!(response(499).is_client_error());
        assert!(response(599).is_server_error());
    }

    #[test]
    fn previous_response_link() {
        let redirect = response(301);
        let response = response(200).with_previous(redirect);

        let previous = response.previous().expect("previous");
        assert_eq!(previous.status(), 301);
        assert!(previous.previous().is_none());
    }

    #[test]
    fn version_override() {
        let response = response(200).with_version(Version::HTTP_2);
        assert_eq!(response.version(), Version::HTTP_2);
    }
}
