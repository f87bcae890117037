//! JSON (de)serialization.
//!
//! [`JsonCodec`] is the deserialization collaborator owned by the client
//! facade. Decoding is path-aware: error messages include the exact path to
//! the field that failed to deserialize (e.g. `user.address.city`).

use std::io::Read;

use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::DeserializeError;

/// Stateless JSON codec backed by `serde_json`.
///
/// `Option<T>` and newtype wrappers deserialize natively; temporal types come
/// from the serde impls of the target type itself, so the codec carries no
/// configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    /// Create a codec.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Deserialize a value from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns a path-aware error if deserialization fails.
    pub fn decode_str<T: DeserializeOwned>(&self, text: &str) -> Result<T, DeserializeError> {
        let mut deserializer = serde_json::Deserializer::from_str(text);
        serde_path_to_error::deserialize(&mut deserializer).map_err(path_error)
    }

    /// Deserialize a value from a JSON byte slice.
    ///
    /// # Errors
    ///
    /// Returns a path-aware error if deserialization fails.
    pub fn decode_slice<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, DeserializeError> {
        let mut deserializer = serde_json::Deserializer::from_slice(bytes);
        serde_path_to_error::deserialize(&mut deserializer).map_err(path_error)
    }

    /// Deserialize a value by consuming a JSON reader.
    ///
    /// # Errors
    ///
    /// Returns a path-aware error if reading or deserialization fails.
    pub fn decode_reader<T: DeserializeOwned>(
        &self,
        reader: impl Read,
    ) -> Result<T, DeserializeError> {
        let mut deserializer = serde_json::Deserializer::from_reader(reader);
        serde_path_to_error::deserialize(&mut deserializer).map_err(path_error)
    }

    /// Serialize a value to JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn to_json<T: Serialize>(&self, value: &T) -> Result<Bytes, serde_json::Error> {
        serde_json::to_vec(value).map(Bytes::from)
    }

    /// Serialize a value to a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn to_json_text<T: Serialize>(&self, value: &T) -> Result<String, serde_json::Error> {
        serde_json::to_string(value)
    }

    /// Serialize a value to form URL-encoded bytes.
    ///
    /// Uses `serde_html_form`, which supports `Vec<T>` for repeated form
    /// fields (e.g. `tags=a&tags=b&tags=c`).
    ///
    /// # Errors
    ///
    /// Returns an error if form serialization fails.
    pub fn to_form<T: Serialize>(&self, value: &T) -> Result<Bytes, serde_html_form::ser::Error> {
        serde_html_form::to_string(value).map(|s| Bytes::from(s.into_bytes()))
    }
}

fn path_error(error: serde_path_to_error::Error<serde_json::Error>) -> DeserializeError {
    DeserializeError {
        path: error.path().to_string(),
        message: error.inner().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
    struct User {
        name: String,
        age: u32,
    }

    #[test]
    fn decode_str_roundtrip() {
        let user: User = JsonCodec::new()
            .decode_str(r#"{"name":"Alice","age":30}"#)
            .expect("deserialize");

        assert_eq!(
            user,
            User {
                name: "Alice".to_string(),
                age: 30,
            }
        );
    }

    #[test]
    fn decode_slice_roundtrip() {
        let user: User = JsonCodec::new()
            .decode_slice(br#"{"name":"Bob","age":44}"#)
            .expect("deserialize");

        assert_eq!(user.name, "Bob");
    }

    #[test]
    fn decode_reader_consumes_reader() {
        let reader = std::io::Cursor::new(br#"{"name":"Carol","age":25}"#.to_vec());
        let user: User = JsonCodec::new().decode_reader(reader).expect("deserialize");

        assert_eq!(user.name, "Carol");
    }

    #[test]
    fn decode_syntax_error() {
        let result: Result<User, _> = JsonCodec::new().decode_str("not json");

        let err = result.expect_err("should fail");
        // Syntax errors have an empty path
        assert!(err.to_string().contains("JSON deserialization error"));
    }

    #[test]
    fn decode_missing_field_error_with_path() {
        #[derive(Debug, serde::Deserialize)]
        struct Address {
            #[allow(dead_code)]
            city: String,
        }

        #[derive(Debug, serde::Deserialize)]
        struct Profile {
            #[allow(dead_code)]
            address: Address,
        }

        // Missing 'city' field inside 'address'
        let result: Result<Profile, _> = JsonCodec::new().decode_str(r#"{"address":{}}"#);

        let err = result.expect_err("should fail");
        let msg = err.to_string();
        assert!(
            msg.contains("address"),
            "Expected path 'address' in error: {msg}"
        );
        assert!(
            msg.contains("city"),
            "Expected field 'city' mentioned in error: {msg}"
        );
    }

    #[test]
    fn to_json_serialize() {
        let user = User {
            name: "Alice".to_string(),
            age: 30,
        };

        let bytes = JsonCodec::new().to_json(&user).expect("serialize");
        assert_eq!(bytes.as_ref(), br#"{"name":"Alice","age":30}"#);
    }

    #[test]
    fn to_json_text_serialize() {
        let user = User {
            name: "Alice".to_string(),
            age: 30,
        };

        let text = JsonCodec::new().to_json_text(&user).expect("serialize");
        assert_eq!(text, r#"{"name":"Alice","age":30}"#);
    }

    #[test]
    fn to_form_with_vec() {
        #[derive(serde::Serialize)]
        struct TaggedItem {
            name: String,
            tags: Vec<String>,
        }

        let item = TaggedItem {
            name: "test".to_string(),
            tags: vec!["rust".to_string(), "http".to_string()],
        };

        let bytes = JsonCodec::new().to_form(&item).expect("serialize");
        let result = String::from_utf8(bytes.to_vec()).expect("utf8");
        // serde_html_form supports repeated params for Vec<T>
        assert!(result.contains("name=test"));
        assert!(result.contains("tags=rust"));
        assert!(result.contains("tags=http"));
    }
}
