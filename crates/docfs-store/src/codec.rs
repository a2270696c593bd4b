//! JSON encoding of records.
//!
//! Records are written in one canonical form: pretty-printed JSON followed by
//! a single `\n`. Reads accept any valid JSON document.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::config::Indent;
use crate::error::{StoreError, StoreResult};

/// Serialize `value` as pretty-printed JSON with a trailing newline.
pub fn encode<T: Serialize + ?Sized>(value: &T, indent: Indent) -> StoreResult<Vec<u8>> {
    let mut buf = Vec::with_capacity(128);
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .map_err(|e| StoreError::Encode(e.to_string()))?;
    buf.push(b'\n');
    Ok(buf)
}

/// Deserialize a JSON document into `T`.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> StoreResult<T> {
    serde_json::from_slice(bytes).map_err(|e| StoreError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::BTreeMap;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct User {
        name: String,
        age: String,
    }

    fn tim() -> User {
        User {
            name: "Tim".into(),
            age: "23".into(),
        }
    }

    #[test]
    fn tab_indent_and_trailing_newline() {
        let bytes = encode(&tim(), Indent::Tab).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, "{\n\t\"name\": \"Tim\",\n\t\"age\": \"23\"\n}\n");
    }

    #[test]
    fn space_indent() {
        let bytes = encode(&tim(), Indent::Spaces).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("{\n    \"name\""));
        assert!(text.ends_with("}\n"));
        assert!(!text.ends_with("\n\n"));
    }

    #[test]
    fn decode_accepts_compact_json() {
        let user: User = decode(br#"{"name":"Tim","age":"23"}"#).unwrap();
        assert_eq!(user, tim());
    }

    #[test]
    fn decode_round_trip() {
        let bytes = encode(&tim(), Indent::Tab).unwrap();
        let user: User = decode(&bytes).unwrap();
        assert_eq!(user, tim());
    }

    #[test]
    fn decode_malformed_json() {
        let err = decode::<User>(b"{\"name\": ").unwrap_err();
        assert!(matches!(err, StoreError::Decode(_)));
    }

    #[test]
    fn decode_shape_mismatch() {
        let err = decode::<User>(br#"{"name": 42}"#).unwrap_err();
        assert!(matches!(err, StoreError::Decode(_)));
    }

    #[test]
    fn encode_rejects_non_string_map_keys() {
        let mut map = BTreeMap::new();
        map.insert(vec![1u8], "value");
        let err = encode(&map, Indent::Tab).unwrap_err();
        assert!(matches!(err, StoreError::Encode(_)));
    }
}
