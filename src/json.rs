//! JSON parsing and serialization that return results.
//!
//! These are [`serde_json`] with its errors turned into
//! [`Err::primitive`][crate::Err::primitive] values, so the code of a failed
//! call is the [`serde_json::Error`] itself:
//!
//! ```
//! use okerr::json;
//! use serde_json::error::Category;
//!
//! let parsed = json::parse::<serde_json::Value>("not json");
//! assert_eq!(parsed.error().map(|e| e.classify()), Some(Category::Syntax));
//!
//! let fallback = json::parse::<Vec<u8>>("[1, 2").or(Vec::new());
//! assert!(fallback.is_empty());
//! ```

use crate::result::Result;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Parses `text` as JSON into a `T`.
pub fn parse<T: DeserializeOwned>(text: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(text).into()
}

/// Parses a JSON byte slice into a `T`.
pub fn parse_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, serde_json::Error> {
    serde_json::from_slice(bytes).into()
}

/// Serializes `value` as a compact JSON string.
pub fn stringify<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(value).into()
}

/// Serializes `value` as an indented JSON string.
pub fn stringify_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value).into()
}

/*  _            _
 * | |_ ___  ___| |_
 * | __/ _ \/ __| __|
 * | ||  __/\__ \ |_
 *  \__\___||___/\__|
 *  FIGLET: test
 */

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::err;
    use serde::{Deserialize, Serialize};
    use serde_json::error::Category;
    use serde_json::{json, Value};
    use std::collections::BTreeMap;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct User {
        name: String,
        age: u8,
    }

    #[test]
    fn parse_valid_input() {
        let user: User = parse(r#"{"name":"ada","age":36}"#).or_throw();
        assert_eq!(
            user,
            User {
                name: "ada".to_string(),
                age: 36
            }
        );
    }

    #[test]
    fn parsed_value_is_taken_out_of_the_ok() {
        let port = match parse::<Value>(r#"{"port": 8080}"#) {
            Result::Ok(value) => value.into_value(),
            Result::Err(_) => Value::Null,
        };
        assert_eq!(port.get("port").and_then(Value::as_u64), Some(8080));
    }

    #[test]
    fn parse_malformed_input_is_a_syntax_error() {
        let result = parse::<Value>("not json");
        assert!(result.is_err());

        let err = result.into_err().unwrap();
        assert_eq!(err.error().classify(), Category::Syntax);
        assert!(err.message().is_none());
        assert!(err.cause().is_none());
    }

    #[test]
    fn parse_wrong_shape_is_a_data_error() {
        let result = parse::<User>(r#"{"name":"ada","age":"old"}"#);
        assert_eq!(result.error().map(|e| e.classify()), Some(Category::Data));
    }

    #[test]
    fn parse_truncated_input_is_an_eof_error() {
        let result = parse_slice::<Value>(b"[1, 2");
        assert_eq!(result.error().map(|e| e.classify()), Some(Category::Eof));
    }

    #[test]
    fn parse_error_can_be_a_cause() {
        let result = parse::<Value>("{");
        let (parse_error, _) = result.into_err().unwrap().into_parts();

        let outer = err("BadConfig").with_cause(parse_error);
        let links: Vec<_> = outer.cause_chain().collect();
        assert_eq!(links.len(), 2);
        assert!(links[1].downcast_native::<serde_json::Error>().is_some());
    }

    #[test]
    fn stringify_values() {
        assert_eq!(
            stringify(&json!({"a": [1, 2]})).or_none().as_deref(),
            Some(r#"{"a":[1,2]}"#)
        );
        assert_eq!(stringify("text").or_none().as_deref(), Some("\"text\""));
        assert_eq!(
            stringify_pretty(&json!([1])).or_none().as_deref(),
            Some("[\n  1\n]")
        );
    }

    #[test]
    fn stringify_unrepresentable_map_key_fails() {
        let mut map = BTreeMap::new();
        map.insert(vec![1u8], "value");

        let result = stringify(&map);
        assert!(result.is_err());
        assert!(result.or_none().is_none());
    }
}
