//! Request assembly for the `ajax.html` dispatch endpoint.
//!
//! A call travels as three query parameters in a fixed order: `svc` (the
//! resolved service path), `sid` (the current session id) and `params` (the
//! call arguments as a JSON string). The params JSON is embedded in the
//! query string as-is, without percent-encoding; the server depends on this
//! framing, so it is reproduced here rather than normalized.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Serialize call arguments into the `params` JSON string.
///
/// Mapping-shaped arguments are merged over a copy of the session's default
/// parameters, caller keys winning on collision. Sequence-shaped arguments
/// are serialized as-is and the defaults are skipped entirely. `null` stands
/// for "no arguments" and yields the defaults alone. Any other shape is
/// rejected as a client-side failure.
pub fn assemble_params(args: &Value, defaults: &Map<String, Value>) -> Result<String> {
    match args {
        Value::Object(map) => {
            let mut merged = defaults.clone();
            for (key, value) in map {
                merged.insert(key.clone(), value.clone());
            }
            Ok(serde_json::to_string(&Value::Object(merged))?)
        }
        Value::Array(_) => Ok(serde_json::to_string(args)?),
        Value::Null => Ok(serde_json::to_string(&Value::Object(defaults.clone()))?),
        other => Err(Error::sdk(format!(
            "call params must be a JSON object or array, got {other}"
        ))),
    }
}

/// One dispatch request. Built fresh for every invocation, never reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRequest {
    pub svc: String,
    pub sid: String,
    pub params: String,
}

impl CallRequest {
    pub fn new(svc: impl Into<String>, sid: impl Into<String>, params: impl Into<String>) -> Self {
        CallRequest {
            svc: svc.into(),
            sid: sid.into(),
            params: params.into(),
        }
    }

    /// Render the query-string tail, `svc=..&sid=..&params=..&`.
    ///
    /// Every pair carries a trailing `&` and the params value is embedded
    /// raw; appending this to the session base URL gives the final request
    /// target.
    pub fn query_string(&self) -> String {
        format!("svc={}&sid={}&params={}&", self.svc, self.sid, self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn defaults() -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("lang".to_owned(), json!("en"));
        map.insert("flags".to_owned(), json!(1));
        map
    }

    #[test]
    fn test_mapping_args_merge_defaults() {
        let params = assemble_params(&json!({"spec": {"itemsType": "avl_unit"}}), &defaults())
            .unwrap();
        let parsed: Value = serde_json::from_str(&params).unwrap();

        assert_eq!(parsed["lang"], json!("en"));
        assert_eq!(parsed["flags"], json!(1));
        assert_eq!(parsed["spec"]["itemsType"], json!("avl_unit"));
    }

    #[test]
    fn test_caller_keys_win_on_collision() {
        let params = assemble_params(&json!({"flags": 4097}), &defaults()).unwrap();
        let parsed: Value = serde_json::from_str(&params).unwrap();

        assert_eq!(parsed["flags"], json!(4097));
        assert_eq!(parsed["lang"], json!("en"));
    }

    #[test]
    fn test_sequence_args_skip_defaults() {
        let params = assemble_params(&json!([{"id": 1}, {"id": 2}]), &defaults()).unwrap();
        assert_eq!(params, r#"[{"id":1},{"id":2}]"#);
    }

    #[test]
    fn test_null_args_yield_defaults_only() {
        let params = assemble_params(&Value::Null, &defaults()).unwrap();
        let parsed: Value = serde_json::from_str(&params).unwrap();

        assert_eq!(parsed, json!({"lang": "en", "flags": 1}));
    }

    #[test]
    fn test_null_args_with_empty_defaults() {
        let params = assemble_params(&Value::Null, &Map::new()).unwrap();
        assert_eq!(params, "{}");
    }

    #[test]
    fn test_scalar_args_are_rejected() {
        let err = assemble_params(&json!(42), &Map::new()).unwrap_err();
        assert!(err.is_sdk());

        let err = assemble_params(&json!("oops"), &Map::new()).unwrap_err();
        assert!(err.is_sdk());
    }

    #[test]
    fn test_query_string_order_and_trailing_separator() {
        let request = CallRequest::new("core/search_items", "abc123", r#"{"flags":1}"#);
        assert_eq!(
            request.query_string(),
            r#"svc=core/search_items&sid=abc123&params={"flags":1}&"#
        );
    }

    #[test]
    fn test_query_string_with_empty_sid() {
        let request = CallRequest::new("token/login", "", r#"{"token":"tok"}"#);
        assert_eq!(
            request.query_string(),
            r#"svc=token/login&sid=&params={"token":"tok"}&"#
        );
    }
}
