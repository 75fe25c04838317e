// Wialon Remote API dispatcher.
// Turns an arbitrary method name into a remote call: resolve the service
// path, merge the arguments with the session defaults, POST, then classify
// the response as a payload, a protocol error or a client-side failure.

use reqwest::blocking::Client as HttpClient;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, trace};
use wialon_core::{assemble_params, resolve_service, CallRequest, Error, Result, UNHANDLED_ERROR_CODE};

use crate::session::{Session, SessionConfig};

/// Flag set the geocoder defaults to when the caller has no opinion.
pub const DEFAULT_GEOCODING_FLAGS: u64 = 1_255_211_008;

/// Blocking client for the Remote API.
///
/// Owns the [`Session`] it authenticates; every operation issues one
/// blocking request and returns before the caller proceeds. There is no
/// internal locking, queuing or retry; concurrent use from several threads
/// needs external synchronization, which the `&mut self` on [`Client::login`]
/// already forces at the type level.
#[derive(Debug)]
pub struct Client {
    session: Session,
    http: HttpClient,
}

impl Client {
    /// Create a client for the given connection coordinates.
    pub fn new(config: SessionConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .build()
            .map_err(|err| Error::sdk(format!("failed to build HTTP client: {err}")))?;

        Ok(Client {
            session: Session::new(config),
            http,
        })
    }

    /// Create a client for a non-default host, keeping every other default.
    pub fn with_host(host: &str) -> Result<Self> {
        Self::new(SessionConfig {
            host: host.to_owned(),
            ..SessionConfig::default()
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Invoke an arbitrary remote procedure.
    ///
    /// Any string is a valid method name; it resolves to a service path per
    /// [`resolve_service`] and no enumeration of legal names exists. `args`
    /// may be a JSON object (merged over the session defaults, caller keys
    /// winning), an array (sent as-is, defaults skipped) or `null` (defaults
    /// alone). The successful payload is returned verbatim, object or array,
    /// exactly as the server shaped it.
    ///
    /// ```no_run
    /// use serde_json::json;
    /// use wialon_client::{Client, SessionConfig};
    ///
    /// let client = Client::new(SessionConfig::default())?;
    /// let units = client.call("core_search_items", json!({
    ///     "spec": {
    ///         "itemsType": "avl_unit",
    ///         "propName": "sys_name",
    ///         "propValueMask": "*",
    ///         "sortType": "sys_name",
    ///     },
    ///     "force": 1,
    ///     "flags": 1,
    ///     "from": 0,
    ///     "to": 0,
    /// }))?;
    /// # Ok::<(), wialon_client::Error>(())
    /// ```
    pub fn call(&self, method: &str, args: Value) -> Result<Value> {
        let svc = resolve_service(method);
        let params = assemble_params(&args, self.session.default_params())?;
        let request = CallRequest::new(svc, self.session.session_id(), params);

        debug!(
            method,
            svc = %request.svc,
            params = %request.params,
            session_id = %request.sid,
            "dispatching remote call"
        );

        let url = format!("{}{}", self.session.base_url(), request.query_string());
        trace!(url = %url, "request url");

        classify(self.post_json(&url)?)
    }

    /// Authenticate with an API token.
    ///
    /// Invokes `token_login` and, on success, stores the returned `user.id`
    /// and `eid` into the session before handing back the full response.
    pub fn login(&mut self, token: &str) -> Result<Value> {
        let response = self.call("token_login", json!({ "token": token }))?;

        let user_id = response
            .get("user")
            .and_then(|user| user.get("id"))
            .map(id_string)
            .ok_or_else(|| Error::sdk("login response is missing user.id"))?;
        let session_id = response
            .get("eid")
            .map(id_string)
            .ok_or_else(|| Error::sdk("login response is missing eid"))?;

        self.session.set_user_id(user_id);
        self.session.set_session_id(session_id);

        Ok(response)
    }

    /// Invalidate the session on the server.
    ///
    /// The local `session_id`/`user_id` are left in place; the id is dead
    /// remotely whether or not the record still shows it.
    pub fn logout(&self) -> Result<Value> {
        self.call("core_logout", Value::Null)
    }

    /// Resolve coordinates to an address through the geocoding endpoint.
    ///
    /// This is a sibling protocol, not a dispatch variant: it talks to
    /// `geocode-maps.{host}` with its own query shape and returns element 0
    /// of the JSON array the geocoder answers with. Pass
    /// [`DEFAULT_GEOCODING_FLAGS`] unless the deployment needs otherwise.
    pub fn reverse_geocoding(&self, latitude: f64, longitude: f64, flags: u64) -> Result<Value> {
        let coords = serde_json::to_string(&GeocodePoint {
            lon: longitude,
            lat: latitude,
        })?;
        let url = geocoding_url(
            self.session.host(),
            &coords,
            flags,
            self.session.user_id(),
        );

        debug!(latitude, longitude, flags, "reverse geocoding");
        trace!(url = %url, "geocoding request url");

        let response = self.post_json(&url)?;
        response
            .get(0)
            .cloned()
            .ok_or_else(|| Error::sdk("geocoding response has no elements"))
    }

    // Shared transport primitive: POST with no body, parse the body as JSON.
    fn post_json(&self, url: &str) -> Result<Value> {
        let response = self
            .http
            .post(url)
            .send()
            .map_err(|err| Error::sdk(format!("failed to send request: {err}")))?;

        response
            .json()
            .map_err(|err| Error::sdk(format!("failed to parse response as JSON: {err}")))
    }
}

// Field order matters on the wire: the geocoder expects lon before lat.
#[derive(Serialize)]
struct GeocodePoint {
    lon: f64,
    lat: f64,
}

fn geocoding_url(host: &str, coords: &str, flags: u64, uid: &str) -> String {
    format!("https://geocode-maps.{host}/gis_geocode?coords=[{coords}]&flags={flags}&uid={uid}")
}

/// Split a parsed response into payload and protocol error.
///
/// An object carrying an `error` member that is not numerically zero is a
/// protocol error; the code comes from `error` (integer, or a string that
/// parses as one; anything else collapses to the sentinel) and the reason
/// from `reason` when present. Every other value is the payload, returned
/// untouched.
fn classify(response: Value) -> Result<Value> {
    if let Some(code_value) = response.as_object().and_then(|obj| obj.get("error")) {
        if !is_numeric_zero(code_value) {
            let reason = response
                .get("reason")
                .and_then(Value::as_str)
                .unwrap_or_default();
            return Err(Error::api(error_code(code_value), reason));
        }
    }

    Ok(response)
}

fn is_numeric_zero(value: &Value) -> bool {
    value.as_i64() == Some(0) || value.as_f64() == Some(0.0)
}

fn error_code(value: &Value) -> i64 {
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|code| code.parse().ok()))
        .unwrap_or(UNHANDLED_ERROR_CODE)
}

fn id_string(value: &Value) -> String {
    match value {
        Value::String(id) => id.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_passes_error_free_objects_through() {
        let payload = json!({"items": [], "searchSpec": {"itemsType": "avl_unit"}});
        assert_eq!(classify(payload.clone()).unwrap(), payload);
    }

    #[test]
    fn test_classify_treats_zero_error_as_success() {
        let payload = json!({"error": 0, "items": [1, 2]});
        assert_eq!(classify(payload.clone()).unwrap(), payload);
    }

    #[test]
    fn test_classify_passes_arrays_through() {
        let payload = json!([{"error": 7}]);
        assert_eq!(classify(payload.clone()).unwrap(), payload);
    }

    #[test]
    fn test_classify_known_error_code() {
        let err = classify(json!({"error": 7})).unwrap_err();
        assert_eq!(
            err,
            Error::Api {
                code: 7,
                reason: "Access denied".to_owned(),
            }
        );
    }

    #[test]
    fn test_classify_unknown_error_code() {
        let err = classify(json!({"error": 9999})).unwrap_err();
        assert_eq!(
            err,
            Error::Api {
                code: UNHANDLED_ERROR_CODE,
                reason: "Unhandled error code".to_owned(),
            }
        );
    }

    #[test]
    fn test_classify_appends_server_reason() {
        let err = classify(json!({"error": 4, "reason": "VALIDATE_PARAMS_ERROR"})).unwrap_err();
        assert_eq!(
            err,
            Error::Api {
                code: 4,
                reason: "Invalid input - VALIDATE_PARAMS_ERROR".to_owned(),
            }
        );
    }

    #[test]
    fn test_classify_accepts_stringy_codes() {
        let err = classify(json!({"error": "7"})).unwrap_err();
        assert_eq!(
            err,
            Error::Api {
                code: 7,
                reason: "Access denied".to_owned(),
            }
        );
    }

    #[test]
    fn test_classify_string_zero_is_still_an_error() {
        // Only numeric zero means success; "0" parses to a code absent from
        // the table and normalizes to the sentinel.
        let err = classify(json!({"error": "0"})).unwrap_err();
        assert_eq!(
            err,
            Error::Api {
                code: UNHANDLED_ERROR_CODE,
                reason: "Unhandled error code".to_owned(),
            }
        );
    }

    #[test]
    fn test_error_code_coercions() {
        assert_eq!(error_code(&json!(1004)), 1004);
        assert_eq!(error_code(&json!("1004")), 1004);
        assert_eq!(error_code(&json!(7.5)), UNHANDLED_ERROR_CODE);
        assert_eq!(error_code(&json!(null)), UNHANDLED_ERROR_CODE);
        assert_eq!(error_code(&json!("seven")), UNHANDLED_ERROR_CODE);
    }

    #[test]
    fn test_id_string_keeps_strings_and_renders_numbers() {
        assert_eq!(id_string(&json!("U1")), "U1");
        assert_eq!(id_string(&json!(604800)), "604800");
    }

    #[test]
    fn test_geocoding_url_shape() {
        let url = geocoding_url(
            "hst-api.wialon.com",
            r#"{"lon":-99.133209,"lat":19.432608}"#,
            DEFAULT_GEOCODING_FLAGS,
            "U1",
        );
        assert_eq!(
            url,
            "https://geocode-maps.hst-api.wialon.com/gis_geocode?\
             coords=[{\"lon\":-99.133209,\"lat\":19.432608}]&flags=1255211008&uid=U1"
        );
    }

    #[test]
    fn test_client_creation() {
        let client = Client::new(SessionConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_with_host_overrides_only_the_host() {
        let client = Client::with_host("local.test").unwrap();
        assert_eq!(client.session().host(), "local.test");
        assert_eq!(client.session().scheme(), "https");
        assert_eq!(client.session().port(), 0);
    }
}
