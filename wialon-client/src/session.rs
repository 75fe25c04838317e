//! Session configuration and state.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use wialon_core::{Error, Result};

/// Host the hosted Wialon deployment answers on.
pub const DEFAULT_HOST: &str = "hst-api.wialon.com";

/// Connection coordinates for a [`Session`].
///
/// All fields carry serde defaults, so a partial JSON document is enough to
/// build one. When the coordinates come from configuration data rather than
/// code, [`SessionConfig::from_json`] is the validating constructor: a
/// wrong-typed field (say, a numeric `host`) fails there as a client-side
/// error, before any network activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Transport scheme, normally `https`.
    pub scheme: String,
    /// API host name.
    pub host: String,
    /// Explicit port; `0` means "use the scheme default".
    pub port: u16,
    /// Pre-existing session id to resume, empty to start logged out.
    pub session_id: String,
    /// Parameters merged into every mapping-shaped call.
    pub extra_params: Map<String, Value>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            scheme: "https".to_owned(),
            host: DEFAULT_HOST.to_owned(),
            port: 0,
            session_id: String::new(),
            extra_params: Map::new(),
        }
    }
}

impl SessionConfig {
    /// Parse a config from a JSON document.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|err| Error::sdk(format!("invalid session config: {err}")))
    }
}

/// Local record of one authenticated conversation with the API.
///
/// `session_id` and `user_id` start out as whatever the config supplied
/// (empty by default) and are set by a successful login. Logging out issues
/// a remote call but intentionally leaves both fields in place; the remote
/// side has invalidated the id, the local record just still shows it.
#[derive(Debug, Clone)]
pub struct Session {
    scheme: String,
    host: String,
    port: u16,
    session_id: String,
    user_id: String,
    default_params: Map<String, Value>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Session {
            scheme: config.scheme,
            host: config.host,
            port: config.port,
            session_id: config.session_id,
            user_id: String::new(),
            default_params: config.extra_params,
        }
    }

    /// Base URL every dispatch request starts from.
    ///
    /// `{scheme}://{host}` (with `:{port}` appended when a port is set)
    /// followed by the fixed `/wialon/ajax.html?` suffix. Pure function of
    /// the current state.
    pub fn base_url(&self) -> String {
        let authority = if self.port > 0 {
            format!("{}://{}:{}", self.scheme, self.host, self.port)
        } else {
            format!("{}://{}", self.scheme, self.host)
        };

        format!("{authority}/wialon/ajax.html?")
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Current session token; empty while logged out.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Id of the authenticated user; empty before login.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Parameters merged into every mapping-shaped call.
    pub fn default_params(&self) -> &Map<String, Value> {
        &self.default_params
    }

    pub(crate) fn set_session_id(&mut self, session_id: String) {
        self.session_id = session_id;
    }

    pub(crate) fn set_user_id(&mut self, user_id: String) {
        self.user_id = user_id;
    }
}
