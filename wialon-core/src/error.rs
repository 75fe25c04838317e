use thiserror::Error as ThisError;

/// Sentinel code that unknown server error codes normalize to.
pub const UNHANDLED_ERROR_CODE: i64 = -1;

const UNHANDLED_DESCRIPTION: &str = "Unhandled error code";

/// Convenient result alias used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while talking to the Remote API.
///
/// Exactly two kinds exist and both are terminal for the current call:
/// [`Error::Sdk`] for failures produced on this side of the wire (bad
/// configuration, serialization, transport, malformed response body) and
/// [`Error::Api`] for a non-zero `error` code reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// Local failure; carries a free-text message wrapping the cause.
    #[error("sdk error: {0}")]
    Sdk(String),

    /// Protocol-level failure reported by the server.
    ///
    /// `code` is always one of the known codes or [`UNHANDLED_ERROR_CODE`];
    /// `reason` is the table description, extended with the server-supplied
    /// free text when one was present.
    #[error("{code} - {reason}")]
    Api { code: i64, reason: String },
}

impl Error {
    pub fn sdk(message: impl Into<String>) -> Self {
        Error::Sdk(message.into())
    }

    /// Build a protocol error from a raw server code and optional free text.
    ///
    /// Codes absent from the table collapse to [`UNHANDLED_ERROR_CODE`];
    /// the original code is not kept. A non-empty `reason` is appended to
    /// the table description separated by `" - "`.
    pub fn api(code: i64, reason: &str) -> Self {
        let (code, description) = match describe(code) {
            Some(description) => (code, description),
            None => (UNHANDLED_ERROR_CODE, UNHANDLED_DESCRIPTION),
        };

        let reason = if reason.is_empty() {
            description.to_owned()
        } else {
            format!("{description} - {reason}")
        };

        Error::Api { code, reason }
    }

    /// True for the client-side kind.
    pub fn is_sdk(&self) -> bool {
        matches!(self, Error::Sdk(_))
    }

    /// True for the server-reported kind.
    pub fn is_api(&self) -> bool {
        matches!(self, Error::Api { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Sdk(format!("JSON error: {err}"))
    }
}

/// Human-readable description for a Remote API error code.
///
/// Returns `None` for codes the API does not define.
pub fn describe(code: i64) -> Option<&'static str> {
    let description = match code {
        UNHANDLED_ERROR_CODE => UNHANDLED_DESCRIPTION,
        1 => "Invalid session",
        2 => "Invalid service name",
        3 => "Invalid result",
        4 => "Invalid input",
        5 => "Error performing request",
        6 => "Unknown error",
        7 => "Access denied",
        8 => "Invalid user name or password",
        9 => "Authorization server is unavailable",
        10 => "Reached limit of concurrent requests",
        11 => "Password reset error",
        14 => "Billing error",
        1001 => "No messages for selected interval",
        1002 => {
            "Item with such unique property already exists or \
             Item cannot be created according to billing restrictions"
        }
        1003 => "Only one request is allowed at the moment",
        1004 => "Limit of messages has been exceeded",
        1005 => "Execution time has exceeded the limit",
        1006 => "Exceeding the limit of attempts to enter a two-factor authorization code",
        1011 => "Your IP has changed or session has expired",
        2014 => {
            "Selected user is a creator for some system objects, \
             thus this user cannot be bound to a new account"
        }
        2015 => {
            "Sensor deleting is forbidden because of using in another sensor \
             or advanced properties of the unit"
        }
        _ => return None,
    };

    Some(description)
}
