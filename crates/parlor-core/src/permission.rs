//! Detection of content-store permission failures.
//!
//! The content store reports missing grants only through its error message,
//! so detection is a substring match. The remediation text is meant for
//! operators (logs, `parlor check`), never for end users.

use std::fmt;

use serde_json::Value;

/// Message fragments the content store uses for missing grants.
const PERMISSION_MARKERS: [&str; 2] = ["Insufficient permissions", "does not have permission"];

/// Operator-facing fix for a permission failure.
pub const PERMISSION_REMEDIATION: &str = "\
The content store rejected the request: the API token lacks the required permissions.

To fix this:
  1. Create a token with write access in the content platform's project settings (API > Tokens).
  2. Set it as content.write_token in parlor.toml, or export PARLOR__CONTENT__WRITE_TOKEN.
  3. Restart the server.";

/// A thrown value of unknown shape, such as a JSON error body.
///
/// Displays as the object's `message` field when it is a string, as the raw
/// text for a JSON string, and as the JSON text otherwise.
#[derive(Debug, Clone, Copy)]
pub struct ThrownValue<'a>(pub &'a Value);

impl fmt::Display for ThrownValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Value::Object(map) => match map.get("message").and_then(Value::as_str) {
                Some(message) => f.write_str(message),
                None => write!(f, "{}", self.0),
            },
            Value::String(s) => f.write_str(s),
            other => write!(f, "{other}"),
        }
    }
}

fn mentions_permissions(message: &str) -> bool {
    PERMISSION_MARKERS
        .iter()
        .any(|marker| message.contains(marker))
}

/// Remediation text if `err` is a permission failure.
pub fn permission_error<E>(err: &E) -> Option<&'static str>
where
    E: fmt::Display + ?Sized,
{
    if is_permission_error(err) {
        Some(PERMISSION_REMEDIATION)
    } else {
        None
    }
}

/// Whether `err` is a permission failure.
pub fn is_permission_error<E>(err: &E) -> bool
where
    E: fmt::Display + ?Sized,
{
    mentions_permissions(&err.to_string())
}
