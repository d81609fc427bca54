//! The narrow transport seam every resource talks through.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::error::{Result, SevdeskError};

/// Request parameters: query string for reads, form body for writes.
pub type Params = Map<String, Value>;

/// sevdesk error code for "object not found".
pub const NOT_FOUND_CODE: i64 = 151;

/// HTTP method of a remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Whether parameters travel in the query string rather than the body.
    pub fn uses_query(self) -> bool {
        matches!(self, Self::Get | Self::Delete)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Executes authenticated calls against the sevdesk API.
///
/// `path` is relative to the API root (e.g. `"Invoice/Factory/saveInvoice"`).
/// Implementations attach credentials themselves and must report failures
/// already classified (see [`classify_error`]).
pub trait Gateway {
    fn call(&self, method: Method, path: &str, params: Params) -> Result<Value>;
}

impl<G: Gateway + ?Sized> Gateway for &G {
    fn call(&self, method: Method, path: &str, params: Params) -> Result<Value> {
        (**self).call(method, path, params)
    }
}

impl<G: Gateway + ?Sized> Gateway for Box<G> {
    fn call(&self, method: Method, path: &str, params: Params) -> Result<Value> {
        (**self).call(method, path, params)
    }
}

/// Map an unsuccessful HTTP response to an error kind.
///
/// sevdesk reports failures as `{"error": {"code": …, "message": …}}` or, for
/// authentication problems, `{"status": 401, "message": …}`.
pub fn classify_error(status: u16, body: &str) -> SevdeskError {
    let Ok(response) = serde_json::from_str::<Value>(body) else {
        return SevdeskError::Transport(format!("HTTP {status}"));
    };

    if let Some(error) = response.get("error") {
        let message = error.get("message").and_then(Value::as_str);
        if numeric_field(error, "code") == Some(NOT_FOUND_CODE) {
            return SevdeskError::RemoteNotFound(message.unwrap_or_default().to_string());
        }
        if let Some(message) = message {
            return SevdeskError::Remote(message.to_string());
        }
    }

    if numeric_field(&response, "status") == Some(401) {
        let message = response
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("unauthorized");
        return SevdeskError::RemoteUnauthorized(message.to_string());
    }

    SevdeskError::Transport(format!("HTTP {status}: something went wrong"))
}

/// Codes arrive as numbers or numeric strings.
fn numeric_field(value: &Value, key: &str) -> Option<i64> {
    match value.get(key)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// The `objects` member every sevdesk response wraps its payload in.
pub fn objects(response: Value) -> Result<Value> {
    match response {
        Value::Object(mut map) => map
            .remove("objects")
            .ok_or_else(|| SevdeskError::UnexpectedResponse("missing 'objects'".into())),
        other => Err(SevdeskError::UnexpectedResponse(format!(
            "expected object, got {other}"
        ))),
    }
}

/// Decode a JSON value into a value object.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| SevdeskError::UnexpectedResponse(e.to_string()))
}
