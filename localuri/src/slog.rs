//! Adapters for emitting requests and other serializable values through `slog`.
//!
//! Values are logged as structured JSON through `slog`'s nested-value support.
//! Logging never fails because of them: a value that cannot be converted to
//! JSON is logged as a placeholder string.
//!
//! Response bodies should not be passed through these adapters. Log their
//! shape (root count, API type) instead.

use serde::Serialize;
use serde_json::Value as JsonValue;
use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::{catalog::ApiKind, classify::CanonicalRequest};

const SERIALIZE_FAILED: &str = "Failed to serialize value";

fn to_json<T: Serialize>(value: &T) -> JsonValue {
    serde_json::to_value(value).unwrap_or_else(|_| JsonValue::String(SERIALIZE_FAILED.to_string()))
}

fn emit_json(value: JsonValue, record: &Record<'_>, key: Key, serializer: &mut dyn Serializer) -> SlogResult {
    let nested = slog::Serde(value);
    SlogValue::serialize(&nested, record, key, serializer)
}

/// A `slog::Value` holding an owned JSON payload.
#[derive(Clone, Debug, PartialEq)]
pub struct LoggedJson {
    value: JsonValue,
}

impl LoggedJson {
    pub fn as_json(&self) -> &JsonValue {
        &self.value
    }
}

impl SlogValue for LoggedJson {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        emit_json(self.value.clone(), record, key, serializer)
    }
}

/// Converts any serializable value into a [`LoggedJson`].
///
/// ## Example
/// ```
/// use localuri::{slog::IntoLoggedJson, UriInput};
///
/// let log = slog::Logger::root(slog::Discard, slog::o!());
/// let input = UriInput::from_path("/_cat/tasks");
/// slog::info!(log, "received"; "input" => input.into_logged_json());
/// ```
pub trait IntoLoggedJson: Serialize + Sized {
    fn into_logged_json(self) -> LoggedJson {
        LoggedJson {
            value: to_json(&self),
        }
    }
}

impl<T> IntoLoggedJson for T where T: Serialize {}

/// Logs the request in its canonical wire form.
impl<K: ApiKind> SlogValue for CanonicalRequest<K> {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        emit_json(to_json(self), record, key, serializer)
    }
}
