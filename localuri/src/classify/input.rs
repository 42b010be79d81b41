use std::collections::BTreeMap;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use super::{MAX_CONNECTION_TIMEOUT, MAX_SOCKET_TIMEOUT};

/// A caller's description of the API to call, before validation.
///
/// Either `url` or the component fields (`scheme`, `host`, `port`, `path`,
/// `path_params`, `query_params`) describe the target; both may be given as
/// long as they agree. Every field is optional on the wire.
///
/// ```
/// use localuri::UriInput;
///
/// let input: UriInput = serde_json::from_str(
///     r#"{ "path": "/_cluster/health", "port": -1, "socket_timeout": 30 }"#,
/// )
/// .unwrap();
/// assert_eq!(input.port, None);
/// assert_eq!(input.connection_timeout, 5);
/// assert_eq!(input.socket_timeout, 30);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UriInput {
    /// Accepted for wire compatibility and ignored; the type is always derived
    /// from the path.
    pub api_type: String,
    pub scheme: String,
    pub host: String,
    /// `None` when unset; `-1` and `null` on the wire both mean unset.
    #[serde(serialize_with = "serialize_port", deserialize_with = "deserialize_port")]
    pub port: Option<u16>,
    pub path: String,
    pub path_params: String,
    pub query_params: BTreeMap<String, String>,
    pub url: String,
    pub connection_timeout: i32,
    pub socket_timeout: i32,
}

impl Default for UriInput {
    fn default() -> Self {
        Self {
            api_type: String::new(),
            scheme: String::new(),
            host: String::new(),
            port: None,
            path: String::new(),
            path_params: String::new(),
            query_params: BTreeMap::new(),
            url: String::new(),
            connection_timeout: MAX_CONNECTION_TIMEOUT,
            socket_timeout: MAX_SOCKET_TIMEOUT,
        }
    }
}

impl UriInput {
    /// Input naming its target by a single URL.
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Input naming its target by path, on the default scheme, host, and port.
    pub fn from_path(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    #[must_use]
    pub fn with_path_params(mut self, path_params: impl Into<String>) -> Self {
        self.path_params = path_params.into();
        self
    }

    #[must_use]
    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_timeouts(mut self, connection_timeout: i32, socket_timeout: i32) -> Self {
        self.connection_timeout = connection_timeout;
        self.socket_timeout = socket_timeout;
        self
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn serialize_port<S: Serializer>(port: &Option<u16>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_i32(port.map_or(-1, i32::from))
}

fn deserialize_port<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u16>, D::Error> {
    match Option::<i64>::deserialize(deserializer)? {
        None => Ok(None),
        Some(port) if port < 0 => Ok(None),
        Some(port) => u16::try_from(port).map(Some).map_err(|_| {
            de::Error::invalid_value(de::Unexpected::Signed(port), &"a port between 0 and 65535")
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let input: UriInput = serde_json::from_str("{}").unwrap();
        assert_eq!(input, UriInput::default());
        assert_eq!(input.connection_timeout, 5);
        assert_eq!(input.socket_timeout, 60);
    }

    #[test]
    fn port_wire_forms() {
        let unset: UriInput = serde_json::from_str(r#"{"port": null}"#).unwrap();
        assert_eq!(unset.port, None);
        let set: UriInput = serde_json::from_str(r#"{"port": 9200}"#).unwrap();
        assert_eq!(set.port, Some(9200));
        assert!(serde_json::from_str::<UriInput>(r#"{"port": 70000}"#).is_err());
    }

    #[test]
    fn unset_port_serializes_as_minus_one() {
        let value = serde_json::to_value(UriInput::from_path("/_cat/tasks")).unwrap();
        assert_eq!(value["port"], -1);
        assert_eq!(value["path"], "/_cat/tasks");
    }

    #[test]
    fn api_type_is_accepted() {
        let input: UriInput =
            serde_json::from_str(r#"{"api_type": "CLUSTER_HEALTH", "url": "http://localhost:9200/_cat/tasks"}"#)
                .unwrap();
        assert_eq!(input.api_type, "CLUSTER_HEALTH");
    }
}
