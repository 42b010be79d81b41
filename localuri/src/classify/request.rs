use std::collections::BTreeMap;

use serde::Serialize;
use url::Url;

use super::input::UriInput;
use crate::{
    api_type::ApiType,
    catalog::{serialize_kind, ApiKind},
};

/// A validated request against exactly one supported API.
///
/// Only [`UriClassifier`](crate::UriClassifier) builds these, so every value
/// targets the supported host and port, carries in-range timeouts, and has a
/// non-sentinel API type. Fields the caller left empty are filled in from the
/// resolved URI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(bound(serialize = ""))]
pub struct CanonicalRequest<K: ApiKind = ApiType> {
    #[serde(serialize_with = "serialize_kind")]
    pub(crate) api_type: K,
    pub(crate) scheme: String,
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) path: String,
    pub(crate) path_params: String,
    pub(crate) query_params: BTreeMap<String, String>,
    pub(crate) url: String,
    pub(crate) connection_timeout: i32,
    pub(crate) socket_timeout: i32,
    #[serde(skip)]
    pub(crate) constructed_uri: Url,
}

impl<K: ApiKind> CanonicalRequest<K> {
    pub fn api_type(&self) -> K {
        self.api_type
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

    /// The API path without parameters: the canonical path when there are no
    /// parameters, the matching prefix when there are.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn path_params(&self) -> &str {
        &self.path_params
    }

    pub fn query_params(&self) -> &BTreeMap<String, String> {
        &self.query_params
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn connection_timeout(&self) -> i32 {
        self.connection_timeout
    }

    pub fn socket_timeout(&self) -> i32 {
        self.socket_timeout
    }

    /// The URI the request resolved to.
    pub fn constructed_uri(&self) -> &Url {
        &self.constructed_uri
    }

    /// The request as caller input, with every field filled in.
    ///
    /// Classifying the result yields an equal request.
    pub fn to_input(&self) -> UriInput {
        UriInput {
            api_type: self.api_type.name().to_owned(),
            scheme: self.scheme.clone(),
            host: self.host.clone(),
            port: Some(self.port),
            path: self.path.clone(),
            path_params: self.path_params.clone(),
            query_params: self.query_params.clone(),
            url: self.url.clone(),
            connection_timeout: self.connection_timeout,
            socket_timeout: self.socket_timeout,
        }
    }
}
