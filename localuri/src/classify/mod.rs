//! Validation of caller input into a [`CanonicalRequest`].
//!
//! The classifier runs its checks in a fixed order and stops at the first
//! failure, so a caller always gets the earliest problem with their input:
//!
//! 1. required fields
//! 2. timeouts
//! 3. URI resolution (`url`, or the component fields)
//! 4. `url`/component agreement
//! 5. host and port
//! 6. API matching
//! 7. path parameters

mod input;
mod path_params;
mod request;
mod uri;

pub use input::UriInput;
pub use path_params::extract_path_params;
pub use request::CanonicalRequest;

use crate::{
    api_type::ApiType,
    catalog::{ApiCatalog, ApiKind},
    error::{ClassifyError, TimeoutKind},
};

/// The only host requests may target.
pub const SUPPORTED_HOST: &str = "localhost";
/// The only port requests may target.
pub const SUPPORTED_PORT: u16 = 9200;
pub const SUPPORTED_SCHEMES: &[&str] = &["http", "https"];
/// Scheme used when the component fields leave it empty.
pub const DEFAULT_SCHEME: &str = "http";

pub const MIN_CONNECTION_TIMEOUT: i32 = 1;
pub const MAX_CONNECTION_TIMEOUT: i32 = 5;
pub const MIN_SOCKET_TIMEOUT: i32 = 1;
pub const MAX_SOCKET_TIMEOUT: i32 = 60;

/// Characters path parameters may never contain.
pub const ILLEGAL_PATH_PARAMETER_CHARACTERS: &[char] = &['=', '?', '"', ' '];

fn check_timeout(kind: TimeoutKind, value: i32, min: i32, max: i32) -> Result<(), ClassifyError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ClassifyError::TimeoutOutOfRange {
            kind,
            value,
            min,
            max,
        })
    }
}

/// Turns [`UriInput`] into a [`CanonicalRequest`] against an [`ApiCatalog`].
///
/// Borrowing the catalog keeps the classifier cheap to create per request.
#[derive(Clone, Copy, Debug)]
pub struct UriClassifier<'a, K: ApiKind = ApiType> {
    apis: &'a ApiCatalog<K>,
}

impl<'a, K: ApiKind> UriClassifier<'a, K> {
    pub fn new(apis: &'a ApiCatalog<K>) -> Self {
        Self { apis }
    }

    pub fn apis(&self) -> &'a ApiCatalog<K> {
        self.apis
    }

    /// Validates `input` and resolves it to one supported API.
    pub fn construct(&self, input: &UriInput) -> Result<CanonicalRequest<K>, ClassifyError> {
        if input.url.is_empty() && input.path.is_empty() && input.scheme.is_empty() {
            return Err(ClassifyError::MissingRequiredFields);
        }
        check_timeout(
            TimeoutKind::Connection,
            input.connection_timeout,
            MIN_CONNECTION_TIMEOUT,
            MAX_CONNECTION_TIMEOUT,
        )?;
        check_timeout(
            TimeoutKind::Socket,
            input.socket_timeout,
            MIN_SOCKET_TIMEOUT,
            MAX_SOCKET_TIMEOUT,
        )?;

        let (constructed_uri, field) = if input.url.is_empty() {
            (uri::build_from_components(input)?, "path")
        } else {
            (uri::parse_url(&input.url, "url")?, "url")
        };
        let uri_query = uri::query_map(&constructed_uri, field)?;

        if !input.url.is_empty() && !input.path.is_empty() {
            let from_fields = uri::build_from_components(input)?;
            if !uri::same_target(&from_fields, &constructed_uri) {
                return Err(ClassifyError::ConflictingUrlAndComponents {
                    url: input.url.clone(),
                    from_fields: from_fields.into(),
                });
            }
        }

        let host = constructed_uri.host_str().unwrap_or_default().to_owned();
        let port = constructed_uri.port_or_known_default().unwrap_or_default();
        if !host.eq_ignore_ascii_case(SUPPORTED_HOST) || port != SUPPORTED_PORT {
            return Err(ClassifyError::UnsupportedHostOrPort { host, port });
        }

        let uri_path = uri::decoded_path(&constructed_uri, field)?;
        let (api_type, descriptor) = self
            .apis
            .find_entry(&uri_path)
            .ok_or_else(|| ClassifyError::UnsupportedApi {
                path: uri_path.clone(),
            })?;
        let path_params = extract_path_params(api_type, &uri_path, &input.path_params)?;

        let path = if !input.path.is_empty() {
            input.path.clone()
        } else if path_params.is_empty() {
            descriptor.default_path.to_owned()
        } else {
            descriptor.prepend_path.to_owned()
        };
        let url = if input.url.is_empty() {
            constructed_uri.to_string()
        } else {
            input.url.clone()
        };
        let query_params = if input.query_params.is_empty() {
            uri_query
        } else {
            input.query_params.clone()
        };

        Ok(CanonicalRequest {
            api_type,
            scheme: constructed_uri.scheme().to_owned(),
            host: host.to_ascii_lowercase(),
            port,
            path,
            path_params,
            query_params,
            url,
            connection_timeout: input.connection_timeout,
            socket_timeout: input.socket_timeout,
            constructed_uri,
        })
    }

    /// Alias of [`UriClassifier::construct`].
    pub fn classify(&self, input: &UriInput) -> Result<CanonicalRequest<K>, ClassifyError> {
        self.construct(input)
    }

    /// The API a bare request path belongs to.
    pub fn classify_path(&self, path: &str) -> Result<K, ClassifyError> {
        self.apis.find(path).ok_or_else(|| ClassifyError::UnsupportedApi {
            path: path.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(input: &UriInput) -> Result<CanonicalRequest, ClassifyError> {
        let apis = ApiCatalog::new();
        UriClassifier::new(&apis).construct(input)
    }

    #[test]
    fn missing_fields_are_checked_first() {
        let input = UriInput::default().with_timeouts(0, 0);
        assert_eq!(classify(&input).unwrap_err(), ClassifyError::MissingRequiredFields);
    }

    #[test]
    fn timeout_bounds_are_inclusive() {
        for (connection, socket) in [(1, 1), (5, 60), (3, 30)] {
            let input = UriInput::from_path("/_cat/tasks").with_timeouts(connection, socket);
            assert!(classify(&input).is_ok(), "{connection}/{socket}");
        }
        for (connection, socket) in [(0, 1), (6, 1), (1, 0), (1, 61), (-1, 60)] {
            let input = UriInput::from_path("/_cat/tasks").with_timeouts(connection, socket);
            assert!(
                matches!(classify(&input), Err(ClassifyError::TimeoutOutOfRange { .. })),
                "{connection}/{socket}"
            );
        }
    }

    #[test]
    fn back_fills_empty_fields_from_the_url() {
        let request = classify(&UriInput::from_url(
            "http://localhost:9200/_cluster/health/index1,index2?level=shards",
        ))
        .unwrap();
        assert_eq!(request.api_type(), ApiType::ClusterHealth);
        assert_eq!(request.path(), "/_cluster/health");
        assert_eq!(request.path_params(), "index1,index2");
        assert_eq!(request.query_params().get("level").map(String::as_str), Some("shards"));
        assert_eq!(request.scheme(), "http");
        assert_eq!(request.host(), "localhost");
        assert_eq!(request.port(), 9200);
    }

    #[test]
    fn back_fills_url_from_components() {
        let request = classify(&UriInput::from_path("/_cluster/stats").with_path_params("node1")).unwrap();
        assert_eq!(request.url(), "http://localhost:9200/_cluster/stats/node1");
        assert_eq!(request.constructed_uri().path(), "/_cluster/stats/node1");
    }

    #[test]
    fn host_is_case_insensitive() {
        let request = classify(&UriInput::from_url("http://LocalHost:9200/_cat/tasks")).unwrap();
        assert_eq!(request.host(), "localhost");
    }

    #[test]
    fn classify_path_uses_catalog_order() {
        let apis = ApiCatalog::<ApiType>::new();
        let classifier = UriClassifier::new(&apis);
        assert_eq!(classifier.classify_path("/_nodes/stats"), Ok(ApiType::NodesStats));
        assert_eq!(
            classifier.classify_path("/_search"),
            Err(ClassifyError::UnsupportedApi {
                path: "/_search".into()
            })
        );
    }

    #[test]
    fn disabled_api_is_unsupported() {
        let apis = ApiCatalog::restricted_to([ApiType::ClusterHealth]);
        let err = UriClassifier::new(&apis)
            .construct(&UriInput::from_path("/_cat/tasks"))
            .unwrap_err();
        assert!(matches!(err, ClassifyError::UnsupportedApi { .. }));
    }
}
