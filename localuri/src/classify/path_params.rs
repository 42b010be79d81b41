use super::ILLEGAL_PATH_PARAMETER_CHARACTERS;
use crate::{catalog::ApiKind, error::ClassifyError};

/// Isolates and validates the path parameters for `api_type`.
///
/// Non-empty `explicit` parameters are used verbatim. Otherwise they are what
/// remains of `uri_path` once the API's prefix and suffix are stripped. APIs
/// without path parameters strip their full canonical path instead of the
/// matching prefix, so anything beyond it counts as a parameter.
///
/// ```
/// use localuri::{extract_path_params, ApiType, ClassifyError};
///
/// let params = extract_path_params(ApiType::CatSnapshots, "/_cat/snapshots/nightly/", "").unwrap();
/// assert_eq!(params, "nightly");
///
/// let err = extract_path_params(ApiType::CatSnapshots, "/_cat/snapshots", "").unwrap_err();
/// assert!(matches!(err, ClassifyError::MissingPathParams { .. }));
/// ```
pub fn extract_path_params<K: ApiKind>(
    api_type: K,
    uri_path: &str,
    explicit: &str,
) -> Result<String, ClassifyError> {
    let descriptor = api_type
        .descriptor()
        .ok_or_else(|| ClassifyError::UnsupportedApi {
            path: uri_path.to_owned(),
        })?;

    let raw = if explicit.is_empty() {
        let prefix = if descriptor.supports_path_params {
            descriptor.prepend_path
        } else {
            descriptor.default_path
        };
        let rest = uri_path.strip_prefix(prefix).unwrap_or(uri_path);
        rest.strip_suffix(descriptor.append_path).unwrap_or(rest)
    } else {
        explicit
    };
    let params = raw.trim_matches('/');

    if params.contains(ILLEGAL_PATH_PARAMETER_CHARACTERS) {
        return Err(ClassifyError::InvalidPathParams {
            params: params.to_owned(),
        });
    }
    if descriptor.requires_path_params && params.is_empty() {
        return Err(ClassifyError::MissingPathParams {
            api: api_type.name(),
        });
    }
    if !descriptor.supports_path_params && !params.is_empty() {
        return Err(ClassifyError::UnsupportedPathParams {
            api: api_type.name(),
            params: params.to_owned(),
        });
    }

    Ok(params.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApiType;

    #[test]
    fn strips_prefix_and_separators() {
        assert_eq!(
            extract_path_params(ApiType::ClusterHealth, "/_cluster/health/index1,index2", "").unwrap(),
            "index1,index2"
        );
        assert_eq!(
            extract_path_params(ApiType::ClusterHealth, "/_cluster/health/", "").unwrap(),
            ""
        );
    }

    #[test]
    fn explicit_params_win_over_the_path() {
        assert_eq!(
            extract_path_params(ApiType::CatRecovery, "/_cat/recovery/other", "/wanted/").unwrap(),
            "wanted"
        );
    }

    #[test]
    fn each_banned_character_is_rejected() {
        for ch in ILLEGAL_PATH_PARAMETER_CHARACTERS {
            let params = format!("index{ch}1");
            let err = extract_path_params(ApiType::ClusterStats, "/_cluster/stats", &params).unwrap_err();
            assert_eq!(err, ClassifyError::InvalidPathParams { params });
        }
    }

    #[test]
    fn required_params_must_be_present() {
        let err = extract_path_params(ApiType::CatSnapshots, "/_cat/snapshots/", "").unwrap_err();
        assert_eq!(err, ClassifyError::MissingPathParams { api: "CAT_SNAPSHOTS" });
        assert_eq!(
            extract_path_params(ApiType::CatSnapshots, "/_cat/snapshots", "repo-1").unwrap(),
            "repo-1"
        );
    }

    #[test]
    fn unsupported_params_are_rejected() {
        let err = extract_path_params(ApiType::ClusterSettings, "/_cluster/settings/x", "").unwrap_err();
        assert_eq!(
            err,
            ClassifyError::UnsupportedPathParams {
                api: "CLUSTER_SETTINGS",
                params: "x".into(),
            }
        );
    }

    #[test]
    fn nodes_stats_only_accepts_its_canonical_path() {
        assert_eq!(extract_path_params(ApiType::NodesStats, "/_nodes/stats", "").unwrap(), "");
        let err = extract_path_params(ApiType::NodesStats, "/_nodes/_local/stats", "").unwrap_err();
        assert!(matches!(err, ClassifyError::UnsupportedPathParams { .. }));
    }

    #[test]
    fn blank_type_is_unsupported() {
        let err = extract_path_params(ApiType::Blank, "/", "").unwrap_err();
        assert_eq!(err, ClassifyError::UnsupportedApi { path: "/".into() });
    }
}
