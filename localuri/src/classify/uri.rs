//! Building, parsing, and checking the URI a request resolves to.

use std::collections::BTreeMap;

use url::{Host, Url};

use super::{input::UriInput, DEFAULT_SCHEME, SUPPORTED_HOST, SUPPORTED_PORT, SUPPORTED_SCHEMES};
use crate::error::ClassifyError;

fn invalid(field: &'static str, url: &str, reason: impl Into<String>) -> ClassifyError {
    ClassifyError::InvalidUrl {
        field,
        url: url.to_owned(),
        reason: reason.into(),
    }
}

/// Joins a base path and path parameters with exactly one `/` between them.
pub(crate) fn join_path(path: &str, path_params: &str) -> String {
    if path_params.is_empty() {
        return path.to_owned();
    }
    format!(
        "{}/{}",
        path.trim_end_matches('/'),
        path_params.trim_start_matches('/')
    )
}

/// Builds the URI described by the component fields of `input`.
pub(crate) fn build_from_components(input: &UriInput) -> Result<Url, ClassifyError> {
    let scheme = if input.scheme.is_empty() {
        DEFAULT_SCHEME.to_owned()
    } else {
        input.scheme.to_ascii_lowercase()
    };
    let host = if input.host.is_empty() {
        SUPPORTED_HOST
    } else {
        input.host.as_str()
    };
    let port = input.port.unwrap_or(SUPPORTED_PORT);
    let path = join_path(&input.path, &input.path_params);

    if !SUPPORTED_SCHEMES.contains(&scheme.as_str()) {
        return Err(invalid(
            "scheme",
            &input.scheme,
            format!("scheme `{scheme}` is not one of {}", SUPPORTED_SCHEMES.join(", ")),
        ));
    }
    if let Err(err) = Host::parse(host) {
        return Err(invalid("host", host, err.to_string()));
    }

    let base = format!("{scheme}://{host}");
    let mut url = Url::parse(&base).map_err(|err| invalid("host", &base, err.to_string()))?;
    url.set_port(Some(port))
        .map_err(|()| invalid("port", &base, format!("port {port} cannot be set")))?;
    url.set_path(&path);
    if !input.query_params.is_empty() {
        url.query_pairs_mut().extend_pairs(&input.query_params);
    }

    check_uri(&url, "path")?;
    Ok(url)
}

/// Parses a caller-supplied URL string.
pub(crate) fn parse_url(raw: &str, field: &'static str) -> Result<Url, ClassifyError> {
    let url = Url::parse(raw).map_err(|err| invalid(field, raw, err.to_string()))?;
    check_uri(&url, field)?;
    Ok(url)
}

/// The generic validity checks every resolved URI must pass.
pub(crate) fn check_uri(url: &Url, field: &'static str) -> Result<(), ClassifyError> {
    if !SUPPORTED_SCHEMES.contains(&url.scheme()) {
        return Err(invalid(
            field,
            url.as_str(),
            format!(
                "scheme `{}` is not one of {}",
                url.scheme(),
                SUPPORTED_SCHEMES.join(", ")
            ),
        ));
    }
    if url.host().is_none() {
        return Err(invalid(field, url.as_str(), "missing host"));
    }
    if url.path().contains("//") {
        return Err(invalid(field, url.as_str(), "path contains an empty segment"));
    }
    Ok(())
}

/// The query of `url` as a map. A key may appear only once.
pub(crate) fn query_map(url: &Url, field: &'static str) -> Result<BTreeMap<String, String>, ClassifyError> {
    let mut params = BTreeMap::new();
    for (key, value) in url.query_pairs() {
        if params.insert(key.to_string(), value.into_owned()).is_some() {
            return Err(invalid(
                field,
                url.as_str(),
                format!("query parameter `{key}` is repeated"),
            ));
        }
    }
    Ok(params)
}

/// Whether two URIs address the same resource with the same query.
///
/// Scheme, host, port, and path must be equal; query pairs may come in any
/// order.
pub(crate) fn same_target(left: &Url, right: &Url) -> bool {
    let sorted_query = |url: &Url| {
        let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        pairs.sort();
        pairs
    };
    left.scheme() == right.scheme()
        && left.host_str() == right.host_str()
        && left.port_or_known_default() == right.port_or_known_default()
        && left.path() == right.path()
        && sorted_query(left) == sorted_query(right)
}

/// The percent-decoded path of `url`.
pub(crate) fn decoded_path(url: &Url, field: &'static str) -> Result<String, ClassifyError> {
    urlencoding::decode(url.path())
        .map(std::borrow::Cow::into_owned)
        .map_err(|err| invalid(field, url.as_str(), err.to_string()))
}
