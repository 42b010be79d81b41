//! The entrypoint collaborators use: classification and redaction against one
//! pair of catalogs, with every decision logged.

use serde_json::Value;
use slog::{debug, error, info, o, warn, Logger};

use crate::{
    api_type::ApiType,
    catalog::{ApiCatalog, ApiKind},
    classify::{CanonicalRequest, UriClassifier, UriInput},
    error::{CatalogError, ClassifyError},
    redaction::{redact, RedactionCatalog},
};

/// The API catalog and the allow-lists, checked against each other once and
/// then shared read-only.
///
/// Request rejections are logged at debug level; they are caller errors. A
/// missing allow-list at redaction time is logged as an error, since
/// [`ApiGate::new`] already ruled it out.
#[derive(Clone, Debug)]
pub struct ApiGate<K: ApiKind = ApiType> {
    apis: ApiCatalog<K>,
    allow_lists: RedactionCatalog,
    log: Logger,
}

impl<K: ApiKind> ApiGate<K> {
    /// Checks that every API has an allow-list and reports catalog entries
    /// that can never be matched.
    pub fn new(apis: ApiCatalog<K>, allow_lists: RedactionCatalog, log: Logger) -> Result<Self, CatalogError> {
        let log = log.new(o!("component" => "api_gate"));

        if let Err(err) = allow_lists.ensure_covers(&apis) {
            error!(log, "allow-list catalog is incomplete"; "error" => %err);
            return Err(err);
        }
        for (earlier, later) in apis.shadowed() {
            warn!(log, "api can never be matched";
                "api_type" => %later,
                "shadowed_by" => %earlier
            );
        }
        info!(log, "api gate ready"; "apis" => apis.len(), "allow_lists" => allow_lists.len());

        Ok(Self {
            apis,
            allow_lists,
            log,
        })
    }

    pub fn classifier(&self) -> UriClassifier<'_, K> {
        UriClassifier::new(&self.apis)
    }

    /// Validates `input` into a request against one supported API.
    pub fn classify(&self, input: &UriInput) -> Result<CanonicalRequest<K>, ClassifyError> {
        match self.classifier().construct(input) {
            Ok(request) => {
                debug!(self.log, "request accepted";
                    "api_type" => %request.api_type(),
                    "url" => request.url()
                );
                Ok(request)
            }
            Err(err) => {
                debug!(self.log, "request rejected"; "error" => %err, "field" => err.field());
                Err(err)
            }
        }
    }

    /// Filters a raw response of `api_type` through its allow-list.
    pub fn redact(&self, api_type: K, raw: &Value) -> Result<Value, CatalogError> {
        let allow_list = match self.allow_lists.allow_list_for(api_type) {
            Ok(allow_list) => allow_list,
            Err(err) => {
                error!(self.log, "no allow-list for api"; "api_type" => %api_type, "error" => %err);
                return Err(err);
            }
        };

        let filtered = redact(raw, allow_list);
        debug!(self.log, "response redacted";
            "api_type" => %api_type,
            "roots" => filtered.as_object().map_or(0, serde_json::Map::len)
        );
        Ok(filtered)
    }

    pub fn apis(&self) -> &ApiCatalog<K> {
        &self.apis
    }

    pub fn allow_lists(&self) -> &RedactionCatalog {
        &self.allow_lists
    }

    pub fn logger(&self) -> &Logger {
        &self.log
    }
}

impl ApiGate<ApiType> {
    /// A gate over every bundled API and the bundled allow-lists.
    pub fn bundled(log: Logger) -> Result<Self, CatalogError> {
        Self::new(ApiCatalog::new(), RedactionCatalog::bundled()?, log)
    }

    /// Like [`ApiGate::bundled`], but honors the allow-list file named by
    /// [`ALLOW_LIST_ENV`](crate::ALLOW_LIST_ENV).
    pub fn from_env(log: Logger) -> Result<Self, CatalogError> {
        Self::new(ApiCatalog::new(), RedactionCatalog::from_env()?, log)
    }
}
