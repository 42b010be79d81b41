//! The table of allow-lists, keyed by canonical API path.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use super::allow_list::AllowList;
use crate::{
    catalog::{ApiCatalog, ApiKind},
    error::CatalogError,
};

/// Environment variable naming an allow-list file to use instead of the
/// bundled one.
pub const ALLOW_LIST_ENV: &str = "LOCALURI_ALLOW_LIST";

const BUNDLED: &str = include_str!("../../resources/allow_lists.json");

type RawCatalog = BTreeMap<String, BTreeMap<String, Vec<String>>>;

/// Allow-lists for every supported API, keyed by the API's canonical path.
///
/// Build it once at startup, check it with [`RedactionCatalog::ensure_covers`],
/// and share it read-only afterwards.
///
/// The resource format is a JSON object:
///
/// ```json
/// {
///   "/_cluster/health": {},
///   "/_cluster/stats": {
///     "indices": ["shards.total", "shards.index.shards.min"]
///   }
/// }
/// ```
///
/// An empty object lets the whole response through; an empty array keeps
/// that root whole.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RedactionCatalog {
    entries: BTreeMap<String, AllowList>,
}

impl RedactionCatalog {
    /// Parses a catalog from its JSON resource.
    pub fn from_json(resource: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = serde_json::from_str(resource)?;
        let mut entries = BTreeMap::new();
        for (api, roots) in raw {
            let mut allow_list = AllowList::new();
            for (root, paths) in roots {
                allow_list = allow_list
                    .allow_paths(root.clone(), &paths)
                    .map_err(|source| CatalogError::InvalidFieldPath {
                        api: api.clone(),
                        root,
                        source,
                    })?;
            }
            entries.insert(api, allow_list);
        }
        Ok(Self { entries })
    }

    /// The catalog compiled into the crate.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let resource = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&resource)
    }

    /// The file named by [`ALLOW_LIST_ENV`], or the bundled catalog when the
    /// variable is unset or empty.
    pub fn from_env() -> Result<Self, CatalogError> {
        match std::env::var_os(ALLOW_LIST_ENV) {
            Some(path) if !path.is_empty() => Self::from_file(PathBuf::from(path)),
            _ => Self::bundled(),
        }
    }

    /// Adds or replaces the allow-list for `path`.
    #[must_use]
    pub fn with_entry(mut self, path: impl Into<String>, allow_list: AllowList) -> Self {
        self.entries.insert(path.into(), allow_list);
        self
    }

    /// The allow-list registered for a canonical API path.
    pub fn get(&self, path: &str) -> Result<&AllowList, CatalogError> {
        self.entries
            .get(path)
            .ok_or_else(|| CatalogError::UnknownApiPath {
                path: path.to_owned(),
            })
    }

    /// The allow-list for `api`, looked up by its canonical path.
    pub fn allow_list_for<K: ApiKind>(&self, api: K) -> Result<&AllowList, CatalogError> {
        match api.descriptor() {
            Some(descriptor) => self.get(descriptor.default_path),
            None => Err(CatalogError::UnknownApiPath {
                path: api.name().to_owned(),
            }),
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks that every API in `apis` has an allow-list.
    ///
    /// Entries for APIs outside the catalog are allowed.
    pub fn ensure_covers<K: ApiKind>(&self, apis: &ApiCatalog<K>) -> Result<(), CatalogError> {
        let paths: Vec<String> = apis
            .all_types()
            .map(|(_, descriptor)| descriptor.default_path)
            .filter(|path| !self.contains(path))
            .map(str::to_owned)
            .collect();
        if paths.is_empty() {
            Ok(())
        } else {
            Err(CatalogError::MissingApiPaths { paths })
        }
    }
}
