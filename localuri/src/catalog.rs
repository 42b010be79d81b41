//! The API catalog: which administrative APIs are reachable, and how a
//! request path is matched to one of them.
//!
//! An API set is a fieldless enum implementing [`ApiKind`], normally through
//! `#[derive(ApiCatalog)]`. Each routable variant points at one static
//! [`ApiDescriptor`]. [`ApiCatalog`] is the constructed-once table the
//! classifier matches against; it is built from the enum's declaration order,
//! which is also the matching order.

use std::fmt;

use serde::Serializer;

use crate::api_type::ApiType;

/// Path-matching rules for one supported API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ApiDescriptor {
    /// Canonical path. Also the key of the API's allow-list.
    pub default_path: &'static str,
    /// Prefix used for matching and for stripping path parameters.
    pub prepend_path: &'static str,
    /// Suffix stripped when extracting path parameters.
    pub append_path: &'static str,
    /// Whether path parameters may follow the prefix.
    pub supports_path_params: bool,
    /// Whether a request without path parameters is rejected.
    pub requires_path_params: bool,
}

impl ApiDescriptor {
    /// Returns `true` if `path` falls under this API's prefix.
    pub fn matches(&self, path: &str) -> bool {
        path.starts_with(self.prepend_path)
    }
}

/// A closed set of supported API identifiers.
///
/// Implement this with `#[derive(ApiCatalog)]` rather than by hand; the derive
/// keeps [`ApiKind::VARIANTS`], the descriptors, and the names in sync.
///
/// ## Example
/// ```
/// use localuri::{ApiCatalog, ApiKind};
///
/// #[derive(Clone, Copy, Debug, PartialEq, Eq, ApiCatalog)]
/// enum Monitoring {
///     #[api(blank)]
///     Unclassified,
///     #[api(path = "/_cluster/health", path_params = "optional")]
///     Health,
///     #[api(path = "/_nodes/stats", prefix = "/_nodes", name = "NODES")]
///     Nodes,
/// }
///
/// assert_eq!(Monitoring::VARIANTS, &[Monitoring::Health, Monitoring::Nodes]);
/// assert_eq!(Monitoring::Health.name(), "HEALTH");
/// assert_eq!(Monitoring::from_name("NODES"), Some(Monitoring::Nodes));
/// assert!(Monitoring::Unclassified.descriptor().is_none());
///
/// let catalog = ApiCatalog::<Monitoring>::new();
/// assert_eq!(catalog.find("/_nodes/_local/stats"), Some(Monitoring::Nodes));
/// ```
///
/// Two variants cannot share a path:
/// ```compile_fail
/// #[derive(Clone, Copy, Debug, PartialEq, Eq, localuri::ApiCatalog)]
/// enum Twice {
///     #[api(path = "/_cat/tasks")]
///     Tasks,
///     #[api(path = "/_cat/tasks", name = "TASKS_AGAIN")]
///     TasksAgain,
/// }
/// ```
pub trait ApiKind: Copy + Eq + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Every routable variant, in declaration order. Excludes the sentinel.
    const VARIANTS: &'static [Self];

    /// The matching rules, or `None` for the "unclassified" sentinel.
    fn descriptor(self) -> Option<&'static ApiDescriptor>;

    /// The wire name, e.g. `CLUSTER_HEALTH`.
    fn name(self) -> &'static str;

    /// Parses a wire name.
    fn from_name(name: &str) -> Option<Self>;

    fn is_blank(self) -> bool {
        self.descriptor().is_none()
    }
}

pub(crate) fn serialize_kind<K, S>(kind: &K, serializer: S) -> Result<S::Ok, S::Error>
where
    K: ApiKind,
    S: Serializer,
{
    serializer.serialize_str(kind.name())
}

/// The ordered table of reachable APIs.
///
/// Built once and read-only afterwards; share it by reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiCatalog<K: ApiKind = ApiType> {
    entries: Vec<(K, &'static ApiDescriptor)>,
}

impl<K: ApiKind> ApiCatalog<K> {
    /// A catalog of every routable variant of `K`.
    pub fn new() -> Self {
        Self::restricted_to(K::VARIANTS.iter().copied())
    }

    /// A catalog limited to `types`, still in `K`'s declaration order.
    ///
    /// The sentinel and duplicates are ignored.
    pub fn restricted_to<I>(types: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        let wanted: Vec<K> = types.into_iter().collect();
        let entries = K::VARIANTS
            .iter()
            .copied()
            .filter(|kind| wanted.contains(kind))
            .filter_map(|kind| kind.descriptor().map(|descriptor| (kind, descriptor)))
            .collect();
        Self { entries }
    }

    /// The descriptor of `kind`, if the catalog contains it.
    pub fn lookup(&self, kind: K) -> Option<&'static ApiDescriptor> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == kind)
            .map(|(_, descriptor)| *descriptor)
    }

    /// Every entry in matching order.
    pub fn all_types(&self) -> impl Iterator<Item = (K, &'static ApiDescriptor)> + '_ {
        self.entries.iter().copied()
    }

    /// The first entry, in declaration order, whose prefix matches `path`.
    ///
    /// This is first-match, not longest-match: see [`ApiCatalog::shadowed`].
    pub fn find(&self, path: &str) -> Option<K> {
        self.find_entry(path).map(|(kind, _)| kind)
    }

    pub(crate) fn find_entry(&self, path: &str) -> Option<(K, &'static ApiDescriptor)> {
        self.entries
            .iter()
            .copied()
            .find(|(_, descriptor)| descriptor.matches(path))
    }

    /// Pairs `(earlier, later)` where `later` can never be matched because
    /// `earlier`'s prefix already covers every path `later` would match.
    pub fn shadowed(&self) -> Vec<(K, K)> {
        let mut shadowed = Vec::new();
        for (index, (later, later_descriptor)) in self.entries.iter().enumerate() {
            if let Some((earlier, _)) = self.entries[..index]
                .iter()
                .find(|(_, descriptor)| later_descriptor.prepend_path.starts_with(descriptor.prepend_path))
            {
                shadowed.push((*earlier, *later));
            }
        }
        shadowed
    }

    pub fn contains(&self, kind: K) -> bool {
        self.lookup(kind).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: ApiKind> Default for ApiCatalog<K> {
    fn default() -> Self {
        Self::new()
    }
}
