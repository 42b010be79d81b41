//! The bundled catalog of local cluster APIs.

use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::{catalog::ApiKind, ApiCatalog};

/// A supported local cluster API.
///
/// Declaration order is matching order. `Blank` is the "unclassified"
/// sentinel and never comes out of a successful classification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ApiCatalog)]
pub enum ApiType {
    #[default]
    #[api(blank)]
    Blank,
    #[api(path = "/_cat/pending_tasks")]
    CatPendingTasks,
    #[api(path = "/_cat/recovery", path_params = "optional")]
    CatRecovery,
    #[api(path = "/_cat/repositories")]
    CatRepositories,
    #[api(path = "/_cat/snapshots", path_params = "required")]
    CatSnapshots,
    #[api(path = "/_cat/tasks")]
    CatTasks,
    #[api(path = "/_cluster/health", path_params = "optional")]
    ClusterHealth,
    #[api(path = "/_cluster/settings")]
    ClusterSettings,
    #[api(path = "/_cluster/stats", path_params = "optional")]
    ClusterStats,
    #[api(path = "/_nodes/stats", prefix = "/_nodes")]
    NodesStats,
}

impl Serialize for ApiType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for ApiType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct NameVisitor;

        impl de::Visitor<'_> for NameVisitor {
            type Value = ApiType;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an api type name such as CLUSTER_HEALTH")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<ApiType, E> {
                if value.is_empty() {
                    return Ok(ApiType::Blank);
                }
                ApiType::from_name(value).ok_or_else(|| de::Error::unknown_variant(value, NAMES))
            }
        }

        deserializer.deserialize_str(NameVisitor)
    }
}

const NAMES: &[&str] = &[
    "BLANK",
    "CAT_PENDING_TASKS",
    "CAT_RECOVERY",
    "CAT_REPOSITORIES",
    "CAT_SNAPSHOTS",
    "CAT_TASKS",
    "CLUSTER_HEALTH",
    "CLUSTER_SETTINGS",
    "CLUSTER_STATS",
    "NODES_STATS",
];
