//! The typed action a classified request dispatches as.

use serde::{Deserialize, Serialize};

use crate::{api_type::ApiType, classify::CanonicalRequest, error::ClassifyError};

/// The action behind a supported API, with its path parameters parsed.
///
/// List parameters are split on `,` with empty items dropped; an empty list
/// means "all".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ApiRequest {
    CatPendingTasks,
    CatRecovery { indices: Vec<String> },
    CatRepositories,
    /// Every snapshot in `repository`.
    CatSnapshots { repository: String },
    CatTasks,
    ClusterHealth { indices: Vec<String> },
    /// Cluster state without the routing table or node list.
    ClusterSettings,
    ClusterStats { node_ids: Vec<String> },
    NodesStats,
}

impl ApiRequest {
    pub fn api_type(&self) -> ApiType {
        match self {
            ApiRequest::CatPendingTasks => ApiType::CatPendingTasks,
            ApiRequest::CatRecovery { .. } => ApiType::CatRecovery,
            ApiRequest::CatRepositories => ApiType::CatRepositories,
            ApiRequest::CatSnapshots { .. } => ApiType::CatSnapshots,
            ApiRequest::CatTasks => ApiType::CatTasks,
            ApiRequest::ClusterHealth { .. } => ApiType::ClusterHealth,
            ApiRequest::ClusterSettings => ApiType::ClusterSettings,
            ApiRequest::ClusterStats { .. } => ApiType::ClusterStats,
            ApiRequest::NodesStats => ApiType::NodesStats,
        }
    }
}

fn split_list(path_params: &str) -> Vec<String> {
    path_params
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

impl CanonicalRequest<ApiType> {
    /// Resolves the request to the action it dispatches as.
    pub fn to_api_request(&self) -> Result<ApiRequest, ClassifyError> {
        let params = self.path_params();
        let request = match self.api_type() {
            ApiType::Blank => {
                return Err(ClassifyError::UnsupportedApi {
                    path: self.path().to_owned(),
                })
            }
            ApiType::CatPendingTasks => ApiRequest::CatPendingTasks,
            ApiType::CatRecovery => ApiRequest::CatRecovery {
                indices: split_list(params),
            },
            ApiType::CatRepositories => ApiRequest::CatRepositories,
            ApiType::CatSnapshots => ApiRequest::CatSnapshots {
                repository: params.to_owned(),
            },
            ApiType::CatTasks => ApiRequest::CatTasks,
            ApiType::ClusterHealth => ApiRequest::ClusterHealth {
                indices: split_list(params),
            },
            ApiType::ClusterSettings => ApiRequest::ClusterSettings,
            ApiType::ClusterStats => ApiRequest::ClusterStats {
                node_ids: split_list(params),
            },
            ApiType::NodesStats => ApiRequest::NodesStats,
        };
        Ok(request)
    }
}
