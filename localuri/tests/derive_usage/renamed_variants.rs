#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, localuri::ApiCatalog)]
enum Health {
    #[api(path = "/_cluster/health", name = "HEALTH")]
    Cluster,
    #[api(path = "/_nodes/stats", prefix = "/_nodes", suffix = "/stats", path_params = "optional")]
    NodeStats,
}

fn main() {
    use localuri::ApiKind;

    assert_eq!(Health::from_name("HEALTH"), Some(Health::Cluster));
    assert_eq!(Health::from_name("NODE_STATS"), Some(Health::NodeStats));
    assert_eq!(Health::from_name("CLUSTER"), None);
    assert!(!Health::Cluster.is_blank());

    let stats = Health::NodeStats.descriptor().unwrap();
    assert_eq!(stats.append_path, "/stats");
    assert_eq!(
        localuri::extract_path_params(Health::NodeStats, "/_nodes/node-1/stats", "").unwrap(),
        "node-1"
    );
}
