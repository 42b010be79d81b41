use localuri::{ApiCatalog, ApiKind, UriClassifier, UriInput};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ApiCatalog)]
enum Snapshots {
    #[api(blank)]
    Unclassified,
    #[api(path = "/_snapshot", path_params = "required")]
    Repository,
    #[api(path = "/_cat/indices", path_params = "optional", name = "INDICES")]
    CatIndices,
}

fn main() {
    assert_eq!(Snapshots::VARIANTS.len(), 2);
    assert_eq!(Snapshots::Repository.name(), "REPOSITORY");
    assert_eq!(Snapshots::CatIndices.to_string(), "INDICES");
    assert!(Snapshots::Unclassified.is_blank());

    let descriptor = Snapshots::Repository.descriptor().unwrap();
    assert_eq!(descriptor.default_path, "/_snapshot");
    assert_eq!(descriptor.prepend_path, "/_snapshot");
    assert!(descriptor.requires_path_params);

    let catalog = ApiCatalog::<Snapshots>::new();
    assert_eq!(catalog.find("/_cat/indices/logs-*"), Some(Snapshots::CatIndices));

    let request = UriClassifier::new(&catalog)
        .construct(&UriInput::from_path("/_snapshot/backups"))
        .unwrap();
    assert_eq!(request.api_type(), Snapshots::Repository);
    assert_eq!(request.path_params(), "backups");
}
