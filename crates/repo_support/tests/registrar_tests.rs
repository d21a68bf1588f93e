//! Behavioral tests for the bootstrap registrar

use std::any::Any;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chaincode_client::{ChaincodeId, ClientRegistry, MockChaincodeClient};
use repo_config::{EnablementConfig, PackageRef, ScanFilter, TypeRef};
use repo_support::{
    CandidateSet, ChaincodeRepository, ChaincodeRepositoryFactory, FactoryError, FactoryRegistry,
    ImplementationRegistry, Registrar, RepositoryCandidate, RepositoryContext, RepositoryFactory,
    RepositoryMetadata, SkipReason, SupportError,
};

/// Default factory wrapped with a build counter, to observe whether any
/// repository was constructed.
struct CountingFactory {
    built: Arc<AtomicUsize>,
}

impl RepositoryFactory for CountingFactory {
    fn create(
        &self,
        context: RepositoryContext,
    ) -> Result<Arc<dyn ChaincodeRepository>, FactoryError> {
        self.built.fetch_add(1, Ordering::SeqCst);
        ChaincodeRepositoryFactory.create(context)
    }
}

/// Hand-written repository used to verify the postfix override path.
struct AuditedAssetRepository {
    metadata: RepositoryMetadata,
}

impl ChaincodeRepository for AuditedAssetRepository {
    fn metadata(&self) -> &RepositoryMetadata {
        &self.metadata
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn package(path: &str) -> PackageRef {
    PackageRef::parse(path).unwrap()
}

fn candidate(name: &str, pkg: &str, chaincode: &str) -> RepositoryCandidate {
    RepositoryCandidate::new(name, package(pkg), ChaincodeId::new("trading", chaincode)).unwrap()
}

fn standard_candidates() -> CandidateSet {
    CandidateSet::from_candidates([
        candidate("AssetRepository", "app::repos", "assets"),
        candidate("OrderRepository", "app::repos", "orders"),
        candidate("AuditRepository", "app::audit", "audit"),
    ])
    .unwrap()
}

fn one_client() -> ClientRegistry {
    ClientRegistry::new().with_client("chaincodeClient", Arc::new(MockChaincodeClient::new()))
}

fn counting_registrar(built: Arc<AtomicUsize>, clients: ClientRegistry) -> Registrar {
    let factories = FactoryRegistry::new().with_factory(
        &TypeRef::default_factory(),
        Arc::new(CountingFactory { built }),
    );
    Registrar::new(standard_candidates(), clients).with_factories(factories)
}

#[test]
fn test_unknown_client_fails_before_any_repository_is_built() {
    let built = Arc::new(AtomicUsize::new(0));
    let registrar = counting_registrar(Arc::clone(&built), ClientRegistry::new());
    let config = EnablementConfig::builder()
        .with_base_package(package("app"))
        .build()
        .unwrap();

    let err = registrar.register(&config).unwrap_err();
    assert!(err.is_resolution());
    assert!(err.to_string().contains("'chaincodeClient'"));
    assert_eq!(built.load(Ordering::SeqCst), 0);
}

#[test]
fn test_ambiguous_client_fails_before_any_repository_is_built() {
    let built = Arc::new(AtomicUsize::new(0));
    let clients = ClientRegistry::new()
        .with_client("chaincodeClient", Arc::new(MockChaincodeClient::new()))
        .with_client("chaincodeClient", Arc::new(MockChaincodeClient::new()));
    let registrar = counting_registrar(Arc::clone(&built), clients);
    let config = EnablementConfig::builder()
        .with_base_package(package("app"))
        .build()
        .unwrap();

    let err = registrar.register(&config).unwrap_err();
    assert!(err.is_resolution());
    assert!(err.to_string().contains("2 instances"));
    assert_eq!(built.load(Ordering::SeqCst), 0);
}

#[test]
fn test_renamed_client_reference_resolves() {
    let clients =
        ClientRegistry::new().with_client("ledgerClient", Arc::new(MockChaincodeClient::new()));
    let registrar = Registrar::new(standard_candidates(), clients);
    let config = EnablementConfig::builder()
        .with_base_package(package("app"))
        .with_client_reference("ledgerClient")
        .build()
        .unwrap();

    let report = registrar.register(&config).unwrap();
    assert_eq!(report.registered().len(), 3);
    let metadata = report
        .registry()
        .get("AssetRepository")
        .map(|repo| repo.metadata().clone())
        .unwrap();
    assert_eq!(metadata.client_reference, "ledgerClient");
}

#[test]
fn test_include_narrows_and_exclude_removes() {
    let registrar = Registrar::new(standard_candidates(), one_client());
    let config = EnablementConfig::builder()
        .with_base_package(package("app"))
        .with_include_filter(ScanFilter::pattern(r"Repository$").unwrap())
        .with_exclude_filter(ScanFilter::name("AuditRepository"))
        .build()
        .unwrap();

    let report = registrar.register(&config).unwrap();
    assert_eq!(report.registered(), ["AssetRepository", "OrderRepository"]);

    let skipped = report.skipped();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].name, "AuditRepository");
    assert_eq!(skipped[0].reason, SkipReason::Excluded);
}

#[test]
fn test_unmatched_include_reports_not_included() {
    let registrar = Registrar::new(standard_candidates(), one_client());
    let config = EnablementConfig::builder()
        .with_base_package(package("app"))
        .with_include_filter(ScanFilter::name("AssetRepository"))
        .build()
        .unwrap();

    let report = registrar.register(&config).unwrap();
    assert_eq!(report.registered(), ["AssetRepository"]);
    assert!(report
        .skipped()
        .iter()
        .all(|skip| skip.reason == SkipReason::NotIncluded));
}

#[test]
fn test_marker_type_package_anchors_the_scan() {
    let registrar = Registrar::new(standard_candidates(), one_client());
    let marker = TypeRef::qualified(package("app::audit"), "AuditMarker").unwrap();
    let config = EnablementConfig::builder()
        .with_base_package_type(marker)
        .build()
        .unwrap();

    let report = registrar.register(&config).unwrap();
    assert_eq!(report.registered(), ["AuditRepository"]);
    assert_eq!(
        report.packages().iter().next().map(PackageRef::as_str),
        Some("app::audit")
    );
}

#[test]
fn test_hand_written_implementation_wins_over_factory() {
    let implementations = ImplementationRegistry::new().with_implementation(
        "AssetRepositoryImpl",
        |context: RepositoryContext| {
            Ok(Arc::new(AuditedAssetRepository {
                metadata: context.metadata(),
            }) as Arc<dyn ChaincodeRepository>)
        },
    );
    let registrar = Registrar::new(standard_candidates(), one_client())
        .with_implementations(implementations);
    let config = EnablementConfig::builder()
        .with_base_package(package("app::repos"))
        .build()
        .unwrap();

    let report = registrar.register(&config).unwrap();
    let registry = report.registry();

    // the override applies only where the postfixed name matched
    assert!(registry.get_as::<AuditedAssetRepository>("AssetRepository").is_some());
    assert!(registry
        .get_as::<repo_support::DefaultChaincodeRepository>("OrderRepository")
        .is_some());
}

#[test]
fn test_postfix_override_changes_the_lookup_name() {
    let implementations = ImplementationRegistry::new()
        .with_implementation("AssetRepositoryLedger", |context: RepositoryContext| {
            Ok(Arc::new(AuditedAssetRepository {
                metadata: context.metadata(),
            }) as Arc<dyn ChaincodeRepository>)
        })
        .with_implementation("AssetRepositoryImpl", |_context| {
            Err(FactoryError::construction("wrong postfix consulted"))
        });
    let registrar = Registrar::new(standard_candidates(), one_client())
        .with_implementations(implementations);
    let config = EnablementConfig::builder()
        .with_base_package(package("app::repos"))
        .with_implementation_postfix("Ledger")
        .build()
        .unwrap();

    let report = registrar.register(&config).unwrap();
    assert!(report
        .registry()
        .get_as::<AuditedAssetRepository>("AssetRepository")
        .is_some());
}

#[test]
fn test_unknown_factory_type_fails_bootstrap() {
    let registrar = Registrar::new(standard_candidates(), one_client());
    let config = EnablementConfig::builder()
        .with_base_package(package("app"))
        .with_factory_type(TypeRef::named("MissingFactory").unwrap())
        .build()
        .unwrap();

    let err = registrar.register(&config).unwrap_err();
    assert!(matches!(err, SupportError::UnknownFactory(name) if name == "MissingFactory"));
}

#[test]
fn test_unknown_base_type_fails_bootstrap() {
    let registrar = Registrar::new(standard_candidates(), one_client());
    let config = EnablementConfig::builder()
        .with_base_package(package("app"))
        .with_base_type(TypeRef::named("MissingBase").unwrap())
        .build()
        .unwrap();

    let err = registrar.register(&config).unwrap_err();
    assert!(matches!(err, SupportError::UnknownBase(name) if name == "MissingBase"));
}

#[test]
fn test_construction_failure_names_the_repository() {
    let implementations = ImplementationRegistry::new().with_implementation(
        "OrderRepositoryImpl",
        |_context| Err(FactoryError::construction("missing order index")),
    );
    let registrar = Registrar::new(standard_candidates(), one_client())
        .with_implementations(implementations);
    let config = EnablementConfig::builder()
        .with_base_package(package("app::repos"))
        .build()
        .unwrap();

    let err = registrar.register(&config).unwrap_err();
    assert!(matches!(
        &err,
        SupportError::Construction { repository, .. } if repository == "OrderRepository"
    ));
    assert!(err.to_string().contains("missing order index"));
}

#[test]
fn test_same_name_in_two_scanned_packages_collides() {
    let candidates = CandidateSet::from_candidates([
        candidate("AssetRepository", "app::repos", "assets"),
        candidate("AssetRepository", "app::audit", "audit"),
    ])
    .unwrap();
    let registrar = Registrar::new(candidates, one_client());
    let config = EnablementConfig::builder()
        .with_base_package(package("app"))
        .build()
        .unwrap();

    let err = registrar.register(&config).unwrap_err();
    assert!(matches!(err, SupportError::DuplicateRepository(name) if name == "AssetRepository"));
}

#[test]
fn test_registrar_is_reusable_across_configs() {
    let registrar = Registrar::new(standard_candidates(), one_client());

    let repos_only = registrar
        .register(
            &EnablementConfig::builder()
                .with_base_package(package("app::repos"))
                .build()
                .unwrap(),
        )
        .unwrap();
    let audit_only = registrar
        .register(
            &EnablementConfig::builder()
                .with_base_package(package("app::audit"))
                .build()
                .unwrap(),
        )
        .unwrap();

    assert_eq!(repos_only.registered().len(), 2);
    assert_eq!(audit_only.registered(), ["AuditRepository"]);
}

#[tokio::test]
async fn test_wired_repository_serves_calls_through_the_resolved_client() {
    let client = Arc::new(MockChaincodeClient::new());
    client.respond_with("readAsset", b"asset-1".to_vec()).await;
    let clients = ClientRegistry::new().with_client("chaincodeClient", client.clone());

    let registrar = Registrar::new(standard_candidates(), clients);
    let config = EnablementConfig::builder()
        .with_base_package(package("app::repos"))
        .build()
        .unwrap();

    let registry = registrar.register(&config).unwrap().into_registry();
    let assets = registry
        .get_as::<repo_support::DefaultChaincodeRepository>("AssetRepository")
        .unwrap();

    let outcome = assets.query("readAsset", ["asset-1"]).await.unwrap();
    assert_eq!(outcome.payload_utf8().unwrap(), "asset-1");
    assert_eq!(client.call_count().await, 1);
}
