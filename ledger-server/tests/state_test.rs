//! Server state bootstrap tests

use ledger_server::db::repository::ProductRepository;
use ledger_server::db::repository::product::ProductFilter;
use ledger_server::{Config, ServerState};

#[tokio::test]
async fn initialize_builds_work_dir_and_opens_the_database() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = Config::with_overrides(dir.path().to_string_lossy().to_string(), 0);

    let state = ServerState::initialize(&config).await.expect("initialize");

    assert!(config.database_dir().exists());
    assert!(config.logs_dir().exists());

    // Schema applied and queries work against the on-disk store
    let repo = ProductRepository::new(state.db());
    let products = repo.list("shop-x", &ProductFilter::default()).await.unwrap();
    assert!(products.is_empty());
}
