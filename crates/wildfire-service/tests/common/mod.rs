//! Shared fixtures for registry integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use wildfire_domain::RegionDraft;
use wildfire_persistence::MemoryStore;
use wildfire_service::{ActionLedger, HotspotRegistry, RegionRegistry};

pub struct TestContext {
    pub hotspots: HotspotRegistry,
    pub regions: RegionRegistry,
    pub actions: ActionLedger,
}

/// Fresh registries over one shared in-memory store.
pub fn context() -> TestContext {
    init_tracing();
    let store = Arc::new(MemoryStore::new());
    TestContext {
        hotspots: HotspotRegistry::new(store.clone()),
        regions: RegionRegistry::new(store.clone()),
        actions: ActionLedger::new(store),
    }
}

/// Install a compact subscriber so `RUST_LOG=debug cargo test` shows the
/// registry tracing output. Safe to call repeatedly.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn draft(name: &str, category: &str) -> RegionDraft {
    RegionDraft {
        name: name.to_string(),
        category: category.to_string(),
        ..RegionDraft::default()
    }
}
