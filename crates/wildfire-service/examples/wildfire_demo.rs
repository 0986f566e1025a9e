//! End-to-end walkthrough of the registries over the in-memory store.
//!
//! Run with: `cargo run -p wildfire-service --example wildfire_demo`

use std::sync::Arc;

use wildfire_domain::{ActionKind, HotspotDetails, HotspotStatus, RegionDraft};
use wildfire_persistence::MemoryStore;
use wildfire_service::{ActionLedger, HotspotRegistry, RegionRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let store = Arc::new(MemoryStore::new());
    let regions = RegionRegistry::new(store.clone());
    let hotspots = HotspotRegistry::new(store.clone());
    let actions = ActionLedger::new(store);

    let amazonia = regions
        .register(RegionDraft {
            name: "Amazônia Legal".to_string(),
            category: "Forest".to_string(),
            area_m2: Some(5.0e12),
            description: Some("nine-state basin under federal monitoring".to_string()),
            risk_level: None,
        })
        .await?;
    tracing::info!(region = %amazonia.name, risk = amazonia.risk_level, "region registered");

    let detection = hotspots
        .register_detailed(
            -3.4653,
            -62.2159,
            HotspotDetails {
                intensity: Some(75.3),
                estimated_area_m2: Some(15_000.0),
                description: Some("dense canopy fire detected by satellite pass".to_string()),
            },
            Some(amazonia.region_id),
        )
        .await?;

    let combat = actions
        .start(
            detection.hotspot_id,
            ActionKind::Ground,
            Some("two brigades, access via BR-319".to_string()),
            Some("IBAMA Prevfogo".to_string()),
        )
        .await?;
    tracing::info!(
        action_type = %combat.action_type,
        resources = ?combat.resources_used,
        "combat underway"
    );

    let concluded = actions
        .conclude(combat.action_id, "extinguished", HotspotStatus::Resolved)
        .await?;
    tracing::info!(
        duration_hours = ?concluded.duration_hours(),
        outcome = ?concluded.outcome,
        "combat concluded"
    );

    for entry in regions.list_by_active_hotspots().await? {
        tracing::info!(
            region = %entry.region.name,
            active = entry.active_hotspots,
            risk = entry.region.risk_level,
            "current standing"
        );
    }

    Ok(())
}
