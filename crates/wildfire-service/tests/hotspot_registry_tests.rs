//! Hotspot registration, status lifecycle, and geographic queries.

mod common;

use common::{context, draft};
use uuid::Uuid;
use wildfire_domain::{DomainError, HotspotDetails, HotspotStatus};
use wildfire_service::ServiceError;

#[tokio::test]
async fn register_creates_new_unattached_hotspot() {
    let ctx = context();

    let hotspot = ctx.hotspots.register(-3.4653, -62.2159, None).await.unwrap();
    assert_eq!(hotspot.status, HotspotStatus::New);
    assert!(hotspot.region_id.is_none());

    let stored = ctx.hotspots.get(hotspot.hotspot_id).await.unwrap().unwrap();
    assert_eq!(stored, hotspot);
}

#[tokio::test]
async fn register_with_unknown_region_attaches_nothing() {
    let ctx = context();

    let hotspot = ctx
        .hotspots
        .register(-3.0, -62.0, Some(Uuid::new_v4()))
        .await
        .unwrap();
    assert!(hotspot.region_id.is_none());
}

#[tokio::test]
async fn register_rejects_malformed_coordinates() {
    let ctx = context();

    let err = ctx.hotspots.register(91.0, 0.0, None).await.unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Domain(DomainError::InvalidCoordinates { .. })
    ));
    assert!(ctx.hotspots.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn register_detailed_refreshes_region_risk() {
    let ctx = context();
    let region = ctx.regions.register(draft("Chapada", "Savanna")).await.unwrap();
    assert_eq!(region.risk_level, 1);

    ctx.hotspots
        .register_detailed(
            -14.1,
            -47.5,
            HotspotDetails {
                intensity: Some(55.0),
                estimated_area_m2: Some(12_000.0),
                description: Some("ridge fire".to_string()),
            },
            Some(region.region_id),
        )
        .await
        .unwrap();

    let region = ctx.regions.get(region.region_id).await.unwrap().unwrap();
    assert_eq!(region.risk_level, 2);
}

#[tokio::test]
async fn update_status_refreshes_owning_region() {
    let ctx = context();
    let region = ctx.regions.register(draft("Pantanal", "Wetland")).await.unwrap();

    let hotspot = ctx
        .hotspots
        .register(-17.5, -57.0, Some(region.region_id))
        .await
        .unwrap();
    assert_eq!(
        ctx.regions.get(region.region_id).await.unwrap().unwrap().risk_level,
        1,
        "plain register does not recalculate"
    );

    ctx.hotspots
        .update_status(hotspot.hotspot_id, HotspotStatus::Confirmed)
        .await
        .unwrap();
    assert_eq!(
        ctx.regions.get(region.region_id).await.unwrap().unwrap().risk_level,
        2
    );

    ctx.hotspots
        .update_status(hotspot.hotspot_id, HotspotStatus::FalseAlarm)
        .await
        .unwrap();
    assert_eq!(
        ctx.regions.get(region.region_id).await.unwrap().unwrap().risk_level,
        1
    );
}

#[tokio::test]
async fn update_status_unknown_id_is_not_found() {
    let ctx = context();

    let err = ctx
        .hotspots
        .update_status(Uuid::new_v4(), HotspotStatus::Confirmed)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn update_details_applies_only_supplied_fields() {
    let ctx = context();
    let hotspot = ctx
        .hotspots
        .register_detailed(
            -3.0,
            -62.0,
            HotspotDetails {
                intensity: Some(40.0),
                estimated_area_m2: Some(8_000.0),
                description: None,
            },
            None,
        )
        .await
        .unwrap();

    let updated = ctx
        .hotspots
        .update_details(
            hotspot.hotspot_id,
            HotspotDetails {
                description: Some("spreading north".to_string()),
                ..HotspotDetails::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.intensity, Some(40.0));
    assert_eq!(updated.estimated_area_m2, Some(8_000.0));
    assert_eq!(updated.description.as_deref(), Some("spreading north"));
    assert!(updated.updated_at >= hotspot.updated_at);

    let err = ctx
        .hotspots
        .update_details(Uuid::new_v4(), HotspotDetails::default())
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn remove_recalculates_region_and_cascades_actions() {
    let ctx = context();
    let region = ctx.regions.register(draft("Cerrado", "Savanna")).await.unwrap();
    let hotspot = ctx
        .hotspots
        .register(-15.6, -47.8, Some(region.region_id))
        .await
        .unwrap();
    ctx.hotspots
        .update_status(hotspot.hotspot_id, HotspotStatus::Confirmed)
        .await
        .unwrap();
    assert_eq!(
        ctx.regions.get(region.region_id).await.unwrap().unwrap().risk_level,
        2
    );

    let action = ctx
        .actions
        .start(
            hotspot.hotspot_id,
            wildfire_domain::ActionKind::Monitoring,
            None,
            None,
        )
        .await
        .unwrap();

    assert!(ctx.hotspots.remove(hotspot.hotspot_id).await.unwrap());
    assert_eq!(
        ctx.regions.get(region.region_id).await.unwrap().unwrap().risk_level,
        1
    );
    assert!(ctx.actions.get(action.action_id).await.unwrap().is_none());

    assert!(!ctx.hotspots.remove(hotspot.hotspot_id).await.unwrap());
}

#[tokio::test]
async fn proximity_query_matches_degree_box_inclusively() {
    let ctx = context();
    for (lat, lon) in [
        (-4.0, -63.0),
        (-2.0, -61.0),
        (-3.0, -62.0),
        (-4.1, -62.0),
        (-3.0, -60.9),
    ] {
        ctx.hotspots.register(lat, lon, None).await.unwrap();
    }

    let nearby = ctx.hotspots.find_by_proximity(-3.0, -62.0, 1.0).await.unwrap();
    assert_eq!(nearby.len(), 3);
    for hotspot in &nearby {
        assert!((-4.0..=-2.0).contains(&hotspot.latitude));
        assert!((-63.0..=-61.0).contains(&hotspot.longitude));
    }
}

#[tokio::test]
async fn status_and_activity_listings_filter_correctly() {
    let ctx = context();
    let confirmed = ctx.hotspots.register(0.0, 0.0, None).await.unwrap();
    ctx.hotspots
        .update_status(confirmed.hotspot_id, HotspotStatus::Confirmed)
        .await
        .unwrap();
    let resolved = ctx.hotspots.register(1.0, 1.0, None).await.unwrap();
    ctx.hotspots
        .update_status(resolved.hotspot_id, HotspotStatus::Resolved)
        .await
        .unwrap();

    let by_status = ctx
        .hotspots
        .list_by_status(HotspotStatus::Confirmed)
        .await
        .unwrap();
    assert_eq!(by_status.len(), 1);
    assert_eq!(by_status[0].hotspot_id, confirmed.hotspot_id);

    let active = ctx.hotspots.list_active().await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].hotspot_id, confirmed.hotspot_id);
}
