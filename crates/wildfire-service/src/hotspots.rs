//! # Hotspot Registry
//!
//! Owns hotspot records and their status lifecycle. Status transitions are
//! deliberately unconstrained: any status may be set from any other through
//! the update operation. Every status change that touches a region also
//! refreshes that region's risk level in the same unit of work.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::orchestration::{delete_hotspot_cascading, refresh_region_risk};
use wildfire_domain::{BoundingBox, Hotspot, HotspotDetails, HotspotStatus};
use wildfire_persistence::FireStore;

/// Registry for hotspot records.
pub struct HotspotRegistry {
    store: Arc<dyn FireStore>,
}

impl HotspotRegistry {
    pub fn new(store: Arc<dyn FireStore>) -> Self {
        Self { store }
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    pub async fn list_all(&self) -> ServiceResult<Vec<Hotspot>> {
        let session = self.store.session().await?;
        Ok(session.hotspots().list_all()?)
    }

    pub async fn get(&self, hotspot_id: Uuid) -> ServiceResult<Option<Hotspot>> {
        let session = self.store.session().await?;
        Ok(session.hotspots().get(hotspot_id)?)
    }

    pub async fn list_by_status(&self, status: HotspotStatus) -> ServiceResult<Vec<Hotspot>> {
        let session = self.store.session().await?;
        Ok(session.hotspots().list_by_status(status)?)
    }

    /// Hotspots that are neither RESOLVED nor FALSE_ALARM.
    pub async fn list_active(&self) -> ServiceResult<Vec<Hotspot>> {
        let session = self.store.session().await?;
        Ok(session.hotspots().list_active()?)
    }

    pub async fn list_by_region(&self, region_id: Uuid) -> ServiceResult<Vec<Hotspot>> {
        let session = self.store.session().await?;
        Ok(session.hotspots().list_by_region(region_id)?)
    }

    pub async fn list_detected_after(&self, ts: DateTime<Utc>) -> ServiceResult<Vec<Hotspot>> {
        let session = self.store.session().await?;
        Ok(session.hotspots().list_detected_after(ts)?)
    }

    /// Hotspots within `radius_deg` degrees of the given point on both
    /// axes. This is a degree-box filter, not great-circle distance, and is
    /// imprecise near the poles and the antimeridian.
    pub async fn find_by_proximity(
        &self,
        latitude: f64,
        longitude: f64,
        radius_deg: f64,
    ) -> ServiceResult<Vec<Hotspot>> {
        let bounds = BoundingBox::around(latitude, longitude, radius_deg);
        let session = self.store.session().await?;
        Ok(session.hotspots().list_within(bounds)?)
    }

    /// Hotspots with intensity strictly greater than `min`, most intense
    /// first.
    pub async fn find_by_min_intensity(&self, min: f64) -> ServiceResult<Vec<Hotspot>> {
        let session = self.store.session().await?;
        Ok(session.hotspots().list_min_intensity(min)?)
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// Register a new detection with status NEW. An unknown `region_id`
    /// attaches nothing and is not an error; the hotspot is simply created
    /// unowned.
    pub async fn register(
        &self,
        latitude: f64,
        longitude: f64,
        region_id: Option<Uuid>,
    ) -> ServiceResult<Hotspot> {
        let mut hotspot = Hotspot::new(latitude, longitude)?;

        let mut uow = self.store.unit_of_work().await?;
        if let Some(region_id) = region_id {
            if uow.regions().exists(region_id)? {
                hotspot.region_id = Some(region_id);
            }
        }
        uow.hotspots_mut().save(&hotspot)?;

        tracing::info!(
            hotspot_id = %hotspot.hotspot_id,
            latitude,
            longitude,
            region_id = ?hotspot.region_id,
            "hotspot registered"
        );
        Ok(hotspot)
    }

    /// Register a new detection with optional intensity, estimated area,
    /// and description. When the hotspot attaches to a region, the region's
    /// risk level is refreshed in the same unit of work.
    pub async fn register_detailed(
        &self,
        latitude: f64,
        longitude: f64,
        details: HotspotDetails,
        region_id: Option<Uuid>,
    ) -> ServiceResult<Hotspot> {
        let mut hotspot = Hotspot::with_details(latitude, longitude, details)?;

        let mut uow = self.store.unit_of_work().await?;
        if let Some(region_id) = region_id {
            if uow.regions().exists(region_id)? {
                hotspot.region_id = Some(region_id);
            }
        }
        uow.hotspots_mut().save(&hotspot)?;
        if let Some(region_id) = hotspot.region_id {
            refresh_region_risk(&mut *uow, region_id)?;
        }

        tracing::info!(
            hotspot_id = %hotspot.hotspot_id,
            intensity = ?hotspot.intensity,
            region_id = ?hotspot.region_id,
            "hotspot registered with details"
        );
        Ok(hotspot)
    }

    /// Set a new status and refresh the last-update timestamp. The owning
    /// region's risk level, if any, is recalculated in the same unit of
    /// work.
    pub async fn update_status(
        &self,
        hotspot_id: Uuid,
        status: HotspotStatus,
    ) -> ServiceResult<Hotspot> {
        let mut uow = self.store.unit_of_work().await?;
        let Some(mut hotspot) = uow.hotspots().get(hotspot_id)? else {
            return Err(ServiceError::not_found("hotspot", hotspot_id));
        };

        hotspot.update_status(status);
        uow.hotspots_mut().save(&hotspot)?;
        if let Some(region_id) = hotspot.region_id {
            refresh_region_risk(&mut *uow, region_id)?;
        }

        tracing::info!(
            hotspot_id = %hotspot_id,
            status = status.as_str(),
            "hotspot status updated"
        );
        Ok(hotspot)
    }

    /// Apply the supplied detail fields only; always refreshes the
    /// last-update timestamp.
    pub async fn update_details(
        &self,
        hotspot_id: Uuid,
        details: HotspotDetails,
    ) -> ServiceResult<Hotspot> {
        let mut uow = self.store.unit_of_work().await?;
        let Some(mut hotspot) = uow.hotspots().get(hotspot_id)? else {
            return Err(ServiceError::not_found("hotspot", hotspot_id));
        };

        hotspot.update_details(details)?;
        uow.hotspots_mut().save(&hotspot)?;

        tracing::info!(hotspot_id = %hotspot_id, "hotspot details updated");
        Ok(hotspot)
    }

    /// Delete a hotspot and the actions that reference it. Returns
    /// `Ok(false)` when the id is unknown. The owning region's risk level
    /// is recalculated afterward, within the same unit of work.
    pub async fn remove(&self, hotspot_id: Uuid) -> ServiceResult<bool> {
        let mut uow = self.store.unit_of_work().await?;
        let Some(hotspot) = uow.hotspots().get(hotspot_id)? else {
            return Ok(false);
        };

        delete_hotspot_cascading(&mut *uow, &hotspot)?;
        if let Some(region_id) = hotspot.region_id {
            refresh_region_risk(&mut *uow, region_id)?;
        }

        tracing::info!(hotspot_id = %hotspot_id, "hotspot removed");
        Ok(true)
    }
}
