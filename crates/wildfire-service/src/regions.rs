//! # Region Registry
//!
//! Owns region records and the risk level derived from the hotspots they
//! contain. Risk is always recomputed from the full active-hotspot count,
//! never adjusted incrementally.

use std::sync::Arc;

use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::orchestration::{delete_hotspot_cascading, refresh_region_risk};
use wildfire_domain::{Region, RegionActivity, RegionDraft, RegionUpdate};
use wildfire_persistence::FireStore;

/// Registry for monitored regions.
pub struct RegionRegistry {
    store: Arc<dyn FireStore>,
}

impl RegionRegistry {
    pub fn new(store: Arc<dyn FireStore>) -> Self {
        Self { store }
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    pub async fn list_all(&self) -> ServiceResult<Vec<Region>> {
        let session = self.store.session().await?;
        Ok(session.regions().list_all()?)
    }

    pub async fn get(&self, region_id: Uuid) -> ServiceResult<Option<Region>> {
        let session = self.store.session().await?;
        Ok(session.regions().get(region_id)?)
    }

    /// Case-insensitive substring search on the region name.
    pub async fn find_by_name(&self, fragment: &str) -> ServiceResult<Vec<Region>> {
        let session = self.store.session().await?;
        Ok(session.regions().find_by_name(fragment)?)
    }

    /// Case-insensitive match on the free-text category.
    pub async fn find_by_category(&self, category: &str) -> ServiceResult<Vec<Region>> {
        let session = self.store.session().await?;
        Ok(session.regions().find_by_category(category)?)
    }

    pub async fn list_by_min_risk(&self, level: u8) -> ServiceResult<Vec<Region>> {
        let session = self.store.session().await?;
        Ok(session.regions().list_by_min_risk(level)?)
    }

    /// All regions with their current active-hotspot count, most active
    /// first; ties are broken by name. Regions with no active hotspots are
    /// included with count 0.
    pub async fn list_by_active_hotspots(&self) -> ServiceResult<Vec<RegionActivity>> {
        let session = self.store.session().await?;
        let mut entries = Vec::new();
        for region in session.regions().list_all()? {
            let active = session.hotspots().count_active_by_region(region.region_id)?;
            entries.push(RegionActivity {
                region,
                active_hotspots: active,
            });
        }
        entries.sort_by(|a, b| {
            b.active_hotspots
                .cmp(&a.active_hotspots)
                .then_with(|| a.region.name.cmp(&b.region.name))
        });
        Ok(entries)
    }

    /// Regions with no active hotspot, including regions that have no
    /// hotspots at all.
    pub async fn list_without_active_hotspots(&self) -> ServiceResult<Vec<Region>> {
        let session = self.store.session().await?;
        let mut quiet = Vec::new();
        for region in session.regions().list_all()? {
            if session.hotspots().count_active_by_region(region.region_id)? == 0 {
                quiet.push(region);
            }
        }
        Ok(quiet)
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// Register a new region. Risk level defaults to 1 when unspecified.
    pub async fn register(&self, draft: RegionDraft) -> ServiceResult<Region> {
        let region = Region::new(draft)?;

        let mut uow = self.store.unit_of_work().await?;
        uow.regions_mut().save(&region)?;

        tracing::info!(
            region_id = %region.region_id,
            name = %region.name,
            risk_level = region.risk_level,
            "region registered"
        );
        Ok(region)
    }

    /// Replace name, category, area, and description. Risk level and
    /// hotspot associations are never touched by an update.
    pub async fn update(&self, region_id: Uuid, update: RegionUpdate) -> ServiceResult<Region> {
        let mut uow = self.store.unit_of_work().await?;
        let Some(mut region) = uow.regions().get(region_id)? else {
            return Err(ServiceError::not_found("region", region_id));
        };

        region.apply_update(update);
        uow.regions_mut().save(&region)?;

        tracing::info!(region_id = %region_id, "region updated");
        Ok(region)
    }

    /// Adopt an existing hotspot into the region and refresh the region's
    /// risk level, all in one unit of work.
    pub async fn attach_hotspot(
        &self,
        region_id: Uuid,
        hotspot_id: Uuid,
    ) -> ServiceResult<Region> {
        let mut uow = self.store.unit_of_work().await?;
        if !uow.regions().exists(region_id)? {
            return Err(ServiceError::not_found("region", region_id));
        }
        let Some(mut hotspot) = uow.hotspots().get(hotspot_id)? else {
            return Err(ServiceError::not_found("hotspot", hotspot_id));
        };

        hotspot.region_id = Some(region_id);
        uow.hotspots_mut().save(&hotspot)?;
        let region = refresh_region_risk(&mut *uow, region_id)?
            .ok_or_else(|| ServiceError::not_found("region", region_id))?;

        tracing::info!(
            region_id = %region_id,
            hotspot_id = %hotspot_id,
            "hotspot attached to region"
        );
        Ok(region)
    }

    /// Recompute the region's risk level on demand and persist it.
    pub async fn recalculate_risk(&self, region_id: Uuid) -> ServiceResult<Region> {
        let mut uow = self.store.unit_of_work().await?;
        refresh_region_risk(&mut *uow, region_id)?
            .ok_or_else(|| ServiceError::not_found("region", region_id))
    }

    /// Delete the region, cascading to its hotspots and, transitively, to
    /// their actions. Returns `Ok(false)` when the id is unknown.
    pub async fn remove(&self, region_id: Uuid) -> ServiceResult<bool> {
        let mut uow = self.store.unit_of_work().await?;
        if !uow.regions().exists(region_id)? {
            return Ok(false);
        }

        let owned = uow.hotspots().list_by_region(region_id)?;
        for hotspot in &owned {
            delete_hotspot_cascading(&mut *uow, hotspot)?;
        }
        uow.regions_mut().delete(region_id)?;

        tracing::info!(
            region_id = %region_id,
            cascaded_hotspots = owned.len(),
            "region removed"
        );
        Ok(true)
    }
}
