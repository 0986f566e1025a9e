//! Cross-entity effects shared by the registries.
//!
//! These helpers run inside a caller-held unit of work, so the entity they
//! touch and the entity that triggered them commit together.

use uuid::Uuid;

use crate::error::ServiceResult;
use wildfire_domain::{Hotspot, Region};
use wildfire_persistence::UnitOfWork;

/// Recompute and persist the region's risk level from its current count of
/// active hotspots. A vanished region is not an error: the trigger may be
/// processing a hotspot whose region was deleted concurrently.
pub(crate) fn refresh_region_risk(
    uow: &mut dyn UnitOfWork,
    region_id: Uuid,
) -> ServiceResult<Option<Region>> {
    let Some(mut region) = uow.regions().get(region_id)? else {
        return Ok(None);
    };
    let active = uow.hotspots().count_active_by_region(region_id)?;
    region.recalculate_risk(active);
    uow.regions_mut().save(&region)?;
    tracing::debug!(
        region_id = %region_id,
        active_hotspots = active,
        risk_level = region.risk_level,
        "region risk recalculated"
    );
    Ok(Some(region))
}

/// Delete a hotspot together with the actions that reference it. Region
/// risk is the caller's responsibility; cascades triggered by a region
/// delete must not resurrect the region.
pub(crate) fn delete_hotspot_cascading(
    uow: &mut dyn UnitOfWork,
    hotspot: &Hotspot,
) -> ServiceResult<()> {
    let actions = uow.actions().list_by_hotspot(hotspot.hotspot_id)?;
    for action in &actions {
        uow.actions_mut().delete(action.action_id)?;
    }
    uow.hotspots_mut().delete(hotspot.hotspot_id)?;
    tracing::debug!(
        hotspot_id = %hotspot.hotspot_id,
        cascaded_actions = actions.len(),
        "hotspot deleted"
    );
    Ok(())
}
