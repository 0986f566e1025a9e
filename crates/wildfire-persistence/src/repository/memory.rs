//! In-memory storage backend.
//!
//! Backs the repository traits with plain hash maps behind one process-wide
//! `tokio::sync::RwLock`. A read session holds the shared guard and a unit
//! of work holds the exclusive guard, so a multi-entity update is never
//! partially visible to concurrent readers. This backend is the reference
//! implementation used by tests and embedding callers; a database-backed
//! store would implement the same traits over transactions.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::error::Result;
use crate::repository::traits::{
    ActionRepository, FireStore, HotspotRepository, RegionRepository, StoreSession, UnitOfWork,
};
use wildfire_domain::{BoundingBox, CombatAction, Hotspot, HotspotStatus, Region, TimeRange};

// =============================================================================
// TABLES
// =============================================================================

#[derive(Debug, Default)]
struct Tables {
    hotspots: HotspotTable,
    regions: RegionTable,
    actions: ActionTable,
}

#[derive(Debug, Default)]
struct HotspotTable {
    rows: HashMap<Uuid, Hotspot>,
}

impl HotspotRepository for HotspotTable {
    fn get(&self, hotspot_id: Uuid) -> Result<Option<Hotspot>> {
        Ok(self.rows.get(&hotspot_id).cloned())
    }

    fn exists(&self, hotspot_id: Uuid) -> Result<bool> {
        Ok(self.rows.contains_key(&hotspot_id))
    }

    fn list_all(&self) -> Result<Vec<Hotspot>> {
        Ok(self.rows.values().cloned().collect())
    }

    fn list_by_status(&self, status: HotspotStatus) -> Result<Vec<Hotspot>> {
        Ok(self
            .rows
            .values()
            .filter(|h| h.status == status)
            .cloned()
            .collect())
    }

    fn list_active(&self) -> Result<Vec<Hotspot>> {
        Ok(self
            .rows
            .values()
            .filter(|h| h.is_active())
            .cloned()
            .collect())
    }

    fn list_by_region(&self, region_id: Uuid) -> Result<Vec<Hotspot>> {
        Ok(self
            .rows
            .values()
            .filter(|h| h.region_id == Some(region_id))
            .cloned()
            .collect())
    }

    fn list_detected_after(&self, ts: DateTime<Utc>) -> Result<Vec<Hotspot>> {
        Ok(self
            .rows
            .values()
            .filter(|h| h.detected_at > ts)
            .cloned()
            .collect())
    }

    fn list_within(&self, bounds: BoundingBox) -> Result<Vec<Hotspot>> {
        Ok(self
            .rows
            .values()
            .filter(|h| bounds.contains(h.latitude, h.longitude))
            .cloned()
            .collect())
    }

    fn list_min_intensity(&self, min: f64) -> Result<Vec<Hotspot>> {
        let mut matches: Vec<Hotspot> = self
            .rows
            .values()
            .filter(|h| h.intensity.is_some_and(|i| i > min))
            .cloned()
            .collect();
        matches.sort_by(|a, b| {
            b.intensity
                .partial_cmp(&a.intensity)
                .unwrap_or(Ordering::Equal)
        });
        Ok(matches)
    }

    fn count_active_by_region(&self, region_id: Uuid) -> Result<u64> {
        Ok(self
            .rows
            .values()
            .filter(|h| h.region_id == Some(region_id) && h.is_active())
            .count() as u64)
    }

    fn save(&mut self, hotspot: &Hotspot) -> Result<()> {
        self.rows.insert(hotspot.hotspot_id, hotspot.clone());
        Ok(())
    }

    fn delete(&mut self, hotspot_id: Uuid) -> Result<bool> {
        Ok(self.rows.remove(&hotspot_id).is_some())
    }
}

#[derive(Debug, Default)]
struct RegionTable {
    rows: HashMap<Uuid, Region>,
}

impl RegionRepository for RegionTable {
    fn get(&self, region_id: Uuid) -> Result<Option<Region>> {
        Ok(self.rows.get(&region_id).cloned())
    }

    fn exists(&self, region_id: Uuid) -> Result<bool> {
        Ok(self.rows.contains_key(&region_id))
    }

    fn list_all(&self) -> Result<Vec<Region>> {
        Ok(self.rows.values().cloned().collect())
    }

    fn find_by_name(&self, fragment: &str) -> Result<Vec<Region>> {
        let needle = fragment.to_lowercase();
        Ok(self
            .rows
            .values()
            .filter(|r| r.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    fn find_by_category(&self, category: &str) -> Result<Vec<Region>> {
        Ok(self
            .rows
            .values()
            .filter(|r| r.category.eq_ignore_ascii_case(category))
            .cloned()
            .collect())
    }

    fn list_by_min_risk(&self, level: u8) -> Result<Vec<Region>> {
        Ok(self
            .rows
            .values()
            .filter(|r| r.risk_level >= level)
            .cloned()
            .collect())
    }

    fn save(&mut self, region: &Region) -> Result<()> {
        self.rows.insert(region.region_id, region.clone());
        Ok(())
    }

    fn delete(&mut self, region_id: Uuid) -> Result<bool> {
        Ok(self.rows.remove(&region_id).is_some())
    }
}

#[derive(Debug, Default)]
struct ActionTable {
    rows: HashMap<Uuid, CombatAction>,
}

impl ActionRepository for ActionTable {
    fn get(&self, action_id: Uuid) -> Result<Option<CombatAction>> {
        Ok(self.rows.get(&action_id).cloned())
    }

    fn exists(&self, action_id: Uuid) -> Result<bool> {
        Ok(self.rows.contains_key(&action_id))
    }

    fn list_all(&self) -> Result<Vec<CombatAction>> {
        Ok(self.rows.values().cloned().collect())
    }

    fn list_by_hotspot(&self, hotspot_id: Uuid) -> Result<Vec<CombatAction>> {
        Ok(self
            .rows
            .values()
            .filter(|a| a.hotspot_id == hotspot_id)
            .cloned()
            .collect())
    }

    fn list_in_progress(&self) -> Result<Vec<CombatAction>> {
        Ok(self
            .rows
            .values()
            .filter(|a| a.is_in_progress())
            .cloned()
            .collect())
    }

    fn list_by_type(&self, fragment: &str) -> Result<Vec<CombatAction>> {
        let needle = fragment.to_lowercase();
        Ok(self
            .rows
            .values()
            .filter(|a| a.action_type.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    fn list_started_after(&self, ts: DateTime<Utc>) -> Result<Vec<CombatAction>> {
        Ok(self
            .rows
            .values()
            .filter(|a| a.started_at > ts)
            .cloned()
            .collect())
    }

    fn list_concluded_between(&self, range: TimeRange) -> Result<Vec<CombatAction>> {
        Ok(self
            .rows
            .values()
            .filter(|a| a.ended_at.is_some_and(|ended| range.contains(ended)))
            .cloned()
            .collect())
    }

    fn save(&mut self, action: &CombatAction) -> Result<()> {
        self.rows.insert(action.action_id, action.clone());
        Ok(())
    }

    fn delete(&mut self, action_id: Uuid) -> Result<bool> {
        Ok(self.rows.remove(&action_id).is_some())
    }
}

// =============================================================================
// STORE
// =============================================================================

/// In-memory store handle. Clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FireStore for MemoryStore {
    async fn session<'a>(&'a self) -> Result<Box<dyn StoreSession + 'a>> {
        Ok(Box::new(MemorySession {
            tables: self.tables.read().await,
        }))
    }

    async fn unit_of_work<'a>(&'a self) -> Result<Box<dyn UnitOfWork + 'a>> {
        tracing::trace!("opening exclusive unit of work");
        Ok(Box::new(MemoryUnitOfWork {
            tables: self.tables.write().await,
        }))
    }
}

struct MemorySession<'a> {
    tables: RwLockReadGuard<'a, Tables>,
}

impl StoreSession for MemorySession<'_> {
    fn hotspots(&self) -> &dyn HotspotRepository {
        &self.tables.hotspots
    }

    fn regions(&self) -> &dyn RegionRepository {
        &self.tables.regions
    }

    fn actions(&self) -> &dyn ActionRepository {
        &self.tables.actions
    }
}

struct MemoryUnitOfWork<'a> {
    tables: RwLockWriteGuard<'a, Tables>,
}

impl StoreSession for MemoryUnitOfWork<'_> {
    fn hotspots(&self) -> &dyn HotspotRepository {
        &self.tables.hotspots
    }

    fn regions(&self) -> &dyn RegionRepository {
        &self.tables.regions
    }

    fn actions(&self) -> &dyn ActionRepository {
        &self.tables.actions
    }
}

impl UnitOfWork for MemoryUnitOfWork<'_> {
    fn hotspots_mut(&mut self) -> &mut dyn HotspotRepository {
        &mut self.tables.hotspots
    }

    fn regions_mut(&mut self) -> &mut dyn RegionRepository {
        &mut self.tables.regions
    }

    fn actions_mut(&mut self) -> &mut dyn ActionRepository {
        &mut self.tables.actions
    }
}
