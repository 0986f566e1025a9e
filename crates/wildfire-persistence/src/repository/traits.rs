//! # Repository Traits
//!
//! Abstract storage interfaces for the domain entities, plus the session
//! seam through which every registry operation runs.
//!
//! Each repository covers exactly one table; cross-entity reads (region
//! activity, actions by region) are composed by the service layer inside a
//! single session, so they observe one consistent snapshot. A session is
//! either shared (reads) or exclusive (a unit of work); everything performed
//! inside one unit of work is atomic with respect to concurrent sessions.
//! The in-memory backend realizes sessions with a process-wide lock; a
//! database-backed implementation would realize them as transactions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::Result;
use wildfire_domain::{BoundingBox, CombatAction, Hotspot, HotspotStatus, Region, TimeRange};

// =============================================================================
// HOTSPOT REPOSITORY
// =============================================================================

/// Storage operations for hotspot records.
///
/// `save` is an upsert; `delete` reports whether a row was removed.
pub trait HotspotRepository {
    fn get(&self, hotspot_id: Uuid) -> Result<Option<Hotspot>>;

    fn exists(&self, hotspot_id: Uuid) -> Result<bool>;

    fn list_all(&self) -> Result<Vec<Hotspot>>;

    fn list_by_status(&self, status: HotspotStatus) -> Result<Vec<Hotspot>>;

    /// Hotspots whose status is neither RESOLVED nor FALSE_ALARM.
    fn list_active(&self) -> Result<Vec<Hotspot>>;

    fn list_by_region(&self, region_id: Uuid) -> Result<Vec<Hotspot>>;

    fn list_detected_after(&self, ts: DateTime<Utc>) -> Result<Vec<Hotspot>>;

    /// Hotspots inside the degree box, bounds inclusive.
    fn list_within(&self, bounds: BoundingBox) -> Result<Vec<Hotspot>>;

    /// Hotspots with intensity strictly greater than `min`, descending by
    /// intensity. Hotspots without a recorded intensity never match.
    fn list_min_intensity(&self, min: f64) -> Result<Vec<Hotspot>>;

    /// Count of active hotspots attached to the region.
    fn count_active_by_region(&self, region_id: Uuid) -> Result<u64>;

    fn save(&mut self, hotspot: &Hotspot) -> Result<()>;

    fn delete(&mut self, hotspot_id: Uuid) -> Result<bool>;
}

// =============================================================================
// REGION REPOSITORY
// =============================================================================

/// Storage operations for region records.
pub trait RegionRepository {
    fn get(&self, region_id: Uuid) -> Result<Option<Region>>;

    fn exists(&self, region_id: Uuid) -> Result<bool>;

    fn list_all(&self) -> Result<Vec<Region>>;

    /// Case-insensitive substring match on the region name.
    fn find_by_name(&self, fragment: &str) -> Result<Vec<Region>>;

    /// Case-insensitive equality on the free-text category.
    fn find_by_category(&self, category: &str) -> Result<Vec<Region>>;

    /// Regions with risk level greater than or equal to `level`.
    fn list_by_min_risk(&self, level: u8) -> Result<Vec<Region>>;

    fn save(&mut self, region: &Region) -> Result<()>;

    fn delete(&mut self, region_id: Uuid) -> Result<bool>;
}

// =============================================================================
// COMBAT ACTION REPOSITORY
// =============================================================================

/// Storage operations for combat/monitoring action records.
pub trait ActionRepository {
    fn get(&self, action_id: Uuid) -> Result<Option<CombatAction>>;

    fn exists(&self, action_id: Uuid) -> Result<bool>;

    fn list_all(&self) -> Result<Vec<CombatAction>>;

    fn list_by_hotspot(&self, hotspot_id: Uuid) -> Result<Vec<CombatAction>>;

    /// Actions that have not been concluded yet.
    fn list_in_progress(&self) -> Result<Vec<CombatAction>>;

    /// Case-insensitive substring match on the action-type label.
    fn list_by_type(&self, fragment: &str) -> Result<Vec<CombatAction>>;

    fn list_started_after(&self, ts: DateTime<Utc>) -> Result<Vec<CombatAction>>;

    /// Actions whose end timestamp falls inside the range, bounds inclusive.
    fn list_concluded_between(&self, range: TimeRange) -> Result<Vec<CombatAction>>;

    fn save(&mut self, action: &CombatAction) -> Result<()>;

    fn delete(&mut self, action_id: Uuid) -> Result<bool>;
}

// =============================================================================
// SESSIONS
// =============================================================================

/// A consistent read view over all three tables.
pub trait StoreSession: Send {
    fn hotspots(&self) -> &dyn HotspotRepository;

    fn regions(&self) -> &dyn RegionRepository;

    fn actions(&self) -> &dyn ActionRepository;
}

/// An exclusive session. All writes performed through one unit of work
/// become visible to other sessions together, never partially.
pub trait UnitOfWork: StoreSession {
    fn hotspots_mut(&mut self) -> &mut dyn HotspotRepository;

    fn regions_mut(&mut self) -> &mut dyn RegionRepository;

    fn actions_mut(&mut self) -> &mut dyn ActionRepository;
}

/// Handle to the store. Cheap to clone and share; sessions borrow from it.
#[async_trait]
pub trait FireStore: Send + Sync {
    /// Open a shared read session.
    async fn session<'a>(&'a self) -> Result<Box<dyn StoreSession + 'a>>;

    /// Open an exclusive unit of work.
    async fn unit_of_work<'a>(&'a self) -> Result<Box<dyn UnitOfWork + 'a>>;
}
