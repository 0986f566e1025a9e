//! # Action Ledger
//!
//! Owns combat/monitoring action records. Starting an action always pairs
//! with a hotspot status transition, and concluding one records the outcome
//! and moves the hotspot to its post-action status; both run as a single
//! unit of work so partial application is never observable.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::orchestration::refresh_region_risk;
use wildfire_domain::{ActionKind, CombatAction, HotspotStatus, TimeRange};
use wildfire_persistence::FireStore;

/// Ledger of combat and monitoring actions.
pub struct ActionLedger {
    store: Arc<dyn FireStore>,
}

impl ActionLedger {
    pub fn new(store: Arc<dyn FireStore>) -> Self {
        Self { store }
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    pub async fn list_all(&self) -> ServiceResult<Vec<CombatAction>> {
        let session = self.store.session().await?;
        Ok(session.actions().list_all()?)
    }

    pub async fn get(&self, action_id: Uuid) -> ServiceResult<Option<CombatAction>> {
        let session = self.store.session().await?;
        Ok(session.actions().get(action_id)?)
    }

    pub async fn list_by_hotspot(&self, hotspot_id: Uuid) -> ServiceResult<Vec<CombatAction>> {
        let session = self.store.session().await?;
        Ok(session.actions().list_by_hotspot(hotspot_id)?)
    }

    /// Actions that have not been concluded yet.
    pub async fn list_in_progress(&self) -> ServiceResult<Vec<CombatAction>> {
        let session = self.store.session().await?;
        Ok(session.actions().list_in_progress()?)
    }

    /// Case-insensitive substring search on the action-type label.
    pub async fn list_by_type(&self, fragment: &str) -> ServiceResult<Vec<CombatAction>> {
        let session = self.store.session().await?;
        Ok(session.actions().list_by_type(fragment)?)
    }

    pub async fn list_started_after(&self, ts: DateTime<Utc>) -> ServiceResult<Vec<CombatAction>> {
        let session = self.store.session().await?;
        Ok(session.actions().list_started_after(ts)?)
    }

    /// Actions concluded within the range, bounds inclusive.
    pub async fn list_concluded_between(
        &self,
        range: TimeRange,
    ) -> ServiceResult<Vec<CombatAction>> {
        let session = self.store.session().await?;
        Ok(session.actions().list_concluded_between(range)?)
    }

    /// Actions whose target hotspot belongs to the given region.
    pub async fn list_by_region(&self, region_id: Uuid) -> ServiceResult<Vec<CombatAction>> {
        let session = self.store.session().await?;
        let mut actions = Vec::new();
        for hotspot in session.hotspots().list_by_region(region_id)? {
            actions.extend(session.actions().list_by_hotspot(hotspot.hotspot_id)?);
        }
        Ok(actions)
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Start an action against a hotspot. The kind fixes the action-type
    /// label, the default resource template, and the status the hotspot
    /// transitions to (ground/aerial → IN_COMBAT, monitoring → MONITORING,
    /// custom → caller-specified). Hotspot transition and action creation
    /// commit together.
    pub async fn start(
        &self,
        hotspot_id: Uuid,
        kind: ActionKind,
        description: Option<String>,
        responsible: Option<String>,
    ) -> ServiceResult<CombatAction> {
        let mut uow = self.store.unit_of_work().await?;
        let Some(mut hotspot) = uow.hotspots().get(hotspot_id)? else {
            return Err(ServiceError::not_found("hotspot", hotspot_id));
        };

        hotspot.update_status(kind.hotspot_status());
        uow.hotspots_mut().save(&hotspot)?;
        if let Some(region_id) = hotspot.region_id {
            refresh_region_risk(&mut *uow, region_id)?;
        }

        let action = CombatAction::new(hotspot_id, &kind, description, responsible);
        uow.actions_mut().save(&action)?;

        tracing::info!(
            action_id = %action.action_id,
            hotspot_id = %hotspot_id,
            action_type = %action.action_type,
            "action started"
        );
        Ok(action)
    }

    /// Conclude an action: set its end timestamp and outcome, and move the
    /// hotspot to `new_status`, all in one unit of work. Fails with a
    /// not-found-class error when the action is unknown or already
    /// concluded; an already-concluded action is never mutated.
    pub async fn conclude(
        &self,
        action_id: Uuid,
        outcome: impl Into<String> + Send,
        new_status: HotspotStatus,
    ) -> ServiceResult<CombatAction> {
        let mut uow = self.store.unit_of_work().await?;
        let Some(mut action) = uow.actions().get(action_id)? else {
            return Err(ServiceError::not_found("combat action", action_id));
        };
        if !action.is_in_progress() {
            return Err(ServiceError::ActionConcluded(action_id));
        }
        let Some(mut hotspot) = uow.hotspots().get(action.hotspot_id)? else {
            return Err(ServiceError::not_found("hotspot", action.hotspot_id));
        };

        action.conclude(outcome);
        uow.actions_mut().save(&action)?;

        hotspot.update_status(new_status);
        uow.hotspots_mut().save(&hotspot)?;
        if let Some(region_id) = hotspot.region_id {
            refresh_region_risk(&mut *uow, region_id)?;
        }

        tracing::info!(
            action_id = %action_id,
            hotspot_id = %action.hotspot_id,
            new_status = new_status.as_str(),
            "action concluded"
        );
        Ok(action)
    }

    /// Update the description and/or resources of an in-progress action.
    /// Only non-empty supplied fields are applied. Being in progress is a
    /// precondition, not just existence.
    pub async fn update_in_progress(
        &self,
        action_id: Uuid,
        description: Option<String>,
        resources: Option<String>,
    ) -> ServiceResult<CombatAction> {
        let mut uow = self.store.unit_of_work().await?;
        let Some(mut action) = uow.actions().get(action_id)? else {
            return Err(ServiceError::not_found("combat action", action_id));
        };
        if !action.is_in_progress() {
            return Err(ServiceError::ActionConcluded(action_id));
        }

        if let Some(description) = description.filter(|d| !d.is_empty()) {
            action.description = Some(description);
        }
        if let Some(resources) = resources.filter(|r| !r.is_empty()) {
            action.resources_used = Some(resources);
        }
        uow.actions_mut().save(&action)?;

        tracing::info!(action_id = %action_id, "action updated");
        Ok(action)
    }

    /// Delete an action regardless of state. No hotspot side effects.
    /// Returns `Ok(false)` when the id is unknown.
    pub async fn remove(&self, action_id: Uuid) -> ServiceResult<bool> {
        let mut uow = self.store.unit_of_work().await?;
        let removed = uow.actions_mut().delete(action_id)?;
        if removed {
            tracing::info!(action_id = %action_id, "action removed");
        }
        Ok(removed)
    }
}
