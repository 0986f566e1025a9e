//! # Wildfire Hotspot Tracking - Domain Model
//!
//! Core domain entities, value objects, and enums for wildfire detection
//! and combat operations. These types are the single source of truth across
//! all layers: persistence, registries, and any embedding API.
//!
//! Entities reference each other by identifier only (`Uuid` fields); the
//! region → hotspot and hotspot → action ownership used for cascade deletes
//! is enforced by the persistence layer, not by an object graph.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// VALUE OBJECTS
// =============================================================================

/// Axis-aligned bounding box in degree space.
///
/// Proximity queries use a plain degree-box filter rather than great-circle
/// distance: a point matches when its latitude lies in `[lat - r, lat + r]`
/// and its longitude in `[lon - r, lon + r]`, bounds inclusive. This is a
/// deliberate approximation and is imprecise near the poles and the
/// antimeridian.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Build the degree box centered on `(lat, lon)` with half-width
    /// `radius_deg` on both axes.
    #[must_use]
    pub fn around(lat: f64, lon: f64, radius_deg: f64) -> Self {
        Self {
            min_lat: lat - radius_deg,
            max_lat: lat + radius_deg,
            min_lon: lon - radius_deg,
            max_lon: lon + radius_deg,
        }
    }

    /// Whether the point lies inside the box, bounds inclusive.
    #[must_use]
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }
}

/// Inclusive timestamp range for period queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    /// Whether `ts` falls within the range, both bounds inclusive.
    #[must_use]
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.start && ts <= self.end
    }
}

fn validate_coordinates(lat: f64, lon: f64) -> Result<(), DomainError> {
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(DomainError::InvalidCoordinates { lat, lon });
    }
    Ok(())
}

// =============================================================================
// ENUMS
// =============================================================================

/// Hotspot lifecycle status.
///
/// Transitions are not constrained to a table: any status may be set from
/// any other through the update operation. Only RESOLVED and FALSE_ALARM
/// are terminal in the sense that they stop counting toward region risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HotspotStatus {
    New,
    Confirmed,
    UnderEvaluation,
    InCombat,
    Monitoring,
    Controlled,
    Resolved,
    FalseAlarm,
}

impl HotspotStatus {
    /// Resolved detections and false alarms no longer count as active.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolved | Self::FalseAlarm)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Confirmed => "CONFIRMED",
            Self::UnderEvaluation => "UNDER_EVALUATION",
            Self::InCombat => "IN_COMBAT",
            Self::Monitoring => "MONITORING",
            Self::Controlled => "CONTROLLED",
            Self::Resolved => "RESOLVED",
            Self::FalseAlarm => "FALSE_ALARM",
        }
    }
}

/// Kind of intervention started against a hotspot.
///
/// The kind fixes the action-type label, the default resource template, and
/// the status the target hotspot transitions to when the action starts.
/// `Custom` leaves all three to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    Ground,
    Aerial,
    Monitoring,
    Custom {
        label: String,
        resources: String,
        hotspot_status: HotspotStatus,
    },
}

impl ActionKind {
    /// Action-type label recorded on the ledger entry.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Ground => "Combate terrestre",
            Self::Aerial => "Combate aéreo",
            Self::Monitoring => "Monitoramento",
            Self::Custom { label, .. } => label,
        }
    }

    /// Default resource template for the kind.
    #[must_use]
    pub fn default_resources(&self) -> &str {
        match self {
            Self::Ground => "ground brigade, water trucks, smother tools",
            Self::Aerial => "aircraft, water/retardant drop",
            Self::Monitoring => "satellite monitoring, drones, watch team",
            Self::Custom { resources, .. } => resources,
        }
    }

    /// Status the target hotspot takes when an action of this kind starts.
    #[must_use]
    pub fn hotspot_status(&self) -> HotspotStatus {
        match self {
            Self::Ground | Self::Aerial => HotspotStatus::InCombat,
            Self::Monitoring => HotspotStatus::Monitoring,
            Self::Custom { hotspot_status, .. } => *hotspot_status,
        }
    }
}

// =============================================================================
// ENTITY TYPES
// =============================================================================

/// Optional detection detail fields, used at registration and for partial
/// updates. Absent fields are left untouched on update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HotspotDetails {
    pub intensity: Option<f64>,
    pub estimated_area_m2: Option<f64>,
    pub description: Option<String>,
}

impl HotspotDetails {
    fn validate(&self) -> Result<(), DomainError> {
        if let Some(intensity) = self.intensity {
            if intensity < 0.0 {
                return Err(DomainError::NegativeIntensity(intensity));
            }
        }
        if let Some(area) = self.estimated_area_m2 {
            if area < 0.0 {
                return Err(DomainError::NegativeArea(area));
            }
        }
        Ok(())
    }
}

/// A detected fire point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub hotspot_id: Uuid,
    pub latitude: f64,
    pub longitude: f64,
    pub detected_at: DateTime<Utc>,
    pub intensity: Option<f64>,
    pub estimated_area_m2: Option<f64>,
    pub status: HotspotStatus,
    pub description: Option<String>,
    pub updated_at: DateTime<Utc>,
    pub region_id: Option<Uuid>,
}

impl Hotspot {
    /// Register a new detection at the given coordinates with status NEW.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` when latitude is outside [-90, 90] or
    /// longitude outside [-180, 180].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        validate_coordinates(latitude, longitude)?;
        let now = Utc::now();
        Ok(Self {
            hotspot_id: Uuid::new_v4(),
            latitude,
            longitude,
            detected_at: now,
            intensity: None,
            estimated_area_m2: None,
            status: HotspotStatus::New,
            description: None,
            updated_at: now,
            region_id: None,
        })
    }

    /// Register a new detection with optional intensity, estimated area,
    /// and description.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCoordinates` for out-of-range coordinates, or
    /// `NegativeIntensity`/`NegativeArea` for negative measurements.
    pub fn with_details(
        latitude: f64,
        longitude: f64,
        details: HotspotDetails,
    ) -> Result<Self, DomainError> {
        details.validate()?;
        let mut hotspot = Self::new(latitude, longitude)?;
        hotspot.intensity = details.intensity;
        hotspot.estimated_area_m2 = details.estimated_area_m2;
        hotspot.description = details.description;
        Ok(hotspot)
    }

    /// Set a new status and refresh the last-update timestamp.
    pub fn update_status(&mut self, status: HotspotStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }

    /// Apply the supplied detail fields, leaving absent ones untouched, and
    /// refresh the last-update timestamp.
    ///
    /// # Errors
    ///
    /// Returns `NegativeIntensity`/`NegativeArea` for negative measurements;
    /// nothing is applied in that case.
    pub fn update_details(&mut self, details: HotspotDetails) -> Result<(), DomainError> {
        details.validate()?;
        if let Some(intensity) = details.intensity {
            self.intensity = Some(intensity);
        }
        if let Some(area) = details.estimated_area_m2 {
            self.estimated_area_m2 = Some(area);
        }
        if let Some(description) = details.description {
            self.description = Some(description);
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Active means not yet RESOLVED and not a FALSE_ALARM.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.status.is_terminal()
    }
}

/// Registration input for a region. Risk level defaults to 1 when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionDraft {
    pub name: String,
    pub category: String,
    pub area_m2: Option<f64>,
    pub description: Option<String>,
    pub risk_level: Option<u8>,
}

/// Replacement fields for a region update. Risk level and hotspot
/// associations are never touched by an update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionUpdate {
    pub name: String,
    pub category: String,
    pub area_m2: Option<f64>,
    pub description: Option<String>,
}

/// A monitored geographic area with a derived risk level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub region_id: Uuid,
    pub name: String,
    pub category: String,
    pub area_m2: Option<f64>,
    pub description: Option<String>,
    /// 1 (lowest) to 5 (highest), derived solely from the count of active
    /// hotspots in the region.
    pub risk_level: u8,
}

impl Region {
    /// Register a new region.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRiskLevel` when an explicit risk level outside 1..=5
    /// is supplied.
    pub fn new(draft: RegionDraft) -> Result<Self, DomainError> {
        let risk_level = draft.risk_level.unwrap_or(1);
        if !(1..=5).contains(&risk_level) {
            return Err(DomainError::InvalidRiskLevel(risk_level));
        }
        Ok(Self {
            region_id: Uuid::new_v4(),
            name: draft.name,
            category: draft.category,
            area_m2: draft.area_m2,
            description: draft.description,
            risk_level,
        })
    }

    /// Risk bracket for a given count of active hotspots.
    ///
    /// 0 → 1, 1–2 → 2, 3–4 → 3, 5–9 → 4, 10+ → 5. Always recomputed from
    /// the full count, never adjusted incrementally, so it cannot drift.
    #[must_use]
    pub fn risk_level_for(active_hotspots: u64) -> u8 {
        match active_hotspots {
            0 => 1,
            1..=2 => 2,
            3..=4 => 3,
            5..=9 => 4,
            _ => 5,
        }
    }

    /// Recompute the risk level from the current active-hotspot count.
    pub fn recalculate_risk(&mut self, active_hotspots: u64) {
        self.risk_level = Self::risk_level_for(active_hotspots);
    }

    /// Replace the editable fields. Risk level is left as-is.
    pub fn apply_update(&mut self, update: RegionUpdate) {
        self.name = update.name;
        self.category = update.category;
        self.area_m2 = update.area_m2;
        self.description = update.description;
    }
}

/// A combat or monitoring intervention against one hotspot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatAction {
    pub action_id: Uuid,
    pub hotspot_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    /// Free-text label, e.g. "Combate terrestre" or a custom kind.
    pub action_type: String,
    pub description: Option<String>,
    pub resources_used: Option<String>,
    /// Recorded only when the action concludes.
    pub outcome: Option<String>,
    pub responsible: Option<String>,
}

impl CombatAction {
    /// Open a new action of the given kind against `hotspot_id`, started now.
    #[must_use]
    pub fn new(
        hotspot_id: Uuid,
        kind: &ActionKind,
        description: Option<String>,
        responsible: Option<String>,
    ) -> Self {
        Self {
            action_id: Uuid::new_v4(),
            hotspot_id,
            started_at: Utc::now(),
            ended_at: None,
            action_type: kind.label().to_string(),
            description,
            resources_used: Some(kind.default_resources().to_string()),
            outcome: None,
            responsible,
        }
    }

    /// Whether the action is still open (no end timestamp).
    #[must_use]
    pub fn is_in_progress(&self) -> bool {
        self.ended_at.is_none()
    }

    /// Close the action now and record its outcome.
    pub fn conclude(&mut self, outcome: impl Into<String>) {
        self.ended_at = Some(Utc::now());
        self.outcome = Some(outcome.into());
    }

    /// Elapsed duration in fractional hours, or `None` while in progress.
    #[must_use]
    pub fn duration_hours(&self) -> Option<f64> {
        let ended = self.ended_at?;
        let seconds = (ended - self.started_at).num_seconds();
        Some(seconds as f64 / 3600.0)
    }
}

// =============================================================================
// QUERY RESULT TYPES
// =============================================================================

/// A region together with its current active-hotspot count, as returned by
/// the activity-ordered listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionActivity {
    pub region: Region,
    pub active_hotspots: u64,
}

// =============================================================================
// ERRORS
// =============================================================================

/// Malformed-input errors. These are the only business inputs the core
/// refuses loudly; unknown identifiers surface as not-found results instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("invalid coordinates: lat={lat}, lon={lon}")]
    InvalidCoordinates { lat: f64, lon: f64 },

    #[error("intensity must be non-negative, got {0}")]
    NegativeIntensity(f64),

    #[error("estimated area must be non-negative, got {0}")]
    NegativeArea(f64),

    #[error("risk level must be within 1..=5, got {0}")]
    InvalidRiskLevel(u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_brackets_follow_active_count() {
        assert_eq!(Region::risk_level_for(0), 1);
        assert_eq!(Region::risk_level_for(1), 2);
        assert_eq!(Region::risk_level_for(2), 2);
        assert_eq!(Region::risk_level_for(3), 3);
        assert_eq!(Region::risk_level_for(4), 3);
        assert_eq!(Region::risk_level_for(5), 4);
        assert_eq!(Region::risk_level_for(9), 4);
        assert_eq!(Region::risk_level_for(10), 5);
        assert_eq!(Region::risk_level_for(250), 5);
    }

    #[test]
    fn active_depends_only_on_terminal_statuses() {
        let mut hotspot = Hotspot::new(-3.0, -62.0).unwrap();
        let active = [
            HotspotStatus::New,
            HotspotStatus::Confirmed,
            HotspotStatus::UnderEvaluation,
            HotspotStatus::InCombat,
            HotspotStatus::Monitoring,
            HotspotStatus::Controlled,
        ];
        for status in active {
            hotspot.status = status;
            assert!(hotspot.is_active(), "{status:?} should be active");
        }
        for status in [HotspotStatus::Resolved, HotspotStatus::FalseAlarm] {
            hotspot.status = status;
            assert!(!hotspot.is_active(), "{status:?} should be inactive");
        }
    }

    #[test]
    fn new_hotspot_starts_as_new() {
        let hotspot = Hotspot::new(10.0, 20.0).unwrap();
        assert_eq!(hotspot.status, HotspotStatus::New);
        assert!(hotspot.region_id.is_none());
        assert!(hotspot.intensity.is_none());
    }

    #[test]
    fn coordinates_out_of_range_are_rejected() {
        assert!(matches!(
            Hotspot::new(-90.5, 0.0),
            Err(DomainError::InvalidCoordinates { .. })
        ));
        assert!(matches!(
            Hotspot::new(0.0, 180.1),
            Err(DomainError::InvalidCoordinates { .. })
        ));
        // Poles and antimeridian are valid.
        assert!(Hotspot::new(90.0, -180.0).is_ok());
    }

    #[test]
    fn negative_measurements_are_rejected() {
        let details = HotspotDetails {
            intensity: Some(-1.0),
            ..HotspotDetails::default()
        };
        assert!(matches!(
            Hotspot::with_details(0.0, 0.0, details),
            Err(DomainError::NegativeIntensity(_))
        ));

        let mut hotspot = Hotspot::new(0.0, 0.0).unwrap();
        let err = hotspot.update_details(HotspotDetails {
            estimated_area_m2: Some(-5.0),
            ..HotspotDetails::default()
        });
        assert!(matches!(err, Err(DomainError::NegativeArea(_))));
        assert!(hotspot.estimated_area_m2.is_none());
    }

    #[test]
    fn update_details_leaves_absent_fields_untouched() {
        let mut hotspot = Hotspot::with_details(
            -3.0,
            -62.0,
            HotspotDetails {
                intensity: Some(40.0),
                estimated_area_m2: Some(1500.0),
                description: Some("canopy fire".to_string()),
            },
        )
        .unwrap();

        hotspot
            .update_details(HotspotDetails {
                intensity: Some(62.5),
                ..HotspotDetails::default()
            })
            .unwrap();

        assert_eq!(hotspot.intensity, Some(62.5));
        assert_eq!(hotspot.estimated_area_m2, Some(1500.0));
        assert_eq!(hotspot.description.as_deref(), Some("canopy fire"));
    }

    #[test]
    fn region_risk_defaults_to_lowest() {
        let region = Region::new(RegionDraft {
            name: "Cerrado".to_string(),
            category: "Savanna".to_string(),
            ..RegionDraft::default()
        })
        .unwrap();
        assert_eq!(region.risk_level, 1);

        assert!(matches!(
            Region::new(RegionDraft {
                name: "Bad".to_string(),
                category: "Test".to_string(),
                risk_level: Some(6),
                ..RegionDraft::default()
            }),
            Err(DomainError::InvalidRiskLevel(6))
        ));
    }

    #[test]
    fn region_update_never_touches_risk() {
        let mut region = Region::new(RegionDraft {
            name: "Pantanal".to_string(),
            category: "Wetland".to_string(),
            risk_level: Some(4),
            ..RegionDraft::default()
        })
        .unwrap();

        region.apply_update(RegionUpdate {
            name: "Pantanal Norte".to_string(),
            category: "Wetland".to_string(),
            area_m2: Some(1.5e11),
            description: None,
        });

        assert_eq!(region.name, "Pantanal Norte");
        assert_eq!(region.risk_level, 4);
    }

    #[test]
    fn action_kinds_fix_label_resources_and_status() {
        assert_eq!(ActionKind::Ground.label(), "Combate terrestre");
        assert_eq!(ActionKind::Aerial.label(), "Combate aéreo");
        assert_eq!(ActionKind::Monitoring.label(), "Monitoramento");
        assert_eq!(
            ActionKind::Ground.default_resources(),
            "ground brigade, water trucks, smother tools"
        );
        assert_eq!(
            ActionKind::Aerial.default_resources(),
            "aircraft, water/retardant drop"
        );
        assert_eq!(
            ActionKind::Monitoring.default_resources(),
            "satellite monitoring, drones, watch team"
        );
        assert_eq!(ActionKind::Ground.hotspot_status(), HotspotStatus::InCombat);
        assert_eq!(ActionKind::Aerial.hotspot_status(), HotspotStatus::InCombat);
        assert_eq!(
            ActionKind::Monitoring.hotspot_status(),
            HotspotStatus::Monitoring
        );

        let custom = ActionKind::Custom {
            label: "Aceiro preventivo".to_string(),
            resources: "tractor, plough line".to_string(),
            hotspot_status: HotspotStatus::Controlled,
        };
        assert_eq!(custom.label(), "Aceiro preventivo");
        assert_eq!(custom.default_resources(), "tractor, plough line");
        assert_eq!(custom.hotspot_status(), HotspotStatus::Controlled);
    }

    #[test]
    fn conclude_sets_end_and_outcome() {
        let hotspot = Hotspot::new(-3.0, -62.0).unwrap();
        let mut action = CombatAction::new(hotspot.hotspot_id, &ActionKind::Ground, None, None);
        assert!(action.is_in_progress());
        assert!(action.outcome.is_none());

        action.conclude("extinguished");
        assert!(!action.is_in_progress());
        assert!(action.ended_at.is_some());
        assert_eq!(action.outcome.as_deref(), Some("extinguished"));
    }

    #[test]
    fn duration_is_none_until_concluded() {
        let hotspot = Hotspot::new(-3.0, -62.0).unwrap();
        let mut action = CombatAction::new(hotspot.hotspot_id, &ActionKind::Aerial, None, None);
        assert_eq!(action.duration_hours(), None);

        // 90 minutes.
        action.ended_at = Some(action.started_at + chrono::Duration::seconds(5400));
        assert_eq!(action.duration_hours(), Some(1.5));

        // Multi-day span.
        action.ended_at = Some(action.started_at + chrono::Duration::seconds(3600 * 50));
        assert_eq!(action.duration_hours(), Some(50.0));
    }

    #[test]
    fn bounding_box_is_inclusive() {
        let bounds = BoundingBox::around(-3.0, -62.0, 1.0);
        assert!(bounds.contains(-4.0, -63.0));
        assert!(bounds.contains(-2.0, -61.0));
        assert!(bounds.contains(-3.0, -62.0));
        assert!(!bounds.contains(-4.1, -62.0));
        assert!(!bounds.contains(-3.0, -60.9));
    }

    #[test]
    fn time_range_is_inclusive() {
        let start = Utc::now();
        let end = start + chrono::Duration::hours(2);
        let range = TimeRange { start, end };
        assert!(range.contains(start));
        assert!(range.contains(end));
        assert!(range.contains(start + chrono::Duration::hours(1)));
        assert!(!range.contains(end + chrono::Duration::seconds(1)));
    }

    #[test]
    fn statuses_serialize_screaming_snake() {
        let json = serde_json::to_string(&HotspotStatus::UnderEvaluation).unwrap();
        assert_eq!(json, "\"UNDER_EVALUATION\"");
        let back: HotspotStatus = serde_json::from_str("\"FALSE_ALARM\"").unwrap();
        assert_eq!(back, HotspotStatus::FalseAlarm);
    }
}
