//! Centralized format and balance constants for the world-descriptor core.
//!
//! Seed keys and cluster strings are display-stable identifiers, so every
//! threshold and clamp bound here is load-bearing. Keeping them together
//! ensures the save format and the derived math can only change via code
//! reviewed in version control.

use chrono::{DateTime, Utc};

// Tick encoding ------------------------------------------------------------
// The save stream stores the creation instant as a count of 100 ns ticks
// since 0001-01-01T00:00:00Z, matching every historical format revision.
pub(crate) const TICKS_PER_SECOND: i64 = 10_000_000;
pub(crate) const NANOS_PER_TICK: i64 = 100;
pub(crate) const UNIX_EPOCH_TICKS: i64 = 621_355_968_000_000_000;

// Fixed instants -----------------------------------------------------------
/// 2021-01-21T06:58:30Z, stamped onto records decoded from formats that
/// predate the creation timestamp (format v3).
pub(crate) const LEGACY_CREATION_UNIX: i64 = 1_611_212_310;
/// 2021-09-29T00:00:00Z; worlds created strictly after this instant have
/// achievements enabled.
pub(crate) const ACHIEVEMENT_CUTOFF_UNIX: i64 = 1_632_873_600;

pub(crate) fn legacy_creation_time() -> DateTime<Utc> {
    DateTime::from_timestamp(LEGACY_CREATION_UNIX, 0).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

pub(crate) fn achievement_cutoff() -> DateTime<Utc> {
    DateTime::from_timestamp(ACHIEVEMENT_CUTOFF_UNIX, 0).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

// Resource scarcity --------------------------------------------------------
pub(crate) const RARE_RESOURCE_THRESHOLD: f32 = 0.1001;
pub(crate) const INFINITE_RESOURCE_THRESHOLD: f32 = 99.5;
/// Multiplier substituted for saves that predate the setting (format v2).
pub(crate) const DEFAULT_RESOURCE_MULTIPLIER: f32 = 1.0;

// Seed-key packing ---------------------------------------------------------
pub(crate) const STAR_COUNT_MIN: i32 = 1;
pub(crate) const STAR_COUNT_MAX: i32 = 999;
pub(crate) const SCARCITY_CODE_MIN: i32 = 1;
pub(crate) const SCARCITY_CODE_MAX: i32 = 99;
pub(crate) const DIFFICULTY_NUMBER_MAX: i32 = 99;
pub(crate) const MODE_CODE_SANDBOX: i32 = 999;
pub(crate) const MODE_CODE_COMBAT_BASE: i32 = 100;
/// Cluster strings cap the two-digit scarcity display at 99 above this.
pub(crate) const CLUSTER_SCARCITY_SATURATION: f32 = 9.95;

// Property-multiplier bands ------------------------------------------------
// Upper resource-multiplier bound (inclusive) paired with the base value;
// anything past the last band falls through to the floor.
pub(crate) const PROPERTY_BANDS: [(f32, f32); 10] = [
    (0.15, 4.0),
    (0.45, 3.0),
    (0.65, 2.0),
    (0.9, 1.5),
    (1.25, 1.0),
    (1.75, 0.9),
    (2.5, 0.8),
    (4.0, 0.7),
    (6.5, 0.6),
    (8.5, 0.5),
];
pub(crate) const PROPERTY_BAND_FLOOR: f32 = 0.4;
/// Difficulty at which the flat +1.0 property bonus kicks in.
pub(crate) const PROPERTY_BONUS_DIFFICULTY: f32 = 9.999;
