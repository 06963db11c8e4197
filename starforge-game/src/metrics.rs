//! Derived metrics computed on demand from descriptor fields.
//!
//! Everything here is pure arithmetic over current field values; nothing
//! is cached. The truncation and clamping rules are load-bearing: seed
//! keys and cluster strings are stable identifiers shared between saves
//! and players, so they must reproduce the historical arithmetic exactly,
//! including its quirks.

use crate::constants::{
    CLUSTER_SCARCITY_SATURATION, DIFFICULTY_NUMBER_MAX, INFINITE_RESOURCE_THRESHOLD,
    MODE_CODE_COMBAT_BASE, MODE_CODE_SANDBOX, PROPERTY_BAND_FLOOR, PROPERTY_BANDS,
    PROPERTY_BONUS_DIFFICULTY, RARE_RESOURCE_THRESHOLD, SCARCITY_CODE_MAX, SCARCITY_CODE_MIN,
    STAR_COUNT_MAX, STAR_COUNT_MIN,
};
use crate::descriptor::WorldDescriptor;
use crate::numbers::{clamp_f64_to_f32, round_f32_to_i32, round_f64_to_i32, trunc_f64_to_i32};

impl WorldDescriptor {
    #[must_use]
    pub const fn is_combat_mode(&self) -> bool {
        !self.is_peace_mode
    }

    #[must_use]
    pub fn is_rare_resource(&self) -> bool {
        self.resource_multiplier <= RARE_RESOURCE_THRESHOLD
    }

    #[must_use]
    pub fn is_infinite_resource(&self) -> bool {
        self.resource_multiplier >= INFINITE_RESOURCE_THRESHOLD
    }

    /// Two-digit combat difficulty code.
    ///
    /// Truncates `difficulty * 10` with a small epsilon and caps the
    /// result at 99. A strictly positive difficulty never collapses to 0,
    /// so "any nonzero difficulty" stays distinguishable from "none".
    #[must_use]
    pub fn combat_mode_difficulty_number(&self) -> i32 {
        let difficulty = self.combat_settings.difficulty;
        let mut n = trunc_f64_to_i32(f64::from(difficulty * 10.0 + 0.001));
        if n > DIFFICULTY_NUMBER_MAX {
            n = DIFFICULTY_NUMBER_MAX;
        }
        if n == 0 && difficulty > 0.0 {
            n = 1;
        }
        n
    }

    /// Stable 64-bit identifier for this seed configuration.
    ///
    /// Decimal-place packing, most significant first: galaxy seed, star
    /// count clamped to `[1, 999]`, scarcity code, mode code (999 sandbox,
    /// `100 + difficulty number` combat, 0 peace).
    #[must_use]
    pub fn seed_key64(&self) -> i64 {
        let stars = i64::from(self.star_count.clamp(STAR_COUNT_MIN, STAR_COUNT_MAX));
        let scarcity = i64::from(self.scarcity_code());
        let mode = if self.is_sandbox_mode {
            MODE_CODE_SANDBOX
        } else if self.is_combat_mode() {
            MODE_CODE_COMBAT_BASE + self.combat_mode_difficulty_number()
        } else {
            0
        };
        i64::from(self.galaxy_seed) * 100_000_000
            + stars * 100_000
            + scarcity * 1_000
            + i64::from(mode)
    }

    /// Two-digit scarcity code in `[1, 99]`, half-up from `resource * 10`.
    fn scarcity_code(&self) -> i32 {
        trunc_f64_to_i32(f64::from(self.resource_multiplier * 10.0) + 0.5)
            .clamp(SCARCITY_CODE_MIN, SCARCITY_CODE_MAX)
    }

    /// Short human-readable cluster identifier, e.g. `12345678-64-A10`.
    ///
    /// Zero-padded seed, star count, mode suffix (`-A` normal, `-S`
    /// sandbox, `-Z` combat) and the scarcity display code; combat appends
    /// a further two-digit difficulty suffix.
    #[must_use]
    pub fn cluster_string(&self) -> String {
        let scarcity = self.cluster_scarcity_label();
        if self.is_sandbox_mode {
            format!("{:08}-{}-S{scarcity}", self.galaxy_seed, self.star_count)
        } else if self.is_combat_mode() {
            let suffix = (MODE_CODE_COMBAT_BASE + self.combat_mode_difficulty_number()) % 100;
            format!(
                "{:08}-{}-Z{scarcity}-{suffix:02}",
                self.galaxy_seed, self.star_count
            )
        } else {
            format!("{:08}-{}-A{scarcity}", self.galaxy_seed, self.star_count)
        }
    }

    /// Long display form with grouped seed digits, e.g. `1234 5678 - 64 - A10`.
    #[must_use]
    pub fn cluster_string_long(&self) -> String {
        let seed = grouped_seed_digits(self.galaxy_seed);
        let scarcity = self.cluster_scarcity_label();
        if self.is_sandbox_mode {
            format!("{seed} - {} - S{scarcity}", self.star_count)
        } else if self.is_combat_mode() {
            let suffix = (MODE_CODE_COMBAT_BASE + self.combat_mode_difficulty_number()) % 100;
            format!("{seed} - {} - Z{scarcity} - {suffix:02}", self.star_count)
        } else {
            format!("{seed} - {} - A{scarcity}", self.star_count)
        }
    }

    /// Scarcity display code: saturates at `99` above 9.95, otherwise
    /// round-to-nearest of `resource * 10`, zero-padded to two digits.
    fn cluster_scarcity_label(&self) -> String {
        if self.resource_multiplier > CLUSTER_SCARCITY_SATURATION {
            "99".to_string()
        } else {
            format!("{:02}", round_f32_to_i32(self.resource_multiplier * 10.0))
        }
    }

    /// Balance multiplier for generated celestial-body properties.
    ///
    /// Piecewise step over the resource multiplier, additively boosted by
    /// combat difficulty, zero outright in sandbox mode. Rounded to two
    /// decimal places half-up.
    #[must_use]
    pub fn property_multiplier(&self) -> f32 {
        if self.is_sandbox_mode {
            return 0.0;
        }
        let difficulty = if self.is_combat_mode() {
            self.combat_settings.difficulty
        } else {
            0.0
        };
        let mut value = PROPERTY_BAND_FLOOR;
        for (limit, base) in PROPERTY_BANDS {
            if self.resource_multiplier <= limit {
                value = base;
                break;
            }
        }
        value += difficulty * (value * 0.5 + 0.5);
        if difficulty >= PROPERTY_BONUS_DIFFICULTY {
            value += 1.0;
        }
        clamp_f64_to_f32(f64::from(trunc_f64_to_i32(f64::from(value * 100.0) + 0.5)) / 100.0)
    }

    /// Multiplier applied to drops from defeated enemies.
    #[must_use]
    pub fn enemy_drop_multiplier(&self) -> f32 {
        if self.resource_multiplier > 1.0 {
            (1.0 + self.resource_multiplier * 0.1).min(2.0)
        } else {
            let tenths = round_f64_to_i32(f64::from(self.resource_multiplier).sqrt() * 10.0);
            clamp_f64_to_f32(f64::from(tenths) / 10.0)
        }
    }

    /// Crude-oil yield multiplier: halved on rare-resource worlds.
    #[must_use]
    pub fn oil_amount_multiplier(&self) -> f32 {
        if self.is_rare_resource() { 0.5 } else { 1.0 }
    }
}

/// Classify an externally supplied seed key (not necessarily this
/// record's own) as combat-mode: mode codes `[100, 199]`.
#[must_use]
pub fn is_combat_mode_seed_key(seed_key: i64) -> bool {
    let mode = seed_key % 1000;
    (100..=199).contains(&mode)
}

/// Eight-digit zero-padded seed with a space between the digit groups.
fn grouped_seed_digits(seed: i32) -> String {
    let digits = format!("{seed:08}");
    let split = digits.len() - 4;
    format!("{} {}", &digits[..split], &digits[split..])
}
