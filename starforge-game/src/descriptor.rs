//! The world-descriptor value object and its lifecycle.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ThemeRegistry;
use crate::combat::CombatSettings;
use crate::constants::achievement_cutoff;
use crate::version::GameVersion;

/// Victory-condition scope recorded with a world.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalLevel {
    None,
    Milestone,
    #[default]
    Full,
}

impl GoalLevel {
    /// Integer code stored in the save stream.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::None => 0,
            Self::Milestone => 1,
            Self::Full => 2,
        }
    }

    /// Decode a stored code. Codes written by newer builds fall back to
    /// [`GoalLevel::Full`].
    #[must_use]
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::None,
            1 => Self::Milestone,
            2 => Self::Full,
            other => {
                log::warn!("unknown goal level code {other}, keeping Full");
                Self::Full
            }
        }
    }
}

/// User-chosen parameters for a new world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewGameParams {
    pub galaxy_algo: i32,
    pub galaxy_seed: i32,
    pub star_count: i32,
    pub player_proto: i32,
    pub resource_multiplier: f32,
}

/// Record of the parameters that seeded a procedurally generated world.
///
/// Plain value object: cloning or [`WorldDescriptor::copy_from`] produces
/// independent storage, and every derived metric (see the metrics module)
/// is recomputed from current field values rather than cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldDescriptor {
    /// Set once at construction; saves predating the timestamp decode to a
    /// fixed historical instant.
    pub creation_time: DateTime<Utc>,
    pub creation_version: GameVersion,
    /// Generator algorithm selector, opaque to this core.
    pub galaxy_algo: i32,
    /// Displayed zero-padded to eight digits.
    pub galaxy_seed: i32,
    pub star_count: i32,
    pub player_proto: i32,
    /// Resource scarcity, roughly in `(0, 100]`.
    pub resource_multiplier: f32,
    /// Snapshot of the theme ids known when the world was created; length
    /// and order survive copy and save round trips exactly.
    pub saved_theme_ids: Vec<i32>,
    /// Whether the world was created strictly after the achievement cutoff
    /// date. Fixed permanently once set.
    pub achievement_enable: bool,
    pub is_peace_mode: bool,
    /// Overrides cluster/seed-key encoding when set.
    pub is_sandbox_mode: bool,
    pub combat_settings: CombatSettings,
    pub goal_level: GoalLevel,
}

impl WorldDescriptor {
    /// Build a descriptor for a new game, stamping the current UTC time.
    ///
    /// Snapshots the full ordered theme list from the registry and records
    /// the running game version. New worlds start peaceful, non-sandbox,
    /// with stock combat settings.
    #[must_use]
    pub fn for_new_game(
        params: NewGameParams,
        themes: &impl ThemeRegistry,
        version: GameVersion,
    ) -> Self {
        Self::for_new_game_at(params, themes, version, Utc::now())
    }

    /// Same as [`WorldDescriptor::for_new_game`] with an injectable clock.
    #[must_use]
    pub fn for_new_game_at(
        params: NewGameParams,
        themes: &impl ThemeRegistry,
        version: GameVersion,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            creation_time: created_at,
            creation_version: version,
            galaxy_algo: params.galaxy_algo,
            galaxy_seed: params.galaxy_seed,
            star_count: params.star_count,
            player_proto: params.player_proto,
            resource_multiplier: params.resource_multiplier,
            saved_theme_ids: themes.known_theme_ids(),
            achievement_enable: created_at > achievement_cutoff(),
            is_peace_mode: true,
            is_sandbox_mode: false,
            combat_settings: CombatSettings::default(),
            goal_level: GoalLevel::default(),
        }
    }

    /// Overwrite `self` field by field with `source`.
    ///
    /// The theme-id buffer is reallocated only when the lengths differ;
    /// otherwise the existing storage is overwritten in place. Never fails.
    pub fn copy_from(&mut self, source: &Self) {
        self.creation_time = source.creation_time;
        self.creation_version = source.creation_version;
        self.galaxy_algo = source.galaxy_algo;
        self.galaxy_seed = source.galaxy_seed;
        self.star_count = source.star_count;
        self.player_proto = source.player_proto;
        self.resource_multiplier = source.resource_multiplier;
        if self.saved_theme_ids.len() != source.saved_theme_ids.len() {
            self.saved_theme_ids = vec![0; source.saved_theme_ids.len()];
        }
        self.saved_theme_ids
            .copy_from_slice(&source.saved_theme_ids);
        self.achievement_enable = source.achievement_enable;
        self.is_peace_mode = source.is_peace_mode;
        self.is_sandbox_mode = source.is_sandbox_mode;
        self.combat_settings = source.combat_settings;
        self.goal_level = source.goal_level;
    }
}

/// Roll a displayable eight-digit galaxy seed.
#[must_use]
pub fn roll_galaxy_seed<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    rng.gen_range(0..100_000_000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    struct FixtureThemes;

    impl ThemeRegistry for FixtureThemes {
        fn known_theme_ids(&self) -> Vec<i32> {
            vec![101, 102, 103, 104]
        }
    }

    fn params() -> NewGameParams {
        NewGameParams {
            galaxy_algo: 1,
            galaxy_seed: 12_345_678,
            star_count: 64,
            player_proto: 2,
            resource_multiplier: 1.0,
        }
    }

    #[test]
    fn new_game_snapshots_themes_and_defaults() {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let desc = WorldDescriptor::for_new_game_at(
            params(),
            &FixtureThemes,
            GameVersion::new(0, 10, 32, 24_646),
            created,
        );
        assert_eq!(desc.saved_theme_ids, vec![101, 102, 103, 104]);
        assert_eq!(desc.creation_version, GameVersion::new(0, 10, 32, 24_646));
        assert!(desc.is_peace_mode);
        assert!(!desc.is_sandbox_mode);
        assert_eq!(desc.goal_level, GoalLevel::Full);
        assert_eq!(desc.combat_settings, CombatSettings::STOCK);
    }

    #[test]
    fn achievement_flag_follows_cutoff_instant() {
        let before = Utc.with_ymd_and_hms(2021, 5, 1, 0, 0, 0).unwrap();
        let desc =
            WorldDescriptor::for_new_game_at(params(), &FixtureThemes, GameVersion::default(), before);
        assert!(!desc.achievement_enable);

        let cutoff = Utc.with_ymd_and_hms(2021, 9, 29, 0, 0, 0).unwrap();
        let desc =
            WorldDescriptor::for_new_game_at(params(), &FixtureThemes, GameVersion::default(), cutoff);
        assert!(!desc.achievement_enable, "cutoff itself is excluded");

        let after = Utc.with_ymd_and_hms(2021, 9, 29, 0, 0, 1).unwrap();
        let desc =
            WorldDescriptor::for_new_game_at(params(), &FixtureThemes, GameVersion::default(), after);
        assert!(desc.achievement_enable);
    }

    #[test]
    fn copy_from_is_a_deep_field_copy() {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let source = WorldDescriptor::for_new_game_at(
            params(),
            &FixtureThemes,
            GameVersion::new(1, 2, 3, 4),
            created,
        );

        let mut target = WorldDescriptor::for_new_game_at(
            NewGameParams {
                galaxy_seed: 1,
                star_count: 32,
                ..params()
            },
            &FixtureThemes,
            GameVersion::default(),
            created,
        );
        target.saved_theme_ids = vec![9];
        target.goal_level = GoalLevel::None;

        target.copy_from(&source);
        assert_eq!(target, source);
        assert_ne!(
            target.saved_theme_ids.as_ptr(),
            source.saved_theme_ids.as_ptr(),
            "copy must own its storage"
        );
    }

    #[test]
    fn copy_from_reuses_matching_theme_storage() {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let source =
            WorldDescriptor::for_new_game_at(params(), &FixtureThemes, GameVersion::default(), created);
        let mut target =
            WorldDescriptor::for_new_game_at(params(), &FixtureThemes, GameVersion::default(), created);
        target.saved_theme_ids = vec![0, 0, 0, 0];

        let before = target.saved_theme_ids.as_ptr();
        target.copy_from(&source);
        assert_eq!(target.saved_theme_ids, source.saved_theme_ids);
        assert_eq!(target.saved_theme_ids.as_ptr(), before);
    }

    #[test]
    fn goal_level_codes_round_trip_and_unknown_falls_back() {
        for goal in [GoalLevel::None, GoalLevel::Milestone, GoalLevel::Full] {
            assert_eq!(GoalLevel::from_code(goal.code()), goal);
        }
        assert_eq!(GoalLevel::from_code(42), GoalLevel::Full);
    }

    #[test]
    fn rolled_seeds_stay_within_eight_digits() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        for _ in 0..1_000 {
            let seed = roll_galaxy_seed(&mut rng);
            assert!((0..100_000_000).contains(&seed));
        }
    }
}
