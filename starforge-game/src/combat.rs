//! Combat-settings sub-record carried opaquely inside world descriptors.
//!
//! The descriptor core only relies on `difficulty` and on the blob's own
//! export/import round trip; the remaining knobs belong to the combat
//! system and travel through untouched.

use serde::{Deserialize, Serialize};

use crate::codec::{ByteReader, ByteWriter, CodecError};

/// Version tag of the combat blob itself, independent of the outer
/// descriptor format version.
const COMBAT_FORMAT_VERSION: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CombatSettings {
    /// Overall hostile-force difficulty in `[0, 10]`. Drives the seed-key
    /// mode code and the property-multiplier boost.
    pub difficulty: f32,
    pub aggressiveness: f32,
    pub initial_level: i32,
    pub growth_speed: f32,
    pub battle_exp_factor: f32,
}

impl Default for CombatSettings {
    fn default() -> Self {
        Self::STOCK
    }
}

impl CombatSettings {
    /// Stock settings applied to fresh worlds and to saves predating the
    /// combat blob (descriptor format v8).
    pub const STOCK: Self = Self {
        difficulty: 1.0,
        aggressiveness: 0.5,
        initial_level: 0,
        growth_speed: 1.0,
        battle_exp_factor: 1.0,
    };

    /// Reset to the stock settings used for fresh worlds.
    pub fn set_default(&mut self) {
        *self = Self::STOCK;
    }

    /// Append this blob to a descriptor stream.
    pub fn export(&self, w: &mut ByteWriter) {
        w.write_i32(COMBAT_FORMAT_VERSION);
        w.write_f32(self.difficulty);
        w.write_f32(self.aggressiveness);
        w.write_i32(self.initial_level);
        w.write_f32(self.growth_speed);
        w.write_f32(self.battle_exp_factor);
    }

    /// Read this blob back from a descriptor stream.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] when the blob is truncated or tagged with an
    /// unknown version.
    pub fn import(&mut self, r: &mut ByteReader<'_>) -> Result<(), CodecError> {
        let version = r.read_i32("combat settings version")?;
        if version != COMBAT_FORMAT_VERSION {
            return Err(CodecError::UnsupportedCombatVersion(version));
        }
        self.difficulty = r.read_f32("combat difficulty")?;
        self.aggressiveness = r.read_f32("combat aggressiveness")?;
        self.initial_level = r.read_i32("combat initial level")?;
        self.growth_speed = r.read_f32("combat growth speed")?;
        self.battle_exp_factor = r.read_f32("combat battle exp factor")?;
        Ok(())
    }
}
