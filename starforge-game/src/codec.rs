//! Versioned binary save codec for world descriptors.
//!
//! The byte stream carries no self-describing schema: a leading `i32`
//! format tag selects which fields follow. Each historical revision only
//! ever appended fields, so decoding replays one linear migration chain:
//! an ordered sequence of version-gated reads, each with a documented
//! default for streams that predate it. New fields must bump
//! [`FORMAT_VERSION`], append their write at the end of [`encode`], and
//! append a new gated read at the end of [`decode`]; fields are never
//! inserted in the middle and thresholds are never renumbered.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::ThemeRegistry;
use crate::combat::CombatSettings;
use crate::constants::{
    DEFAULT_RESOURCE_MULTIPLIER, NANOS_PER_TICK, TICKS_PER_SECOND, UNIX_EPOCH_TICKS,
    achievement_cutoff, legacy_creation_time,
};
use crate::descriptor::{GoalLevel, WorldDescriptor};
use crate::version::GameVersion;

/// Format tag written by [`encode`].
pub const FORMAT_VERSION: i32 = 9;
/// Oldest format tag [`decode`] still accepts.
pub const OLDEST_FORMAT_VERSION: i32 = 1;

/// Failure decoding a descriptor byte stream. There is no partial
/// recovery: callers must treat the whole record as unavailable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("unsupported descriptor format version {0}")]
    UnsupportedVersion(i32),
    #[error("unsupported combat settings version {0}")]
    UnsupportedCombatVersion(i32),
    #[error("descriptor data ends at byte {offset} while reading {what}")]
    Truncated { offset: usize, what: &'static str },
    #[error("descriptor data declares an invalid {what} ({count})")]
    InvalidCount { what: &'static str, count: i32 },
}

/// Little-endian primitive writer matching the historical save layout.
/// Booleans occupy a single byte.
#[derive(Debug, Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_f32(&mut self, value: f32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_bool(&mut self, value: bool) {
        self.buf.push(u8::from(value));
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Little-endian primitive reader over a descriptor byte stream.
///
/// Every read names the field being read so truncation errors point at the
/// exact spot the stream ran dry.
#[derive(Debug)]
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    #[must_use]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Bytes left unread in the stream.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn take(&mut self, len: usize, what: &'static str) -> Result<&'a [u8], CodecError> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.bytes.len())
            .ok_or(CodecError::Truncated {
                offset: self.pos,
                what,
            })?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    /// # Errors
    ///
    /// Returns [`CodecError::Truncated`] when the stream runs out mid-field.
    pub fn read_i32(&mut self, what: &'static str) -> Result<i32, CodecError> {
        let b = self.take(4, what)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// # Errors
    ///
    /// Returns [`CodecError::Truncated`] when the stream runs out mid-field.
    pub fn read_i64(&mut self, what: &'static str) -> Result<i64, CodecError> {
        let b = self.take(8, what)?;
        Ok(i64::from_le_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }

    /// # Errors
    ///
    /// Returns [`CodecError::Truncated`] when the stream runs out mid-field.
    pub fn read_f32(&mut self, what: &'static str) -> Result<f32, CodecError> {
        let b = self.take(4, what)?;
        Ok(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Reads one byte; any nonzero value is `true`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::Truncated`] when the stream runs out mid-field.
    pub fn read_bool(&mut self, what: &'static str) -> Result<bool, CodecError> {
        Ok(self.take(1, what)?[0] != 0)
    }
}

/// Convert a UTC instant to the stored 100 ns tick count. Sub-tick
/// precision is dropped.
pub(crate) fn ticks_from_datetime(time: DateTime<Utc>) -> i64 {
    let unix_ticks = time.timestamp().saturating_mul(TICKS_PER_SECOND)
        + i64::from(time.timestamp_subsec_nanos()) / NANOS_PER_TICK;
    unix_ticks.saturating_add(UNIX_EPOCH_TICKS)
}

pub(crate) fn datetime_from_ticks(ticks: i64) -> DateTime<Utc> {
    let unix_ticks = ticks.saturating_sub(UNIX_EPOCH_TICKS);
    let secs = unix_ticks.div_euclid(TICKS_PER_SECOND);
    let nanos = unix_ticks.rem_euclid(TICKS_PER_SECOND) * NANOS_PER_TICK;
    u32::try_from(nanos)
        .ok()
        .and_then(|nanos| DateTime::from_timestamp(secs, nanos))
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Serialize a descriptor, tagged with the current [`FORMAT_VERSION`].
///
/// Pure serialization of already-valid in-memory state; cannot fail.
#[must_use]
pub fn encode(desc: &WorldDescriptor) -> Vec<u8> {
    let mut w = ByteWriter::new();
    w.write_i32(FORMAT_VERSION);
    w.write_i64(ticks_from_datetime(desc.creation_time));
    w.write_i32(desc.creation_version.major);
    w.write_i32(desc.creation_version.minor);
    w.write_i32(desc.creation_version.release);
    w.write_i32(desc.creation_version.build);
    w.write_i32(desc.galaxy_algo);
    w.write_i32(desc.galaxy_seed);
    w.write_i32(desc.star_count);
    w.write_i32(desc.player_proto);
    w.write_f32(desc.resource_multiplier);
    w.write_i32(i32::try_from(desc.saved_theme_ids.len()).unwrap_or(i32::MAX));
    for id in &desc.saved_theme_ids {
        w.write_i32(*id);
    }
    w.write_bool(desc.achievement_enable);
    w.write_bool(desc.is_peace_mode);
    w.write_bool(desc.is_sandbox_mode);
    desc.combat_settings.export(&mut w);
    w.write_i32(desc.goal_level.code());
    w.into_bytes()
}

/// Reconstruct a descriptor from any supported historical format.
///
/// The theme registry backfills the theme snapshot for streams that
/// predate it, the same way new-game construction snapshots it.
///
/// # Errors
///
/// Returns [`CodecError`] when the format tag is outside
/// `[OLDEST_FORMAT_VERSION, FORMAT_VERSION]` or the stream is truncated
/// mid-field.
pub fn decode(bytes: &[u8], themes: &impl ThemeRegistry) -> Result<WorldDescriptor, CodecError> {
    let mut r = ByteReader::new(bytes);
    let version = r.read_i32("format version")?;
    if !(OLDEST_FORMAT_VERSION..=FORMAT_VERSION).contains(&version) {
        return Err(CodecError::UnsupportedVersion(version));
    }
    log::debug!("decoding world descriptor, save format v{version}");

    // v3: creation timestamp.
    let creation_time = if version >= 3 {
        datetime_from_ticks(r.read_i64("creation time")?)
    } else {
        legacy_creation_time()
    };

    // v6: full version tuple; v5 stored only the build number.
    let mut creation_version = GameVersion::default();
    if version >= 6 {
        creation_version.major = r.read_i32("version major")?;
        creation_version.minor = r.read_i32("version minor")?;
        creation_version.release = r.read_i32("version release")?;
        creation_version.build = r.read_i32("version build")?;
    } else if version >= 5 {
        creation_version.build = r.read_i32("version build")?;
    }

    // Ungated since the first shipped format.
    let galaxy_algo = r.read_i32("galaxy algo")?;
    let galaxy_seed = r.read_i32("galaxy seed")?;
    let star_count = r.read_i32("star count")?;
    let player_proto = r.read_i32("player proto")?;

    // v2: resource multiplier.
    let resource_multiplier = if version >= 2 {
        r.read_f32("resource multiplier")?
    } else {
        DEFAULT_RESOURCE_MULTIPLIER
    };

    // v1: saved theme snapshot; older streams re-snapshot the registry.
    let saved_theme_ids = if version >= 1 {
        let count = r.read_i32("theme count")?;
        let len = usize::try_from(count).map_err(|_| CodecError::InvalidCount {
            what: "theme count",
            count,
        })?;
        if len.saturating_mul(4) > r.remaining() {
            return Err(CodecError::Truncated {
                offset: bytes.len() - r.remaining(),
                what: "theme ids",
            });
        }
        let mut ids = Vec::with_capacity(len);
        for _ in 0..len {
            ids.push(r.read_i32("theme id")?);
        }
        ids
    } else {
        themes.known_theme_ids()
    };

    // v4: persisted achievement flag; older streams recompute the cutoff
    // rule from the creation time.
    let achievement_enable = if version >= 4 {
        r.read_bool("achievement flag")?
    } else {
        creation_time > achievement_cutoff()
    };

    // v7: peace / sandbox flags.
    let (is_peace_mode, is_sandbox_mode) = if version >= 7 {
        (r.read_bool("peace flag")?, r.read_bool("sandbox flag")?)
    } else {
        (true, false)
    };

    // v8: combat settings blob.
    let mut combat_settings = CombatSettings::default();
    if version >= 8 {
        combat_settings.import(&mut r)?;
    }

    // v9: goal level.
    let goal_level = if version >= 9 {
        GoalLevel::from_code(r.read_i32("goal level")?)
    } else {
        GoalLevel::Full
    };

    Ok(WorldDescriptor {
        creation_time,
        creation_version,
        galaxy_algo,
        galaxy_seed,
        star_count,
        player_proto,
        resource_multiplier,
        saved_theme_ids,
        achievement_enable,
        is_peace_mode,
        is_sandbox_mode,
        combat_settings,
        goal_level,
    })
}
