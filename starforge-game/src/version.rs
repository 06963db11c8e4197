//! Four-part version tuple of the game build that created a descriptor.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Running game version recorded into new world descriptors.
///
/// Defaults to all zeros, which is also what saves predating the version
/// stamp (format v5/v6) decode to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameVersion {
    pub major: i32,
    pub minor: i32,
    pub release: i32,
    pub build: i32,
}

impl GameVersion {
    #[must_use]
    pub const fn new(major: i32, minor: i32, release: i32, build: i32) -> Self {
        Self {
            major,
            minor,
            release,
            build,
        }
    }
}

impl fmt::Display for GameVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.release, self.build
        )
    }
}
