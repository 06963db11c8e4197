//! Starforge World-Descriptor Core
//!
//! Platform-agnostic record of the parameters that seeded a procedurally
//! generated galaxy, the versioned binary codec that reads every save
//! format revision ever shipped, and the deterministic metrics derived
//! from the record. No UI or platform-specific dependencies.

pub mod codec;
pub mod combat;
pub mod constants;
pub mod descriptor;
pub mod metrics;
pub mod numbers;
pub mod version;

// Re-export commonly used types
pub use codec::{
    ByteReader, ByteWriter, CodecError, FORMAT_VERSION, OLDEST_FORMAT_VERSION, decode, encode,
};
pub use combat::CombatSettings;
pub use descriptor::{GoalLevel, NewGameParams, WorldDescriptor, roll_galaxy_seed};
pub use metrics::is_combat_mode_seed_key;
pub use version::GameVersion;

/// Trait for listing the visual themes known to the running build.
/// The registry is assumed fully initialized before any call into this core.
pub trait ThemeRegistry {
    /// Ordered identifiers of every currently selectable theme.
    fn known_theme_ids(&self) -> Vec<i32>;
}

/// Trait for abstracting descriptor byte transport.
/// Platform-specific implementations should provide this.
pub trait DescriptorStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Persist an encoded descriptor under a save name.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes cannot be written.
    fn write_save(&self, save_name: &str, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Fetch the encoded descriptor bytes for a save name, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes cannot be read.
    fn read_save(&self, save_name: &str) -> Result<Option<Vec<u8>>, Self::Error>;

    /// Delete a saved descriptor.
    ///
    /// # Errors
    ///
    /// Returns an error if the save cannot be deleted.
    fn delete_save(&self, save_name: &str) -> Result<(), Self::Error>;
}

/// Facade wiring the theme registry, the byte transport and the running
/// game version together for the new-game and save/load paths.
pub struct WorldEngine<T, S>
where
    T: ThemeRegistry,
    S: DescriptorStorage,
{
    themes: T,
    storage: S,
    game_version: GameVersion,
}

impl<T, S> WorldEngine<T, S>
where
    T: ThemeRegistry,
    S: DescriptorStorage,
{
    /// Create an engine with the provided collaborators.
    pub const fn new(themes: T, storage: S, game_version: GameVersion) -> Self {
        Self {
            themes,
            storage,
            game_version,
        }
    }

    /// Build a descriptor for a new game from user-chosen parameters,
    /// stamping the current time, the running game version and a snapshot
    /// of the known themes.
    #[must_use]
    pub fn new_game(&self, params: NewGameParams) -> WorldDescriptor {
        WorldDescriptor::for_new_game(params, &self.themes, self.game_version)
    }

    /// Encode a descriptor and hand it to storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage write fails; encoding itself
    /// cannot fail.
    pub fn save_descriptor(&self, save_name: &str, desc: &WorldDescriptor) -> Result<(), S::Error> {
        self.storage.write_save(save_name, &codec::encode(desc))
    }

    /// Load and decode a descriptor saved under any supported format
    /// version.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage read fails or the bytes are
    /// malformed.
    pub fn load_descriptor(&self, save_name: &str) -> Result<Option<WorldDescriptor>, anyhow::Error> {
        let Some(bytes) = self.storage.read_save(save_name)? else {
            return Ok(None);
        };
        let desc = codec::decode(&bytes, &self.themes)?;
        Ok(Some(desc))
    }

    /// Delete a saved descriptor.
    ///
    /// # Errors
    ///
    /// Returns an error if the save cannot be deleted.
    pub fn delete_save(&self, save_name: &str) -> Result<(), S::Error> {
        self.storage.delete_save(save_name)
    }
}
