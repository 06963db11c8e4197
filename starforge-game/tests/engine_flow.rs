//! End-to-end flow through the engine facade: new game, save, load,
//! derived metrics, plus the JSON shape of the descriptor itself.

use std::cell::RefCell;
use std::collections::HashMap;
use std::convert::Infallible;
use std::rc::Rc;

use starforge_game::{
    ByteWriter, DescriptorStorage, GameVersion, NewGameParams, ThemeRegistry, WorldDescriptor,
    WorldEngine, is_combat_mode_seed_key,
};

struct FixtureThemes;

impl ThemeRegistry for FixtureThemes {
    fn known_theme_ids(&self) -> Vec<i32> {
        vec![1, 2, 3, 4, 5]
    }
}

#[derive(Clone, Default)]
struct MemoryStorage {
    saves: Rc<RefCell<HashMap<String, Vec<u8>>>>,
}

impl MemoryStorage {
    fn inject(&self, save_name: &str, bytes: Vec<u8>) {
        self.saves.borrow_mut().insert(save_name.to_string(), bytes);
    }
}

impl DescriptorStorage for MemoryStorage {
    type Error = Infallible;

    fn write_save(&self, save_name: &str, bytes: &[u8]) -> Result<(), Self::Error> {
        self.saves
            .borrow_mut()
            .insert(save_name.to_string(), bytes.to_vec());
        Ok(())
    }

    fn read_save(&self, save_name: &str) -> Result<Option<Vec<u8>>, Self::Error> {
        Ok(self.saves.borrow().get(save_name).cloned())
    }

    fn delete_save(&self, save_name: &str) -> Result<(), Self::Error> {
        self.saves.borrow_mut().remove(save_name);
        Ok(())
    }
}

fn params() -> NewGameParams {
    NewGameParams {
        galaxy_algo: 2,
        galaxy_seed: 87_654_321,
        star_count: 128,
        player_proto: 1,
        resource_multiplier: 0.5,
    }
}

#[test]
fn new_game_save_load_keeps_identity_stable() {
    let storage = MemoryStorage::default();
    let engine = WorldEngine::new(FixtureThemes, storage, GameVersion::new(1, 0, 0, 100));

    let desc = engine.new_game(params());
    let key_before = desc.seed_key64();
    let cluster_before = desc.cluster_string();

    engine.save_descriptor("campaign", &desc).unwrap();
    let loaded = engine
        .load_descriptor("campaign")
        .unwrap()
        .expect("save exists");

    assert_eq!(loaded.seed_key64(), key_before);
    assert_eq!(loaded.cluster_string(), cluster_before);
    assert_eq!(loaded.cluster_string(), "87654321-128-A05");
    assert!(!is_combat_mode_seed_key(loaded.seed_key64()));
}

#[test]
fn legacy_save_loads_through_the_same_path() {
    let storage = MemoryStorage::default();
    // A format-v1 save: version tag, the four core ints, theme snapshot.
    let mut w = ByteWriter::new();
    w.write_i32(1);
    w.write_i32(0);
    w.write_i32(11_111_111);
    w.write_i32(32);
    w.write_i32(0);
    w.write_i32(2);
    w.write_i32(7);
    w.write_i32(9);
    storage.inject("old-campaign", w.into_bytes());

    let engine = WorldEngine::new(FixtureThemes, storage, GameVersion::new(1, 0, 0, 100));
    let loaded = engine
        .load_descriptor("old-campaign")
        .unwrap()
        .expect("legacy save decodes");
    assert_eq!(loaded.galaxy_seed, 11_111_111);
    assert_eq!(loaded.saved_theme_ids, vec![7, 9]);
    assert!((loaded.resource_multiplier - 1.0).abs() < f32::EPSILON);
}

#[test]
fn corrupt_save_fails_loudly() {
    let storage = MemoryStorage::default();
    storage.inject("bad", vec![9, 0, 0]);
    let engine = WorldEngine::new(FixtureThemes, storage, GameVersion::default());
    assert!(engine.load_descriptor("bad").is_err());
}

#[test]
fn descriptor_json_round_trips() {
    let engine = WorldEngine::new(
        FixtureThemes,
        MemoryStorage::default(),
        GameVersion::new(1, 0, 0, 100),
    );
    let desc = engine.new_game(params());

    let json = serde_json::to_string(&desc).unwrap();
    let restored: WorldDescriptor = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, desc);
}
