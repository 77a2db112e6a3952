use std::path::Path;

use seastrike::{Cell, GridSpec, Rotation, ShipClass, ShipPose, ShipStore, StoredShip, Vec3};

fn temp_store(tag: &str) -> ShipStore {
    let mut path = std::env::temp_dir();
    path.push(format!("seastrike-store-{}-{}.json", tag, std::process::id()));
    let store = ShipStore::new(path);
    store.clear().unwrap();
    store
}

fn spec() -> GridSpec {
    GridSpec::new(400.0, 8)
}

#[test]
fn a_missing_file_loads_as_an_empty_store() {
    let store = temp_store("missing");
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn save_load_clear_roundtrip() {
    let spec = spec();
    let store = temp_store("roundtrip");

    let ships: Vec<StoredShip> = ShipClass::ALL
        .iter()
        .enumerate()
        .map(|(i, &class)| {
            StoredShip::from_pose(
                &ShipPose {
                    class,
                    anchor: Cell::new(i as i32, 0),
                    rotation: Rotation::R0,
                },
                &spec,
            )
        })
        .collect();

    store.save(&ships).unwrap();
    assert_eq!(store.load().unwrap(), ships);

    store.clear().unwrap();
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn stored_records_reconstruct_their_poses() {
    let spec = spec();
    for &class in ShipClass::ALL.iter() {
        for rotation in [Rotation::R0, Rotation::R90] {
            let pose = ShipPose {
                class,
                anchor: Cell::new(2, 5),
                rotation,
            };
            let stored = StoredShip::from_pose(&pose, &spec);
            assert_eq!(stored.to_pose(&spec), Some(pose));
        }
    }
}

#[test]
fn the_record_carries_the_model_reference() {
    let spec = spec();
    let pose = ShipPose {
        class: ShipClass::Submarine,
        anchor: Cell::new(0, 0),
        rotation: Rotation::R0,
    };
    let stored = StoredShip::from_pose(&pose, &spec);
    assert_eq!(stored.model_path, ShipClass::Submarine.model_path());
    assert_eq!(stored.class(), Some(ShipClass::Submarine));
    assert_eq!(stored.scale, Vec3::ONE);
}

#[test]
fn an_unknown_model_yields_no_pose() {
    let stored = StoredShip {
        model_path: "rowboat.glb".to_string(),
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };
    assert_eq!(stored.class(), None);
    assert_eq!(stored.to_pose(&spec()), None);
}

#[test]
fn store_paths_are_plain_pathbufs() {
    let store = ShipStore::new("ships.json");
    assert_eq!(store.path(), Path::new("ships.json"));
}
