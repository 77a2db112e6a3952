use seastrike::{
    assemble_fleet, move_ship, place_ship, rotate_ship, Cell, Fleet, FleetError, GridSpec,
    OccupancyMap, PlacementError, Rotation, ShipClass, ShipPose,
};

fn spec() -> GridSpec {
    GridSpec::new(8.0, 8)
}

fn pose(class: ShipClass, x: i32, z: i32, rotation: Rotation) -> ShipPose {
    ShipPose {
        class,
        anchor: Cell::new(x, z),
        rotation,
    }
}

#[test]
fn place_claims_the_full_footprint() {
    let spec = spec();
    let mut fleet = Fleet::new();
    let mut map = OccupancyMap::new();

    let id = place_ship(
        &spec,
        &mut fleet,
        &mut map,
        pose(ShipClass::Submarine, 0, 0, Rotation::R0),
    )
    .unwrap();

    for z in 0..3 {
        assert_eq!(map.occupant(Cell::new(0, z)), Some(id));
    }
    assert_eq!(map.len(), 3);
}

#[test]
fn out_of_bounds_placement_is_rejected() {
    let spec = spec();
    let mut fleet = Fleet::new();
    let mut map = OccupancyMap::new();

    let err = place_ship(
        &spec,
        &mut fleet,
        &mut map,
        pose(ShipClass::Flagship, 0, 4, Rotation::R0),
    )
    .unwrap_err();
    assert_eq!(err, PlacementError::OutOfBounds);
    assert!(map.is_empty());
    assert!(fleet.ships().is_empty());
}

#[test]
fn overlapping_placement_is_rejected_and_leaves_the_map_unchanged() {
    let spec = spec();
    let mut fleet = Fleet::new();
    let mut map = OccupancyMap::new();

    let a = place_ship(
        &spec,
        &mut fleet,
        &mut map,
        pose(ShipClass::Flagship, 0, 0, Rotation::R0),
    )
    .unwrap();
    let err = place_ship(
        &spec,
        &mut fleet,
        &mut map,
        pose(ShipClass::Submarine, 0, 2, Rotation::R0),
    )
    .unwrap_err();

    assert_eq!(err, PlacementError::Overlap);
    assert_eq!(map.len(), 5);
    for z in 0..5 {
        assert_eq!(map.occupant(Cell::new(0, z)), Some(a));
    }
}

#[test]
fn moving_releases_the_old_cells() {
    let spec = spec();
    let mut fleet = Fleet::new();
    let mut map = OccupancyMap::new();

    let id = place_ship(
        &spec,
        &mut fleet,
        &mut map,
        pose(ShipClass::Drone, 7, 0, Rotation::R0),
    )
    .unwrap();
    move_ship(&spec, &mut fleet, &mut map, id, Cell::new(6, 0), Rotation::R0).unwrap();

    assert!(!map.is_occupied(Cell::new(7, 0), None));
    assert!(!map.is_occupied(Cell::new(7, 1), None));
    assert_eq!(map.occupant(Cell::new(6, 0)), Some(id));
    assert_eq!(map.occupant(Cell::new(6, 1)), Some(id));
    assert_eq!(fleet.ship(id).unwrap().anchor(), Cell::new(6, 0));
}

#[test]
fn moving_onto_own_cells_is_allowed() {
    let spec = spec();
    let mut fleet = Fleet::new();
    let mut map = OccupancyMap::new();

    let id = place_ship(
        &spec,
        &mut fleet,
        &mut map,
        pose(ShipClass::Flagship, 0, 0, Rotation::R0),
    )
    .unwrap();
    // The new footprint shares four cells with the old one.
    move_ship(&spec, &mut fleet, &mut map, id, Cell::new(0, 1), Rotation::R0).unwrap();
    assert_eq!(map.len(), 5);
    assert!(!map.is_occupied(Cell::new(0, 0), None));
    assert!(map.is_occupied(Cell::new(0, 5), None));
}

#[test]
fn failed_rotation_leaves_pose_and_cells_untouched() {
    let spec = spec();
    let mut fleet = Fleet::new();
    let mut map = OccupancyMap::new();

    let id = place_ship(
        &spec,
        &mut fleet,
        &mut map,
        pose(ShipClass::Flagship, 6, 0, Rotation::R0),
    )
    .unwrap();
    // Rotating would stretch the footprint to x = 6..11.
    let err = rotate_ship(&spec, &mut fleet, &mut map, id).unwrap_err();
    assert_eq!(err, PlacementError::OutOfBounds);

    let ship = fleet.ship(id).unwrap();
    assert_eq!(ship.rotation(), Rotation::R0);
    assert_eq!(ship.anchor(), Cell::new(6, 0));
    for z in 0..5 {
        assert_eq!(map.occupant(Cell::new(6, z)), Some(id));
    }
}

#[test]
fn rotation_swaps_the_footprint_axes() {
    let spec = spec();
    let mut fleet = Fleet::new();
    let mut map = OccupancyMap::new();

    let id = place_ship(
        &spec,
        &mut fleet,
        &mut map,
        pose(ShipClass::Submarine, 3, 3, Rotation::R0),
    )
    .unwrap();
    assert_eq!(fleet.ship(id).unwrap().oriented_size(), (1, 3));

    rotate_ship(&spec, &mut fleet, &mut map, id).unwrap();
    assert_eq!(fleet.ship(id).unwrap().oriented_size(), (3, 1));
    for x in 3..6 {
        assert_eq!(map.occupant(Cell::new(x, 3)), Some(id));
    }
    assert!(!map.is_occupied(Cell::new(3, 4), None));
}

#[test]
fn assemble_accepts_a_complete_fleet() {
    let spec = spec();
    let poses: Vec<ShipPose> = ShipClass::ALL
        .iter()
        .enumerate()
        .map(|(i, &class)| pose(class, i as i32, 0, Rotation::R0))
        .collect();

    let (fleet, map) = assemble_fleet(&spec, &poses).unwrap();
    assert!(fleet.is_complete());
    let total: u32 = ShipClass::ALL.iter().map(|c| c.cell_count()).sum();
    assert_eq!(map.len() as u32, total);
}

#[test]
fn assemble_rejects_a_wrong_ship_set() {
    let spec = spec();
    // Five poses, but the drone is fielded twice and the gunboat never.
    let poses = vec![
        pose(ShipClass::Flagship, 0, 0, Rotation::R0),
        pose(ShipClass::Destroyer, 1, 0, Rotation::R0),
        pose(ShipClass::Submarine, 2, 0, Rotation::R0),
        pose(ShipClass::Drone, 3, 0, Rotation::R0),
        pose(ShipClass::Drone, 4, 0, Rotation::R0),
    ];
    assert_eq!(
        assemble_fleet(&spec, &poses).unwrap_err(),
        FleetError::WrongShipSet
    );
}

#[test]
fn assemble_reports_the_offending_ship_on_overlap() {
    let spec = spec();
    let poses = vec![
        pose(ShipClass::Flagship, 0, 0, Rotation::R0),
        pose(ShipClass::Destroyer, 1, 0, Rotation::R0),
        pose(ShipClass::Submarine, 0, 2, Rotation::R0),
        pose(ShipClass::Gunboat, 3, 0, Rotation::R0),
        pose(ShipClass::Drone, 4, 0, Rotation::R0),
    ];
    assert_eq!(
        assemble_fleet(&spec, &poses).unwrap_err(),
        FleetError::Ship {
            class: ShipClass::Submarine,
            error: PlacementError::Overlap,
        }
    );
}
