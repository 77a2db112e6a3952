//! Persisted client-local placement: one record per ship with its model
//! reference and position/rotation/scale triples. Written once placement
//! is confirmed and read back to rebuild the fleet's cells for the next
//! scene.

use std::f32::consts::FRAC_PI_2;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::grid::GridSpec;
use crate::placement::ShipPose;
use crate::ship::{Rotation, ShipClass};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);
    pub const ONE: Vec3 = Vec3::new(1.0, 1.0, 1.0);
}

/// One stored ship record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredShip {
    pub model_path: String,
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl StoredShip {
    /// Record a validated pose for later scenes. The y components carry
    /// the hull's resting height and yaw; everything else derives from
    /// the grid.
    pub fn from_pose(pose: &ShipPose, spec: &GridSpec) -> Self {
        let (x, z) = spec.cell_center(pose.anchor);
        let yaw = match pose.rotation {
            Rotation::R0 => 0.0,
            Rotation::R90 => -FRAC_PI_2,
        };
        Self {
            model_path: pose.class.model_path().to_string(),
            position: Vec3::new(x, 0.0, z),
            rotation: Vec3::new(0.0, yaw, 0.0),
            scale: Vec3::ONE,
        }
    }

    /// The hull class this record refers to, if the model is known.
    pub fn class(&self) -> Option<ShipClass> {
        ShipClass::ALL
            .into_iter()
            .find(|c| c.model_path() == self.model_path)
    }

    /// Reconstruct the grid pose: quantize the stored position and read
    /// the rotation back from the yaw's quarter turns.
    pub fn to_pose(&self, spec: &GridSpec) -> Option<ShipPose> {
        let class = self.class()?;
        let anchor = spec.quantize(self.position.x, self.position.z);
        let quarter_turns = (self.rotation.y / FRAC_PI_2).round() as i32;
        let rotation = if quarter_turns.rem_euclid(2) == 0 {
            Rotation::R0
        } else {
            Rotation::R90
        };
        Some(ShipPose {
            class,
            anchor,
            rotation,
        })
    }
}

/// JSON-file-backed ship store.
pub struct ShipStore {
    path: PathBuf,
}

impl ShipStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, ships: &[StoredShip]) -> anyhow::Result<()> {
        let data = serde_json::to_string_pretty(ships)?;
        fs::write(&self.path, data)?;
        Ok(())
    }

    /// Load stored records; a missing file is an empty store.
    pub fn load(&self) -> anyhow::Result<Vec<StoredShip>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }

    pub fn clear(&self) -> anyhow::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
