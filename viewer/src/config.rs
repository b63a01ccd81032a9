// config.rs - Scene configuration (JSON), every field defaulted

use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::animation::Easing;
use crate::error_handling::SceneError;
use crate::puzzle::{validate_size, PuzzleMatrix, MAX_PUZZLE_SIZE, MIN_PUZZLE_SIZE};
use crate::scene::{AssetDescriptor, MeshDescriptor, Transform, DEFAULT_DAMPING_FACTOR};
use crate::types::Vec3;

pub const LAMP_ASSET: &str = "/aladdin/lamp/scene.gltf";
pub const GENIE_ASSET: &str = "/aladdin/genie/scene.gltf";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Static export base path prefixed to asset URLs
    pub base_path: String,
    pub window: WindowConfig,
    pub lamp: LampSceneConfig,
    pub puzzle: PuzzleSceneConfig,
    /// Asset path → meshes and simulated load latency
    pub assets: HashMap<String, AssetDescriptor>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LampSceneConfig {
    pub fov: f32,
    pub camera_position: Vec3,
    pub damping_factor: f32,
    pub lamp_path: String,
    pub genie_path: String,
    /// Mesh name that triggers the genie sequence when clicked
    pub trigger_mesh: String,
    pub genie_placement: Transform,
    pub camera_target: Vec3,
    pub flight_duration_ms: i64,
    pub easing: Easing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleSceneConfig {
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub camera_position: Vec3,
    pub cell_size: f32,
    pub initial: PuzzleMatrix,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { width: 1280, height: 720 }
    }
}

impl Default for LampSceneConfig {
    fn default() -> Self {
        Self {
            fov: 30.0,
            camera_position: Vec3::new(0.0, 1.0, 3.0),
            damping_factor: DEFAULT_DAMPING_FACTOR,
            lamp_path: LAMP_ASSET.to_string(),
            genie_path: GENIE_ASSET.to_string(),
            trigger_mesh: "LampBottom_0".to_string(),
            genie_placement: Transform {
                position: Vec3::new(0.0, 1.9, 0.0),
                rotation: Vec3::new(1.2, 0.0, 0.0),
                scale: Vec3::splat(1.5),
            },
            camera_target: Vec3::new(0.0, -6.0, 3.0),
            flight_duration_ms: 2000,
            easing: Easing::Linear,
        }
    }
}

impl Default for PuzzleSceneConfig {
    fn default() -> Self {
        Self {
            fov: 75.0,
            near: 0.1,
            far: 1000.0,
            camera_position: Vec3::new(0.0, 8.0, 5.0),
            cell_size: 1.0,
            initial: PuzzleMatrix::initial(),
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        let mesh = |name: &str, min: [f32; 3], max: [f32; 3]| MeshDescriptor { name: name.to_string(), min, max };
        let assets = HashMap::from([
            (
                LAMP_ASSET.to_string(),
                AssetDescriptor {
                    meshes: vec![
                        mesh("LampBottom_0", [-0.35, -0.2, -0.35], [0.35, 0.1, 0.35]),
                        mesh("LampSpout_0", [0.35, 0.0, -0.08], [0.7, 0.12, 0.08]),
                    ],
                    load_frames: 6,
                },
            ),
            (
                GENIE_ASSET.to_string(),
                AssetDescriptor {
                    meshes: vec![mesh("Genie_0", [-0.4, -0.5, -0.3], [0.4, 0.6, 0.3])],
                    load_frames: 12,
                },
            ),
        ]);

        Self {
            base_path: "/skyscraper".to_string(),
            window: WindowConfig::default(),
            lamp: LampSceneConfig::default(),
            puzzle: PuzzleSceneConfig::default(),
            assets,
        }
    }
}

impl SceneConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SceneConfig = serde_json::from_str(json).context("Failed to parse scene config JSON")?;
        config.validate().context("Scene config rejected")?;
        Ok(config)
    }

    pub fn validate(&self) -> std::result::Result<(), SceneError> {
        let invalid = |reason: String| Err(SceneError::InvalidConfig { reason });

        if self.window.width == 0 || self.window.height == 0 {
            return invalid(format!("window {}x{} has no area", self.window.width, self.window.height));
        }
        for (name, fov) in [("lamp.fov", self.lamp.fov), ("puzzle.fov", self.puzzle.fov)] {
            if !(fov > 0.0 && fov < 180.0) {
                return invalid(format!("{name} must be in (0, 180), got {fov}"));
            }
        }
        if !(0.0..=1.0).contains(&self.lamp.damping_factor) {
            return invalid(format!("lamp.damping_factor must be in [0, 1], got {}", self.lamp.damping_factor));
        }
        if !(self.puzzle.cell_size.is_finite() && self.puzzle.cell_size > 0.0) {
            return invalid(format!("puzzle.cell_size must be positive, got {}", self.puzzle.cell_size));
        }
        if !(self.puzzle.near > 0.0 && self.puzzle.far > self.puzzle.near) {
            return invalid(format!("puzzle clip range {}..{} is empty", self.puzzle.near, self.puzzle.far));
        }
        let initial = &self.puzzle.initial;
        if initial.row_count() != initial.col_count() || validate_size(initial.row_count() as i64).is_err() {
            return invalid(format!(
                "puzzle.initial must be NxN with N in [{MIN_PUZZLE_SIZE}, {MAX_PUZZLE_SIZE}], got {}x{}",
                initial.row_count(),
                initial.col_count()
            ));
        }
        if !self.lamp.camera_target.is_finite() || !self.lamp.camera_position.is_finite() {
            return invalid("lamp camera positions must be finite".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        SceneConfig::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SceneConfig::from_json_str(
            r#"{ "base_path": "/demo", "lamp": { "flight_duration_ms": 500 }, "puzzle": { "initial": [[1,2,3,4,5],[2,3,4,5,1],[3,4,5,1,2],[4,5,1,2,3],[5,1,2,3,4]] } }"#,
        )
        .unwrap();
        assert_eq!(config.base_path, "/demo");
        assert_eq!(config.lamp.flight_duration_ms, 500);
        assert_eq!(config.lamp.fov, 30.0);
        assert_eq!(config.puzzle.initial.row_count(), 5);
        assert!(config.assets.contains_key(LAMP_ASSET));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(SceneConfig::from_json_str(r#"{ "puzzle": { "cell_size": 0 } }"#).is_err());
        assert!(SceneConfig::from_json_str(r#"{ "window": { "width": 0 } }"#).is_err());
        assert!(SceneConfig::from_json_str(r#"{ "puzzle": { "initial": [[1,2],[3]] } }"#).is_err());
    }

    #[test]
    fn test_initial_board_must_be_square_and_in_range() {
        for initial in ["[[1,2,3]]", "[[1,2],[2,1]]", "[[1,2,3,4],[4,3,2,1],[2,1,4,3]]"] {
            let json = format!(r#"{{ "puzzle": {{ "initial": {initial} }} }}"#);
            let err = SceneConfig::from_json_str(&json).unwrap_err();
            assert!(format!("{err:#}").contains("puzzle.initial"), "{initial}: {err:#}");
        }
        let ten = vec![vec![1u32; 10]; 10];
        let mut config = SceneConfig::default();
        config.puzzle.initial = PuzzleMatrix::from_rows(ten).unwrap();
        assert!(matches!(config.validate(), Err(SceneError::InvalidConfig { .. })));
    }
}
