// puzzle/grid_builder.rs - Puzzle matrix → centered block primitives, and generation swaps

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use super::{color_for, PuzzleError, PuzzleMatrix, Result};
use crate::scene::{Aabb, Mesh, NodeKind, ObjectId, Scene, SceneNode, Transform};
use crate::types::{Color, Vec3};

/// One box per matrix cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub row: usize,
    pub col: usize,
    pub value: u32,
    /// Full extents (cell, value·cell, cell)
    pub size: Vec3,
    /// World-space box center
    pub center: Vec3,
    pub color: Color,
}

impl Block {
    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn to_node(&self) -> SceneNode {
        let name = format!("block_{}_{}", self.row, self.col);
        SceneNode {
            meshes: vec![Mesh { name: name.clone(), bounds: Aabb::centered(self.size) }],
            name,
            kind: NodeKind::Block,
            transform: Transform::from_position(self.center),
            color: Some(self.color),
        }
    }

    pub fn instance(&self) -> BlockInstance {
        BlockInstance {
            center: [self.center.x, self.center.y, self.center.z, 0.0],
            size: [self.size.x, self.size.y, self.size.z, 0.0],
            color: self.color.into(),
        }
    }
}

/// GPU-ready per-instance block data (std140-friendly, 48 bytes)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct BlockInstance {
    pub center: [f32; 4],
    pub size: [f32; 4],
    pub color: [f32; 4],
}

static_assertions::assert_eq_size!(BlockInstance, [u8; 48]);

/// Lay out one block per cell, centered on the origin in the X/Z plane.
///
/// Rows run along Z and columns along X. Every block rests on y = 0; zero-valued
/// cells still get a zero-height block so block indices always match cell indices.
pub fn build(matrix: &PuzzleMatrix, cell_size: f32) -> Result<Vec<Block>> {
    if !(cell_size.is_finite() && cell_size > 0.0) {
        return Err(PuzzleError::InvalidCellSize(cell_size));
    }

    let total_rows = matrix.row_count() as f32 * cell_size;
    let total_cols = matrix.col_count() as f32 * cell_size;
    let half_cell = cell_size / 2.0;

    let blocks = matrix
        .cells()
        .map(|(i, j, value)| {
            let height = value as f32 * cell_size;
            let along_rows = -total_rows / 2.0 + i as f32 * cell_size + half_cell;
            let along_cols = -total_cols / 2.0 + j as f32 * cell_size + half_cell;
            Block {
                row: i,
                col: j,
                value,
                size: Vec3::new(cell_size, height, cell_size),
                center: Vec3::new(along_cols, height / 2.0, along_rows),
                color: color_for(value),
            }
        })
        .collect::<Vec<_>>();

    log::debug!(
        "built {} blocks for {}x{} grid (cell {cell_size})",
        blocks.len(),
        matrix.row_count(),
        matrix.col_count()
    );
    Ok(blocks)
}

/// Ownership set for the blocks currently in the scene.
#[derive(Debug, Default)]
pub struct GridGeneration {
    ids: Vec<ObjectId>,
    blocks: Vec<Block>,
    generation: u64,
}

impl GridGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every block of the current generation, then add `blocks`.
    /// Runs synchronously, so no frame ever sees both generations.
    pub fn replace(&mut self, scene: &mut Scene, blocks: Vec<Block>) {
        let removed = scene.remove_all(&self.ids);
        self.ids.clear();

        self.ids.extend(blocks.iter().map(|block| scene.add(block.to_node())));
        self.blocks = blocks;
        self.generation += 1;

        log::info!(
            "grid generation {}: removed {removed} blocks, added {}",
            self.generation,
            self.ids.len()
        );
    }

    /// Take every block out of the scene and forget them
    pub fn clear(&mut self, scene: &mut Scene) {
        scene.remove_all(&self.ids);
        self.ids.clear();
        self.blocks.clear();
    }

    pub fn ids(&self) -> &[ObjectId] {
        &self.ids
    }

    /// Blocks of the current generation, in cell order
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(size: usize, value: u32) -> PuzzleMatrix {
        PuzzleMatrix::from_rows(vec![vec![value; size]; size]).unwrap()
    }

    #[test]
    fn test_all_ones_grid_is_centered() {
        let blocks = build(&uniform(4, 1), 1.0).unwrap();
        assert_eq!(blocks.len(), 16);
        assert!(blocks.iter().all(|b| b.height() == 1.0));

        let sum = blocks.iter().fold(Vec3::zero(), |acc, b| acc + b.center);
        let centroid = sum / blocks.len() as f32;
        assert!(centroid.x.abs() < 1e-6);
        assert!(centroid.z.abs() < 1e-6);
        assert!((centroid.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_placement_and_color() {
        let m = PuzzleMatrix::from_rows(vec![vec![3, 2], vec![1, 4]]).unwrap();
        let blocks = build(&m, 2.0).unwrap();

        let first = blocks[0];
        assert_eq!((first.row, first.col, first.value), (0, 0, 3));
        assert_eq!(first.center, Vec3::new(-1.0, 3.0, -1.0));
        assert_eq!(first.size, Vec3::new(2.0, 6.0, 2.0));
        assert_eq!(first.color.to_hex(), 0x0000cc);

        // Row 0, column 1 sits further along X, not Z.
        assert_eq!(blocks[1].center, Vec3::new(1.0, 2.0, -1.0));
        assert_eq!(blocks[2].center, Vec3::new(-1.0, 1.0, 1.0));
    }

    #[test]
    fn test_zero_value_still_emits_block() {
        let m = PuzzleMatrix::from_rows(vec![vec![0, 5]]).unwrap();
        let blocks = build(&m, 1.0).unwrap();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].height(), 0.0);
        assert_eq!(blocks[0].center.y, 0.0);
        assert_eq!(blocks[0].color.to_hex(), 0x888888);
    }

    #[test]
    fn test_invalid_cell_size() {
        for cell in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(build(&uniform(4, 1), cell), Err(PuzzleError::InvalidCellSize(_))));
        }
    }

    #[test]
    fn test_replace_swaps_whole_generation() {
        let mut scene = Scene::default();
        let keep = scene.add(SceneNode::model("camera_rig", vec![]));
        let mut generation = GridGeneration::new();

        generation.replace(&mut scene, build(&uniform(4, 1), 1.0).unwrap());
        let first_ids = generation.ids().to_vec();
        assert_eq!(scene.len(), 17);

        generation.replace(&mut scene, build(&uniform(5, 2), 1.0).unwrap());
        assert_eq!(generation.len(), 25);
        assert_eq!(generation.generation(), 2);
        assert_eq!(scene.len(), 26);
        assert!(first_ids.iter().all(|id| !scene.contains(*id)));
        assert!(scene.contains(keep));

        generation.clear(&mut scene);
        assert_eq!(scene.len(), 1);
        assert!(generation.is_empty());
    }

    #[test]
    fn test_instance_bytes_layout() {
        let block = build(&uniform(4, 2), 0.5).unwrap()[5];
        let instance = block.instance();
        let bytes: &[u8] = bytemuck::bytes_of(&instance);
        assert_eq!(bytes.len(), 48);
        assert_eq!(instance.size[1], 1.0);
        assert_eq!(instance.color, <[f32; 4]>::from(Color::from_hex(0x00cc00)));
    }
}
