// scene/mod.rs - Minimal scene graph: named nodes, local-space bounds, ray picking

pub mod camera;
pub mod controls;
pub mod loader;
pub mod surface;
pub mod viewport;

pub use camera::*;
pub use controls::*;
pub use loader::*;
pub use surface::*;
pub use viewport::*;

use serde::{Deserialize, Serialize};

use crate::error_handling::{Result, SceneError};
use crate::types::{Color, Vec3};

/// Stable handle for a node in a [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

// ============================================================================
// GEOMETRY
// ============================================================================

/// Axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min: min.min(max), max: min.max(max) }
    }

    /// Box of the given full extents centered on the origin
    pub fn centered(size: Vec3) -> Self {
        let half = size * 0.5;
        Self::new(-half, half)
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }

    /// Bounds of this box after `transform`, re-fitted to the world axes
    pub fn transformed(&self, transform: &Transform) -> Aabb {
        let corners = self.corners().map(|c| transform.apply(c));
        let mut min = corners[0];
        let mut max = corners[0];
        for c in &corners[1..] {
            min = min.min(*c);
            max = max.max(*c);
        }
        Aabb { min, max }
    }

    /// Slab test. Returns the entry distance along the ray, if the ray hits.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        let mut t_min = 0.0_f32;
        let mut t_max = f32::INFINITY;

        for (origin, dir, lo, hi) in [
            (ray.origin.x, ray.direction.x, self.min.x, self.max.x),
            (ray.origin.y, ray.direction.y, self.min.y, self.max.y),
            (ray.origin.z, ray.direction.z, self.min.z, self.max.z),
        ] {
            if dir.abs() < 1e-12 {
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / dir;
            let (mut t0, mut t1) = ((lo - origin) * inv, (hi - origin) * inv);
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }
        Some(t_min)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Position / Euler rotation (XYZ, radians) / scale
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zero(),
            rotation: Vec3::zero(),
            scale: Vec3::one(),
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self { position, ..Self::default() }
    }

    /// Local → world: scale, then rotate, then translate
    pub fn apply(&self, point: Vec3) -> Vec3 {
        point.mul_elem(self.scale).rotate_euler_xyz(self.rotation) + self.position
    }
}

// ============================================================================
// NODES
// ============================================================================

/// Directional light parameters. Kept as data only; shading is up to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    Light(DirectionalLight),
    Model,
    Block,
}

/// Named pickable geometry, bounds in node-local space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub name: String,
    pub bounds: Aabb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub name: String,
    pub kind: NodeKind,
    pub transform: Transform,
    pub meshes: Vec<Mesh>,
    pub color: Option<Color>,
}

impl SceneNode {
    pub fn light(name: impl Into<String>, light: DirectionalLight, position: Vec3) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Light(light),
            transform: Transform::from_position(position),
            meshes: Vec::new(),
            color: Some(light.color),
        }
    }

    pub fn model(name: impl Into<String>, meshes: Vec<Mesh>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Model,
            transform: Transform::default(),
            meshes,
            color: None,
        }
    }
}

/// Closest-first ray hit
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub object: ObjectId,
    pub mesh_name: String,
    pub distance: f32,
}

// ============================================================================
// SCENE
// ============================================================================

/// Insertion-ordered node store. Every add/remove bumps `revision`.
#[derive(Debug, Clone)]
pub struct Scene {
    pub background: Color,
    nodes: Vec<(ObjectId, SceneNode)>,
    next_id: u64,
    revision: u64,
}

impl Scene {
    pub fn new(background: Color) -> Self {
        Self {
            background,
            nodes: Vec::new(),
            next_id: 1,
            revision: 0,
        }
    }

    pub fn add(&mut self, node: SceneNode) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.revision += 1;
        log::trace!("scene add {:?} '{}'", id, node.name);
        self.nodes.push((id, node));
        id
    }

    pub fn remove(&mut self, id: ObjectId) -> Result<SceneNode> {
        let index = self
            .nodes
            .iter()
            .position(|(node_id, _)| *node_id == id)
            .ok_or(SceneError::UnknownObject(id))?;
        self.revision += 1;
        let (_, node) = self.nodes.remove(index);
        log::trace!("scene remove {:?} '{}'", id, node.name);
        Ok(node)
    }

    /// Remove a batch of nodes with a single pass over the store
    pub fn remove_all(&mut self, ids: &[ObjectId]) -> usize {
        let before = self.nodes.len();
        self.nodes.retain(|(id, _)| !ids.contains(id));
        let removed = before - self.nodes.len();
        if removed > 0 {
            self.revision += 1;
        }
        removed
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneNode> {
        self.nodes.iter().find(|(node_id, _)| *node_id == id).map(|(_, n)| n)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &SceneNode)> {
        self.nodes.iter().map(|(id, n)| (*id, n))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// All mesh hits along `ray`, nearest first
    pub fn raycast(&self, ray: &Ray) -> Vec<Hit> {
        let mut hits: Vec<Hit> = self
            .nodes
            .iter()
            .flat_map(|(id, node)| {
                node.meshes.iter().filter_map(move |mesh| {
                    mesh.bounds
                        .transformed(&node.transform)
                        .intersect(ray)
                        .map(|distance| Hit {
                            object: *id,
                            mesh_name: mesh.name.clone(),
                            distance,
                        })
                })
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Color::BLACK)
    }
}
