// scene/loader.rs - Asynchronous asset loading seam
//
// Loads resolve on their own schedule relative to the tick loop. The host polls
// once per tick and appends whatever completed; a failed load never completes.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Aabb, Mesh, SceneNode};
use crate::types::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoadTicket(pub u64);

#[derive(Debug, Clone)]
pub struct LoadedAsset {
    pub ticket: LoadTicket,
    pub path: String,
    pub node: SceneNode,
}

pub trait AssetLoader {
    /// Request `path`; the result shows up in a later `poll_completed`
    fn load(&mut self, path: &str) -> LoadTicket;

    /// Loads that finished since the last poll
    fn poll_completed(&mut self) -> Vec<LoadedAsset>;

    /// Forget a pending load. Returns false if it was not pending.
    fn abandon(&mut self, ticket: LoadTicket) -> bool;

    fn pending_count(&self) -> usize;
}

/// Named mesh with local-space bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshDescriptor {
    pub name: String,
    pub min: [f32; 3],
    pub max: [f32; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDescriptor {
    pub meshes: Vec<MeshDescriptor>,
    /// Polls before the load completes
    #[serde(default)]
    pub load_frames: u32,
}

impl AssetDescriptor {
    fn to_node(&self, path: &str) -> SceneNode {
        let meshes = self
            .meshes
            .iter()
            .map(|m| Mesh {
                name: m.name.clone(),
                bounds: Aabb::new(Vec3::from(m.min), Vec3::from(m.max)),
            })
            .collect();
        SceneNode::model(asset_name(path), meshes)
    }
}

/// `/aladdin/lamp/scene.gltf` → `lamp`
pub fn asset_name(path: &str) -> String {
    let path = Path::new(path);
    path.parent()
        .and_then(Path::file_name)
        .or_else(|| path.file_stem())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "asset".to_string())
}

/// Prefix a site-absolute asset path with the static export base path
pub fn resolve_asset_path(base_path: &str, path: &str) -> String {
    let base = base_path.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{base}/{path}")
}

#[derive(Debug)]
struct PendingLoad {
    ticket: LoadTicket,
    path: String,
    frames_left: u32,
}

/// Serves assets out of an in-memory manifest after a per-asset frame latency.
pub struct ManifestAssetLoader {
    base_path: String,
    manifest: HashMap<String, AssetDescriptor>,
    pending: Vec<PendingLoad>,
    next_ticket: u64,
}

impl ManifestAssetLoader {
    pub fn new(base_path: impl Into<String>, manifest: HashMap<String, AssetDescriptor>) -> Self {
        Self {
            base_path: base_path.into(),
            manifest,
            pending: Vec::new(),
            next_ticket: 1,
        }
    }
}

impl AssetLoader for ManifestAssetLoader {
    fn load(&mut self, path: &str) -> LoadTicket {
        let ticket = LoadTicket(self.next_ticket);
        self.next_ticket += 1;

        let url = resolve_asset_path(&self.base_path, path);
        match self.manifest.get(path) {
            Some(descriptor) => {
                log::debug!("loading {url} ({:?}, {} frames)", ticket, descriptor.load_frames);
                self.pending.push(PendingLoad {
                    ticket,
                    path: path.to_string(),
                    frames_left: descriptor.load_frames,
                });
            }
            None => log::error!("failed to load {url}: not in asset manifest"),
        }
        ticket
    }

    fn poll_completed(&mut self) -> Vec<LoadedAsset> {
        let mut done = Vec::new();
        let mut still_pending = Vec::with_capacity(self.pending.len());

        for mut load in self.pending.drain(..) {
            if load.frames_left > 0 {
                load.frames_left -= 1;
                still_pending.push(load);
                continue;
            }
            if let Some(descriptor) = self.manifest.get(&load.path) {
                log::info!("loaded {}", resolve_asset_path(&self.base_path, &load.path));
                done.push(LoadedAsset {
                    ticket: load.ticket,
                    node: descriptor.to_node(&load.path),
                    path: load.path,
                });
            }
        }

        self.pending = still_pending;
        done
    }

    fn abandon(&mut self, ticket: LoadTicket) -> bool {
        let before = self.pending.len();
        self.pending.retain(|load| load.ticket != ticket);
        let abandoned = self.pending.len() != before;
        if abandoned {
            log::debug!("abandoned load {ticket:?}");
        }
        abandoned
    }

    fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(load_frames: u32) -> HashMap<String, AssetDescriptor> {
        HashMap::from([(
            "/aladdin/lamp/scene.gltf".to_string(),
            AssetDescriptor {
                meshes: vec![MeshDescriptor {
                    name: "LampBottom_0".into(),
                    min: [-0.5, 0.0, -0.5],
                    max: [0.5, 0.5, 0.5],
                }],
                load_frames,
            },
        )])
    }

    #[test]
    fn test_load_completes_after_latency() {
        let mut loader = ManifestAssetLoader::new("/skyscraper", manifest(2));
        let ticket = loader.load("/aladdin/lamp/scene.gltf");
        assert!(loader.poll_completed().is_empty());
        assert!(loader.poll_completed().is_empty());
        let done = loader.poll_completed();
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].ticket, ticket);
        assert_eq!(done[0].node.name, "lamp");
        assert_eq!(done[0].node.meshes[0].name, "LampBottom_0");
        assert_eq!(loader.pending_count(), 0);
    }

    #[test]
    fn test_missing_asset_never_completes() {
        let mut loader = ManifestAssetLoader::new("", manifest(0));
        loader.load("/missing/scene.gltf");
        assert_eq!(loader.pending_count(), 0);
        for _ in 0..3 {
            assert!(loader.poll_completed().is_empty());
        }
    }

    #[test]
    fn test_abandoned_load_is_dropped() {
        let mut loader = ManifestAssetLoader::new("", manifest(1));
        let ticket = loader.load("/aladdin/lamp/scene.gltf");
        assert!(loader.abandon(ticket));
        assert!(!loader.abandon(ticket));
        assert!(loader.poll_completed().is_empty());
        assert!(loader.poll_completed().is_empty());
    }

    #[test]
    fn test_resolve_asset_path() {
        assert_eq!(resolve_asset_path("/skyscraper", "/aladdin/lamp/scene.gltf"), "/skyscraper/aladdin/lamp/scene.gltf");
        assert_eq!(resolve_asset_path("", "/a.gltf"), "/a.gltf");
        assert_eq!(resolve_asset_path("/base/", "b.gltf"), "/base/b.gltf");
    }
}
