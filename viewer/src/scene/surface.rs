// scene/surface.rs - Render surface seam and a headless implementation

use super::{PerspectiveCamera, Scene};
use crate::types::Position3;

/// What the viewport needs from whatever actually draws pixels.
pub trait RenderSurface {
    fn set_size(&mut self, width: u32, height: u32);
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera);
}

/// Snapshot of one rendered frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRecord {
    pub camera_position: Position3,
    pub object_count: usize,
    pub scene_revision: u64,
}

/// Draws nothing; remembers what it was asked to draw.
#[derive(Debug, Default, Clone)]
pub struct HeadlessSurface {
    pub width: u32,
    pub height: u32,
    frames: Vec<FrameRecord>,
    keep_history: bool,
    frames_rendered: u64,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep a record of every frame instead of only the last one
    pub fn with_history(mut self) -> Self {
        self.keep_history = true;
        self
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn last_frame(&self) -> Option<&FrameRecord> {
        self.frames.last()
    }

    pub fn history(&self) -> &[FrameRecord] {
        &self.frames
    }
}

impl RenderSurface for HeadlessSurface {
    fn set_size(&mut self, width: u32, height: u32) {
        log::debug!("surface resized to {width}x{height}");
        self.width = width;
        self.height = height;
    }

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) {
        let record = FrameRecord {
            camera_position: camera.position,
            object_count: scene.len(),
            scene_revision: scene.revision(),
        };
        if !self.keep_history {
            self.frames.clear();
        }
        self.frames.push(record);
        self.frames_rendered += 1;
        log::trace!("frame {} camera {:?}", self.frames_rendered, camera.position);
    }
}
