// scene/viewport.rs - Viewport context: owns scene, camera, controls, surface and animator

use std::time::Duration;

use super::{client_to_ndc, Hit, OrbitControls, PerspectiveCamera, RenderSurface, Scene};
use crate::animation::CameraAnimator;
use crate::error_handling::{Result, SceneError};
use crate::types::Position3;

/// Window-level input the viewport listens to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowEvent {
    Click { client_x: f32, client_y: f32 },
    Resize { width: u32, height: u32 },
    Drag { dx: f32, dy: f32 },
    Wheel { delta_y: f32 },
}

/// Which window listeners are currently attached
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Listeners {
    pub click: bool,
    pub resize: bool,
    pub pointer: bool,
}

impl Listeners {
    fn all() -> Self {
        Self { click: true, resize: true, pointer: true }
    }

    pub fn any(&self) -> bool {
        self.click || self.resize || self.pointer
    }

    fn accepts(&self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::Click { .. } => self.click,
            WindowEvent::Resize { .. } => self.resize,
            WindowEvent::Drag { .. } | WindowEvent::Wheel { .. } => self.pointer,
        }
    }
}

/// Long-lived render state for one mounted scene.
///
/// Per tick: controls update, camera flight step, render. After `teardown` the
/// viewport renders nothing, writes nothing and ignores every window event.
pub struct Viewport<S: RenderSurface> {
    pub scene: Scene,
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub animator: CameraAnimator,
    surface: S,
    listeners: Listeners,
    width: u32,
    height: u32,
    running: bool,
    ticks: u64,
}

impl<S: RenderSurface> Viewport<S> {
    /// Mount: attach listeners and apply the initial size
    pub fn mount(
        scene: Scene,
        camera: PerspectiveCamera,
        controls: OrbitControls,
        surface: S,
        width: u32,
        height: u32,
    ) -> Result<Self> {
        let mut viewport = Self {
            scene,
            camera,
            controls,
            animator: CameraAnimator::new(),
            surface,
            listeners: Listeners::all(),
            width: 0,
            height: 0,
            running: true,
            ticks: 0,
        };
        viewport.resize(width, height)?;
        log::info!("viewport mounted at {width}x{height}");
        Ok(viewport)
    }

    /// One frame. Returns false once torn down.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if !self.running {
            return false;
        }
        self.controls.update(&mut self.camera);
        self.animator.advance(dt, &mut self.camera);
        self.surface.render(&self.scene, &self.camera);
        self.ticks += 1;
        true
    }

    /// Route a window event. A click returns the nearest hit, if any.
    pub fn dispatch(&mut self, event: WindowEvent) -> Result<Option<Hit>> {
        if !self.running || !self.listeners.accepts(&event) {
            log::trace!("ignoring {event:?}: listener detached");
            return Ok(None);
        }
        match event {
            WindowEvent::Click { client_x, client_y } => Ok(self.pick(client_x, client_y)),
            WindowEvent::Resize { width, height } => self.resize(width, height).map(|_| None),
            WindowEvent::Drag { dx, dy } => {
                self.controls.rotate_by_pixels(dx, dy, self.height);
                Ok(None)
            }
            WindowEvent::Wheel { delta_y } => {
                self.controls.dolly(delta_y);
                Ok(None)
            }
        }
    }

    /// Nearest mesh under the given client coordinates
    pub fn pick(&self, client_x: f32, client_y: f32) -> Option<Hit> {
        let (x, y) = client_to_ndc(client_x, client_y, self.width, self.height);
        let ray = self.camera.ray_from_ndc(x, y);
        let hit = self.scene.raycast(&ray).into_iter().next();
        log::debug!("pick ({client_x}, {client_y}) -> {:?}", hit.as_ref().map(|h| &h.mesh_name));
        hit
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(SceneError::InvalidViewportSize { width, height });
        }
        self.width = width;
        self.height = height;
        self.camera.set_aspect(width, height);
        self.surface.set_size(width, height);
        Ok(())
    }

    /// Fly the camera from its live position to `target`
    pub fn animate_camera_to(&mut self, target: Position3, duration_ms: i64) -> Result<()> {
        if !self.running {
            return Err(SceneError::TornDown);
        }
        let start = self.camera.position;
        self.animator.animate(start, target, duration_ms, &mut self.camera);
        Ok(())
    }

    /// Unmount: stop ticking, cancel the camera flight, detach listeners
    pub fn teardown(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.animator.cancel();
        self.listeners = Listeners::default();
        log::info!("viewport torn down after {} ticks", self.ticks);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn listeners(&self) -> Listeners {
        self.listeners
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
