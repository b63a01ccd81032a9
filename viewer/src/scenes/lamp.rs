// scenes/lamp.rs - Lamp scene: click the lamp, the genie appears, the camera flies down

use std::time::Duration;

use crate::animation::{AnimationError, SequenceOrchestrator, SequencePlan, SequenceState};
use crate::config::SceneConfig;
use crate::error_handling::Result;
use crate::scene::{
    AssetLoader, DirectionalLight, Hit, LoadTicket, ObjectId, OrbitControls, PerspectiveCamera,
    RenderSurface, Scene, SceneNode, Viewport, WindowEvent,
};
use crate::types::{Color, Vec3};

/// Purple rim lights from below plus white key lights above and below
fn light_rig() -> [SceneNode; 4] {
    let light = |color: Color, intensity: f32| DirectionalLight { color, intensity };
    [
        SceneNode::light("bottom", light(Color::WHITE, 5.0), Vec3::new(0.0, -0.5, 0.0)),
        SceneNode::light("top", light(Color::WHITE, 5.0), Vec3::new(0.0, 20.0, 0.0)),
        SceneNode::light("left", light(Color::PURPLE, 10.0), Vec3::new(-10.0, -20.0, 5.0)),
        SceneNode::light("right", light(Color::PURPLE, 10.0), Vec3::new(10.0, -20.0, 5.0)),
    ]
}

pub struct LampScene<S: RenderSurface, L: AssetLoader> {
    viewport: Viewport<S>,
    loader: L,
    sequence: SequenceOrchestrator,
    lamp_ticket: Option<LoadTicket>,
    lamp: Option<ObjectId>,
}

impl<S: RenderSurface, L: AssetLoader> LampScene<S, L> {
    /// Build the scene, request the lamp, attach listeners and size the surface
    pub fn mount(config: &SceneConfig, surface: S, mut loader: L) -> Result<Self> {
        config.validate()?;
        let lamp_cfg = &config.lamp;

        let mut scene = Scene::new(Color::BLACK);
        for light in light_rig() {
            scene.add(light);
        }

        let camera = PerspectiveCamera::new(lamp_cfg.fov, 1.0, 0.1, 2000.0).with_position(lamp_cfg.camera_position);
        let controls = OrbitControls::new(Vec3::zero()).with_damping(lamp_cfg.damping_factor);
        let mut viewport = Viewport::mount(
            scene,
            camera,
            controls,
            surface,
            config.window.width,
            config.window.height,
        )?;
        viewport.animator.set_easing(lamp_cfg.easing);

        let lamp_ticket = Some(loader.load(&lamp_cfg.lamp_path));
        let sequence = SequenceOrchestrator::new(SequencePlan {
            trigger_mesh: lamp_cfg.trigger_mesh.clone(),
            model_path: lamp_cfg.genie_path.clone(),
            placement: lamp_cfg.genie_placement,
            camera_target: lamp_cfg.camera_target,
            duration_ms: lamp_cfg.flight_duration_ms,
        });

        Ok(Self {
            viewport,
            loader,
            sequence,
            lamp_ticket,
            lamp: None,
        })
    }

    /// Append finished loads, then advance the viewport one frame.
    /// Returns false once unmounted.
    pub fn tick(&mut self, dt: Duration) -> bool {
        if !self.viewport.is_running() {
            return false;
        }

        for asset in self.loader.poll_completed() {
            if self.lamp_ticket == Some(asset.ticket) {
                self.lamp_ticket = None;
                self.lamp = Some(self.viewport.scene.add(asset.node));
                log::info!("lamp placed");
                continue;
            }
            if let Err(err) = self.sequence.on_loaded(asset, &mut self.viewport) {
                log::error!("genie sequence failed: {err}");
            }
        }

        self.viewport.tick(dt);
        self.sequence.sync(&self.viewport);
        true
    }

    /// Route a window event; clicks on the trigger mesh start the sequence
    pub fn dispatch(&mut self, event: WindowEvent) -> Result<Option<Hit>> {
        let hit = self.viewport.dispatch(event)?;
        if let Some(hit) = &hit {
            match self.sequence.on_click(&hit.mesh_name, &mut self.loader) {
                Ok(_) | Err(AnimationError::TornDown) => {}
                Err(err) => return Err(err.into()),
            }
        }
        Ok(hit)
    }

    /// Client coordinates of the lamp's center, once it is loaded
    pub fn lamp_screen_position(&self) -> Option<(f32, f32)> {
        let node = self.viewport.scene.get(self.lamp?)?;
        let center = node.meshes.first()?.bounds.transformed(&node.transform).center();
        let (x, y) = self.viewport.camera.project(center)?;
        let (w, h) = self.viewport.size();
        Some(((x + 1.0) / 2.0 * w as f32, (1.0 - y) / 2.0 * h as f32))
    }

    /// Abandon pending loads, stop the frame loop and detach listeners
    pub fn unmount(&mut self) {
        self.sequence.teardown(&mut self.loader);
        if let Some(ticket) = self.lamp_ticket.take() {
            self.loader.abandon(ticket);
        }
        self.viewport.teardown();
    }

    pub fn viewport(&self) -> &Viewport<S> {
        &self.viewport
    }

    pub fn state(&self) -> SequenceState {
        self.sequence.state()
    }

    pub fn is_lamp_loaded(&self) -> bool {
        self.lamp.is_some()
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{HeadlessSurface, ManifestAssetLoader, NodeKind};

    fn mounted() -> LampScene<HeadlessSurface, ManifestAssetLoader> {
        let config = SceneConfig::default();
        let loader = ManifestAssetLoader::new(config.base_path.clone(), config.assets.clone());
        LampScene::mount(&config, HeadlessSurface::new(), loader).unwrap()
    }

    #[test]
    fn test_mount_adds_light_rig_and_requests_lamp() {
        let scene = mounted();
        let lights = scene
            .viewport()
            .scene
            .iter()
            .filter(|(_, n)| matches!(n.kind, NodeKind::Light(_)))
            .count();
        assert_eq!(lights, 4);
        assert_eq!(scene.loader().pending_count(), 1);
        assert!(!scene.is_lamp_loaded());
    }

    #[test]
    fn test_mount_applies_configured_easing() {
        let mut config = SceneConfig::default();
        config.lamp.easing = crate::animation::Easing::QuadOut;
        config.lamp.flight_duration_ms = 100;
        let loader = ManifestAssetLoader::new(config.base_path.clone(), config.assets.clone());
        let mut scene = LampScene::mount(&config, HeadlessSurface::new(), loader).unwrap();

        let start = scene.viewport.camera.position;
        let target = config.lamp.camera_target;
        scene.viewport.animate_camera_to(target, 100).unwrap();
        scene.viewport.tick(Duration::from_millis(50));

        // QuadOut covers 75% of the distance at half time; linear would cover 50%.
        let expected = start.lerp(target, 0.75);
        assert!((scene.viewport.camera.position - expected).length() < 1e-4);
    }

    #[test]
    fn test_lamp_appears_after_load_latency() {
        let mut scene = mounted();
        for _ in 0..10 {
            scene.tick(Duration::from_millis(16));
        }
        assert!(scene.is_lamp_loaded());
        assert!(scene.lamp_screen_position().is_some());
    }

    #[test]
    fn test_unmount_before_lamp_loads() {
        let mut scene = mounted();
        scene.unmount();
        assert_eq!(scene.loader().pending_count(), 0);
        assert!(!scene.tick(Duration::from_millis(16)));
        assert!(!scene.is_lamp_loaded());
    }
}
