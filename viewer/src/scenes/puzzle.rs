// scenes/puzzle.rs - Puzzle visualizer: size field, digit field, commit button, block grid

use std::time::Duration;

use crate::config::SceneConfig;
use crate::error_handling::{Notifier, Result, SceneError};
use crate::puzzle::{Block, BlockInstance, PuzzleBoard, PuzzleMatrix};
use crate::scene::{Hit, OrbitControls, PerspectiveCamera, RenderSurface, Scene, Viewport, WindowEvent};
use crate::types::Color;

pub struct PuzzleScene<S: RenderSurface, N: Notifier> {
    viewport: Viewport<S>,
    board: PuzzleBoard<N>,
}

impl<S: RenderSurface, N: Notifier> PuzzleScene<S, N> {
    /// Build the viewport and show the initial board
    pub fn mount(config: &SceneConfig, surface: S, notifier: N) -> Result<Self> {
        config.validate()?;
        let cfg = &config.puzzle;
        let aspect = config.window.width as f32 / config.window.height.max(1) as f32;
        let camera = PerspectiveCamera::new(cfg.fov, aspect, cfg.near, cfg.far).with_position(cfg.camera_position);

        let mut viewport = Viewport::mount(
            Scene::new(Color::BLACK),
            camera,
            OrbitControls::default(),
            surface,
            config.window.width,
            config.window.height,
        )?;

        let mut board = PuzzleBoard::new(cfg.initial.clone(), cfg.cell_size, notifier);
        board.show(&mut viewport.scene)?;
        Ok(Self { viewport, board })
    }

    pub fn tick(&mut self, dt: Duration) -> bool {
        self.viewport.tick(dt)
    }

    pub fn dispatch(&mut self, event: WindowEvent) -> Result<Option<Hit>> {
        self.viewport.dispatch(event)
    }

    /// Size field changed
    pub fn set_size(&mut self, requested: i64) -> Result<usize> {
        self.ensure_mounted()?;
        Ok(self.board.set_size(requested)?)
    }

    /// Size field changed, as typed
    pub fn set_size_field(&mut self, raw: &str) -> Result<usize> {
        self.ensure_mounted()?;
        Ok(self.board.set_size_field(raw)?)
    }

    /// Digit field changed
    pub fn set_input(&mut self, raw: impl Into<String>) {
        self.board.set_input(raw);
    }

    /// Commit button: rebuild the grid from the digit field, or alert and keep the old one
    pub fn commit(&mut self) -> Result<&PuzzleMatrix> {
        self.ensure_mounted()?;
        Ok(self.board.commit(&mut self.viewport.scene)?)
    }

    /// Remove the blocks, then stop the viewport
    pub fn unmount(&mut self) {
        if self.viewport.is_running() {
            self.board.clear(&mut self.viewport.scene);
            self.viewport.teardown();
        }
    }

    /// Instance data for every block currently in the scene, in cell order
    pub fn block_instances(&self) -> Vec<BlockInstance> {
        self.board.generation().blocks().iter().map(Block::instance).collect()
    }

    fn ensure_mounted(&self) -> Result<()> {
        if self.viewport.is_running() {
            Ok(())
        } else {
            Err(SceneError::TornDown)
        }
    }

    pub fn viewport(&self) -> &Viewport<S> {
        &self.viewport
    }

    pub fn board(&self) -> &PuzzleBoard<N> {
        &self.board
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::CollectingNotifier;
    use crate::puzzle::PuzzleError;
    use crate::scene::HeadlessSurface;

    fn mounted() -> (PuzzleScene<HeadlessSurface, CollectingNotifier>, CollectingNotifier) {
        let alerts = CollectingNotifier::new();
        let scene = PuzzleScene::mount(&SceneConfig::default(), HeadlessSurface::new(), alerts.clone()).unwrap();
        (scene, alerts)
    }

    #[test]
    fn test_mount_shows_initial_board() {
        let (scene, _) = mounted();
        assert_eq!(scene.block_instances().len(), 16);
        assert_eq!(scene.viewport().camera.position.y, 8.0);
    }

    #[test]
    fn test_mount_rejects_non_square_initial_board() {
        let mut config = SceneConfig::default();
        config.puzzle.initial = PuzzleMatrix::from_rows(vec![vec![1, 2, 3]]).unwrap();
        let mounted = PuzzleScene::mount(&config, HeadlessSurface::new(), CollectingNotifier::new());
        assert!(matches!(mounted, Err(SceneError::InvalidConfig { .. })));
    }

    #[test]
    fn test_mount_sizes_field_from_initial_board() {
        let mut config = SceneConfig::default();
        config.puzzle.initial = PuzzleMatrix::from_rows(vec![vec![2; 6]; 6]).unwrap();
        let scene = PuzzleScene::mount(&config, HeadlessSurface::new(), CollectingNotifier::new()).unwrap();
        assert_eq!(scene.board().size(), 6);
        assert_eq!(scene.block_instances().len(), 36);
    }

    #[test]
    fn test_commit_swaps_blocks_within_one_frame() {
        let (mut scene, alerts) = mounted();
        scene.tick(Duration::from_millis(16));
        scene.set_size(5).unwrap();
        scene.set_input("9".repeat(25));
        scene.commit().unwrap();
        scene.tick(Duration::from_millis(16));

        let frame = scene.viewport().surface().last_frame().copied().unwrap();
        assert_eq!(frame.object_count, 25);
        assert!(scene.block_instances().iter().all(|b| b.size[1] == 9.0));
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_rejected_commit_alerts() {
        let (mut scene, alerts) = mounted();
        scene.set_input("not a puzzle");
        assert!(matches!(scene.commit(), Err(SceneError::Puzzle(PuzzleError::NoDigitsFound))));
        assert_eq!(alerts.alerts(), vec!["No matching numbers found"]);
        assert_eq!(scene.block_instances().len(), 16);
    }

    #[test]
    fn test_unmount_clears_blocks_and_blocks_further_mutation() {
        let (mut scene, _) = mounted();
        scene.unmount();
        assert!(scene.viewport().scene.is_empty());
        let revision = scene.viewport().scene.revision();

        scene.set_input("1".repeat(16));
        assert!(matches!(scene.commit(), Err(SceneError::TornDown)));
        assert!(matches!(scene.set_size(5), Err(SceneError::TornDown)));
        assert!(matches!(scene.set_size_field("5"), Err(SceneError::TornDown)));
        scene.dispatch(WindowEvent::Resize { width: 10, height: 10 }).unwrap();
        assert!(!scene.tick(Duration::from_millis(16)));
        assert_eq!(scene.viewport().scene.revision(), revision);
    }
}
