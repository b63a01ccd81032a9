// lib.rs - Library exports for the skyscraper scene viewer
// Camera animation, puzzle grid construction, and the two mountable scenes

pub mod types;
pub mod animation;
pub mod scene;
pub mod puzzle;
pub mod scenes;
pub mod config;
pub mod error_handling;
pub mod frame_timing;

// Re-export commonly used types
pub use animation::{CameraAnimator, Easing, PositionSink, SequenceOrchestrator, SequenceState, Tween};
pub use config::SceneConfig;
pub use error_handling::{CollectingNotifier, Notifier, SceneError};
pub use puzzle::{Block, BlockInstance, PuzzleBoard, PuzzleError, PuzzleMatrix};
pub use scene::{HeadlessSurface, ManifestAssetLoader, PerspectiveCamera, Viewport, WindowEvent};
pub use scenes::{LampScene, PuzzleScene};
pub use types::{Color, Position3, Vec3};
