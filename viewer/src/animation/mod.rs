// animation/mod.rs - Frame-driven animation system for the viewer scenes

pub mod tween;
pub mod camera_animator;
pub mod orchestrator;

pub use tween::*;
pub use camera_animator::*;
pub use orchestrator::*;

pub use crate::types::{lerp, Color, Position3, Vec3};

use serde::{Serialize, Deserialize};

// ============================================================================
// ANIMATION STATE MANAGEMENT
// ============================================================================

/// Click-driven sequence state: a model load followed by a camera flight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequenceState {
    Idle,
    Loading,
    Animating,
}

/// Tween playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Playing,
    Finished,
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

/// Animation system errors
#[derive(Debug, thiserror::Error)]
pub enum AnimationError {
    #[error("Invalid animation parameters: {0}")]
    InvalidParameters(String),

    #[error("Animation system has been torn down")]
    TornDown,
}

pub type Result<T> = std::result::Result<T, AnimationError>;
