// animation/tween.rs - Time-bounded tween used by the camera animator

use std::time::Duration;
use super::{Vec3, lerp, PlaybackState};

// ============================================================================
// EASING FUNCTIONS
// ============================================================================

/// Interpolation curves. All of them are monotone on [0, 1] and hit both
/// endpoints exactly, so a tween never overshoots its target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Easing {
    #[default]
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    SineIn,
    SineOut,
    SineInOut,
}

impl Easing {
    /// Apply easing function to normalized time value
    #[inline]
    pub fn apply(self, mut t: f32) -> f32 {
        t = t.clamp(0.0, 1.0);

        match self {
            Easing::Linear => t,

            // Quadratic
            Easing::QuadIn => t * t,
            Easing::QuadOut => t * (2.0 - t),
            Easing::QuadInOut => {
                if t < 0.5 { 2.0 * t * t } else { -1.0 + (4.0 - 2.0 * t) * t }
            },

            // Cubic
            Easing::CubicIn => t * t * t,
            Easing::CubicOut => {
                let t = t - 1.0;
                t * t * t + 1.0
            },
            Easing::CubicInOut => {
                if t < 0.5 { 4.0 * t * t * t } else {
                    let t = 2.0 * t - 2.0;
                    1.0 + t * t * t / 2.0
                }
            },

            // Sine
            Easing::SineIn => 1.0 - (t * std::f32::consts::FRAC_PI_2).cos(),
            Easing::SineOut => (t * std::f32::consts::FRAC_PI_2).sin(),
            Easing::SineInOut => -(((std::f32::consts::PI * t).cos() - 1.0) / 2.0),
        }
    }
}

// ============================================================================
// INTERPOLATABLE TRAIT
// ============================================================================

/// Trait for types that can be interpolated
pub trait Interpolate: Clone {
    fn interpolate(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    #[inline]
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        lerp(*self, *other, t)
    }
}

impl Interpolate for Vec3 {
    #[inline]
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self.lerp(*other, t)
    }
}

// ============================================================================
// TWEEN IMPLEMENTATION
// ============================================================================

/// Generic tween for any interpolatable type
#[derive(Debug, Clone)]
pub struct Tween<T: Interpolate> {
    start: T,
    end: T,
    current: T,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
    state: PlaybackState,
}

impl<T: Interpolate> Tween<T> {
    /// Create new tween
    pub fn new(start: T, end: T, duration: Duration) -> Self {
        Self {
            start: start.clone(),
            end,
            current: start,
            duration,
            elapsed: Duration::ZERO,
            easing: Easing::Linear,
            state: PlaybackState::Playing,
        }
    }

    /// Set easing function
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Get current interpolated value
    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn start(&self) -> &T {
        &self.start
    }

    pub fn end(&self) -> &T {
        &self.end
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Normalized progress in [0, 1], before easing
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Get playback state
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Update tween and return true if still active
    pub fn update(&mut self, dt: Duration) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }

        self.elapsed = self.elapsed.saturating_add(dt);

        if self.elapsed >= self.duration {
            // Snap to the end value; interpolating at t = 1 can be off by an ulp.
            self.elapsed = self.duration;
            self.current = self.end.clone();
            self.state = PlaybackState::Finished;
            return false;
        }

        let t = self.easing.apply(self.progress());
        self.current = self.start.interpolate(&self.end, t);
        true
    }
}

// ============================================================================
// TESTS
// ============================================================================
