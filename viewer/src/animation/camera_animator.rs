// animation/camera_animator.rs - Time-bounded camera position animation

use std::time::Duration;
use super::{Position3, Tween, Easing, PlaybackState};

/// Anything that owns a live camera position the animator can drive.
pub trait PositionSink {
    fn position(&self) -> Position3;
    fn set_position(&mut self, position: Position3);
}

/// One start→target flight. At most one is active per animator.
#[derive(Debug, Clone)]
pub struct AnimationSession {
    tween: Tween<Position3>,
}

impl AnimationSession {
    fn new(start: Position3, target: Position3, duration: Duration, easing: Easing) -> Self {
        Self {
            tween: Tween::new(start, target, duration).with_easing(easing),
        }
    }

    pub fn start(&self) -> Position3 {
        *self.tween.start()
    }

    pub fn target(&self) -> Position3 {
        *self.tween.end()
    }

    pub fn duration(&self) -> Duration {
        self.tween.duration()
    }

    pub fn elapsed(&self) -> Duration {
        self.tween.elapsed()
    }

    pub fn progress(&self) -> f32 {
        self.tween.progress()
    }

    pub fn is_active(&self) -> bool {
        self.tween.state() == PlaybackState::Playing
    }
}

/// Drives a [`PositionSink`] from a start to a target position.
///
/// The host calls [`CameraAnimator::advance`] once per tick with the frame delta;
/// the animator never schedules anything on its own.
pub struct CameraAnimator {
    session: Option<AnimationSession>,
    easing: Easing,
}

impl CameraAnimator {
    pub fn new() -> Self {
        Self {
            session: None,
            easing: Easing::Linear,
        }
    }

    /// Interpolation curve for subsequent sessions
    pub fn set_easing(&mut self, easing: Easing) {
        self.easing = easing;
    }

    /// Start a flight to `target`.
    ///
    /// If a session is already in flight it is discarded and the new one starts
    /// from the sink's live position instead of `start`, so the camera never jumps.
    /// A non-positive duration puts the sink on `target` immediately.
    pub fn animate<S: PositionSink + ?Sized>(
        &mut self,
        start: Position3,
        target: Position3,
        duration_ms: i64,
        sink: &mut S,
    ) {
        let start = match self.session.take() {
            Some(previous) if previous.is_active() => {
                let live = sink.position();
                log::debug!(
                    "Replacing camera flight at {:.0}% (live position {:?})",
                    previous.progress() * 100.0,
                    live
                );
                live
            }
            _ => start,
        };

        if duration_ms <= 0 {
            log::debug!("Camera flight with duration {duration_ms}ms resolves immediately to {target:?}");
            sink.set_position(target);
            return;
        }

        log::debug!("Camera flight {start:?} -> {target:?} over {duration_ms}ms");
        sink.set_position(start);
        self.session = Some(AnimationSession::new(
            start,
            target,
            Duration::from_millis(duration_ms as u64),
            self.easing,
        ));
    }

    /// Step the active session by `dt` and write the new position.
    /// Returns `true` once there is nothing left to animate.
    pub fn advance<S: PositionSink + ?Sized>(&mut self, dt: Duration, sink: &mut S) -> bool {
        let Some(session) = self.session.as_mut() else {
            return true;
        };

        let running = session.tween.update(dt);
        sink.set_position(*session.tween.current());

        if !running {
            log::debug!("Camera flight reached {:?}", session.target());
            self.session = None;
            return true;
        }
        false
    }

    /// Drop the active session without touching the sink
    pub fn cancel(&mut self) {
        if let Some(session) = self.session.take() {
            log::debug!("Camera flight cancelled at {:.0}%", session.progress() * 100.0);
        }
    }

    pub fn session(&self) -> Option<&AnimationSession> {
        self.session.as_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.session.as_ref().is_some_and(AnimationSession::is_active)
    }
}

impl Default for CameraAnimator {
    fn default() -> Self {
        Self::new()
    }
}
