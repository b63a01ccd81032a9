// animation/orchestrator.rs - Click → load → camera flight sequencing

use super::{AnimationError, Position3, Result, SequenceState};
use crate::scene::{AssetLoader, LoadTicket, LoadedAsset, ObjectId, RenderSurface, Transform, Viewport};

/// What a click on the trigger mesh loads, where it goes, and where the camera flies
#[derive(Debug, Clone)]
pub struct SequencePlan {
    pub trigger_mesh: String,
    pub model_path: String,
    pub placement: Transform,
    pub camera_target: Position3,
    pub duration_ms: i64,
}

/// `Idle → Loading → Animating → Idle`.
///
/// Only a completed load for the pending ticket moves `Loading` to `Animating`.
/// After teardown the pending ticket is abandoned and late completions are dropped.
pub struct SequenceOrchestrator {
    plan: SequencePlan,
    state: SequenceState,
    pending: Option<LoadTicket>,
    spawned: Vec<ObjectId>,
    torn_down: bool,
}

impl SequenceOrchestrator {
    pub fn new(plan: SequencePlan) -> Self {
        Self {
            plan,
            state: SequenceState::Idle,
            pending: None,
            spawned: Vec::new(),
            torn_down: false,
        }
    }

    /// A click landed on `mesh_name`. Returns true if it started a load.
    pub fn on_click<L: AssetLoader + ?Sized>(&mut self, mesh_name: &str, loader: &mut L) -> Result<bool> {
        if self.torn_down {
            return Err(AnimationError::TornDown);
        }
        if mesh_name != self.plan.trigger_mesh {
            return Ok(false);
        }
        match self.state {
            SequenceState::Loading => {
                log::debug!("'{mesh_name}' clicked while loading; ignored");
                Ok(false)
            }
            SequenceState::Idle | SequenceState::Animating => {
                let ticket = loader.load(&self.plan.model_path);
                log::info!("'{mesh_name}' clicked, loading {} ({ticket:?})", self.plan.model_path);
                self.pending = Some(ticket);
                self.state = SequenceState::Loading;
                Ok(true)
            }
        }
    }

    /// Offer a completed load. Returns true if it was ours and the flight started.
    pub fn on_loaded<S: RenderSurface>(
        &mut self,
        asset: LoadedAsset,
        viewport: &mut Viewport<S>,
    ) -> Result<bool> {
        if self.torn_down || self.state != SequenceState::Loading || self.pending != Some(asset.ticket) {
            log::debug!("dropping stale load {:?} ({})", asset.ticket, asset.path);
            return Ok(false);
        }

        if !viewport.is_running() {
            log::debug!("viewport gone; {} not placed", asset.path);
            return Err(AnimationError::TornDown);
        }

        let mut node = asset.node;
        node.transform = self.plan.placement;
        self.spawned.push(viewport.scene.add(node));
        self.pending = None;

        viewport
            .animate_camera_to(self.plan.camera_target, self.plan.duration_ms)
            .map_err(|err| AnimationError::InvalidParameters(err.to_string()))?;
        self.state = if viewport.animator.is_animating() {
            SequenceState::Animating
        } else {
            SequenceState::Idle
        };
        log::info!("{} placed, camera flight started", asset.path);
        Ok(true)
    }

    /// Per-tick bookkeeping after the viewport advanced
    pub fn sync<S: RenderSurface>(&mut self, viewport: &Viewport<S>) {
        if self.state == SequenceState::Animating && !viewport.animator.is_animating() {
            log::debug!("camera flight finished");
            self.state = SequenceState::Idle;
        }
    }

    pub fn teardown<L: AssetLoader + ?Sized>(&mut self, loader: &mut L) {
        if let Some(ticket) = self.pending.take() {
            if loader.abandon(ticket) {
                log::warn!("teardown while loading {}; load abandoned", self.plan.model_path);
            }
        }
        self.state = SequenceState::Idle;
        self.torn_down = true;
    }

    pub fn state(&self) -> SequenceState {
        self.state
    }

    pub fn pending(&self) -> Option<LoadTicket> {
        self.pending
    }

    /// Models this sequence has added to the scene
    pub fn spawned(&self) -> &[ObjectId] {
        &self.spawned
    }

    pub fn plan(&self) -> &SequencePlan {
        &self.plan
    }
}
