// error_handling.rs - Scene errors and user-facing alert surfacing

use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

use crate::scene::ObjectId;

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Scene object {0:?} does not exist")]
    UnknownObject(ObjectId),

    #[error("Viewport size {width}x{height} is not drawable")]
    InvalidViewportSize { width: u32, height: u32 },

    #[error("Viewport has been torn down")]
    TornDown,

    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error(transparent)]
    Puzzle(#[from] crate::puzzle::PuzzleError),

    #[error(transparent)]
    Animation(#[from] crate::animation::AnimationError),
}

pub type Result<T> = std::result::Result<T, SceneError>;

/// Sink for user-facing validation failures, shown as blocking alerts in an interactive host.
pub trait Notifier {
    fn alert(&mut self, message: &str);
}

/// Keeps every alert so a headless run can report them.
/// Clones share the same backing list.
#[derive(Debug, Default, Clone)]
pub struct CollectingNotifier {
    alerts: Rc<RefCell<Vec<String>>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.alerts.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.borrow().is_empty()
    }
}

impl Notifier for CollectingNotifier {
    fn alert(&mut self, message: &str) {
        log::warn!("alert: {message}");
        self.alerts.borrow_mut().push(message.to_owned());
    }
}
