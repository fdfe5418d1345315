use bunbun_assets::AssetPath;
use log::{debug, info};

/// Pending "load this level next" request. The first request made during an
/// update pass wins; the engine consumes it at the frame boundary.
#[derive(Debug, Default)]
pub struct TransitionRequest {
    next: Option<AssetPath>,
}

impl TransitionRequest {
    /// Returns `false` when another transition is already pending.
    pub fn request(&mut self, level: AssetPath) -> bool {
        if let Some(pending) = &self.next {
            debug!("ignoring transition to {level}, {pending} is already pending");
            return false;
        }
        info!("transition to {level} requested");
        self.next = Some(level);
        true
    }

    pub fn pending(&self) -> Option<&AssetPath> {
        self.next.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.next.is_some()
    }

    pub fn take(&mut self) -> Option<AssetPath> {
        self.next.take()
    }
}
