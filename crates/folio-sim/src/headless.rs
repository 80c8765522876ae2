//! Frame scheduling without a browser.

use folio_core::{FrameHandle, FrameScheduler, ScheduleError};

/// Hands out frame handles and remembers which one is pending. The runner
/// fires the pending frame itself at a fixed step.
#[derive(Debug, Default)]
pub struct HeadlessScheduler {
    next: i32,
    pending: Option<FrameHandle>,
}

impl HeadlessScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the pending request, if any. The component must have asked for
    /// a frame before the runner may fire one.
    pub fn take_pending(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }
}

impl FrameScheduler for HeadlessScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle, ScheduleError> {
        self.next += 1;
        let handle = FrameHandle(self.next);
        self.pending = Some(handle);
        Ok(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}
