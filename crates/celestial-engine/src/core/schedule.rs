//! Cancellable frame scheduling.

/// Token for one pending frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u32);

/// Whether the animation loop is ticking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoopState {
    #[default]
    Stopped,
    Running,
}

/// Host clock that calls back into the engine once per frame.
///
/// The engine requests exactly one frame at a time and re-requests from
/// inside each tick while it is running.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;

    /// Drop a pending request. Unknown or already-fired handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Scheduler that only records requests. The host (or a test) decides when
/// to call `tick`.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    next: u32,
    pending: Option<FrameHandle>,
    requested: u32,
    cancelled: u32,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    /// Total frames requested so far.
    pub fn requested(&self) -> u32 {
        self.requested
    }

    pub fn cancelled(&self) -> u32 {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        self.requested += 1;
        let handle = FrameHandle(self.next);
        self.pending = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
            self.cancelled += 1;
        }
    }
}
