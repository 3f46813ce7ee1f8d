/// Host that can schedule a callback for the next animation frame.
///
/// In the browser this is `requestAnimationFrame` / `cancelAnimationFrame`;
/// tests use a recording fake.
pub trait FrameHost {
    type Handle: Copy + PartialEq + std::fmt::Debug;

    fn request_frame(&mut self) -> Self::Handle;
    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// Single-slot frame debounce.
///
/// At most one frame request is outstanding. Scheduling again cancels the
/// pending request and replaces it, so any burst of triggers within one frame
/// collapses into a single run.
#[derive(Debug)]
pub struct FrameDebounce<H> {
    pending: Option<H>,
}

impl<H: Copy + PartialEq + std::fmt::Debug> FrameDebounce<H> {
    pub fn new() -> Self {
        Self { pending: None }
    }

    pub fn pending(&self) -> Option<H> {
        self.pending
    }

    /// Cancel any outstanding request and schedule a fresh one.
    pub fn schedule<F: FrameHost<Handle = H>>(&mut self, host: &mut F) -> H {
        if let Some(previous) = self.pending.take() {
            host.cancel_frame(previous);
        }
        let handle = host.request_frame();
        self.pending = Some(handle);
        handle
    }

    /// Called when a frame fires. Returns `true` if `handle` is the live
    /// request (and clears it); stale handles are ignored.
    pub fn fire(&mut self, handle: H) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }
}

impl<H: Copy + PartialEq + std::fmt::Debug> Default for FrameDebounce<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{FrameDebounce, FrameHost};

    #[derive(Default)]
    struct RecordingHost {
        next: u32,
        live: Vec<u32>,
        cancelled: Vec<u32>,
    }

    impl FrameHost for RecordingHost {
        type Handle = u32;

        fn request_frame(&mut self) -> u32 {
            self.next += 1;
            self.live.push(self.next);
            self.next
        }

        fn cancel_frame(&mut self, handle: u32) {
            self.live.retain(|h| *h != handle);
            self.cancelled.push(handle);
        }
    }

    #[test]
    fn burst_collapses_to_one_request() {
        let mut host = RecordingHost::default();
        let mut debounce = FrameDebounce::new();
        for _ in 0..10 {
            debounce.schedule(&mut host);
        }

        assert_eq!(host.live, vec![10]);
        assert_eq!(host.cancelled.len(), 9);
        assert_eq!(debounce.pending(), Some(10));

        let fired: Vec<bool> = host.live.clone().into_iter().map(|h| debounce.fire(h)).collect();
        assert_eq!(fired, vec![true]);
        assert_eq!(debounce.pending(), None);
    }

    #[test]
    fn stale_handle_is_ignored() {
        let mut host = RecordingHost::default();
        let mut debounce = FrameDebounce::new();
        let first = debounce.schedule(&mut host);
        let second = debounce.schedule(&mut host);

        assert!(!debounce.fire(first));
        assert!(debounce.fire(second));
        assert!(!debounce.fire(second));
    }

    #[test]
    fn schedule_after_fire_starts_fresh() {
        let mut host = RecordingHost::default();
        let mut debounce = FrameDebounce::new();
        let h = debounce.schedule(&mut host);
        assert!(debounce.fire(h));
        debounce.schedule(&mut host);
        assert!(host.cancelled.is_empty());
    }
}
