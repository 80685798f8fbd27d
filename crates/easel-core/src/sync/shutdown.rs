use parking_lot::{Condvar, Mutex};
use std::sync::Arc;
use std::time::Duration;

/// One-shot completion latch.
///
/// Fired once by the session owner after the window is released; any clone
/// can wait for it. Firing again is a no-op.
#[derive(Clone, Default)]
pub struct ShutdownSignal {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    done: Mutex<bool>,
    cv: Condvar,
}

impl ShutdownSignal {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` for the call that actually fired the signal.
    pub fn fire(&self) -> bool {
        let mut done = self.inner.done.lock();
        if *done {
            return false;
        }
        *done = true;
        self.inner.cv.notify_all();
        true
    }

    #[inline]
    pub fn is_fired(&self) -> bool {
        *self.inner.done.lock()
    }

    pub fn wait(&self) {
        let mut done = self.inner.done.lock();
        while !*done {
            self.inner.cv.wait(&mut done);
        }
    }

    /// Returns whether the signal fired before `timeout` elapsed.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let mut done = self.inner.done.lock();
        if *done {
            return true;
        }
        let _ = self
            .inner
            .cv
            .wait_while_for(&mut done, |d| !*d, timeout);
        *done
    }
}

impl std::fmt::Debug for ShutdownSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShutdownSignal")
            .field("fired", &self.is_fired())
            .finish()
    }
}
