//! Background Scroll Lock
//!
//! While the mobile menu is open the page behind it must not scroll. The
//! lock is held through a guard, so every way of leaving the open state
//! (close, route change, unmount, panic unwinding) releases it.

use std::fmt;
use std::rc::Rc;

/// Suppresses and restores page scrolling
pub trait ScrollLock {
    fn lock(&self);
    fn unlock(&self);
}

/// No-op lock for environments without a page
#[derive(Debug, Default, Clone, Copy)]
pub struct NoScrollLock;

impl ScrollLock for NoScrollLock {
    fn lock(&self) {}
    fn unlock(&self) {}
}

/// Scoped hold on a [`ScrollLock`]; unlocks on drop
pub struct ScrollLockGuard {
    lock: Rc<dyn ScrollLock>,
}

impl ScrollLockGuard {
    pub fn acquire(lock: Rc<dyn ScrollLock>) -> Self {
        lock.lock();
        tracing::trace!("Scroll lock acquired");
        Self { lock }
    }
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        self.lock.unlock();
        tracing::trace!("Scroll lock released");
    }
}

impl fmt::Debug for ScrollLockGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollLockGuard").finish_non_exhaustive()
    }
}
