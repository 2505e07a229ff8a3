//! Nesting depth tracking for engine runs.
//!
//! Decoding strategies may run schemas of their own, so one top-level decode
//! can recurse through many engine runs. [`DepthGuard`] counts the runs
//! currently active on this thread and refuses to enter past a schema's
//! maximum, turning runaway nesting into an ordinary validation error
//! instead of a stack overflow.

use std::cell::Cell;

/// Default maximum number of nested engine runs.
pub const DEFAULT_MAX_DEPTH: usize = 100;

thread_local! {
    static ACTIVE_RUNS: Cell<usize> = const { Cell::new(0) };
}

/// Marks one active engine run; leaving scope releases it.
#[derive(Debug)]
pub(crate) struct DepthGuard {
    depth: usize,
}

impl DepthGuard {
    /// Enters a new run, or returns `None` if `max_depth` runs are already
    /// active on this thread.
    pub(crate) fn enter(max_depth: usize) -> Option<Self> {
        ACTIVE_RUNS.with(|active| {
            let depth = active.get() + 1;
            if depth > max_depth {
                return None;
            }
            active.set(depth);
            Some(Self { depth })
        })
    }

    /// Returns the nesting depth of this run, starting at 1.
    pub(crate) fn depth(&self) -> usize {
        self.depth
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        ACTIVE_RUNS.with(|active| active.set(active.get().saturating_sub(1)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_counts_nesting() {
        let outer = DepthGuard::enter(2).unwrap();
        assert_eq!(outer.depth(), 1);
        {
            let inner = DepthGuard::enter(2).unwrap();
            assert_eq!(inner.depth(), 2);
            assert!(DepthGuard::enter(2).is_none());
        }
        let again = DepthGuard::enter(2).unwrap();
        assert_eq!(again.depth(), 2);
    }

    #[test]
    fn test_zero_depth_refuses() {
        assert!(DepthGuard::enter(0).is_none());
    }
}
