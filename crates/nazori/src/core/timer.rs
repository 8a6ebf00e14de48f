//! One-shot timer queue on a virtual millisecond clock.
//! The host advances the clock; nothing here reads wall time.
//!
//! ```ignore
//! let mut timers = TimerQueue::new();
//! let h = timers.schedule(1500.0, Kind::Completion);
//! timers.cancel(h); // debounce: cancel then re-arm
//! while let Some((h, kind)) = timers.pop_due(target) { /* ... */ }
//! timers.advance_to(target);
//! ```

/// Handle to a scheduled timer for later cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(pub u32);

#[derive(Debug, Clone)]
struct Pending<T> {
    handle: TimerHandle,
    due_ms: f64,
    payload: T,
}

/// Pending one-shot timers, fired earliest deadline first.
#[derive(Debug, Clone)]
pub struct TimerQueue<T> {
    now_ms: f64,
    next_id: u32,
    pending: Vec<Pending<T>>,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now_ms: 0.0,
            next_id: 1,
            pending: Vec::new(),
        }
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Schedule `payload` to fire `delay_ms` from now.
    pub fn schedule(&mut self, delay_ms: f64, payload: T) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.pending.push(Pending {
            handle,
            due_ms: self.now_ms + delay_ms.max(0.0),
            payload,
        });
        handle
    }

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.pending.iter().position(|p| p.handle == handle) {
            Some(idx) => {
                self.pending.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Cancel every timer whose payload matches. Returns how many were dropped.
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let before = self.pending.len();
        self.pending.retain(|p| !pred(&p.payload));
        before - self.pending.len()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|p| p.handle == handle)
    }

    /// Remove and return the earliest timer due at or before `until_ms`.
    ///
    /// The clock moves to the fired deadline, so a timer scheduled while
    /// handling this one is measured from the deadline, not from `until_ms`.
    pub fn pop_due(&mut self, until_ms: f64) -> Option<(TimerHandle, T)> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due_ms <= until_ms)
            .min_by(|(_, a), (_, b)| {
                a.due_ms
                    .total_cmp(&b.due_ms)
                    .then(a.handle.0.cmp(&b.handle.0))
            })
            .map(|(i, _)| i)?;
        let fired = self.pending.remove(idx);
        self.now_ms = self.now_ms.max(fired.due_ms);
        Some((fired.handle, fired.payload))
    }

    /// Move the clock forward without firing anything.
    pub fn advance_to(&mut self, ms: f64) {
        self.now_ms = self.now_ms.max(ms);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(q: &mut TimerQueue<&'static str>, until: f64) -> Vec<&'static str> {
        let mut out = Vec::new();
        while let Some((_, p)) = q.pop_due(until) {
            out.push(p);
        }
        q.advance_to(until);
        out
    }

    #[test]
    fn fires_only_after_delay() {
        let mut q = TimerQueue::new();
        q.schedule(1500.0, "done");
        assert!(drain(&mut q, 1499.0).is_empty());
        assert_eq!(drain(&mut q, 1500.0), vec!["done"]);
        assert!(q.is_empty());
    }

    #[test]
    fn cancel_prevents_fire() {
        let mut q = TimerQueue::new();
        let h = q.schedule(100.0, "x");
        assert!(q.is_pending(h));
        assert!(q.cancel(h));
        assert!(!q.cancel(h));
        assert!(drain(&mut q, 1000.0).is_empty());
    }

    #[test]
    fn fires_in_deadline_order() {
        let mut q = TimerQueue::new();
        q.schedule(300.0, "c");
        q.schedule(100.0, "a");
        q.schedule(200.0, "b");
        assert_eq!(drain(&mut q, 500.0), vec!["a", "b", "c"]);
    }

    #[test]
    fn ties_fire_in_schedule_order() {
        let mut q = TimerQueue::new();
        q.schedule(100.0, "first");
        q.schedule(100.0, "second");
        assert_eq!(drain(&mut q, 100.0), vec!["first", "second"]);
    }

    #[test]
    fn chained_timer_is_relative_to_deadline() {
        let mut q = TimerQueue::new();
        q.schedule(1500.0, "idle");
        let (_, p) = q.pop_due(5000.0).unwrap();
        assert_eq!(p, "idle");
        assert_eq!(q.now_ms(), 1500.0);
        q.schedule(1500.0, "checked");
        assert!(q.pop_due(2999.0).is_none());
        assert_eq!(q.pop_due(5000.0).map(|(_, p)| p), Some("checked"));
    }

    #[test]
    fn cancel_where_filters_by_payload() {
        let mut q: TimerQueue<(u32, &str)> = TimerQueue::new();
        q.schedule(10.0, (1, "old"));
        q.schedule(10.0, (1, "old2"));
        q.schedule(10.0, (2, "new"));
        assert_eq!(q.cancel_where(|(epoch, _)| *epoch == 1), 2);
        assert_eq!(q.len(), 1);
    }
}
