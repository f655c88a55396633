//! Fixed-capacity sink registry
//!
//! Append-only: under the registry's spin lock a slot index is reserved with
//! a bounded atomic update and the sink is published into it. Dispatch and
//! shutdown visit slots under the same lock, so a sink is never observed
//! half-published. There is no way to unregister a sink.
//!
//! `shutdown_all` closes the registry: every sink it accepted is notified
//! exactly once, and later registrations are refused.

use crate::constants::MAX_SINKS;
use crate::error::{LoggerError, Result};
use crate::sink::{Sink, SinkId};
use spin::{Mutex, Once};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

pub struct SinkRegistry<const N: usize = MAX_SINKS> {
    slots: [Once<Box<dyn Sink>>; N],
    /// Number of filled slots (never exceeds `N`)
    reserved: AtomicUsize,
    /// Set by `shutdown_all`; written under `lock`
    closed: AtomicBool,
    /// Exclusive-access region for publish, fan-out and shutdown
    lock: Mutex<()>,
}

impl<const N: usize> SinkRegistry<N> {
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| Once::new()),
            reserved: AtomicUsize::new(0),
            closed: AtomicBool::new(false),
            lock: Mutex::new(()),
        }
    }

    /// Register a sink, returning its slot
    ///
    /// # Errors
    ///
    /// `RegistryFull` once `N` sinks are registered, `ShutDown` once
    /// `shutdown_all` has run. Existing sinks are not touched.
    pub fn register<S: Sink + 'static>(&self, sink: S) -> Result<SinkId> {
        let _guard = self.lock.lock();
        // Checked under the lock so a concurrent shutdown cannot miss this sink.
        if self.closed.load(Ordering::Acquire) {
            return Err(LoggerError::ShutDown);
        }

        let index = self
            .reserved
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n < N).then_some(n + 1)
            })
            .map_err(|_| LoggerError::RegistryFull { capacity: N })?;

        self.slots[index].call_once(move || Box::new(sink) as Box<dyn Sink>);
        Ok(SinkId(index))
    }

    /// Visit every published sink once, in registration order
    pub fn for_each(&self, mut f: impl FnMut(&dyn Sink)) {
        let _guard = self.lock.lock();
        self.visit(&mut f);
    }

    /// Notify every published sink that it is about to go away and close
    /// the registry; only the first call notifies
    pub fn shutdown_all(&self) {
        let _guard = self.lock.lock();
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }
        self.visit(&mut |sink: &dyn Sink| sink.shutdown());
    }

    /// Whether `shutdown_all` has run
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Number of registered sinks (every counted slot is filled)
    pub fn len(&self) -> usize {
        self.reserved.load(Ordering::Acquire)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    // Caller holds `lock`.
    fn visit(&self, f: &mut dyn FnMut(&dyn Sink)) {
        let reserved = self.reserved.load(Ordering::Acquire).min(N);
        for slot in &self.slots[..reserved] {
            if let Some(sink) = slot.get() {
                f(sink.as_ref());
            }
        }
    }
}

impl<const N: usize> Default for SinkRegistry<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::severity::Severity;
    use std::sync::atomic::AtomicU32;
    use std::sync::Arc;

    #[derive(Default)]
    struct Counting {
        logs: AtomicU32,
        shutdowns: AtomicU32,
    }

    impl Sink for Counting {
        fn log(&self, _severity: Severity, _message: &str) {
            self.logs.fetch_add(1, Ordering::Relaxed);
        }

        fn shutdown(&self) {
            self.shutdowns.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[test]
    fn test_register_returns_sequential_ids() {
        let registry = SinkRegistry::<4>::new();
        assert!(registry.is_empty());

        let a = registry.register(Counting::default()).unwrap();
        let b = registry.register(Counting::default()).unwrap();

        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.capacity(), 4);
    }

    #[test]
    fn test_register_beyond_capacity_fails() {
        let registry = SinkRegistry::<2>::new();
        let sink = Arc::new(Counting::default());
        registry.register(sink.clone()).unwrap();
        registry.register(sink.clone()).unwrap();

        let err = registry.register(sink.clone()).unwrap_err();
        assert!(matches!(err, LoggerError::RegistryFull { capacity: 2 }));
        // Repeated failures do not move the count past the bound
        assert!(registry.register(sink.clone()).is_err());
        assert_eq!(registry.len(), 2);

        registry.for_each(|s| s.log(Severity::Information, "x"));
        assert_eq!(sink.logs.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_for_each_visits_in_registration_order() {
        struct Tagged(u32, Arc<parking_lot::Mutex<Vec<u32>>>);
        impl Sink for Tagged {
            fn log(&self, _severity: Severity, _message: &str) {
                self.1.lock().push(self.0);
            }
        }

        let order = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let registry = SinkRegistry::<8>::new();
        for tag in 0..5 {
            registry.register(Tagged(tag, order.clone())).unwrap();
        }

        registry.for_each(|s| s.log(Severity::Debug, "m"));
        assert_eq!(*order.lock(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_shutdown_all_notifies_each_sink() {
        let registry = SinkRegistry::<4>::new();
        let a = Arc::new(Counting::default());
        let b = Arc::new(Counting::default());
        registry.register(a.clone()).unwrap();
        registry.register(b.clone()).unwrap();

        registry.shutdown_all();

        assert_eq!(a.shutdowns.load(Ordering::Relaxed), 1);
        assert_eq!(b.shutdowns.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_concurrent_registration_no_loss_no_duplicates() {
        let registry = Arc::new(SinkRegistry::<16>::new());
        let sink = Arc::new(Counting::default());

        let handles: Vec<_> = (0..32)
            .map(|_| {
                let registry = registry.clone();
                let sink = sink.clone();
                std::thread::spawn(move || registry.register(sink).is_ok())
            })
            .collect();

        let accepted = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(accepted, 16);
        assert_eq!(registry.len(), 16);

        registry.for_each(|s| s.log(Severity::Trace, "x"));
        assert_eq!(sink.logs.load(Ordering::Relaxed), 16);
    }

    #[test]
    fn test_register_after_shutdown_is_refused() {
        let registry = SinkRegistry::<4>::new();
        let early = Arc::new(Counting::default());
        registry.register(early.clone()).unwrap();

        registry.shutdown_all();
        registry.shutdown_all();
        assert!(registry.is_closed());

        let late = Arc::new(Counting::default());
        let err = registry.register(late.clone()).unwrap_err();
        assert!(matches!(err, LoggerError::ShutDown));
        assert_eq!(registry.len(), 1);
        assert_eq!(early.shutdowns.load(Ordering::Relaxed), 1);
        assert_eq!(late.shutdowns.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_registration_racing_shutdown_is_notified_or_refused() {
        let registry = Arc::new(SinkRegistry::<16>::new());
        let sinks: Vec<Arc<Counting>> = (0..16).map(|_| Arc::new(Counting::default())).collect();

        let handles: Vec<_> = sinks
            .iter()
            .cloned()
            .map(|sink| {
                let registry = registry.clone();
                std::thread::spawn(move || registry.register(sink).is_ok())
            })
            .collect();
        registry.shutdown_all();
        let accepted: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        for (sink, ok) in sinks.iter().zip(accepted) {
            let expected = if ok { 1 } else { 0 };
            assert_eq!(sink.shutdowns.load(Ordering::Relaxed), expected);
        }
    }
}
