use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// How long a driving wait sleeps before handing control back to the driver.
const DRIVE_INTERVAL: Duration = Duration::from_millis(1);

/// Counting gate bounding the number of frames in flight.
///
/// The gate starts with `capacity` free units. Acquiring takes a unit and
/// returns a [`FramePermit`]; dropping the permit gives the unit back. Permits
/// are `Send`, so the usual pattern is to move them into the GPU completion
/// callback, which then runs on whatever thread the driver polls from.
#[derive(Debug, Clone)]
pub struct FrameGate {
    shared: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    capacity: usize,
    available: Mutex<usize>,
    released: Condvar,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, usize> {
        // The counter is always consistent; a panic elsewhere cannot corrupt it.
        self.available.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn release(&self) {
        let mut available = self.lock();
        debug_assert!(*available < self.capacity, "gate released more than acquired");
        *available += 1;
        drop(available);
        self.released.notify_all();
    }
}

impl FrameGate {
    /// Creates a gate with `capacity` free units.
    pub fn new(capacity: usize) -> Self {
        Self {
            shared: Arc::new(Shared {
                capacity,
                available: Mutex::new(capacity),
                released: Condvar::new(),
            }),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.shared.capacity
    }

    /// Number of free units right now.
    pub fn available(&self) -> usize {
        *self.shared.lock()
    }

    /// Number of permits currently held.
    pub fn in_flight(&self) -> usize {
        self.capacity() - self.available()
    }

    /// Takes a unit if one is free.
    pub fn try_acquire(&self) -> Option<FramePermit> {
        let mut available = self.shared.lock();
        if *available == 0 {
            return None;
        }
        *available -= 1;
        Some(self.permit())
    }

    /// Blocks the calling thread until a unit is free. No timeout.
    ///
    /// Only correct when releases happen on another thread. If completions are
    /// delivered by polling from this thread, use [`FrameGate::acquire_driving`].
    pub fn acquire(&self) -> FramePermit {
        let mut available = self.shared.lock();
        while *available == 0 {
            available = self
                .shared
                .released
                .wait(available)
                .unwrap_or_else(PoisonError::into_inner);
        }
        *available -= 1;
        self.permit()
    }

    /// Like [`FrameGate::acquire`], but calls `drive` between short waits.
    ///
    /// `drive` runs without the gate lock held, so it may release permits
    /// itself (e.g. by polling the device, which fires completion callbacks).
    pub fn acquire_driving(&self, mut drive: impl FnMut()) -> FramePermit {
        loop {
            {
                let available = self.shared.lock();
                let (mut available, _) = self
                    .shared
                    .released
                    .wait_timeout_while(available, DRIVE_INTERVAL, |a| *a == 0)
                    .unwrap_or_else(PoisonError::into_inner);
                if *available > 0 {
                    *available -= 1;
                    return self.permit();
                }
            }
            log::trace!("frame gate saturated; driving completions");
            drive();
        }
    }

    /// Blocks until every unit is back, i.e. no frame is in flight.
    pub fn drain(&self) {
        let available = self.shared.lock();
        let capacity = self.shared.capacity;
        let _full = self
            .shared
            .released
            .wait_while(available, |a| *a < capacity)
            .unwrap_or_else(PoisonError::into_inner);
    }

    /// Like [`FrameGate::drain`], calling `drive` between short waits.
    pub fn drain_driving(&self, mut drive: impl FnMut()) {
        let capacity = self.shared.capacity;
        loop {
            {
                let available = self.shared.lock();
                let (available, _) = self
                    .shared
                    .released
                    .wait_timeout_while(available, DRIVE_INTERVAL, |a| *a < capacity)
                    .unwrap_or_else(PoisonError::into_inner);
                if *available == capacity {
                    return;
                }
            }
            drive();
        }
    }

    fn permit(&self) -> FramePermit {
        FramePermit {
            shared: Arc::clone(&self.shared),
        }
    }
}

/// One unit of gate capacity. Released on drop.
#[derive(Debug)]
#[must_use = "dropping a permit immediately releases the frame slot"]
pub struct FramePermit {
    shared: Arc<Shared>,
}

impl Drop for FramePermit {
    fn drop(&mut self) {
        self.shared.release();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::thread;

    use super::*;

    #[test]
    fn permits_count_down_and_back_up() {
        let gate = FrameGate::new(2);
        assert_eq!(gate.available(), 2);

        let a = gate.try_acquire().expect("first unit");
        let b = gate.try_acquire().expect("second unit");
        assert!(gate.try_acquire().is_none());
        assert_eq!(gate.in_flight(), 2);

        drop(a);
        assert_eq!(gate.available(), 1);
        drop(b);
        assert_eq!(gate.available(), 2);
    }

    #[test]
    fn acquire_blocks_until_release_on_other_thread() {
        let gate = FrameGate::new(1);
        let held = gate.acquire();

        let (tx, rx) = mpsc::channel();
        let waiter = {
            let gate = gate.clone();
            thread::spawn(move || {
                let _permit = gate.acquire();
                tx.send(()).expect("send");
            })
        };

        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());

        // Completion callback firing off-thread.
        thread::spawn(move || drop(held)).join().expect("release thread");

        rx.recv_timeout(Duration::from_secs(5))
            .expect("waiter should wake after release");
        waiter.join().expect("waiter");
        assert_eq!(gate.available(), 1);
    }

    #[test]
    fn acquire_driving_runs_driver_until_it_releases() {
        let gate = FrameGate::new(1);
        let mut pending = Some(gate.acquire());
        let mut calls = 0;

        let _permit = gate.acquire_driving(|| {
            calls += 1;
            if calls == 3 {
                pending.take();
            }
        });

        assert_eq!(calls, 3);
        assert_eq!(gate.available(), 0);
    }

    #[test]
    fn acquire_driving_skips_driver_when_free() {
        let gate = FrameGate::new(3);
        let mut calls = 0;
        let _permit = gate.acquire_driving(|| calls += 1);
        assert_eq!(calls, 0);
    }

    #[test]
    fn drain_waits_for_all_permits() {
        let gate = FrameGate::new(3);
        let permits: Vec<_> = (0..3).map(|_| gate.acquire()).collect();

        let (tx, rx) = mpsc::channel();
        let drainer = {
            let gate = gate.clone();
            thread::spawn(move || {
                gate.drain();
                tx.send(()).expect("send");
            })
        };

        let mut permits = permits;
        permits.pop();
        permits.pop();
        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());

        permits.clear();
        rx.recv_timeout(Duration::from_secs(5))
            .expect("drain should finish once all permits are back");
        drainer.join().expect("drainer");
    }

    #[test]
    fn drain_driving_returns_immediately_when_idle() {
        let gate = FrameGate::new(2);
        let mut calls = 0;
        gate.drain_driving(|| calls += 1);
        assert_eq!(calls, 0);
    }
}
