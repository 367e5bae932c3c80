use std::sync::{Condvar, Mutex};

/// The mutex + condition-variable handoff protocol between client threads and
/// one dedicated matching worker, generalized over the payload it guards.
///
/// One condition variable carries two logical signals distinguished by
/// `work_pending`: a client raises it and wakes the worker; the worker
/// clears it and wakes the client back up. `submit` additionally waits for
/// `!work_pending` *before* mutating, which is what actually gives "later
/// clients block... and observe a quiescent book before submitting" its
/// teeth — without that entry wait, a second client's lock acquisition could
/// still interleave with a first client's completion wait and stomp the
/// single aggressor-of-record before the worker ever saw it.
pub struct Handoff<T> {
    state: Mutex<HandoffState<T>>,
    cv: Condvar,
}

struct HandoffState<T> {
    payload: T,
    work_pending: bool,
    running: bool,
}

impl<T> Handoff<T> {
    pub fn new(payload: T) -> Self {
        Self {
            state: Mutex::new(HandoffState {
                payload,
                work_pending: false,
                running: true,
            }),
            cv: Condvar::new(),
        }
    }

    /// Client-side call: acquire exclusive access, run `mutate` (which
    /// should perform the book mutation and return whatever the caller
    /// needs back), then hand off to the worker and block until it
    /// finishes draining.
    pub fn submit<R>(&self, mutate: impl FnOnce(&mut T) -> R) -> R {
        let guard = self.state.lock().unwrap();
        let mut guard = self.cv.wait_while(guard, |s| s.work_pending).unwrap();
        let result = mutate(&mut guard.payload);
        guard.work_pending = true;
        self.cv.notify_all();
        let guard = self.cv.wait_while(guard, |s| s.work_pending).unwrap();
        drop(guard);
        result
    }

    /// Read-only access: no handoff signalling, just the mutex. Safe to call
    /// from any thread; blocks only as long as a submit/drain is in flight.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let guard = self.state.lock().unwrap();
        f(&guard.payload)
    }

    /// Worker-side call: loop forever, waiting for pending work or shutdown,
    /// running `drain` with exclusive access, then publishing completion.
    /// Returns once `shutdown` has been observed and acknowledged.
    pub fn drain_loop(&self, mut drain: impl FnMut(&mut T)) {
        let guard = self.state.lock().unwrap();
        let mut guard = guard;
        loop {
            guard = self
                .cv
                .wait_while(guard, |s| s.running && !s.work_pending)
                .unwrap();
            if !guard.running {
                guard.work_pending = false;
                self.cv.notify_all();
                break;
            }
            drain(&mut guard.payload);
            guard.work_pending = false;
            self.cv.notify_all();
        }
    }

    /// Raises the running=false flag and wakes the worker so it exits its
    /// drain loop. Any client currently parked in `submit`'s completion wait
    /// is released too, since the worker acknowledges by clearing
    /// `work_pending` regardless of whether it actually drained anything.
    pub fn shutdown(&self) {
        let mut guard = self.state.lock().unwrap();
        guard.running = false;
        guard.work_pending = true;
        self.cv.notify_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn submit_and_drain_round_trip() {
        let handoff = Arc::new(Handoff::new(0u64));
        let worker_handoff = Arc::clone(&handoff);
        let worker = thread::spawn(move || {
            worker_handoff.drain_loop(|state| *state += 1);
        });

        for _ in 0..10 {
            handoff.submit(|state| *state += 0);
        }
        let seen = handoff.read(|state| *state);
        assert_eq!(seen, 10);

        handoff.shutdown();
        worker.join().unwrap();
    }

    #[test]
    fn concurrent_submits_serialize() {
        let handoff = Arc::new(Handoff::new(Vec::<u64>::new()));
        let worker_handoff = Arc::clone(&handoff);
        let worker = thread::spawn(move || {
            worker_handoff.drain_loop(|_state| {});
        });

        let mut clients = Vec::new();
        for i in 0..8u64 {
            let h = Arc::clone(&handoff);
            clients.push(thread::spawn(move || {
                h.submit(|state| state.push(i));
            }));
        }
        for c in clients {
            c.join().unwrap();
        }

        let len = handoff.read(|state| state.len());
        assert_eq!(len, 8);

        handoff.shutdown();
        worker.join().unwrap();
    }
}
