// Last-write-wins cell shared between the inbound tasks and the tick loop
//
// Only the latest value matters for a real-time control loop, so there is
// no queue: updates between two reads are dropped on purpose.

use std::sync::Mutex;

pub struct Latest<T> {
    inner: Mutex<T>,
}

impl<T: Clone> Latest<T> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: Mutex::new(initial),
        }
    }

    /// Overwrite the held value. Short critical section, never blocks
    /// beyond lock acquisition.
    pub fn set(&self, value: T) {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        *guard = value;
    }

    /// Copy out the current value.
    pub fn snapshot(&self) -> T {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl<T: Clone + Default> Default for Latest<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_initial_value() {
        let cell = Latest::new(7i32);
        assert_eq!(cell.snapshot(), 7);
    }

    #[test]
    fn test_last_write_wins() {
        // Two writes before a read: only the second is observable
        let cell = Latest::new((1.0f32, 0.0f32));
        cell.set((1.0, 0.0));
        cell.set((2.0, 0.0));
        assert_eq!(cell.snapshot(), (2.0, 0.0));
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let cell = Latest::new(vec![1, 2, 3]);
        let mut snap = cell.snapshot();
        snap.push(4);
        assert_eq!(cell.snapshot(), vec![1, 2, 3]);
    }

    #[test]
    fn test_concurrent_writers_do_not_corrupt() {
        use std::sync::Arc;
        use std::thread;

        let cell = Arc::new(Latest::new((0.0f32, 0.0f32)));
        let handles: Vec<_> = (1..=8)
            .map(|i| {
                let cell = cell.clone();
                thread::spawn(move || {
                    let v = i as f32;
                    cell.set((v, -v));
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        // Whichever writer landed last, the pair must be internally consistent
        let (a, b) = cell.snapshot();
        assert_eq!(a, -b);
        assert!(a >= 1.0 && a <= 8.0);
    }
}
