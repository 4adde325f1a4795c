//! Time-derived nonces that never repeat or go backwards.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::signing::types::Nonce;

/// Source of wall-clock milliseconds.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> u64;
}

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Issues strictly increasing nonces for one address.
///
/// Normally the current time; if the clock stalls or steps back, the last
/// issued value plus one.
#[derive(Debug)]
pub struct NonceGenerator<C = SystemClock> {
    clock: C,
    last: AtomicU64,
}

impl NonceGenerator<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for NonceGenerator<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> NonceGenerator<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            last: AtomicU64::new(0),
        }
    }

    /// Mint the next nonce.
    pub fn next(&self) -> Nonce {
        let now = self.clock.now_millis();
        let mut prev = self.last.load(Ordering::SeqCst);
        loop {
            let candidate = now.max(prev.saturating_add(1));
            match self
                .last
                .compare_exchange(prev, candidate, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return Nonce::from_millis(candidate),
                Err(actual) => prev = actual,
            }
        }
    }

    /// Last nonce handed out, if any.
    pub fn last_issued(&self) -> Option<Nonce> {
        match self.last.load(Ordering::SeqCst) {
            0 => None,
            v => Some(Nonce::from_millis(v)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct FixedClock(AtomicU64);

    impl Clock for FixedClock {
        fn now_millis(&self) -> u64 {
            self.0.load(Ordering::SeqCst)
        }
    }

    #[test]
    fn test_follows_clock() {
        let nonces = NonceGenerator::with_clock(FixedClock(AtomicU64::new(1_700_000_000_000)));
        assert_eq!(nonces.last_issued(), None);
        assert_eq!(nonces.next().as_millis(), 1_700_000_000_000);
        nonces.clock.0.store(1_700_000_000_500, Ordering::SeqCst);
        assert_eq!(nonces.next().as_millis(), 1_700_000_000_500);
    }

    #[test]
    fn test_stalled_clock_still_increases() {
        let nonces = NonceGenerator::with_clock(FixedClock(AtomicU64::new(1_000)));
        assert_eq!(nonces.next().as_millis(), 1_000);
        assert_eq!(nonces.next().as_millis(), 1_001);
        assert_eq!(nonces.next().as_millis(), 1_002);
        assert_eq!(nonces.last_issued(), Some(Nonce::from_millis(1_002)));
    }

    #[test]
    fn test_clock_going_backwards() {
        let nonces = NonceGenerator::with_clock(FixedClock(AtomicU64::new(5_000)));
        assert_eq!(nonces.next().as_millis(), 5_000);
        nonces.clock.0.store(4_000, Ordering::SeqCst);
        assert_eq!(nonces.next().as_millis(), 5_001);
    }

    #[test]
    fn test_concurrent_nonces_unique() {
        let nonces = Arc::new(NonceGenerator::with_clock(FixedClock(AtomicU64::new(42))));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let nonces = nonces.clone();
                std::thread::spawn(move || (0..100).map(|_| nonces.next().as_millis()).collect::<Vec<_>>())
            })
            .collect();

        let mut all: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 800);
    }

    #[test]
    fn test_system_clock_is_recent() {
        // 2023-11-14, well before any realistic test run.
        assert!(SystemClock.now_millis() > 1_700_000_000_000);
    }
}
