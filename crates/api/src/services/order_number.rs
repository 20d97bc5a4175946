//! `ORD-<millis>` order number generation.
//!
//! A bare wall-clock timestamp collides when two orders land in the same
//! millisecond. The generator never hands out a value less than or equal to
//! the previous one, so numbers stay `ORD-<digits>` and stay unique within a
//! process. The store's unique constraint covers multiple processes.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

use vibe_commerce_core::OrderNumber;

/// Monotonic source of order numbers.
#[derive(Debug, Default)]
pub struct OrderNumberGenerator {
    last: AtomicI64,
}

impl OrderNumberGenerator {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last: AtomicI64::new(0),
        }
    }

    /// Next order number based on the current time.
    pub fn next(&self) -> OrderNumber {
        self.next_at(Utc::now().timestamp_millis())
    }

    /// Next order number given `now_millis`.
    pub fn next_at(&self, now_millis: i64) -> OrderNumber {
        let mut issued = now_millis;
        // fetch_update only fails when the closure returns None, which it never does
        let _ = self
            .last
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |last| {
                issued = now_millis.max(last + 1);
                Some(issued)
            });
        OrderNumber::from_millis(issued)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;

    #[test]
    fn test_uses_clock_when_it_advances() {
        let generator = OrderNumberGenerator::new();
        assert_eq!(generator.next_at(1000).as_str(), "ORD-1000");
        assert_eq!(generator.next_at(2000).as_str(), "ORD-2000");
    }

    #[test]
    fn test_same_millisecond_is_bumped() {
        let generator = OrderNumberGenerator::new();
        assert_eq!(generator.next_at(1000).as_str(), "ORD-1000");
        assert_eq!(generator.next_at(1000).as_str(), "ORD-1001");
        assert_eq!(generator.next_at(999).as_str(), "ORD-1002");
    }

    #[test]
    fn test_concurrent_callers_get_distinct_numbers() {
        let generator = Arc::new(OrderNumberGenerator::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let generator = Arc::clone(&generator);
                std::thread::spawn(move || {
                    (0..100).map(|_| generator.next_at(42)).collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for number in handle.join().unwrap_or_default() {
                assert!(seen.insert(number));
            }
        }
        assert_eq!(seen.len(), 800);
    }
}
