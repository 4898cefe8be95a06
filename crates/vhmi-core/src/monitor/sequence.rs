//! Sequence gap detection on the vehicle state counter

use serde::Serialize;

/// A non-contiguous jump in the state counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SequenceGap {
    pub expected: u16,
    pub actual: u16,
}

/// Tracker state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceState {
    /// No usable prior counter, next frame is not checked
    Uninitialized,
    /// Holding the last counter seen
    Tracking(u16),
}

/// Tracks the last state counter and flags non-contiguous increments
///
/// A remembered counter of 0 is treated as "nothing observed yet". This
/// keeps the first frame after startup from being flagged, and it also
/// means the frame following a counter of exactly 0 is never checked.
#[derive(Debug, Default)]
pub struct SequenceTracker {
    last_counter: u16,
}

impl SequenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SequenceState {
        if self.last_counter == 0 {
            SequenceState::Uninitialized
        } else {
            SequenceState::Tracking(self.last_counter)
        }
    }

    /// Check `counter` against last + 1 (mod 65536), then remember it
    pub fn observe(&mut self, counter: u16) -> Option<SequenceGap> {
        let gap = match self.state() {
            SequenceState::Uninitialized => None,
            SequenceState::Tracking(last) => {
                let expected = last.wrapping_add(1);
                (counter != expected).then_some(SequenceGap {
                    expected,
                    actual: counter,
                })
            }
        };
        self.last_counter = counter;
        gap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(counters: &[u16]) -> Vec<SequenceGap> {
        let mut tracker = SequenceTracker::new();
        counters.iter().filter_map(|&c| tracker.observe(c)).collect()
    }

    #[test]
    fn test_contiguous_sequence() {
        assert!(run(&[1, 2, 3]).is_empty());
    }

    #[test]
    fn test_gap_reports_expected_and_actual() {
        assert_eq!(
            run(&[1, 2, 5]),
            vec![SequenceGap {
                expected: 3,
                actual: 5
            }]
        );
    }

    #[test]
    fn test_wraparound_is_contiguous() {
        assert!(run(&[65534, 65535, 0]).is_empty());
    }

    #[test]
    fn test_first_frame_is_exempt() {
        assert!(run(&[4000]).is_empty());
    }

    #[test]
    fn test_counter_zero_resets_to_uninitialized() {
        let mut tracker = SequenceTracker::new();
        assert_eq!(tracker.observe(65535), None);
        assert_eq!(tracker.observe(0), None);
        assert_eq!(tracker.state(), SequenceState::Uninitialized);
        // Frame after a zero counter is not checked
        assert_eq!(tracker.observe(9), None);
        assert_eq!(tracker.state(), SequenceState::Tracking(9));
    }

    #[test]
    fn test_repeated_counter_is_a_gap() {
        assert_eq!(
            run(&[7, 7]),
            vec![SequenceGap {
                expected: 8,
                actual: 7
            }]
        );
    }
}
