//! Process uptime counter with its display string.

use super::format::format_uptime;

/// Elapsed seconds and the matching `"HHh MMm SSs "` string.
///
/// Both fields are private and only change together, so a reader never sees
/// a counter that disagrees with its display string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UptimeClock {
    seconds: u64,
    display: String,
}

impl UptimeClock {
    /// Start the clock from a backend-reported baseline.
    pub fn new(seconds: u64) -> Self {
        Self {
            seconds,
            display: format_uptime(seconds),
        }
    }

    /// Replace the baseline with a freshly fetched value.
    pub fn seed(&mut self, seconds: u64) {
        *self = Self::new(seconds);
    }

    /// Advance by one second.
    pub fn tick(&mut self) {
        self.seed(self.seconds.saturating_add(1));
    }

    pub fn seconds(&self) -> u64 {
        self.seconds
    }

    pub fn display(&self) -> &str {
        &self.display
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_formats_baseline() {
        let clock = UptimeClock::new(3661);
        assert_eq!(clock.seconds(), 3661);
        assert_eq!(clock.display(), "01h 01m 01s ");
    }

    #[test]
    fn test_ticks_keep_counter_and_string_in_step() {
        let baseline = 3598;
        let mut clock = UptimeClock::new(baseline);
        for n in 1..=5 {
            clock.tick();
            assert_eq!(clock.seconds(), baseline + n);
            assert_eq!(clock.display(), format_uptime(baseline + n));
        }
        assert_eq!(clock.display(), "01h 00m 03s ");
    }

    #[test]
    fn test_seed_replaces_baseline() {
        let mut clock = UptimeClock::new(10);
        clock.tick();
        clock.seed(100);
        assert_eq!(clock.seconds(), 100);
        assert_eq!(clock.display(), "00h 01m 40s ");
    }
}
