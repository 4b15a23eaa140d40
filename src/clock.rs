use serde::Serialize;

/// Game clock. Ticks are discrete: the caller delivers one `tick` per elapsed
/// period and the clock only counts it while running.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Clock {
    elapsed: u32,
    active: bool,
    paused: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockStatus {
    NotStarted,
    Live,
    Paused,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.active = true;
        self.paused = false;
    }

    /// Toggles the paused flag. `active` is left alone.
    pub fn pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn tick(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(1);
        true
    }

    pub fn is_running(&self) -> bool {
        self.active && !self.paused
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn status(&self) -> ClockStatus {
        match (self.active, self.paused) {
            (false, _) => ClockStatus::NotStarted,
            (true, false) => ClockStatus::Live,
            (true, true) => ClockStatus::Paused,
        }
    }

    pub fn display(&self) -> String {
        format_clock(self.elapsed)
    }
}

pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

pub fn status_label(status: ClockStatus) -> &'static str {
    match status {
        ClockStatus::NotStarted => "NOT STARTED",
        ClockStatus::Live => "LIVE",
        ClockStatus::Paused => "PAUSED",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_clock_pads_and_leaves_minutes_unbounded() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(600), "10:00");
        assert_eq!(format_clock(6001), "100:01");
    }

    #[test]
    fn ticks_only_count_while_running() {
        let mut clock = Clock::new();
        assert!(!clock.tick());
        clock.start();
        assert!(clock.tick());
        clock.pause();
        assert!(!clock.tick());
        assert_eq!(clock.status(), ClockStatus::Paused);
        clock.pause();
        assert!(clock.tick());
        assert_eq!(clock.elapsed(), 2);
        clock.reset();
        assert_eq!(clock, Clock::default());
    }
}
