use std::time::Duration;

#[derive(Clone, Debug, Default)]
pub struct Time {
    /// Time since the previous frame.
    pub elapsed: Duration,
    /// Time since the clock's first frame.
    pub total: Duration,
}

/// Turns host frame timestamps into per-frame deltas.
///
/// The first tick after construction or [`reset`](FrameClock::reset) yields a
/// zero delta. A timestamp earlier than the previous one also yields zero, so
/// deltas are never negative.
#[derive(Debug, Default)]
pub struct FrameClock {
    start: Option<Duration>,
    last: Option<Duration>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self, timestamp: Duration) -> Time {
        let elapsed = match self.last {
            Some(last) => timestamp.saturating_sub(last),
            None => Duration::ZERO,
        };
        let start = *self.start.get_or_insert(timestamp);
        self.last = Some(self.last.map_or(timestamp, |last| last.max(timestamp)));

        Time {
            elapsed,
            total: timestamp.saturating_sub(start),
        }
    }

    pub fn reset(&mut self) {
        self.start = None;
        self.last = None;
    }
}
