use instant::Instant;
use std::time::Duration;

/// Timing handed to the animator for one rendered frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    pub elapsed_sec: f32,
    pub dt_sec: f32,
    pub tick: u64,
}

impl FrameTime {
    /// Build from explicit durations (tests, replays).
    pub fn from_durations(elapsed: Duration, dt: Duration, tick: u64) -> Self {
        Self {
            elapsed_sec: elapsed.as_secs_f32(),
            dt_sec: dt.as_secs_f32(),
            tick,
        }
    }
}

/// Monotonic session clock, ticked once per rendered frame.
pub struct FrameClock {
    start: Instant,
    last: Instant,
    ticks: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            ticks: 0,
        }
    }

    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = now - self.last;
        self.last = now;
        self.ticks += 1;
        FrameTime::from_durations(now - self.start, dt, self.ticks)
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
