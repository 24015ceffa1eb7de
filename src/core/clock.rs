use std::time::Instant;

/// Minimal game clock - just tracks delta time
#[derive(Debug)]
pub struct Clock {
    last_tick: Instant,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            last_tick: Instant::now(),
        }
    }

    /// Seconds since the previous tick; advances the clock
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        delta
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

/// Counts frames and reports a rate once per `interval` seconds
#[derive(Debug)]
pub struct FpsMeter {
    clock: Clock,
    interval: f32,
    frames: u32,
    elapsed: f32,
}

impl FpsMeter {
    pub fn new(interval: f32) -> Self {
        Self {
            clock: Clock::new(),
            interval,
            frames: 0,
            elapsed: 0.0,
        }
    }

    /// Record a frame; returns the rate when an interval has elapsed
    pub fn frame(&mut self) -> Option<f32> {
        let delta = self.clock.tick();
        self.record(delta)
    }

    fn record(&mut self, delta: f32) -> Option<f32> {
        self.frames += 1;
        self.elapsed += delta;

        if self.elapsed < self.interval {
            return None;
        }

        let fps = self.frames as f32 / self.elapsed;
        self.frames = 0;
        self.elapsed = 0.0;
        Some(fps)
    }
}
