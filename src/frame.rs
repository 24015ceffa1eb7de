use std::time::Instant;

/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy)]
pub struct FrameInfo {
    pub number: u64,
    pub time: f32,
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time: f32, delta: f32) -> Self {
        Self { number, time, delta }
    }
}

/// Self-rescheduling frame source. Each `next` is one iteration of the loop;
/// once cancelled it yields nothing and the caller stops asking for redraws.
#[derive(Debug)]
pub struct FrameLoop {
    frame_number: u64,
    start_time: Instant,
    last_frame_time: Instant,
    cancelled: bool,
}

impl FrameLoop {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            frame_number: 0,
            start_time: now,
            last_frame_time: now,
            cancelled: false,
        }
    }

    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Checked after a frame is drawn, before asking the host for another
    pub fn should_reschedule(&self) -> bool {
        !self.cancelled
    }
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for FrameLoop {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        if self.cancelled {
            return None;
        }

        let now = Instant::now();
        let delta = now.duration_since(self.last_frame_time).as_secs_f32();
        let time = now.duration_since(self.start_time).as_secs_f32();

        let info = FrameInfo::new(self.frame_number, time, delta);

        self.frame_number += 1;
        self.last_frame_time = now;

        Some(info)
    }
}
