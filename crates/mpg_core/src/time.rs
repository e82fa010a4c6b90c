use std::time::{Duration, Instant};

const FRAME_SAMPLE_COUNT: usize = 60;

/// Post-render delay that caps the loop near 60Hz.
pub const FRAME_DELAY: Duration = Duration::from_millis(16);

/// Fixed-delay frame pacing: sleep a constant amount after every rendered
/// frame, regardless of how long the frame took.
pub struct FramePacer {
    pub frame_delay: Duration,
    pub frame_count: u64,
    last_instant: Instant,
    frame_samples: [f64; FRAME_SAMPLE_COUNT],
    sample_index: usize,
    sample_fill: usize,
    pub smoothed_frame_time_ms: f64,
}

impl FramePacer {
    pub fn new(frame_delay: Duration) -> Self {
        Self {
            frame_delay,
            frame_count: 0,
            last_instant: Instant::now(),
            frame_samples: [0.0; FRAME_SAMPLE_COUNT],
            sample_index: 0,
            sample_fill: 0,
            smoothed_frame_time_ms: 0.0,
        }
    }

    /// Restart timing, e.g. when a loop begins after a long idle period.
    pub fn reset_clock(&mut self) {
        self.last_instant = Instant::now();
    }

    pub fn end_frame(&mut self) {
        if !self.frame_delay.is_zero() {
            std::thread::sleep(self.frame_delay);
        }

        let now = Instant::now();
        let frame_time = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.frame_count += 1;

        self.frame_samples[self.sample_index] = frame_time;
        self.sample_index = (self.sample_index + 1) % FRAME_SAMPLE_COUNT;
        self.sample_fill = (self.sample_fill + 1).min(FRAME_SAMPLE_COUNT);
        let sum: f64 = self.frame_samples[..self.sample_fill].iter().sum();
        self.smoothed_frame_time_ms = sum / self.sample_fill as f64 * 1000.0;
    }

    pub fn smoothed_fps(&self) -> f64 {
        if self.smoothed_frame_time_ms > 0.0 {
            1000.0 / self.smoothed_frame_time_ms
        } else {
            0.0
        }
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(FRAME_DELAY)
    }
}
