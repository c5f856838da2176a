use std::time::Instant;

const FPS_SAMPLE_COUNT: usize = 60;

/// Variable-timestep frame clock. Camera movement consumes `real_dt`; the
/// coin animation reads `total_time`, which is absolute wall-clock seconds
/// since startup so the motion loops continuously regardless of frame rate.
pub struct TimeState {
    pub real_dt: f64,
    pub total_time: f64,
    pub frame_count: u64,
    start_instant: Instant,
    last_instant: Instant,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
    pub smoothed_frame_time_ms: f64,
}

impl TimeState {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            real_dt: 0.0,
            total_time: 0.0,
            frame_count: 0,
            start_instant: now,
            last_instant: now,
            fps_samples: [1.0 / 60.0; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: 60.0,
            smoothed_frame_time_ms: 16.667,
        }
    }

    pub fn begin_frame(&mut self) {
        let now = Instant::now();
        self.real_dt = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.total_time = now.duration_since(self.start_instant).as_secs_f64();
        self.frame_count += 1;

        // FPS smoothing
        self.fps_samples[self.fps_sample_index] = self.real_dt;
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.smoothed_frame_time_ms = avg_dt * 1000.0;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };
    }
}

impl Default for TimeState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_frame_advances_counters() {
        let mut time = TimeState::new();
        time.begin_frame();
        time.begin_frame();
        assert_eq!(time.frame_count, 2);
        assert!(time.real_dt >= 0.0);
        assert!(time.total_time >= time.real_dt);
    }

    #[test]
    fn total_time_is_monotonic() {
        let mut time = TimeState::new();
        time.begin_frame();
        let first = time.total_time;
        time.begin_frame();
        assert!(time.total_time >= first);
    }
}
