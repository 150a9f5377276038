//! Frame and simulation statistics

use std::collections::VecDeque;
use std::time::Duration;

/// Frame-rate and simulation progress tracker
///
/// Keeps a rolling window of frame times for FPS reporting, plus counters
/// for how much simulated time the physics world has stepped through.
#[derive(Debug)]
pub struct SimStats {
    /// Frame time history for averaging
    frame_times: VecDeque<Duration>,
    /// Maximum samples to keep
    max_samples: usize,
    /// Current FPS
    fps: f32,
    /// Average frame time in milliseconds
    avg_frame_time_ms: f32,
    /// Total frames recorded
    total_frames: u64,
    /// Accumulated simulated time in seconds
    simulated_time: f64,
    /// Physics steps taken
    steps: u64,
}

impl SimStats {
    /// Create a new stats tracker
    pub fn new() -> Self {
        Self {
            frame_times: VecDeque::with_capacity(120),
            max_samples: 120,
            fps: 0.0,
            avg_frame_time_ms: 0.0,
            total_frames: 0,
            simulated_time: 0.0,
            steps: 0,
        }
    }

    /// Record a frame with the given delta time
    pub fn record_frame(&mut self, delta: Duration) {
        self.total_frames += 1;

        if self.frame_times.len() >= self.max_samples {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(delta);

        self.update_averages();
    }

    /// Record one physics step of `dt` simulated seconds
    pub fn record_step(&mut self, dt: f32) {
        self.steps += 1;
        self.simulated_time += f64::from(dt);
    }

    fn update_averages(&mut self) {
        if self.frame_times.is_empty() {
            return;
        }

        let total: Duration = self.frame_times.iter().sum();
        let count = self.frame_times.len() as f32;
        let total_secs = total.as_secs_f32();

        if total_secs > 0.0 {
            self.avg_frame_time_ms = (total_secs / count) * 1000.0;
            self.fps = count / total_secs;
        } else {
            self.avg_frame_time_ms = 0.0;
            self.fps = 0.0;
        }
    }

    /// Get current FPS
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Get average frame time in milliseconds
    pub fn avg_frame_time_ms(&self) -> f32 {
        self.avg_frame_time_ms
    }

    /// Get total frames recorded
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Get accumulated simulated time in seconds
    pub fn simulated_time(&self) -> f64 {
        self.simulated_time
    }

    /// Get the number of physics steps taken
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Get a formatted stats string
    pub fn format_stats(&self) -> String {
        format!(
            "FPS: {:.1} | frame: {:.2}ms | steps: {} | sim: {:.1}s",
            self.fps, self.avg_frame_time_ms, self.steps, self.simulated_time
        )
    }
}

impl Default for SimStats {
    fn default() -> Self {
        Self::new()
    }
}
