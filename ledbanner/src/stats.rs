// stats.rs - Frame rate and bandwidth tracking for received frames

use std::time::Instant;

/// Number of frame arrivals the windowed average spans.
pub const FPS_AVERAGE_FRAMES: usize = 42;

/// Rates derived from one received frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameRates {
    /// `1 / dt` since the previous frame, zero when unknown.
    pub instant_fps: f64,
    /// Average over the last `FPS_AVERAGE_FRAMES` arrivals.
    pub windowed_fps: f64,
    /// Kilobytes per second since the last positive interval.
    pub kbps: f64,
}

/// Sliding-window statistics over frame arrival times. Owned by the thread
/// that reads the network.
#[derive(Debug, Clone)]
pub struct StatsTracker {
    timestamps: [Option<Instant>; FPS_AVERAGE_FRAMES],
    cursor: usize,
    seen: u64,
    bytes_since_last: usize,
    last_ts: Option<Instant>,
}

impl Default for StatsTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsTracker {
    pub fn new() -> Self {
        Self {
            timestamps: [None; FPS_AVERAGE_FRAMES],
            cursor: 0,
            seen: 0,
            bytes_since_last: 0,
            last_ts: None,
        }
    }

    /// Total frames recorded so far.
    pub fn frames_seen(&self) -> u64 {
        self.seen
    }

    /// Bytes waiting to be attributed to the next positive interval.
    pub fn pending_bytes(&self) -> usize {
        self.bytes_since_last
    }

    /// Records a frame of `byte_count` bytes arriving at `now`.
    pub fn update(&mut self, byte_count: usize, now: Instant) -> FrameRates {
        self.bytes_since_last += byte_count;

        self.timestamps[self.cursor] = Some(now);
        self.cursor = (self.cursor + 1) % FPS_AVERAGE_FRAMES;
        self.seen += 1;

        let mut rates = FrameRates::default();

        if let Some(last) = self.last_ts {
            let dt = now.saturating_duration_since(last).as_secs_f64();
            if dt > 0.0 {
                rates.instant_fps = 1.0 / dt;
                rates.kbps = (self.bytes_since_last as f64 / 1024.0) / dt;
                self.bytes_since_last = 0;
            }
        }

        rates.windowed_fps = self.windowed_fps();
        self.last_ts = Some(now);
        rates
    }

    fn windowed_fps(&self) -> f64 {
        if self.seen < 2 {
            return 0.0;
        }
        let frames = (self.seen as usize).min(FPS_AVERAGE_FRAMES);
        let start = (self.cursor + FPS_AVERAGE_FRAMES - frames) % FPS_AVERAGE_FRAMES;

        let mut total = 0.0;
        for i in 0..frames - 1 {
            let earlier = self.timestamps[(start + i) % FPS_AVERAGE_FRAMES];
            let later = self.timestamps[(start + i + 1) % FPS_AVERAGE_FRAMES];
            if let (Some(earlier), Some(later)) = (earlier, later) {
                total += later.saturating_duration_since(earlier).as_secs_f64();
            }
        }

        if total > 0.0 {
            (frames - 1) as f64 / total
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn first_sample_reports_zero() {
        let mut stats = StatsTracker::new();
        let rates = stats.update(1280, Instant::now());
        assert_eq!(rates, FrameRates::default());
        assert_eq!(stats.pending_bytes(), 1280);
    }

    #[test]
    fn kbps_over_half_a_second() {
        let mut stats = StatsTracker::new();
        let t0 = Instant::now();
        stats.update(0, t0);
        let rates = stats.update(1024, t0 + Duration::from_millis(500));
        assert!((rates.kbps - 2.0).abs() < 1e-9, "{rates:?}");
        assert!((rates.instant_fps - 2.0).abs() < 1e-9);
        assert_eq!(stats.pending_bytes(), 0);
    }

    #[test]
    fn zero_interval_keeps_accumulating_bytes() {
        let mut stats = StatsTracker::new();
        let t0 = Instant::now();
        stats.update(1280, t0);
        let rates = stats.update(1280, t0);
        assert_eq!(rates.instant_fps, 0.0);
        assert_eq!(rates.kbps, 0.0);
        assert_eq!(stats.pending_bytes(), 2560);

        let rates = stats.update(1280, t0 + Duration::from_secs(1));
        assert!((rates.kbps - 3840.0 / 1024.0).abs() < 1e-9);
        assert_eq!(stats.pending_bytes(), 0);
    }

    #[test]
    fn window_of_identical_timestamps_is_zero() {
        let mut stats = StatsTracker::new();
        let t0 = Instant::now();
        stats.update(1, t0);
        let rates = stats.update(1, t0);
        assert_eq!(rates.windowed_fps, 0.0);
    }
}
