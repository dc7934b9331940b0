use std::time::{Duration, Instant};

use ledbanner::stats::FPS_AVERAGE_FRAMES;
use ledbanner::{FRAME_SIZE, StatsTracker};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[test]
fn steady_ten_fps_cadence() {
    let mut stats = StatsTracker::new();
    let t0 = Instant::now();

    let first = stats.update(FRAME_SIZE, t0);
    assert_eq!(first.instant_fps, 0.0);
    assert_eq!(first.windowed_fps, 0.0);

    for i in 1..5 {
        let rates = stats.update(FRAME_SIZE, t0 + Duration::from_millis(100 * i));
        assert!(close(rates.instant_fps, 10.0), "{rates:?}");
        assert!(close(rates.windowed_fps, 10.0), "{rates:?}");
        // The first frame's bytes are only attributed once an interval exists
        let pending = if i == 1 { 2 * FRAME_SIZE } else { FRAME_SIZE };
        assert!(close(rates.kbps, pending as f64 / 1024.0 * 10.0), "{rates:?}");
    }
    assert_eq!(stats.frames_seen(), 5);
}

#[test]
fn window_forgets_samples_older_than_capacity() {
    let mut stats = StatsTracker::new();
    let mut now = Instant::now();

    // Ten fast frames at 50 FPS
    stats.update(FRAME_SIZE, now);
    for _ in 1..10 {
        now += Duration::from_millis(20);
        stats.update(FRAME_SIZE, now);
    }

    now += Duration::from_millis(100);
    let mixed = stats.update(FRAME_SIZE, now);
    // 10 intervals over 9 * 20ms + 100ms
    assert!(close(mixed.windowed_fps, 10.0 / 0.28), "{mixed:?}");

    let mut last = mixed;
    for _ in 0..FPS_AVERAGE_FRAMES {
        now += Duration::from_millis(100);
        last = stats.update(FRAME_SIZE, now);
    }
    assert!(close(last.windowed_fps, 10.0), "{last:?}");
    assert!(close(last.instant_fps, 10.0));
}

#[test]
fn wrong_sized_datagrams_still_count_toward_bandwidth() {
    let mut stats = StatsTracker::new();
    let t0 = Instant::now();
    stats.update(100, t0);
    let rates = stats.update(2048, t0 + Duration::from_secs(2));
    assert!(close(rates.kbps, (100.0 + 2048.0) / 1024.0 / 2.0), "{rates:?}");
    assert!(close(rates.instant_fps, 0.5));
}

#[test]
fn zero_byte_frames_give_zero_bandwidth() {
    let mut stats = StatsTracker::new();
    let t0 = Instant::now();
    stats.update(0, t0);
    let rates = stats.update(0, t0 + Duration::from_millis(250));
    assert_eq!(rates.kbps, 0.0);
    assert!(close(rates.instant_fps, 4.0));
}
