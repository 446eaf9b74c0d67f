use std::thread;
use std::time::{Duration, Instant};

/// Per-loop frame-rate limiter.
///
/// `start` returns the wall-clock seconds since the previous `start`; `end`
/// sleeps off whatever remains of the frame budget. The sleep in `end` is
/// the loop's only intentional blocking point.
pub struct FrameLimiter {
    last: Instant,
    period: Duration,
    label: Option<&'static str>,
    frames: u32,
    until_report: f32,
}

impl FrameLimiter {
    pub fn new(target_hz: f32) -> Self {
        Self {
            last: Instant::now(),
            period: Duration::from_secs_f32(1.0 / target_hz),
            label: None,
            frames: 0,
            until_report: 1.0,
        }
    }

    /// Like [`new`](Self::new), but logs the achieved rate for `label`
    /// roughly once per second at debug level.
    pub fn reporting(target_hz: f32, label: &'static str) -> Self {
        Self {
            label: Some(label),
            ..Self::new(target_hz)
        }
    }

    /// Mark the start of an iteration; returns elapsed seconds since the
    /// previous start (or since construction, for the first call).
    pub fn start(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = (now - self.last).as_secs_f32();
        self.last = now;

        if let Some(label) = self.label {
            self.until_report -= elapsed;
            if self.until_report <= 0.0 {
                log::debug!("{label}: {} fps", self.frames);
                self.until_report = 1.0;
                self.frames = 0;
            } else {
                self.frames += 1;
            }
        }

        elapsed
    }

    /// Block until the frame budget since the last `start` has elapsed.
    pub fn end(&self) {
        let spent = self.last.elapsed();
        if let Some(remaining) = self.period.checked_sub(spent) {
            thread::sleep(remaining);
        }
    }
}
