/// Smooths irregular wall-clock deltas into a stable simulation timestep.
///
/// Keeps a bounded history of accepted raw samples, newest first. Each tick
/// the current average of the history becomes the simulation timestep; the
/// incoming raw sample only joins the history if it is below
/// `outlier_factor` times that average, so a transient stall cannot drag
/// the smoothed step with it.
pub struct TimestepSmoother {
    history: Vec<f32>,
    cap: usize,
    outlier_factor: f32,
}

impl TimestepSmoother {
    pub fn new(cap: usize, outlier_factor: f32) -> Self {
        Self {
            history: Vec::with_capacity(cap + 1),
            cap,
            outlier_factor,
        }
    }

    /// Feed one raw elapsed-time sample; returns the smoothed timestep to
    /// simulate with, or `None` for a malformed tick (`raw_dt >= 1`), which
    /// callers must skip entirely.
    ///
    /// The average is taken before the sample is pushed, so the returned
    /// step never includes the sample that produced it.
    pub fn feed(&mut self, raw_dt: f32) -> Option<f32> {
        if raw_dt >= 1.0 {
            return None;
        }

        if self.history.is_empty() {
            self.history.push(raw_dt);
        }

        let average = self.history.iter().sum::<f32>() / self.history.len() as f32;

        if raw_dt < average * self.outlier_factor {
            self.history.insert(0, raw_dt);
        }
        if self.history.len() > self.cap {
            self.history.pop();
        }

        Some(average)
    }

    /// Number of samples currently held.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Current average of the history, zero when empty.
    pub fn average(&self) -> f32 {
        if self.history.is_empty() {
            0.0
        } else {
            self.history.iter().sum::<f32>() / self.history.len() as f32
        }
    }
}
