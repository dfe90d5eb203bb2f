use crate::error::{SlopeError, SlopeResult};

/// Tracks race time: a monotonic tick counter and elapsed seconds.
#[derive(Debug, Clone, Default)]
pub struct RaceClock {
    tick: u64,
    elapsed_secs: f64,
}

impl RaceClock {
    /// Create a clock at tick 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one tick of `dt` seconds. Returns the new tick number.
    pub fn advance(&mut self, dt: f64) -> u64 {
        self.tick += 1;
        self.elapsed_secs += dt;
        self.tick
    }

    /// Return the current tick number.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Total simulated seconds since the race started.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    /// Rewind to tick 0.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Turns wall-clock frame times into a whole number of fixed ticks.
///
/// Leftover time carries over to the next frame. At most `max_steps` ticks
/// are released per call so a stalled host does not spiral.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f64,
    max_steps: u32,
    accumulator: f64,
}

impl FixedTimestep {
    /// Create an accumulator releasing ticks of `step` seconds.
    ///
    /// `step` must be a positive finite number.
    pub fn new(step: f64) -> SlopeResult<Self> {
        if !step.is_finite() || step <= 0.0 {
            return Err(SlopeError::invalid("step", "must be positive and finite"));
        }
        Ok(Self {
            step,
            max_steps: 5,
            accumulator: 0.0,
        })
    }

    /// Set the per-call catch-up limit.
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// Seconds per released tick.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Add `elapsed` seconds and return how many ticks are due.
    pub fn accumulate(&mut self, elapsed: f64) -> u32 {
        if elapsed.is_finite() && elapsed > 0.0 {
            self.accumulator += elapsed;
        }
        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps {
            self.accumulator -= self.step;
            steps += 1;
        }
        if steps == self.max_steps {
            // Drop the backlog we refused to simulate.
            self.accumulator = self.accumulator.min(self.step);
        }
        steps
    }
}
