//! Fixed-timestep driver for the engine tick.
//!
//! Simulation runs at a fixed 60 Hz from an accumulator; the render stand-in
//! runs once per frame with the interpolation alpha. [`GameLoop::advance`]
//! is the bare accumulator. [`GameLoop::frame`] drives an [`Engine`] with it
//! and reports the real frame time to the engine's performance monitor;
//! [`GameLoop::tick`] and [`GameLoop::run_for`] measure that time on the
//! wall clock.

use std::time::Instant;
use tracing::warn;

use crate::engine::Engine;

/// Fixed simulation step: 60 Hz.
pub const FIXED_DT: f64 = 1.0 / 60.0;

/// Longest frame the accumulator accepts. Longer frames are clamped and the
/// simulation slows down instead of running dozens of catch-up steps.
pub const MAX_FRAME_TIME: f64 = 0.25;

#[derive(Debug, Clone)]
pub struct GameLoop {
    previous_time: Instant,
    accumulator: f64,
    total_sim_time: f64,
    frame_count: u64,
    update_count: u64,
}

impl GameLoop {
    #[must_use]
    pub fn new() -> Self {
        Self {
            previous_time: Instant::now(),
            accumulator: 0.0,
            total_sim_time: 0.0,
            frame_count: 0,
            update_count: 0,
        }
    }

    /// Runs one wall-clock frame of `engine`: measures the time since the
    /// previous call and hands it to [`frame`](Self::frame).
    pub fn tick(&mut self, engine: &mut Engine, before_tick: impl FnMut(&mut Engine)) -> f64 {
        let frame_time = self.measure();
        self.frame(frame_time, engine, before_tick)
    }

    /// Runs one frame of `engine` that took `frame_time` real seconds.
    ///
    /// The unclamped frame time goes to [`Engine::record_frame_time`]; the
    /// accumulator then runs as many fixed ticks as fit, calling
    /// `before_tick` ahead of each. Returns the interpolation alpha.
    pub fn frame(
        &mut self,
        frame_time: f64,
        engine: &mut Engine,
        mut before_tick: impl FnMut(&mut Engine),
    ) -> f64 {
        engine.record_frame_time(frame_time * 1000.0);
        let mut alpha = 0.0;
        self.advance(
            frame_time,
            |dt, _| {
                before_tick(engine);
                engine.tick(dt as f32);
            },
            |a| alpha = a,
        );
        alpha
    }

    fn measure(&mut self) -> f64 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.previous_time).as_secs_f64();
        self.previous_time = now;
        frame_time
    }

    /// Runs one frame of `frame_time` seconds.
    ///
    /// `update_fn(FIXED_DT, total_sim_time)` runs zero or more times, then
    /// `render_fn(alpha)` runs exactly once with alpha in `[0, 1)`.
    pub fn advance(
        &mut self,
        frame_time: f64,
        mut update_fn: impl FnMut(f64, f64),
        mut render_fn: impl FnMut(f64),
    ) {
        let mut frame_time = if frame_time.is_finite() { frame_time.max(0.0) } else { 0.0 };
        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            frame_time = MAX_FRAME_TIME;
        }

        self.accumulator += frame_time;
        while self.accumulator >= FIXED_DT {
            update_fn(FIXED_DT, self.total_sim_time);
            self.total_sim_time += FIXED_DT;
            self.accumulator -= FIXED_DT;
            self.update_count += 1;
        }

        render_fn(self.alpha());
        self.frame_count += 1;
    }

    /// Steps `engine` exactly `FIXED_DT` per frame until `seconds` of
    /// simulation have run, as fast as the host allows. The wall-clock time
    /// each frame really took is still what the engine records. Returns the
    /// number of simulation steps taken.
    pub fn run_for(
        &mut self,
        seconds: f64,
        engine: &mut Engine,
        mut before_tick: impl FnMut(&mut Engine),
    ) -> u64 {
        let start = self.update_count;
        let end = self.total_sim_time + seconds.max(0.0);
        self.previous_time = Instant::now();
        // Half a step of slack keeps float drift from adding a step.
        while self.total_sim_time + FIXED_DT * 0.5 < end {
            let real = self.measure();
            engine.record_frame_time(real * 1000.0);
            self.advance(
                FIXED_DT,
                |dt, _| {
                    before_tick(engine);
                    engine.tick(dt as f32);
                },
                |_| {},
            );
        }
        self.update_count - start
    }

    /// Interpolation alpha left over from the last frame.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        if self.accumulator > 0.0 {
            self.accumulator / FIXED_DT
        } else {
            0.0
        }
    }

    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    #[must_use]
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Total simulated seconds.
    #[must_use]
    pub fn total_sim_time(&self) -> f64 {
        self.total_sim_time
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
