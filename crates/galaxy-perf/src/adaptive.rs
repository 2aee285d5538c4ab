use galaxy_config::PerformanceConfig;
use tracing::info;

/// Skips whole ticks when the frame rate collapses.
///
/// With threshold `n`, one tick in every `n` runs; a threshold of 0 or 1
/// never skips.
#[derive(Debug, Clone)]
pub struct AdaptiveRenderer {
    frame_skip: u32,
    frame_skip_threshold: u32,
    target_fps: u32,
    low_fps: u32,
    recover_fps: u32,
    check_interval_ms: f64,
    last_check_ms: f64,
}

impl AdaptiveRenderer {
    #[must_use]
    pub fn new(config: &PerformanceConfig) -> Self {
        Self {
            frame_skip: 0,
            frame_skip_threshold: 0,
            target_fps: config.adaptive_target_fps,
            low_fps: config.low_fps,
            recover_fps: config.adaptive_recover_fps,
            check_interval_ms: f64::from(config.adaptive_check_interval) * 1000.0,
            last_check_ms: 0.0,
        }
    }

    /// Consumes one tick of the skip counter. `true` means skip this tick.
    pub fn should_skip_frame(&mut self) -> bool {
        if self.frame_skip_threshold == 0 {
            return false;
        }
        self.frame_skip += 1;
        if self.frame_skip < self.frame_skip_threshold {
            return true;
        }
        self.frame_skip = 0;
        false
    }

    /// Re-evaluates the skip threshold when the check interval has elapsed.
    pub fn maybe_adjust(&mut self, now_ms: f64, fps: u32) {
        if now_ms - self.last_check_ms > self.check_interval_ms {
            self.adjust(fps);
            self.last_check_ms = now_ms;
        }
    }

    fn adjust(&mut self, fps: u32) {
        if fps < self.low_fps {
            let deficit = self.target_fps.saturating_sub(fps);
            self.frame_skip_threshold = (deficit / 10 + 1).min(2);
            info!(threshold = self.frame_skip_threshold, fps, "adaptive frame skipping on");
        } else if fps > self.recover_fps && self.frame_skip_threshold > 0 {
            self.frame_skip_threshold -= 1;
            if self.frame_skip_threshold == 0 {
                info!(fps, "adaptive frame skipping off");
            }
        }
    }

    #[must_use]
    pub fn frame_skip_threshold(&self) -> u32 {
        self.frame_skip_threshold
    }
}
