use galaxy_config::PerformanceConfig;
use serde::Serialize;
use tracing::info;

const FPS_WINDOW_MS: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadowQuality {
    None,
    Low,
}

/// Quality knobs consumed by effect-heavy subsystems.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualitySettings {
    pub low_power: bool,
    pub reduced_motion: bool,
    pub is_mobile: bool,
    pub max_particles: u32,
    pub post_processing: bool,
    pub bloom: bool,
    pub shadows: ShadowQuality,
}

impl QualitySettings {
    /// Full-quality profile for the device class.
    #[must_use]
    pub fn for_device(is_mobile: bool, reduced_motion: bool) -> Self {
        Self {
            low_power: false,
            reduced_motion,
            is_mobile,
            max_particles: if is_mobile { 3000 } else { 15000 },
            post_processing: !is_mobile,
            bloom: !is_mobile,
            shadows: if is_mobile {
                ShadowQuality::None
            } else {
                ShadowQuality::Low
            },
        }
    }
}

/// Draw-call and triangle counters reported by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderBudget {
    pub draw_calls: u32,
    pub triangles: u32,
    pub max_draw_calls: u32,
    pub max_triangles: u32,
}

impl Default for RenderBudget {
    fn default() -> Self {
        Self {
            draw_calls: 0,
            triangles: 0,
            max_draw_calls: 150,
            max_triangles: 100_000,
        }
    }
}

/// Snapshot for HUDs and logs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerfStats {
    pub fps: u32,
    pub frame_time_ms: f64,
    pub draw_calls: u32,
    pub triangles: u32,
    pub low_power: bool,
    pub is_mobile: bool,
}

/// Counts frames and switches low-power mode on sustained low frame rate.
#[derive(Debug, Clone)]
pub struct PerformanceMonitor {
    fps: u32,
    frame_time_ms: f64,
    last_time_ms: Option<f64>,
    frames: u32,
    last_fps_update_ms: f64,
    low_fps: u32,
    recover_fps: u32,
    settings: QualitySettings,
    budget: RenderBudget,
}

impl PerformanceMonitor {
    #[must_use]
    pub fn new(config: &PerformanceConfig) -> Self {
        Self {
            fps: 60,
            frame_time_ms: 0.0,
            last_time_ms: None,
            frames: 0,
            last_fps_update_ms: 0.0,
            low_fps: config.low_fps,
            recover_fps: config.recover_fps,
            settings: QualitySettings::for_device(config.is_mobile, config.reduced_motion),
            budget: RenderBudget::default(),
        }
    }

    /// Records a frame at `now_ms` on a monotonic clock.
    ///
    /// Every second the frame rate is recomputed and quality re-evaluated.
    /// Returns `Some(low_power)` when low-power mode was toggled by this call.
    pub fn update(&mut self, now_ms: f64) -> Option<bool> {
        if let Some(last) = self.last_time_ms {
            self.frame_time_ms = now_ms - last;
        }
        self.last_time_ms = Some(now_ms);
        self.frames += 1;

        let window = now_ms - self.last_fps_update_ms;
        if window < FPS_WINDOW_MS {
            return None;
        }
        self.fps = (f64::from(self.frames) * 1000.0 / window).round() as u32;
        self.frames = 0;
        self.last_fps_update_ms = now_ms;
        self.auto_adjust_quality()
    }

    fn auto_adjust_quality(&mut self) -> Option<bool> {
        if self.fps < self.low_fps && !self.settings.low_power {
            info!(fps = self.fps, "low frame rate, enabling low-power mode");
            self.enable_low_power();
            Some(true)
        } else if self.fps > self.recover_fps && self.settings.low_power {
            info!(fps = self.fps, "frame rate stable, disabling low-power mode");
            self.disable_low_power();
            Some(false)
        } else {
            None
        }
    }

    fn enable_low_power(&mut self) {
        let s = &mut self.settings;
        s.low_power = true;
        s.max_particles /= 2;
        s.post_processing = false;
        s.bloom = false;
        s.shadows = ShadowQuality::None;
    }

    fn disable_low_power(&mut self) {
        self.settings = QualitySettings::for_device(self.settings.is_mobile, self.settings.reduced_motion);
    }

    /// Stores the renderer's counters for the last frame.
    pub fn update_budget(&mut self, draw_calls: u32, triangles: u32) {
        self.budget.draw_calls = draw_calls;
        self.budget.triangles = triangles;
    }

    #[must_use]
    pub fn is_over_budget(&self) -> bool {
        self.budget.draw_calls > self.budget.max_draw_calls
            || self.budget.triangles > self.budget.max_triangles
    }

    /// Decorative effects should be toned down.
    #[must_use]
    pub fn should_reduce_effects(&self) -> bool {
        self.settings.reduced_motion || self.settings.low_power
    }

    #[must_use]
    pub fn fps(&self) -> u32 {
        self.fps
    }

    #[must_use]
    pub fn settings(&self) -> &QualitySettings {
        &self.settings
    }

    #[must_use]
    pub fn stats(&self) -> PerfStats {
        PerfStats {
            fps: self.fps,
            frame_time_ms: self.frame_time_ms,
            draw_calls: self.budget.draw_calls,
            triangles: self.budget.triangles,
            low_power: self.settings.low_power,
            is_mobile: self.settings.is_mobile,
        }
    }
}
