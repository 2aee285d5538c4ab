//! Frame-rate tracking and graceful quality degradation.
//!
//! Low frame rate is never an error. The monitor flips into low-power mode
//! and the adaptive renderer starts skipping frames; both recover on their
//! own once the frame rate climbs back.

mod adaptive;
mod monitor;

pub use adaptive::AdaptiveRenderer;
pub use monitor::{PerfStats, PerformanceMonitor, QualitySettings, RenderBudget, ShadowQuality};
