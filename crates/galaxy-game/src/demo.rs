//! Scripted flight for `--demo`: autopilot to the first signboard, then
//! shoot its target once the ship has arrived.

use tracing::{info, warn};

use galaxy_app::Engine;
use galaxy_events::TargetId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoPhase {
    Start,
    Approaching(TargetId),
    Firing(TargetId),
    Done,
}

#[derive(Debug)]
pub struct Demo {
    phase: DemoPhase,
}

impl Demo {
    #[must_use]
    pub fn new() -> Self {
        Self {
            phase: DemoPhase::Start,
        }
    }

    #[must_use]
    pub fn phase(&self) -> DemoPhase {
        self.phase
    }

    /// Advances the script by one tick. Call before [`Engine::tick`].
    pub fn step(&mut self, engine: &mut Engine) {
        self.phase = match self.phase {
            DemoPhase::Start => {
                let first = engine.signboards().target_ids().first().copied();
                match first {
                    Some(target) if engine.click_signboard(target) => {
                        info!(%target, "Demo: flying to signboard");
                        DemoPhase::Approaching(target)
                    }
                    _ => {
                        warn!("Demo: scene has no signboard targets");
                        DemoPhase::Done
                    }
                }
            }
            DemoPhase::Approaching(target) if !engine.flight().is_autopilot_active() => {
                DemoPhase::Firing(target)
            }
            DemoPhase::Firing(target) => {
                let aim = engine
                    .signboards()
                    .board(target)
                    .and_then(|board| board.target_world_position());
                match aim {
                    Some(point) if engine.fire_at(point) > 0 => {
                        info!(%target, "Demo: fired at signboard target");
                        DemoPhase::Done
                    }
                    Some(_) => DemoPhase::Firing(target),
                    None => DemoPhase::Done,
                }
            }
            phase => phase,
        };
    }
}

impl Default for Demo {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galaxy_app::World;
    use galaxy_config::Config;
    use galaxy_content::StaticContentProvider;

    fn engine(scene: &str) -> Engine {
        let config = Config::default();
        let content = StaticContentProvider::from_ron_str(r#"(profile: Some((name: "Ada")))"#).unwrap();
        let mut world = World::new(&config, Box::new(content));
        world.load_signboards_str(scene);
        Engine::new(&config, world)
    }

    #[test]
    fn test_demo_opens_first_panel() {
        let mut engine = engine(
            r#"[{"position": {"x": 0, "y": 10, "z": -100}, "action": {"type": "profile"}}]"#,
        );
        let mut demo = Demo::new();
        for _ in 0..900 {
            demo.step(&mut engine);
            engine.tick(1.0 / 60.0);
        }
        assert_eq!(demo.phase(), DemoPhase::Done);
        assert!(engine.signboards().is_panel_open(TargetId(0)));
    }

    #[test]
    fn test_demo_without_targets_finishes() {
        let mut engine = engine("[]");
        let mut demo = Demo::new();
        demo.step(&mut engine);
        assert_eq!(demo.phase(), DemoPhase::Done);
        assert!(!engine.flight().is_autopilot_active());
    }
}
