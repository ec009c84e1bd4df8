//! Scripted gesture sessions
//!
//! A script is a TOML list of steps. Each step waits, then feeds one action
//! to a carousel over the built-in catalog and reports the resulting state:
//!
//! ```toml
//! [[step]]
//! action = { kind = "pointer_down", x = 640.0 }
//!
//! [[step]]
//! wait_ms = 16
//! action = { kind = "pointer_move", x = 420.0 }
//!
//! [[step]]
//! action = { kind = "pointer_up", x = 420.0 }
//! ```

use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use folio_carousel::{Carousel, CarouselConfig, GestureOutcome, Phase, VisualState};
use folio_content::{Catalog, DetailRoute, Project};
use folio_core::{Clock, Event, KeyCode, ManualClock, Rect, SharedClock, SystemClock};
use serde::{Deserialize, Serialize};

/// A parsed replay script
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
    /// Time to let pass before the action
    #[serde(default)]
    pub wait_ms: u32,
    pub action: Action,
}

/// One host input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum Action {
    PointerDown {
        x: f32,
        #[serde(default)]
        y: f32,
    },
    PointerMove {
        x: f32,
        #[serde(default)]
        y: f32,
    },
    PointerUp {
        x: f32,
        #[serde(default)]
        y: f32,
    },
    TouchStart {
        x: f32,
        #[serde(default)]
        y: f32,
    },
    TouchMove {
        x: f32,
        #[serde(default)]
        y: f32,
    },
    TouchEnd,
    Leave,
    /// DOM key name, e.g. "ArrowRight"
    Key { key: String },
    Wheel {
        #[serde(default)]
        delta_x: f32,
        #[serde(default)]
        delta_y: f32,
    },
    /// Tap the card at `index`; `rect` is its on-screen bounds
    Tap {
        index: usize,
        #[serde(default)]
        rect: Option<Rect>,
    },
    /// Only let time pass
    Tick,
}

impl Action {
    fn to_event(&self) -> Option<Event> {
        let event = match self {
            Action::PointerDown { x, y } => Event::pointer_down(*x, *y),
            Action::PointerMove { x, y } => Event::pointer_move(*x, *y),
            Action::PointerUp { x, y } => Event::pointer_up(*x, *y),
            Action::TouchStart { x, y } => Event::touch_start(*x, *y),
            Action::TouchMove { x, y } => Event::touch_move(*x, *y),
            Action::TouchEnd => Event::touch_end(),
            Action::Leave => Event::pointer_leave(),
            Action::Key { key } => Event::key_down(KeyCode::from_name(key)),
            Action::Wheel { delta_x, delta_y } => Event::scroll(*delta_x, *delta_y),
            Action::Tap { .. } | Action::Tick => return None,
        };
        Some(event)
    }
}

impl Script {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid replay script")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("Failed to load {}", path.display()))
    }
}

/// Carousel state after one step, printed as a JSON line
#[derive(Debug, Serialize)]
pub struct StepRecord {
    pub step: usize,
    pub at_ms: f64,
    pub action: Action,
    pub consumed: bool,
    pub outcome: Option<GestureOutcome>,
    pub selected: usize,
    pub phase: Phase,
    pub position: String,
    /// Detail page path when a tap hit the center card
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    pub cards: Vec<VisualState>,
}

/// Time source for a replay
enum Pacing {
    /// Waits advance a manual clock instantly
    Manual(Arc<ManualClock>),
    /// Waits sleep on the system clock
    Realtime,
}

/// A carousel over the built-in catalog driven by script steps
pub struct Replay {
    carousel: Carousel<Project>,
    clock: SharedClock,
    pacing: Pacing,
}

impl Replay {
    /// Replay on a manual clock starting at `start_ms`
    pub fn manual(config: CarouselConfig, start_ms: f64) -> Result<Self> {
        let manual = ManualClock::shared(start_ms);
        let clock: SharedClock = manual.clone();
        Self::build(config, clock, Pacing::Manual(manual))
    }

    /// Replay in wall-clock time
    pub fn realtime(config: CarouselConfig) -> Result<Self> {
        Self::build(config, SystemClock::shared(), Pacing::Realtime)
    }

    fn build(config: CarouselConfig, clock: SharedClock, pacing: Pacing) -> Result<Self> {
        let projects = Catalog::builtin().projects().to_vec();
        let carousel = Carousel::with_clock(projects, config, clock.clone())
            .context("Failed to build carousel")?;
        Ok(Self {
            carousel,
            clock,
            pacing,
        })
    }

    pub fn carousel(&self) -> &Carousel<Project> {
        &self.carousel
    }

    /// Run every step without real waiting. Realtime replays must use
    /// [`Replay::run_realtime`].
    pub fn run(&mut self, script: &Script, out: &mut impl Write) -> Result<usize> {
        for (index, step) in script.steps.iter().enumerate() {
            if let Pacing::Manual(clock) = &self.pacing {
                clock.advance(step.wait_ms as f64);
            }
            self.emit(index, step, out)?;
        }
        Ok(script.steps.len())
    }

    /// Run every step, sleeping for each wait
    pub async fn run_realtime(&mut self, script: &Script, out: &mut impl Write) -> Result<usize> {
        for (index, step) in script.steps.iter().enumerate() {
            match &self.pacing {
                Pacing::Manual(clock) => clock.advance(step.wait_ms as f64),
                Pacing::Realtime if step.wait_ms > 0 => {
                    tokio::time::sleep(Duration::from_millis(step.wait_ms as u64)).await;
                }
                Pacing::Realtime => {}
            }
            self.emit(index, step, out)?;
        }
        Ok(script.steps.len())
    }

    fn emit(&mut self, index: usize, step: &Step, out: &mut impl Write) -> Result<()> {
        let record = self.apply(index, &step.action);
        let line = serde_json::to_string(&record).context("Failed to serialize step")?;
        writeln!(out, "{line}").context("Failed to write step")?;
        Ok(())
    }

    /// Feed one action to the carousel at the current time
    pub fn apply(&mut self, index: usize, action: &Action) -> StepRecord {
        let mut consumed = false;
        let mut outcome = None;
        let mut route = None;

        match action {
            Action::Tap { index, rect } => {
                let bounds = rect.unwrap_or_default();
                if let Some(navigate) = self.carousel.tap(*index, bounds) {
                    consumed = true;
                    let origin = rect.map(|_| bounds);
                    route = Some(DetailRoute::new(navigate.key, origin).to_path());
                }
            }
            Action::Tick => {
                self.carousel.tick();
            }
            other => {
                if let Some(event) = other.to_event() {
                    let response = self.carousel.handle_event(&event);
                    consumed = response.consumed;
                    outcome = response.outcome;
                }
            }
        }

        tracing::debug!(step = index, ?action, ?outcome, "replayed");

        StepRecord {
            step: index,
            at_ms: self.clock.now_ms(),
            action: action.clone(),
            consumed,
            outcome,
            selected: self.carousel.selected_index(),
            phase: self.carousel.phase(),
            position: self.carousel.position_label(),
            route,
            cards: self.carousel.visual_states(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SWIPE: &str = r#"
        [[step]]
        action = { kind = "pointer_down", x = 640.0 }

        [[step]]
        wait_ms = 16
        action = { kind = "pointer_move", x = 420.0 }

        [[step]]
        action = { kind = "pointer_up", x = 420.0 }
    "#;

    fn replay() -> Replay {
        Replay::manual(CarouselConfig::default(), 1000.0).unwrap()
    }

    #[test]
    fn test_parse_script() {
        let script = Script::from_toml_str(SWIPE).unwrap();
        assert_eq!(script.steps.len(), 3);
        assert_eq!(script.steps[1].wait_ms, 16);
        assert_eq!(
            script.steps[0].action,
            Action::PointerDown { x: 640.0, y: 0.0 }
        );
    }

    #[test]
    fn test_rejects_unknown_action() {
        let err = Script::from_toml_str("[[step]]\naction = { kind = \"pinch\" }\n").unwrap_err();
        assert!(format!("{err:#}").contains("Invalid replay script"));
    }

    #[test]
    fn test_swipe_writes_one_line_per_step() {
        let script = Script::from_toml_str(SWIPE).unwrap();
        let mut out = Vec::new();
        let mut replay = replay();

        assert_eq!(replay.run(&script, &mut out).unwrap(), 3);
        assert_eq!(replay.carousel().selected_index(), 1);

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1]["at_ms"], 1016.0);
        assert_eq!(lines[1]["phase"], "dragging");
        assert_eq!(lines[2]["selected"], 1);
        assert_eq!(lines[2]["phase"], "transitioning");
        assert_eq!(lines[2]["position"], "2 - 5");
        assert_eq!(lines[2]["cards"].as_array().unwrap().len(), 5);
        assert!(lines[2]["outcome"]["committed"].is_object());
    }

    #[test]
    fn test_cooldown_settles_on_tick() {
        let mut replay = replay();
        replay.apply(0, &Action::Key {
            key: "ArrowRight".into(),
        });

        let locked = replay.apply(1, &Action::Wheel {
            delta_x: 80.0,
            delta_y: 0.0,
        });
        assert_eq!(locked.outcome, Some(GestureOutcome::Debounced));

        let script = Script::from_toml_str("[[step]]\nwait_ms = 600\naction = { kind = \"tick\" }\n")
            .unwrap();
        replay.run(&script, &mut std::io::sink()).unwrap();
        assert_eq!(replay.carousel().phase(), Phase::Idle);
    }

    #[test]
    fn test_tap_center_card_yields_route() {
        let mut replay = replay();
        let rect = Rect::new(225.0, 390.0, 500.0, 350.0);

        let side = replay.apply(0, &Action::Tap {
            index: 1,
            rect: Some(rect),
        });
        assert!(!side.consumed);
        assert!(side.route.is_none());

        let center = replay.apply(1, &Action::Tap {
            index: 0,
            rect: Some(rect),
        });
        assert!(center.consumed);
        let route = center.route.unwrap();
        assert!(route.starts_with("/work/1?rect="));

        let bare = replay.apply(2, &Action::Tap {
            index: 0,
            rect: None,
        });
        assert_eq!(bare.route.as_deref(), Some("/work/1"));
    }

    #[test]
    fn test_vertical_wheel_passes_through() {
        let mut replay = replay();
        let record = replay.apply(0, &Action::Wheel {
            delta_x: 0.0,
            delta_y: 120.0,
        });
        assert!(!record.consumed);
        assert_eq!(record.outcome, Some(GestureOutcome::Ignored));
        assert_eq!(record.selected, 0);
    }
}
