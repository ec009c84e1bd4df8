//! Page transition choreography
//!
//! The detail page opens in stages:
//!
//! ```text
//!  0ms ──── expand card image to full screen (800ms)
//!  800ms ── dark overlay and project title appear
//!  2300ms ─ title screen pushed up out of view (800ms)
//!  2800ms ─ detail content revealed
//! ```
//!
//! The site splash is a single 1500ms stage. Both are timelines owned by the
//! page state, so leaving the page drops every pending stage with it.

use folio_animation::{Easing, TimerQueue, Timeline};
use folio_core::Rect;
use smallvec::SmallVec;

/// Stage boundaries of the detail reveal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealTimings {
    pub expand_ms: u32,
    pub overlay_at_ms: u32,
    pub push_up_at_ms: u32,
    pub push_up_ms: u32,
    pub content_at_ms: u32,
    /// Corner radius of the card before it expands
    pub card_radius: f32,
}

impl Default for RevealTimings {
    fn default() -> Self {
        Self {
            expand_ms: 800,
            overlay_at_ms: 800,
            push_up_at_ms: 2300,
            push_up_ms: 800,
            content_at_ms: 2800,
            card_radius: 8.0,
        }
    }
}

/// Discrete stage changes, delivered once each
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealCue {
    ShowOverlay,
    StartPushUp,
    ShowContent,
}

/// Everything the detail page needs to draw one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealFrame {
    /// Bounds of the hero image
    pub image_rect: Rect,
    pub corner_radius: f32,
    pub overlay_visible: bool,
    pub title_visible: bool,
    /// Vertical offset of the title screen (negative = pushed up)
    pub title_screen_offset_y: f32,
    pub content_visible: bool,
}

/// State of an opening detail page
#[derive(Debug)]
pub struct DetailReveal {
    timings: RevealTimings,
    origin: Option<Rect>,
    viewport: Rect,
    timeline: Timeline<RevealCue>,
    started_at: f64,
    overlay_visible: bool,
    push_up_started: bool,
    content_visible: bool,
}

impl DetailReveal {
    /// Begin revealing at `now_ms`. `origin` is the tapped card's bounds; with
    /// no origin the image starts full screen.
    pub fn start(origin: Option<Rect>, viewport: Rect, timings: RevealTimings, now_ms: f64) -> Self {
        let mut timeline = Timeline::new()
            .cue(timings.overlay_at_ms, RevealCue::ShowOverlay)
            .cue(timings.push_up_at_ms, RevealCue::StartPushUp)
            .cue(timings.content_at_ms, RevealCue::ShowContent);
        timeline.start(now_ms);

        tracing::debug!(?origin, "detail reveal started");

        Self {
            timings,
            origin,
            viewport,
            timeline,
            started_at: now_ms,
            overlay_visible: false,
            push_up_started: false,
            content_visible: false,
        }
    }

    /// Apply every stage reached by `now_ms`, returning the new cues
    pub fn advance(&mut self, now_ms: f64) -> SmallVec<[RevealCue; 4]> {
        let cues = self.timeline.poll(now_ms);
        for cue in &cues {
            match cue {
                RevealCue::ShowOverlay => self.overlay_visible = true,
                RevealCue::StartPushUp => self.push_up_started = true,
                RevealCue::ShowContent => self.content_visible = true,
            }
            tracing::trace!(?cue, "reveal stage");
        }
        cues
    }

    pub fn is_complete(&self) -> bool {
        self.timeline.is_finished()
    }

    /// When the next stage is due
    pub fn next_deadline(&self) -> Option<f64> {
        self.timeline.next_deadline()
    }

    /// Frame at `now_ms`. Continuous values come from the clock; the
    /// discrete flags reflect the stages applied by [`DetailReveal::advance`].
    pub fn frame(&self, now_ms: f64) -> RevealFrame {
        let elapsed = (now_ms - self.started_at).max(0.0);
        let t = Easing::EaseInOut.progress(elapsed, self.timings.expand_ms as f64);

        let (start, radius) = match self.origin {
            Some(rect) => (rect, self.timings.card_radius),
            None => (self.viewport, 0.0),
        };

        let push = if self.push_up_started {
            Easing::EaseInOut.progress(
                elapsed - self.timings.push_up_at_ms as f64,
                self.timings.push_up_ms as f64,
            )
        } else {
            0.0
        };

        RevealFrame {
            image_rect: start.lerp(&self.viewport, t),
            corner_radius: radius * (1.0 - t),
            overlay_visible: self.overlay_visible,
            title_visible: self.overlay_visible,
            title_screen_offset_y: -self.viewport.height * push,
            content_visible: self.content_visible,
        }
    }
}

/// Splash shown before the about page
#[derive(Debug)]
pub struct Splash {
    started_at: f64,
    duration_ms: u32,
    done: TimerQueue<()>,
    completed: bool,
}

/// Logo transform during the splash
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplashFrame {
    pub rotation_deg: f32,
    pub scale: f32,
    pub visible: bool,
}

impl Splash {
    pub const DEFAULT_DURATION_MS: u32 = 1500;
    const SPIN_MS: f64 = 1000.0;
    /// Fraction of the duration the logo holds full size before shrinking
    const HOLD: f32 = 0.7;
    const END_SCALE: f32 = 0.1;

    pub fn start(now_ms: f64) -> Self {
        Self::with_duration(now_ms, Self::DEFAULT_DURATION_MS)
    }

    pub fn with_duration(now_ms: f64, duration_ms: u32) -> Self {
        let mut done = TimerQueue::new();
        done.schedule_after(now_ms, duration_ms as f64, ());
        Self {
            started_at: now_ms,
            duration_ms,
            done,
            completed: false,
        }
    }

    /// Returns true exactly once, when the splash finishes
    pub fn poll(&mut self, now_ms: f64) -> bool {
        if self.done.fire_due(now_ms).is_empty() {
            return false;
        }
        self.completed = true;
        tracing::debug!("splash complete");
        true
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn frame(&self, now_ms: f64) -> SplashFrame {
        let elapsed = (now_ms - self.started_at).max(0.0);
        let rotation_deg = 360.0 * Easing::EaseInOut.progress(elapsed, Self::SPIN_MS);

        let t = Easing::Linear.progress(elapsed, self.duration_ms as f64);
        let scale = if t <= Self::HOLD {
            1.0
        } else {
            let shrink = Easing::EaseInOut.apply((t - Self::HOLD) / (1.0 - Self::HOLD));
            1.0 + (Self::END_SCALE - 1.0) * shrink
        };

        SplashFrame {
            rotation_deg,
            scale,
            visible: !self.completed,
        }
    }
}
