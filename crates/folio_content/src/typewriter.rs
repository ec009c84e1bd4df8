//! Typewriter headline
//!
//! Cycles through a list of phrases: types one character at a time, holds
//! the full phrase, deletes it at double speed, then moves to the next phrase.
//! A cursor blinks independently of the typing.

use folio_animation::TimerQueue;

use crate::error::ContentError;

/// Typewriter pacing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypewriterTimings {
    pub type_ms: u32,
    pub delete_ms: u32,
    /// Hold on the full phrase before deleting
    pub hold_ms: u32,
    /// Pause on the empty line before the next phrase
    pub gap_ms: u32,
    pub blink_ms: u32,
}

impl Default for TypewriterTimings {
    fn default() -> Self {
        Self {
            type_ms: 100,
            delete_ms: 50,
            hold_ms: 1000,
            gap_ms: 100,
            blink_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Type,
    BeginDelete,
    Delete,
    NextPhrase,
}

/// Cyclic type/delete animation over a fixed set of phrases
#[derive(Debug)]
pub struct Typewriter {
    phrases: Vec<String>,
    timings: TypewriterTimings,
    phrase: usize,
    /// Visible characters of the current phrase
    shown: usize,
    deleting: bool,
    started_at: f64,
    /// Payload carries its own deadline so catch-up steps stay on schedule
    steps: TimerQueue<(f64, Step)>,
}

impl Typewriter {
    pub fn new<I, S>(phrases: I, timings: TypewriterTimings, now_ms: f64) -> Result<Self, ContentError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let phrases: Vec<String> = phrases.into_iter().map(Into::into).collect();
        if phrases.is_empty() {
            return Err(ContentError::NoTexts);
        }

        let mut steps = TimerQueue::new();
        let first = now_ms + timings.type_ms as f64;
        steps.schedule(first, (first, Step::Type));

        Ok(Self {
            phrases,
            timings,
            phrase: 0,
            shown: 0,
            deleting: false,
            started_at: now_ms,
            steps,
        })
    }

    /// Apply every step due by `now_ms`. Returns true if the text changed.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let mut changed = false;
        loop {
            let fired = self.steps.fire_due(now_ms);
            if fired.is_empty() {
                return changed;
            }
            for (_, (at, step)) in fired {
                changed |= self.apply(step, at);
            }
        }
    }

    fn after(&mut self, at: f64, delay_ms: u32, step: Step) {
        // Zero delays would let a single tick spin forever
        let deadline = at + delay_ms.max(1) as f64;
        self.steps.schedule(deadline, (deadline, step));
    }

    fn apply(&mut self, step: Step, at: f64) -> bool {
        let len = self.phrases[self.phrase].chars().count();
        match step {
            Step::Type if self.shown < len => {
                self.shown += 1;
                self.after(at, self.timings.type_ms, Step::Type);
                true
            }
            Step::Type => {
                self.after(at, self.timings.hold_ms, Step::BeginDelete);
                false
            }
            Step::BeginDelete => {
                self.deleting = true;
                self.after(at, self.timings.delete_ms, Step::Delete);
                false
            }
            Step::Delete if self.shown > 0 => {
                self.shown -= 1;
                self.after(at, self.timings.delete_ms, Step::Delete);
                true
            }
            Step::Delete => {
                self.deleting = false;
                self.after(at, self.timings.gap_ms, Step::NextPhrase);
                false
            }
            Step::NextPhrase => {
                self.phrase = (self.phrase + 1) % self.phrases.len();
                self.after(at, self.timings.type_ms, Step::Type);
                tracing::trace!(phrase = self.phrase, "typewriter next phrase");
                false
            }
        }
    }

    /// The currently visible prefix
    pub fn text(&self) -> &str {
        let phrase = &self.phrases[self.phrase];
        match phrase.char_indices().nth(self.shown) {
            Some((end, _)) => &phrase[..end],
            None => phrase,
        }
    }

    pub fn phrase_index(&self) -> usize {
        self.phrase
    }

    pub fn is_deleting(&self) -> bool {
        self.deleting
    }

    pub fn next_deadline(&self) -> Option<f64> {
        self.steps.next_deadline()
    }

    /// Cursor blinks on for one period, off for the next
    pub fn cursor_visible(&self, now_ms: f64) -> bool {
        let period = self.timings.blink_ms.max(1) as f64;
        let elapsed = (now_ms - self.started_at).max(0.0);
        ((elapsed / period).floor() as u64) % 2 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn writer(phrases: &[&str]) -> Typewriter {
        Typewriter::new(phrases.iter().copied(), TypewriterTimings::default(), 0.0).unwrap()
    }

    #[test]
    fn test_rejects_empty_phrase_list() {
        let err = Typewriter::new(Vec::<String>::new(), TypewriterTimings::default(), 0.0)
            .unwrap_err();
        assert_eq!(err, ContentError::NoTexts);
    }

    #[test]
    fn test_types_one_char_per_step() {
        let mut tw = writer(&["Hi!"]);
        assert_eq!(tw.text(), "");
        assert!(!tw.tick(99.0));
        assert!(tw.tick(100.0));
        assert_eq!(tw.text(), "H");
        tw.tick(300.0);
        assert_eq!(tw.text(), "Hi!");
    }

    #[test]
    fn test_full_cycle_moves_to_next_phrase() {
        let mut tw = writer(&["ab", "cd"]);

        // typed by 200, full-check at 300, delete starts at 1300
        tw.tick(1299.0);
        assert_eq!(tw.text(), "ab");
        assert!(!tw.is_deleting());

        tw.tick(1300.0);
        assert!(tw.is_deleting());
        tw.tick(1400.0);
        assert_eq!(tw.text(), "");

        // empty check at 1450, next phrase at 1550, first char at 1650
        tw.tick(1549.0);
        assert_eq!(tw.phrase_index(), 0);
        tw.tick(1550.0);
        assert_eq!(tw.phrase_index(), 1);
        tw.tick(1650.0);
        assert_eq!(tw.text(), "c");
    }

    #[test]
    fn test_wraps_around_and_handles_multibyte() {
        let mut tw = writer(&["é"]);
        tw.tick(100.0);
        assert_eq!(tw.text(), "é");
        tw.tick(10_000.0);
        assert_eq!(tw.phrase_index(), 0);
    }

    #[test]
    fn test_cursor_blinks() {
        let tw = writer(&["x"]);
        assert!(tw.cursor_visible(0.0));
        assert!(tw.cursor_visible(499.0));
        assert!(!tw.cursor_visible(500.0));
        assert!(tw.cursor_visible(1000.0));
    }
}
