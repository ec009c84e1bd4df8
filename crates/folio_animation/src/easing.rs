//! Easing curves for transitions

/// Easing curve applied to normalized progress
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    #[default]
    Linear,
    /// Cubic ease-in
    EaseIn,
    /// Cubic ease-out
    EaseOut,
    /// CSS `ease-in-out`, i.e. `cubic-bezier(0.42, 0, 0.58, 1)`
    EaseInOut,
    /// CSS-style cubic bezier with control points (x1, y1, x2, y2)
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Material "standard" curve used for card settle transitions
    pub const STANDARD: Easing = Easing::CubicBezier(0.4, 0.0, 0.2, 1.0);

    /// Map progress in `[0, 1]` to eased progress. Inputs outside the range
    /// are clamped.
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::EaseIn => t * t * t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => solve_bezier(t, 0.42, 0.0, 0.58, 1.0),
            Easing::CubicBezier(x1, y1, x2, y2) => solve_bezier(t, x1, y1, x2, y2),
        }
    }

    /// Eased progress of an animation of `duration_ms` at `elapsed_ms`
    pub fn progress(&self, elapsed_ms: f64, duration_ms: f64) -> f32 {
        if duration_ms <= 0.0 {
            return 1.0;
        }
        self.apply((elapsed_ms / duration_ms) as f32)
    }
}

/// One coordinate of a unit cubic bezier with endpoints 0 and 1
#[inline]
fn bezier_axis(s: f64, c1: f64, c2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * c1 + 3.0 * inv * s * s * c2 + s * s * s
}

#[inline]
fn bezier_axis_derivative(s: f64, c1: f64, c2: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * c1 + 6.0 * inv * s * (c2 - c1) + 3.0 * s * s * (1.0 - c2)
}

/// Find the curve parameter whose x equals `t`, then return its y.
///
/// Newton iterations converge quickly for typical UI curves; bisection takes
/// over when the slope flattens out.
fn solve_bezier(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    const EPS: f64 = 1e-7;
    let target = t as f64;
    let (x1, y1, x2, y2) = (x1 as f64, y1 as f64, x2 as f64, y2 as f64);

    let mut s = target;
    for _ in 0..8 {
        let error = bezier_axis(s, x1, x2) - target;
        if error.abs() < EPS {
            return bezier_axis(s, y1, y2) as f32;
        }
        let slope = bezier_axis_derivative(s, x1, x2);
        if slope.abs() < EPS {
            break;
        }
        s = (s - error / slope).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    s = target;
    for _ in 0..30 {
        let x = bezier_axis(s, x1, x2);
        if (x - target).abs() < EPS {
            break;
        }
        if x < target {
            lo = s;
        } else {
            hi = s;
        }
        s = 0.5 * (lo + hi);
    }

    bezier_axis(s, y1, y2) as f32
}
