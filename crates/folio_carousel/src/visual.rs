//! Per-card visual state
//!
//! The renderer never asks the controller *how* to animate, only *where* each
//! card should be. [`compute_visual_state`] answers that as a pure function of
//! the card's index and a snapshot of controller state, with no dependency on
//! any rendering framework. The renderer is expected to tween toward the
//! returned values when [`VisualState::animated`] is set and to apply them
//! directly otherwise.

use serde::Serialize;

use crate::config::VisualConfig;

/// Placement of a single card relative to the stack center
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisualState {
    /// Signed steps from the selected card (negative = before it)
    pub position: i32,
    /// Horizontal offset from the stack origin (px)
    pub offset_x: f32,
    /// Vertical drop (px)
    pub offset_y: f32,
    pub depth_scale: f32,
    pub opacity: f32,
    /// Paint order; higher paints above lower
    pub stack_order: i32,
    /// Whether the card accepts clicks and taps
    pub interactive: bool,
    pub rotate_y_deg: f32,
    /// Whether the renderer should transition into this state; false while
    /// the cards track a live drag
    pub animated: bool,
}

/// Compute the visual state of card `index`.
///
/// `drag_delta` is `Some` only while a drag is in progress.
pub fn compute_visual_state(
    index: usize,
    selected: usize,
    item_count: usize,
    drag_delta: Option<f32>,
    config: &VisualConfig,
) -> VisualState {
    let position = signed_steps(index, selected);
    let distance = position.unsigned_abs();
    let steps = distance as f32;

    let drag_offset = match drag_delta {
        Some(delta) if distance <= config.drag_influence => delta * config.drag_damping,
        _ => 0.0,
    };

    let opacity = if position == 0 {
        1.0
    } else {
        (config.neighbor_opacity - steps * config.opacity_step)
            .max(config.opacity_floor)
            .max(0.0)
    };

    VisualState {
        position,
        offset_x: position as f32 * config.base_spacing + drag_offset,
        offset_y: steps * config.vertical_step,
        depth_scale: (1.0 - steps * config.scale_step).max(config.min_scale),
        opacity,
        stack_order: clamp_to_i32(item_count).saturating_sub(clamp_to_i32(distance as usize)),
        interactive: position == 0,
        rotate_y_deg: position as f32 * config.rotation_step_deg,
        animated: drag_delta.is_none(),
    }
}

fn signed_steps(index: usize, selected: usize) -> i32 {
    if index >= selected {
        clamp_to_i32(index - selected)
    } else {
        -clamp_to_i32(selected - index)
    }
}

fn clamp_to_i32(value: usize) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
