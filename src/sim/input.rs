//! Input adapter
//!
//! Translates abstract touch events (drag, tap, held direction, action
//! buttons) into per-tick input state. Held state persists across ticks;
//! one-shot actions are cleared by the session after the tick that consumes
//! them. How the events are captured is the host's problem.

use serde::{Deserialize, Serialize};

/// Held movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

/// Input state sampled once per tick
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// A drag gesture is in progress
    pub dragging: bool,
    /// Horizontal offset from the drag-start anchor
    pub drag_delta: f32,
    pub hold_left: bool,
    pub hold_right: bool,
    /// One-shot: screen tap
    pub tapped: bool,
    /// One-shot: jump button
    pub jump: bool,
    /// One-shot: shoot button
    pub shoot: bool,
}

impl InputState {
    pub fn drag_start(&mut self) {
        self.dragging = true;
        self.drag_delta = 0.0;
    }

    /// Update the drag offset. Ignored when no drag is in progress.
    pub fn drag_move(&mut self, delta_x: f32) {
        if self.dragging {
            self.drag_delta = delta_x;
        }
    }

    pub fn drag_end(&mut self) {
        self.dragging = false;
        self.drag_delta = 0.0;
    }

    pub fn tap(&mut self) {
        self.tapped = true;
    }

    pub fn hold_direction(&mut self, dir: Direction, pressed: bool) {
        match dir {
            Direction::Left => self.hold_left = pressed,
            Direction::Right => self.hold_right = pressed,
        }
    }

    pub fn action_jump(&mut self) {
        self.jump = true;
    }

    pub fn action_shoot(&mut self) {
        self.shoot = true;
    }

    /// Current held direction; left wins when both are down
    pub fn held_direction(&self) -> Option<Direction> {
        if self.hold_left {
            Some(Direction::Left)
        } else if self.hold_right {
            Some(Direction::Right)
        } else {
            None
        }
    }

    /// Clear edge-triggered actions once a tick has consumed them
    pub fn clear_one_shots(&mut self) {
        self.tapped = false;
        self.jump = false;
        self.shoot = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_move_requires_active_drag() {
        let mut input = InputState::default();
        input.drag_move(25.0);
        assert_eq!(input.drag_delta, 0.0);

        input.drag_start();
        input.drag_move(25.0);
        assert_eq!(input.drag_delta, 25.0);

        input.drag_end();
        assert!(!input.dragging);
        assert_eq!(input.drag_delta, 0.0);
    }

    #[test]
    fn left_wins_when_both_held() {
        let mut input = InputState::default();
        input.hold_direction(Direction::Right, true);
        input.hold_direction(Direction::Left, true);
        assert_eq!(input.held_direction(), Some(Direction::Left));

        input.hold_direction(Direction::Left, false);
        assert_eq!(input.held_direction(), Some(Direction::Right));
    }

    #[test]
    fn clear_one_shots_keeps_held_state() {
        let mut input = InputState::default();
        input.tap();
        input.action_jump();
        input.action_shoot();
        input.hold_direction(Direction::Right, true);
        input.drag_start();

        input.clear_one_shots();
        assert!(!input.tapped && !input.jump && !input.shoot);
        assert!(input.hold_right);
        assert!(input.dragging);
    }
}
