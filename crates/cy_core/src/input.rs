//! Input state tracking with both edge-triggered and level-triggered queries.
//!
//! - **Level-triggered (held):** `is_held(key)` returns true every frame the key
//!   is physically down. Used for continuous camera movement (W/A/S/D).
//!
//! - **Edge-triggered (just_pressed):** true only during the frame the press
//!   happened, cleared by `end_frame()` after the update has consumed it.
//!   Used for one-shot actions like the overlay toggle and close request.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Escape,
    F1,
}

pub struct InputState {
    held: HashSet<Key>,
    just_pressed: HashSet<Key>,
    just_released: HashSet<Key>,

    pub cursor_position: (f64, f64),
}

impl InputState {
    pub fn new() -> Self {
        Self {
            held: HashSet::new(),
            just_pressed: HashSet::new(),
            just_released: HashSet::new(),
            cursor_position: (0.0, 0.0),
        }
    }

    pub fn key_down(&mut self, key: Key) {
        if self.held.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    pub fn key_up(&mut self, key: Key) {
        if self.held.remove(&key) {
            self.just_released.insert(key);
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn is_just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }

    pub fn is_just_released(&self, key: Key) -> bool {
        self.just_released.contains(&key)
    }

    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_down_sets_held_and_just_pressed() {
        let mut input = InputState::new();
        input.key_down(Key::W);
        assert!(input.is_held(Key::W));
        assert!(input.is_just_pressed(Key::W));
    }

    #[test]
    fn key_up_clears_held_sets_just_released() {
        let mut input = InputState::new();
        input.key_down(Key::W);
        input.key_up(Key::W);
        assert!(!input.is_held(Key::W));
        assert!(input.is_just_released(Key::W));
    }

    #[test]
    fn key_down_repeat_does_not_double_just_pressed() {
        let mut input = InputState::new();
        input.key_down(Key::F1);
        input.end_frame();
        // OS key-repeat delivers another press while still held; this must
        // not re-trigger the edge (HashSet::insert returns false).
        input.key_down(Key::F1);
        assert!(input.is_held(Key::F1));
        assert!(!input.is_just_pressed(Key::F1));
    }

    #[test]
    fn key_up_without_down_is_no_op() {
        let mut input = InputState::new();
        input.key_up(Key::A);
        assert!(!input.is_just_released(Key::A));
        assert!(!input.is_held(Key::A));
    }

    #[test]
    fn end_frame_clears_transient_state() {
        let mut input = InputState::new();
        input.key_down(Key::W);
        input.key_down(Key::Escape);
        input.end_frame();
        assert!(!input.is_just_pressed(Key::W));
        assert!(!input.is_just_pressed(Key::Escape));
        // Held state persists across frames.
        assert!(input.is_held(Key::W));
        assert!(input.is_held(Key::Escape));
    }

    #[test]
    fn multiple_keys_independent() {
        let mut input = InputState::new();
        input.key_down(Key::A);
        input.key_down(Key::D);
        input.key_up(Key::A);
        assert!(!input.is_held(Key::A));
        assert!(input.is_just_released(Key::A));
        assert!(input.is_held(Key::D));
        assert!(!input.is_just_released(Key::D));
    }
}
