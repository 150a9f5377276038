//! Input state tracking

use glam::Vec2;
use std::collections::HashSet;
use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Keyboard and scroll state tracker
///
/// Held keys live in a set, so absence means not-held: a key-down inserts
/// (repeats are no-ops), a key-up removes. The just-pressed/just-released
/// sets cover a single frame and are cleared by `update()`.
#[derive(Debug)]
pub struct Input {
    /// Currently pressed keys
    pressed_keys: HashSet<KeyCode>,
    /// Keys that were just pressed this frame
    just_pressed_keys: HashSet<KeyCode>,
    /// Keys that were just released this frame
    just_released_keys: HashSet<KeyCode>,
    /// Scroll wheel delta this frame
    scroll_delta: Vec2,
}

impl Input {
    /// Create a new input tracker
    pub fn new() -> Self {
        Self {
            pressed_keys: HashSet::new(),
            just_pressed_keys: HashSet::new(),
            just_released_keys: HashSet::new(),
            scroll_delta: Vec2::ZERO,
        }
    }

    /// Call at the end of each frame to clear per-frame state
    pub fn update(&mut self) {
        self.just_pressed_keys.clear();
        self.just_released_keys.clear();
        self.scroll_delta = Vec2::ZERO;
    }

    /// Process a keyboard event
    pub fn process_keyboard(&mut self, key_code: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.pressed_keys.contains(&key_code) {
                    self.just_pressed_keys.insert(key_code);
                }
                self.pressed_keys.insert(key_code);
            }
            ElementState::Released => {
                self.pressed_keys.remove(&key_code);
                self.just_released_keys.insert(key_code);
            }
        }
    }

    /// Process scroll wheel input
    pub fn process_scroll(&mut self, delta: Vec2) {
        self.scroll_delta += delta;
    }

    /// Check if a key is currently pressed
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.pressed_keys.contains(&key)
    }

    /// Check if a key was just pressed this frame
    pub fn is_key_just_pressed(&self, key: KeyCode) -> bool {
        self.just_pressed_keys.contains(&key)
    }

    /// Check if a key was just released this frame
    pub fn is_key_just_released(&self, key: KeyCode) -> bool {
        self.just_released_keys.contains(&key)
    }

    /// Check if any of the given keys is currently pressed
    pub fn any_pressed(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|key| self.pressed_keys.contains(key))
    }

    /// Get scroll wheel delta this frame
    pub fn scroll_delta(&self) -> Vec2 {
        self.scroll_delta
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_down_sets_held() {
        let mut input = Input::new();

        input.process_keyboard(KeyCode::KeyA, ElementState::Pressed);

        assert!(input.is_key_pressed(KeyCode::KeyA));
        assert!(input.is_key_just_pressed(KeyCode::KeyA));
    }

    #[test]
    fn test_key_up_clears_held() {
        let mut input = Input::new();

        input.process_keyboard(KeyCode::KeyA, ElementState::Pressed);
        input.process_keyboard(KeyCode::KeyA, ElementState::Released);

        assert!(!input.is_key_pressed(KeyCode::KeyA));
        assert!(input.is_key_just_released(KeyCode::KeyA));
    }

    #[test]
    fn test_repeated_key_down_is_idempotent() {
        let mut input = Input::new();

        input.process_keyboard(KeyCode::Space, ElementState::Pressed);
        input.update();
        // OS key repeat delivers another press while still held
        input.process_keyboard(KeyCode::Space, ElementState::Pressed);

        assert!(input.is_key_pressed(KeyCode::Space));
        assert!(!input.is_key_just_pressed(KeyCode::Space));
    }

    #[test]
    fn test_release_of_absent_key_is_idempotent() {
        let mut input = Input::new();

        input.process_keyboard(KeyCode::KeyD, ElementState::Released);

        assert!(!input.is_key_pressed(KeyCode::KeyD));
    }

    #[test]
    fn test_held_state_reflects_most_recent_event() {
        let mut input = Input::new();

        input.process_keyboard(KeyCode::KeyA, ElementState::Pressed);
        input.process_keyboard(KeyCode::KeyA, ElementState::Released);
        input.process_keyboard(KeyCode::KeyA, ElementState::Pressed);

        assert!(input.is_key_pressed(KeyCode::KeyA));

        input.process_keyboard(KeyCode::KeyA, ElementState::Released);
        assert!(!input.is_key_pressed(KeyCode::KeyA));
    }

    #[test]
    fn test_update_clears_transitions_but_not_held() {
        let mut input = Input::new();

        input.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        input.update();

        assert!(input.is_key_pressed(KeyCode::KeyW));
        assert!(!input.is_key_just_pressed(KeyCode::KeyW));
    }

    #[test]
    fn test_any_pressed() {
        let mut input = Input::new();

        input.process_keyboard(KeyCode::ArrowLeft, ElementState::Pressed);

        assert!(input.any_pressed(&[KeyCode::KeyA, KeyCode::ArrowLeft]));
        assert!(!input.any_pressed(&[KeyCode::KeyD, KeyCode::ArrowRight]));
        assert!(!input.any_pressed(&[]));
    }

    #[test]
    fn test_scroll_accumulates_within_frame() {
        let mut input = Input::new();

        input.process_scroll(Vec2::new(0.0, 1.0));
        input.process_scroll(Vec2::new(0.0, 0.5));
        assert_eq!(input.scroll_delta(), Vec2::new(0.0, 1.5));

        input.update();
        assert_eq!(input.scroll_delta(), Vec2::ZERO);
    }
}
