//! Key-to-action mapping
//!
//! Decouples physical keys from logical demo actions, so controls can be
//! rebound without touching the code that consumes them.

use rustc_hash::FxHashMap;
use winit::keyboard::KeyCode;

use crate::input::Input;

/// Logical input actions that map to demo behaviors.
///
/// These represent what the user wants to do, independent of which key
/// triggers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum InputAction {
    /// Drive the controlled body to the left
    MoveLeft,
    /// Drive the controlled body to the right
    MoveRight,
    /// Jump while the body has ground contact
    Jump,
    /// Return the controlled body to its spawn point
    Reset,
    /// Quit the application
    Quit,
}

/// Maps physical keys to logical actions.
///
/// Supports runtime rebinding and querying of key-to-action mappings.
#[derive(Debug, Clone)]
pub struct InputMapper {
    /// Key to action bindings
    key_bindings: FxHashMap<KeyCode, InputAction>,
    /// Reverse lookup: action to keys
    action_keys: FxHashMap<InputAction, Vec<KeyCode>>,
}

impl InputMapper {
    /// Create an empty input mapper.
    #[must_use]
    pub fn new() -> Self {
        Self {
            key_bindings: FxHashMap::default(),
            action_keys: FxHashMap::default(),
        }
    }

    /// Create an input mapper with the default bindings.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut mapper = Self::new();

        // Movement
        mapper.bind(KeyCode::KeyA, InputAction::MoveLeft);
        mapper.bind(KeyCode::KeyD, InputAction::MoveRight);
        mapper.bind(KeyCode::Space, InputAction::Jump);

        // Arrow key alternatives
        mapper.bind(KeyCode::ArrowLeft, InputAction::MoveLeft);
        mapper.bind(KeyCode::ArrowRight, InputAction::MoveRight);
        mapper.bind(KeyCode::ArrowUp, InputAction::Jump);

        // Session control
        mapper.bind(KeyCode::KeyR, InputAction::Reset);
        mapper.bind(KeyCode::Escape, InputAction::Quit);

        mapper
    }

    /// Bind a key to an action.
    ///
    /// If the key was previously bound, the old binding is replaced.
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        // Remove old binding for this key
        if let Some(old_action) = self.key_bindings.get(&key)
            && let Some(keys) = self.action_keys.get_mut(old_action)
        {
            keys.retain(|k| *k != key);
        }

        // Add new binding
        self.key_bindings.insert(key, action);
        self.action_keys.entry(action).or_default().push(key);
    }

    /// Unbind a key.
    pub fn unbind(&mut self, key: KeyCode) {
        if let Some(action) = self.key_bindings.remove(&key)
            && let Some(keys) = self.action_keys.get_mut(&action)
        {
            keys.retain(|k| *k != key);
        }
    }

    /// Get the action for a key.
    #[must_use]
    pub fn get_action(&self, key: KeyCode) -> Option<InputAction> {
        self.key_bindings.get(&key).copied()
    }

    /// Get all keys bound to an action.
    #[must_use]
    pub fn get_keys(&self, action: InputAction) -> &[KeyCode] {
        self.action_keys
            .get(&action)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Check if any key bound to `action` is currently pressed.
    #[must_use]
    pub fn action_pressed(&self, action: InputAction, input: &Input) -> bool {
        input.any_pressed(self.get_keys(action))
    }

    /// Check if any key bound to `action` was just pressed this frame.
    #[must_use]
    pub fn action_just_pressed(&self, action: InputAction, input: &Input) -> bool {
        self.get_keys(action)
            .iter()
            .any(|key| input.is_key_just_pressed(*key))
    }

    /// Check if a key is bound to any action.
    #[must_use]
    pub fn is_bound(&self, key: KeyCode) -> bool {
        self.key_bindings.contains_key(&key)
    }

    /// Get total number of bindings.
    #[must_use]
    pub fn binding_count(&self) -> usize {
        self.key_bindings.len()
    }

    /// Clear all bindings.
    pub fn clear(&mut self) {
        self.key_bindings.clear();
        self.action_keys.clear();
    }

    /// Iterate over all bindings.
    pub fn iter(&self) -> impl Iterator<Item = (KeyCode, InputAction)> + '_ {
        self.key_bindings.iter().map(|(&k, &a)| (k, a))
    }
}

impl Default for InputMapper {
    fn default() -> Self {
        Self::new()
    }
}
