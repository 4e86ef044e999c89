use std::collections::HashMap;
use std::hash::Hash;
pub use winit::keyboard::KeyCode;

/// Per-key state.  `JustPressed` lasts exactly one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KeyState {
    #[default]
    Released,
    Held,
    JustPressed,
}

/// Raw keyboard state, fed by host key events and aged once per frame.
#[derive(Debug, Default, Clone)]
pub struct Keyboard {
    keys: HashMap<KeyCode, KeyState>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a host key event.  A press on a released key is a fresh press;
    /// a press on a key that is already down (auto-repeat) is just held.
    pub fn on_event(&mut self, key: KeyCode, pressed: bool) {
        let state = self.keys.entry(key).or_default();
        *state = match (pressed, *state) {
            (false, _) => KeyState::Released,
            (true, KeyState::Released) => KeyState::JustPressed,
            (true, _) => KeyState::Held,
        };
    }

    pub fn state(&self, key: KeyCode) -> KeyState {
        self.keys.get(&key).copied().unwrap_or_default()
    }

    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.state(key) == KeyState::JustPressed
    }

    pub fn is_held(&self, key: KeyCode) -> bool {
        self.state(key) != KeyState::Released
    }

    /// Whether any key went down this frame.
    pub fn any_pressed(&self) -> bool {
        self.keys.values().any(|s| *s == KeyState::JustPressed)
    }

    /// Age fresh presses into held keys.  Call once at the end of a frame.
    pub fn end_frame(&mut self) {
        for state in self.keys.values_mut() {
            if *state == KeyState::JustPressed {
                *state = KeyState::Held;
            }
        }
    }
}

// ── Actions ────────────────────────────────────────────────────────────────

/// Logical inputs the game reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Up,
    Down,
    Confirm,
    Back,
    /// Step forward when movement is key-driven.
    Advance,
}

/// Maps logical actions to one or more keys.
#[derive(Debug, Clone)]
pub struct ActionMap<A: Hash + Eq + Copy> {
    bindings: HashMap<A, Vec<KeyCode>>,
}

impl<A: Hash + Eq + Copy> ActionMap<A> {
    pub fn new() -> Self {
        Self { bindings: HashMap::new() }
    }

    pub fn bind(&mut self, action: A, key: KeyCode) {
        self.bindings.entry(action).or_default().push(key);
    }

    /// Returns true if a bound key went down this frame.
    pub fn is_pressed(&self, action: A, keyboard: &Keyboard) -> bool {
        self.bindings
            .get(&action)
            .is_some_and(|keys| keys.iter().any(|k| keyboard.is_pressed(*k)))
    }

    /// Returns true if a bound key is down.
    pub fn is_held(&self, action: A, keyboard: &Keyboard) -> bool {
        self.bindings
            .get(&action)
            .is_some_and(|keys| keys.iter().any(|k| keyboard.is_held(*k)))
    }
}

impl<A: Hash + Eq + Copy> Default for ActionMap<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionMap<Action> {
    /// Arrow keys, Enter, Escape and Space.
    pub fn standard() -> Self {
        let mut map = Self::new();
        map.bind(Action::Left, KeyCode::ArrowLeft);
        map.bind(Action::Right, KeyCode::ArrowRight);
        map.bind(Action::Up, KeyCode::ArrowUp);
        map.bind(Action::Down, KeyCode::ArrowDown);
        map.bind(Action::Confirm, KeyCode::Enter);
        map.bind(Action::Confirm, KeyCode::NumpadEnter);
        map.bind(Action::Back, KeyCode::Escape);
        map.bind(Action::Advance, KeyCode::Space);
        map
    }
}
