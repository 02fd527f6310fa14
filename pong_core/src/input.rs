//! Keyboard input handling

use tracing::{error, info};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    S,
    ArrowUp,
    ArrowDown,
}

impl Key {
    /// Parse a key name as typed on a command line or sent by a browser.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "w" | "W" => Some(Key::W),
            "s" | "S" => Some(Key::S),
            "ArrowUp" | "up" | "Up" => Some(Key::ArrowUp),
            "ArrowDown" | "down" | "Down" => Some(Key::ArrowDown),
            _ => None,
        }
    }
}

/// A connected keyboard as seen by the game.
pub trait Keyboard {
    fn is_pressed(&self, key: Key) -> bool;
}

/// Up/down keys for one player. Field coordinates are y-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub up: Key,
    pub down: Key,
}

impl KeyBinding {
    /// Player 0 on W/S, player 1 on the arrow keys, sharing one keyboard.
    pub fn default_bindings() -> Vec<KeyBinding> {
        vec![
            KeyBinding {
                up: Key::W,
                down: Key::S,
            },
            KeyBinding {
                up: Key::ArrowUp,
                down: Key::ArrowDown,
            },
        ]
    }

    fn intent(&self, keyboard: &dyn Keyboard) -> f32 {
        let mut intent = 0.0;
        if keyboard.is_pressed(self.up) {
            intent += 1.0;
        }
        if keyboard.is_pressed(self.down) {
            intent -= 1.0;
        }
        intent
    }
}

/// Per-player movement intents refreshed from the connected keyboard.
pub struct InputManager {
    bindings: Vec<KeyBinding>,
    movement: Vec<f32>,
    keyboard: Option<Box<dyn Keyboard>>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(KeyBinding::default_bindings())
    }
}

impl InputManager {
    /// One player per binding.
    pub fn new(bindings: Vec<KeyBinding>) -> Self {
        let movement = vec![0.0; bindings.len()];
        Self {
            bindings,
            movement,
            keyboard: None,
        }
    }

    pub fn player_count(&self) -> usize {
        self.movement.len()
    }

    /// Replace the active keyboard. The most recently connected one wins.
    pub fn connect_keyboard(&mut self, keyboard: Box<dyn Keyboard>) {
        info!("keyboard connected");
        self.keyboard = Some(keyboard);
    }

    pub fn disconnect_keyboard(&mut self) {
        if self.keyboard.take().is_some() {
            info!("keyboard disconnected");
        }
    }

    pub fn has_keyboard(&self) -> bool {
        self.keyboard.is_some()
    }

    /// Refresh intents. Call once per frame before paddles move.
    pub fn update(&mut self) {
        self.movement.iter_mut().for_each(|m| *m = 0.0);

        let Some(keyboard) = self.keyboard.as_deref() else {
            return;
        };
        for (movement, binding) in self.movement.iter_mut().zip(&self.bindings) {
            *movement = binding.intent(keyboard).clamp(-1.0, 1.0);
        }
    }

    pub fn try_movement(&self, player: usize) -> Option<f32> {
        self.movement.get(player).copied()
    }

    /// Movement intent in `[-1, 1]` for `player`.
    ///
    /// # Panics
    ///
    /// Panics if `player` is not one of the configured players. That is a
    /// caller bug, not a runtime condition.
    pub fn movement(&self, player: usize) -> f32 {
        match self.try_movement(player) {
            Some(movement) => movement,
            None => {
                error!(player, players = self.player_count(), "player index out of range");
                panic!(
                    "player index {player} out of range, only {} players",
                    self.player_count()
                );
            }
        }
    }
}
