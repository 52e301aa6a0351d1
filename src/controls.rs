//! Turns terminal key events into per-player `InputSnapshot`s.
//!
//! Terminals are inconsistent about key state, so held keys are tracked by
//! the frame they were last seen:
//!
//! * **Keyboard-enhancement capable** terminals (kitty protocol) send
//!   `Press` / `Repeat` / `Release`, and keys drop out on release.
//! * **Classic terminals** only send `Press` (OS key-repeat shows up as more
//!   presses). A key stays held for `HOLD_WINDOW` frames after its last event,
//!   which is shorter than the OS repeat interval, so it stays live while the
//!   key is actively repeating.
//!
//! Attack is edge-triggered: only a `Press` of a key that is not already held
//! arms it, and reading the snapshot disarms it, so holding the key fires one
//! skill.

use std::collections::{HashMap, HashSet};

use crossterm::event::{KeyCode, KeyEventKind};

use crate::entities::{InputSnapshot, PlayerSlot};

/// A key counts as held this many frames after its last press/repeat.
pub const HOLD_WINDOW: u64 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Left,
    Right,
    Jump,
    Attack,
}

/// Which player and action a key drives, if any.
/// Player one: A D W + F. Player two: arrow keys + L.
pub fn binding(code: KeyCode) -> Option<(PlayerSlot, Action)> {
    let binding = match code {
        KeyCode::Char('a') | KeyCode::Char('A') => (PlayerSlot::One, Action::Left),
        KeyCode::Char('d') | KeyCode::Char('D') => (PlayerSlot::One, Action::Right),
        KeyCode::Char('w') | KeyCode::Char('W') => (PlayerSlot::One, Action::Jump),
        KeyCode::Char('f') | KeyCode::Char('F') => (PlayerSlot::One, Action::Attack),
        KeyCode::Left => (PlayerSlot::Two, Action::Left),
        KeyCode::Right => (PlayerSlot::Two, Action::Right),
        KeyCode::Up => (PlayerSlot::Two, Action::Jump),
        KeyCode::Char('l') | KeyCode::Char('L') => (PlayerSlot::Two, Action::Attack),
        _ => return None,
    };
    Some(binding)
}

#[derive(Debug, Default)]
pub struct KeyTracker {
    /// Each held binding → the frame it was last seen.
    last_seen: HashMap<(PlayerSlot, Action), u64>,
    /// Attack presses not yet handed out in a snapshot.
    armed: HashSet<PlayerSlot>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one key event seen during `frame`. Unbound keys are ignored.
    pub fn record(&mut self, code: KeyCode, kind: KeyEventKind, frame: u64) {
        let Some(key) = binding(code) else {
            return;
        };
        match kind {
            KeyEventKind::Press => {
                // OS key-repeat arrives as more presses; only a fresh one arms.
                if key.1 == Action::Attack && !self.is_held(key.0, key.1, frame) {
                    self.armed.insert(key.0);
                }
                self.last_seen.insert(key, frame);
            }
            KeyEventKind::Repeat => {
                self.last_seen.insert(key, frame);
            }
            KeyEventKind::Release => {
                self.last_seen.remove(&key);
            }
        }
    }

    pub fn is_held(&self, player: PlayerSlot, action: Action, frame: u64) -> bool {
        self.last_seen
            .get(&(player, action))
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    /// Build the snapshot for `player`, consuming any pending attack press.
    pub fn snapshot(&mut self, player: PlayerSlot, frame: u64) -> InputSnapshot {
        InputSnapshot {
            left: self.is_held(player, Action::Left, frame),
            right: self.is_held(player, Action::Right, frame),
            jump: self.is_held(player, Action::Jump, frame),
            attack_pressed: self.armed.remove(&player),
        }
    }

    /// Snapshots for both players, in slot order.
    pub fn snapshots(&mut self, frame: u64) -> [InputSnapshot; 2] {
        [
            self.snapshot(PlayerSlot::One, frame),
            self.snapshot(PlayerSlot::Two, frame),
        ]
    }

    pub fn clear(&mut self) {
        self.last_seen.clear();
        self.armed.clear();
    }
}
