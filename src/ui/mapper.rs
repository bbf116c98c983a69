use egui::Key;
use std::collections::HashSet;
use crate::engine::pitch::Pitch;
use crate::messaging::ControlEvent;

/// Bottom letter row as a one-octave piano: white keys on Z..M, black keys
/// on the row above.
pub const KEY_MAP: [(Key, Pitch); 12] = [
    (Key::Z, Pitch::C),
    (Key::S, Pitch::CSharp),
    (Key::X, Pitch::D),
    (Key::D, Pitch::Eb),
    (Key::C, Pitch::E),
    (Key::V, Pitch::F),
    (Key::G, Pitch::FSharp),
    (Key::B, Pitch::G),
    (Key::H, Pitch::GSharp),
    (Key::N, Pitch::A),
    (Key::J, Pitch::Bb),
    (Key::M, Pitch::B),
];

pub fn pitch_for_key(key: Key) -> Option<Pitch> {
    KEY_MAP.iter().find(|(k, _)| *k == key).map(|(_, pitch)| *pitch)
}

/// Turns raw key transitions into control events.
///
/// Tracks the pitch that is currently sounding so that releasing an older
/// key after a newer one was pressed does not cut the newer note.
#[derive(Debug, Default)]
pub struct KeyboardMapper {
    active: Option<Pitch>,
    held: HashSet<Key>,
}

impl KeyboardMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pitch shown as sounding.
    pub fn active_pitch(&self) -> Option<Pitch> {
        self.active
    }

    pub fn key_down(&mut self, key: Key, repeat: bool) -> Option<ControlEvent> {
        // Some platforms report auto-repeat without the flag.
        if !self.held.insert(key) || repeat {
            return None;
        }
        let pitch = pitch_for_key(key)?;
        self.active = Some(pitch);
        Some(ControlEvent::KeyOn { pitch })
    }

    pub fn key_up(&mut self, key: Key) -> Option<ControlEvent> {
        self.held.remove(&key);
        let pitch = pitch_for_key(key)?;
        if self.active != Some(pitch) {
            return None;
        }
        self.active = None;
        Some(ControlEvent::KeyOff { pitch })
    }

    /// Forget held keys, e.g. after the window loses focus.
    pub fn release_all(&mut self) -> Option<ControlEvent> {
        self.held.clear();
        self.active.take().map(|pitch| ControlEvent::KeyOff { pitch })
    }
}
