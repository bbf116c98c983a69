use crate::engine::pitch::Pitch;
use serde::{Deserialize, Serialize};

/// Discrete control messages sent from the UI to the audio engine.
///
/// On the wire these look like `{"type": "keyOn", "pitch": "C#"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ControlEvent {
    KeyOn { pitch: Pitch },
    KeyOff { pitch: Pitch },
    /// Any other tag. Delivered but ignored by the generator.
    #[serde(other)]
    Unknown,
}

impl ControlEvent {
    /// Decode a wire message, returning `None` for anything malformed.
    pub fn from_json(text: &str) -> Option<Self> {
        match serde_json::from_str(text) {
            Ok(event) => Some(event),
            Err(e) => {
                log::debug!("dropping malformed control message {text:?}: {e}");
                None
            }
        }
    }

    pub fn to_json(&self) -> String {
        // Serializing a plain tagged enum cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Automation requests for the `gain` parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GainCommand {
    /// Ramp linearly from the current value to `target` over `duration_secs`.
    LinearRamp { target: f32, duration_secs: f32 },
}
