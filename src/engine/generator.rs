use crate::engine::gain::DEFAULT_GAIN;
use crate::engine::voice::{VoiceState, VoiceStatus};
use crate::messaging::{ControlEvent, ControlReceiver};

/// Peak amplitude of the square wave at the default gain.
pub const SQUARE_BASE_AMPLITUDE: f32 = 0.3;

/// Monophonic square-wave generator driven from the audio thread.
///
/// Control events queued on the bus take effect at the start of the next
/// block, never mid-block.
pub struct SquareGenerator {
    voice: VoiceState,
    events: ControlReceiver,
}

impl SquareGenerator {
    pub fn new(sample_rate: f64, events: ControlReceiver) -> Self {
        Self {
            voice: VoiceState::new(sample_rate),
            events,
        }
    }

    pub fn voice(&self) -> &VoiceState {
        &self.voice
    }

    pub fn apply_control_event(&mut self, event: ControlEvent) -> VoiceStatus {
        self.voice.apply_control_event(event)
    }

    /// Render one block into `outputs`.
    ///
    /// Every channel must have the same length. `gain` holds either a single
    /// value for the whole block or one value per sample. Always returns
    /// `true`: the generator never asks to be torn down.
    pub fn process(&mut self, outputs: &mut [Vec<f32>], gain: &[f32]) -> bool {
        let voice = &mut self.voice;
        self.events.drain(|event| {
            voice.apply_control_event(event);
        });

        let Some((first, rest)) = outputs.split_first_mut() else {
            return true;
        };

        // Silent: the period is infinite, so skip the phase arithmetic.
        if self.voice.pitch().is_none() {
            first.fill(0.0);
            for channel in rest.iter_mut() {
                channel.fill(0.0);
            }
            return true;
        }

        for (i, sample) in first.iter_mut().enumerate() {
            let raw = if self.voice.advance() {
                SQUARE_BASE_AMPLITUDE
            } else {
                -SQUARE_BASE_AMPLITUDE
            };
            *sample = raw * (gain_at(gain, i) / DEFAULT_GAIN);
        }

        for channel in rest.iter_mut() {
            channel.copy_from_slice(first);
        }

        true
    }
}

/// Gain for sample `i`: a single value is broadcast, an array is indexed.
fn gain_at(gain: &[f32], i: usize) -> f32 {
    match gain {
        [] => DEFAULT_GAIN,
        [only] => *only,
        values => values.get(i).copied().unwrap_or(values[values.len() - 1]),
    }
}
