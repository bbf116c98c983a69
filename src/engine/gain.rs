//! The `gain` audio parameter.
//!
//! The UI only ever asks for ramps; the audio thread turns those requests
//! into the per-block gain array the generator reads. A block whose gain is
//! flat is delivered as a single value, a block that is ramping as one value
//! per sample.

use crate::messaging::GainCommand;

pub const DEFAULT_GAIN: f32 = 0.8;
pub const MIN_GAIN: f32 = 0.0;
pub const MAX_GAIN: f32 = 1.0;

#[derive(Debug, Clone, Copy)]
struct Ramp {
    start_frame: u64,
    end_frame: u64,
    start: f32,
    target: f32,
}

impl Ramp {
    fn value_at(&self, frame: u64) -> f32 {
        if frame >= self.end_frame {
            return self.target;
        }
        let t = (frame - self.start_frame) as f32 / (self.end_frame - self.start_frame) as f32;
        self.start + (self.target - self.start) * t
    }
}

/// Audio-thread renderer for gain automation.
pub struct GainAutomation {
    sample_rate: f64,
    frame: u64,
    value: f32,
    ramp: Option<Ramp>,
    buffer: Vec<f32>,
}

impl GainAutomation {
    pub fn new(sample_rate: f64, initial: f32, block_size: usize) -> Self {
        Self {
            sample_rate,
            frame: 0,
            value: initial.clamp(MIN_GAIN, MAX_GAIN),
            ramp: None,
            buffer: vec![0.0; block_size.max(1)],
        }
    }

    /// Gain at the current frame.
    pub fn value(&self) -> f32 {
        match &self.ramp {
            Some(ramp) => ramp.value_at(self.frame),
            None => self.value,
        }
    }

    pub fn is_ramping(&self) -> bool {
        self.ramp.is_some()
    }

    pub fn apply(&mut self, command: GainCommand) {
        match command {
            GainCommand::LinearRamp { target, duration_secs } => {
                let start = self.value();
                let target = target.clamp(MIN_GAIN, MAX_GAIN);
                let frames = (duration_secs.max(0.0) as f64 * self.sample_rate).round() as u64;

                if frames == 0 {
                    self.value = target;
                    self.ramp = None;
                } else {
                    self.value = start;
                    self.ramp = Some(Ramp {
                        start_frame: self.frame,
                        end_frame: self.frame.saturating_add(frames),
                        start,
                        target,
                    });
                }
            }
        }
    }

    /// Render the gain for the next `frames` samples and advance the clock.
    pub fn fill_block(&mut self, frames: usize) -> &[f32] {
        self.settle();

        let len = match self.ramp {
            Some(ramp) => {
                if self.buffer.len() < frames {
                    self.buffer.resize(frames, 0.0);
                }
                for (i, slot) in self.buffer[..frames].iter_mut().enumerate() {
                    *slot = ramp.value_at(self.frame + i as u64);
                }
                frames
            }
            None => {
                self.buffer[0] = self.value;
                1
            }
        };

        self.frame += frames as u64;
        self.settle();
        &self.buffer[..len]
    }

    fn settle(&mut self) {
        if let Some(ramp) = self.ramp {
            if self.frame >= ramp.end_frame {
                self.value = ramp.target;
                self.ramp = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flat_gain_is_a_single_value() {
        let mut gain = GainAutomation::new(48_000.0, DEFAULT_GAIN, 128);
        assert_eq!(gain.fill_block(128), &[DEFAULT_GAIN]);
        assert_eq!(gain.fill_block(128), &[DEFAULT_GAIN]);
    }

    #[test]
    fn zero_duration_ramp_jumps() {
        let mut gain = GainAutomation::new(48_000.0, DEFAULT_GAIN, 128);
        gain.apply(GainCommand::LinearRamp { target: 0.25, duration_secs: 0.0 });
        assert!(!gain.is_ramping());
        assert_eq!(gain.fill_block(128), &[0.25]);
    }

    #[test]
    fn ramp_is_linear_per_sample_then_flat() {
        // 256 frames at 1 kHz over 0.256 s.
        let mut gain = GainAutomation::new(1_000.0, 1.0, 128);
        gain.apply(GainCommand::LinearRamp { target: 0.0, duration_secs: 0.256 });

        let first = gain.fill_block(128).to_vec();
        assert_eq!(first.len(), 128);
        assert_eq!(first[0], 1.0);
        assert!((first[64] - 0.75).abs() < 1e-6);
        assert!(first.windows(2).all(|w| w[1] < w[0]));

        let second = gain.fill_block(128).to_vec();
        assert_eq!(second.len(), 128);
        assert!((second[0] - 0.5).abs() < 1e-6);
        assert!(second[127] > 0.0);

        assert!(!gain.is_ramping());
        assert_eq!(gain.fill_block(128), &[0.0]);
    }

    #[test]
    fn new_ramp_starts_from_current_value() {
        let mut gain = GainAutomation::new(1_000.0, 0.0, 4);
        gain.apply(GainCommand::LinearRamp { target: 1.0, duration_secs: 0.008 });
        gain.fill_block(4);
        assert!((gain.value() - 0.5).abs() < 1e-6);

        gain.apply(GainCommand::LinearRamp { target: 0.0, duration_secs: 0.004 });
        let block = gain.fill_block(4).to_vec();
        assert!((block[0] - 0.5).abs() < 1e-6);
        assert!((block[2] - 0.25).abs() < 1e-6);
    }

    #[test]
    fn targets_are_clamped_to_range() {
        let mut gain = GainAutomation::new(48_000.0, 3.0, 16);
        assert_eq!(gain.value(), MAX_GAIN);
        gain.apply(GainCommand::LinearRamp { target: -1.0, duration_secs: 0.0 });
        assert_eq!(gain.value(), MIN_GAIN);
    }

    #[test]
    fn absurd_ramp_length_does_not_overflow() {
        let mut gain = GainAutomation::new(48_000.0, 1.0, 128);
        gain.fill_block(128);
        gain.apply(GainCommand::LinearRamp { target: 0.2, duration_secs: 1e30 });
        assert!(gain.is_ramping());

        let block = gain.fill_block(128).to_vec();
        assert_eq!(block.len(), 128);
        assert!(block.iter().all(|&g| (g - 1.0).abs() < 1e-6));
    }

    #[test]
    fn oversized_block_grows_buffer() {
        let mut gain = GainAutomation::new(1_000.0, 0.0, 4);
        gain.apply(GainCommand::LinearRamp { target: 1.0, duration_secs: 1.0 });
        assert_eq!(gain.fill_block(16).len(), 16);
    }
}
