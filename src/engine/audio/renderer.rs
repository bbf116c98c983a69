use cpal::{FromSample, Sample};
use crossbeam_channel::Receiver;
use crate::engine::gain::GainAutomation;
use crate::engine::generator::SquareGenerator;
use crate::messaging::GainCommand;

/// Adapts the fixed-quantum generator to whatever buffer sizes the device
/// asks for.
///
/// Whole quanta are rendered into a planar scratch buffer allocated up
/// front; frames left over at the end of a device callback are served at
/// the start of the next one.
pub struct BlockRenderer {
    generator: SquareGenerator,
    gain: GainAutomation,
    gain_commands: Receiver<GainCommand>,
    planar: Vec<Vec<f32>>,
    quantum: usize,
    cursor: usize,
}

impl BlockRenderer {
    pub fn new(
        generator: SquareGenerator,
        gain: GainAutomation,
        gain_commands: Receiver<GainCommand>,
        channels: usize,
        quantum: usize,
    ) -> Self {
        let quantum = quantum.max(1);
        Self {
            generator,
            gain,
            gain_commands,
            planar: vec![vec![0.0; quantum]; channels.max(1)],
            quantum,
            cursor: quantum,
        }
    }

    pub fn generator(&self) -> &SquareGenerator {
        &self.generator
    }

    /// Fill an interleaved device buffer.
    pub fn render_interleaved<T>(&mut self, data: &mut [T], channels: usize)
    where
        T: Sample + FromSample<f32>,
    {
        let channels = channels.max(1);
        for frame in data.chunks_mut(channels) {
            if self.cursor == self.quantum {
                self.render_quantum();
            }
            for (channel, sample) in frame.iter_mut().enumerate() {
                let plane = &self.planar[channel.min(self.planar.len() - 1)];
                *sample = T::from_sample(plane[self.cursor]);
            }
            self.cursor += 1;
        }
    }

    fn render_quantum(&mut self) {
        while let Ok(command) = self.gain_commands.try_recv() {
            self.gain.apply(command);
        }
        let gain = self.gain.fill_block(self.quantum);
        self.generator.process(&mut self.planar, gain);
        self.cursor = 0;
    }
}
