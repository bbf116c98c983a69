use crate::engine::pitch::Pitch;
use crate::messaging::ControlEvent;

/// Waveform geometry in samples for one pitch at one sample rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceParameters {
    pub period: f64,
    pub half_period: f64,
}

impl VoiceParameters {
    /// No pitch: the phase never completes a cycle.
    pub const SILENT: VoiceParameters = VoiceParameters {
        period: f64::INFINITY,
        half_period: f64::INFINITY,
    };
}

/// Period and half period of `pitch` at `sample_rate`.
pub fn derive_voice_parameters(pitch: Option<Pitch>, sample_rate: f64) -> VoiceParameters {
    match pitch {
        Some(pitch) => {
            let period = sample_rate / pitch.frequency();
            VoiceParameters {
                period,
                half_period: period / 2.0,
            }
        }
        None => VoiceParameters::SILENT,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceStatus {
    Silent,
    Sounding(Pitch),
}

/// State of the single monophonic voice.
#[derive(Debug, Clone)]
pub struct VoiceState {
    sample_rate: f64,
    pitch: Option<Pitch>,
    params: VoiceParameters,
    phase: f64,
}

impl VoiceState {
    pub fn new(sample_rate: f64) -> Self {
        Self {
            sample_rate,
            pitch: None,
            params: VoiceParameters::SILENT,
            phase: 0.0,
        }
    }

    pub fn status(&self) -> VoiceStatus {
        match self.pitch {
            Some(pitch) => VoiceStatus::Sounding(pitch),
            None => VoiceStatus::Silent,
        }
    }

    pub fn pitch(&self) -> Option<Pitch> {
        self.pitch
    }

    pub fn period(&self) -> f64 {
        self.params.period
    }

    pub fn half_period(&self) -> f64 {
        self.params.half_period
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Apply one control event. The most recent key-on wins; a key-off only
    /// silences the voice if it names the sounding pitch.
    ///
    /// The phase counter is left alone on every transition, so a pitch change
    /// continues counting under the new period.
    pub fn apply_control_event(&mut self, event: ControlEvent) -> VoiceStatus {
        match event {
            ControlEvent::KeyOn { pitch } => self.set_pitch(Some(pitch)),
            ControlEvent::KeyOff { pitch } if self.pitch == Some(pitch) => self.set_pitch(None),
            ControlEvent::KeyOff { .. } | ControlEvent::Unknown => {}
        }
        self.status()
    }

    fn set_pitch(&mut self, pitch: Option<Pitch>) {
        self.pitch = pitch;
        self.params = derive_voice_parameters(pitch, self.sample_rate);
    }

    /// Step the phase by one sample and report whether it lies in the
    /// positive half of the cycle. Only meaningful while sounding.
    pub(crate) fn advance(&mut self) -> bool {
        self.phase = (self.phase + 1.0) % self.params.period;
        self.phase < self.params.half_period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f64 = 48_000.0;

    #[test]
    fn parameters_follow_pitch_table() {
        for pitch in Pitch::ALL {
            let params = derive_voice_parameters(Some(pitch), SAMPLE_RATE);
            assert_eq!(params.period, SAMPLE_RATE / pitch.frequency());
            assert_eq!(params.half_period, params.period / 2.0);
        }
        assert_eq!(derive_voice_parameters(None, SAMPLE_RATE), VoiceParameters::SILENT);
    }

    #[test]
    fn starts_silent() {
        let voice = VoiceState::new(SAMPLE_RATE);
        assert_eq!(voice.status(), VoiceStatus::Silent);
        assert!(voice.period().is_infinite());
        assert!(voice.half_period().is_infinite());
        assert_eq!(voice.phase(), 0.0);
    }

    #[test]
    fn key_on_then_key_off_is_silent() {
        let mut voice = VoiceState::new(SAMPLE_RATE);
        voice.apply_control_event(ControlEvent::KeyOn { pitch: Pitch::G });
        let status = voice.apply_control_event(ControlEvent::KeyOff { pitch: Pitch::G });
        assert_eq!(status, VoiceStatus::Silent);
        assert_eq!(voice.pitch(), None);
        assert!(voice.period().is_infinite());
    }

    #[test]
    fn last_key_on_wins_and_stale_key_off_is_ignored() {
        let mut voice = VoiceState::new(SAMPLE_RATE);
        voice.apply_control_event(ControlEvent::KeyOn { pitch: Pitch::C });
        voice.apply_control_event(ControlEvent::KeyOn { pitch: Pitch::E });
        assert_eq!(voice.status(), VoiceStatus::Sounding(Pitch::E));

        let status = voice.apply_control_event(ControlEvent::KeyOff { pitch: Pitch::C });
        assert_eq!(status, VoiceStatus::Sounding(Pitch::E));
        assert_eq!(voice.period(), SAMPLE_RATE / Pitch::E.frequency());
    }

    #[test]
    fn repeated_events_are_idempotent() {
        let mut voice = VoiceState::new(SAMPLE_RATE);
        voice.apply_control_event(ControlEvent::KeyOn { pitch: Pitch::A });
        let period = voice.period();
        voice.apply_control_event(ControlEvent::KeyOn { pitch: Pitch::A });
        assert_eq!(voice.period(), period);
        assert_eq!(voice.status(), VoiceStatus::Sounding(Pitch::A));

        voice.apply_control_event(ControlEvent::KeyOff { pitch: Pitch::A });
        voice.apply_control_event(ControlEvent::KeyOff { pitch: Pitch::A });
        assert_eq!(voice.status(), VoiceStatus::Silent);
    }

    #[test]
    fn repeated_key_on_renders_the_same_block() {
        let mut once = VoiceState::new(SAMPLE_RATE);
        for _ in 0..37 {
            once.advance();
        }
        let mut twice = once.clone();

        once.apply_control_event(ControlEvent::KeyOn { pitch: Pitch::A });
        twice.apply_control_event(ControlEvent::KeyOn { pitch: Pitch::A });
        twice.apply_control_event(ControlEvent::KeyOn { pitch: Pitch::A });

        let render = |voice: &mut VoiceState| (0..512).map(|_| voice.advance()).collect::<Vec<_>>();
        assert_eq!(render(&mut once), render(&mut twice));
        assert_eq!(once.phase(), twice.phase());
    }

    #[test]
    fn unknown_event_changes_nothing() {
        let mut voice = VoiceState::new(SAMPLE_RATE);
        voice.apply_control_event(ControlEvent::KeyOn { pitch: Pitch::D });
        assert_eq!(voice.apply_control_event(ControlEvent::Unknown), VoiceStatus::Sounding(Pitch::D));
    }

    #[test]
    fn phase_wraps_on_fractional_period() {
        let mut voice = VoiceState::new(SAMPLE_RATE);
        voice.apply_control_event(ControlEvent::KeyOn { pitch: Pitch::A });
        let period = voice.period();
        for _ in 0..10_000 {
            voice.advance();
            assert!(voice.phase() < period);
            assert!(voice.phase() >= 0.0);
        }
    }

    #[test]
    fn phase_is_kept_across_pitch_change() {
        let mut voice = VoiceState::new(SAMPLE_RATE);
        voice.apply_control_event(ControlEvent::KeyOn { pitch: Pitch::C });
        for _ in 0..150 {
            voice.advance();
        }
        let before = voice.phase();
        voice.apply_control_event(ControlEvent::KeyOn { pitch: Pitch::B });
        assert_eq!(voice.phase(), before);

        // B's period (~97 samples) is shorter than the carried phase.
        voice.advance();
        assert_eq!(voice.phase(), (before + 1.0) % voice.period());
        assert!(voice.phase() < voice.period());
    }
}
