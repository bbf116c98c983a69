use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the twelve tones of the middle octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pitch {
    C,
    #[serde(rename = "C#")]
    CSharp,
    D,
    Eb,
    E,
    F,
    #[serde(rename = "F#")]
    FSharp,
    G,
    #[serde(rename = "G#")]
    GSharp,
    A,
    Bb,
    B,
}

impl Pitch {
    pub const ALL: [Pitch; 12] = [
        Pitch::C,
        Pitch::CSharp,
        Pitch::D,
        Pitch::Eb,
        Pitch::E,
        Pitch::F,
        Pitch::FSharp,
        Pitch::G,
        Pitch::GSharp,
        Pitch::A,
        Pitch::Bb,
        Pitch::B,
    ];

    /// Fundamental frequency in Hz (A = 440, equal temperament).
    pub fn frequency(self) -> f64 {
        match self {
            Pitch::C => 261.626,
            Pitch::CSharp => 277.183,
            Pitch::D => 293.665,
            Pitch::Eb => 311.127,
            Pitch::E => 329.628,
            Pitch::F => 349.228,
            Pitch::FSharp => 369.994,
            Pitch::G => 391.995,
            Pitch::GSharp => 415.305,
            Pitch::A => 440.0,
            Pitch::Bb => 466.164,
            Pitch::B => 493.883,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Pitch::C => "C",
            Pitch::CSharp => "C#",
            Pitch::D => "D",
            Pitch::Eb => "Eb",
            Pitch::E => "E",
            Pitch::F => "F",
            Pitch::FSharp => "F#",
            Pitch::G => "G",
            Pitch::GSharp => "G#",
            Pitch::A => "A",
            Pitch::Bb => "Bb",
            Pitch::B => "B",
        }
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
