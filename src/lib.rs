//! A one-octave square-wave keyboard.
//!
//! Key presses and a volume slider on the UI thread drive a monophonic
//! square-wave generator running on the audio thread. The two sides share
//! nothing but a pair of one-way channels.

pub mod config;
pub mod engine;
pub mod error;
pub mod messaging;
pub mod ui;
