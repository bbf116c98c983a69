pub mod audio;
pub mod gain;
pub mod generator;
pub mod pitch;
pub mod voice;
