//! Host side of the engine: device streams and block scheduling.

mod renderer;
mod session;

pub use self::renderer::BlockRenderer;
pub use self::session::AudioSession;
