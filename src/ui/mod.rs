mod app;
pub mod mapper;

pub use self::app::KeyboardApp;
