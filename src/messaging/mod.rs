mod bus;
mod types;

pub use self::bus::{ControlBus, ControlReceiver, ControlSender};
pub use self::types::{ControlEvent, GainCommand};
