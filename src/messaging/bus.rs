use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use super::{ControlEvent, GainCommand};

/// One-way channels between the UI thread and the audio thread.
///
/// Control events and gain automation travel on separate queues so that
/// the generator only ever sees key events, while gain commands are
/// consumed by the host's automation renderer.
pub struct ControlBus {
    control: ControlSender,
    receiver: ControlReceiver,
    gain_sender: Sender<GainCommand>,
    gain_receiver: Receiver<GainCommand>,
}

impl ControlBus {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        let (gain_sender, gain_receiver) = unbounded();

        ControlBus {
            control: ControlSender { sender },
            receiver: ControlReceiver { receiver },
            gain_sender,
            gain_receiver,
        }
    }

    /// Split into the UI half and the audio half.
    pub fn split(self) -> (ControlSender, Sender<GainCommand>, ControlReceiver, Receiver<GainCommand>) {
        (self.control, self.gain_sender, self.receiver, self.gain_receiver)
    }
}

impl Default for ControlBus {
    fn default() -> Self {
        Self::new()
    }
}

/// UI side of the control channel. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ControlSender {
    sender: Sender<ControlEvent>,
}

impl ControlSender {
    /// Queue an event for the next rendered block. Returns false once the
    /// audio side has gone away.
    pub fn post(&self, event: ControlEvent) -> bool {
        self.sender.send(event).is_ok()
    }

    /// Decode and queue a wire message; malformed input is dropped.
    pub fn post_json(&self, text: &str) -> bool {
        match ControlEvent::from_json(text) {
            Some(event) => self.post(event),
            None => false,
        }
    }
}

/// Audio side of the control channel. Never blocks.
#[derive(Debug)]
pub struct ControlReceiver {
    receiver: Receiver<ControlEvent>,
}

impl ControlReceiver {
    /// Hand every pending event, oldest first, to `apply`.
    pub fn drain(&self, mut apply: impl FnMut(ControlEvent)) -> usize {
        let mut count = 0;
        loop {
            match self.receiver.try_recv() {
                Ok(event) => {
                    apply(event);
                    count += 1;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        count
    }
}
