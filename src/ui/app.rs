use egui::{Key, RichText};
use crate::config::SessionConfig;
use crate::engine::audio::AudioSession;
use crate::messaging::ControlEvent;
use crate::ui::mapper::KeyboardMapper;

/// The keyboard window. Owns the audio session once Enter has started it
/// and forwards mapped key transitions to it.
pub struct KeyboardApp {
    config: SessionConfig,
    session: Option<AudioSession>,
    mapper: KeyboardMapper,
    gain: f32,
    paused: bool,
    init_error: Option<String>,
}

impl eframe::App for KeyboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keys(ctx);

        let mut toggle_pause = false;
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("🔈");
                let slider = egui::Slider::new(&mut self.gain, 0.0..=1.0)
                    .step_by(0.001)
                    .show_value(false);
                if ui.add(slider).changed() {
                    if let Some(session) = &self.session {
                        session.set_gain(self.gain);
                    }
                }
                ui.label("🔊");
            });

            ui.add_space(8.0);

            match &self.session {
                Some(session) => {
                    let pitch = self.mapper.active_pitch().map(|p| p.name()).unwrap_or("");
                    ui.label(RichText::new(pitch).size(64.0));

                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        ui.label(format!(
                            "{} · {} Hz · {} ch",
                            session.device_name(),
                            session.sample_rate(),
                            session.channels()
                        ));
                        let label = if self.paused { "Resume" } else { "Pause" };
                        toggle_pause = ui.button(label).clicked();
                    });
                }
                None => {
                    ui.label("Press \"Enter\" to start audio streaming");
                }
            }
        });

        if toggle_pause {
            self.toggle_pause();
        }
        self.show_init_error(ctx);
    }
}

impl KeyboardApp {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            gain: config.initial_gain,
            config,
            session: None,
            mapper: KeyboardMapper::new(),
            paused: false,
            init_error: None,
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        let (events, focused) = ctx.input(|i| (i.events.clone(), i.focused));

        for event in events {
            let egui::Event::Key { key, physical_key, pressed, repeat, .. } = event else {
                continue;
            };
            // Layout-independent position, like a keyboard `code`.
            let key = physical_key.unwrap_or(key);

            if key == Key::Enter {
                if pressed && !repeat {
                    self.start_stream();
                }
                continue;
            }

            let control = if pressed {
                self.mapper.key_down(key, repeat)
            } else {
                self.mapper.key_up(key)
            };
            if let Some(control) = control {
                self.post(control);
            }
        }

        if !focused {
            if let Some(control) = self.mapper.release_all() {
                self.post(control);
            }
        }
    }

    fn post(&self, event: ControlEvent) {
        if let Some(session) = &self.session {
            log::debug!("post {}", event.to_json());
            if !session.control().post(event) {
                log::warn!("audio thread is gone; dropped {event:?}");
            }
        }
    }

    fn start_stream(&mut self) {
        if self.session.is_some() {
            return;
        }

        match AudioSession::create(&self.config) {
            Ok(session) => {
                if self.gain != self.config.initial_gain {
                    session.set_gain(self.gain);
                }
                log::info!("start streaming on {}", session.device_name());
                self.session = Some(session);
                self.paused = false;
            }
            Err(e) => {
                log::error!("audio engine could not be initialized: {e}");
                self.init_error = Some(format!("Audio engine could not be initialized: {e}"));
            }
        }
    }

    fn toggle_pause(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        let result = if self.paused { session.resume() } else { session.suspend() };
        match result {
            Ok(()) => self.paused = !self.paused,
            Err(e) => {
                log::error!("{e}; closing audio session");
                if let Some(session) = self.session.take() {
                    session.close();
                }
                self.init_error = Some(e.to_string());
            }
        }
    }

    fn show_init_error(&mut self, ctx: &egui::Context) {
        let Some(message) = &self.init_error else {
            return;
        };

        let mut dismissed = false;
        egui::Window::new("Audio error")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });

        if dismissed {
            self.init_error = None;
        }
    }
}
