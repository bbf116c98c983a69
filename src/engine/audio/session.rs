use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, SizedSample, Stream, StreamConfig};
use crossbeam_channel::Sender;
use crate::config::SessionConfig;
use crate::engine::audio::BlockRenderer;
use crate::engine::gain::{GainAutomation, MAX_GAIN, MIN_GAIN};
use crate::engine::generator::SquareGenerator;
use crate::error::SessionError;
use crate::messaging::{ControlBus, ControlSender, GainCommand};

/// A running output stream with its generator.
///
/// Owned by the UI; dropping or closing it tears the audio thread down.
pub struct AudioSession {
    stream: Stream,
    control: ControlSender,
    gain: Sender<GainCommand>,
    gain_ramp_seconds: f32,
    sample_rate: f64,
    channels: u16,
    device_name: String,
}

impl AudioSession {
    /// Open the configured output device and start streaming.
    pub fn create(config: &SessionConfig) -> Result<Self, SessionError> {
        let host = cpal::default_host();
        log::info!("using audio host: {}", host.id().name());

        let device = find_output_device(&host, config.output_device.as_deref())?;
        let device_name = device.name().unwrap_or_else(|_| String::from("<unnamed>"));
        log::info!("using output device: {device_name}");

        let supported = device.default_output_config()?;
        log::debug!("device config: {supported:?}");
        let sample_format = supported.sample_format();
        let stream_config = StreamConfig::from(supported);
        let sample_rate = stream_config.sample_rate.0 as f64;
        let channels = stream_config.channels;

        let (control, gain, receiver, gain_commands) = ControlBus::new().split();
        let renderer = BlockRenderer::new(
            SquareGenerator::new(sample_rate, receiver),
            GainAutomation::new(sample_rate, config.initial_gain, config.render_quantum),
            gain_commands,
            channels as usize,
            config.render_quantum,
        );

        let stream = match sample_format {
            SampleFormat::F32 => build_stream::<f32>(&device, &stream_config, renderer)?,
            SampleFormat::I16 => build_stream::<i16>(&device, &stream_config, renderer)?,
            SampleFormat::U16 => build_stream::<u16>(&device, &stream_config, renderer)?,
            other => return Err(SessionError::UnsupportedFormat(other)),
        };
        stream.play()?;
        log::info!("streaming at {sample_rate} Hz, {channels} channel(s)");

        Ok(Self {
            stream,
            control,
            gain,
            gain_ramp_seconds: config.gain_ramp_seconds,
            sample_rate,
            channels,
            device_name,
        })
    }

    pub fn resume(&self) -> Result<(), SessionError> {
        self.stream.play()?;
        Ok(())
    }

    pub fn suspend(&self) -> Result<(), SessionError> {
        self.stream.pause()?;
        Ok(())
    }

    pub fn close(self) {
        log::info!("closing audio session on {}", self.device_name);
        drop(self.stream);
    }

    pub fn control(&self) -> &ControlSender {
        &self.control
    }

    /// Ramp the `gain` parameter to `value`.
    pub fn set_gain(&self, value: f32) {
        let command = GainCommand::LinearRamp {
            target: value.clamp(MIN_GAIN, MAX_GAIN),
            duration_secs: self.gain_ramp_seconds,
        };
        if self.gain.send(command).is_err() {
            log::warn!("audio thread is gone; gain change dropped");
        }
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }
}

fn find_output_device(host: &cpal::Host, name: Option<&str>) -> Result<cpal::Device, SessionError> {
    match name {
        Some(search) => {
            let search_lower = search.to_lowercase();
            for device in host.output_devices()? {
                if let Ok(dev_name) = device.name() {
                    if dev_name.to_lowercase().contains(&search_lower) {
                        return Ok(device);
                    }
                }
            }
            Err(SessionError::DeviceNotFound(search.to_string()))
        }
        None => host.default_output_device().ok_or(SessionError::NoDevice),
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    config: &StreamConfig,
    mut renderer: BlockRenderer,
) -> Result<Stream, SessionError>
where
    T: Sample + SizedSample + FromSample<f32> + Send + 'static,
{
    let channels = config.channels as usize;
    let err_fn = |err| log::error!("an error occurred on the audio stream: {err}");

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            renderer.render_interleaved(data, channels);
        },
        err_fn,
        None,
    )?;

    Ok(stream)
}
