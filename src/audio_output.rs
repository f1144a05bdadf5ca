use crate::audio::synth::{lock_synth, SharedSynth};
use crate::devices::{NegotiatedOutput, OutputSpec};
use crate::error::DeviceOpenError;
use cpal::{traits::*, Sample};
use log::{error, info, warn};

/// A running output stream pulling samples from the synthesizer.
pub struct AudioOutput {
    stream: cpal::Stream,
    spec: OutputSpec,
}

impl AudioOutput {
    pub fn new(output: NegotiatedOutput, synth: SharedSynth) -> Result<Self, DeviceOpenError> {
        let NegotiatedOutput { device, config, spec } = output;

        let stream = match spec.sample_format {
            cpal::SampleFormat::I16 => Self::run::<i16>(&device, &config, synth)?,
            cpal::SampleFormat::F32 => Self::run::<f32>(&device, &config, synth)?,
            cpal::SampleFormat::U16 => Self::run::<u16>(&device, &config, synth)?,
            other => return Err(DeviceOpenError::UnsupportedSampleFormat(other)),
        };

        stream.play()?;

        info!(
            "Audio device '{}' opened: {} Hz, {:?}, {} channel(s)",
            spec.device_name, spec.sample_rate, spec.sample_format, spec.channels
        );

        Ok(AudioOutput { stream, spec })
    }

    pub fn spec(&self) -> &OutputSpec {
        &self.spec
    }

    /// Stop the stream and release the device.
    pub fn close(self) {
        if let Err(e) = self.stream.pause() {
            warn!("Failed to pause audio stream: {}", e);
        }
        info!("Audio device '{}' closed", self.spec.device_name);
    }

    fn run<T>(
        device: &cpal::Device,
        config: &cpal::StreamConfig,
        synth: SharedSynth,
    ) -> Result<cpal::Stream, cpal::BuildStreamError>
    where
        T: Sample + cpal::SizedSample + cpal::FromSample<i16>,
    {
        let channels = config.channels as usize;

        let stream = device.build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                // Held for the whole buffer; arm() only ever waits this long
                let mut synth = lock_synth(&synth);

                // Mono source: same sample in every channel of the frame
                for frame in data.chunks_mut(channels) {
                    let sample = T::from_sample(synth.next_pcm());
                    for slot in frame.iter_mut() {
                        *slot = sample;
                    }
                }
            },
            |err| error!("Audio stream error: {}", err),
            None,
        )?;

        Ok(stream)
    }
}
