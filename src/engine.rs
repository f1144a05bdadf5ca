use crate::audio::delays::EchoLine;
use crate::audio::instruments::{PingGenerator, PingStatus};
use crate::audio::synth::{lock_synth, SharedSynth, Synthesizer};
use crate::audio_output::AudioOutput;
use crate::config::EngineConfig;
use crate::devices::{negotiate_output, OutputSpec};
use crate::error::EngineError;
use crate::trigger::{sweep_hits, Point, Sweep};
use log::{debug, error, info, warn};
use std::sync::{Arc, Mutex};

fn build_synth(config: &EngineConfig) -> Result<Synthesizer, EngineError> {
    let ping = PingGenerator::new(
        config.ping_duration_ms,
        config.freq_start_hz,
        config.freq_end_hz,
        config.amplitude,
        config.sample_rate,
    );
    let echo = EchoLine::new(config.echo_delay_ms, config.decay, config.sample_rate).map_err(|_| {
        EngineError::EchoAllocation {
            samples: config.echo_length_samples(),
        }
    })?;
    Ok(Synthesizer::new(ping, echo))
}

/// Arms pings from any thread. The only writer into the synthesizer from outside the
/// device callback.
#[derive(Clone)]
pub struct TriggerHandle {
    synth: SharedSynth,
}

impl TriggerHandle {
    /// Start a ping unless one is already playing. Holds the lock for a few field writes.
    pub fn arm(&self) -> bool {
        lock_synth(&self.synth).arm()
    }

    /// Run the sweep test for one simulation tick and arm at most once.
    /// Returns whether any object was touched, even if a ping was already playing.
    pub fn trigger(&self, sweep: &Sweep, positions: &[Point]) -> bool {
        if !sweep_hits(sweep, positions) {
            return false;
        }

        if self.arm() {
            debug!("Sweep hit at {:.1}°, ping armed", sweep.angle_degrees);
        }
        true
    }

    pub fn ping_status(&self) -> PingStatus {
        lock_synth(&self.synth).status()
    }
}

/// Ping engine: synthesizer state plus the output stream that drains it.
///
/// Without an open device the engine still accepts triggers and can be rendered
/// offline; it is just silent.
pub struct AudioEngine {
    config: EngineConfig,
    synth: SharedSynth,
    output: Option<AudioOutput>,
}

impl AudioEngine {
    /// Validate the config and allocate the synthesizer. Does not touch the audio device.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let synth = build_synth(&config)?;

        Ok(Self {
            config,
            synth: Arc::new(Mutex::new(synth)),
            output: None,
        })
    }

    /// `new` followed by `open`.
    pub fn init(config: EngineConfig) -> Result<Self, EngineError> {
        let mut engine = Self::new(config)?;
        engine.open()?;
        Ok(engine)
    }

    /// Open the output device and start streaming. A no-op if already open.
    /// On failure the engine stays silent but usable.
    pub fn open(&mut self) -> Result<(), EngineError> {
        if self.output.is_some() {
            return Ok(());
        }

        match self.start_output() {
            Ok(output) => {
                self.output = Some(output);
                Ok(())
            }
            Err(e) => {
                error!("{}", e);
                Err(e)
            }
        }
    }

    fn start_output(&mut self) -> Result<AudioOutput, EngineError> {
        let negotiated = negotiate_output(
            self.config.device.as_deref(),
            self.config.sample_rate,
            self.config.buffer_frames,
        )?;

        let granted = negotiated.spec.sample_rate;
        let replacement = if granted != self.config.sample_rate {
            warn!(
                "Requested {} Hz but device runs at {} Hz, rebuilding synthesizer",
                self.config.sample_rate, granted
            );
            let resampled = self.config.with_sample_rate(granted);
            resampled.validate()?;
            Some(build_synth(&resampled)?)
        } else {
            None
        };

        let synth = Arc::clone(&self.synth);
        swap_synth_for(&self.synth, replacement, move || {
            AudioOutput::new(negotiated, synth).map_err(EngineError::from)
        })
    }

    /// Stop and release the output stream. Safe to call repeatedly, or after a failed `open`.
    pub fn shutdown(&mut self) {
        if let Some(output) = self.output.take() {
            output.close();
            info!("Radar audio shut down");
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.output.is_some()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn output_spec(&self) -> Option<&OutputSpec> {
        self.output.as_ref().map(|output| output.spec())
    }

    pub fn trigger_handle(&self) -> TriggerHandle {
        TriggerHandle {
            synth: Arc::clone(&self.synth),
        }
    }

    pub fn arm(&self) -> bool {
        self.trigger_handle().arm()
    }

    /// Called once per simulation tick with the current sweep and object positions.
    pub fn trigger(&self, sweep: &Sweep, positions: &[Point]) -> bool {
        self.trigger_handle().trigger(sweep, positions)
    }

    pub fn ping_status(&self) -> PingStatus {
        lock_synth(&self.synth).status()
    }

    /// Pull PCM through the same path the device callback uses.
    ///
    /// Meant for an engine without an open device. While a stream is running, samples
    /// rendered here are taken from the same synthesizer and never reach the speaker.
    pub fn render(&self, out: &mut [i16]) {
        lock_synth(&self.synth).fill(out);
    }
}

/// Install `replacement` (if any) in `synth`, then run `start`. If `start` fails the
/// previous synthesizer is put back.
fn swap_synth_for<T>(
    synth: &SharedSynth,
    replacement: Option<Synthesizer>,
    start: impl FnOnce() -> Result<T, EngineError>,
) -> Result<T, EngineError> {
    let previous = replacement.map(|next| std::mem::replace(&mut *lock_synth(synth), next));

    start().map_err(|e| {
        if let Some(previous) = previous {
            *lock_synth(synth) = previous;
        }
        e
    })
}

impl Drop for AudioEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}
