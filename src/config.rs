use crate::audio::{ms_to_samples, DEFAULT_SAMPLE_RATE};
use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fixed settings for one engine instance. Missing JSON fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub sample_rate: u32,
    /// Peak value in 16-bit PCM units.
    pub amplitude: f32,
    pub ping_duration_ms: f32,
    pub freq_start_hz: f32,
    pub freq_end_hz: f32,
    pub echo_delay_ms: f32,
    /// Echo feedback gain, 0.0 <= decay < 1.0
    pub decay: f32,
    /// Output device name; `None` uses the host default.
    pub device: Option<String>,
    /// Fixed stream buffer size in frames; `None` lets the host pick.
    pub buffer_frames: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            amplitude: 30000.0,
            ping_duration_ms: 250.0,
            freq_start_hz: 1200.0,
            freq_end_hz: 800.0,
            echo_delay_ms: 120.0,
            decay: 0.5,
            device: None,
            buffer_frames: None,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Same settings at a different sample rate, e.g. the one the device actually granted.
    pub fn with_sample_rate(&self, sample_rate: u32) -> Self {
        Self {
            sample_rate,
            ..self.clone()
        }
    }

    pub fn ping_length_samples(&self) -> usize {
        ms_to_samples(self.ping_duration_ms, self.sample_rate)
    }

    pub fn echo_length_samples(&self) -> usize {
        ms_to_samples(self.echo_delay_ms, self.sample_rate)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.sample_rate == 0 {
            return Err(invalid("sample_rate must be positive"));
        }
        if !self.amplitude.is_finite() || self.amplitude < 0.0 {
            return Err(invalid(format!("amplitude {} must be finite and >= 0", self.amplitude)));
        }
        for (name, freq) in [("freq_start_hz", self.freq_start_hz), ("freq_end_hz", self.freq_end_hz)] {
            if !freq.is_finite() || freq <= 0.0 {
                return Err(invalid(format!("{} {} must be a positive frequency", name, freq)));
            }
        }
        if !(0.0..1.0).contains(&self.decay) {
            return Err(invalid(format!("decay {} must be in [0, 1)", self.decay)));
        }
        if self.ping_length_samples() == 0 {
            return Err(invalid(format!(
                "ping_duration_ms {} is shorter than one sample",
                self.ping_duration_ms
            )));
        }
        if self.echo_length_samples() == 0 {
            return Err(invalid(format!(
                "echo_delay_ms {} is shorter than one sample",
                self.echo_delay_ms
            )));
        }
        if self.buffer_frames == Some(0) {
            return Err(invalid("buffer_frames must be positive"));
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> EngineError {
    EngineError::InvalidConfig(message.into())
}
