//! Output device enumeration and stream negotiation

use crate::error::DeviceOpenError;
use cpal::traits::{DeviceTrait, HostTrait};
use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioDeviceInfo {
    pub name: String,
    pub is_default: bool,
}

/// What the device actually granted.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSpec {
    pub device_name: String,
    pub sample_rate: u32,
    pub channels: u16,
    pub sample_format: cpal::SampleFormat,
}

/// A device plus the stream config agreed with it, ready to build a stream from.
pub struct NegotiatedOutput {
    pub device: cpal::Device,
    pub config: cpal::StreamConfig,
    pub spec: OutputSpec,
}

/// Get list of available output devices
pub fn list_output_devices() -> Result<Vec<AudioDeviceInfo>, DeviceOpenError> {
    let host = cpal::default_host();
    let default_name = host.default_output_device().and_then(|d| d.name().ok());

    let mut result = Vec::new();
    for device in host.output_devices()? {
        if let Ok(name) = device.name() {
            result.push(AudioDeviceInfo {
                is_default: Some(&name) == default_name.as_ref(),
                name,
            });
        }
    }

    Ok(result)
}

/// Get output device by name, or default if name is None
pub fn get_output_device(name: Option<&str>) -> Result<cpal::Device, DeviceOpenError> {
    let host = cpal::default_host();

    match name {
        Some(device_name) => {
            for device in host.output_devices()? {
                if let Ok(n) = device.name() {
                    if n == device_name {
                        return Ok(device);
                    }
                }
            }
            Err(DeviceOpenError::DeviceNotFound(device_name.to_string()))
        }
        None => host
            .default_output_device()
            .ok_or(DeviceOpenError::NoOutputDevice),
    }
}

/// First supported range offering mono signed 16-bit at `sample_rate`.
pub fn find_mono_i16(
    ranges: impl IntoIterator<Item = cpal::SupportedStreamConfigRange>,
    sample_rate: u32,
) -> Option<cpal::SupportedStreamConfigRange> {
    ranges.into_iter().find(|range| {
        range.channels() == 1
            && range.sample_format() == cpal::SampleFormat::I16
            && range.min_sample_rate().0 <= sample_rate
            && sample_rate <= range.max_sample_rate().0
    })
}

fn buffer_size(buffer_frames: Option<u32>) -> cpal::BufferSize {
    match buffer_frames {
        Some(frames) => cpal::BufferSize::Fixed(frames),
        None => cpal::BufferSize::Default,
    }
}

/// Open the named (or default) device and agree on a stream config.
///
/// Mono i16 at the requested rate is preferred. Devices that cannot do that get their
/// default config, and the caller has to render at whatever rate that carries.
pub fn negotiate_output(
    device_name: Option<&str>,
    sample_rate: u32,
    buffer_frames: Option<u32>,
) -> Result<NegotiatedOutput, DeviceOpenError> {
    let device = get_output_device(device_name)?;
    let name = device.name()?;

    let (config, sample_format) = match find_mono_i16(device.supported_output_configs()?, sample_rate) {
        Some(range) => {
            let supported = range.with_sample_rate(cpal::SampleRate(sample_rate));
            (supported.config(), supported.sample_format())
        }
        None => {
            let default_config = device.default_output_config()?;
            warn!(
                "'{}' has no mono i16 output at {} Hz, using its default {:?} x{} at {} Hz",
                name,
                sample_rate,
                default_config.sample_format(),
                default_config.channels(),
                default_config.sample_rate().0
            );
            (default_config.config(), default_config.sample_format())
        }
    };

    let config = cpal::StreamConfig {
        buffer_size: buffer_size(buffer_frames),
        ..config
    };

    let spec = OutputSpec {
        device_name: name,
        sample_rate: config.sample_rate.0,
        channels: config.channels,
        sample_format,
    };

    Ok(NegotiatedOutput { device, config, spec })
}
