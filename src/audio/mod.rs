pub mod buffers;
pub mod delays;
pub mod instruments;
pub mod oscillators;
pub mod synth;

pub const PI: f32 = std::f32::consts::PI;
pub const TWO_PI: f32 = 2.0 * PI;

pub const DEFAULT_SAMPLE_RATE: u32 = 44100;

// Basic trait for audio generators that produce a single sample output
pub trait AudioGenerator {
    fn next_sample(&mut self) -> f32;
}

pub trait AudioProcessor {
    fn process(&mut self, input: f32) -> f32;
}

/// Convert a duration in milliseconds to a whole number of samples, rounded to nearest.
pub fn ms_to_samples(ms: f32, sample_rate: u32) -> usize {
    let samples = (ms as f64) * (sample_rate as f64) / 1000.0;
    if samples.is_finite() && samples > 0.0 {
        samples.round() as usize
    } else {
        0
    }
}

/// Saturating conversion of a sample in PCM units to signed 16-bit.
pub fn to_pcm16(sample: f32) -> i16 {
    if sample.is_finite() {
        sample.round().clamp(i16::MIN as f32, i16::MAX as f32) as i16
    } else {
        0
    }
}
