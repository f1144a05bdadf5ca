use crate::audio::TWO_PI;

/// Phase accumulator in radians, wrapped into [0, 2π).
///
/// Frequency may change every sample without a discontinuity in the waveform,
/// which is what a pitch sweep needs.
pub struct PhaseGenerator {
    phase: f32,
    sample_rate: f32,
}

impl PhaseGenerator {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            phase: 0.0,
            sample_rate: sample_rate as f32,
        }
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Advance by one sample at `frequency` Hz and return the new phase.
    pub fn advance(&mut self, frequency: f32) -> f32 {
        self.phase += TWO_PI * frequency / self.sample_rate;

        // rem_euclid can round up to exactly 2π for tiny negative inputs
        self.phase = self.phase.rem_euclid(TWO_PI);
        if self.phase >= TWO_PI {
            self.phase = 0.0;
        }

        self.phase
    }
}
