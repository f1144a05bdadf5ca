use crate::audio::buffers::DelayBuffer;
use crate::audio::{ms_to_samples, AudioProcessor};
use std::collections::TryReserveError;

/// Feedback echo: every slot keeps the decayed history of everything that passed through it.
///
/// The line knows nothing about what feeds it, so echoes keep ringing after the source
/// goes quiet. `decay` must stay below 1.0 or the feedback grows without bound.
pub struct EchoLine {
    buffer: DelayBuffer,
    decay: f32,
}

impl EchoLine {
    pub fn new(delay_ms: f32, decay: f32, sample_rate: u32) -> Result<Self, TryReserveError> {
        Self::with_len(ms_to_samples(delay_ms, sample_rate), decay)
    }

    /// `len` is raised to one slot if zero.
    pub fn with_len(len: usize, decay: f32) -> Result<Self, TryReserveError> {
        debug_assert!((0.0..1.0).contains(&decay), "decay must be in [0, 1)");

        Ok(Self {
            buffer: DelayBuffer::try_new(len.max(1))?,
            decay,
        })
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn position(&self) -> usize {
        self.buffer.position()
    }

    pub fn decay(&self) -> f32 {
        self.decay
    }

    pub fn slot(&self, index: usize) -> f32 {
        self.buffer.slot(index)
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl AudioProcessor for EchoLine {
    fn process(&mut self, dry: f32) -> f32 {
        let echo = self.buffer.read();
        let wet = dry + self.decay * echo;
        self.buffer.write(wet);
        wet
    }
}
