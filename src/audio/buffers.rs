use std::collections::TryReserveError;

/// Fixed-size circular sample buffer.
///
/// The slot under the cursor is the oldest sample, written exactly `len()` samples ago,
/// so reading before writing gives a delay of the full buffer length.
/// Storage is allocated once in `try_new` and never resized.
pub struct DelayBuffer {
    buffer: Vec<f32>,
    write_pos: usize,
}

impl DelayBuffer {
    pub fn try_new(size: usize) -> Result<Self, TryReserveError> {
        let mut buffer = Vec::new();
        buffer.try_reserve_exact(size)?;
        buffer.resize(size, 0.0);

        Ok(Self {
            buffer,
            write_pos: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn position(&self) -> usize {
        self.write_pos
    }

    /// Value stored in an absolute slot, for inspection.
    pub fn slot(&self, index: usize) -> f32 {
        self.buffer[index]
    }

    /// Oldest sample, the one the next `write` will overwrite.
    pub fn read(&self) -> f32 {
        self.buffer[self.write_pos]
    }

    pub fn advance(&mut self) {
        self.write_pos += 1;
        if self.write_pos >= self.buffer.len() {
            self.write_pos = 0;
        }
    }

    pub fn write(&mut self, value: f32) {
        self.buffer[self.write_pos] = value;
        self.advance();
    }

    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}
