use crate::audio::delays::EchoLine;
use crate::audio::instruments::{PingGenerator, PingStatus};
use crate::audio::{to_pcm16, AudioGenerator, AudioProcessor};
use std::sync::{Arc, Mutex, MutexGuard};

/// Synthesizer shared between the device callback and whoever arms pings.
pub type SharedSynth = Arc<Mutex<Synthesizer>>;

/// Lock the shared synthesizer, recovering the guard if a holder panicked.
pub fn lock_synth(synth: &Mutex<Synthesizer>) -> MutexGuard<'_, Synthesizer> {
    synth.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// The ping fed through the echo line. One call to `next_sample` per output sample.
pub struct Synthesizer {
    ping: PingGenerator,
    echo: EchoLine,
}

impl Synthesizer {
    pub fn new(ping: PingGenerator, echo: EchoLine) -> Self {
        Self { ping, echo }
    }

    pub fn arm(&mut self) -> bool {
        self.ping.arm()
    }

    pub fn status(&self) -> PingStatus {
        self.ping.status()
    }

    pub fn ping(&self) -> &PingGenerator {
        &self.ping
    }

    pub fn echo(&self) -> &EchoLine {
        &self.echo
    }

    pub fn next_pcm(&mut self) -> i16 {
        to_pcm16(self.next_sample())
    }

    /// Render one mono PCM sample per slot.
    pub fn fill(&mut self, out: &mut [i16]) {
        for sample in out.iter_mut() {
            *sample = self.next_pcm();
        }
    }
}

impl AudioGenerator for Synthesizer {
    fn next_sample(&mut self) -> f32 {
        let dry = self.ping.next_sample();
        self.echo.process(dry)
    }
}
