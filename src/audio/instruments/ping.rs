use crate::audio::oscillators::PhaseGenerator;
use crate::audio::{ms_to_samples, AudioGenerator};

/// Point-in-time view of the ping state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PingStatus {
    pub playing: bool,
    pub samples_left: usize,
    pub length_samples: usize,
}

/// Sonar ping: a sine burst whose pitch glides linearly from `freq_start` to `freq_end`.
///
/// Idle until `arm()`, then plays exactly `length_samples` samples and goes idle again.
/// Arming while a ping is in flight does nothing, so pings never restart or stack.
pub struct PingGenerator {
    phase: PhaseGenerator,
    playing: bool,
    samples_left: usize,
    length_samples: usize,
    freq_start: f32,
    freq_end: f32,
    amplitude: f32,
}

impl PingGenerator {
    pub fn new(
        duration_ms: f32,
        freq_start: f32,
        freq_end: f32,
        amplitude: f32,
        sample_rate: u32,
    ) -> Self {
        // At least one sample, so an armed ping always has something left to play
        let length_samples = ms_to_samples(duration_ms, sample_rate).max(1);

        Self {
            phase: PhaseGenerator::new(sample_rate),
            playing: false,
            samples_left: 0,
            length_samples,
            freq_start,
            freq_end,
            amplitude,
        }
    }

    /// Start a ping if idle. Returns whether a new ping was started.
    pub fn arm(&mut self) -> bool {
        if self.playing {
            return false;
        }

        self.playing = true;
        self.phase.reset();
        self.samples_left = self.length_samples;
        true
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn samples_left(&self) -> usize {
        self.samples_left
    }

    pub fn length_samples(&self) -> usize {
        self.length_samples
    }

    pub fn phase(&self) -> f32 {
        self.phase.phase()
    }

    pub fn status(&self) -> PingStatus {
        PingStatus {
            playing: self.playing,
            samples_left: self.samples_left,
            length_samples: self.length_samples,
        }
    }

    /// Frequency the next sample will be rendered at.
    /// Reads as `freq_end` once the ping has run out.
    pub fn current_frequency(&self) -> f32 {
        let elapsed = self.length_samples - self.samples_left;
        let progress = elapsed as f32 / self.length_samples as f32;
        self.freq_start + progress * (self.freq_end - self.freq_start)
    }
}

impl AudioGenerator for PingGenerator {
    fn next_sample(&mut self) -> f32 {
        if !self.playing {
            return 0.0;
        }

        let frequency = self.current_frequency();
        let phase = self.phase.advance(frequency);
        let sample = self.amplitude * phase.sin();

        self.samples_left -= 1;
        if self.samples_left == 0 {
            self.playing = false;
        }

        sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::TWO_PI;

    fn make_ping(duration_ms: f32, sample_rate: u32) -> PingGenerator {
        PingGenerator::new(duration_ms, 1200.0, 800.0, 30000.0, sample_rate)
    }

    #[test]
    fn test_ping_starts_idle_and_silent() {
        let mut ping = make_ping(250.0, 44100);
        assert!(!ping.is_playing());
        assert_eq!(ping.samples_left(), 0);
        for _ in 0..1000 {
            assert_eq!(ping.next_sample(), 0.0);
        }
        assert_eq!(ping.phase(), 0.0, "idle generator must not move its phase");
    }

    #[test]
    fn test_arm_sets_full_length() {
        let mut ping = make_ping(250.0, 44100);
        assert!(ping.arm());
        assert!(ping.is_playing());
        assert_eq!(ping.samples_left(), 11025);
        assert_eq!(ping.phase(), 0.0);
    }

    #[test]
    fn test_arm_length_matches_rounded_duration() {
        let cases = [(250.0, 44100), (250.0, 22050), (10.0, 48000), (1.0, 8000), (333.3, 44100)];
        for (duration_ms, sample_rate) in cases {
            let mut ping = make_ping(duration_ms, sample_rate);
            ping.arm();
            let expected = (duration_ms as f64 * sample_rate as f64 / 1000.0).round() as usize;
            assert_eq!(
                ping.samples_left(),
                expected,
                "{} ms at {} Hz",
                duration_ms,
                sample_rate
            );
        }
    }

    #[test]
    fn test_arm_while_playing_is_noop() {
        let mut ping = make_ping(250.0, 44100);
        ping.arm();
        for _ in 0..500 {
            ping.next_sample();
        }
        let left = ping.samples_left();
        let phase = ping.phase();

        assert!(!ping.arm(), "second arm must not restart the ping");
        assert_eq!(ping.samples_left(), left);
        assert_eq!(ping.phase(), phase);
    }

    #[test]
    fn test_ping_plays_exact_length_then_idles() {
        let mut ping = make_ping(10.0, 8000); // 80 samples
        ping.arm();

        let mut produced = 0;
        while ping.is_playing() {
            ping.next_sample();
            produced += 1;
            assert!(produced <= 80, "ping overran its length");
        }

        assert_eq!(produced, 80);
        assert_eq!(ping.samples_left(), 0);
        assert_eq!(ping.next_sample(), 0.0);
    }

    #[test]
    fn test_rearm_after_finish() {
        let mut ping = make_ping(1.0, 8000);
        ping.arm();
        while ping.is_playing() {
            ping.next_sample();
        }
        assert!(ping.arm());
        assert_eq!(ping.samples_left(), 8);
        assert_eq!(ping.phase(), 0.0);
    }

    #[test]
    fn test_frequency_sweeps_within_bounds() {
        for (start, end) in [(1200.0f32, 800.0f32), (400.0, 2000.0)] {
            let mut ping = PingGenerator::new(50.0, start, end, 1.0, 44100);
            ping.arm();

            let (low, high) = (start.min(end), start.max(end));
            assert_eq!(ping.current_frequency(), start, "first sample must sit at freq_start");

            let mut previous = ping.current_frequency();
            while ping.is_playing() {
                let freq = ping.current_frequency();
                assert!(freq >= low && freq <= high, "frequency {} left [{}, {}]", freq, low, high);
                if end > start {
                    assert!(freq >= previous, "rising sweep went down");
                } else {
                    assert!(freq <= previous, "falling sweep went up");
                }
                previous = freq;
                ping.next_sample();
            }

            // Last rendered sample sits one step short of freq_end
            let step = (end - start).abs() / ping.length_samples() as f32;
            assert!((previous - end).abs() <= step * 1.01 + 1e-3);
        }
    }

    #[test]
    fn test_first_sample_uses_start_frequency() {
        let sample_rate = 44100;
        let mut ping = PingGenerator::new(100.0, 1000.0, 500.0, 10000.0, sample_rate);
        ping.arm();

        let sample = ping.next_sample();
        let expected_phase = TWO_PI * 1000.0 / sample_rate as f32;
        assert!((ping.phase() - expected_phase).abs() < 1e-6);
        assert!((sample - 10000.0 * expected_phase.sin()).abs() < 1e-2);
    }

    #[test]
    fn test_output_bounded_by_amplitude() {
        let mut ping = PingGenerator::new(250.0, 1200.0, 800.0, 30000.0, 44100);
        ping.arm();
        let mut peak = 0.0f32;
        while ping.is_playing() {
            let sample = ping.next_sample();
            assert!(sample.abs() <= 30000.0 + 1e-2);
            assert!(ping.phase() >= 0.0 && ping.phase() < TWO_PI);
            peak = peak.max(sample.abs());
        }
        assert!(peak > 29000.0, "sine should reach close to full amplitude, got {}", peak);
    }

    #[test]
    fn test_zero_duration_plays_one_sample() {
        let mut ping = make_ping(0.0, 44100);
        assert_eq!(ping.length_samples(), 1);

        assert!(ping.arm());
        let status = ping.status();
        assert!(status.playing);
        assert_eq!(status.samples_left, 1);

        let sample = ping.next_sample();
        assert!(sample.is_finite());
        assert!(!ping.is_playing());
        assert_eq!(ping.samples_left(), 0);
        assert_eq!(ping.next_sample(), 0.0);
    }

    #[test]
    fn test_status_tracks_playing_invariant() {
        let mut ping = make_ping(5.0, 8000);
        ping.arm();
        loop {
            let status = ping.status();
            assert_eq!(status.playing, status.samples_left > 0);
            assert!(status.samples_left <= status.length_samples);
            if !status.playing {
                break;
            }
            ping.next_sample();
        }
    }
}
