//! Synthetic signals
//!
//! Waveform generators used to feed a [`DataContainer`] in the demo binary,
//! in tests and in benches.
//!
//! # Patterns
//!
//! - [`SignalPattern::Constant`] - Fixed value
//! - [`SignalPattern::Sine`] - Sinusoid with frequency, amplitude and offset
//! - [`SignalPattern::Counter`] - Incrementing counter with wrap-around
//! - [`SignalPattern::Random`] - Uniform noise within a range
//! - [`SignalPattern::Sawtooth`] - Linear ramp that resets periodically
//! - [`SignalPattern::Square`] - Square wave, handy for digital signal curves
//! - [`SignalPattern::Triangle`] - Triangle wave

use super::DataContainer;
use crate::error::{Result, ResultExt};

/// Waveform of a synthetic signal
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SignalPattern {
    Constant(f64),
    Sine {
        frequency: f64,
        amplitude: f64,
        offset: f64,
    },
    Counter { step: f64, min: f64, max: f64 },
    Random { min: f64, max: f64 },
    Sawtooth { period: f64, amplitude: f64 },
    Square { period: f64, amplitude: f64 },
    Triangle { period: f64, amplitude: f64 },
}

impl Default for SignalPattern {
    fn default() -> Self {
        SignalPattern::Sine {
            frequency: 1.0,
            amplitude: 1.0,
            offset: 0.0,
        }
    }
}

/// Stateful sample generator for one signal
#[derive(Debug, Clone)]
pub struct SignalGenerator {
    pub pattern: SignalPattern,
    /// Noise amplitude to add (0.0 = no noise)
    pub noise_amplitude: f64,
    counter_value: f64,
    seed: u64,
}

impl SignalGenerator {
    pub fn new(pattern: SignalPattern) -> Self {
        Self {
            pattern,
            noise_amplitude: 0.0,
            counter_value: 0.0,
            seed: 12345,
        }
    }

    /// Add noise to the generated values
    pub fn with_noise(mut self, amplitude: f64) -> Self {
        self.noise_amplitude = amplitude;
        self
    }

    /// Reseed the noise source so different signals decorrelate
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed.max(1);
        self
    }

    /// Generate the sample at time `t`
    pub fn sample(&mut self, t: f64) -> f64 {
        let base = match self.pattern {
            SignalPattern::Constant(v) => v,
            SignalPattern::Sine {
                frequency,
                amplitude,
                offset,
            } => offset + amplitude * (2.0 * std::f64::consts::PI * frequency * t).sin(),
            SignalPattern::Counter { step, min, max } => {
                self.counter_value += step;
                if self.counter_value > max {
                    self.counter_value = min;
                } else if self.counter_value < min {
                    self.counter_value = max;
                }
                self.counter_value
            }
            SignalPattern::Random { min, max } => min + self.next_random() * (max - min),
            SignalPattern::Sawtooth { period, amplitude } => {
                let phase = t.rem_euclid(period);
                amplitude * (phase / period)
            }
            SignalPattern::Square { period, amplitude } => {
                if t.rem_euclid(period) < period / 2.0 {
                    amplitude
                } else {
                    0.0
                }
            }
            SignalPattern::Triangle { period, amplitude } => {
                let phase = t.rem_euclid(period);
                let half = period / 2.0;
                if phase < half {
                    amplitude * (2.0 * phase / half - 1.0)
                } else {
                    amplitude * (1.0 - 2.0 * (phase - half) / half)
                }
            }
        };

        if self.noise_amplitude > 0.0 {
            base + (self.next_random() - 0.5) * 2.0 * self.noise_amplitude
        } else {
            base
        }
    }

    /// xorshift64, uniform in `[0, 1]`
    fn next_random(&mut self) -> f64 {
        let mut s = self.seed;
        s ^= s << 13;
        s ^= s >> 7;
        s ^= s << 17;
        self.seed = s;
        (s as f64) / (u64::MAX as f64)
    }
}

/// Fill `container` with `count` samples per row at a fixed step, one generator per row
pub fn fill_container(
    container: &mut DataContainer,
    generators: &mut [SignalGenerator],
    start: f64,
    dt: f64,
    count: usize,
) -> Result<()> {
    let mut frame = vec![0.0f32; generators.len()];
    for i in 0..count {
        let t = start + i as f64 * dt;
        for (slot, generator) in frame.iter_mut().zip(generators.iter_mut()) {
            *slot = generator.sample(t) as f32;
        }
        container
            .insert_values_at_end(&frame, t)
            .with_context(|| format!("generated sample {} at t = {}", i, t))?;
    }
    Ok(())
}
