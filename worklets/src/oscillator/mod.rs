/*
Phase-accumulator oscillators
=============================

Every oscillator here keeps a phase in [0, 1) and advances it by
`freq / sample_rate` each frame. Instances start at a random phase so that
several copies of the same worklet running on different devices (or in the
same graph) do not sum in lockstep.

  worklet_sine  pure sine
  cute_sine     six-harmonic additive stack, `bright` morphs sine -> saw
  pwm           bistable pulse, `duty_cycle` is the high fraction
  mangrove      asymmetric ramp whose reset waits for a full cycle
  test_sine     stateless sine of a host-supplied `time`
*/

use std::f64::consts::TAU;

use dsynth::{fastrand::Rng, Error, ProcessorOptions};

pub mod cute_sine;
pub mod mangrove;
pub mod pwm;
pub mod sine;
pub mod test_sine;

/// Phase accumulator in `[0, 1)`.
#[derive(Debug, Clone, Copy)]
pub struct Phase {
    value: f64,
    /// `1 / sample_rate`, fixed at construction.
    increment: f64,
}

impl Phase {
    /// Accumulator for the options' sample rate, starting at the requested
    /// phase or a random one.
    pub fn new(options: &ProcessorOptions, rng: &mut Rng) -> Result<Self, Error> {
        let sample_rate = options.sample_rate()?;
        Ok(Self {
            value: options.initial_phase(rng)?,
            increment: 1.0 / f64::from(sample_rate),
        })
    }

    /// Current phase.
    #[inline]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Current phase in radians.
    #[inline]
    pub fn radians(&self) -> f64 {
        TAU * self.value
    }

    /// Steps one frame at `freq` Hz.
    #[inline]
    pub fn advance(&mut self, freq: f32) {
        let next = (self.value + self.increment * f64::from(freq)).rem_euclid(1.0);
        // rem_euclid rounds tiny negative values up to exactly 1.0
        self.value = if next < 1.0 { next } else { 0.0 };
    }
}
