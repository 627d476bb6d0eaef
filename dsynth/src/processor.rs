use std::sync::Arc;

use fastrand::Rng;
use serde::{Deserialize, Serialize};

use crate::{buffer::Params, error::Error, parameter::ParameterSet};

/// The `Processor` trait defines the interface for audio generation units.
///
/// A processor is created once, then called once per block on the audio
/// thread. `process` must not block, lock or allocate.
pub trait Processor: 'static + Send {
    /// Parameters this processor declares.
    type Param: ParameterSet;

    /// Creates a new instance from the host's construction options.
    fn new(options: &ProcessorOptions) -> Result<Self, Error>
    where
        Self: Sized;

    /// Renders one block into `output`.
    ///
    /// Returns the liveness flag; `false` retires the processor for good.
    fn process(&mut self, output: &mut [f32], params: &Params<'_, Self::Param>) -> bool;

    /// Answers an out-of-band request from the host.
    fn on_command(&mut self, _command: Command) -> Option<Event> {
        None
    }
}

/// Requests sent from the host to a processor.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Ask for the current playback position.
    #[serde(rename = "get_phase")]
    GetPhase,
}

/// Replies sent from a processor back to the host.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// Fraction of the buffer traversed, in `[0, 1]`.
    Phase(f32),
}

/// Construction options for a processor.
///
/// Every field is optional at the boundary; processors ask for what they need
/// through the accessors, which reject missing or unusable values.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct ProcessorOptions {
    /// Sample rate of the rendering context, in Hz.
    pub sample_rate: Option<f32>,
    /// Static audio buffer for sample playback.
    pub audio_data: Option<Arc<[f32]>>,
    /// Seed for the processor's random stream.
    pub seed: Option<u64>,
    /// Starting oscillator phase in `[0, 1)`; random when absent.
    pub initial_phase: Option<f64>,
}

impl ProcessorOptions {
    /// Options with only a sample rate set.
    pub fn with_sample_rate(sample_rate: f32) -> Self {
        Self {
            sample_rate: Some(sample_rate),
            ..Self::default()
        }
    }

    /// Parses options from the JSON object a host passes as `processorOptions`.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// The sample rate, which must be positive and finite.
    pub fn sample_rate(&self) -> Result<f32, Error> {
        match self.sample_rate {
            None => Err(Error::MissingOption("sample_rate")),
            Some(rate) if rate.is_finite() && rate > 0.0 => Ok(rate),
            Some(_) => Err(Error::InvalidOption {
                name: "sample_rate",
                reason: "must be positive and finite",
            }),
        }
    }

    /// The shared audio buffer, which must not be empty.
    pub fn audio_data(&self) -> Result<Arc<[f32]>, Error> {
        match &self.audio_data {
            None => Err(Error::MissingOption("audio_data")),
            Some(data) if data.is_empty() => Err(Error::InvalidOption {
                name: "audio_data",
                reason: "must hold at least one sample",
            }),
            Some(data) => Ok(Arc::clone(data)),
        }
    }

    /// A fresh random stream, seeded when a seed was given.
    pub fn rng(&self) -> Rng {
        match self.seed {
            Some(seed) => Rng::with_seed(seed),
            None => Rng::new(),
        }
    }

    /// The starting phase, drawn from `rng` when none was given.
    pub fn initial_phase(&self, rng: &mut Rng) -> Result<f64, Error> {
        match self.initial_phase {
            None => Ok(rng.f64()),
            Some(phase) if (0.0..1.0).contains(&phase) => Ok(phase),
            Some(_) => Err(Error::InvalidOption {
                name: "initial_phase",
                reason: "must be in [0, 1)",
            }),
        }
    }
}
