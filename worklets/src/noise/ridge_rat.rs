use dsynth::{
    fastrand::Rng, register, AutomationRate, Error, ParameterDescriptor, ParameterSet, Params,
    Processor, ProcessorOptions,
};
use enum_map::Enum;
use lazy_static::lazy_static;

use super::bipolar;

/// Stages in the generator.
pub const STAGES: usize = 8;

/// Relative update probability of each stage, slowest first.
const PROBABILITIES: [f64; STAGES] = [
    0.00198, 0.0108, 0.0314, 0.0766, 0.1679, 0.3243, 0.5821, 1.025,
];

/// Stage selection table shared by every instance.
#[derive(Debug)]
pub struct StageTable {
    /// Normalized cumulative probabilities; the last entry is exactly 1.
    pub cumulative: [f64; STAGES],
    /// Amplitude factor for each stage's contribution.
    pub amplitude: [f32; STAGES],
}

impl StageTable {
    fn new() -> Self {
        let total: f64 = PROBABILITIES.iter().sum();

        let mut cumulative = [0.0; STAGES];
        let mut running = 0.0;
        for (entry, probability) in cumulative.iter_mut().zip(PROBABILITIES) {
            running += probability / total;
            *entry = running;
        }
        cumulative[STAGES - 1] = 1.0;

        Self {
            cumulative,
            amplitude: [1.0; STAGES],
        }
    }

    /// First stage whose cumulative probability reaches `u` in `[0, 1)`.
    #[inline]
    pub fn select(&self, u: f64) -> usize {
        self.cumulative
            .iter()
            .position(|threshold| u <= *threshold)
            .unwrap_or(STAGES - 1)
    }
}

lazy_static! {
    pub static ref STAGE_TABLE: StageTable = StageTable::new();
}

#[derive(Enum, Debug, Clone, Copy)]
pub enum RidgeRatParam {
    Amplitude,
}

impl ParameterSet for RidgeRatParam {
    fn descriptor(self) -> ParameterDescriptor {
        match self {
            RidgeRatParam::Amplitude => ParameterDescriptor::new("amplitude", 0.1)
                .range(0.0, 1.0)
                .rate(AutomationRate::ARate),
        }
    }
}

/// Voss-McCartney style pink noise with stochastic stage selection.
///
/// Every frame exactly one stage is redrawn, chosen with the probabilities in
/// [`STAGE_TABLE`]. The running sum is updated by the difference, so each
/// frame costs one table walk and two draws.
pub struct RidgeRat {
    rng: Rng,
    contributions: [f32; STAGES],
    sum: f64,
}

impl RidgeRat {
    /// Current sum of all stage contributions.
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Current contribution of each stage.
    pub fn contributions(&self) -> &[f32; STAGES] {
        &self.contributions
    }
}

impl Processor for RidgeRat {
    type Param = RidgeRatParam;

    fn new(options: &ProcessorOptions) -> Result<Self, Error> {
        let table = &*STAGE_TABLE;
        let mut rng = options.rng();

        let mut contributions = [0.0; STAGES];
        for (contribution, factor) in contributions.iter_mut().zip(table.amplitude) {
            *contribution = bipolar(&mut rng) * factor;
        }
        let sum = contributions.iter().copied().map(f64::from).sum();

        Ok(Self {
            rng,
            contributions,
            sum,
        })
    }

    fn process(&mut self, output: &mut [f32], params: &Params<'_, RidgeRatParam>) -> bool {
        let table = &*STAGE_TABLE;

        for (frame, sample) in output.iter_mut().enumerate() {
            let amplitude = params.at(RidgeRatParam::Amplitude, frame);

            let stage = table.select(self.rng.f64());
            let next = bipolar(&mut self.rng) * table.amplitude[stage];
            self.sum += f64::from(next) - f64::from(self.contributions[stage]);
            self.contributions[stage] = next;

            *sample = self.sum as f32 * amplitude;
        }

        true
    }
}

register!(RidgeRat, "ridge-rat-pink-noise-generator");
