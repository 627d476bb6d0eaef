use dsynth::{
    register, Error, ParameterDescriptor, ParameterSet, Params, Processor, ProcessorOptions,
};
use enum_map::Enum;

use super::Phase;

/// Partials in the stack.
pub const HARMONICS: usize = 6;

#[derive(Enum, Debug, Clone, Copy)]
pub enum CuteSineParam {
    Freq,
    Amp,
    Bright,
}

impl ParameterSet for CuteSineParam {
    fn descriptor(self) -> ParameterDescriptor {
        match self {
            CuteSineParam::Freq => ParameterDescriptor::new("freq", 16.0),
            CuteSineParam::Amp => ParameterDescriptor::new("amp", 0.0),
            CuteSineParam::Bright => ParameterDescriptor::new("bright", 0.0),
        }
    }
}

/// Weight of the `harmonic`th partial (1-based) at `bright` in `[0, 1]`.
///
/// Partial `k` is silent while `bright * 6 <= k - 1`, rises linearly to full
/// weight at `bright * 6 = k`, then stays there. The timbre moves continuously
/// from a sine to a six-partial sawtooth; the fundamental is always at full
/// weight.
#[inline]
pub fn harmonic_weight(bright: f32, harmonic: usize) -> f32 {
    if harmonic <= 1 {
        return 1.0;
    }

    let level = bright * HARMONICS as f32;
    (level - (harmonic - 1) as f32).clamp(0.0, 1.0)
}

/// Band-limited additive oscillator with a brightness control.
pub struct CuteSine {
    phase: Phase,
}

impl Processor for CuteSine {
    type Param = CuteSineParam;

    fn new(options: &ProcessorOptions) -> Result<Self, Error> {
        let mut rng = options.rng();
        Ok(Self {
            phase: Phase::new(options, &mut rng)?,
        })
    }

    fn process(&mut self, output: &mut [f32], params: &Params<'_, CuteSineParam>) -> bool {
        for (frame, sample) in output.iter_mut().enumerate() {
            let freq = params.at(CuteSineParam::Freq, frame);
            let amp = params.at(CuteSineParam::Amp, frame);
            let bright = params.at(CuteSineParam::Bright, frame);

            let mut sig = 0.0;
            for harmonic in 1..=HARMONICS {
                let partial = (self.phase.radians() * harmonic as f64).sin() as f32;
                sig += partial * (amp / harmonic as f32) * harmonic_weight(bright, harmonic);
            }

            *sample = sig;
            self.phase.advance(freq);
        }

        true
    }
}

register!(CuteSine, "cute_sine");
