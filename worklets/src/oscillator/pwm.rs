use dsynth::{
    register, Error, ParameterDescriptor, ParameterSet, Params, Processor, ProcessorOptions,
};
use enum_map::Enum;

use super::Phase;

#[derive(Enum, Debug, Clone, Copy)]
pub enum PwmParam {
    Freq,
    DutyCycle,
}

impl ParameterSet for PwmParam {
    fn descriptor(self) -> ParameterDescriptor {
        match self {
            PwmParam::Freq => ParameterDescriptor::new("freq", 220.0),
            PwmParam::DutyCycle => ParameterDescriptor::new("duty_cycle", 0.5),
        }
    }
}

/// Pulse-width-modulated square: high while the phase is below the duty cycle.
///
/// The duty cycle is used as delivered; values outside `[0, 1]` pin the output
/// high or low.
pub struct Pwm {
    phase: Phase,
}

impl Processor for Pwm {
    type Param = PwmParam;

    fn new(options: &ProcessorOptions) -> Result<Self, Error> {
        let mut rng = options.rng();
        Ok(Self {
            phase: Phase::new(options, &mut rng)?,
        })
    }

    fn process(&mut self, output: &mut [f32], params: &Params<'_, PwmParam>) -> bool {
        for (frame, sample) in output.iter_mut().enumerate() {
            let freq = params.at(PwmParam::Freq, frame);
            let duty_cycle = params.at(PwmParam::DutyCycle, frame);

            *sample = if self.phase.value() < f64::from(duty_cycle) {
                1.0
            } else {
                -1.0
            };
            self.phase.advance(freq);
        }

        true
    }
}

register!(Pwm, "pwm");
