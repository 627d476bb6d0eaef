use dsynth::{
    register, Error, ParameterDescriptor, ParameterSet, Params, Processor, ProcessorOptions,
};
use enum_map::Enum;

use super::Phase;

#[derive(Enum, Debug, Clone, Copy)]
pub enum SineParam {
    Freq,
    Amp,
}

impl ParameterSet for SineParam {
    fn descriptor(self) -> ParameterDescriptor {
        match self {
            SineParam::Freq => ParameterDescriptor::new("freq", 16.0),
            SineParam::Amp => ParameterDescriptor::new("amp", 0.0),
        }
    }
}

/// Pure sine.
pub struct Sine {
    phase: Phase,
}

impl Sine {
    pub fn phase(&self) -> f64 {
        self.phase.value()
    }
}

impl Processor for Sine {
    type Param = SineParam;

    fn new(options: &ProcessorOptions) -> Result<Self, Error> {
        let mut rng = options.rng();
        Ok(Self {
            phase: Phase::new(options, &mut rng)?,
        })
    }

    fn process(&mut self, output: &mut [f32], params: &Params<'_, SineParam>) -> bool {
        for (frame, sample) in output.iter_mut().enumerate() {
            let freq = params.at(SineParam::Freq, frame);
            let amp = params.at(SineParam::Amp, frame);

            *sample = self.phase.radians().sin() as f32 * amp;
            self.phase.advance(freq);
        }

        true
    }
}

register!(Sine, "worklet_sine");

#[cfg(test)]
mod tests {
    use std::f64::consts::TAU;

    use dsynth::ParameterValues;

    use super::*;

    #[test]
    fn follows_sin_of_phase() {
        let options = ProcessorOptions {
            initial_phase: Some(0.0),
            ..ProcessorOptions::with_sample_rate(48_000.0)
        };
        let (mut node, _handle) = Sine::create_node(&options).unwrap();
        let params = ParameterValues::new()
            .with("freq", &[1_000.0])
            .with("amp", &[1.0]);

        let mut block = [0.0; 128];
        for block_index in 0..4 {
            node.process(&mut block, &params).unwrap();
            for (frame, sample) in block.iter().enumerate() {
                let elapsed = (block_index * 128 + frame) as f64;
                let expected = (TAU * (elapsed * 1_000.0 / 48_000.0).fract()).sin();
                assert!((f64::from(*sample) - expected).abs() < 1e-5);
            }
        }
        assert!((0.0..1.0).contains(&node.processor().phase()));
    }

    #[test]
    fn amplitude_scales_per_frame() {
        let options = ProcessorOptions {
            initial_phase: Some(0.25),
            ..ProcessorOptions::with_sample_rate(48_000.0)
        };
        let (mut node, _handle) = Sine::create_node(&options).unwrap();
        let params = ParameterValues::new()
            .with("freq", &[0.0])
            .with("amp", &[0.0, 0.5, 1.0, -1.0]);

        let mut block = [0.0; 4];
        node.process(&mut block, &params).unwrap();
        assert_eq!(block, [0.0, 0.5, 1.0, -1.0]);
    }

    #[test]
    fn defaults_are_silent() {
        let options = ProcessorOptions::with_sample_rate(48_000.0);
        let (mut node, _handle) = Sine::create_node(&options).unwrap();
        let mut block = [1.0; 128];
        assert_eq!(node.process(&mut block, &ParameterValues::new()), Ok(true));
        assert!(block.iter().all(|sample| *sample == 0.0));
    }
}
