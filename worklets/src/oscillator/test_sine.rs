use std::f64::consts::TAU;

use dsynth::{
    register, Error, ParameterDescriptor, ParameterSet, Params, Processor, ProcessorOptions,
};
use enum_map::Enum;

#[derive(Enum, Debug, Clone, Copy)]
pub enum TestSineParam {
    Time,
    Freq,
    Amp,
}

impl ParameterSet for TestSineParam {
    fn descriptor(self) -> ParameterDescriptor {
        match self {
            TestSineParam::Time => ParameterDescriptor::new("time", 0.0),
            TestSineParam::Freq => ParameterDescriptor::new("freq", 175.0),
            TestSineParam::Amp => ParameterDescriptor::new("amp", 1.0),
        }
    }
}

/// Stateless sine of a host-supplied clock.
///
/// Keeps no phase of its own: every frame is `sin(2π · freq · time) · amp`,
/// which makes it a reference signal for checking the host's timing.
pub struct TestSine;

impl Processor for TestSine {
    type Param = TestSineParam;

    fn new(_options: &ProcessorOptions) -> Result<Self, Error> {
        Ok(Self)
    }

    fn process(&mut self, output: &mut [f32], params: &Params<'_, TestSineParam>) -> bool {
        for (frame, sample) in output.iter_mut().enumerate() {
            let time = f64::from(params.at(TestSineParam::Time, frame));
            let freq = f64::from(params.at(TestSineParam::Freq, frame));
            let amp = params.at(TestSineParam::Amp, frame);

            *sample = (TAU * freq * time).sin() as f32 * amp;
        }

        true
    }
}

register!(TestSine, "test_sine");

#[cfg(test)]
mod tests {
    use dsynth::ParameterValues;

    use super::*;

    #[test]
    fn needs_no_options() {
        assert!(TestSine::create_node(&ProcessorOptions::default()).is_ok());
    }

    #[test]
    fn reads_the_host_clock() {
        let (mut node, _handle) = TestSine::create_node(&ProcessorOptions::default()).unwrap();
        // quarter periods of a 1 Hz tone
        let params = ParameterValues::new()
            .with("time", &[0.0, 0.25, 0.5, 0.75])
            .with("freq", &[1.0])
            .with("amp", &[2.0]);

        let mut block = [0.0; 4];
        node.process(&mut block, &params).unwrap();
        for (sample, expected) in block.iter().zip([0.0, 2.0, 0.0, -2.0]) {
            assert!((sample - expected).abs() < 1e-6);
        }
    }

    #[test]
    fn repeats_for_a_repeated_clock() {
        let (mut node, _handle) = TestSine::create_node(&ProcessorOptions::default()).unwrap();
        let params = ParameterValues::new().with("time", &[0.001]);

        let (mut first, mut second) = ([0.0; 8], [0.0; 8]);
        node.process(&mut first, &params).unwrap();
        node.process(&mut second, &params).unwrap();
        assert_eq!(first, second);
        assert!(first.iter().all(|s| *s == first[0]));
    }
}
