use dsynth::{fastrand::Rng, register, Error, NoParams, Params, Processor, ProcessorOptions};

use super::bipolar;

/// Octave stages in the stack.
pub const STAGES: usize = 10;

/// Offset subtracted from the weighted sum.
pub const BIAS: f32 = 0.999_023_437_5;

/// Octave-stacked pink noise.
///
/// Stage `i` redraws its value with probability `2^-(i+1)` each frame and is
/// weighted by `2^(i-9)`, so slow stages dominate the spectrum. Stored values
/// start at zero.
pub struct PinkNoise {
    rng: Rng,
    values: [f32; STAGES],
}

impl PinkNoise {
    fn next(&mut self) -> f32 {
        let mut probability = 0.5;
        let mut weight = 1.0 / 512.0;
        let mut sig = 0.0;

        for value in self.values.iter_mut() {
            if self.rng.f32() < probability {
                *value = bipolar(&mut self.rng);
            }
            sig += *value * weight;

            probability *= 0.5;
            weight *= 2.0;
        }

        sig - BIAS
    }
}

impl Processor for PinkNoise {
    type Param = NoParams;

    fn new(options: &ProcessorOptions) -> Result<Self, Error> {
        Ok(Self {
            rng: options.rng(),
            values: [0.0; STAGES],
        })
    }

    fn process(&mut self, output: &mut [f32], _params: &Params<'_, NoParams>) -> bool {
        for sample in output.iter_mut() {
            *sample = self.next();
        }

        true
    }
}

register!(PinkNoise, "pink_noise");

#[cfg(test)]
mod tests {
    use dsynth::ParameterValues;

    use super::*;

    #[test]
    fn bias_is_the_exact_offset() {
        assert_eq!(BIAS, 0.9990234375);
        assert_eq!(BIAS, 1.0 - 1.0 / 1024.0);
    }

    #[test]
    fn bounded_by_the_stage_weights() {
        let options = ProcessorOptions {
            seed: Some(9),
            ..ProcessorOptions::default()
        };
        let (mut node, _handle) = PinkNoise::create_node(&options).unwrap();

        // weights sum to 2 - 2^-9
        let reach = 2.0 - 1.0 / 512.0;
        let mut block = [0.0; 128];
        for _ in 0..200 {
            node.process(&mut block, &ParameterValues::new()).unwrap();
            assert!(block.iter().all(|s| (s + BIAS).abs() <= reach + 1e-6));
        }
    }

    #[test]
    fn heavy_stages_change_slowly() {
        let options = ProcessorOptions {
            seed: Some(3),
            ..ProcessorOptions::default()
        };
        let (mut node, _handle) = PinkNoise::create_node(&options).unwrap();
        let mut block = [0.0; 4_096];
        node.process(&mut block, &ParameterValues::new()).unwrap();

        // adjacent frames share most of their weight, white noise would not
        let steps = block.windows(2).map(|w| (w[1] - w[0]).abs()).sum::<f32>() / 4_095.0;
        let spread = block.iter().map(|s| (s + BIAS).abs()).sum::<f32>() / 4_096.0;
        assert!(steps < spread);
    }
}
