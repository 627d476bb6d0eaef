use dsynth::{fastrand::Rng, register, Error, NoParams, Params, Processor, ProcessorOptions};

use super::bipolar;

/// Uniform white noise in `[-1, 1)`.
pub struct WhiteNoise {
    rng: Rng,
}

impl Processor for WhiteNoise {
    type Param = NoParams;

    fn new(options: &ProcessorOptions) -> Result<Self, Error> {
        Ok(Self { rng: options.rng() })
    }

    fn process(&mut self, output: &mut [f32], _params: &Params<'_, NoParams>) -> bool {
        for sample in output.iter_mut() {
            *sample = bipolar(&mut self.rng);
        }

        true
    }
}

register!(WhiteNoise, "white_noise");

#[cfg(test)]
mod tests {
    use dsynth::ParameterValues;

    use super::*;

    fn seeded(seed: u64) -> ProcessorOptions {
        ProcessorOptions {
            seed: Some(seed),
            ..ProcessorOptions::default()
        }
    }

    #[test]
    fn stays_in_range() {
        let (mut node, _handle) = WhiteNoise::create_node(&seeded(1)).unwrap();
        let mut block = [0.0; 128];
        for _ in 0..100 {
            assert_eq!(node.process(&mut block, &ParameterValues::new()), Ok(true));
            assert!(block.iter().all(|s| (-1.0..1.0).contains(s)));
        }
    }

    #[test]
    fn seed_reproduces_the_stream() {
        let (mut a, _ha) = WhiteNoise::create_node(&seeded(42)).unwrap();
        let (mut b, _hb) = WhiteNoise::create_node(&seeded(42)).unwrap();
        let (mut c, _hc) = WhiteNoise::create_node(&seeded(43)).unwrap();

        let (mut left, mut right, mut other) = ([0.0; 128], [0.0; 128], [0.0; 128]);
        let params = ParameterValues::new();
        a.process(&mut left, &params).unwrap();
        b.process(&mut right, &params).unwrap();
        c.process(&mut other, &params).unwrap();

        assert_eq!(left, right);
        assert_ne!(left, other);
    }
}
