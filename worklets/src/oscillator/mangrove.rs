use dsynth::{
    register, Error, ParameterDescriptor, ParameterSet, Params, Processor, ProcessorOptions,
};
use enum_map::Enum;

#[derive(Enum, Debug, Clone, Copy)]
pub enum MangroveParam {
    Freq,
    DutyCycle,
}

impl ParameterSet for MangroveParam {
    fn descriptor(self) -> ParameterDescriptor {
        match self {
            // a semitone above 428 Hz
            MangroveParam::Freq => ParameterDescriptor::new("freq", 453.450_2),
            MangroveParam::DutyCycle => ParameterDescriptor::new("duty_cycle", 0.5),
        }
    }
}

/// Position of the peak for a duty cycle in `[0, 1]`.
///
/// Runs from 0 at duty 0 through 0.75 at duty 0.5 to 3.75 at duty 1, so high
/// duty cycles stretch the ramp over several reference cycles.
#[inline]
pub fn apex(duty_cycle: f32) -> f64 {
    (4f64.powf(2.0 * f64::from(duty_cycle)) - 1.0) / 4.0
}

/// Shaped value at `phase`, and whether it has bottomed out.
///
/// Rises from -1 to 1 over `[0, apex)` and falls back with the same slope.
#[inline]
fn shape(phase: f64, apex: f64) -> (f32, bool) {
    if apex <= 0.0 {
        return (-1.0, true);
    }

    let raw = if phase < apex {
        phase / apex
    } else {
        1.0 - (phase - apex) / apex
    };
    let sig = raw * 2.0 - 1.0;

    if sig <= -1.0 {
        (-1.0, true)
    } else {
        (sig as f32, false)
    }
}

/// Asymmetric ramp oscillator.
///
/// The shaping phase runs free until the ramp bottoms out and is only reset
/// when the reference phase completes a cycle, so every period is a whole
/// number of reference cycles and resets never land mid-cycle.
pub struct Mangrove {
    phase: f64,
    reference: f64,
    increment: f64,
}

impl Processor for Mangrove {
    type Param = MangroveParam;

    fn new(options: &ProcessorOptions) -> Result<Self, Error> {
        let mut rng = options.rng();
        let sample_rate = options.sample_rate()?;
        let phase = options.initial_phase(&mut rng)?;

        Ok(Self {
            phase,
            reference: phase,
            increment: 1.0 / f64::from(sample_rate),
        })
    }

    fn process(&mut self, output: &mut [f32], params: &Params<'_, MangroveParam>) -> bool {
        for (frame, sample) in output.iter_mut().enumerate() {
            let freq = params.at(MangroveParam::Freq, frame);
            let duty_cycle = params.at(MangroveParam::DutyCycle, frame).clamp(0.0, 1.0);

            let (sig, bottomed_out) = shape(self.phase, apex(duty_cycle));

            let step = self.increment * f64::from(freq);
            self.phase += step;
            self.reference += step;

            if self.reference >= 1.0 {
                self.reference = 0.0;
                if bottomed_out {
                    self.phase = 0.0;
                }
            }

            *sample = sig;
        }

        true
    }
}

register!(Mangrove, "mangrove");

#[cfg(test)]
mod tests {
    use dsynth::ParameterValues;

    use super::*;

    fn render(duty_cycle: f32, frames: usize) -> Vec<f32> {
        let options = ProcessorOptions {
            initial_phase: Some(0.0),
            ..ProcessorOptions::with_sample_rate(1_024.0)
        };
        // 128 frames per reference cycle, exact steps of 1/128
        let (mut node, _handle) = Mangrove::create_node(&options).unwrap();
        let params = ParameterValues::new()
            .with("freq", &[8.0])
            .with("duty_cycle", &[duty_cycle]);

        let mut output = vec![0.0; frames];
        node.process(&mut output, &params).unwrap();
        output
    }

    #[test]
    fn apex_follows_duty_cycle() {
        assert_eq!(apex(0.0), 0.0);
        assert!((apex(0.5) - 0.75).abs() < 1e-12);
        assert!((apex(1.0) - 3.75).abs() < 1e-12);
    }

    #[test]
    fn half_duty_ramp_resets_on_the_second_reference_cycle() {
        let output = render(0.5, 512);

        assert_eq!(output[0], -1.0);
        // peak at phase 0.75
        assert_eq!(output[96], 1.0);
        assert!(output[..96].windows(2).all(|w| w[0] < w[1]));
        // the fall reaches the floor at phase 1.5 and holds there until the
        // reference wraps for the second time
        assert!(output[192..256].iter().all(|s| *s == -1.0));
        assert_eq!(output[256..512], output[0..256]);
    }

    #[test]
    fn never_leaves_unit_range() {
        for duty_cycle in [-1.0, 0.0, 0.1, 0.5, 0.9, 1.0, 2.0] {
            let output = render(duty_cycle, 2_000);
            assert!(output.iter().all(|s| (-1.0..=1.0).contains(s)));
        }
    }

    #[test]
    fn duty_cycle_is_clamped() {
        assert_eq!(render(-3.0, 300), render(0.0, 300));
        assert_eq!(render(7.0, 300), render(1.0, 300));
    }
}
