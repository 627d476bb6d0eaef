use dsynth::{
    register, Command, Error, Event, ParameterDescriptor, ParameterSet, Params, Processor,
    ProcessorOptions,
};
use enum_map::Enum;

use super::{windowed_region, PlayHead};

#[derive(Enum, Debug, Clone, Copy)]
pub enum SamplerParam {
    Rate,
    Freq,
    Fulcrum,
    Open,
}

impl ParameterSet for SamplerParam {
    fn descriptor(self) -> ParameterDescriptor {
        match self {
            SamplerParam::Rate => ParameterDescriptor::new("rate", 1.0),
            SamplerParam::Freq => ParameterDescriptor::new("freq", 1320.0),
            SamplerParam::Fulcrum => ParameterDescriptor::new("fulcrum", 0.0),
            SamplerParam::Open => ParameterDescriptor::new("open", 1.0),
        }
    }
}

/// Pitched sampler looping a window of whole `freq` periods.
///
/// The window is recomputed every frame, so `open` and `fulcrum` can be swept
/// while playing.
pub struct Sampler {
    head: PlayHead,
    sample_rate: f32,
}

impl Sampler {
    pub fn head(&self) -> &PlayHead {
        &self.head
    }
}

impl Processor for Sampler {
    type Param = SamplerParam;

    fn new(options: &ProcessorOptions) -> Result<Self, Error> {
        let sample_rate = options.sample_rate()?;
        Ok(Self {
            head: PlayHead::from_options(options)?,
            sample_rate,
        })
    }

    fn process(&mut self, output: &mut [f32], params: &Params<'_, SamplerParam>) -> bool {
        let len = self.head.buffer_len();

        for (frame, sample) in output.iter_mut().enumerate() {
            let rate = params.at(SamplerParam::Rate, frame);
            let region = windowed_region(
                len,
                self.sample_rate,
                params.at(SamplerParam::Freq, frame),
                params.at(SamplerParam::Fulcrum, frame),
                params.at(SamplerParam::Open, frame),
            );

            *sample = self.head.step_looped(rate, region);
        }

        true
    }

    fn on_command(&mut self, command: Command) -> Option<Event> {
        self.head.on_command(command)
    }
}

register!(Sampler, "sampler");
