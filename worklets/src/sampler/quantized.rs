use dsynth::{
    register, Command, Error, Event, ParameterDescriptor, ParameterSet, Params, Processor,
    ProcessorOptions,
};
use enum_map::Enum;

use super::{quantized_region, PlayHead};

#[derive(Enum, Debug, Clone, Copy)]
pub enum QuantizedSamplerParam {
    Rate,
    Freq,
    Start,
    End,
}

impl ParameterSet for QuantizedSamplerParam {
    fn descriptor(self) -> ParameterDescriptor {
        match self {
            QuantizedSamplerParam::Rate => ParameterDescriptor::new("rate", 1.0),
            QuantizedSamplerParam::Freq => ParameterDescriptor::new("freq", 1320.0),
            QuantizedSamplerParam::Start => ParameterDescriptor::new("start", 0.0),
            QuantizedSamplerParam::End => ParameterDescriptor::new("end", 1.0),
        }
    }
}

/// Loops `[start, end)` with the loop length rounded to whole `freq` periods.
pub struct QuantizedSampler {
    head: PlayHead,
    sample_rate: f32,
}

impl Processor for QuantizedSampler {
    type Param = QuantizedSamplerParam;

    fn new(options: &ProcessorOptions) -> Result<Self, Error> {
        let sample_rate = options.sample_rate()?;
        Ok(Self {
            head: PlayHead::from_options(options)?,
            sample_rate,
        })
    }

    fn process(&mut self, output: &mut [f32], params: &Params<'_, QuantizedSamplerParam>) -> bool {
        let len = self.head.buffer_len();

        for (frame, sample) in output.iter_mut().enumerate() {
            let rate = params.at(QuantizedSamplerParam::Rate, frame);
            let region = quantized_region(
                len,
                self.sample_rate,
                params.at(QuantizedSamplerParam::Freq, frame),
                params.at(QuantizedSamplerParam::Start, frame),
                params.at(QuantizedSamplerParam::End, frame),
            );

            *sample = self.head.step_looped(rate, region);
        }

        true
    }

    fn on_command(&mut self, command: Command) -> Option<Event> {
        self.head.on_command(command)
    }
}

register!(QuantizedSampler, "sampler_quantized");
