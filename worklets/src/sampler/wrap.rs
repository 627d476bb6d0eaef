use dsynth::{
    register, Command, Error, Event, ParameterDescriptor, ParameterSet, Params, Processor,
    ProcessorOptions,
};
use enum_map::Enum;

use super::PlayHead;

#[derive(Enum, Debug, Clone, Copy)]
pub enum WrapSamplerParam {
    Rate,
}

impl ParameterSet for WrapSamplerParam {
    fn descriptor(self) -> ParameterDescriptor {
        match self {
            WrapSamplerParam::Rate => ParameterDescriptor::new("rate", 1.0),
        }
    }
}

/// Plays the whole buffer on repeat; negative rates play it backwards.
pub struct WrapSampler {
    head: PlayHead,
}

impl WrapSampler {
    pub fn head(&self) -> &PlayHead {
        &self.head
    }
}

impl Processor for WrapSampler {
    type Param = WrapSamplerParam;

    fn new(options: &ProcessorOptions) -> Result<Self, Error> {
        Ok(Self {
            head: PlayHead::from_options(options)?,
        })
    }

    fn process(&mut self, output: &mut [f32], params: &Params<'_, WrapSamplerParam>) -> bool {
        for (frame, sample) in output.iter_mut().enumerate() {
            let rate = params.at(WrapSamplerParam::Rate, frame);

            *sample = self.head.read();
            self.head.step_wrapped(rate);
        }

        true
    }

    fn on_command(&mut self, command: Command) -> Option<Event> {
        self.head.on_command(command)
    }
}

register!(WrapSampler, "sampler_wrap");
