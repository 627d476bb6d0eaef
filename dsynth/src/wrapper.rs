use std::sync::{atomic::Ordering, Arc};

use crate::{
    buffer::{ParameterValues, Params},
    error::Error,
    node::{NodeHandle, Shared},
    processor::{Command, Event, Processor, ProcessorOptions},
};

/// Object-safe face of a [`ProcessorWrapper`], used when processors are
/// instantiated by name.
pub trait DynProcessor: Send {
    /// Renders one block. See [`ProcessorWrapper::process`].
    fn process(&mut self, output: &mut [f32], parameters: &ParameterValues)
        -> Result<bool, Error>;
}

/// Drives a [`Processor`] on behalf of the host.
///
/// Owns the processor exclusively; the only state it shares with the host is
/// the atomic active flag and mailbox behind the paired [`NodeHandle`].
pub struct ProcessorWrapper<P: Processor> {
    processor: P,
    shared: Arc<Shared>,
    retired: bool,
}

impl<P: Processor> ProcessorWrapper<P> {
    /// Constructs the processor and the handle that controls it.
    pub fn new(
        name: &'static str,
        options: &ProcessorOptions,
    ) -> Result<(Self, NodeHandle), Error> {
        let processor = P::new(options)?;
        let shared = Arc::new(Shared::new());
        log::debug!("created `{name}` processor");

        let wrapper = Self {
            processor,
            shared: Arc::clone(&shared),
            retired: false,
        };
        Ok((wrapper, NodeHandle::new(name, shared)))
    }

    /// Renders one block into `output`, whose length is the block size.
    ///
    /// Returns the liveness flag. Once it has been `false` it stays `false`
    /// and the output is silence. A malformed parameter array aborts the
    /// block: the output is silenced and the error returned.
    pub fn process(
        &mut self,
        output: &mut [f32],
        parameters: &ParameterValues,
    ) -> Result<bool, Error> {
        if self.retired || !self.shared.active.load(Ordering::Acquire) {
            self.retire();
            output.fill(0.0);
            return Ok(false);
        }

        let params = match Params::bind(parameters, output.len()) {
            Ok(params) => params,
            Err(error) => {
                output.fill(0.0);
                return Err(error);
            }
        };

        if self.shared.mailbox.take_request() {
            let phase = match self.processor.on_command(Command::GetPhase) {
                Some(Event::Phase(phase)) => Some(phase),
                None => None,
            };
            self.shared.mailbox.post(phase);
        }

        let alive = self.processor.process(output, &params);
        if !alive {
            self.retire();
        }
        Ok(alive)
    }

    /// The wrapped processor.
    pub fn processor(&self) -> &P {
        &self.processor
    }

    fn retire(&mut self) {
        if !self.retired {
            self.retired = true;
            self.shared.active.store(false, Ordering::Release);
            self.shared.mailbox.close();
        }
    }
}

impl<P: Processor> DynProcessor for ProcessorWrapper<P> {
    fn process(
        &mut self,
        output: &mut [f32],
        parameters: &ParameterValues,
    ) -> Result<bool, Error> {
        ProcessorWrapper::process(self, output, parameters)
    }
}

impl<P: Processor> Drop for ProcessorWrapper<P> {
    fn drop(&mut self) {
        self.shared.mailbox.close();
    }
}

#[cfg(test)]
mod tests {
    use enum_map::Enum;
    use futures::{executor::block_on, FutureExt};

    use super::*;
    use crate::parameter::{ParameterDescriptor, ParameterSet};

    #[derive(Enum, Debug, Clone, Copy)]
    enum CounterParam {
        Step,
    }

    impl ParameterSet for CounterParam {
        fn descriptor(self) -> ParameterDescriptor {
            ParameterDescriptor::new("step", 1.0)
        }
    }

    /// Counts frames; reports the count as its phase and stops after `limit`.
    struct Counter {
        frames: f32,
        limit: f32,
    }

    impl Processor for Counter {
        type Param = CounterParam;

        fn new(options: &ProcessorOptions) -> Result<Self, Error> {
            Ok(Self {
                frames: 0.0,
                limit: options.sample_rate()?,
            })
        }

        fn process(&mut self, output: &mut [f32], params: &Params<'_, CounterParam>) -> bool {
            for (frame, sample) in output.iter_mut().enumerate() {
                self.frames += params.at(CounterParam::Step, frame);
                *sample = self.frames;
            }
            self.frames < self.limit
        }

        fn on_command(&mut self, command: Command) -> Option<Event> {
            match command {
                Command::GetPhase => Some(Event::Phase(self.frames)),
            }
        }
    }

    fn counter(limit: f32) -> (ProcessorWrapper<Counter>, NodeHandle) {
        ProcessorWrapper::new("counter", &ProcessorOptions::with_sample_rate(limit)).unwrap()
    }

    #[test]
    fn construction_errors_propagate() {
        let result = ProcessorWrapper::<Counter>::new("counter", &ProcessorOptions::default());
        assert_eq!(result.err(), Some(Error::MissingOption("sample_rate")));
    }

    #[test]
    fn dropping_the_handle_retires() {
        let (mut wrapper, handle) = counter(1e6);
        let mut block = [0.0; 4];
        let params = ParameterValues::new();

        assert_eq!(wrapper.process(&mut block, &params), Ok(true));
        assert_eq!(block, [1.0, 2.0, 3.0, 4.0]);

        drop(handle);
        assert_eq!(wrapper.process(&mut block, &params), Ok(false));
        assert_eq!(block, [0.0; 4]);
    }

    #[test]
    fn retirement_latches() {
        let (mut wrapper, handle) = counter(6.0);
        let mut block = [0.0; 4];
        let params = ParameterValues::new();

        assert_eq!(wrapper.process(&mut block, &params), Ok(true));
        assert_eq!(wrapper.process(&mut block, &params), Ok(false));
        assert!(!handle.is_active());
        assert_eq!(wrapper.process(&mut block, &params), Ok(false));
        assert_eq!(wrapper.processor().frames, 8.0);
    }

    #[test]
    fn malformed_block_is_silenced() {
        let (mut wrapper, _handle) = counter(1e6);
        let mut block = [1.0; 4];
        let params = ParameterValues::new().with("step", &[1.0, 1.0]);

        assert!(matches!(
            wrapper.process(&mut block, &params),
            Err(Error::ParamLength { name: "step", .. })
        ));
        assert_eq!(block, [0.0; 4]);
        assert_eq!(wrapper.processor().frames, 0.0);
    }

    #[test]
    fn phase_is_answered_at_the_next_block() {
        let (mut wrapper, handle) = counter(1e6);
        let mut block = [0.0; 8];
        let params = ParameterValues::new().with("step", &[2.0]);

        wrapper.process(&mut block, &params).unwrap();
        let query = handle.query_phase();
        assert_eq!(handle.take_phase(), None);

        wrapper.process(&mut block, &params).unwrap();
        assert_eq!(block_on(query), Some(16.0));
    }

    #[test]
    fn query_resolves_none_once_dropped() {
        let (wrapper, handle) = counter(1e6);
        let query = handle.query_phase();
        drop(wrapper);
        assert_eq!(block_on(query), None);
    }

    #[test]
    fn query_after_retire_resolves_without_another_block() {
        let (wrapper, handle) = counter(1e6);
        handle.retire();

        // the wrapper stays alive but is never driven again
        assert_eq!(handle.query_phase().now_or_never(), Some(None));
        assert_eq!(wrapper.processor().frames, 0.0);
    }
}
