use dsynth::{Command, DynProcessor, NodeHandle, ParameterValues, ProcessorOptions};
use js_sys::{global, Array, Float32Array, Object, Reflect};
use wasm_bindgen::{prelude::wasm_bindgen, JsCast, JsValue};

use crate::registry;

fn js_error(error: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&error.to_string()).into()
}

/// Returns the sample rate of the `AudioWorkletGlobalScope`, if there is one.
fn global_sample_rate() -> Option<f32> {
    Reflect::get(&global(), &"sampleRate".into())
        .ok()
        .and_then(|value| value.as_f64())
        .map(|rate| rate as f32)
}

#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    if console_log::init_with_level(log::Level::Info).is_ok() {
        log::info!("{} worklets available", registry().names().count());
    }
}

/// Names every registered worklet answers to.
#[wasm_bindgen(js_name = processorNames)]
pub fn processor_names() -> Array {
    registry().names().map(JsValue::from_str).collect()
}

/// `parameterDescriptors` for the worklet registered as `name`.
#[wasm_bindgen(js_name = parameterDescriptors)]
pub fn parameter_descriptors(name: &str) -> Result<JsValue, JsValue> {
    let registration = registry().get(name).map_err(js_error)?;
    serde_wasm_bindgen::to_value(&registration.parameter_descriptors()).map_err(JsValue::from)
}

/// One worklet instance, driven from an `AudioWorkletProcessor`.
#[wasm_bindgen]
pub struct WorkletProcessor {
    node: Box<dyn DynProcessor>,
    handle: NodeHandle,
    params: ParameterValues,
    names: Vec<&'static str>,
}

#[wasm_bindgen]
impl WorkletProcessor {
    /// Instantiates `name` from the node's `processorOptions`.
    ///
    /// A missing `sample_rate` is taken from the global scope.
    #[wasm_bindgen(constructor)]
    pub fn new(name: &str, options: JsValue) -> Result<WorkletProcessor, JsValue> {
        let mut options: ProcessorOptions = if options.is_undefined() || options.is_null() {
            ProcessorOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options)?
        };
        if options.sample_rate.is_none() {
            options.sample_rate = global_sample_rate();
        }

        let registration = registry().get(name).map_err(js_error)?;
        let (node, handle) = registration.create(&options).map_err(js_error)?;
        let names = registration
            .parameter_descriptors()
            .iter()
            .map(|descriptor| descriptor.name)
            .collect();

        Ok(WorkletProcessor {
            node,
            handle,
            params: ParameterValues::new(),
            names,
        })
    }

    /// Renders one block into `output` from the host's parameter object.
    pub fn process(&mut self, output: &mut [f32], parameters: &Object) -> Result<bool, JsValue> {
        for name in &self.names {
            let value = Reflect::get(parameters, &JsValue::from_str(name))?;
            if value.is_undefined() {
                self.params.remove(name);
                continue;
            }

            let array: Float32Array = value.dyn_into()?;
            let storage = self.params.storage_mut(name);
            storage.resize(array.length() as usize, 0.0);
            array.copy_to(storage);
        }

        self.node.process(output, &self.params).map_err(js_error)
    }

    /// Handles a port message; only `"get_phase"` is understood.
    #[wasm_bindgen(js_name = onMessage)]
    pub fn on_message(&self, data: JsValue) {
        match serde_wasm_bindgen::from_value::<Command>(data) {
            Ok(Command::GetPhase) => self.handle.request_phase(),
            Err(error) => log::warn!("`{}` ignored a message: {error}", self.handle.name()),
        }
    }

    /// The reply to the last phase request, once the audio thread has posted it.
    #[wasm_bindgen(js_name = takePhase)]
    pub fn take_phase(&self) -> Option<f32> {
        self.handle.take_phase()
    }

    /// Stops the processor; the next block reports it as finished.
    pub fn retire(&self) {
        self.handle.retire();
    }
}
