//! Synthesis worklets: oscillators, noise generators and buffer samplers.
//!
//! Every unit registers itself by name with [`dsynth::register!`]; hosts look
//! them up through [`registry`]. On `wasm32` the same lookup backs the JS
//! entry points.

use dsynth::Registry;

#[cfg(target_arch = "wasm32")]
mod bindings;
pub mod noise;
pub mod oscillator;
pub mod sampler;

/// Lookup over every registered worklet, ordered by name.
pub fn registry() -> Registry {
    Registry::collect()
}
