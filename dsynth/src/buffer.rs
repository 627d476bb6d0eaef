use std::collections::HashMap;

use enum_map::EnumMap;

use crate::{error::Error, parameter::ParameterSet};

/// Render quantum used by Web Audio hosts.
pub const RENDER_QUANTUM: usize = 128;

/// Effective value of a parameter array for one frame.
///
/// A single value applies to the whole block (k-rate); otherwise there is one
/// value per frame (a-rate). Callers guarantee `frame` is inside the block and
/// `values` holds 1 or block-size entries.
#[inline]
pub fn resolve(values: &[f32], frame: usize) -> f32 {
    if values.len() == 1 {
        values[0]
    } else {
        values[frame]
    }
}

/// Host-side parameter arrays for one block, keyed by parameter name.
///
/// Storage is reused between blocks: once every parameter has been set at its
/// largest length, refilling allocates nothing.
#[derive(Debug, Default, Clone)]
pub struct ParameterValues {
    params: HashMap<String, Vec<f32>>,
}

impl ParameterValues {
    /// Creates an empty set; every parameter resolves to its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the array delivered for `name`.
    pub fn set(&mut self, name: &str, values: &[f32]) {
        match self.params.get_mut(name) {
            Some(storage) => {
                storage.clear();
                storage.extend_from_slice(values);
            }
            None => {
                self.params.insert(name.to_owned(), values.to_vec());
            }
        }
    }

    /// Builder form of [`ParameterValues::set`].
    pub fn with(mut self, name: &str, values: &[f32]) -> Self {
        self.set(name, values);
        self
    }

    /// Sets a block-rate value.
    pub fn set_constant(&mut self, name: &str, value: f32) {
        self.set(name, &[value]);
    }

    /// Stops delivering `name`, so it falls back to its default.
    pub fn remove(&mut self, name: &str) {
        self.params.remove(name);
    }

    /// The array delivered for `name`, if any.
    pub fn get(&self, name: &str) -> Option<&[f32]> {
        self.params.get(name).map(Vec::as_slice)
    }

    /// Mutable access to the storage for `name`, created empty on first use.
    ///
    /// Lets bindings copy host arrays straight into reused storage.
    pub fn storage_mut(&mut self, name: &str) -> &mut Vec<f32> {
        if !self.params.contains_key(name) {
            self.params.insert(name.to_owned(), Vec::with_capacity(RENDER_QUANTUM));
        }
        self.params
            .get_mut(name)
            .expect("storage was inserted above")
    }
}

/// One parameter's values for the current block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValues<'a> {
    /// One value for the whole block.
    Block(f32),
    /// One value per frame.
    Frames(&'a [f32]),
}

impl<'a> ParamValues<'a> {
    /// Value in effect at `frame`.
    #[inline]
    pub fn at(&self, frame: usize) -> f32 {
        match self {
            ParamValues::Block(value) => *value,
            ParamValues::Frames(values) => resolve(values, frame),
        }
    }
}

/// Typed, validated parameters for one block.
///
/// Built at the host boundary so processors never see the raw
/// "one value or one per frame" representation.
#[derive(Debug)]
pub struct Params<'a, P: ParameterSet> {
    values: EnumMap<P, ParamValues<'a>>,
    frames: usize,
}

impl<'a, P: ParameterSet> Params<'a, P> {
    /// Binds host arrays to the declared parameters of `P`.
    ///
    /// Undelivered parameters take their declared default. An array whose
    /// length is neither 1 nor `frames` rejects the whole block.
    pub fn bind(values: &'a ParameterValues, frames: usize) -> Result<Self, Error> {
        let mut error = None;
        let map = EnumMap::from_fn(|param: P| {
            let descriptor = param.descriptor();
            match values.get(descriptor.name) {
                None => ParamValues::Block(descriptor.default_value),
                Some([value]) => ParamValues::Block(*value),
                Some(array) if array.len() == frames => ParamValues::Frames(array),
                Some(array) => {
                    error.get_or_insert(Error::ParamLength {
                        name: descriptor.name,
                        len: array.len(),
                        frames,
                    });
                    ParamValues::Block(descriptor.default_value)
                }
            }
        });

        match error {
            Some(error) => Err(error),
            None => Ok(Self { values: map, frames }),
        }
    }

    /// Every parameter at its declared default.
    pub fn defaults(frames: usize) -> Self {
        Self {
            values: EnumMap::from_fn(|param: P| {
                ParamValues::Block(param.descriptor().default_value)
            }),
            frames,
        }
    }

    /// Values delivered for `param`.
    #[inline]
    pub fn get(&self, param: P) -> ParamValues<'a> {
        self.values[param]
    }

    /// Value of `param` at `frame`.
    #[inline]
    pub fn at(&self, param: P, frame: usize) -> f32 {
        self.values[param].at(frame)
    }

    /// Number of frames in the block.
    pub fn frames(&self) -> usize {
        self.frames
    }
}
