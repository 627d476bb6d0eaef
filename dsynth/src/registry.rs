use std::collections::HashSet;

use crate::{
    error::Error,
    node::NodeHandle,
    parameter::{ParameterDescriptor, ParameterSet},
    processor::{Processor, ProcessorOptions},
    wrapper::{DynProcessor, ProcessorWrapper},
};

/// Type-erased constructor stored in a registration.
type CreateFn =
    fn(&'static str, &ProcessorOptions) -> Result<(Box<dyn DynProcessor>, NodeHandle), Error>;

/// Binds a processor type to the name a host instantiates it by.
///
/// Submitted to the process-wide collection by [`register!`](crate::register).
#[derive(Clone, Copy)]
pub struct ProcessorRegistration {
    /// The name of the processor to register
    pub name: &'static str,
    descriptors: fn() -> Vec<ParameterDescriptor>,
    create: CreateFn,
}

impl ProcessorRegistration {
    /// Creates a registration for `P` under `name`.
    pub const fn of<P: Processor>(name: &'static str) -> Self {
        Self {
            name,
            descriptors: <P::Param as ParameterSet>::descriptors,
            create: create_boxed::<P>,
        }
    }

    /// Parameters the processor declares, in order.
    pub fn parameter_descriptors(&self) -> Vec<ParameterDescriptor> {
        (self.descriptors)()
    }

    /// Declarations as the JSON array a host expects.
    pub fn parameter_descriptor_json(&self) -> String {
        serde_json::to_string(&self.parameter_descriptors())
            .expect("descriptors only contain names and numbers")
    }

    /// Instantiates the processor.
    pub fn create(
        &self,
        options: &ProcessorOptions,
    ) -> Result<(Box<dyn DynProcessor>, NodeHandle), Error> {
        (self.create)(self.name, options)
    }
}

impl std::fmt::Debug for ProcessorRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessorRegistration")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

fn create_boxed<P: Processor>(
    name: &'static str,
    options: &ProcessorOptions,
) -> Result<(Box<dyn DynProcessor>, NodeHandle), Error> {
    let (wrapper, handle) = ProcessorWrapper::<P>::new(name, options)?;
    Ok((Box::new(wrapper), handle))
}

// Collect all registrations using inventory
inventory::collect!(ProcessorRegistration);

/// A set of registrations to look processors up in.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Vec<&'static ProcessorRegistration>,
}

impl Registry {
    /// Every processor registered with [`register!`](crate::register) in the
    /// linked crates, ordered by name.
    pub fn collect() -> Self {
        let registry = Self::new(inventory::iter::<ProcessorRegistration>);
        log::debug!("collected {} processor registrations", registry.entries.len());
        registry
    }

    /// Registry over an explicit set of registrations, ordered by name.
    pub fn new(entries: impl IntoIterator<Item = &'static ProcessorRegistration>) -> Self {
        let mut entries: Vec<_> = entries.into_iter().collect();
        entries.sort_by_key(|entry| entry.name);
        Self { entries }
    }

    /// Checks that every name is registered once.
    pub fn validate(&self) -> Result<(), Error> {
        let mut seen = HashSet::new();
        for entry in &self.entries {
            if !seen.insert(entry.name) {
                return Err(Error::DuplicateProcessor(entry.name));
            }
        }
        Ok(())
    }

    /// Registered names, in order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    /// All registrations.
    pub fn iter(&self) -> impl Iterator<Item = &'static ProcessorRegistration> + '_ {
        self.entries.iter().copied()
    }

    /// The registration for `name`.
    pub fn get(&self, name: &str) -> Result<&'static ProcessorRegistration, Error> {
        self.entries
            .iter()
            .copied()
            .find(|entry| entry.name == name)
            .ok_or_else(|| Error::UnknownProcessor(name.to_owned()))
    }

    /// Instantiates the processor registered as `name`.
    pub fn create(
        &self,
        name: &str,
        options: &ProcessorOptions,
    ) -> Result<(Box<dyn DynProcessor>, NodeHandle), Error> {
        self.get(name)?.create(options)
    }
}
