//! Real-time processor framework for audio worklet synthesis units.
//!
//! A [`Processor`] is constructed once from [`ProcessorOptions`], declares its
//! parameters through a [`ParameterSet`], and is then called once per block by
//! a [`ProcessorWrapper`] on the audio thread. The host keeps a [`NodeHandle`]
//! to retire the processor or query it out of band, and instantiates
//! processors by name through a [`Registry`].
#![warn(missing_docs)]

/// Per-block parameter arrays and their resolution to per-frame values.
pub mod buffer;

/// Errors raised at the host boundary.
pub mod error;

/// Macros for processor registration.
pub mod macros;

pub mod mailbox;

/// Host-side handle for lifecycle management.
pub mod node;

/// Parameter declarations.
pub mod parameter;

/// Core processor trait, options and messages.
pub mod processor;

/// Processor registration and lookup by name.
pub mod registry;

/// Drives processors on behalf of the host.
pub mod wrapper;

pub use buffer::{resolve, ParamValues, ParameterValues, Params, RENDER_QUANTUM};
pub use error::Error;
pub use mailbox::PhaseQuery;
pub use node::NodeHandle;
pub use parameter::*;
pub use processor::*;
pub use registry::{ProcessorRegistration, Registry};
pub use wrapper::{DynProcessor, ProcessorWrapper};

// Re-export dependencies for processor implementations
pub use enum_map;
pub use fastrand;
pub use inventory;
