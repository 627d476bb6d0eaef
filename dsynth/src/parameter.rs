use std::fmt::Debug;

use enum_map::{Enum, EnumArray};
use serde::Serialize;

use crate::buffer::ParamValues;

/// Parameter descriptor handed to the host.
///
/// Mirrors the `AudioParamDescriptor` dictionary: the host reads it once to
/// decide which arrays to deliver with every block.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDescriptor {
    /// The name of the parameter.
    pub name: &'static str,
    /// Value used when the host does not deliver the parameter.
    pub default_value: f32,
    /// The minimum value the parameter can take.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f32>,
    /// The maximum value the parameter can take.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f32>,
    /// The rate at which the parameter is automated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub automation_rate: Option<AutomationRate>,
}

impl ParameterDescriptor {
    /// Descriptor with only a name and default, the shape most worklets declare.
    pub const fn new(name: &'static str, default_value: f32) -> Self {
        Self {
            name,
            default_value,
            min_value: None,
            max_value: None,
            automation_rate: None,
        }
    }

    /// Sets the inclusive value range.
    pub const fn range(mut self, min_value: f32, max_value: f32) -> Self {
        self.min_value = Some(min_value);
        self.max_value = Some(max_value);
        self
    }

    /// Sets the automation rate.
    pub const fn rate(mut self, automation_rate: AutomationRate) -> Self {
        self.automation_rate = Some(automation_rate);
        self
    }
}

/// The automation rate of a parameter.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutomationRate {
    /// Audio-rate automation. The parameter is updated for every sample frame.
    #[serde(rename = "a-rate")]
    ARate,
    /// Control-rate automation. The parameter is updated for every render quantum.
    #[serde(rename = "k-rate")]
    KRate,
}

/// A processor's declared parameters, as an enum with one variant per parameter.
///
/// Declaration order is the enum's variant order.
pub trait ParameterSet:
    Enum + for<'a> EnumArray<ParamValues<'a>> + Copy + Debug + Send + 'static
{
    /// Static declaration for one parameter.
    fn descriptor(self) -> ParameterDescriptor;

    /// All declarations, in order.
    fn descriptors() -> Vec<ParameterDescriptor> {
        (0..Self::LENGTH)
            .map(|index| Self::from_usize(index).descriptor())
            .collect()
    }
}

/// Parameter set for processors that take no parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoParams {}

impl Enum for NoParams {
    const LENGTH: usize = 0;

    fn from_usize(_value: usize) -> Self {
        unreachable!("NoParams has no variants")
    }

    fn into_usize(self) -> usize {
        match self {}
    }
}

impl<V> EnumArray<V> for NoParams {
    type Array = [V; 0];
}

impl ParameterSet for NoParams {
    fn descriptor(self) -> ParameterDescriptor {
        match self {}
    }
}
