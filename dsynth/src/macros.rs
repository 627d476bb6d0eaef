/// Registers a processor type under a name.
///
/// Submits the processor to the collection behind
/// [`Registry::collect`](crate::Registry::collect) and adds `NAME`, a
/// `REGISTRATION` constant and a `create_node` constructor.
///
/// ```
/// use dsynth::{register, Error, NoParams, Params, Processor, ProcessorOptions};
///
/// pub struct Silence;
///
/// impl Processor for Silence {
///     type Param = NoParams;
///
///     fn new(_options: &ProcessorOptions) -> Result<Self, Error> {
///         Ok(Silence)
///     }
///
///     fn process(&mut self, output: &mut [f32], _params: &Params<'_, NoParams>) -> bool {
///         output.fill(0.0);
///         true
///     }
/// }
///
/// register!(Silence, "silence");
///
/// assert_eq!(Silence::REGISTRATION.name, "silence");
/// assert!(dsynth::Registry::collect().get("silence").is_ok());
/// ```
#[macro_export]
macro_rules! register {
    ($processor:ty, $name:literal) => {
        impl $processor {
            /// Name this processor is registered under.
            pub const NAME: &'static str = $name;

            /// Registration entry for this processor.
            pub const REGISTRATION: $crate::ProcessorRegistration =
                $crate::ProcessorRegistration::of::<$processor>($name);

            /// Create a new node for this processor
            pub fn create_node(
                options: &$crate::ProcessorOptions,
            ) -> ::std::result::Result<
                ($crate::ProcessorWrapper<$processor>, $crate::NodeHandle),
                $crate::Error,
            > {
                $crate::ProcessorWrapper::<$processor>::new($name, options)
            }
        }

        $crate::inventory::submit! {
            $crate::ProcessorRegistration::of::<$processor>($name)
        }
    };
}
