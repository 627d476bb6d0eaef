use dsynth::{Error, ParameterValues, ProcessorOptions, RENDER_QUANTUM};
use dsynth_worklets::registry;
use serde_json::{json, Value};

const NAMES: [&str; 11] = [
    "cute_sine",
    "mangrove",
    "pink_noise",
    "pwm",
    "ridge-rat-pink-noise-generator",
    "sampler",
    "sampler_quantized",
    "sampler_wrap",
    "test_sine",
    "white_noise",
    "worklet_sine",
];

fn full_options() -> ProcessorOptions {
    ProcessorOptions::from_json(
        r#"{ "sample_rate": 48000, "audio_data": [0.0, 0.25, 0.5, 0.75], "seed": 1 }"#,
    )
    .unwrap()
}

#[test]
fn names_are_unique_and_complete() {
    let registry = registry();
    assert_eq!(registry.validate(), Ok(()));
    assert_eq!(registry.names().collect::<Vec<_>>(), NAMES);
}

#[test]
fn every_worklet_renders_a_quantum() {
    let registry = registry();
    let options = full_options();

    for name in NAMES {
        let (mut node, handle) = registry.create(name, &options).unwrap();
        assert_eq!(handle.name(), name);

        let mut block = [f32::NAN; RENDER_QUANTUM];
        assert_eq!(node.process(&mut block, &ParameterValues::new()), Ok(true), "{name}");
        assert!(block.iter().all(|s| s.is_finite()), "{name} rendered a non-finite sample");
    }
}

#[test]
fn unknown_names_are_rejected() {
    assert_eq!(
        registry().create("saw", &full_options()).err(),
        Some(Error::UnknownProcessor("saw".to_owned()))
    );
}

#[test]
fn construction_reports_missing_options() {
    let registry = registry();
    let bare = ProcessorOptions::default();

    let needs_rate = [
        "worklet_sine",
        "cute_sine",
        "pwm",
        "mangrove",
        "sampler",
        "sampler_quantized",
    ];
    for name in needs_rate {
        assert_eq!(
            registry.create(name, &bare).err(),
            Some(Error::MissingOption("sample_rate")),
            "{name}"
        );
    }

    let no_buffer = ProcessorOptions::with_sample_rate(48_000.0);
    for name in ["sampler", "sampler_wrap", "sampler_quantized"] {
        assert_eq!(
            registry.create(name, &no_buffer).err(),
            Some(Error::MissingOption("audio_data")),
            "{name}"
        );
    }

    let self_contained = [
        "test_sine",
        "white_noise",
        "pink_noise",
        "ridge-rat-pink-noise-generator",
    ];
    for name in self_contained {
        assert!(registry.create(name, &bare).is_ok(), "{name}");
    }
}

#[test]
fn descriptors_match_the_host_shape() {
    let registry = registry();
    let descriptors = |name| -> Value {
        serde_json::from_str(&registry.get(name).unwrap().parameter_descriptor_json()).unwrap()
    };

    assert_eq!(
        descriptors("ridge-rat-pink-noise-generator"),
        json!([{
            "name": "amplitude",
            "defaultValue": 0.1,
            "minValue": 0.0,
            "maxValue": 1.0,
            "automationRate": "a-rate"
        }])
    );
    assert_eq!(
        descriptors("pwm"),
        json!([
            { "name": "freq", "defaultValue": 220.0 },
            { "name": "duty_cycle", "defaultValue": 0.5 }
        ])
    );
    assert_eq!(descriptors("white_noise"), json!([]));

    let sampler: Vec<String> = registry
        .get("sampler")
        .unwrap()
        .parameter_descriptors()
        .iter()
        .map(|d| d.name.to_owned())
        .collect();
    assert_eq!(sampler, ["rate", "freq", "fulcrum", "open"]);
}
