use std::io::Write;

use reactor_engine::{CouplingMode, ProbeSite, ReactorConfig, ReactorError, RunState};

fn rejected_field(cfg: ReactorConfig) -> &'static str {
    match cfg.validate() {
        Err(ReactorError::InvalidConfiguration { field, .. }) => field,
        other => panic!("expected InvalidConfiguration, got {other:?}"),
    }
}

#[test]
fn reference_configuration_validates() {
    let cfg = ReactorConfig::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.probes.len(), 5);
    assert_eq!((cfg.width, cfg.height), (100, 100));
}

#[test]
fn invalid_values_are_rejected_by_field() {
    let d = ReactorConfig::default;
    assert_eq!(rejected_field(ReactorConfig { initial_temperature: 0.0, ..d() }), "initial_temperature");
    assert_eq!(rejected_field(ReactorConfig { spark_temperature: -5.0, ..d() }), "spark_temperature");
    assert_eq!(rejected_field(ReactorConfig { time_step: -0.5, ..d() }), "time_step");
    assert_eq!(rejected_field(ReactorConfig { length_step: 0.0, ..d() }), "length_step");
    assert_eq!(rejected_field(ReactorConfig { density: 0.0, ..d() }), "density");
    assert_eq!(
        rejected_field(ReactorConfig { specific_heat_capacity: -1.0, ..d() }),
        "specific_heat_capacity"
    );
    assert_eq!(
        rejected_field(ReactorConfig { thermal_conductivity: f64::NAN, ..d() }),
        "thermal_conductivity"
    );
    assert_eq!(
        rejected_field(ReactorConfig { initial_concentration: -1.0, ..d() }),
        "initial_concentration"
    );
    assert_eq!(
        rejected_field(ReactorConfig { completion_threshold: 1.5, ..d() }),
        "completion_threshold"
    );
    assert_eq!(rejected_field(ReactorConfig { width: 0, ..d() }), "width");
    // Tiny but positive factors whose product underflows to zero.
    assert_eq!(
        rejected_field(ReactorConfig { length_step: 1e-120, density: 1e-200, ..d() }),
        "cell_heat_capacity"
    );
}

#[test]
fn out_of_bounds_probe_or_spark_is_rejected() {
    let cfg = ReactorConfig { probes: vec![ProbeSite::new("edge", 100, 3)], ..ReactorConfig::default() };
    assert!(matches!(
        cfg.validate(),
        Err(ReactorError::OutOfBounds { x: 100, y: 3, width: 100, height: 100 })
    ));

    let mut cfg = ReactorConfig { width: 10, height: 10, probes: Vec::new(), ..ReactorConfig::default() };
    cfg.spark.y = 10;
    assert!(matches!(RunState::initialize(cfg), Err(ReactorError::OutOfBounds { y: 10, .. })));
}

#[test]
fn initialize_rejects_invalid_configuration() {
    let cfg = ReactorConfig { initial_temperature: -1.0, ..ReactorConfig::default() };
    assert!(matches!(
        RunState::initialize(cfg),
        Err(ReactorError::InvalidConfiguration { field: "initial_temperature", .. })
    ));
}

#[test]
fn loads_toml_file() -> Result<(), ReactorError> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("reactor.toml");
    let mut f = std::fs::File::create(&path)?;
    writeln!(
        f,
        r#"
width = 40
height = 30
time_step = 0.25
coupling = "heat_and_species"
spark = {{ x = 2, y = 3 }}

[[probes]]
name = "mid"
x = 20
y = 15
"#
    )?;
    drop(f);

    let cfg = ReactorConfig::from_toml_file(&path)?;
    assert_eq!((cfg.width, cfg.height), (40, 30));
    assert_eq!(cfg.time_step, 0.25);
    assert_eq!(cfg.coupling, CouplingMode::HeatAndSpecies);
    assert_eq!((cfg.spark.x, cfg.spark.y), (2, 3));
    assert_eq!(cfg.probes, vec![ProbeSite::new("mid", 20, 15)]);
    assert_eq!(cfg.initial_concentration, 100.0);
    cfg.validate()?;
    Ok(())
}

#[test]
fn malformed_toml_is_a_parse_error() {
    assert!(matches!(
        ReactorConfig::from_toml_str("width = \"wide\""),
        Err(ReactorError::ConfigParse(_))
    ));
    assert!(matches!(
        ReactorConfig::from_toml_file("/nonexistent/reactor.toml"),
        Err(ReactorError::Io(_))
    ));
}
