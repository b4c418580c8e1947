//! End-to-end: YAML configuration, one session, every analysis

mod common;

use codegraph_bytecode::features::class_hierarchy::{ClassId, MissingClassCollector};
use codegraph_bytecode::features::scheduler::DetectorSelector;
use codegraph_bytecode::{AnalysisSession, EngineConfig, EngineError, Preset};
use common::*;
use pretty_assertions::assert_eq;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

const ENGINE_YAML: &str = r#"
version: 1
preset: thorough
overrides:
  dataflow:
    max_iterations: 200
    prune_implicit_exceptions: false
  parallel:
    num_workers: 2
    enable_rayon: true
"#;

#[test]
fn test_session_from_yaml_config() {
    let file = write_config(ENGINE_YAML);
    let config = EngineConfig::from_yaml(file.path().to_str().unwrap()).unwrap();
    assert_eq!(config.preset(), Preset::Thorough);
    assert_eq!(config.dataflow().max_iterations, 200);
    assert!(!config.value_numbering().profitable_fields_only);

    let collector = Arc::new(MissingClassCollector::new());
    let session = AnalysisSession::new(config, Arc::new(fixture_broken_chain()), collector.clone());

    let failures = session.load_classes(&[ClassId::new("app.C"), ClassId::new("app.Other")]);
    assert!(failures.is_empty());
    assert_eq!(collector.classes(), vec![ClassId::new("lib.Gone")]);
    assert_lookup_failure(session.oracle(), "app.C", "app.Other");

    // implicit exception edges are live, so the guarded dereference is not unconditional
    let cfgs = vec![GuardedDerefMethod::new(1, 0).build()];
    let summaries = session.unconditional_derefs(&cfgs);
    assert!(summaries[0].as_ref().unwrap().is_empty());
}

#[test]
fn test_default_session_end_to_end() {
    let mut session = AnalysisSession::with_provider(Arc::new(fixture_zoo()));

    assert_subtype(session.oracle(), "zoo.Puppy", "zoo.Pet");
    let summaries = session.unconditional_derefs(&[
        GuardedDerefMethod::new(2, 1).named("a").build(),
        GuardedDerefMethod::new(2, 1).named("b").with_bypass().build(),
    ]);
    assert_eq!(summaries[0].as_ref().unwrap().dereferenced_params, vec![1]);
    assert!(summaries[1].as_ref().unwrap().is_empty());

    let plan = session
        .plan_detectors(vec![
            registry("core", &["Collector", "Reporter"]).inter_pass(
                DetectorSelector::single("Collector"),
                DetectorSelector::single("Reporter"),
            ),
        ])
        .unwrap();
    assert_runs_before(&plan, "Collector", "Reporter");
    assert_eq!(plan.pass_count(), 2);

    let previous = session.id();
    session.reset();
    assert_ne!(session.id(), previous);
    assert_eq!(session.oracle().vertex_count(), 0);
}

#[test]
fn test_scheduling_error_surfaces_as_engine_error() {
    let session = AnalysisSession::with_provider(Arc::new(fixture_zoo()));
    let err = session
        .plan_detectors(vec![registry("a", &["X"]), registry("b", &["X"])])
        .unwrap_err();

    assert!(matches!(err, EngineError::Scheduling(_)));
    assert!(err.to_string().contains("'X'"));
}

#[test]
fn test_config_roundtrip_through_file() {
    let yaml = EngineConfig::preset(Preset::Fast)
        .value_numbering(|c| c.kill_loads_on_invoke(false))
        .to_yaml()
        .unwrap();
    let file = write_config(&yaml);

    let config = EngineConfig::from_yaml(file.path().to_str().unwrap()).unwrap();
    assert_eq!(config.preset(), Preset::Fast);
    assert!(!config.value_numbering().kill_loads_on_invoke);
}

#[test]
fn test_invalid_config_is_rejected() {
    let file = write_config("version: 1\npreset: balanced\noverrides:\n  dataflow:\n    max_iterations: 0\n");
    assert!(EngineConfig::from_yaml(file.path().to_str().unwrap()).is_err());
}
