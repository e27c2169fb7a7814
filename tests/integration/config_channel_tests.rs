//! Integration tests for limits updates arriving over the configuration channel.

use crate::mock_hw::{MockPump, RecordingSink};

use infusion_safety::app::commands::ControllerCommand;
use infusion_safety::app::events::ControllerEvent;
use infusion_safety::app::service::ControlService;
use infusion_safety::app::shared::SharedController;
use infusion_safety::{ConfigError, ControlInputs, DosingLimits, Error};

fn sample() -> ControlInputs {
    ControlInputs {
        predicted_map_mmhg: 55.0,
        hypotension_risk: 0.7,
        confidence: 0.8,
        clinician_target_map_mmhg: 65.0,
    }
}

#[test]
fn decoded_payload_replaces_limits() {
    let core = SharedController::new();
    let mut svc = ControlService::new(&core);
    let mut sink = RecordingSink::new();

    let update = DosingLimits {
        current_rate_mcg_per_kg_min: 0.2,
        min_rate_mcg_per_kg_min: 0.1,
        max_rate_mcg_per_kg_min: 0.25,
        max_delta_mcg_per_kg_min: 0.1,
        fallback_rate_mcg_per_kg_min: 0.1,
    };
    let payload = update.encode().unwrap();
    let decoded = DosingLimits::decode(&payload).unwrap();

    svc.handle_command(ControllerCommand::SetLimits(decoded), &mut sink)
        .unwrap();
    assert_eq!(sink.last(), Some(&ControllerEvent::LimitsApplied(update)));

    let mut hw = MockPump::new();
    let out = svc.step(Some(&sample()), &mut hw, &mut sink);
    assert_eq!(out.commanded_rate_mcg_per_kg_min, 0.25, "clamped to the new ceiling");
}

#[test]
fn rejected_update_keeps_running_limits() {
    let core = SharedController::new();
    let mut svc = ControlService::new(&core);
    let mut sink = RecordingSink::new();
    svc.handle_command(ControllerCommand::Initialize(DosingLimits::default()), &mut sink)
        .unwrap();

    let inverted = DosingLimits {
        min_rate_mcg_per_kg_min: 0.5,
        max_rate_mcg_per_kg_min: 0.4,
        ..DosingLimits::default()
    };
    let err = svc
        .handle_command(ControllerCommand::SetLimits(inverted), &mut sink)
        .unwrap_err();

    assert_eq!(
        err,
        Error::Config(ConfigError::ValidationFailed("min_rate must be <= max_rate"))
    );
    assert_eq!(core.limits(), Some(DosingLimits::default()));
}

#[test]
fn initialize_resets_diagnostics_but_set_limits_does_not() {
    let core = SharedController::new();
    let mut svc = ControlService::new(&core);
    let mut sink = RecordingSink::new();
    let mut hw = MockPump::new();

    svc.handle_command(ControllerCommand::Initialize(DosingLimits::default()), &mut sink)
        .unwrap();
    svc.step(None, &mut hw, &mut sink);
    svc.handle_command(ControllerCommand::SetLimits(DosingLimits::default()), &mut sink)
        .unwrap();
    assert_eq!(svc.stats().cycles(), 1);

    svc.handle_command(ControllerCommand::Initialize(DosingLimits::default()), &mut sink)
        .unwrap();
    assert_eq!(svc.stats().cycles(), 0);

    svc.step(None, &mut hw, &mut sink);
    svc.handle_command(ControllerCommand::ResetDiagnostics, &mut sink)
        .unwrap();
    assert_eq!(svc.stats().fallbacks(), 0);
}

#[test]
fn corrupted_payload_is_not_applied() {
    let core = SharedController::new();
    core.initialize(Some(DosingLimits::default())).unwrap();

    let result = DosingLimits::decode(&[0xff, 0x01]);
    assert_eq!(result, Err(ConfigError::Corrupted));
    assert_eq!(core.set_limits(result.ok()), Ok(None));
    assert_eq!(core.limits(), Some(DosingLimits::default()));
}

#[test]
fn startup_json_bootstraps_controller() {
    let json = r#"{
        "current_rate_mcg_per_kg_min": 0.0,
        "min_rate_mcg_per_kg_min": 0.02,
        "max_rate_mcg_per_kg_min": 1.0,
        "max_delta_mcg_per_kg_min": 0.1,
        "fallback_rate_mcg_per_kg_min": 0.05
    }"#;
    let limits = DosingLimits::from_json(json).unwrap();

    let core = SharedController::new();
    let live = core.initialize(Some(limits)).unwrap();
    assert_eq!(live.map(|l| l.current_rate_mcg_per_kg_min), Some(0.02));

    let mut svc = ControlService::new(&core);
    let mut hw = MockPump::new();
    let over_target = ControlInputs {
        predicted_map_mmhg: 80.0,
        ..sample()
    };
    let out = svc.step(Some(&over_target), &mut hw, &mut RecordingSink::new());
    assert_eq!(out.commanded_rate_mcg_per_kg_min, 0.02, "bootstrap rate starts at the floor");
}
