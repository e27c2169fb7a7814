//! Fuzz target: `DosingLimits::decode`
//!
//! Feeds arbitrary configuration-channel payloads into the decoder and
//! asserts that anything it accepts is a consistent limits record that the
//! controller will also accept.
//!
//! cargo fuzz run fuzz_limits_decode

#![no_main]

use infusion_safety::app::shared::SharedController;
use infusion_safety::config::DosingLimits;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(limits) = DosingLimits::decode(data) {
        assert!(limits.min_rate_mcg_per_kg_min <= limits.max_rate_mcg_per_kg_min);
        assert!(limits.max_delta_mcg_per_kg_min >= 0.0);

        let core = SharedController::new();
        let live = core.initialize(Some(limits)).ok().flatten();
        assert!(live.is_some_and(|l| l.current_within_bounds()));
        let rate = core.step(None).rate();
        assert_eq!(rate, limits.fallback_rate_mcg_per_kg_min);
    }
});
