//! Fuzz target: `safety_step`
//!
//! Interprets the input as a sequence of raw f32 samples and drives them
//! through the control law.  Asserts that no cycle panics, every fallback
//! commands the fallback rate, and committed rates stay inside the bounds.
//!
//! cargo fuzz run fuzz_safety_step

#![no_main]

use infusion_safety::config::DosingLimits;
use infusion_safety::control::ControlInputs;
use infusion_safety::control::law::{Decision, MIN_CONFIDENCE, safety_step};
use libfuzzer_sys::fuzz_target;

fn f32_at(chunk: &[u8], i: usize) -> f32 {
    let mut b = [0u8; 4];
    b.copy_from_slice(&chunk[i * 4..i * 4 + 4]);
    f32::from_le_bytes(b)
}

fuzz_target!(|data: &[u8]| {
    let mut limits = DosingLimits::default();

    for chunk in data.chunks_exact(16) {
        let inputs = ControlInputs {
            predicted_map_mmhg: f32_at(chunk, 0),
            hypotension_risk: f32_at(chunk, 1),
            confidence: f32_at(chunk, 2),
            clinician_target_map_mmhg: f32_at(chunk, 3),
        };
        // An all-zero chunk stands in for a missing sample.
        let sample = if chunk.iter().all(|b| *b == 0) { None } else { Some(&inputs) };

        match safety_step(&mut limits, sample, MIN_CONFIDENCE) {
            Decision::Fallback { rate, .. } => {
                assert_eq!(rate, limits.fallback_rate_mcg_per_kg_min);
            }
            Decision::Commit { rate, .. } => {
                assert!(rate >= limits.min_rate_mcg_per_kg_min);
                assert!(rate <= limits.max_rate_mcg_per_kg_min);
            }
        }
    }
});
