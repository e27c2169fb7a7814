//! Runtime diagnostics for the control loop.
//!
//! Counters are updated once per cycle by the
//! [`ControlService`](crate::app::service::ControlService).  The most
//! recent fallback reasons are kept in a fixed-capacity ring so the
//! control path never allocates.

use heapless::Deque;
use serde::{Deserialize, Serialize};

use crate::control::law::FallbackReason;

/// Number of recent fallback reasons retained.
pub const RECENT_FALLBACKS: usize = 8;

/// Per-cycle counters since start-up (or the last reset).
#[derive(Debug, Clone, Default)]
pub struct CycleStats {
    cycles: u64,
    commits: u64,
    fallbacks: u64,
    alarms: u64,
    actuator_failures: u64,
    recent: Deque<FallbackReason, RECENT_FALLBACKS>,
}

impl CycleStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_commit(&mut self) {
        self.cycles = self.cycles.saturating_add(1);
        self.commits = self.commits.saturating_add(1);
    }

    pub fn record_fallback(&mut self, reason: FallbackReason) {
        self.cycles = self.cycles.saturating_add(1);
        self.fallbacks = self.fallbacks.saturating_add(1);
        if self.recent.is_full() {
            let _ = self.recent.pop_front();
        }
        // Cannot fail: a slot was freed above.
        let _ = self.recent.push_back(reason);
    }

    pub fn record_alarm(&mut self) {
        self.alarms = self.alarms.saturating_add(1);
    }

    pub fn record_actuator_failure(&mut self) {
        self.actuator_failures = self.actuator_failures.saturating_add(1);
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn commits(&self) -> u64 {
        self.commits
    }

    pub fn fallbacks(&self) -> u64 {
        self.fallbacks
    }

    pub fn alarms(&self) -> u64 {
        self.alarms
    }

    pub fn actuator_failures(&self) -> u64 {
        self.actuator_failures
    }

    pub fn last_fallback(&self) -> Option<FallbackReason> {
        self.recent.back().copied()
    }

    /// Recent fallback reasons, oldest first.
    pub fn recent_fallbacks(&self) -> impl Iterator<Item = FallbackReason> + '_ {
        self.recent.iter().copied()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Serialisable point-in-time copy for telemetry.
    pub fn snapshot(&self) -> StatsSnapshot {
        let mut recent = heapless::Vec::new();
        for reason in self.recent_fallbacks() {
            let _ = recent.push(reason);
        }
        StatsSnapshot {
            cycles: self.cycles,
            commits: self.commits,
            fallbacks: self.fallbacks,
            alarms: self.alarms,
            actuator_failures: self.actuator_failures,
            recent_fallbacks: recent,
        }
    }
}

/// Telemetry form of [`CycleStats`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub cycles: u64,
    pub commits: u64,
    pub fallbacks: u64,
    pub alarms: u64,
    pub actuator_failures: u64,
    pub recent_fallbacks: heapless::Vec<FallbackReason, RECENT_FALLBACKS>,
}
