//! Hopfield associative memory
//!
//! This module provides a classical (1982) binary Hopfield network trained
//! with the Hebbian outer-product rule, plus two recall procedures:
//!
//! - [`HopfieldNetwork::recognize`]: one synchronous pass, every node
//!   thresholded against the original input (`net > 0 → 1`)
//! - [`HopfieldNetwork::recall_async`]: asynchronous sweeps in fixed node
//!   order until a sweep changes nothing (`net ≥ 0 → 1`)
//!
//! The two methods intentionally use different tie-breaks at `net == 0`.
//! The asynchronous loop also starts from the bipolar `{-1, +1}` encoding
//! but writes `{0, 1}` values back into the state. Both behaviors are kept
//! as they are; whether they should be unified is an open question.

pub mod network;
pub mod observer;

pub use network::HopfieldNetwork;
pub use observer::{EnergyTrace, MathTranscript, NetworkObserver, Silent, TrainingStep};

use serde::{Deserialize, Serialize};

/// Fraction of the node count a classical network stores reliably
pub const CAPACITY_RATIO: f64 = 0.15;

/// Largest network `HopfieldNetwork::new` will allocate (N² weights)
pub const MAX_NODES: usize = 4096;

/// Configuration for recall behavior
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HopfieldConfig {
    /// Optional hard cap on asynchronous sweeps.
    ///
    /// `None` runs until a sweep produces no changes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_sweeps: Option<usize>,
}

/// Diagnostics for one asynchronous sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepReport {
    /// 1-based sweep index
    pub sweep: usize,
    /// Number of nodes whose value changed during the sweep
    pub changes: usize,
    /// Energy of the state after the sweep
    pub energy: f64,
}

/// Result of asynchronous recall
#[derive(Debug, Clone)]
pub struct RecallResult {
    /// Final state, values in {0, 1}
    pub pattern: Vec<f64>,
    /// One report per sweep, in order
    pub sweeps: Vec<SweepReport>,
    /// False only when `max_sweeps` stopped the loop first
    pub converged: bool,
}

impl RecallResult {
    /// Energy after the last sweep
    pub fn final_energy(&self) -> Option<f64> {
        self.sweeps.last().map(|s| s.energy)
    }

    /// (sweep index, energy) pairs
    pub fn energies(&self) -> Vec<(usize, f64)> {
        self.sweeps.iter().map(|s| (s.sweep, s.energy)).collect()
    }
}

/// Map a {0, 1} pattern to {-1, +1}: exactly 0 becomes -1, anything else +1
pub fn to_bipolar(pattern: &[f64]) -> Vec<f64> {
    pattern
        .iter()
        .map(|&x| if x == 0.0 { -1.0 } else { 1.0 })
        .collect()
}

/// Map a bipolar pattern back to {0, 1}: exactly +1 becomes 1, anything else 0
pub fn from_bipolar(bipolar: &[f64]) -> Vec<f64> {
    bipolar
        .iter()
        .map(|&x| if x == 1.0 { 1.0 } else { 0.0 })
        .collect()
}

/// Number of positions where two patterns differ
pub fn hamming_distance(a: &[f64], b: &[f64]) -> usize {
    a.iter().zip(b.iter()).filter(|(x, y)| x != y).count()
        + a.len().abs_diff(b.len())
}
