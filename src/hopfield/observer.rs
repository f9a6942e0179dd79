//! Step observers for training and recall
//!
//! Instead of a process-wide "show math" switch, every network operation
//! accepts a [`NetworkObserver`] that receives the intermediate results.
//! The plain methods on [`HopfieldNetwork`](super::HopfieldNetwork) pass
//! [`Silent`].

use std::fmt::Write;

use super::SweepReport;
use crate::matrix::Matrix;

/// Intermediate matrices of one training step
#[derive(Debug, Clone, Copy)]
pub struct TrainingStep<'a> {
    /// Bipolar pattern as a 1 x N matrix
    pub bipolar: &'a Matrix,
    /// Its N x 1 transpose
    pub transposed: &'a Matrix,
    /// transposed · bipolar
    pub outer: &'a Matrix,
    /// outer − I
    pub delta: &'a Matrix,
    /// Weights before the update
    pub previous: &'a Matrix,
    /// Weights after the update
    pub updated: &'a Matrix,
}

/// Receives intermediate values from network operations.
///
/// All hooks default to doing nothing.
pub trait NetworkObserver {
    /// Called once per successful `train`
    fn on_train(&mut self, _step: &TrainingStep<'_>) {}

    /// Called before `recognize` evaluates any node
    fn on_recognize(&mut self, _weights: &Matrix, _bipolar: &Matrix) {}

    /// Called for each node evaluated by `recognize`
    fn on_node(&mut self, _node: usize, _net: f64, _output: f64) {}

    /// Called after every asynchronous sweep
    fn on_sweep(&mut self, _report: &SweepReport) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl NetworkObserver for Silent {}

/// Collects the per-sweep diagnostics of asynchronous recall
#[derive(Debug, Clone, Default)]
pub struct EnergyTrace {
    pub reports: Vec<SweepReport>,
}

impl EnergyTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no sweep raised the energy above the previous one
    pub fn is_non_increasing(&self) -> bool {
        self.reports
            .windows(2)
            .all(|pair| pair[1].energy <= pair[0].energy)
    }
}

impl NetworkObserver for EnergyTrace {
    fn on_sweep(&mut self, report: &SweepReport) {
        self.reports.push(*report);
    }
}

/// Renders the step-by-step arithmetic as text
///
/// Writing into a `String` cannot fail, so `fmt::Result`s are dropped.
#[derive(Debug, Clone, Default)]
pub struct MathTranscript {
    text: String,
}

impl MathTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Return the accumulated text and start over
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }
}

impl NetworkObserver for MathTranscript {
    fn on_train(&mut self, step: &TrainingStep<'_>) {
        let t = &mut self.text;
        let _ = writeln!(t, "#-- train --#");
        let _ = writeln!(t, "#-- Calculate the Trained Matrix --#");
        let _ = writeln!(t, "1) Get the bipolar matrix \n{}", step.bipolar);
        let _ = writeln!(t, "2) Transpose the bipolar matrix:\n{}", step.transposed);
        let _ = writeln!(
            t,
            "3) (Transposed bipolar matrix) x (bipolar matrix):\n{}",
            step.outer
        );
        let _ = writeln!(t, "4) Trained matrix = (3) - (Identity Matrix):\n{}", step.delta);
        let _ = writeln!(t, "<-- Update Weight Matrix -->");
        let _ = writeln!(
            t,
            "current weight matrix:\n{}",
            step.previous.to_labeled_string("N", "N")
        );
        let _ = writeln!(
            t,
            "Updated Weight Matrix = (Trained Matrix) + (Current Weight Matrix)\n{}",
            step.updated.to_labeled_string("N", "N")
        );
    }

    fn on_recognize(&mut self, weights: &Matrix, bipolar: &Matrix) {
        let t = &mut self.text;
        let _ = writeln!(t, "#-- recognize --#");
        let _ = writeln!(t, "1) Weight matrix:\n{}", weights.to_labeled_string("N", "N"));
        let _ = writeln!(t, "2) Get the bipolar matrix for input \n{}", bipolar);
        let _ = writeln!(
            t,
            "3) dot product bipolar matrix & each of the columns in weight matrix"
        );
    }

    fn on_node(&mut self, node: usize, net: f64, output: f64) {
        let _ = write!(
            self.text,
            "[3.{:02}] (bipolar matrix) . (Weight matrix column {:02}) = ",
            node, node
        );
        let _ = if output > 0.0 {
            writeln!(self.text, " {:?}  > 0  ==>  1", net)
        } else {
            writeln!(self.text, "{:?} <= 0  ==>  0", net)
        };
    }

    fn on_sweep(&mut self, report: &SweepReport) {
        let _ = writeln!(
            self.text,
            "----\nRecall of {}-th state, {} change(s)\nEnergy:{:?}\n----",
            report.sweep, report.changes, report.energy
        );
    }
}
