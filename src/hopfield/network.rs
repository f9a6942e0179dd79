//! Classical binary Hopfield network
//!
//! Weights are learned with the Hebbian outer-product rule, self-correlation
//! removed: `W += bᵀb − I` for each bipolar pattern `b`. The weight matrix
//! therefore stays symmetric with a zero diagonal after every training step,
//! which is what makes asynchronous recall converge.

use tracing::{debug, info, trace, warn};

use super::observer::{NetworkObserver, Silent, TrainingStep};
use super::{to_bipolar, HopfieldConfig, RecallResult, SweepReport, CAPACITY_RATIO, MAX_NODES};
use crate::error::{Error, Result};
use crate::matrix::Matrix;

/// Hopfield network owning a single N x N weight matrix
///
/// # Example
///
/// ```rust
/// use hopfield_digits::hopfield::HopfieldNetwork;
///
/// let zero = [1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0,
///             0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0];
///
/// let mut network = HopfieldNetwork::new(20).unwrap();
/// network.train(&zero).unwrap();
///
/// let mut noisy = zero;
/// noisy[6] = 1.0;
///
/// assert_eq!(network.recognize(&noisy).unwrap(), zero.to_vec());
/// assert_eq!(network.recall_async(&noisy).unwrap().pattern, zero.to_vec());
/// ```
#[derive(Debug, Clone)]
pub struct HopfieldNetwork {
    /// Symmetric, zero-diagonal weight matrix
    weights: Matrix,
    /// Number of nodes (N)
    node_count: usize,
    /// Patterns trained since construction or the last clear
    pattern_count: usize,
    config: HopfieldConfig,
}

impl HopfieldNetwork {
    /// Create a network with `node_count` nodes and zero weights
    pub fn new(node_count: usize) -> Result<Self> {
        Self::with_config(node_count, HopfieldConfig::default())
    }

    /// Create with custom configuration
    pub fn with_config(node_count: usize, config: HopfieldConfig) -> Result<Self> {
        if node_count == 0 || node_count > MAX_NODES {
            return Err(Error::InvalidNodeCount(node_count));
        }

        Ok(Self {
            weights: Matrix::zeros(node_count, node_count),
            node_count,
            pattern_count: 0,
            config,
        })
    }

    /// Adopt an existing weight matrix.
    ///
    /// The matrix must be square, symmetric and have a zero diagonal.
    pub fn from_weights(weights: Matrix) -> Result<Self> {
        let (rows, cols) = weights.shape();
        if rows != cols {
            return Err(Error::InvalidWeights(format!(
                "expected a square matrix, got {}x{}",
                rows, cols
            )));
        }
        if rows == 0 {
            return Err(Error::InvalidNodeCount(0));
        }
        if !weights.is_symmetric() {
            return Err(Error::InvalidWeights("matrix is not symmetric".to_string()));
        }
        if let Some((i, v)) = weights
            .diagonal()
            .into_iter()
            .enumerate()
            .find(|(_, v)| *v != 0.0)
        {
            return Err(Error::InvalidWeights(format!(
                "diagonal entry {} is {}, expected 0",
                i, v
            )));
        }

        Ok(Self {
            weights,
            node_count: rows,
            pattern_count: 0,
            config: HopfieldConfig::default(),
        })
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    pub fn config(&self) -> &HopfieldConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: HopfieldConfig) {
        self.config = config;
    }

    /// Rough number of patterns storable before cross-talk dominates (0.15·N)
    pub fn capacity_estimate(&self) -> usize {
        (CAPACITY_RATIO * self.node_count as f64).floor() as usize
    }

    fn check_length(&self, pattern: &[f64]) -> Result<()> {
        if pattern.len() != self.node_count {
            return Err(Error::LengthMismatch {
                expected: self.node_count,
                actual: pattern.len(),
            });
        }
        Ok(())
    }

    /// Superpose a {0, 1} pattern into the weights
    pub fn train(&mut self, pattern: &[f64]) -> Result<()> {
        self.train_with(pattern, &mut Silent)
    }

    /// [`train`](Self::train), reporting intermediate matrices to `observer`
    pub fn train_with(
        &mut self,
        pattern: &[f64],
        observer: &mut dyn NetworkObserver,
    ) -> Result<()> {
        self.check_length(pattern)?;

        let bipolar = Matrix::row_matrix(&to_bipolar(pattern));
        let transposed = bipolar.transpose();
        let outer = transposed.multiply(&bipolar)?;
        let delta = outer.subtract(&Matrix::identity(self.node_count))?;
        let updated = self.weights.add(&delta)?;

        observer.on_train(&TrainingStep {
            bipolar: &bipolar,
            transposed: &transposed,
            outer: &outer,
            delta: &delta,
            previous: &self.weights,
            updated: &updated,
        });

        self.weights = updated;
        self.pattern_count += 1;

        info!(
            patterns = self.pattern_count,
            nodes = self.node_count,
            "Trained pattern"
        );
        if self.pattern_count == self.capacity_estimate() + 1 {
            warn!(
                patterns = self.pattern_count,
                capacity = self.capacity_estimate(),
                "Stored patterns exceed estimated capacity, expect cross-talk"
            );
        }

        Ok(())
    }

    /// One synchronous pass: `output[i] = 1` iff `b · W[:, i] > 0`
    pub fn recognize(&self, pattern: &[f64]) -> Result<Vec<f64>> {
        self.recognize_with(pattern, &mut Silent)
    }

    /// [`recognize`](Self::recognize), reporting each node's net input
    pub fn recognize_with(
        &self,
        pattern: &[f64],
        observer: &mut dyn NetworkObserver,
    ) -> Result<Vec<f64>> {
        self.check_length(pattern)?;

        let bipolar = Matrix::row_matrix(&to_bipolar(pattern));
        observer.on_recognize(&self.weights, &bipolar);

        let mut output = Vec::with_capacity(self.node_count);
        for node in 0..self.node_count {
            let column = self.weights.column(node)?;
            let net = bipolar.dot_product(&column)?;
            // Ties go to 0
            let value = if net > 0.0 { 1.0 } else { 0.0 };

            trace!(node, net, value, "Recognize node");
            observer.on_node(node, net, value);
            output.push(value);
        }

        Ok(output)
    }

    /// Asynchronous recall until a sweep changes no node
    pub fn recall_async(&self, pattern: &[f64]) -> Result<RecallResult> {
        self.recall_async_with(pattern, &mut Silent)
    }

    /// [`recall_async`](Self::recall_async), reporting every sweep
    pub fn recall_async_with(
        &self,
        pattern: &[f64],
        observer: &mut dyn NetworkObserver,
    ) -> Result<RecallResult> {
        self.check_length(pattern)?;

        let w = self.weights.as_array();
        let mut state = to_bipolar(pattern);
        let mut sweeps: Vec<SweepReport> = Vec::new();

        let converged = loop {
            let sweep = sweeps.len() + 1;
            let mut changes = 0;

            // Gauss-Seidel order: node i sees nodes < i already updated
            for i in 0..self.node_count {
                let net: f64 = w
                    .row(i)
                    .iter()
                    .zip(state.iter())
                    .map(|(weight, value)| weight * value)
                    .sum();
                // Ties go to 1
                let next = if net >= 0.0 { 1.0 } else { 0.0 };

                if next != state[i] {
                    state[i] = next;
                    changes += 1;
                }
            }

            let report = SweepReport {
                sweep,
                changes,
                energy: self.energy(&state)?,
            };
            debug!(sweep, changes, energy = report.energy, "Recall sweep");
            observer.on_sweep(&report);
            sweeps.push(report);

            if changes == 0 {
                break true;
            }
            if matches!(self.config.max_sweeps, Some(max) if sweep >= max) {
                warn!(sweeps = sweep, "Recall stopped at sweep cap before converging");
                break false;
            }
        };

        Ok(RecallResult {
            pattern: state,
            sweeps,
            converged,
        })
    }

    /// E(v) = −½ Σ_{a≠b} W[a][b]·v[a]·v[b]
    pub fn energy(&self, state: &[f64]) -> Result<f64> {
        self.check_length(state)?;

        let mut sum = 0.0;
        for (a, row) in self.weights.as_array().rows().into_iter().enumerate() {
            for (b, weight) in row.iter().enumerate() {
                if a != b {
                    sum += weight * state[a] * state[b];
                }
            }
        }

        Ok(-0.5 * sum)
    }

    /// Forget every trained association
    pub fn clear(&mut self) {
        self.weights.clear();
        self.pattern_count = 0;
        info!(nodes = self.node_count, "Weight matrix cleared");
    }
}
