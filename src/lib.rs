//! # Hopfield Digits
//!
//! A Rust library implementing a classical Hopfield network as an
//! associative memory for bitmap digit glyphs: train it on clean glyphs,
//! then reconstruct a stored glyph from a noisy or partial one.
//!
//! ## Features
//!
//! - Dimension-checked dense matrix algebra (`matrix`)
//! - Hebbian outer-product learning with zero self-connections
//! - One-shot synchronous recall and asynchronous recall to a stable state
//! - Energy (Lyapunov) diagnostics for every asynchronous sweep
//! - Observer hooks to display every intermediate step
//! - Glyph parsing/rendering and an interactive shell
//!
//! ## Quick Start
//!
//! ```rust
//! use hopfield_digits::prelude::*;
//!
//! fn main() -> hopfield_digits::Result<()> {
//!     let mut network = HopfieldNetwork::new(20)?;
//!     let zero = parse_pattern(DIGIT_PATTERNS[0], 20)?;
//!     network.train(&zero)?;
//!
//!     let noisy = parse_pattern("11111001100110011110", 20)?;
//!     let result = network.recall_async(&noisy)?;
//!
//!     assert!(result.converged);
//!     assert_eq!(result.pattern, zero);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod glyph;
pub mod hopfield;
pub mod matrix;
pub mod shell;

// Re-export main types for convenience
pub use config::Config;
pub use error::{Error, Result};
pub use hopfield::{HopfieldConfig, HopfieldNetwork, RecallResult, SweepReport};
pub use matrix::{Matrix, MatrixError, ScalarOp};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::glyph::{
        flip_bits, format_pattern, parse_pattern, render_grid, DIGIT_PATTERNS, GLYPH_ROWS,
    };
    pub use crate::hopfield::{
        from_bipolar, to_bipolar, EnergyTrace, HopfieldConfig, HopfieldNetwork, MathTranscript,
        NetworkObserver, RecallResult, Silent, SweepReport,
    };
    pub use crate::matrix::{Matrix, MatrixError, ScalarOp};
    pub use crate::shell::{Command, Mode, Session};
}
