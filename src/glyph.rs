//! Digit glyph encoding
//!
//! Glyphs are bitmaps with [`GLYPH_ROWS`] rows, written as a string of
//! '0'/'1' characters in row-major order.

use rand::seq::index::sample;
use rand::Rng;

use crate::error::{Error, Result};
use crate::hopfield::{HopfieldNetwork, MAX_NODES};
use crate::matrix::Matrix;

/// Rows in every glyph
pub const GLYPH_ROWS: usize = 5;

/// Columns of the builtin digit glyphs
pub const DIGIT_COLUMNS: usize = 4;

/// Builtin 5x4 glyphs for the digits 0 through 9
pub const DIGIT_PATTERNS: [&str; 10] = [
    "11111001100110011111",
    "01100110011001101111",
    "11110001111110001111",
    "11110001111100011111",
    "10011001111100010001",
    "11111000111100011111",
    "11111000111110011111",
    "11110001000100010001",
    "11111001111110011111",
    "11111001111100010001",
];

/// Decode a '0'/'1' string of exactly `size` characters
pub fn parse_pattern(text: &str, size: usize) -> Result<Vec<f64>> {
    let text = text.trim();
    let length = text.chars().count();
    if length != size {
        return Err(Error::LengthMismatch {
            expected: size,
            actual: length,
        });
    }

    text.chars()
        .enumerate()
        .map(|(position, c)| match c {
            '0' => Ok(0.0),
            '1' => Ok(1.0),
            found => Err(Error::InvalidGlyph { position, found }),
        })
        .collect()
}

/// Encode a pattern back to text; anything other than 1 prints as '0'
pub fn format_pattern(pattern: &[f64]) -> String {
    pattern
        .iter()
        .map(|&v| if v == 1.0 { '1' } else { '0' })
        .collect()
}

/// Nodes for a `rows`×`columns` glyph, or `None` when empty, overflowing
/// or larger than [`MAX_NODES`]
pub fn glyph_nodes(rows: usize, columns: usize) -> Option<usize> {
    rows.checked_mul(columns)
        .filter(|nodes| (1..=MAX_NODES).contains(nodes))
}

/// Packed grid with `rows` lines, one digit per node
pub fn render_grid(pattern: &[f64], rows: usize) -> Result<String> {
    Ok(Matrix::reshape(pattern, rows)?.to_packed_string())
}

/// Builtin glyph for `digit` (0-9)
pub fn digit_pattern(digit: usize) -> Option<Vec<f64>> {
    DIGIT_PATTERNS
        .get(digit)
        .and_then(|text| parse_pattern(text, GLYPH_ROWS * DIGIT_COLUMNS).ok())
}

/// Train all ten builtin digits into `network`; it must have 20 nodes
pub fn train_digits(network: &mut HopfieldNetwork) -> Result<()> {
    for text in DIGIT_PATTERNS {
        let pattern = parse_pattern(text, network.node_count())?;
        network.train(&pattern)?;
    }
    Ok(())
}

/// Copy of `pattern` with `count` distinct positions flipped (0 ↔ 1)
pub fn flip_bits<R: Rng + ?Sized>(pattern: &[f64], count: usize, rng: &mut R) -> Vec<f64> {
    let mut noisy = pattern.to_vec();
    let count = count.min(pattern.len());

    for index in sample(rng, pattern.len(), count).into_iter() {
        noisy[index] = if noisy[index] == 0.0 { 1.0 } else { 0.0 };
    }

    noisy
}
