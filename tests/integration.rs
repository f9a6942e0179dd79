//! Integration tests for the Hopfield digit recognizer

use approx::assert_abs_diff_eq;
use hopfield_digits::glyph::{digit_pattern, train_digits};
use hopfield_digits::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const ZERO: &str = "11111001100110011111";

fn glyph(text: &str) -> Vec<f64> {
    parse_pattern(text, text.len()).unwrap()
}

fn random_pattern(rng: &mut StdRng, n: usize) -> Vec<f64> {
    (0..n).map(|_| rng.gen_range(0..=1) as f64).collect()
}

/// bᵀb − I for one pattern
fn hebbian_delta(pattern: &[f64]) -> Matrix {
    let row = Matrix::row_matrix(&to_bipolar(pattern));
    row.transpose()
        .multiply(&row)
        .unwrap()
        .subtract(&Matrix::identity(pattern.len()))
        .unwrap()
}

#[test]
fn test_weights_symmetric_zero_diagonal_after_every_train() {
    let mut rng = StdRng::seed_from_u64(11);
    let mut network = HopfieldNetwork::new(30).unwrap();

    for _ in 0..12 {
        network.train(&random_pattern(&mut rng, 30)).unwrap();

        let w = network.weights();
        assert!(w.is_symmetric());
        assert!(w.diagonal().iter().all(|&d| d == 0.0));
    }
}

#[test]
fn test_training_is_additive_and_commutative() {
    let p1 = glyph(DIGIT_PATTERNS[2]);
    let p2 = glyph(DIGIT_PATTERNS[7]);

    let mut forward = HopfieldNetwork::new(20).unwrap();
    forward.train(&p1).unwrap();
    forward.train(&p2).unwrap();

    let mut backward = HopfieldNetwork::new(20).unwrap();
    backward.train(&p2).unwrap();
    backward.train(&p1).unwrap();

    assert_eq!(forward.weights(), backward.weights());

    let sum = hebbian_delta(&p1).add(&hebbian_delta(&p2)).unwrap();
    assert_eq!(forward.weights(), &sum);
}

#[test]
fn test_single_pattern_is_recalled_exactly() {
    for digit in 0..DIGIT_PATTERNS.len() {
        let pattern = digit_pattern(digit).unwrap();
        let mut network = HopfieldNetwork::new(20).unwrap();
        network.train(&pattern).unwrap();

        assert_eq!(network.recognize(&pattern).unwrap(), pattern, "digit {}", digit);
        assert_eq!(network.recall_async(&pattern).unwrap().pattern, pattern);
    }
}

#[test]
fn test_one_bit_noise_is_corrected() {
    let original = glyph(ZERO);
    let mut network = HopfieldNetwork::new(20).unwrap();
    network.train(&original).unwrap();

    for flip in 0..original.len() {
        let mut probe = original.clone();
        probe[flip] = 1.0 - probe[flip];

        assert_eq!(network.recognize(&probe).unwrap(), original, "flip {}", flip);

        let result = network.recall_async(&probe).unwrap();
        assert!(result.converged);
        assert_eq!(result.pattern, original, "flip {}", flip);
    }
}

#[test]
fn test_recall_converges_for_random_symmetric_weights() {
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..200 {
        let n = rng.gen_range(2..=16);
        let mut rows = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in (i + 1)..n {
                let w = rng.gen_range(-5..=5) as f64;
                rows[i][j] = w;
                rows[j][i] = w;
            }
        }

        let network = HopfieldNetwork::from_weights(Matrix::from_rows(&rows).unwrap()).unwrap();
        let probe = random_pattern(&mut rng, n);

        let mut trace = EnergyTrace::new();
        let result = network.recall_async_with(&probe, &mut trace).unwrap();

        assert!(result.converged);
        assert!(trace.is_non_increasing(), "energies: {:?}", result.energies());
        assert!(result.pattern.iter().all(|&v| v == 0.0 || v == 1.0));

        assert_eq!(result.sweeps.last().unwrap().changes, 0);
        assert_abs_diff_eq!(
            network.energy(&result.pattern).unwrap(),
            result.final_energy().unwrap(),
            epsilon = 1e-9
        );
    }
}

#[test]
fn test_reshape_round_trip() {
    let mut rng = StdRng::seed_from_u64(5);

    for _ in 0..50 {
        let rows = rng.gen_range(1..=6);
        let cols = rng.gen_range(1..=6);
        let values: Vec<Vec<f64>> = (0..rows)
            .map(|_| (0..cols).map(|_| rng.gen_range(-10.0..10.0)).collect())
            .collect();
        let m = Matrix::from_rows(&values).unwrap();

        assert_eq!(Matrix::reshape(&m.flatten(), m.rows()).unwrap(), m);
    }
}

#[test]
fn test_clear_gives_all_zero_recognition() {
    let mut network = HopfieldNetwork::new(20).unwrap();
    train_digits(&mut network).unwrap();
    network.clear();

    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..10 {
        let probe = random_pattern(&mut rng, 20);
        assert_eq!(network.recognize(&probe).unwrap(), vec![0.0; 20]);
    }
}

#[test]
fn test_shape_mismatch_errors_leave_operands_intact() {
    let a = Matrix::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
    let b = Matrix::identity(2);
    let (a0, b0) = (a.clone(), b.clone());

    assert!(matches!(a.add(&b), Err(MatrixError::DimensionMismatch { .. })));
    assert!(matches!(a.multiply(&b), Err(MatrixError::DimensionMismatch { .. })));
    assert!(matches!(a.dot_product(&b), Err(MatrixError::NotAVector { .. })));
    assert!(matches!(
        Matrix::row_matrix(&[1.0, 2.0]).dot_product(&Matrix::row_matrix(&[1.0])),
        Err(MatrixError::DimensionMismatch { .. })
    ));

    assert_eq!(a, a0);
    assert_eq!(b, b0);
}

#[test]
fn test_length_mismatch_at_api_boundary() {
    let mut network = HopfieldNetwork::new(20).unwrap();
    let short = vec![1.0; 19];

    assert!(matches!(network.train(&short), Err(Error::LengthMismatch { .. })));
    assert!(matches!(network.recognize(&short), Err(Error::LengthMismatch { .. })));
    assert!(matches!(network.recall_async(&short), Err(Error::LengthMismatch { .. })));
    assert_eq!(network.pattern_count(), 0);
}

#[test]
fn test_math_transcript_records_training() {
    let mut network = HopfieldNetwork::new(20).unwrap();
    let mut transcript = MathTranscript::new();
    network.train_with(&glyph(ZERO), &mut transcript).unwrap();

    let text = transcript.take();
    assert!(text.contains("4) Trained matrix = (3) - (Identity Matrix):"));
    assert!(text.contains("Updated Weight Matrix"));
    assert!(text.contains("N19 |"));
}
