//! Digit Recall Example
//!
//! Stores digit glyphs in a Hopfield network and recovers them from noisy
//! probes with both recall algorithms.
//!
//! Run with: cargo run --example digit_recall

use hopfield_digits::glyph::digit_pattern;
use hopfield_digits::hopfield::hamming_distance;
use hopfield_digits::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .init();

    println!("===========================================");
    println!("  Hopfield Network Digit Recall");
    println!("===========================================\n");

    let mut rng = StdRng::seed_from_u64(7);
    let nodes = GLYPH_ROWS * 4;

    // ===================================
    // Single stored pattern
    // ===================================
    println!("--- One stored digit ---");

    let zero = parse_pattern(DIGIT_PATTERNS[0], nodes)?;
    let mut network = HopfieldNetwork::new(nodes)?;
    network.train(&zero)?;

    println!("Stored pattern:");
    print!("{}", render_grid(&zero, GLYPH_ROWS)?);

    for flips in 1..=4 {
        let probe = flip_bits(&zero, flips, &mut rng);
        let sync = network.recognize(&probe)?;
        let recall = network.recall_async(&probe)?;

        println!(
            "  {} flipped bit(s): recognize {} | recall_async {} after {} sweep(s), energy {:?}",
            flips,
            if sync == zero { "ok" } else { "miss" },
            if recall.pattern == zero { "ok" } else { "miss" },
            recall.sweeps.len(),
            recall.final_energy()
        );
    }

    // ===================================
    // Cross-talk as more digits are stored
    // ===================================
    println!("\n--- Capacity and cross-talk ---");
    println!(
        "Estimated capacity for {} nodes: {} patterns",
        nodes,
        network.capacity_estimate()
    );

    network.clear();
    for digit in 0..DIGIT_PATTERNS.len() {
        let Some(glyph) = digit_pattern(digit) else {
            continue;
        };
        network.train(&glyph)?;

        let recalled = (0..=digit)
            .filter_map(digit_pattern)
            .filter(|stored| {
                network
                    .recall_async(stored)
                    .map(|result| result.pattern == *stored)
                    .unwrap_or(false)
            })
            .count();

        println!(
            "  {:>2} stored: {:>2} remain fixed points",
            network.pattern_count(),
            recalled
        );
    }

    // ===================================
    // Energy trace for one noisy probe
    // ===================================
    println!("\n--- Energy per sweep ---");

    let eight = parse_pattern(DIGIT_PATTERNS[8], nodes)?;
    let probe = flip_bits(&eight, 2, &mut rng);
    let mut trace = EnergyTrace::new();
    let result = network.recall_async_with(&probe, &mut trace)?;

    for report in &trace.reports {
        println!(
            "  Sweep {}: {} change(s), energy {}",
            report.sweep, report.changes, report.energy
        );
    }
    println!("  Non-increasing energy: {}", trace.is_non_increasing());
    println!(
        "  Distance from stored 8: {} bit(s)",
        hamming_distance(&result.pattern, &eight)
    );
    println!("Recalled state:");
    print!("{}", render_grid(&result.pattern, GLYPH_ROWS)?);

    Ok(())
}
