//! Normalized Shannon diversity over a count distribution

/// Shannon entropy of `counts`, normalized by the maximum entropy for the
/// number of active (non-zero) categories. Returns a value in [0, 1].
///
/// - No activity (empty or all zeros) is 0, not undefined.
/// - A single active category is 0 (ln(1) = 0).
/// - All active categories equal is 1.
pub fn shannon_diversity_index(counts: &[u64]) -> f64 {
    let total: u64 = counts.iter().sum();
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;

    let (entropy, active) = counts
        .iter()
        .filter(|&&count| count > 0)
        .fold((0.0_f64, 0_usize), |(entropy, active), &count| {
            let proportion = count as f64 / total;
            (entropy - proportion * proportion.ln(), active + 1)
        });

    let max_entropy = (active as f64).ln();
    if max_entropy > 0.0 {
        (entropy / max_entropy).clamp(0.0, 1.0)
    } else {
        0.0
    }
}
