//! Shared numeric primitives for the scoring engines.
//!
//! All functions are pure. Callers must guarantee positive half-lives
//! and caps; negative values there are programming errors, not runtime
//! conditions these functions defend against.

/// Exponential time decay: `exp(-ln2 * elapsed / half_life)`, clamped to
/// `[0, 1]`. Anything with `elapsed <= 0` is "just now" and decays to 1.
pub fn decay(elapsed: f64, half_life: f64) -> f64 {
    if elapsed <= 0.0 {
        return 1.0;
    }
    (-std::f64::consts::LN_2 * elapsed / half_life)
        .exp()
        .clamp(0.0, 1.0)
}

/// Logarithmic frequency compression: `min(1, ln(1+count)/ln(1+cap))`.
/// Zero or negative counts compress to 0.
pub fn log_compress(count: f64, cap: f64) -> f64 {
    if count <= 0.0 {
        return 0.0;
    }
    ((1.0 + count).ln() / (1.0 + cap).ln()).min(1.0)
}

/// Weighted sum of `(weight, value)` terms. Callers clamp the result to
/// whatever range their engine defines.
pub fn weighted_sum(terms: &[(f64, f64)]) -> f64 {
    terms.iter().map(|(w, v)| w * v).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decay_at_zero_or_negative_elapsed() {
        assert_eq!(decay(0.0, 168.0), 1.0);
        assert_eq!(decay(-5.0, 168.0), 1.0);
    }

    #[test]
    fn test_decay_halves_at_half_life() {
        assert!((decay(168.0, 168.0) - 0.5).abs() < 1e-9);
        assert!((decay(336.0, 168.0) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_decay_bounded() {
        assert!(decay(1e9, 168.0) >= 0.0);
        assert!(decay(0.001, 168.0) <= 1.0);
    }

    #[test]
    fn test_log_compress_zero_and_negative() {
        assert_eq!(log_compress(0.0, 50.0), 0.0);
        assert_eq!(log_compress(-3.0, 50.0), 0.0);
    }

    #[test]
    fn test_log_compress_saturates_at_cap() {
        assert!((log_compress(50.0, 50.0) - 1.0).abs() < 1e-9);
        assert_eq!(log_compress(500.0, 50.0), 1.0);
    }

    #[test]
    fn test_log_compress_monotonic_and_bounded() {
        let mut prev = 0.0;
        for count in 0..200 {
            let v = log_compress(count as f64, 50.0);
            assert!(v >= prev, "not monotonic at count={}", count);
            assert!((0.0..=1.0).contains(&v));
            prev = v;
        }
    }

    #[test]
    fn test_weighted_sum() {
        let terms = [(0.5, 1.0), (0.3, 0.5), (0.2, 0.0)];
        assert!((weighted_sum(&terms) - 0.65).abs() < 1e-9);
        assert_eq!(weighted_sum(&[]), 0.0);
    }

    #[test]
    fn test_weighted_sum_with_negative_weight() {
        // Skip penalties enter as negative weights.
        let terms = [(0.35, 1.0), (-0.10, 1.0)];
        assert!((weighted_sum(&terms) - 0.25).abs() < 1e-9);
    }
}
