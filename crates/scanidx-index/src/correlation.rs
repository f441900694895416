//! Pearson correlation between two index sequences.

use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pearson correlation coefficient of two equally long sequences.
///
/// Returns `None` when the lengths differ, fewer than two pairs are given,
/// or either sequence has zero variance. The computation is symmetric in
/// its arguments.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }

    let x = ArrayView1::from(xs);
    let y = ArrayView1::from(ys);
    let dx = &x - x.mean()?;
    let dy = &y - y.mean()?;

    let sxx = dx.dot(&dx);
    let syy = dy.dot(&dy);
    if sxx <= 0.0 || syy <= 0.0 {
        return None;
    }

    let r = dx.dot(&dy) / (sxx * syy).sqrt();
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

/// Qualitative reading of a correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CorrelationStrength {
    /// r >= 0.8
    VeryStrong,
    /// 0.6 <= r < 0.8
    Strong,
    /// 0.4 <= r < 0.6
    Moderate,
    /// 0.2 <= r < 0.4
    Weak,
    /// r < 0.2, including negative coefficients
    VeryWeak,
}

impl CorrelationStrength {
    /// Bucket a coefficient.
    pub fn classify(r: f64) -> Self {
        if r >= 0.8 {
            Self::VeryStrong
        } else if r >= 0.6 {
            Self::Strong
        } else if r >= 0.4 {
            Self::Moderate
        } else if r >= 0.2 {
            Self::Weak
        } else {
            Self::VeryWeak
        }
    }

    /// Human-readable label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::VeryStrong => "Very strong",
            Self::Strong => "Strong",
            Self::Moderate => "Moderate",
            Self::Weak => "Weak",
            Self::VeryWeak => "Very weak",
        }
    }
}

impl fmt::Display for CorrelationStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[test]
    fn test_perfect_correlation() {
        let r = pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap();
        assert_relative_eq!(r, 1.0, epsilon = 1e-12);

        let r = pearson(&[1.0, 2.0, 3.0], &[6.0, 4.0, 2.0]).unwrap();
        assert_relative_eq!(r, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_known_value() {
        // sxy = 8, sxx = syy = 10
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = [2.0, 1.0, 4.0, 3.0, 5.0];
        let r = pearson(&xs, &ys).unwrap();
        assert_relative_eq!(r, 0.8, epsilon = 1e-12);
    }

    #[test]
    fn test_symmetry() {
        let xs = [101.2, 99.8, 104.5, 107.1, 103.3];
        let ys = [98.0, 100.4, 102.9, 109.6, 101.0];
        assert_eq!(pearson(&xs, &ys), pearson(&ys, &xs));
    }

    #[test]
    fn test_undefined_cases() {
        assert_eq!(pearson(&[1.0], &[2.0]), None);
        assert_eq!(pearson(&[], &[]), None);
        assert_eq!(pearson(&[1.0, 2.0], &[3.0]), None);
        assert_eq!(pearson(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0]), None);
        assert_eq!(pearson(&[1.0, 2.0, 3.0], &[7.0, 7.0, 7.0]), None);
    }

    #[rstest]
    #[case(0.95, CorrelationStrength::VeryStrong)]
    #[case(0.8, CorrelationStrength::VeryStrong)]
    #[case(0.7, CorrelationStrength::Strong)]
    #[case(0.4, CorrelationStrength::Moderate)]
    #[case(0.25, CorrelationStrength::Weak)]
    #[case(0.1, CorrelationStrength::VeryWeak)]
    #[case(-0.9, CorrelationStrength::VeryWeak)]
    fn test_strength_buckets(#[case] r: f64, #[case] expected: CorrelationStrength) {
        assert_eq!(CorrelationStrength::classify(r), expected);
    }
}
