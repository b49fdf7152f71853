//! Pairwise Pearson correlation across asset return series.

use cryptodash_core::error::ensure_same_length;
use cryptodash_indicators::simd::{dot_product_simd, mean_simd};
use serde::{Deserialize, Serialize};

use crate::{reject, RiskError, RiskResult};

const COMPUTATION: &str = "correlation_matrix";

/// Square, symmetric matrix of correlation coefficients with a unit diagonal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    size: usize,
    values: Vec<f64>,
}

impl CorrelationMatrix {
    /// Correlate every pair of return series.
    ///
    /// All series must have the same length (at least two observations) and
    /// a non-zero standard deviation.
    pub fn from_returns<S: AsRef<[f64]>>(series: &[S]) -> RiskResult<Self> {
        let labels: Vec<String> = (0..series.len()).map(|i| format!("series {i}")).collect();
        let lengths: Vec<(&str, usize)> = labels
            .iter()
            .zip(series)
            .map(|(label, s)| (label.as_str(), s.as_ref().len()))
            .collect();

        ensure_same_length(&lengths).map_err(|reason| {
            reject(RiskError::ShapeMismatch {
                computation: COMPUTATION,
                reason,
            })
        })?;

        let size = series.len();
        let observations = series.first().map_or(0, |s| s.as_ref().len());
        if size > 0 && observations < 2 {
            return Err(reject(RiskError::degenerate(
                COMPUTATION,
                format!("need at least 2 observations per series, have {observations}"),
            )));
        }

        // Center each series once; covariance and variance are then dot products.
        let centered: Vec<Vec<f64>> = series
            .iter()
            .map(|s| {
                let s = s.as_ref();
                let mean = mean_simd(s).unwrap_or(0.0);
                s.iter().map(|x| x - mean).collect()
            })
            .collect();

        let norms: Vec<f64> = centered
            .iter()
            .map(|c| dot_product_simd(c, c).sqrt())
            .collect();

        if let Some(flat) = norms.iter().position(|&n| n == 0.0) {
            return Err(reject(RiskError::degenerate(
                COMPUTATION,
                format!("series {flat} has zero standard deviation"),
            )));
        }

        let mut values = vec![0.0; size * size];
        for i in 0..size {
            values[i * size + i] = 1.0;
            for j in (i + 1)..size {
                let r = dot_product_simd(&centered[i], &centered[j]) / (norms[i] * norms[j]);
                let r = r.clamp(-1.0, 1.0);
                values[i * size + j] = r;
                values[j * size + i] = r;
            }
        }

        Ok(Self { size, values })
    }

    /// Number of assets.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Coefficient between assets `i` and `j`.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        (i < self.size && j < self.size).then(|| self.values[i * self.size + j])
    }

    /// Rows of the matrix.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks(self.size.max(1))
    }

    /// Nested-vector form.
    pub fn to_nested(&self) -> Vec<Vec<f64>> {
        self.rows().map(<[f64]>::to_vec).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_correlation() {
        let a = vec![0.01, 0.02, -0.01, 0.03];
        let b: Vec<f64> = a.iter().map(|x| x * 2.0).collect();
        let c: Vec<f64> = a.iter().map(|x| -x).collect();

        let matrix = CorrelationMatrix::from_returns(&[a, b, c]).unwrap();

        assert_eq!(matrix.len(), 3);
        assert!((matrix.get(0, 1).unwrap() - 1.0).abs() < 1e-12);
        assert!((matrix.get(0, 2).unwrap() + 1.0).abs() < 1e-12);
        assert_eq!(matrix.get(3, 0), None);
    }

    #[test]
    fn test_known_coefficient() {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = vec![2.0, 1.0, 4.0, 3.0, 5.0];

        let matrix = CorrelationMatrix::from_returns(&[x, y]).unwrap();
        // cov = 8/5, var_x = var_y = 2
        assert!((matrix.get(0, 1).unwrap() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_symmetric_unit_diagonal() {
        let series = vec![
            vec![0.01, -0.02, 0.015, 0.0, 0.03],
            vec![0.02, 0.01, -0.01, 0.005, 0.0],
            vec![-0.01, 0.0, 0.02, 0.01, -0.02],
        ];
        let matrix = CorrelationMatrix::from_returns(&series).unwrap();

        for i in 0..3 {
            assert_eq!(matrix.get(i, i), Some(1.0));
            for j in 0..3 {
                assert_eq!(matrix.get(i, j), matrix.get(j, i));
            }
        }
        assert_eq!(matrix.to_nested().len(), 3);
    }

    #[test]
    fn test_length_mismatch() {
        let err = CorrelationMatrix::from_returns(&[vec![0.1, 0.2], vec![0.1]]).unwrap_err();
        assert!(matches!(err, RiskError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_flat_series_is_degenerate() {
        let err =
            CorrelationMatrix::from_returns(&[vec![0.1, 0.2, 0.3], vec![0.5, 0.5, 0.5]]).unwrap_err();
        assert!(err.to_string().contains("series 1"));
    }

    #[test]
    fn test_empty_input() {
        let matrix = CorrelationMatrix::from_returns::<Vec<f64>>(&[]).unwrap();
        assert!(matrix.is_empty());
        assert_eq!(matrix.rows().count(), 0);
    }
}
