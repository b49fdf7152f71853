//! SIMD reductions shared by the windowed indicators.
//!
//! These use the `wide` crate for portable SIMD operations. Every function
//! processes four lanes at a time and finishes the remainder in scalar code,
//! so results match the scalar definitions up to floating-point
//! reassociation.

use wide::f64x4;

#[inline]
fn lanes(data: &[f64], idx: usize) -> f64x4 {
    f64x4::new([data[idx], data[idx + 1], data[idx + 2], data[idx + 3]])
}

/// Sum of a slice.
pub fn sum_simd(data: &[f64]) -> f64 {
    let chunks = data.len() / 4;
    let mut simd_sum = f64x4::splat(0.0);

    for i in 0..chunks {
        simd_sum += lanes(data, i * 4);
    }

    let mut result = simd_sum.reduce_add();

    for &value in &data[(chunks * 4)..] {
        result += value;
    }

    result
}

/// Arithmetic mean of a slice, `None` when empty.
pub fn mean_simd(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(sum_simd(data) / data.len() as f64)
}

/// Dot product over the common prefix of two slices.
pub fn dot_product_simd(a: &[f64], b: &[f64]) -> f64 {
    let len = a.len().min(b.len());
    let chunks = len / 4;
    let mut simd_sum = f64x4::splat(0.0);

    for i in 0..chunks {
        let idx = i * 4;
        simd_sum += lanes(a, idx) * lanes(b, idx);
    }

    let mut result = simd_sum.reduce_add();

    for i in (chunks * 4)..len {
        result += a[i] * b[i];
    }

    result
}

/// Sum of squared deviations from `mean`.
pub fn sum_sq_dev_simd(data: &[f64], mean: f64) -> f64 {
    let chunks = data.len() / 4;
    let mean_vec = f64x4::splat(mean);
    let mut simd_sum = f64x4::splat(0.0);

    for i in 0..chunks {
        let diff = lanes(data, i * 4) - mean_vec;
        simd_sum += diff * diff;
    }

    let mut result = simd_sum.reduce_add();

    for &value in &data[(chunks * 4)..] {
        let diff = value - mean;
        result += diff * diff;
    }

    result
}

/// Population standard deviation, `None` when empty.
pub fn population_std_dev(data: &[f64]) -> Option<f64> {
    let mean = mean_simd(data)?;
    Some((sum_sq_dev_simd(data, mean) / data.len() as f64).sqrt())
}

/// Minimum and maximum of a slice.
pub fn minmax_simd(data: &[f64]) -> Option<(f64, f64)> {
    if data.is_empty() {
        return None;
    }

    let chunks = data.len() / 4;
    let mut min_vec = f64x4::splat(f64::INFINITY);
    let mut max_vec = f64x4::splat(f64::NEG_INFINITY);

    for i in 0..chunks {
        let values = lanes(data, i * 4);
        min_vec = min_vec.min(values);
        max_vec = max_vec.max(values);
    }

    let (mut min, mut max) = min_vec
        .to_array()
        .iter()
        .zip(max_vec.to_array().iter())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (&a, &b)| {
            (lo.min(a), hi.max(b))
        });

    for &value in &data[(chunks * 4)..] {
        min = min.min(value);
        max = max.max(value);
    }

    Some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_simd() {
        let data: Vec<f64> = (1..=100).map(|x| x as f64).collect();
        assert!((sum_simd(&data) - 5050.0).abs() < 1e-10);
    }

    #[test]
    fn test_mean_simd() {
        assert_eq!(mean_simd(&[]), None);
        assert_eq!(mean_simd(&[1.0, 2.0, 3.0, 4.0, 5.0]), Some(3.0));
    }

    #[test]
    fn test_dot_product_simd() {
        let a = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let b = vec![5.0, 6.0, 7.0, 8.0, 9.0];

        // 5 + 12 + 21 + 32 + 45
        assert!((dot_product_simd(&a, &b) - 115.0).abs() < 1e-10);
    }

    #[test]
    fn test_population_std_dev() {
        let data = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let std_dev = population_std_dev(&data).unwrap();

        assert!((std_dev - 2.0).abs() < 1e-12);
        assert_eq!(population_std_dev(&[]), None);
    }

    #[test]
    fn test_minmax_simd() {
        let data = vec![5.0, 2.0, 8.0, 1.0, 9.0, 3.0, 7.0, 4.0, -1.0];
        let (min, max) = minmax_simd(&data).unwrap();

        assert!((min + 1.0).abs() < 1e-10);
        assert!((max - 9.0).abs() < 1e-10);
        assert!(minmax_simd(&[]).is_none());
    }
}
