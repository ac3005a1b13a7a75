use std::f64::consts::PI;

#[inline]
fn hamming(i: usize, size: usize) -> f64 {
    0.54 - 0.46 * (2.0 * PI * i as f64 / (size - 1) as f64).cos()
}

/// Applies a Hamming window to `data` in place.
///
/// `data.len()` must be at least 2; a single-sample buffer divides by zero
/// in the coefficient denominator.
#[allow(dead_code)]
pub fn hamming_window(data: &mut [f64]) {
    let size = data.len();
    for (i, x) in data.iter_mut().enumerate() {
        *x *= hamming(i, size);
    }
}

/// Hamming coefficients precomputed for one block size.
#[derive(Clone, Debug)]
pub struct HammingWindow {
    coeffs: Vec<f64>,
}

impl HammingWindow {
    pub fn new(size: usize) -> Self {
        Self {
            coeffs: (0..size).map(|i| hamming(i, size)).collect(),
        }
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn apply(&self, data: &mut [f64]) {
        for (x, w) in data.iter_mut().zip(&self.coeffs) {
            *x *= w;
        }
    }
}
