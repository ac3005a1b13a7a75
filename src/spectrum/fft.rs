//! In-place radix-2 decimation-in-time FFT over split real/imaginary buffers.
//!
//! No normalization is applied. Nothing here validates its input: a length
//! that is not a power of two yields a wrong stage count and silently wrong
//! output, but never indexes out of bounds. Use
//! [`crate::spectrum::pipeline::Analyzer`] for the checked path.

use std::f64::consts::PI;

/// Number of times `n` can be halved before reaching 1.
pub fn log2_floor(mut n: usize) -> usize {
    let mut stages = 0;
    while n > 1 {
        n /= 2;
        stages += 1;
    }
    stages
}

/// Bit-reversal permutation using a running reversed index.
///
/// Both buffers are permuted with the same mapping. For a real-only input the
/// imaginary buffer is all zero here, so this matches permuting `real` alone.
pub fn reverse_bits(real: &mut [f64], imag: &mut [f64]) {
    let size = real.len();
    let mut j = 0;
    for i in 0..size.saturating_sub(1) {
        if i < j && j < size {
            real.swap(i, j);
            imag.swap(i, j);
        }
        let mut m = size >> 1;
        while m >= 2 && j >= m {
            j -= m;
            m >>= 1;
        }
        j += m;
    }
}

#[inline]
fn twiddle(j: usize, l2: usize) -> (f64, f64) {
    let angle = -2.0 * PI * j as f64 / l2 as f64;
    (angle.cos(), angle.sin())
}

#[inline]
fn butterflies(real: &mut [f64], imag: &mut [f64], j: usize, l1: usize, (c1, c2): (f64, f64)) {
    let l2 = l1 << 1;
    let mut i = j;
    // the partner index stays in bounds even when the length is not a power of two
    while i + l1 < real.len() {
        let i1 = i + l1;
        let t1 = c1 * real[i1] - c2 * imag[i1];
        let t2 = c1 * imag[i1] + c2 * real[i1];

        real[i1] = real[i] - t1;
        imag[i1] = imag[i] - t2;
        real[i] += t1;
        imag[i] += t2;
        i += l2;
    }
}

/// Forward transform of `real + i·imag`, overwriting both buffers.
///
/// For a real signal `imag` must be zeroed by the caller. Twiddle factors are
/// recomputed on every call; [`FftPlan`] caches them.
#[allow(dead_code)]
pub fn fft(real: &mut [f64], imag: &mut [f64]) {
    reverse_bits(real, imag);

    for l in 0..log2_floor(real.len()) {
        let l1 = 1 << l;
        let l2 = l1 << 1;
        for j in 0..l1 {
            butterflies(real, imag, j, l1, twiddle(j, l2));
        }
    }
}

/// Twiddle factors for one transform size, computed once.
///
/// Produces output bit-identical to [`fft`] for the same size.
#[derive(Clone, Debug)]
pub struct FftPlan {
    size: usize,
    stages: usize,
    // stage l occupies [2^l - 1, 2^(l+1) - 1)
    twiddles: Vec<(f64, f64)>,
}

impl FftPlan {
    pub fn new(size: usize) -> Self {
        let stages = log2_floor(size);
        let mut twiddles = Vec::with_capacity(size.saturating_sub(1));
        for l in 0..stages {
            let l1 = 1 << l;
            let l2 = l1 << 1;
            twiddles.extend((0..l1).map(|j| twiddle(j, l2)));
        }
        Self { size, stages, twiddles }
    }

    #[allow(dead_code)]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Transforms in place. Both buffers must hold exactly [`FftPlan::size`]
    /// values; the plan's stage count is fixed and is not re-derived from the
    /// buffer length.
    pub fn process(&self, real: &mut [f64], imag: &mut [f64]) {
        debug_assert_eq!(real.len(), self.size, "real buffer does not match plan size");
        debug_assert_eq!(imag.len(), real.len(), "imaginary buffer does not match real buffer");
        reverse_bits(real, imag);

        for l in 0..self.stages {
            let l1 = 1 << l;
            let stage = &self.twiddles[l1 - 1..(l1 << 1) - 1];
            for (j, &tw) in stage.iter().enumerate() {
                butterflies(real, imag, j, l1, tw);
            }
        }
    }
}
