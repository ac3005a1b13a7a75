/// Averages the positive-frequency half of `magnitudes` into `bins`.
///
/// The bin width is `(N / 2) / B` with floor division, where `N` is
/// `magnitudes.len()` and `B` is `bins.len()`. Magnitudes past `B * width`
/// belong to no bin and are dropped.
///
/// `B` must be non-zero (the width division panics otherwise) and at most
/// `N / 2` (otherwise the width is zero and every average is NaN).
pub fn bin_frequencies(magnitudes: &[f64], bins: &mut [f64]) {
    let bin_size = magnitudes.len() / 2 / bins.len();

    for (k, bin) in bins.iter_mut().enumerate() {
        let start = k * bin_size;
        let sum: f64 = magnitudes[start..start + bin_size].iter().sum();
        *bin = sum / bin_size as f64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_only_the_lower_half() {
        let mags = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let mut bins = [0.0; 2];
        bin_frequencies(&mags, &mut bins);
        assert_eq!(bins, [1.5, 3.5]);
    }

    #[test]
    fn one_bin_per_magnitude() {
        let mags = [9.0, 4.0, 2.0, 1.0, 100.0, 100.0, 100.0, 100.0];
        let mut bins = [0.0; 4];
        bin_frequencies(&mags, &mut bins);
        assert_eq!(bins, [9.0, 4.0, 2.0, 1.0]);
    }

    #[test]
    fn uneven_split_drops_the_remainder() {
        // N/2 = 8, B = 3 -> width 2, magnitudes 6 and 7 are unused
        let mags: Vec<f64> = (0..16).map(|i| i as f64).collect();
        let mut bins = [0.0; 3];
        bin_frequencies(&mags, &mut bins);
        assert_eq!(bins, [0.5, 2.5, 4.5]);
    }

    #[test]
    fn default_device_layout() {
        let mags = vec![2.0; 128];
        let mut bins = [0.0; 16];
        bin_frequencies(&mags, &mut bins);
        assert!(bins.iter().all(|&b| b == 2.0));
    }
}
