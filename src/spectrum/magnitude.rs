/// Overwrites `real` with `sqrt(re² + im²)` for each index.
///
/// `imag` is left as it was but no longer pairs with `real`; callers must not
/// read it afterwards.
pub fn convert_to_magnitude(real: &mut [f64], imag: &[f64]) {
    for (re, im) in real.iter_mut().zip(imag) {
        *re = ((*re * *re) + (im * im)).sqrt();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pythagorean_pairs() {
        let mut real = vec![3.0, -5.0, 0.0, -8.0];
        let imag = vec![4.0, 12.0, -7.0, 0.0];
        convert_to_magnitude(&mut real, &imag);
        assert_eq!(real, vec![5.0, 13.0, 7.0, 8.0]);
    }

    #[test]
    fn never_negative() {
        let mut real: Vec<f64> = (0..32).map(|i| (i as f64 - 16.0) * 1.5).collect();
        let imag: Vec<f64> = (0..32).map(|i| -(i as f64) * 0.25).collect();
        convert_to_magnitude(&mut real, &imag);
        assert!(real.iter().all(|&m| m >= 0.0));
    }
}
