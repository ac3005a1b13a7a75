use thiserror::Error;

use super::binning::bin_frequencies;
use super::fft::FftPlan;
use super::levels::{map_levels, Bar};
use super::magnitude::convert_to_magnitude;
use super::window::HammingWindow;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContractViolation {
    #[error("sample count {0} is not a power of two >= 2")]
    NotPowerOfTwo(usize),
    #[error("bin count must be at least 1")]
    NoBins,
    #[error("bin count {bins} exceeds half the sample count ({half})")]
    TooManyBins { bins: usize, half: usize },
    #[error("bin count {bins} does not divide half the sample count ({half})")]
    UnevenBins { bins: usize, half: usize },
    #[error("{buffer} buffer holds {actual} values, expected {expected}")]
    LengthMismatch {
        buffer: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// A validated (sample count, bin count) pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpectrumConfig {
    samples: usize,
    bins: usize,
}

impl SpectrumConfig {
    pub fn new(samples: usize, bins: usize) -> Result<Self, ContractViolation> {
        if samples < 2 || !samples.is_power_of_two() {
            return Err(ContractViolation::NotPowerOfTwo(samples));
        }
        if bins == 0 {
            return Err(ContractViolation::NoBins);
        }
        let half = samples / 2;
        if bins > half {
            return Err(ContractViolation::TooManyBins { bins, half });
        }
        if half % bins != 0 {
            return Err(ContractViolation::UnevenBins { bins, half });
        }
        Ok(Self { samples, bins })
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn bins(&self) -> usize {
        self.bins
    }

    /// Magnitudes averaged into each bin.
    pub fn bin_width(&self) -> usize {
        self.samples / 2 / self.bins
    }

    /// Frequency span of one bin at `sample_rate`.
    pub fn bin_hz(&self, sample_rate: f64) -> f64 {
        self.bin_width() as f64 * sample_rate / self.samples as f64
    }
}

/// Time-domain block: real samples plus a zeroed imaginary buffer.
pub struct Signal<'a> {
    real: &'a mut [f64],
    imag: &'a mut [f64],
}

/// Complex spectrum left in the two buffers after the transform.
pub struct Spectrum<'a> {
    real: &'a mut [f64],
    imag: &'a mut [f64],
}

/// Magnitude spectrum written over the former real buffer. The imaginary
/// buffer is released when this is created and cannot be reached through it.
pub struct Magnitudes<'a> {
    values: &'a mut [f64],
}

impl<'a> Signal<'a> {
    /// Borrows the block and zeroes `imag`.
    pub fn new(real: &'a mut [f64], imag: &'a mut [f64]) -> Self {
        imag.fill(0.0);
        Self { real, imag }
    }

    pub fn apply_window(&mut self, window: &HammingWindow) {
        window.apply(self.real);
    }

    pub fn transform(self, plan: &FftPlan) -> Spectrum<'a> {
        plan.process(self.real, self.imag);
        Spectrum {
            real: self.real,
            imag: self.imag,
        }
    }
}

#[allow(dead_code)]
impl<'a> Spectrum<'a> {
    pub fn real(&self) -> &[f64] {
        self.real
    }

    pub fn imag(&self) -> &[f64] {
        self.imag
    }

    pub fn into_magnitudes(self) -> Magnitudes<'a> {
        convert_to_magnitude(self.real, self.imag);
        Magnitudes { values: self.real }
    }
}

impl Magnitudes<'_> {
    #[allow(dead_code)]
    pub fn values(&self) -> &[f64] {
        self.values
    }

    pub fn bin_into(&self, bins: &mut [f64]) {
        bin_frequencies(self.values, bins);
    }
}

/// Runs the whole pipeline for one validated configuration.
///
/// Window coefficients and twiddle factors are computed once here and shared
/// read-only by every call, so one `Analyzer` can serve concurrent callers as
/// long as each brings its own buffers.
#[derive(Clone, Debug)]
pub struct Analyzer {
    config: SpectrumConfig,
    window: HammingWindow,
    plan: FftPlan,
}

impl Analyzer {
    pub fn new(config: SpectrumConfig) -> Self {
        Self {
            config,
            window: HammingWindow::new(config.samples()),
            plan: FftPlan::new(config.samples()),
        }
    }

    pub fn config(&self) -> &SpectrumConfig {
        &self.config
    }

    /// Windows, transforms and bins `real`, then maps each bin to a bar.
    ///
    /// All lengths are checked before any buffer is touched; past that point
    /// the call cannot fail. `real` ends up holding the magnitude spectrum and
    /// `imag` is left in an unspecified state.
    pub fn process(
        &self,
        real: &mut [f64],
        imag: &mut [f64],
        binned: &mut [f64],
        bars: &mut [Bar],
    ) -> Result<(), ContractViolation> {
        let n = self.config.samples();
        let b = self.config.bins();
        check_len("real", n, real.len())?;
        check_len("imaginary", n, imag.len())?;
        check_len("binned", b, binned.len())?;
        check_len("bar", b, bars.len())?;

        let mut signal = Signal::new(real, imag);
        signal.apply_window(&self.window);
        let magnitudes = signal.transform(&self.plan).into_magnitudes();
        magnitudes.bin_into(binned);
        map_levels(binned, bars);
        Ok(())
    }
}

fn check_len(buffer: &'static str, expected: usize, actual: usize) -> Result<(), ContractViolation> {
    if expected == actual {
        Ok(())
    } else {
        Err(ContractViolation::LengthMismatch {
            buffer,
            expected,
            actual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::binning::bin_frequencies;
    use crate::spectrum::fft::fft;
    use crate::spectrum::levels::map_level;
    use crate::spectrum::magnitude::convert_to_magnitude;
    use crate::spectrum::window::hamming_window;
    use std::f64::consts::PI;

    #[test]
    fn rejects_bad_sample_counts() {
        assert_eq!(SpectrumConfig::new(0, 1), Err(ContractViolation::NotPowerOfTwo(0)));
        assert_eq!(SpectrumConfig::new(1, 1), Err(ContractViolation::NotPowerOfTwo(1)));
        assert_eq!(SpectrumConfig::new(100, 2), Err(ContractViolation::NotPowerOfTwo(100)));
    }

    #[test]
    fn rejects_bad_bin_counts() {
        assert_eq!(SpectrumConfig::new(128, 0), Err(ContractViolation::NoBins));
        assert_eq!(
            SpectrumConfig::new(128, 65),
            Err(ContractViolation::TooManyBins { bins: 65, half: 64 })
        );
        assert_eq!(
            SpectrumConfig::new(128, 12),
            Err(ContractViolation::UnevenBins { bins: 12, half: 64 })
        );
    }

    #[test]
    fn accepts_device_defaults() {
        let cfg = SpectrumConfig::new(128, 16).unwrap();
        assert_eq!(cfg.bin_width(), 4);
        assert!((cfg.bin_hz(1800.0) - 56.25).abs() < 1e-12);
        assert!(SpectrumConfig::new(2, 1).is_ok());
    }

    #[test]
    fn error_messages_name_the_problem() {
        let err = SpectrumConfig::new(64, 7).unwrap_err();
        assert_eq!(err.to_string(), "bin count 7 does not divide half the sample count (32)");
    }

    #[test]
    fn length_mismatch_leaves_buffers_untouched() {
        let analyzer = Analyzer::new(SpectrumConfig::new(16, 4).unwrap());
        let mut real = vec![1.0; 16];
        let mut imag = vec![0.0; 16];
        let mut binned = vec![0.0; 3];
        let mut bars = vec![Bar::default(); 4];

        let err = analyzer
            .process(&mut real, &mut imag, &mut binned, &mut bars)
            .unwrap_err();
        assert_eq!(
            err,
            ContractViolation::LengthMismatch { buffer: "binned", expected: 4, actual: 3 }
        );
        assert!(real.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn matches_the_unchecked_stages() {
        let n = 128;
        let bins = 16;
        let signal: Vec<f64> = (0..n)
            .map(|i| 40.0 * (2.0 * PI * 9.0 * i as f64 / n as f64).sin())
            .collect();

        let mut real = signal.clone();
        let mut imag = vec![0.0; n];
        hamming_window(&mut real);
        fft(&mut real, &mut imag);
        convert_to_magnitude(&mut real, &imag);
        let mut want_bins = vec![0.0; bins];
        bin_frequencies(&real, &mut want_bins);
        let want_bars: Vec<Bar> = want_bins.iter().map(|&v| map_level(v)).collect();

        let analyzer = Analyzer::new(SpectrumConfig::new(n, bins).unwrap());
        let mut real = signal;
        let mut imag = vec![5.0; n];
        let mut binned = vec![0.0; bins];
        let mut bars = vec![Bar::default(); bins];
        analyzer.process(&mut real, &mut imag, &mut binned, &mut bars).unwrap();

        assert_eq!(binned, want_bins);
        assert_eq!(bars, want_bars);
    }

    #[test]
    fn tone_lights_its_bin() {
        // bin 2 of 16 covers magnitudes 8..12; 10 cycles per block sits inside it
        let n = 128;
        let analyzer = Analyzer::new(SpectrumConfig::new(n, 16).unwrap());
        let mut real: Vec<f64> = (0..n)
            .map(|i| 60.0 * (2.0 * PI * 10.0 * i as f64 / n as f64).sin())
            .collect();
        let mut imag = vec![0.0; n];
        let mut binned = vec![0.0; 16];
        let mut bars = vec![Bar::default(); 16];
        analyzer.process(&mut real, &mut imag, &mut binned, &mut bars).unwrap();

        let loudest = (0..16).max_by(|&a, &b| binned[a].total_cmp(&binned[b])).unwrap();
        assert_eq!(loudest, 2);
        assert_eq!(bars[2], Bar { lower: 7, upper: 7 });
        assert!(binned.iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn typed_stages_expose_the_spectrum() {
        let plan = FftPlan::new(8);
        let mut real = vec![1.0; 8];
        let mut imag = vec![9.0; 8];
        let spectrum = Signal::new(&mut real, &mut imag).transform(&plan);
        assert!((spectrum.real()[0] - 8.0).abs() < 1e-12);
        assert!(spectrum.imag().iter().all(|v| v.abs() < 1e-12));
        let mags = spectrum.into_magnitudes();
        assert!((mags.values()[0] - 8.0).abs() < 1e-12);
        assert!(mags.values()[1..].iter().all(|v| v.abs() < 1e-12));
    }
}
